use holdem_engine::player::PlayerAction;
use holdem_engine::view::DecisionView;
use rand::RngCore;

use crate::AIOpponent;

/// Checks when it can, calls otherwise. Never folds or raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveAI;

impl AIOpponent for PassiveAI {
    fn get_action(&self, view: &DecisionView, _rng: &mut dyn RngCore) -> PlayerAction {
        if view.can_check() {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        }
    }

    fn name(&self) -> &str {
        "PassiveAI"
    }
}

//! # holdem-ai: Automated Opponents
//!
//! Decision policies for the automated seats of a `holdem-engine` table and
//! a small pacing shim for presentation layers that want opponents to
//! "think" before acting.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait every policy implements
//! - [`heuristic`] - Randomised rule-of-thumb policy
//! - [`passive`] - Always checks or calls
//! - [`pacing`] - Think delays and the [`pacing::Autoplayer`] driver
//! - [`create_ai`] - Factory by policy name
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::{create_ai, play_automated};
//! use holdem_engine::engine::Engine;
//!
//! let ai = create_ai("heuristic").expect("known policy");
//! let mut engine = Engine::new(Some(42));
//! engine.configure(4, 2000).unwrap();
//! engine.start_hand().unwrap();
//!
//! // Automated seats act until the human (seat 0) is up or the hand ends
//! play_automated(&mut engine, ai.as_ref()).unwrap();
//! ```

use holdem_engine::engine::{Engine, TurnReport};
use holdem_engine::errors::GameError;
use holdem_engine::player::PlayerAction;
use holdem_engine::view::DecisionView;
use rand::RngCore;

pub mod heuristic;
pub mod pacing;
pub mod passive;

/// Trait defining the interface for automated opponents.
///
/// Implementations are stateless between calls: everything they may know
/// is in the [`DecisionView`], and all randomness comes from `rng` so a
/// seeded engine replays identically.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_ai::AIOpponent;
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::view::DecisionView;
/// use rand::RngCore;
///
/// struct Folder;
///
/// impl AIOpponent for Folder {
///     fn get_action(&self, view: &DecisionView, _rng: &mut dyn RngCore) -> PlayerAction {
///         if view.can_check() { PlayerAction::Check } else { PlayerAction::Fold }
///     }
///
///     fn name(&self) -> &str {
///         "Folder"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Decide the action of `view.player_id`.
    fn get_action(&self, view: &DecisionView, rng: &mut dyn RngCore) -> PlayerAction;

    /// Identifier of this policy.
    fn name(&self) -> &str;
}

/// Creates a policy by name: `"heuristic"` or `"passive"`.
pub fn create_ai(ai_type: &str) -> Option<Box<dyn AIOpponent>> {
    match ai_type {
        "heuristic" => Some(Box::new(heuristic::HeuristicAI::new())),
        "passive" => Some(Box::new(passive::PassiveAI)),
        _ => None,
    }
}

/// Plays every automated turn until a human seat is to act or the hand
/// is over.
pub fn play_automated(engine: &mut Engine, ai: &dyn AIOpponent) -> Result<Vec<TurnReport>, GameError> {
    engine.run_automated(|view, rng| ai.get_action(view, rng))
}

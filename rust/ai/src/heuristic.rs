//! Randomised rule-of-thumb opponent.
//!
//! Hand strength is expressed on the evaluator's category scale (1 = high
//! card ... 10 = royal flush). Before the flop there are only two cards, so
//! a hole-card table stands in for the evaluator and maps onto the same
//! scale.

use holdem_engine::cards::Card;
use holdem_engine::hand::rank_of;
use holdem_engine::player::PlayerAction;
use holdem_engine::view::DecisionView;
use rand::{Rng, RngCore};

use crate::AIOpponent;

/// Probability of raising with three of a kind or better.
const RAISE_CHANCE: f64 = 0.4;
/// Probability of folding high card to a bet above [`LOOSE_FOLD_MIN_CALL`].
const WEAK_FOLD_CHANCE: f64 = 0.25;
const LOOSE_FOLD_MIN_CALL: u32 = 50;
/// Probability of folding less than two pair to a bet above
/// [`EXPENSIVE_CALL_SHARE`] of the stack.
const EXPENSIVE_FOLD_CHANCE: f64 = 0.3;
const EXPENSIVE_CALL_SHARE: f64 = 0.4;

/// Rule-based policy, evaluated top to bottom, first match wins:
///
/// 1. strength ≥ 4, 40% of the time, if a minimum raise is affordable:
///    raise to `current_bet + 2·min_raise` (capped at the stack)
/// 2. strength ≤ 1, 25% of the time, when the call costs more than 50: fold
/// 3. call costs more than 40% of the stack, strength < 3, 30% of the time: fold
/// 4. otherwise check if possible, else call
///
/// A single uniform draw is shared by all rules.
#[derive(Debug, Clone, Default)]
pub struct HeuristicAI;

impl HeuristicAI {
    pub fn new() -> Self {
        Self
    }

    /// Strength on the category scale (1-10).
    pub fn strength(view: &DecisionView) -> u8 {
        match view.hole_cards {
            Some(hole) if view.community.is_empty() => {
                preflop_category(evaluate_preflop_strength(hole))
            }
            _ => rank_of(&view.known_cards()).max(1),
        }
    }

    /// Applies the rules for a given strength and uniform draw `r` in [0, 1).
    pub fn decide(view: &DecisionView, strength: u8, r: f64) -> PlayerAction {
        let ctx = view.bet_context();
        let call_amount = ctx.to_call();

        if strength >= 4 && r < RAISE_CHANCE && ctx.can_raise() {
            let target = (ctx.current_bet + 2 * ctx.min_raise).min(ctx.max_bet());
            return PlayerAction::Raise(target);
        }
        if strength <= 1 && r < WEAK_FOLD_CHANCE && call_amount > LOOSE_FOLD_MIN_CALL {
            return PlayerAction::Fold;
        }
        if f64::from(call_amount) > EXPENSIVE_CALL_SHARE * f64::from(ctx.chips)
            && strength < 3
            && r < EXPENSIVE_FOLD_CHANCE
        {
            return PlayerAction::Fold;
        }
        if call_amount == 0 {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        }
    }
}

/// Maps the 0-10 preflop rating onto the category scale so the same
/// thresholds apply before and after the flop.
fn preflop_category(rating: u8) -> u8 {
    match rating {
        9..=10 => 4,
        7..=8 => 3,
        4..=6 => 2,
        _ => 1,
    }
}

/// Preflop hand strength on a scale of 0-10.
///
/// - 9-10: Premium hands (AA, KK, QQ, JJ, AKs)
/// - 7-8: Strong hands (TT-99, AK, AQ, KQs)
/// - 5-6: Medium hands (88-77, AJ, suited connectors)
/// - 3-4: Marginal hands (66-22, Ax, broadway)
/// - 0-2: Weak hands (offsuit low cards)
fn evaluate_preflop_strength(hole_cards: [Card; 2]) -> u8 {
    let c1 = hole_cards[0];
    let c2 = hole_cards[1];

    let r1 = c1.rank.value();
    let r2 = c2.rank.value();
    let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
    let suited = c1.suit == c2.suit;
    let pick = |s: u8, o: u8| if suited { s } else { o };

    // Pairs
    if r1 == r2 {
        return match high {
            13..=14 => 10,
            11..=12 => 9,
            10 => 8,
            9 => 7,
            8 => 6,
            7 => 5,
            _ => 4,
        };
    }

    match (high, low) {
        (14, 13) => pick(10, 8),
        (14, 12) => pick(8, 7),
        (14, 11) => pick(7, 6),
        (14, 10) => pick(6, 5),
        (14, _) => pick(5, 4),
        (13, 12) => pick(7, 6),
        (13, 11) => pick(6, 5),
        (13, 10) => pick(5, 4),
        (12, 11) => pick(6, 5),
        (12, 10) => pick(5, 4),
        // Suited connectors and one-gappers
        _ => {
            if suited && high - low <= 2 {
                if high >= 9 { 5 } else { 4 }
            } else if high >= 11 && low >= 9 {
                4
            } else {
                2
            }
        }
    }
}

impl AIOpponent for HeuristicAI {
    fn get_action(&self, view: &DecisionView, rng: &mut dyn RngCore) -> PlayerAction {
        let r: f64 = rng.random();
        let strength = Self::strength(view);
        let action = Self::decide(view, strength, r);
        tracing::trace!(
            player_id = view.player_id,
            strength,
            roll = r,
            action = ?action,
            "heuristic decision"
        );
        action
    }

    fn name(&self) -> &str {
        "HeuristicAI"
    }
}

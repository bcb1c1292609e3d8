use crate::errors::GameError;
use crate::player::PlayerAction as A;

pub const SMALL_BLIND: u32 = 10;
pub const BIG_BLIND: u32 = 20;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// The betting facts an action is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetContext {
    /// Chips behind for the actor
    pub chips: u32,
    /// What the actor already has in front of them this round
    pub player_bet: u32,
    /// Highest bet of the round
    pub current_bet: u32,
    /// Smallest legal raise increment
    pub min_raise: u32,
}

impl BetContext {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.player_bet)
    }

    /// Largest total bet the actor can reach this round.
    pub fn max_bet(&self) -> u32 {
        self.chips + self.player_bet
    }

    /// Smallest legal raise-to target.
    pub fn min_raise_to(&self) -> u32 {
        self.current_bet + self.min_raise
    }

    pub fn can_raise(&self) -> bool {
        self.max_bet() >= self.min_raise_to()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips to move; may be short of the full amount owed
    Call(u32),
    /// New round bet and the chips that reach it
    Raise { to: u32, commit: u32 },
    /// Whole stack; `total` is the actor's resulting round bet
    AllIn { commit: u32, total: u32 },
}

/// Validates a player action according to betting rules and stack size.
///
/// Converts a [`crate::player::PlayerAction`] into a [`ValidatedAction`]
/// carrying the exact chip movement.
///
/// # Errors
///
/// - [`GameError::CannotCheck`] - check while a bet is owed
/// - [`GameError::RaiseTooSmall`] - raise target below `current_bet + min_raise`
/// - [`GameError::RaiseUnaffordable`] - raise target beyond the actor's stack
///
/// Calls never fail: they are clamped to the stack.
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, BetContext, ValidatedAction};
/// use holdem_engine::player::PlayerAction;
///
/// let ctx = BetContext { chips: 1000, player_bet: 0, current_bet: 20, min_raise: 20 };
/// assert_eq!(validate_action(&ctx, PlayerAction::Call), Ok(ValidatedAction::Call(20)));
/// assert_eq!(
///     validate_action(&ctx, PlayerAction::Raise(60)),
///     Ok(ValidatedAction::Raise { to: 60, commit: 60 })
/// );
/// assert!(validate_action(&ctx, PlayerAction::Check).is_err());
/// ```
pub fn validate_action(ctx: &BetContext, action: A) -> Result<ValidatedAction, GameError> {
    let to_call = ctx.to_call();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { to_call })
            }
        }
        A::Call => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Ok(ValidatedAction::Call(to_call.min(ctx.chips)))
            }
        }
        A::Raise(amount) => {
            let minimum = ctx.min_raise_to();
            if amount < minimum {
                return Err(GameError::RaiseTooSmall { amount, minimum });
            }
            let needed = amount - ctx.player_bet;
            if needed > ctx.chips {
                return Err(GameError::RaiseUnaffordable {
                    amount,
                    needed,
                    available: ctx.chips,
                });
            }
            Ok(ValidatedAction::Raise {
                to: amount,
                commit: needed,
            })
        }
        A::AllIn => Ok(ValidatedAction::AllIn {
            commit: ctx.chips,
            total: ctx.max_bet(),
        }),
    }
}

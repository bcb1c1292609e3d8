use thiserror::Error;

use crate::cards::Card;
use crate::table::Phase;

/// Coarse grouping of [`GameError`] variants, for collaborators that only
/// need to know what class of problem occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The action is not permitted in the current betting state
    IllegalAction,
    /// The command is not permitted in the current phase
    IllegalPhase,
    /// Table configuration was rejected
    InvalidConfig,
    /// An engine invariant was broken
    Internal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not player {actual}'s turn (expected {expected:?})")]
    NotPlayersTurn {
        expected: Option<usize>,
        actual: usize,
    },
    #[error("Cannot check while {to_call} is owed")]
    CannotCheck { to_call: u32 },
    #[error("Raise to {amount} is below the minimum of {minimum}")]
    RaiseTooSmall { amount: u32, minimum: u32 },
    #[error("Raise to {amount} needs {needed} chips but only {available} remain")]
    RaiseUnaffordable {
        amount: u32,
        needed: u32,
        available: u32,
    },
    #[error("Seat {player_id} is automated and acts on its own")]
    AutomatedSeat { player_id: usize },
    #[error("Player {player_id} can no longer act this hand")]
    PlayerInactive { player_id: usize },
    #[error("Unknown player {0}")]
    UnknownPlayer(usize),
    #[error("{command} is not allowed during {phase:?}")]
    IllegalPhase { phase: Phase, command: &'static str },
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
    #[error("At least two seats need chips to deal a hand")]
    NotEnoughPlayers,
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("A hand needs {needed} cards but the deck holds {remaining}")]
    DeckTooShort { needed: usize, remaining: usize },
    #[error("Card {0} appears twice in the deck")]
    DuplicateCard(Card),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::NotPlayersTurn { .. }
            | GameError::CannotCheck { .. }
            | GameError::RaiseTooSmall { .. }
            | GameError::RaiseUnaffordable { .. }
            | GameError::AutomatedSeat { .. }
            | GameError::PlayerInactive { .. }
            | GameError::UnknownPlayer(_) => ErrorKind::IllegalAction,
            GameError::IllegalPhase { .. } | GameError::NotEnoughPlayers => {
                ErrorKind::IllegalPhase
            }
            GameError::InvalidConfig(_)
            | GameError::DeckTooShort { .. }
            | GameError::DuplicateCard(_) => ErrorKind::InvalidConfig,
            GameError::DeckExhausted | GameError::Internal(_) => ErrorKind::Internal,
        }
    }
}

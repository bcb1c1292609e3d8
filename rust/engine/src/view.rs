//! Read-only snapshots handed to collaborators and to the automated policy.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::{ActionHint, Player};
use crate::rules::BetContext;
use crate::table::{Phase, Table};

/// Chips won by one seat at the end of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub player_id: usize,
    pub name: String,
    pub amount: u32,
    /// Category name when the hand was shown down
    pub hand_name: Option<String>,
    /// The five cards that made the hand
    pub best_cards: Option<[Card; 5]>,
}

/// Outcome of the last finished hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub winners: Vec<Winner>,
    /// Uncalled chips handed back to seats that won nothing
    pub returned: Vec<(usize, u32)>,
    pub pot: u32,
    /// Everyone else folded; no cards were shown
    pub by_fold: bool,
    pub message: String,
}

/// Public view of one seat. Hole cards are present only when the viewer
/// may see them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub id: usize,
    pub name: String,
    pub chips: u32,
    pub current_bet: u32,
    pub folded: bool,
    pub all_in: bool,
    pub sitting_out: bool,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    pub automated: bool,
    pub cards_revealed: bool,
    pub hole_cards: Option<[Card; 2]>,
    pub hand_name: Option<String>,
    pub best_cards: Option<[Card; 5]>,
    pub last_action: Option<ActionHint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: Phase,
    pub phase_name: String,
    pub hand_number: u32,
    pub pot: u32,
    pub community: Vec<Card>,
    pub current_player: Option<usize>,
    pub current_bet: u32,
    pub min_raise: u32,
    pub dealer: Option<usize>,
    pub seats: Vec<SeatView>,
    pub result: Option<HandResult>,
}

impl TableSnapshot {
    /// `viewer` sees their own hole cards; every live hand is revealed
    /// after a contested showdown.
    pub(crate) fn build(
        table: &Table,
        hand_number: u32,
        result: Option<&HandResult>,
        viewer: Option<usize>,
    ) -> Self {
        let showdown = table.phase() == Phase::Showdown && result.is_some_and(|r| !r.by_fold);
        let seats = table
            .players()
            .iter()
            .map(|p| {
                let revealed = showdown && p.is_live();
                let visible = revealed || viewer == Some(p.id());
                SeatView {
                    id: p.id(),
                    name: p.name().to_string(),
                    chips: p.chips(),
                    current_bet: p.current_bet(),
                    folded: p.has_folded(),
                    all_in: p.is_all_in(),
                    sitting_out: p.is_sitting_out(),
                    is_dealer: p.is_dealer(),
                    is_small_blind: p.is_small_blind(),
                    is_big_blind: p.is_big_blind(),
                    automated: p.is_automated(),
                    cards_revealed: revealed,
                    hole_cards: if visible { p.hole_pair() } else { None },
                    hand_name: if revealed {
                        p.hand().map(|h| h.name().to_string())
                    } else {
                        None
                    },
                    best_cards: if revealed { p.best_cards() } else { None },
                    last_action: p.last_action(),
                }
            })
            .collect();
        Self {
            phase: table.phase(),
            phase_name: table.phase().name().to_string(),
            hand_number,
            pot: table.pot(),
            community: table.community().to_vec(),
            current_player: table.current_player(),
            current_bet: table.current_bet(),
            min_raise: table.min_raise(),
            dealer: table.dealer(),
            seats,
            result: result.cloned(),
        }
    }
}

/// What an automated seat knows when it decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionView {
    pub player_id: usize,
    pub phase: Phase,
    pub hole_cards: Option<[Card; 2]>,
    pub community: Vec<Card>,
    pub pot: u32,
    pub current_bet: u32,
    pub player_bet: u32,
    pub chips: u32,
    pub min_raise: u32,
}

impl DecisionView {
    pub(crate) fn build(table: &Table, player: &Player) -> Self {
        Self {
            player_id: player.id(),
            phase: table.phase(),
            hole_cards: player.hole_pair(),
            community: table.community().to_vec(),
            pot: table.pot(),
            current_bet: table.current_bet(),
            player_bet: player.current_bet(),
            chips: player.chips(),
            min_raise: table.min_raise(),
        }
    }

    pub fn bet_context(&self) -> BetContext {
        BetContext {
            chips: self.chips,
            player_bet: self.player_bet,
            current_bet: self.current_bet,
            min_raise: self.min_raise,
        }
    }

    pub fn to_call(&self) -> u32 {
        self.bet_context().to_call()
    }

    pub fn can_check(&self) -> bool {
        self.to_call() == 0
    }

    pub fn max_bet(&self) -> u32 {
        self.bet_context().max_bet()
    }

    /// Hole cards followed by the board.
    pub fn known_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.hole_cards.map(|h| h.to_vec()).unwrap_or_default();
        cards.extend_from_slice(&self.community);
        cards
    }
}

/// Betting options of the seat to act, for building controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    pub can_check: bool,
    /// Chips a call would move (clamped to the stack)
    pub call_amount: u32,
    pub can_raise: bool,
    pub min_raise_to: u32,
    /// Whole stack as a round total
    pub max_raise_to: u32,
}

impl From<BetContext> for LegalActions {
    fn from(ctx: BetContext) -> Self {
        Self {
            can_check: ctx.to_call() == 0,
            call_amount: ctx.to_call().min(ctx.chips),
            can_raise: ctx.can_raise(),
            min_raise_to: ctx.min_raise_to(),
            max_raise_to: ctx.max_bet(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::HandValue;

/// Represents a player action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "amount")]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid when nothing is owed)
    Check,
    /// Call the current bet, clamped to the remaining stack
    Call,
    /// Raise the round's bet to the given total
    Raise(u32),
    /// Commit every remaining chip
    AllIn,
}

/// Most recent action of a seat in the current street, for display.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "amount")]
pub enum ActionHint {
    Fold,
    Check,
    Call(u32),
    Raise(u32),
    AllIn(u32),
}

/// A seat at the table. Chips carry across hands; everything else is reset
/// when a new hand starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: usize,
    name: String,
    automated: bool,
    /// Chips behind (not yet committed)
    chips: u32,
    /// Committed in the current betting round
    current_bet: u32,
    /// Committed over the whole hand, used to layer side pots
    committed: u32,
    folded: bool,
    all_in: bool,
    sitting_out: bool,
    pub(crate) is_dealer: bool,
    pub(crate) is_small_blind: bool,
    pub(crate) is_big_blind: bool,
    hole: [Option<Card>; 2],
    hand: Option<HandValue>,
    /// The five cards behind `hand`
    best_cards: Option<[Card; 5]>,
    last_action: Option<ActionHint>,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>, chips: u32, automated: bool) -> Self {
        Self {
            id,
            name: name.into(),
            automated,
            chips,
            current_bet: 0,
            committed: 0,
            folded: false,
            all_in: false,
            sitting_out: false,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
            hole: [None, None],
            hand: None,
            best_cards: None,
            last_action: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_automated(&self) -> bool {
        self.automated
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn committed(&self) -> u32 {
        self.committed
    }
    pub fn has_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn is_sitting_out(&self) -> bool {
        self.sitting_out
    }
    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }
    pub fn is_small_blind(&self) -> bool {
        self.is_small_blind
    }
    pub fn is_big_blind(&self) -> bool {
        self.is_big_blind
    }
    pub fn hand(&self) -> Option<&HandValue> {
        self.hand.as_ref()
    }
    pub fn best_cards(&self) -> Option<[Card; 5]> {
        self.best_cards
    }
    pub fn last_action(&self) -> Option<ActionHint> {
        self.last_action
    }

    /// Still contesting the pot.
    pub fn is_live(&self) -> bool {
        !self.folded
    }

    /// Still able to act in a betting round.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    pub fn hole_cards(&self) -> [Option<Card>; 2] {
        self.hole
    }

    /// Both hole cards, once dealt.
    pub fn hole_pair(&self) -> Option<[Card; 2]> {
        match self.hole {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), GameError> {
        match self.hole.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(c);
                Ok(())
            }
            None => Err(GameError::Internal(format!(
                "player {} already holds two cards",
                self.id
            ))),
        }
    }

    /// Clears per-hand state. A seat without chips sits the hand out.
    pub(crate) fn reset_for_hand(&mut self) {
        self.current_bet = 0;
        self.committed = 0;
        self.all_in = false;
        self.sitting_out = self.chips == 0;
        self.folded = self.sitting_out;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        self.hole = [None, None];
        self.hand = None;
        self.best_cards = None;
        self.last_action = None;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.current_bet = 0;
        self.last_action = None;
    }

    /// Moves up to `amount` chips from the stack into the current bet and
    /// returns what was actually moved. Emptying the stack marks the player
    /// all-in.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.chips);
        self.chips -= moved;
        self.current_bet += moved;
        self.committed += moved;
        if self.chips == 0 && moved > 0 {
            self.all_in = true;
        }
        moved
    }

    pub(crate) fn fold(&mut self) {
        self.folded = true;
        self.last_action = Some(ActionHint::Fold);
    }

    pub(crate) fn set_last_action(&mut self, hint: ActionHint) {
        self.last_action = Some(hint);
    }

    pub(crate) fn set_hand(&mut self, value: HandValue, five: [Card; 5]) {
        self.hand = Some(value);
        self.best_cards = Some(five);
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        // table totals are bounded by TableConfig::validate
        self.chips += amount;
    }
}

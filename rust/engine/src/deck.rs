use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// An ordered pile of distinct cards. The top of the deck is the end of the
/// vector, so dealing is a `pop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Unshuffled 52-card deck.
    pub fn new() -> Self {
        Self {
            cards: full_deck(),
        }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// Builds a deck that deals `deal_order[0]` first, then `deal_order[1]`, ...
    /// Used to replay or script hands. A card may appear only once.
    pub fn stacked(deal_order: Vec<Card>) -> Result<Self, GameError> {
        for (i, c) in deal_order.iter().enumerate() {
            if deal_order[..i].contains(c) {
                return Err(GameError::DuplicateCard(*c));
            }
        }
        let mut cards = deal_order;
        cards.reverse();
        Ok(Self { cards })
    }

    /// Fisher-Yates permutation of the remaining cards.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn burn(&mut self) -> Option<Card> {
        self.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

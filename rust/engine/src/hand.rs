use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Name reported when fewer than five cards are available.
pub const INSUFFICIENT_NAME: &str = "insufficient";

/// Poker hand categories, lowest to highest. The discriminant is the
/// category rank reported to collaborators (1-10).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

/// Value of a five-card hand.
///
/// Ordering is `(category, kickers)` lexicographically. `kickers` holds the
/// ranks that break ties within the category, most significant first:
///
/// - straights (incl. straight/royal flush): the straight-high only (5 for the wheel)
/// - four of a kind: quad rank, kicker
/// - full house: trip rank, pair rank
/// - flush, high card: all five ranks descending
/// - three of a kind: trip rank, two kickers
/// - two pair: high pair, low pair, kicker
/// - one pair: pair rank, three kickers
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandValue {
    pub category: Category,
    pub kickers: [u8; 5],
}

impl HandValue {
    pub fn rank(&self) -> u8 {
        self.category.rank()
    }

    pub fn name(&self) -> &'static str {
        self.category.name()
    }

    /// Single scalar describing the hand within its category. Coarser than
    /// the full ordering: two pair is `high * 100 + low`, every other
    /// category reports its leading rank.
    pub fn score(&self) -> u32 {
        let lead = u32::from(self.kickers[0]);
        match self.category {
            Category::TwoPair => lead * 100 + u32::from(self.kickers[1]),
            _ => lead,
        }
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn compare_hands(a: &HandValue, b: &HandValue) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Best five-card hand among `cards` (any count; 5-7 in play).
/// Returns `None` when fewer than five cards are given.
pub fn evaluate(cards: &[Card]) -> Option<HandValue> {
    best_five(cards).map(|(value, _)| value)
}

/// Category rank of the best hand, or 0 when fewer than five cards are given.
pub fn rank_of(cards: &[Card]) -> u8 {
    evaluate(cards).map_or(0, |v| v.rank())
}

/// Category name of the best hand, or [`INSUFFICIENT_NAME`].
pub fn name_of(cards: &[Card]) -> &'static str {
    evaluate(cards).map_or(INSUFFICIENT_NAME, |v| v.name())
}

/// Enumerates every five-card subset (at most 21 for seven cards) and keeps
/// the highest, together with the cards that make it.
pub fn best_five(cards: &[Card]) -> Option<(HandValue, [Card; 5])> {
    let n = cards.len();
    if n < 5 {
        return None;
    }
    let mut best: Option<(HandValue, [Card; 5])> = None;
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let value = evaluate_five(&five);
                        if best.as_ref().is_none_or(|(v, _)| value > *v) {
                            best = Some((value, five));
                        }
                    }
                }
            }
        }
    }
    best
}

/// Exact value of exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandValue {
    let mut ranks = cards.map(|c| c.rank.value());
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(&ranks);

    // (count, rank), count desc then rank desc
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for &r in &ranks {
        match groups.last_mut() {
            Some((count, rank)) if *rank == r => *count += 1,
            _ => groups.push((1, r)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let top = groups[0].0;
    let second = groups.get(1).map_or(0, |g| g.0);

    let mut grouped = [0u8; 5];
    for (slot, &(_, rank)) in grouped.iter_mut().zip(groups.iter()) {
        *slot = rank;
    }

    let (category, kickers) = match straight {
        Some(14) if is_flush => (Category::RoyalFlush, [14, 0, 0, 0, 0]),
        Some(high) if is_flush => (Category::StraightFlush, [high, 0, 0, 0, 0]),
        _ if top == 4 => (Category::FourOfAKind, grouped),
        _ if top == 3 && second == 2 => (Category::FullHouse, grouped),
        _ if is_flush => (Category::Flush, ranks),
        Some(high) => (Category::Straight, [high, 0, 0, 0, 0]),
        None if top == 3 => (Category::ThreeOfAKind, grouped),
        None if top == 2 && second == 2 => (Category::TwoPair, grouped),
        None if top == 2 => (Category::OnePair, grouped),
        None => (Category::HighCard, ranks),
    };
    HandValue { category, kickers }
}

/// Straight-high of five descending ranks: 5 for A-2-3-4-5.
fn straight_high(desc: &[u8; 5]) -> Option<u8> {
    let distinct = desc.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }
    if desc[0] - desc[4] == 4 {
        return Some(desc[0]);
    }
    if *desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

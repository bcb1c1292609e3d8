use serde::{Deserialize, Serialize};

use crate::hand::HandValue;

/// What one seat put into the pot over the whole hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub seat: usize,
    pub amount: u32,
    /// Still contesting the pot (not folded)
    pub live: bool,
}

/// One layer of the pot and the live seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible: Vec<usize>,
}

/// Where the chips of a finished hand go.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settlement {
    /// Seats that won chips, with everything they collect (their own
    /// uncalled chips included)
    pub won: Vec<(usize, u32)>,
    /// Uncalled chips going back to seats that won nothing
    pub returned: Vec<(usize, u32)>,
}

impl Settlement {
    /// Every chip movement, winnings first.
    pub fn payouts(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.won.iter().chain(&self.returned).copied()
    }

    pub fn total(&self) -> u32 {
        self.payouts().map(|(_, amount)| amount).sum()
    }
}

/// Main pot plus side pots, layered by commitment size, and the uncalled
/// excess that goes back to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PotManager {
    pots: Vec<Pot>,
    returns: Vec<(usize, u32)>,
}

impl PotManager {
    /// Layers contributions from the smallest commitment up. Folded seats pay
    /// into every layer they reached but are never eligible. A layer nobody
    /// live reached is folded into the layer below it; a layer only one live
    /// seat paid into is not contested and is returned to that seat.
    pub fn from_contributions(contributions: &[Contribution]) -> Self {
        let mut levels: Vec<u32> = contributions
            .iter()
            .map(|c| c.amount)
            .filter(|&a| a > 0)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::new();
        let mut returns: Vec<(usize, u32)> = Vec::new();
        let mut carry = 0u32;
        let mut prev = 0u32;
        for level in levels {
            let payers: Vec<&Contribution> = contributions.iter().filter(|c| c.amount > prev).collect();
            let amount: u32 = payers.iter().map(|c| c.amount.min(level) - prev).sum();
            prev = level;
            if let [only] = payers.as_slice() {
                if only.live {
                    add_to(&mut returns, only.seat, amount);
                    continue;
                }
            }
            let eligible: Vec<usize> = payers
                .iter()
                .filter(|c| c.live && c.amount >= level)
                .map(|c| c.seat)
                .collect();
            if eligible.is_empty() {
                match pots.last_mut() {
                    Some(last) => last.amount += amount,
                    None => carry += amount,
                }
                continue;
            }
            pots.push(Pot {
                amount: amount + carry,
                eligible,
            });
            carry = 0;
        }
        if carry > 0 {
            let eligible: Vec<usize> = contributions
                .iter()
                .filter(|c| c.live)
                .map(|c| c.seat)
                .collect();
            pots.push(Pot {
                amount: carry,
                eligible,
            });
        }
        Self { pots, returns }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// Uncalled chips per seat.
    pub fn returns(&self) -> &[(usize, u32)] {
        &self.returns
    }

    pub fn main_pot(&self) -> u32 {
        self.pots.first().map_or(0, |p| p.amount)
    }

    pub fn side_pots(&self) -> Vec<u32> {
        self.pots.iter().skip(1).map(|p| p.amount).collect()
    }

    /// Pots plus returns: every chip committed this hand.
    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum::<u32>() + self.returns.iter().map(|(_, a)| a).sum::<u32>()
    }

    /// Pays every pot to the best eligible hand(s) and hands back uncalled
    /// chips. `seat_order` lists seats clockwise starting left of the dealer
    /// and decides who receives odd chips of a split. Seats without a hand
    /// (no showdown) only win a pot when they are its sole eligible seat.
    pub fn distribute<F>(&self, seat_order: &[usize], hand_of: F) -> Settlement
    where
        F: Fn(usize) -> Option<HandValue>,
    {
        let mut won: Vec<(usize, u32)> = Vec::new();
        for pot in &self.pots {
            let winners = pot_winners(pot, seat_order, &hand_of);
            for (seat, amount) in split_evenly(pot.amount, &winners) {
                add_to(&mut won, seat, amount);
            }
        }
        let mut returned = Vec::new();
        for &(seat, amount) in &self.returns {
            match won.iter_mut().find(|(s, _)| *s == seat) {
                Some((_, total)) => *total += amount,
                None => returned.push((seat, amount)),
            }
        }
        Settlement { won, returned }
    }
}

fn add_to(totals: &mut Vec<(usize, u32)>, seat: usize, amount: u32) {
    match totals.iter_mut().find(|(s, _)| *s == seat) {
        Some((_, total)) => *total += amount,
        None => totals.push((seat, amount)),
    }
}

fn pot_winners<F>(pot: &Pot, seat_order: &[usize], hand_of: &F) -> Vec<usize>
where
    F: Fn(usize) -> Option<HandValue>,
{
    let ordered: Vec<usize> = seat_order
        .iter()
        .copied()
        .filter(|s| pot.eligible.contains(s))
        .collect();
    if ordered.len() <= 1 {
        return ordered;
    }
    let best = ordered.iter().filter_map(|&s| hand_of(s)).max();
    match best {
        Some(best) => ordered
            .into_iter()
            .filter(|&s| hand_of(s) == Some(best))
            .collect(),
        None => ordered,
    }
}

/// Equal shares; the remainder goes one chip at a time to the earliest
/// winners.
pub fn split_evenly(amount: u32, winners: &[usize]) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u32;
    let share = amount / n;
    let remainder = amount % n;
    winners
        .iter()
        .enumerate()
        .map(|(i, &seat)| (seat, share + u32::from((i as u32) < remainder)))
        .collect()
}

//! Table state: seats, board, pot and the betting-round bookkeeping.
//!
//! The table is the single source of truth for a hand. Every mutation goes
//! through one of the transition methods below; each validates its
//! preconditions before touching anything, so a rejected call leaves the
//! table exactly as it was.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::best_five;
use crate::player::{ActionHint, Player};
use crate::pot::{Contribution, PotManager, Settlement};
use crate::rules::{BetContext, ValidatedAction, BIG_BLIND};

/// Phase of the table. A hand cycles Preflop → Flop → Turn → River →
/// Showdown, jumping to Showdown as soon as one live player remains.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Waiting => "waiting",
            Phase::Preflop => "preflop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Showdown => "showdown",
        }
    }

    pub fn is_betting(self) -> bool {
        matches!(self, Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River)
    }
}

/// Button and blind seats for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positions {
    pub dealer: usize,
    pub small_blind: usize,
    pub big_blind: usize,
}

#[derive(Debug, Clone)]
pub struct Table {
    players: Vec<Player>,
    deck: Deck,
    community: Vec<Card>,
    pot: u32,
    phase: Phase,
    current_player: Option<usize>,
    current_bet: u32,
    min_raise: u32,
    action_count: usize,
    last_aggressor: Option<usize>,
    dealer: Option<usize>,
    burn_cards: bool,
    chips_in_play: u64,
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}

impl Table {
    /// A table with no seats, in `Setup`.
    pub fn empty() -> Self {
        Self {
            players: Vec::new(),
            deck: Deck::new(),
            community: Vec::with_capacity(5),
            pot: 0,
            phase: Phase::Setup,
            current_player: None,
            current_bet: 0,
            min_raise: BIG_BLIND,
            action_count: 0,
            last_aggressor: None,
            dealer: None,
            burn_cards: false,
            chips_in_play: 0,
        }
    }

    /// Seats the given players; the table then waits for the first hand.
    pub fn seated(players: Vec<Player>, burn_cards: bool) -> Self {
        let chips_in_play = players.iter().map(|p| u64::from(p.chips())).sum();
        Self {
            players,
            phase: Phase::Waiting,
            burn_cards,
            chips_in_play,
            ..Self::empty()
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Result<&Player, GameError> {
        self.players.get(seat).ok_or(GameError::UnknownPlayer(seat))
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn current_player(&self) -> Option<usize> {
        self.current_player
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }
    pub fn action_count(&self) -> usize {
        self.action_count
    }
    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }
    pub fn dealer(&self) -> Option<usize> {
        self.dealer
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn live_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_live()).count()
    }

    /// Seats that can still act: not folded, not all-in.
    pub fn actor_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    pub fn bet_context(&self, seat: usize) -> Result<BetContext, GameError> {
        let p = self.player(seat)?;
        Ok(BetContext {
            chips: p.chips(),
            player_bet: p.current_bet(),
            current_bet: self.current_bet,
            min_raise: self.min_raise,
        })
    }

    /// Seats clockwise starting left of the dealer.
    pub fn seat_order(&self) -> Vec<usize> {
        let n = self.players.len();
        let start = self.dealer.map_or(0, |d| d + 1);
        (0..n).map(|i| (start + i) % n).collect()
    }

    /// First seat clockwise after `seat` that can still act.
    pub fn next_actor_after(&self, seat: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|i| (seat + i) % n)
            .find(|&s| self.players[s].can_act())
    }

    fn next_funded_after(&self, seat: usize) -> usize {
        let n = self.players.len();
        (1..=n)
            .map(|i| (seat + i) % n)
            .find(|&s| self.players[s].chips() > 0)
            .unwrap_or(seat)
    }

    /// Resets every seat, moves the button one funded seat clockwise and
    /// installs a fresh deck. The first hand puts the button on seat 0 (or
    /// the first funded seat after it). A deck too short to finish the hand
    /// is rejected before anything changes.
    pub fn begin_hand(&mut self, deck: Deck) -> Result<Positions, GameError> {
        if !matches!(self.phase, Phase::Waiting | Phase::Showdown) {
            return Err(GameError::IllegalPhase {
                phase: self.phase,
                command: "start_hand",
            });
        }
        let funded = self.players.iter().filter(|p| p.chips() > 0).count();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        // the whole hand is dealt from this deck, so it must already be complete
        let needed = 2 * funded + 5 + if self.burn_cards { 3 } else { 0 };
        if deck.remaining() < needed {
            return Err(GameError::DeckTooShort {
                needed,
                remaining: deck.remaining(),
            });
        }

        let n = self.players.len();
        let dealer = match self.dealer {
            Some(d) => self.next_funded_after(d),
            None if self.players[0].chips() > 0 => 0,
            None => self.next_funded_after(0),
        };
        let small_blind = self.next_funded_after(dealer);
        let big_blind = self.next_funded_after(small_blind);
        debug_assert!(dealer < n && small_blind < n && big_blind < n);

        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.players[dealer].is_dealer = true;
        self.players[small_blind].is_small_blind = true;
        self.players[big_blind].is_big_blind = true;

        self.deck = deck;
        self.community.clear();
        self.pot = 0;
        self.phase = Phase::Preflop;
        self.current_player = None;
        self.current_bet = 0;
        self.min_raise = BIG_BLIND;
        self.action_count = 0;
        self.last_aggressor = None;
        self.dealer = Some(dealer);
        self.chips_in_play = self.players.iter().map(|p| u64::from(p.chips())).sum();

        Ok(Positions {
            dealer,
            small_blind,
            big_blind,
        })
    }

    /// Forces `amount` (clamped to the stack) from `seat`. The round's bet
    /// becomes at least the nominal blind even when the stack is short.
    pub fn post_blind(&mut self, seat: usize, amount: u32) -> Result<u32, GameError> {
        if self.phase != Phase::Preflop || !self.community.is_empty() {
            return Err(GameError::IllegalPhase {
                phase: self.phase,
                command: "post_blind",
            });
        }
        let player = self
            .players
            .get_mut(seat)
            .ok_or(GameError::UnknownPlayer(seat))?;
        if !player.can_act() {
            return Err(GameError::PlayerInactive { player_id: seat });
        }
        let moved = player.commit(amount);
        self.pot += moved;
        self.current_bet = self.current_bet.max(amount);
        self.check_invariants()?;
        Ok(moved)
    }

    /// Two cards to every seat in the hand, seat order, two at a time.
    pub fn deal_hole(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Preflop || self.players.iter().any(|p| p.hole_pair().is_some()) {
            return Err(GameError::IllegalPhase {
                phase: self.phase,
                command: "deal_hole",
            });
        }
        let dealt_in = self.players.iter().filter(|p| !p.is_sitting_out()).count();
        if self.deck.remaining() < dealt_in * 2 {
            return Err(GameError::DeckExhausted);
        }
        for p in self.players.iter_mut().filter(|p| !p.is_sitting_out()) {
            for _ in 0..2 {
                let c = self.deck.pop().ok_or(GameError::DeckExhausted)?;
                p.give_card(c)?;
            }
        }
        Ok(())
    }

    /// Deals `n` community cards, burning one first when configured.
    pub fn deal_community(&mut self, n: usize) -> Result<(), GameError> {
        if self.community.len() + n > 5 {
            return Err(GameError::IllegalPhase {
                phase: self.phase,
                command: "deal_community",
            });
        }
        let needed = n + usize::from(self.burn_cards);
        if self.deck.remaining() < needed {
            return Err(GameError::DeckExhausted);
        }
        if self.burn_cards {
            self.deck.burn();
        }
        for _ in 0..n {
            let c = self.deck.pop().ok_or(GameError::DeckExhausted)?;
            self.community.push(c);
        }
        Ok(())
    }

    /// Opens the betting round with `first` to act (or nobody).
    pub fn set_current_player(&mut self, first: Option<usize>) {
        self.current_player = first;
    }

    /// Applies an already validated action for the seat whose turn it is.
    /// Returns the chips moved into the pot.
    pub fn apply_action(&mut self, seat: usize, action: ValidatedAction) -> Result<u32, GameError> {
        if !self.phase.is_betting() {
            return Err(GameError::IllegalPhase {
                phase: self.phase,
                command: "apply_action",
            });
        }
        if self.current_player != Some(seat) {
            return Err(GameError::NotPlayersTurn {
                expected: self.current_player,
                actual: seat,
            });
        }
        let current_bet = self.current_bet;
        let player = self
            .players
            .get_mut(seat)
            .ok_or(GameError::UnknownPlayer(seat))?;
        if !player.can_act() {
            return Err(GameError::PlayerInactive { player_id: seat });
        }

        let mut moved = 0;
        match action {
            ValidatedAction::Fold => {
                player.fold();
                self.action_count += 1;
            }
            ValidatedAction::Check => {
                player.set_last_action(ActionHint::Check);
                self.action_count += 1;
            }
            ValidatedAction::Call(amount) => {
                moved = player.commit(amount);
                player.set_last_action(ActionHint::Call(moved));
                self.action_count += 1;
            }
            ValidatedAction::Raise { to, commit } => {
                moved = player.commit(commit);
                player.set_last_action(ActionHint::Raise(to));
                self.min_raise = to - current_bet;
                self.current_bet = to;
                self.last_aggressor = Some(seat);
                self.action_count = 1;
            }
            ValidatedAction::AllIn { commit, total } => {
                moved = player.commit(commit);
                player.set_last_action(ActionHint::AllIn(total));
                if total > current_bet {
                    self.min_raise = total - current_bet;
                    self.current_bet = total;
                    self.last_aggressor = Some(seat);
                    self.action_count = 1;
                } else {
                    self.action_count += 1;
                }
            }
        }
        self.pot += moved;
        self.check_invariants()?;
        Ok(moved)
    }

    /// The betting round is over when at most one live player remains, or
    /// every seat that can act has matched the bet and acted since the last
    /// raise. A lone actor facing only all-in players has nobody to bet
    /// against once matched.
    pub fn is_round_complete(&self) -> bool {
        if self.live_count() <= 1 {
            return true;
        }
        let actors: Vec<&Player> = self.players.iter().filter(|p| p.can_act()).collect();
        if actors.is_empty() {
            return true;
        }
        let all_matched = actors.iter().all(|p| p.current_bet() == self.current_bet);
        all_matched && (self.action_count >= actors.len() || actors.len() == 1)
    }

    /// Clears per-round bets and counters.
    pub fn reset_round(&mut self) {
        for p in &mut self.players {
            p.reset_for_street();
        }
        self.current_bet = 0;
        self.min_raise = BIG_BLIND;
        self.action_count = 0;
        self.last_aggressor = None;
        self.current_player = None;
    }

    /// Moves to the next street, dealing its cards and opening the round
    /// with the first actor clockwise from the dealer. From the river this
    /// goes to `Showdown` without dealing.
    pub fn advance_phase(&mut self) -> Result<Phase, GameError> {
        let (next, cards) = match self.phase {
            Phase::Preflop => (Phase::Flop, 3),
            Phase::Flop => (Phase::Turn, 1),
            Phase::Turn => (Phase::River, 1),
            Phase::River => (Phase::Showdown, 0),
            phase => {
                return Err(GameError::IllegalPhase {
                    phase,
                    command: "advance_phase",
                })
            }
        };
        if cards > 0 {
            self.deal_community(cards)?;
        }
        self.reset_round();
        self.phase = next;
        if next.is_betting() {
            let dealer = self.dealer.unwrap_or(0);
            self.current_player = self.next_actor_after(dealer);
        }
        Ok(next)
    }

    /// Evaluates and caches the best hand of every live seat.
    pub fn evaluate_live_hands(&mut self) {
        let board = self.community.clone();
        for p in self.players.iter_mut().filter(|p| p.is_live()) {
            if let Some(hole) = p.hole_pair() {
                let mut cards = hole.to_vec();
                cards.extend_from_slice(&board);
                if let Some((value, five)) = best_five(&cards) {
                    p.set_hand(value, five);
                }
            }
        }
    }

    /// Pays out the pot (side pots included), returns uncalled chips and
    /// ends the hand in `Showdown`.
    pub fn award_pot(&mut self) -> Result<Settlement, GameError> {
        if !self.phase.is_betting() && self.phase != Phase::Showdown {
            return Err(GameError::IllegalPhase {
                phase: self.phase,
                command: "award_pot",
            });
        }
        let contributions: Vec<Contribution> = self
            .players
            .iter()
            .map(|p| Contribution {
                seat: p.id(),
                amount: p.committed(),
                live: p.is_live(),
            })
            .collect();
        let pots = PotManager::from_contributions(&contributions);
        if pots.total() != self.pot {
            return Err(invariant_violation(format!(
                "pot {} does not match commitments {}",
                self.pot,
                pots.total()
            )));
        }
        let settlement = pots.distribute(&self.seat_order(), |seat| {
            self.players[seat].hand().copied()
        });
        for (seat, amount) in settlement.payouts() {
            self.players[seat].add_chips(amount);
        }
        self.pot = 0;
        self.phase = Phase::Showdown;
        self.current_player = None;
        self.check_invariants()?;
        Ok(settlement)
    }

    /// Moves a finished hand back to `Waiting`.
    pub fn close_hand(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::Showdown | Phase::Waiting => {
                self.phase = Phase::Waiting;
                Ok(())
            }
            phase => Err(GameError::IllegalPhase {
                phase,
                command: "close_hand",
            }),
        }
    }

    /// Chips are neither created nor destroyed during a hand.
    pub fn check_invariants(&self) -> Result<(), GameError> {
        let behind: u64 = self.players.iter().map(|p| u64::from(p.chips())).sum();
        if behind + u64::from(self.pot) != self.chips_in_play {
            return Err(invariant_violation(format!(
                "chips {} + pot {} != {}",
                behind, self.pot, self.chips_in_play
            )));
        }
        // winnings land on all-in stacks once the pot is paid
        if !self.phase.is_betting() {
            return Ok(());
        }
        if let Some(p) = self.players.iter().find(|p| p.is_all_in() && p.chips() != 0) {
            return Err(invariant_violation(format!(
                "player {} is all-in with chips behind",
                p.id()
            )));
        }
        Ok(())
    }
}

fn invariant_violation(msg: String) -> GameError {
    debug_assert!(false, "table invariant violated: {}", msg);
    tracing::error!(reason = %msg, "table invariant violated");
    GameError::Internal(msg)
}

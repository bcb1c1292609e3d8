use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::Card;
use crate::config::{TableConfig, HUMAN_NAME};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::logger::{format_hand_id, today, ActionRecord, HandRecord, ShowdownInfo};
use crate::player::{Player, PlayerAction};
use crate::rules::{validate_action, BIG_BLIND, SMALL_BLIND};
use crate::table::{Phase, Positions, Table};
use crate::view::{DecisionView, HandResult, LegalActions, TableSnapshot, Winner};

const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// One applied turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub player_id: usize,
    pub action: PlayerAction,
    /// Chips moved into the pot by the action
    pub committed: u32,
    /// Phase once the engine settled after the action
    pub phase: Phase,
    pub hand_over: bool,
}

/// Hand controller for a single table: one human at seat 0 and automated
/// opponents in the other seats.
///
/// The engine is driven by commands (`configure`, `start_hand`,
/// `submit_action`, `reset_to_setup`); automated seats are advanced with
/// [`Engine::play_automated_turn`] / [`Engine::run_automated`], which lend
/// the engine's RNG to the decision function so a seed reproduces a whole
/// session.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::Engine;
/// use holdem_engine::player::PlayerAction;
///
/// let mut engine = Engine::new(Some(7));
/// engine.configure(3, 1000).unwrap();
/// engine.start_hand().unwrap();
///
/// // Automated seats check or call until the human is to act
/// engine
///     .run_automated(|view, _rng| {
///         if view.can_check() { PlayerAction::Check } else { PlayerAction::Call }
///     })
///     .unwrap();
/// assert!(engine.current_player().is_none_or(|p| p == 0));
/// ```
#[derive(Debug)]
pub struct Engine {
    table: Table,
    config: Option<TableConfig>,
    rng: ChaCha20Rng,
    seed: u64,
    hand_number: u32,
    record: Option<HandRecord>,
    result: Option<HandResult>,
}

impl Engine {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        Self {
            table: Table::empty(),
            config: None,
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
            hand_number: 0,
            record: None,
            result: None,
        }
    }

    /// Creates the seats. Seat 0 is the human.
    pub fn configure(&mut self, player_count: usize, starting_chips: u32) -> Result<(), GameError> {
        self.configure_with(TableConfig::new(player_count, starting_chips))
    }

    pub fn configure_with(&mut self, config: TableConfig) -> Result<(), GameError> {
        if self.table.phase() != Phase::Setup {
            return Err(GameError::IllegalPhase {
                phase: self.table.phase(),
                command: "configure",
            });
        }
        config.validate()?;
        if let Some(seed) = config.seed {
            self.seed = seed;
            self.rng = ChaCha20Rng::seed_from_u64(seed);
        }
        let players = (0..config.player_count)
            .map(|seat| Player::new(seat, config.seat_name(seat), config.starting_chips, seat != 0))
            .collect();
        self.table = Table::seated(players, config.burn_cards);
        tracing::info!(
            player_count = config.player_count,
            starting_chips = config.starting_chips,
            seed = self.seed,
            "table configured"
        );
        self.config = Some(config);
        self.hand_number = 0;
        self.record = None;
        self.result = None;
        Ok(())
    }

    /// Shuffles a fresh deck and deals a new hand.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        self.ensure_can_start()?;
        let deck = Deck::shuffled(&mut self.rng);
        self.start_hand_with_deck(deck)
    }

    /// Deals a new hand from the given deck (see [`Deck::stacked`]). A deck
    /// that cannot finish the hand is rejected with the table untouched.
    pub fn start_hand_with_deck(&mut self, deck: Deck) -> Result<(), GameError> {
        self.ensure_can_start()?;
        let Positions {
            dealer,
            small_blind,
            big_blind,
        } = self.table.begin_hand(deck)?;

        self.hand_number += 1;
        let hand_id = format_hand_id(&today(), self.hand_number);
        tracing::info!(
            hand_id = %hand_id,
            dealer,
            small_blind,
            big_blind,
            "starting hand"
        );
        self.record = Some(HandRecord::new(hand_id, Some(self.seed), dealer));
        self.result = None;

        self.table.post_blind(small_blind, SMALL_BLIND)?;
        self.table.post_blind(big_blind, BIG_BLIND)?;
        self.table.deal_hole()?;
        let first = self.table.next_actor_after(big_blind);
        self.table.set_current_player(first);

        if first.is_none() || self.table.is_round_complete() {
            self.advance_streets()?;
        }
        Ok(())
    }

    fn ensure_can_start(&self) -> Result<(), GameError> {
        match self.table.phase() {
            Phase::Waiting | Phase::Showdown => Ok(()),
            phase => Err(GameError::IllegalPhase {
                phase,
                command: "start_hand",
            }),
        }
    }

    /// Applies the human's action. Turns of automated seats are rejected.
    pub fn submit_action(&mut self, player_id: usize, action: PlayerAction) -> Result<TurnReport, GameError> {
        let phase = self.table.phase();
        if !phase.is_betting() {
            return Err(GameError::IllegalPhase {
                phase,
                command: "submit_action",
            });
        }
        if self.table.player(player_id)?.is_automated() {
            tracing::warn!(player_id, "rejected action for automated seat");
            return Err(GameError::AutomatedSeat { player_id });
        }
        self.act(player_id, action)
    }

    /// Lets the automated seat to act decide and applies its action.
    /// Returns `None` when no automated seat is to act. An illegal decision
    /// is replaced by a check or call.
    pub fn play_automated_turn<F>(&mut self, decide: F) -> Result<Option<TurnReport>, GameError>
    where
        F: FnOnce(&DecisionView, &mut ChaCha20Rng) -> PlayerAction,
    {
        let Some(seat) = self.current_player() else {
            return Ok(None);
        };
        let player = self.table.player(seat)?;
        if !player.is_automated() {
            return Ok(None);
        }
        let view = DecisionView::build(&self.table, player);
        let action = decide(&view, &mut self.rng);
        match self.act(seat, action) {
            Ok(report) => Ok(Some(report)),
            Err(e) if e.kind() == crate::errors::ErrorKind::IllegalAction => {
                tracing::warn!(player_id = seat, action = ?action, error = %e, "automated decision rejected, calling instead");
                self.act(seat, PlayerAction::Call).map(Some)
            }
            Err(e) => Err(e),
        }
    }

    /// Plays automated turns until a human seat is to act or the hand ends.
    pub fn run_automated<F>(&mut self, mut decide: F) -> Result<Vec<TurnReport>, GameError>
    where
        F: FnMut(&DecisionView, &mut ChaCha20Rng) -> PlayerAction,
    {
        let mut turns = Vec::new();
        while let Some(report) = self.play_automated_turn(&mut decide)? {
            turns.push(report);
        }
        Ok(turns)
    }

    /// Abandons the current hand and the seating; chips in the pot are not
    /// distributed.
    pub fn reset_to_setup(&mut self) {
        tracing::info!(hand_number = self.hand_number, "resetting table to setup");
        self.table = Table::empty();
        self.config = None;
        self.hand_number = 0;
        self.record = None;
        self.result = None;
    }

    /// Leaves the finished hand's showdown and waits for the next one.
    pub fn close_hand(&mut self) -> Result<(), GameError> {
        self.table.close_hand()
    }

    fn act(&mut self, seat: usize, action: PlayerAction) -> Result<TurnReport, GameError> {
        if self.table.current_player() != Some(seat) {
            tracing::warn!(player_id = seat, expected = ?self.table.current_player(), "action out of turn");
            return Err(GameError::NotPlayersTurn {
                expected: self.table.current_player(),
                actual: seat,
            });
        }
        let ctx = self.table.bet_context(seat)?;
        let validated = validate_action(&ctx, action).inspect_err(|e| {
            tracing::warn!(player_id = seat, action = ?action, error = %e, "illegal action rejected");
        })?;
        let phase = self.table.phase();
        let committed = self.table.apply_action(seat, validated)?;
        tracing::debug!(
            player_id = seat,
            phase = phase.name(),
            action = ?action,
            committed,
            pot = self.table.pot(),
            "action applied"
        );
        if let Some(record) = &mut self.record {
            record.actions.push(ActionRecord {
                player_id: seat,
                phase,
                action,
                committed,
            });
        }

        self.settle_after(seat)?;
        Ok(TurnReport {
            player_id: seat,
            action,
            committed,
            phase: self.table.phase(),
            hand_over: self.table.phase() == Phase::Showdown,
        })
    }

    fn settle_after(&mut self, seat: usize) -> Result<(), GameError> {
        if self.table.live_count() <= 1 {
            return self.finish_hand();
        }
        if self.table.is_round_complete() {
            return self.advance_streets();
        }
        match self.table.next_actor_after(seat) {
            Some(next) => {
                self.table.set_current_player(Some(next));
                Ok(())
            }
            None => self.advance_streets(),
        }
    }

    /// Deals streets until a betting round needs input or the hand is over.
    fn advance_streets(&mut self) -> Result<(), GameError> {
        loop {
            if self.table.live_count() <= 1 {
                return self.finish_hand();
            }
            let next = self.table.advance_phase()?;
            if next == Phase::Showdown {
                return self.finish_hand();
            }
            tracing::debug!(
                phase = next.name(),
                board = ?self.table.community(),
                "street dealt"
            );
            if self.table.current_player().is_some() && !self.table.is_round_complete() {
                return Ok(());
            }
        }
    }

    fn finish_hand(&mut self) -> Result<(), GameError> {
        let by_fold = self.table.live_count() <= 1;
        if !by_fold {
            self.table.evaluate_live_hands();
        }
        let pot = self.table.pot();
        let settlement = self.table.award_pot()?;

        let players = self.table.players();
        let winners: Vec<Winner> = settlement
            .won
            .iter()
            .map(|&(seat, amount)| {
                let shown = if by_fold { None } else { Some(&players[seat]) };
                Winner {
                    player_id: seat,
                    name: players[seat].name().to_string(),
                    amount,
                    hand_name: shown.and_then(|p| p.hand()).map(|h| h.name().to_string()),
                    best_cards: shown.and_then(Player::best_cards),
                }
            })
            .collect();
        let message = result_message(&winners, pot, by_fold);
        tracing::info!(
            pot,
            by_fold,
            winners = ?settlement.won,
            returned = ?settlement.returned,
            "{}",
            message
        );

        if let Some(record) = &mut self.record {
            record.board = self.table.community().to_vec();
            record.result = Some(message.clone());
            if !by_fold {
                record.showdown = Some(ShowdownInfo {
                    winners: winners.iter().map(|w| w.player_id).collect(),
                    notes: (winners.len() > 1).then(|| "pot shared".to_string()),
                });
            }
        }
        self.result = Some(HandResult {
            winners,
            returned: settlement.returned,
            pot,
            by_fold,
            message,
        });
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.table.phase()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn players(&self) -> &[Player] {
        self.table.players()
    }

    pub fn config(&self) -> Option<&TableConfig> {
        self.config.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    pub fn current_player(&self) -> Option<usize> {
        self.table.current_player()
    }

    pub fn pot(&self) -> u32 {
        self.table.pot()
    }

    pub fn board(&self) -> &[Card] {
        self.table.community()
    }

    /// True when the seat to act is automated.
    pub fn is_automated_turn(&self) -> bool {
        self.current_player()
            .and_then(|s| self.table.players().get(s))
            .is_some_and(Player::is_automated)
    }

    pub fn last_result(&self) -> Option<&HandResult> {
        self.result.as_ref()
    }

    /// History of the current or last hand.
    pub fn hand_record(&self) -> Option<&HandRecord> {
        self.record.as_ref()
    }

    /// Snapshot as seen from `viewer` (usually seat 0).
    pub fn snapshot(&self, viewer: Option<usize>) -> TableSnapshot {
        TableSnapshot::build(&self.table, self.hand_number, self.result.as_ref(), viewer)
    }

    /// The seat's own hole cards.
    pub fn private_view(&self, player_id: usize) -> Result<Option<[Card; 2]>, GameError> {
        Ok(self.table.player(player_id)?.hole_pair())
    }

    pub fn decision_view(&self, player_id: usize) -> Result<DecisionView, GameError> {
        let player = self.table.player(player_id)?;
        Ok(DecisionView::build(&self.table, player))
    }

    /// Options of `player_id` when it is their turn.
    pub fn legal_actions(&self, player_id: usize) -> Result<LegalActions, GameError> {
        if self.table.current_player() != Some(player_id) {
            return Err(GameError::NotPlayersTurn {
                expected: self.table.current_player(),
                actual: player_id,
            });
        }
        Ok(self.table.bet_context(player_id)?.into())
    }
}

fn result_message(winners: &[Winner], pot: u32, by_fold: bool) -> String {
    let verb = |w: &Winner| if w.name == HUMAN_NAME { "win" } else { "wins" };
    match winners {
        [] => format!("Nobody wins {}", pot),
        [w] if by_fold => format!("{} {} {}", w.name, verb(w), w.amount),
        [w] => format!(
            "{} {} {} with {}",
            w.name,
            verb(w),
            w.amount,
            w.hand_name.as_deref().unwrap_or("the best hand")
        ),
        many => many
            .iter()
            .map(|w| format!("{} {} {}", w.name, verb(w), w.amount))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

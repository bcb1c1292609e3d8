use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::PlayerAction;
use crate::table::Phase;

/// Records a single player action during a hand.
/// Associates the action with the player and the street when it occurred.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat that acted
    pub player_id: usize,
    /// The betting street when this action occurred
    pub phase: Phase,
    /// The action as submitted
    pub action: PlayerAction,
    /// Chips that actually moved into the pot
    pub committed: u32,
}

/// Complete record of a poker hand including all actions, board cards, and outcome.
/// Serialized to JSONL format for hand history storage and replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// RNG seed of the table (enables deterministic replay)
    pub seed: Option<u64>,
    /// Seat holding the button
    pub dealer: usize,
    /// Chronological list of all player actions, blinds excluded
    pub actions: Vec<ActionRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    /// Hand result summary (winner, pot size, etc.)
    pub result: Option<String>,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Showdown information if hand went to showdown
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

impl HandRecord {
    pub fn new(hand_id: String, seed: Option<u64>, dealer: usize) -> Self {
        Self {
            hand_id,
            seed,
            dealer,
            actions: Vec::new(),
            board: Vec::new(),
            result: None,
            ts: None,
            showdown: None,
        }
    }
}

/// Information about the showdown phase when hands are revealed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// List of player IDs who won chips
    pub winners: Vec<usize>,
    /// Optional notes about the showdown (e.g., "split pot")
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

pub fn today() -> String {
    Utc::now().format("%Y%m%d").to_string()
}

/// Writes hand records as JSON lines, one hand per line.
pub struct HandLogger {
    writer: BufWriter<File>,
    date: String,
    seq: u32,
    written: usize,
}

impl HandLogger {
    /// Starts a new log at `path`, replacing any existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ensure_parent(path.as_ref())?;
        Ok(Self::with_file(File::create(path)?))
    }

    /// Continues an existing log (or starts one) without truncating it.
    pub fn append<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ensure_parent(path.as_ref())?;
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_file(f))
    }

    fn with_file(f: File) -> Self {
        Self {
            writer: BufWriter::new(f),
            date: today(),
            seq: 0,
            written: 0,
        }
    }

    /// Id for the next hand of this session, dated by when the log was opened.
    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    /// Records written by this logger.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        tracing::debug!(hand_id = %rec.hand_id, actions = rec.actions.len(), "hand record written");
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir_all(parent),
        _ => Ok(()),
    }
}

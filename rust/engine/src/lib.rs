//! # holdem-engine: Single-Table Hold'em Core
//!
//! A no-limit Texas Hold'em engine for one human seat against automated
//! opponents. Provides hand evaluation, the table state machine, betting
//! validation and pot distribution, with a seedable RNG so whole sessions
//! can be replayed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - 52-card deck, shuffled per hand and dealt from the top
//! - [`hand`] - Best-of-seven hand evaluation and ordering
//! - [`player`] - Seat state, actions and chip commitment
//! - [`rules`] - Blinds, table limits and betting validation
//! - [`table`] - Table state and its transitions
//! - [`pot`] - Side pots and split-pot distribution
//! - [`engine`] - Hand controller driving one hand from deal to showdown
//! - [`view`] - Snapshots for presentation and automated players
//! - [`config`] - Table configuration (TOML / environment)
//! - [`logger`] - Hand history records and JSONL logging
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let value = evaluate(&cards).unwrap();
//! assert_eq!(value.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use holdem_engine::engine::Engine;
//!
//! let mut a = Engine::new(Some(42));
//! let mut b = Engine::new(Some(42));
//! a.configure(2, 1000).unwrap();
//! b.configure(2, 1000).unwrap();
//! a.start_hand().unwrap();
//! b.start_hand().unwrap();
//! assert_eq!(a.private_view(0).unwrap(), b.private_view(0).unwrap());
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod table;
pub mod view;

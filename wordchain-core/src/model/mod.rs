//! Top-level module for the word transition model.
//!
//! This module provides:
//! - Line tokenization (`tokenizer`)
//! - Per-word outgoing transitions (`Successors`)
//! - Transition counting (`ChainBuilder`)
//! - The read-only model and its generation operations (`ChainModel`)
//! - Generation mode selection (`Mode`) and request dispatch (`Request`)

/// Splits raw lines into normalized words.
pub mod tokenizer;

/// Outgoing transitions of a single source word.
///
/// Stores destination counts in word order and implements the
/// greedy, weighted and ranked selection primitives.
pub mod successors;

/// Accumulates word→word transition counts line by line.
///
/// The builder is the only owner of a mutable transition table;
/// finishing it yields an immutable `ChainModel`.
pub mod chain_builder;

/// Finalized transition table.
///
/// Handles file construction (chunked, parallel), merging,
/// and the walk / top-k generation operations.
pub mod chain_model;

/// Next-word selection mode for walks.
pub mod mode;

/// Parsed generation request, as produced by a driver.
pub mod request;

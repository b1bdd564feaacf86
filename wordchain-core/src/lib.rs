//! Word-level Markov chain text generation library.
//!
//! This crate provides a first-order word transition model including:
//! - Line tokenization into normalized (lowercase, `[a-z0-9_]`) words
//! - Transition counting through `ChainBuilder`
//! - Deterministic (greedy, top-k) and weighted random generation on `ChainModel`
//! - Internal utilities for I/O and path handling
//!
//! Construction and generation are split on purpose: a `ChainBuilder` owns the
//! only mutable view of the transition table, and `ChainModel` is read-only.

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;

/// Transition model, builder and generation logic.
pub mod model;

pub use error::{Error, Result};
pub use model::chain_builder::ChainBuilder;
pub use model::chain_model::ChainModel;
pub use model::mode::Mode;
pub use model::request::Request;
pub use model::successors::Successors;

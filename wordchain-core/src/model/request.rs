use rand::Rng;

use super::chain_model::ChainModel;
use super::mode::Mode;

/// Parameters of one generation, as parsed by a driver.
///
/// # Responsibilities
/// - Hold the seed word, the word count and the optional mode
/// - Dispatch to the matching `ChainModel` operation
///
/// # Behavior
/// - `mode == None` runs `generate_top_k` (the three-argument CLI form)
/// - `mode == Some(_)` runs `generate_walk` (the four-argument CLI form)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
	/// Word the generation starts from.
	pub seed: String,

	/// Number of words to produce.
	pub k: usize,

	/// Walk mode, `None` for top-k.
	pub mode: Option<Mode>,
}

impl Request {
	pub fn new(seed: &str, k: usize, mode: Option<Mode>) -> Self {
		Self { seed: seed.to_owned(), k, mode }
	}

	/// Builds a request from a signed word count.
	///
	/// A non-positive count becomes 0, which generates nothing.
	pub fn from_signed_k(seed: &str, k: i64, mode: Option<Mode>) -> Self {
		Self::new(seed, usize::try_from(k).unwrap_or(0), mode)
	}

	/// Runs the request against `model`.
	pub fn run<R: Rng + ?Sized>(&self, model: &ChainModel, rng: &mut R) -> Vec<String> {
		match self.mode {
			Some(mode) => model.generate_walk(&self.seed, self.k, mode, rng),
			None => model.generate_top_k(&self.seed, self.k),
		}
	}
}

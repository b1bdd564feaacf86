use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, trace};
use rand::Rng;

use super::chain_builder::ChainBuilder;
use super::mode::Mode;
use super::successors::Successors;
use crate::error::{Error, Result};
use crate::io::read_file;

/// First-order word transition model.
///
/// Maps each source word to the `Successors` observed right after it.
/// A `ChainModel` is produced by `ChainBuilder::finish` (or `from_file`)
/// and only offers read access afterwards.
///
/// # Responsibilities
/// - Look up the outgoing transitions of a word
/// - Generate word sequences (greedy walk, weighted walk, top-k)
/// - Merge partial models built from disjoint sets of lines
///
/// # Invariants
/// - Every source word has at least one successor
/// - Every count is >= 1
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainModel {
	transitions: HashMap<String, Successors>,
}

impl ChainModel {
	/// Builds a model from a text file.
	///
	/// # Behavior
	/// - Reads every line of the file.
	/// - Splits the lines into chunks (based on CPU cores * factor).
	/// - Builds one partial model per chunk on its own thread.
	/// - Merges all partial models.
	///
	/// Pairs never cross line boundaries, so the merged model is identical
	/// to a single sequential pass over the file.
	///
	/// # Errors
	/// - `Error::Io` if the file cannot be read.
	/// - `Error::Worker` if a building thread panicked.
	pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let lines = read_file(&filepath)?;
		let model = Self::from_lines(lines)?;
		debug!(
			"built chain from {}: {} source words, {} transitions",
			filepath.as_ref().display(),
			model.len(),
			model.transition_count()
		);
		Ok(model)
	}

	/// Builds a model from owned lines, in parallel.
	///
	/// # Errors
	/// Returns `Error::Worker` if a building thread panicked.
	pub fn from_lines(lines: Vec<String>) -> Result<Self> {
		if lines.is_empty() {
			return Ok(Self::default());
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = lines.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		let mut workers = Vec::new();
		for chunk in lines.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			workers.push(thread::spawn(move || {
				let mut builder = ChainBuilder::new();
				builder.ingest_lines(&chunk);
				// The receiver lives until every worker has been joined
				let _ = tx.send((builder.lines(), builder.finish()));
			}));
		}
		drop(tx);
		debug!("building chain from {} lines in {} chunks", lines.len(), workers.len());

		let mut final_model = Self::default();
		let mut ingested = 0;
		for (lines, partial_model) in rx.iter() {
			ingested += lines;
			final_model.merge(&partial_model);
		}

		for worker in workers {
			worker
				.join()
				.map_err(|_| Error::Worker("chain builder thread panicked".to_owned()))?;
		}
		debug!("merged {ingested} ingested lines into {} source words", final_model.len());

		Ok(final_model)
	}

	/// Records one `from → to` transition.
	pub(crate) fn add_transition(&mut self, from: &str, to: &str) {
		match self.transitions.get_mut(from) {
			Some(successors) => successors.add_transition(to),
			None => {
				let mut successors = Successors::default();
				successors.add_transition(to);
				self.transitions.insert(from.to_owned(), successors);
			}
		}
	}

	/// Merges another model into this one.
	///
	/// Occurrence counts of matching transitions are summed, missing
	/// source words are cloned.
	pub fn merge(&mut self, other: &Self) {
		for (word, successors) in &other.transitions {
			if let Some(existing) = self.transitions.get_mut(word) {
				existing.merge(successors);
			} else {
				self.transitions.insert(word.clone(), successors.clone());
			}
		}
	}

	/// Returns the outgoing transitions of `word`.
	///
	/// Returns `None` for a dead end (unknown word or no transitions).
	pub fn successors(&self, word: &str) -> Option<&Successors> {
		self.transitions.get(word).filter(|successors| !successors.is_empty())
	}

	/// Occurrence count of the `from → to` transition.
	pub fn count(&self, from: &str, to: &str) -> Option<usize> {
		self.transitions.get(from)?.count(to)
	}

	/// Number of source words.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Total number of recorded word pairs.
	pub fn transition_count(&self) -> usize {
		self.transitions.values().map(Successors::total).sum()
	}

	/// Source words, sorted.
	pub fn source_words(&self) -> impl Iterator<Item = &str> {
		let mut words: Vec<&str> = self.transitions.keys().map(String::as_str).collect();
		words.sort_unstable();
		words.into_iter()
	}

	/// Generates `k` words starting from `seed`.
	///
	/// # Behavior
	/// - The first word is always `seed`, known or not.
	/// - Each next word is chosen from the successors of the current one
	///   according to `mode`; `rng` is only drawn from in `Mode::Weighted`.
	/// - On a dead end the walk restarts: `seed` is emitted again and
	///   becomes the current word.
	/// - If no word can be selected (`Mode::Unrecognized`, or rounding in
	///   weighted mode) the current word is repeated.
	///
	/// Returns an empty sequence when `k == 0`.
	pub fn generate_walk<R: Rng + ?Sized>(&self, seed: &str, k: usize, mode: Mode, rng: &mut R) -> Vec<String> {
		self.walk(seed, k, |successors| match mode {
			Mode::Greedy => successors.most_frequent(),
			Mode::Weighted => successors.sample(rng),
			Mode::Unrecognized => None,
		})
	}

	/// Greedy walk: same as `generate_walk` with `Mode::Greedy`, without
	/// needing a random source.
	pub fn generate_greedy(&self, seed: &str, k: usize) -> Vec<String> {
		self.walk(seed, k, Successors::most_frequent)
	}

	/// Returns the most frequent successors of `seed`.
	///
	/// # Behavior
	/// - Destinations are sorted by descending count, then ascending word.
	/// - At most `k` words are returned; the result is not padded.
	/// - Only looks one hop ahead.
	/// - If `seed` is a dead end, returns `k` copies of `seed`.
	pub fn generate_top_k(&self, seed: &str, k: usize) -> Vec<String> {
		match self.successors(seed) {
			Some(successors) => successors
				.ranked()
				.into_iter()
				.take(k)
				.map(|(word, _)| word.to_owned())
				.collect(),
			None => vec![seed.to_owned(); k],
		}
	}

	fn walk<'a, F>(&'a self, seed: &str, k: usize, mut next_word: F) -> Vec<String>
	where
		F: FnMut(&'a Successors) -> Option<&'a str>,
	{
		let mut words = Vec::with_capacity(k);
		if k == 0 {
			return words;
		}

		words.push(seed.to_owned());
		let mut current = seed.to_owned();
		for _ in 1..k {
			current = match self.successors(&current) {
				Some(successors) => match next_word(successors) {
					Some(word) => word.to_owned(),
					None => current,
				},
				None => {
					trace!("dead end on '{current}', restarting from '{seed}'");
					seed.to_owned()
				}
			};
			words.push(current.clone());
		}
		words
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	const SAMPLE: &str = "the cat sat on the mat. the cat is a bat";

	fn sample_model() -> ChainModel {
		let mut builder = ChainBuilder::new();
		builder.ingest(SAMPLE);
		builder.finish()
	}

	#[test]
	fn walk_length_is_exactly_k() {
		let model = sample_model();
		let mut rng = StdRng::seed_from_u64(3);
		for mode in [Mode::Greedy, Mode::Weighted, Mode::Unrecognized] {
			for k in 0..40 {
				let words = model.generate_walk("the", k, mode, &mut rng);
				assert_eq!(words.len(), k);
				if k > 0 {
					assert_eq!(words[0], "the");
				}
			}
		}
	}

	#[test]
	fn zero_and_one_word_walks() {
		let model = sample_model();
		let mut rng = StdRng::seed_from_u64(3);
		assert!(model.generate_walk("the", 0, Mode::Weighted, &mut rng).is_empty());
		assert_eq!(model.generate_walk("the", 1, Mode::Weighted, &mut rng), vec!["the"]);
		assert_eq!(ChainModel::default().generate_greedy("anything", 1), vec!["anything"]);
	}

	#[test]
	fn unknown_seed_repeats() {
		let model = sample_model();
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(model.generate_walk("dog", 3, Mode::Weighted, &mut rng), vec!["dog", "dog", "dog"]);
		assert_eq!(model.generate_greedy("dog", 2), vec!["dog", "dog"]);
	}

	#[test]
	fn greedy_walk_restarts_on_dead_end() {
		let model = sample_model();
		// the -(2)-> cat, cat -> {is, sat} tie -> is, is -> a -> bat, bat is a dead end
		assert_eq!(
			model.generate_greedy("the", 7),
			vec!["the", "cat", "is", "a", "bat", "the", "cat"]
		);
	}

	#[test]
	fn greedy_helper_matches_greedy_mode() {
		let model = sample_model();
		let mut rng = StdRng::seed_from_u64(11);
		assert_eq!(
			model.generate_greedy("on", 12),
			model.generate_walk("on", 12, Mode::Greedy, &mut rng)
		);
	}

	#[test]
	fn unrecognized_mode_makes_no_progress() {
		let model = sample_model();
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(
			model.generate_walk("the", 4, Mode::Unrecognized, &mut rng),
			vec!["the", "the", "the", "the"]
		);
	}

	#[test]
	fn weighted_walk_follows_recorded_transitions() {
		let model = sample_model();
		let mut rng = StdRng::seed_from_u64(99);
		let words = model.generate_walk("the", 100, Mode::Weighted, &mut rng);
		assert_eq!(words.len(), 100);
		for pair in words.windows(2) {
			let recorded = model.count(&pair[0], &pair[1]).is_some();
			let restarted = model.successors(&pair[0]).is_none() && pair[1] == "the";
			assert!(recorded || restarted, "unexpected step {} -> {}", pair[0], pair[1]);
		}
	}

	#[test]
	fn weighted_walk_is_reproducible_with_a_seeded_rng() {
		let model = sample_model();
		let first = model.generate_walk("the", 50, Mode::Weighted, &mut StdRng::seed_from_u64(5));
		let second = model.generate_walk("the", 50, Mode::Weighted, &mut StdRng::seed_from_u64(5));
		assert_eq!(first, second);
	}

	#[test]
	fn top_k_is_not_padded() {
		let model = sample_model();
		assert_eq!(model.generate_top_k("the", 3), vec!["cat", "mat"]);
		assert_eq!(model.generate_top_k("the", 1), vec!["cat"]);
		assert_eq!(model.generate_top_k("cat", 5), vec!["is", "sat"]);
		assert!(model.generate_top_k("the", 0).is_empty());
	}

	#[test]
	fn top_k_of_dead_end_repeats_seed() {
		let model = sample_model();
		assert_eq!(model.generate_top_k("bat", 3), vec!["bat", "bat", "bat"]);
		assert_eq!(model.generate_top_k("dog", 2), vec!["dog", "dog"]);
	}

	#[test]
	fn generation_is_deterministic() {
		let model = sample_model();
		assert_eq!(model.generate_greedy("the", 20), model.generate_greedy("the", 20));
		assert_eq!(model.generate_top_k("the", 4), model.generate_top_k("the", 4));
	}

	#[test]
	fn statistics() {
		let model = sample_model();
		// "bat" closes the line, it has no successors
		assert_eq!(model.len(), 7);
		assert_eq!(model.transition_count(), 10);
		assert_eq!(
			model.source_words().collect::<Vec<_>>(),
			vec!["a", "cat", "is", "mat", "on", "sat", "the"]
		);
	}

	#[test]
	fn merge_sums_partial_models() {
		let mut left = ChainBuilder::new();
		left.ingest("the cat sat on the mat.");
		let mut right = ChainBuilder::new();
		right.ingest("the cat is a bat");

		let mut merged = left.finish();
		merged.merge(&right.finish());

		let mut whole = ChainBuilder::new();
		whole.ingest("the cat sat on the mat.");
		whole.ingest("the cat is a bat");
		assert_eq!(merged, whole.finish());
	}

	#[test]
	fn from_lines_matches_sequential_ingestion() {
		let lines: Vec<String> = (0..1_000)
			.map(|i| format!("w{} w{} w{} w{}", i % 7, i % 11, i % 13, i % 5))
			.collect();

		let mut builder = ChainBuilder::new();
		builder.ingest_lines(&lines);
		let sequential = builder.finish();

		assert_eq!(ChainModel::from_lines(lines).unwrap(), sequential);
	}

	#[test]
	fn from_lines_of_nothing_is_empty() {
		assert!(ChainModel::from_lines(Vec::new()).unwrap().is_empty());
	}
}

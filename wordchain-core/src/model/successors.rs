use std::collections::BTreeMap;

use rand::Rng;

/// Outgoing transitions of one source word.
///
/// A `Successors` is a node of the Markov chain: every destination word
/// observed right after the source word, weighted by how many times the
/// pair was seen.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during construction
/// - Select the next word greedily, by weighted sampling, or by rank
/// - Merge with the successors of the same word from a partial model
///
/// ## Invariants
/// - Each occurrence count is strictly positive
/// - `total` is the sum of all counts
/// - Destinations are enumerated in ascending word order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Successors {
	/// Occurrences indexed by destination word.
	/// Example: { "cat" => 2, "mat" => 1 }
	counts: BTreeMap<String, usize>,
	total: usize,
}

impl Successors {
	/// Records one occurrence of a transition toward `next_word`.
	pub(crate) fn add_transition(&mut self, next_word: &str) {
		match self.counts.get_mut(next_word) {
			Some(count) => *count += 1,
			None => {
				self.counts.insert(next_word.to_owned(), 1);
			}
		}
		self.total += 1;
	}

	/// Adds the occurrences of `other` to this one.
	pub(crate) fn merge(&mut self, other: &Self) {
		for (word, count) in &other.counts {
			*self.counts.entry(word.clone()).or_insert(0) += count;
		}
		self.total += other.total;
	}

	/// Number of distinct destinations.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Sum of all occurrence counts.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Occurrence count of `word`, if it was ever observed.
	pub fn count(&self, word: &str) -> Option<usize> {
		self.counts.get(word).copied()
	}

	/// Iterates over `(destination, count)` in ascending word order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(word, count)| (word.as_str(), *count))
	}

	/// Iterates over `(destination, count / total)` in ascending word order.
	pub fn probabilities(&self) -> impl Iterator<Item = (&str, f64)> {
		let total = self.total as f64;
		self.iter().map(move |(word, count)| (word, count as f64 / total))
	}

	/// Returns the destination with the highest count.
	///
	/// Ties are broken by the lexicographically smallest word.
	/// Returns `None` if there are no transitions.
	pub fn most_frequent(&self) -> Option<&str> {
		let mut best: Option<(&str, usize)> = None;
		for (word, count) in self.iter() {
			match best {
				Some((_, best_count)) if best_count >= count => {}
				_ => best = Some((word, count)),
			}
		}
		best.map(|(word, _)| word)
	}

	/// Picks a destination with probability proportional to its count.
	///
	/// Draws `u` in `[0, 1)` and returns the first destination (in word
	/// order) whose cumulative probability reaches `u`.
	///
	/// Returns `None` if there are no transitions, or if rounding left the
	/// cumulative sum below the draw.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.total == 0 {
			return None;
		}

		let draw: f64 = rng.random();
		let mut cumulative = 0.0;
		for (word, probability) in self.probabilities() {
			cumulative += probability;
			if draw <= cumulative {
				return Some(word);
			}
		}

		None
	}

	/// Returns all destinations sorted by descending count, then ascending word.
	pub fn ranked(&self) -> Vec<(&str, usize)> {
		let mut ranked: Vec<(&str, usize)> = self.iter().collect();
		// Already in word order, a stable sort on count keeps it for ties
		ranked.sort_by(|a, b| b.1.cmp(&a.1));
		ranked
	}
}

use std::io::BufRead;

use super::chain_model::ChainModel;
use super::tokenizer;
use crate::error::Result;

/// Accumulates word transition counts from lines of text.
///
/// # Responsibilities
/// - Tokenize each line into normalized words
/// - Count every consecutive `(previous, current)` pair of a line
/// - Hand over an immutable `ChainModel` once construction is done
///
/// # Notes
/// - Lines are independent: the last word of a line is never paired with
///   the first word of the next one.
/// - Counts only grow; nothing is ever removed.
#[derive(Debug, Default)]
pub struct ChainBuilder {
	model: ChainModel,
	lines: usize,
}

impl ChainBuilder {
	/// Creates a builder with an empty transition table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds one line of text to the model.
	///
	/// Malformed tokens are skipped and an empty line changes nothing.
	pub fn ingest(&mut self, line: &str) {
		let words = tokenizer::words(line);
		for pair in words.windows(2) {
			self.model.add_transition(&pair[0], &pair[1]);
		}
		self.lines += 1;
	}

	/// Adds every line of `lines`, in order.
	pub fn ingest_lines<I>(&mut self, lines: I)
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		for line in lines {
			self.ingest(line.as_ref());
		}
	}

	/// Pulls lines from `reader` until it is exhausted.
	///
	/// # Errors
	/// Returns `Error::Io` on the first read failure; lines read before
	/// the failure stay counted.
	pub fn ingest_reader<B: BufRead>(&mut self, reader: B) -> Result<()> {
		for line in reader.lines() {
			self.ingest(&line?);
		}
		Ok(())
	}

	/// Number of lines ingested so far.
	pub fn lines(&self) -> usize {
		self.lines
	}

	/// Finalizes construction.
	pub fn finish(self) -> ChainModel {
		self.model
	}
}

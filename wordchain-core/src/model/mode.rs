use std::fmt;

/// Strategy used to pick the next word during a walk.
///
/// # Variants
/// - `Greedy`: most frequent destination, ties broken by the smallest word
///   (label `"one"`).
/// - `Weighted`: random destination, probability proportional to its count
///   (label `"all"`).
/// - `Unrecognized`: any other label. The walk makes no progress: each step
///   repeats the current word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
	Greedy,
	Weighted,
	Unrecognized,
}

impl Mode {
	/// Maps a driver label to a mode. Matching is exact.
	pub fn from_label(label: &str) -> Self {
		match label {
			"one" => Mode::Greedy,
			"all" => Mode::Weighted,
			_ => Mode::Unrecognized,
		}
	}

	/// Returns the driver label, `None` for `Unrecognized`.
	pub fn label(&self) -> Option<&'static str> {
		match self {
			Mode::Greedy => Some("one"),
			Mode::Weighted => Some("all"),
			Mode::Unrecognized => None,
		}
	}
}

impl From<&str> for Mode {
	fn from(label: &str) -> Self {
		Mode::from_label(label)
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label().unwrap_or("unrecognized"))
	}
}

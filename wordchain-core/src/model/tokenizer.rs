/// Returns `true` for characters allowed inside a word (`[a-zA-Z0-9_]`).
pub fn is_word_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

/// Returns `true` for token separators: space, `\t`, `\n`, `\x0B`, `\x0C`, `\r`.
///
/// Other Unicode whitespace (no-break space, em space, ...) stays inside the
/// token and ends its word instead.
pub fn is_separator(c: char) -> bool {
	matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Truncates a token to its leading word run.
///
/// Returns `None` when the token does not start with a word character
/// (`"!!!"`, `"...so"`), otherwise the run up to the first character
/// outside `[a-zA-Z0-9_]` (`"mat."` → `"mat"`, `"ca't"` → `"ca"`).
pub fn leading_word(token: &str) -> Option<&str> {
	let end = token.find(|c: char| !is_word_char(c)).unwrap_or(token.len());
	let word = &token[..end];
	(!word.is_empty()).then_some(word)
}

/// Splits a line into its ordered list of normalized words.
///
/// # Behavior
/// - Lower-cases the whole line first
/// - Splits on runs of ASCII whitespace (see `is_separator`)
/// - Keeps the leading word run of each token, drops tokens where it is empty
///
/// Never fails: malformed tokens are silently skipped.
pub fn words(line: &str) -> Vec<String> {
	line.to_lowercase()
		.split(is_separator)
		.filter_map(leading_word)
		.map(str::to_owned)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_and_lowercases() {
		assert_eq!(words("The CAT  sat\ton"), vec!["the", "cat", "sat", "on"]);
	}

	#[test]
	fn truncates_at_first_non_word_char() {
		assert_eq!(
			words("the cat_sat on the! mat. the ca't is a bat"),
			vec!["the", "cat_sat", "on", "the", "mat", "the", "ca", "is", "a", "bat"]
		);
	}

	#[test]
	fn punctuation_only_tokens_are_dropped() {
		assert_eq!(words("!!! hello ... ?world 42x"), vec!["hello", "42x"]);
	}

	#[test]
	fn empty_and_blank_lines_have_no_words() {
		assert!(words("").is_empty());
		assert!(words("   \t ").is_empty());
	}

	#[test]
	fn only_ascii_whitespace_separates_tokens() {
		assert_eq!(words("foo\u{00A0}bar baz"), vec!["foo", "baz"]);
		assert_eq!(words("one\u{2003}two three"), vec!["one", "three"]);
		assert_eq!(words("a\x0Bb\x0Cc\r\nd"), vec!["a", "b", "c", "d"]);
	}

	#[test]
	fn non_ascii_letters_end_a_word() {
		assert_eq!(leading_word("café"), Some("caf"));
		assert_eq!(leading_word("éte"), None);
	}
}

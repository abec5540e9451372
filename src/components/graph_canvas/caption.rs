//! Fitting node captions inside their circles.

/// Appended to every shortened caption.
pub const ELLIPSIS: &str = "...";

/// Shortens `text` so that it measures at most `max_width`.
///
/// A caption that already fits comes back unchanged. Otherwise the result is
/// a prefix of `text` followed by [`ELLIPSIS`]: preferably cut at a word
/// boundary, else the longest character prefix that fits. Every candidate is
/// re-measured with `measure`, so proportional fonts are handled exactly. If
/// not even the bare ellipsis fits, the result is empty.
pub fn fit_caption(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> String {
	if measure(text) <= max_width {
		return text.to_string();
	}

	let fits = |prefix: &str| measure(&format!("{prefix}{ELLIPSIS}")) <= max_width;

	// Word boundaries, longest prefix first.
	let word_breaks = text
		.char_indices()
		.filter(|(_, c)| c.is_whitespace())
		.map(|(i, _)| text[..i].trim_end())
		.filter(|prefix| !prefix.is_empty())
		.collect::<Vec<_>>();
	if let Some(prefix) = word_breaks.into_iter().rev().find(|p| fits(p)) {
		return format!("{prefix}{ELLIPSIS}");
	}

	let mut prefix = text.trim_end();
	while let Some((cut, _)) = prefix.char_indices().next_back() {
		prefix = prefix[..cut].trim_end();
		if fits(prefix) {
			return format!("{prefix}{ELLIPSIS}");
		}
	}

	String::new()
}

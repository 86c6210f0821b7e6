use once_cell::sync::Lazy;
use regex::Regex;

/// Numbered-clause marker: digits followed by one or more ".digits" groups,
/// with any trailing whitespace (e.g. `1.2.1 `).
static CLAUSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)+\s*").expect("clause regex"));

/// Split raw section texts into numbered sub-clauses.
///
/// A zero-width cut is made immediately before every clause marker, anywhere
/// in the text. Fragments are trimmed and blank fragments discarded; a text
/// with no markers yields itself, trimmed.
pub fn split_paragraphs<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for text in texts {
        let text = text.as_ref();
        let mut cuts: Vec<usize> = vec![0];
        cuts.extend(
            CLAUSE_RE
                .find_iter(text)
                .map(|m| m.start())
                .filter(|&s| s != 0),
        );
        cuts.push(text.len());
        for pair in cuts.windows(2) {
            let fragment = text[pair[0]..pair[1]].trim();
            if !fragment.is_empty() {
                result.push(fragment.to_string());
            }
        }
    }
    result
}

//! Question normalization and word matching

use std::collections::HashSet;

use ahash::RandomState;

/// Words longer than this many chars make up the keyword key
pub const KEYWORD_MIN_CHARS: usize = 3;

/// Words longer than this many chars are significant for fuzzy matching
pub const SIGNIFICANT_MIN_CHARS: usize = 4;

/// Lowercase `text` and drop everything except word characters and whitespace
///
/// Word characters are alphanumerics (any script) and `_`. Whitespace is kept
/// as-is, so runs of spaces survive.
///
/// This is wider than an ASCII-only `\w` class: "président" stays intact
/// instead of becoming "prsident". Blobs keyed with ASCII-only normalization
/// therefore miss accented questions on the exact path; unaccented words
/// still match them on the fuzzy path.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

fn longer_than(min_chars: usize) -> impl Fn(&&str) -> bool {
    move |word: &&str| word.chars().count() > min_chars
}

/// Space-joined words of a normalized question longer than [`KEYWORD_MIN_CHARS`]
///
/// Empty when every word is short.
pub fn keyword_key(normalized: &str) -> String {
    normalized
        .split_whitespace()
        .filter(longer_than(KEYWORD_MIN_CHARS))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Words of a normalized question longer than [`SIGNIFICANT_MIN_CHARS`]
///
/// Repeated words are kept; each occurrence counts toward the match ratio.
pub fn significant_words(normalized: &str) -> Vec<&str> {
    normalized
        .split_whitespace()
        .filter(longer_than(SIGNIFICANT_MIN_CHARS))
        .collect()
}

/// Count the query words that appear among the words of `key`
pub fn matched_words(query: &[&str], key: &str) -> usize {
    let key_words: HashSet<&str, RandomState> = key.split_whitespace().collect();
    query.iter().filter(|word| key_words.contains(*word)).count()
}

/// Fraction of `query` words found in `key`, or 0 for an empty query
pub fn match_ratio(query: &[&str], key: &str) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    matched_words(query, key) as f64 / query.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Qui est Maurice Kamto?"), "qui est maurice kamto");
        assert_eq!(normalize("L'adhésion, c'est comment ?!"), "ladhésion cest comment ");
        assert_eq!(normalize("snake_case  DOUBLE"), "snake_case  double");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!..."), "");
    }

    #[test]
    fn test_normalize_keeps_accented_letters() {
        assert_eq!(normalize("Qui est le Président ?"), "qui est le président ");
        assert_ne!(normalize("président"), "prsident");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "Qui est Maurice Kamto?",
            "PRÉSIDENT du MRC — élections 2025!!",
            "  tabs\tand\nnewlines  ",
            "İstanbul ΣΊΣΥΦΟΣ straße",
            "emoji 🙂 and ½ fractions",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_keyword_key() {
        assert_eq!(keyword_key("qui est maurice kamto"), "maurice kamto");
        assert_eq!(keyword_key("  comment  adhérer au parti "), "comment adhérer parti");
        assert_eq!(keyword_key("qui est ton nom"), "");
    }

    #[test]
    fn test_keyword_length_counts_chars() {
        // "été" is three chars even though it is five bytes
        assert_eq!(keyword_key("été"), "");
        assert_eq!(keyword_key("étés"), "étés");
    }

    #[test]
    fn test_significant_words() {
        assert_eq!(significant_words("qui est maurice kamto"), vec!["maurice", "kamto"]);
        assert_eq!(significant_words("kamto kamto mrc"), vec!["kamto", "kamto"]);
        assert!(significant_words("qui est le chef").is_empty());
    }

    #[test]
    fn test_match_ratio() {
        let key = "politique kamto president";

        assert_eq!(match_ratio(&["politique", "kamto"], key), 1.0);
        let partial = match_ratio(&["politique", "economie", "agriculture"], key);
        assert!((partial - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(match_ratio(&[], key), 0.0);
        assert_eq!(matched_words(&["kamto", "kamto"], key), 2);
    }

    #[test]
    fn test_match_is_whole_word() {
        assert_eq!(matched_words(&["kamto"], "kamtoville politique"), 0);
    }
}

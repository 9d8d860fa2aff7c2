//! Word tokenization.
//!
//! Text is lower-cased and split on every character that is neither
//! alphanumeric nor `_`. Tokens shorter than two characters and stop words
//! are dropped.

use crate::stopwords::StopWords;

const MIN_TOKEN_CHARS: usize = 2;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize one document
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|t| !stop_words.contains(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        let tokens = tokenize("Space-War: ROBOTS, robots!", &StopWords::none());
        assert_eq!(tokens, vec!["space", "war", "robots", "robots"]);
    }

    #[test]
    fn test_drops_short_tokens_and_stop_words() {
        let tokens = tokenize("A man and his dog in New_York", &StopWords::english());
        assert_eq!(tokens, vec!["man", "dog", "new_york"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(tokenize("", &StopWords::english()).is_empty());
        assert!(tokenize("  ...  ", &StopWords::english()).is_empty());
    }
}

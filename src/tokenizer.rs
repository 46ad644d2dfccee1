/// Characters that separate words within a line.
pub const DELIMITERS: [char; 8] = [' ', ',', '.', ':', '"', '\'', '!', '?'];

/// Split `line` into word tokens on punctuation. Tokens are neither trimmed
/// nor case-folded, and adjacent delimiters yield empty tokens.
pub fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(&DELIMITERS[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_punctuation() {
        let words: Vec<&str> = tokens("Hei, maailma! Mitä \"kuuluu\"?").collect();
        assert_eq!(
            words,
            vec!["Hei", "", "maailma", "", "Mitä", "", "kuuluu", "", ""]
        );
    }

    #[test]
    fn test_keeps_hyphenated_words() {
        let words: Vec<&str> = tokens("helluntai-maanantaina on joukko-").collect();
        assert_eq!(words, vec!["helluntai-maanantaina", "on", "joukko-"]);
    }

    #[test]
    fn test_does_not_trim_other_whitespace() {
        let words: Vec<&str> = tokens("tab\there;semi").collect();
        assert_eq!(words, vec!["tab\there;semi"]);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(tokens("").collect::<Vec<_>>(), vec![""]);
    }
}

//! String to character-code conversion, for writing text literals.

/// Character codes of `text`, one per Unicode scalar value.
pub fn encode_text(text: &str) -> Vec<i64> {
    text.chars().map(|c| c as i64).collect()
}

/// Character codes of `text`, joined by single spaces, ready to paste
/// after an array-literal prefix.
pub fn encode_line(text: &str) -> String {
    encode_text(text)
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii() {
        assert_eq!(encode_text("hi"), vec![104, 105]);
        assert_eq!(encode_line("hi!"), "104 105 33");
    }

    #[test]
    fn empty() {
        assert!(encode_text("").is_empty());
        assert_eq!(encode_line(""), "");
    }

    #[test]
    fn non_ascii() {
        assert_eq!(encode_text("é€"), vec![233, 8364]);
    }
}

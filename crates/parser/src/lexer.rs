//! Tokenizer for NumScript source lines.

use crate::error::ParseError;

/// Tokenize a single line of source text.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` and extend to end of line.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<i64>, ParseError> {
    // Strip comment
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    line.split_whitespace()
        .map(|word| {
            word.parse::<i64>().map_err(|_| ParseError::InvalidToken {
                line: line_num,
                token: word.to_string(),
            })
        })
        .collect()
}

//! NumScript tokenizer — source text to integer statements.
//!
//! The tokenizer is a mechanical line-by-line translation. Every line,
//! blank or not, becomes one [`Statement`] so program counters and line
//! numbers stay aligned.
//!
//! # Usage
//!
//! ```
//! use numscript_parser::parse;
//!
//! let script = parse("0 0 0 42 ; declare\n\n8 2 0\n").unwrap();
//! assert_eq!(script.len(), 3);
//! assert_eq!(script.statements[0].tokens, vec![0, 0, 0, 42]);
//! assert!(script.statements[1].is_empty());
//! assert_eq!(script.statements[2].line_number, 3);
//! ```

pub mod encode;
pub mod error;

mod lexer;

pub use encode::{encode_line, encode_text};
pub use error::ParseError;

use lexer::tokenize_line;
use numscript_common::{Script, Statement};
use tracing::debug;

/// Tokenize source text into a script.
///
/// Returns the first error encountered.
pub fn parse(text: &str) -> Result<Script, ParseError> {
    let statements = text
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let line_num = idx + 1;
            tokenize_line(line, line_num).map(|tokens| Statement::new(line_num, tokens))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(statements = statements.len(), "parsed script");
    Ok(Script::new(statements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_minimal() {
        let script = parse("5 0 3\n").unwrap();
        assert_eq!(script.len(), 1);
        assert_eq!(script.statements[0], Statement::new(1, vec![5, 0, 3]));
    }

    #[test]
    fn blank_lines_are_kept() {
        let script = parse("\n6\n\n").unwrap();
        assert_eq!(script.len(), 3);
        assert!(script.statements[0].is_empty());
        assert_eq!(script.statements[1].tokens, vec![6]);
        assert!(script.statements[2].is_empty());
    }

    #[test]
    fn crlf_line_endings() {
        let script = parse("8 0 1\r\n8 0 2\r\n").unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.statements[1].tokens, vec![8, 0, 2]);
    }

    #[test]
    fn empty_text() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn error_reports_correct_line() {
        let err = parse("6\n6\n8 0 x\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidToken {
                line: 3,
                token: "x".to_string()
            }
        );
    }

    proptest! {
        /// Space-joined integer rows tokenize back to the same rows, with
        /// line numbers counting from 1.
        #[test]
        fn rows_survive_tokenizing(
            rows in prop::collection::vec(prop::collection::vec(any::<i64>(), 0..6), 0..12)
        ) {
            let text: String = rows
                .iter()
                .map(|row| {
                    let words: Vec<String> = row.iter().map(i64::to_string).collect();
                    format!("{}\n", words.join(" "))
                })
                .collect();
            let script = parse(&text).unwrap();
            prop_assert_eq!(script.len(), rows.len());
            for (idx, (stmt, row)) in script.statements.iter().zip(&rows).enumerate() {
                prop_assert_eq!(stmt.line_number, idx + 1);
                prop_assert_eq!(&stmt.tokens, row);
            }
        }
    }
}

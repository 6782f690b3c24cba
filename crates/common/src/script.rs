//! Script representation: an ordered, immutable list of integer statements.

/// One decoded line of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// 1-based source line, kept for diagnostics.
    pub line_number: usize,
    /// Opcode, variant selector and operands, in source order. May be empty.
    pub tokens: Vec<i64>,
}

impl Statement {
    pub fn new(line_number: usize, tokens: Vec<i64>) -> Self {
        Self {
            line_number,
            tokens,
        }
    }

    /// Token at `index`, if present.
    pub fn get(&self, index: usize) -> Option<i64> {
        self.tokens.get(index).copied()
    }

    /// Tokens from `index` onwards (empty if out of range).
    pub fn get_from(&self, index: usize) -> &[i64] {
        self.tokens.get(index..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Blank lines produce empty statements; the VM skips them.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A NumScript program, addressed by program counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    /// The statement stream.
    pub statements: Vec<Statement>,
}

impl Script {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Build a script from bare token rows, numbering lines from 1.
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Vec<i64>>,
    {
        let statements = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| Statement::new(idx + 1, row.into()))
            .collect();
        Self { statements }
    }

    /// Statement at program counter `pc`.
    pub fn get(&self, pc: usize) -> Option<&Statement> {
        self.statements.get(pc)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_accessors() {
        let stmt = Statement::new(3, vec![0, 1, 2, 5, 6]);
        assert_eq!(stmt.get(0), Some(0));
        assert_eq!(stmt.get(9), None);
        assert_eq!(stmt.get_from(3), &[5, 6]);
        assert_eq!(stmt.get_from(5), &[] as &[i64]);
        assert_eq!(stmt.get_from(12), &[] as &[i64]);
        assert_eq!(stmt.len(), 5);
        assert!(!stmt.is_empty());
    }

    #[test]
    fn empty_statement() {
        let stmt = Statement::new(1, vec![]);
        assert!(stmt.is_empty());
        assert_eq!(stmt.get(0), None);
    }

    #[test]
    fn from_rows_numbers_lines() {
        let script = Script::from_rows([vec![6], vec![], vec![5, 0, 1]]);
        assert_eq!(script.len(), 3);
        assert_eq!(script.get(0).map(|s| s.line_number), Some(1));
        assert_eq!(script.get(2).map(|s| s.line_number), Some(3));
        assert!(script.get(1).is_some_and(Statement::is_empty));
        assert!(script.get(3).is_none());
    }

    #[test]
    fn default_is_empty() {
        assert!(Script::default().is_empty());
    }
}

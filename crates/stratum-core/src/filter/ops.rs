//! Comparison and boolean operators.

use std::fmt;

/// Operator comparing a column against a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
}

impl CompareOp {
    /// Returns the SQL text of the operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Operator joining the children of a boolean group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl BoolOp {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_op_sql() {
        let all = [
            (CompareOp::Eq, "="),
            (CompareOp::Ne, "<>"),
            (CompareOp::Gt, ">"),
            (CompareOp::Ge, ">="),
            (CompareOp::Lt, "<"),
            (CompareOp::Le, "<="),
            (CompareOp::Like, "LIKE"),
            (CompareOp::NotLike, "NOT LIKE"),
        ];
        for (op, sql) in all {
            assert_eq!(op.to_string(), sql);
        }
    }

    #[test]
    fn test_bool_op_sql() {
        assert_eq!(BoolOp::And.to_string(), "AND");
        assert_eq!(BoolOp::Or.to_string(), "OR");
    }
}

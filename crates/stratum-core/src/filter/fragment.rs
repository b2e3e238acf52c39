//! Rendered WHERE text and its parameters.

use crate::builder::ALWAYS_TRUE;
use crate::value::SqlValue;

/// Output of rendering a [`Where`](super::Where) tree.
///
/// `sql` holds exactly `params.len()` placeholders, and the Nth placeholder
/// from the left is bound to `params[N]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereFragment {
    /// Condition text, without the `WHERE` keyword.
    pub sql: String,
    /// Values for the placeholders in `sql`, in order.
    pub params: Vec<SqlValue>,
}

impl WhereFragment {
    /// Creates a fragment.
    #[must_use]
    pub const fn new(sql: String, params: Vec<SqlValue>) -> Self {
        Self { sql, params }
    }

    /// The identity fragment.
    #[must_use]
    pub fn always_true() -> Self {
        Self::new(String::from(ALWAYS_TRUE), Vec::new())
    }

    /// Splits the fragment into its text and parameters.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}

//! SQL Dialect support.
//!
//! Different databases quote identifiers and terminate statements slightly
//! differently. This module provides a trait for that lexical layer; the
//! statement templates built on top of it live in [`crate::builder`].

/// Trait for SQL dialect-specific lexical behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the parameter placeholder style.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Returns the text appended to every top-level statement.
    fn statement_terminator(&self) -> &'static str {
        ";"
    }

    /// Returns the text placed between the clauses of a top-level statement.
    fn clause_separator(&self) -> &'static str {
        "\n"
    }

    /// Quotes an identifier, doubling any embedded quote character.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(quote);
        for c in name.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        quoted
    }

    /// Quotes a column list and joins it with `, `.
    ///
    /// A list consisting of the single wildcard `*` is emitted bare.
    fn quote_column_list(&self, columns: &[&str]) -> String {
        if matches!(columns, ["*"]) {
            return String::from("*");
        }
        columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

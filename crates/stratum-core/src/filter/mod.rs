//! Composable WHERE expressions.
//!
//! A [`Where`] tree is built per call, rendered once against a
//! [`QueryBuilder`], then discarded. Rendering never embeds a value: each
//! value becomes a placeholder in the text and an entry in the fragment's
//! parameter list, in the same left-to-right order.
//!
//! ```rust
//! use stratum_core::filter::Where;
//!
//! let filter = Where::eq("status", "active")
//!     .and(Where::gt("age", 18))
//!     .and(Where::is_null("deleted_at"));
//! # let _ = filter;
//! ```

mod fragment;
mod ops;

pub use fragment::WhereFragment;
pub use ops::{BoolOp, CompareOp};

use crate::builder::{QueryBuilder, SelectOptions};
use crate::error::{Error, Result};
use crate::validate;
use crate::value::{SqlValue, ToSqlValue};

/// A WHERE condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Where {
    /// `column op value`.
    Comparison {
        /// Column to compare.
        column: String,
        /// Comparison operator.
        op: CompareOp,
        /// Value bound to the placeholder.
        value: SqlValue,
    },
    /// Children joined by `AND` or `OR`.
    Group(BoolGroup),
    /// `column IN (values...)`.
    InSet {
        /// Column to test.
        column: String,
        /// Candidate values. Never empty once rendered.
        values: Vec<SqlValue>,
    },
    /// `column op (SELECT inner_column FROM table WHERE filter)`.
    InnerSelect {
        /// Outer column.
        column: String,
        /// Operator between the outer column and the subquery.
        op: CompareOp,
        /// Table of the subquery.
        table: String,
        /// Column selected by the subquery.
        inner_column: String,
        /// Filter of the subquery.
        filter: Box<Where>,
    },
    /// Matches every row.
    #[default]
    True,
}

/// A non-empty list of conditions joined by one boolean operator.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolGroup {
    op: BoolOp,
    children: Vec<Where>,
}

impl BoolGroup {
    /// Creates a group, rejecting an empty child list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `children` is empty.
    pub fn new(op: BoolOp, children: Vec<Where>) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::invalid_argument(
                "children",
                "a boolean group needs at least one condition",
            ));
        }
        Ok(Self { op, children })
    }

    /// The joining operator.
    #[must_use]
    pub const fn op(&self) -> BoolOp {
        self.op
    }

    /// The conditions, in render order.
    #[must_use]
    pub fn children(&self) -> &[Where] {
        &self.children
    }

    fn render<B: QueryBuilder + ?Sized>(&self, builder: &B) -> Result<WhereFragment> {
        let separator = format!(" {} ", self.op);
        let mut parts = Vec::with_capacity(self.children.len());
        let mut params = Vec::new();
        for child in &self.children {
            let (sql, child_params) = child.render(builder)?.into_parts();
            parts.push(sql);
            params.extend(child_params);
        }
        Ok(WhereFragment::new(
            builder.wrap(&parts.join(&separator)),
            params,
        ))
    }
}

impl Where {
    /// Generic comparison constructor.
    #[must_use]
    pub fn compare(column: impl Into<String>, op: CompareOp, value: impl ToSqlValue) -> Self {
        Self::Comparison {
            column: column.into(),
            op,
            value: value.to_sql_value(),
        }
    }

    /// `column = value`
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    /// `column <> value`
    #[must_use]
    pub fn ne(column: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::compare(column, CompareOp::Ne, value)
    }

    /// `column > value`
    #[must_use]
    pub fn gt(column: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::compare(column, CompareOp::Gt, value)
    }

    /// `column >= value`
    #[must_use]
    pub fn ge(column: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::compare(column, CompareOp::Ge, value)
    }

    /// `column < value`
    #[must_use]
    pub fn lt(column: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::compare(column, CompareOp::Lt, value)
    }

    /// `column <= value`
    #[must_use]
    pub fn le(column: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::compare(column, CompareOp::Le, value)
    }

    /// `column LIKE pattern`
    #[must_use]
    pub fn like(column: impl Into<String>, pattern: impl ToSqlValue) -> Self {
        Self::compare(column, CompareOp::Like, pattern)
    }

    /// `column NOT LIKE pattern`
    #[must_use]
    pub fn not_like(column: impl Into<String>, pattern: impl ToSqlValue) -> Self {
        Self::compare(column, CompareOp::NotLike, pattern)
    }

    /// `column IS NULL`
    #[must_use]
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::eq(column, SqlValue::Null)
    }

    /// `column IS NOT NULL`
    #[must_use]
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::ne(column, SqlValue::Null)
    }

    /// All of `children` must hold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `children` is empty.
    pub fn all(children: Vec<Self>) -> Result<Self> {
        BoolGroup::new(BoolOp::And, children).map(Self::Group)
    }

    /// At least one of `children` must hold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `children` is empty.
    pub fn any(children: Vec<Self>) -> Result<Self> {
        BoolGroup::new(BoolOp::Or, children).map(Self::Group)
    }

    /// `column IN (values...)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `values` is empty, since
    /// `IN ()` is not valid SQL.
    pub fn in_set<T: ToSqlValue>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Result<Self> {
        let values: Vec<SqlValue> = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        if values.is_empty() {
            return Err(empty_in_set());
        }
        Ok(Self::InSet {
            column: column.into(),
            values,
        })
    }

    /// `column op (SELECT inner_column FROM table WHERE filter)`.
    #[must_use]
    pub fn inner_select(
        column: impl Into<String>,
        op: CompareOp,
        table: impl Into<String>,
        inner_column: impl Into<String>,
        filter: Self,
    ) -> Self {
        Self::InnerSelect {
            column: column.into(),
            op,
            table: table.into(),
            inner_column: inner_column.into(),
            filter: Box::new(filter),
        }
    }

    /// Matches every row.
    #[must_use]
    pub const fn always() -> Self {
        Self::True
    }

    /// `self AND other`. Extends `self` in place when it is already an
    /// `AND` group.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        self.combine(BoolOp::And, other)
    }

    /// `self OR other`. Extends `self` in place when it is already an
    /// `OR` group.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        self.combine(BoolOp::Or, other)
    }

    fn combine(self, op: BoolOp, other: Self) -> Self {
        match self {
            Self::Group(mut group) if group.op == op => {
                group.children.push(other);
                Self::Group(group)
            }
            left => Self::Group(BoolGroup {
                op,
                children: vec![left, other],
            }),
        }
    }

    /// Renders the tree into condition text and its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty column or table name,
    /// or an empty `IN` list.
    pub fn render<B: QueryBuilder + ?Sized>(&self, builder: &B) -> Result<WhereFragment> {
        match self {
            Self::Comparison { column, op, value } => {
                validate::column(column)?;
                if let Some(fragment) = builder.format_comparison(column, *op, value) {
                    return Ok(fragment);
                }
                let condition = format!(
                    "{} {op} {}",
                    builder.quote_identifier(column),
                    builder.parameter_placeholder()
                );
                Ok(WhereFragment::new(
                    builder.wrap(&condition),
                    vec![value.clone()],
                ))
            }
            Self::Group(group) => group.render(builder),
            Self::InSet { column, values } => {
                validate::column(column)?;
                if values.is_empty() {
                    return Err(empty_in_set());
                }
                let placeholders = vec![builder.parameter_placeholder(); values.len()].join(", ");
                let condition = format!(
                    "{} IN {}",
                    builder.quote_identifier(column),
                    builder.wrap(&placeholders)
                );
                Ok(WhereFragment::new(builder.wrap(&condition), values.clone()))
            }
            Self::InnerSelect {
                column,
                op,
                table,
                inner_column,
                filter,
            } => {
                validate::column(column)?;
                let (inner_sql, params) = filter.render(builder)?.into_parts();
                let select = builder.select(
                    table,
                    &[inner_column.as_str()],
                    &inner_sql,
                    SelectOptions::inner(),
                )?;
                let condition = format!("{} {op} ({select})", builder.quote_identifier(column));
                Ok(WhereFragment::new(builder.wrap(&condition), params))
            }
            Self::True => Ok(WhereFragment::always_true()),
        }
    }
}

fn empty_in_set() -> Error {
    Error::invalid_argument("values", "an IN list needs at least one value")
}

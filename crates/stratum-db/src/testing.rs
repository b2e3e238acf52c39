//! In-memory connection that records what the engine asks of it and replays
//! scripted results.

use std::collections::VecDeque;

use async_trait::async_trait;
use stratum_core::{Error, ParamKind, Result, SqlValue};

use crate::connection::{BufferedStatement, Connection, Row};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Prepare(String),
    Execute(Vec<(SqlValue, ParamKind)>),
}

#[derive(Debug, Default)]
pub struct ScriptedConnection {
    events: Vec<Event>,
    rows: Option<Vec<Row>>,
    affected: VecDeque<u64>,
    prepare_error: Option<String>,
    execute_error: Option<(usize, String)>,
    executions: usize,
    last_insert_id: Option<SqlValue>,
}

impl ScriptedConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every execution returns these rows.
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Successive executions report these affected counts, then zero.
    pub fn with_affected(mut self, counts: Vec<u64>) -> Self {
        self.affected = counts.into();
        self
    }

    pub fn with_last_insert_id(mut self, id: SqlValue) -> Self {
        self.last_insert_id = Some(id);
        self
    }

    pub fn fail_prepare(mut self, message: &str) -> Self {
        self.prepare_error = Some(message.to_owned());
        self
    }

    /// The execution with this 0-based index fails.
    pub fn fail_execute_at(mut self, index: usize, message: &str) -> Self {
        self.execute_error = Some((index, message.to_owned()));
        self
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn prepared(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Prepare(sql) => Some(sql.as_str()),
                Event::Execute(_) => None,
            })
            .collect()
    }

    pub fn executed(&self) -> Vec<Vec<SqlValue>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Execute(bindings) => {
                    Some(bindings.iter().map(|(v, _)| v.clone()).collect())
                }
                Event::Prepare(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    type Statement = BufferedStatement;

    async fn prepare(&mut self, sql: &str) -> Result<BufferedStatement> {
        self.events.push(Event::Prepare(sql.to_owned()));
        if let Some(message) = &self.prepare_error {
            return Err(Error::Driver(message.clone()));
        }
        Ok(BufferedStatement::new(sql, self.rows.is_some()))
    }

    async fn execute(&mut self, statement: &mut BufferedStatement) -> Result<()> {
        self.events.push(Event::Execute(statement.bindings()?));
        let index = self.executions;
        self.executions += 1;

        if let Some((failing, message)) = &self.execute_error {
            if *failing == index {
                return Err(Error::Driver(message.clone()));
            }
        }
        match &self.rows {
            Some(rows) => statement.set_rows(rows.clone()),
            None => statement.set_affected(self.affected.pop_front().unwrap_or(0)),
        }
        Ok(())
    }

    async fn last_insert_id(&mut self, _column: Option<&str>) -> Result<SqlValue> {
        Ok(self.last_insert_id.clone().unwrap_or(SqlValue::Null))
    }
}

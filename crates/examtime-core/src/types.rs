//! Data types for timetable lookups
//!
//! This module contains the query model, the per-row view of the timetable
//! and the result records returned to callers.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Which timetable column the query terms are compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Course code (first column)
    Code,
    /// Course name (third column)
    Name,
}

impl QueryKind {
    /// Parse the wire representation (`"code"` or `"name"`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "code" => Some(Self::Code),
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    /// Plural noun used in user-facing messages.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Code => "codes",
            Self::Name => "names",
        }
    }
}

/// A validated lookup: a kind plus a non-empty, ordered list of terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    kind: QueryKind,
    terms: Vec<String>,
}

impl Query {
    /// Build a query, rejecting an empty term list.
    ///
    /// # Errors
    /// `TimetableError::InvalidQuery` with `"no codes"` / `"no names"` when
    /// `terms` is empty.
    pub fn new(kind: QueryKind, terms: Vec<String>) -> Result<Self> {
        if terms.is_empty() {
            return Err(TimetableError::InvalidQuery(format!("no {}", kind.plural())));
        }
        Ok(Self { kind, terms })
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The match predicate.
    ///
    /// The key cell (code or name, depending on the kind) must be non-empty
    /// and equal to one of the terms; the name and time cells must both be
    /// non-empty for the row to produce a result.
    pub fn matches(&self, row: &TimetableRow) -> bool {
        let key = match self.kind {
            QueryKind::Code => &row.code,
            QueryKind::Name => &row.name,
        };
        if key.is_empty() || row.name.is_empty() || row.time.is_empty() {
            return false;
        }
        self.terms.iter().any(|term| term == key)
    }
}

/// The three observable cells of one `<tr>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimetableRow {
    pub code: String,
    pub name: String,
    pub time: String,
}

/// One matched subject and its exam time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Course name as printed in the timetable
    pub name: String,
    /// Exam time as printed in the timetable
    pub time: String,
}

impl From<TimetableRow> for MatchResult {
    fn from(row: TimetableRow) -> Self {
        Self {
            name: row.name,
            time: row.time,
        }
    }
}

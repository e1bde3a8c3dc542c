//! Boolean query language for filtering candidate and application lists.
//!
//! A query is parsed once per request with [`parse`] and evaluated per row with
//! [`matches`]. Parsing never fails: malformed input degrades to free-text clauses.

mod matcher;
mod normalizer;
mod parser;
pub mod router;
mod rows;

pub use matcher::{matches, RowFields};
pub use parser::parse;
pub use router::search_router;
pub use rows::{load_rows, SearchRow, HAYSTACK_FIELDS};

use serde::{Deserialize, Serialize};

/// One signed, optionally field-scoped search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub field: Option<String>,
    pub value: String,
    pub phrase: bool,
    pub negated: bool,
}

/// Parsed search string: clauses combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Rows passing every clause, in input order.
    pub fn filter<'a, I>(&'a self, rows: I) -> impl Iterator<Item = &'a SearchRow> + 'a
    where
        I: IntoIterator<Item = &'a SearchRow>,
        I::IntoIter: 'a,
    {
        rows.into_iter()
            .filter(move |row| matches(self, row.haystack(), *row))
    }
}

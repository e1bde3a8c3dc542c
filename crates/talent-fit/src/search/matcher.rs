use std::collections::{BTreeMap, HashMap};

use super::normalizer::contains_folded;
use super::{Clause, Query};

/// Row-specific field values addressable by a field clause.
pub trait RowFields {
    fn field(&self, name: &str) -> Option<&str>;
}

fn lookup_ignoring_case<'a, I>(entries: I, name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    entries
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

impl RowFields for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(String::as_str)
            .or_else(|| lookup_ignoring_case(self, name))
    }
}

impl RowFields for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(String::as_str)
            .or_else(|| lookup_ignoring_case(self, name))
    }
}

fn clause_matches<F>(clause: &Clause, haystack: &str, fields: &F) -> bool
where
    F: RowFields + ?Sized,
{
    let target = match &clause.field {
        Some(name) => fields.field(name),
        None => Some(haystack),
    };

    // Unknown fields read as empty and never contain a non-empty value.
    target.is_some_and(|target| contains_folded(target, &clause.value))
}

/// Evaluate a parsed query against one row. Clauses are ANDed; a negated clause holds
/// when its term is absent. An empty query matches every row.
pub fn matches<F>(query: &Query, haystack: &str, fields: &F) -> bool
where
    F: RowFields + ?Sized,
{
    query
        .clauses()
        .iter()
        .all(|clause| clause_matches(clause, haystack, fields) != clause.negated)
}

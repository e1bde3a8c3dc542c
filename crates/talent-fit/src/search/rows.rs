use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::matcher::RowFields;
use super::normalizer::join_haystack;

/// Fields joined, in order, into the free-text haystack of a row.
pub const HAYSTACK_FIELDS: [&str; 5] = ["name", "email", "location", "job", "client"];

/// A candidate or application row prepared for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRow {
    pub id: String,
    haystack: String,
    fields: BTreeMap<String, String>,
}

impl SearchRow {
    /// Build a row from its fields; keys are lowercased and the haystack is derived from
    /// [`HAYSTACK_FIELDS`].
    pub fn from_fields<I, K, V>(id: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let fields: BTreeMap<String, String> = fields
            .into_iter()
            .map(|(key, value)| (key.as_ref().trim().to_lowercase(), value.into()))
            .collect();
        let haystack = join_haystack(
            HAYSTACK_FIELDS
                .iter()
                .filter_map(|name| fields.get(*name).map(String::as_str)),
        );

        Self {
            id: id.into(),
            haystack,
            fields,
        }
    }

    /// Replace the derived haystack with a caller-supplied one.
    pub fn with_haystack(mut self, haystack: &str) -> Self {
        self.haystack = join_haystack([haystack]);
        self
    }

    pub fn haystack(&self) -> &str {
        &self.haystack
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

impl RowFields for SearchRow {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.field(name)
    }
}

/// Read rows from CSV. Headers become field names; an `id` column supplies row ids,
/// otherwise the 1-based record number is used.
pub fn load_rows<R: Read>(reader: R) -> Result<Vec<SearchRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let pairs: Vec<(&str, String)> = headers
            .iter()
            .map(String::as_str)
            .zip(record.iter().map(str::to_string))
            .filter(|(_, value)| !value.is_empty())
            .collect();
        let id = pairs
            .iter()
            .find(|(key, _)| *key == "id")
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| (index + 1).to_string());

        rows.push(SearchRow::from_fields(id, pairs));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::parse;
    use std::io::Cursor;

    #[test]
    fn haystack_joins_known_fields_in_order() {
        let row = SearchRow::from_fields(
            "c-1",
            [
                ("Client", "Globex"),
                ("Name", "Ada Obi"),
                ("Source", "LinkedIn"),
                ("Location", "Lagos"),
            ],
        );

        assert_eq!(row.haystack(), "ada obi lagos globex");
        assert_eq!(row.field("source"), Some("LinkedIn"));
    }

    #[test]
    fn load_rows_reads_headers_as_fields() {
        let csv = "id,name,email,location,source,stage,job,client\n\
c-1,Ada Obi,ada@example.com,Lagos,LinkedIn,Screen,Senior Engineer,Globex\n\
c-2,Tunde Bello,tunde@example.com,Abuja,Referral,Offer,Contract Engineer,Initech\n";
        let rows = load_rows(Cursor::new(csv)).expect("rows parse");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id, "c-2");

        let query = parse("engineer -contract source:linkedin");
        let ids: Vec<_> = query.filter(&rows).map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["c-1"]);
    }

    #[test]
    fn load_rows_falls_back_to_record_numbers() {
        let rows = load_rows(Cursor::new("name,stage\nAda,Screen\nTunde,Offer\n")).expect("rows");
        let ids: Vec<_> = rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}

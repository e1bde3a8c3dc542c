use std::collections::BTreeSet;

use super::{Clause, Query};

/// Whitespace-delimited token. `quote_start` is the byte offset in `text` where the
/// first double-quoted span began, if any.
#[derive(Debug, Default)]
struct RawToken {
    text: String,
    quote_start: Option<usize>,
}

fn tokenize(raw: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut current = RawToken::default();
    let mut open = false;
    let mut in_quotes = false;

    for ch in raw.chars() {
        if ch == '"' {
            if current.quote_start.is_none() {
                current.quote_start = Some(current.text.len());
            }
            in_quotes = !in_quotes;
            open = true;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if open {
                tokens.push(std::mem::take(&mut current));
                open = false;
            }
            continue;
        }

        current.text.push(ch);
        open = true;
    }

    // An unterminated quote simply runs to the end of input.
    if open {
        tokens.push(current);
    }

    tokens
}

/// Split `identifier:value` when the identifier is alphabetic and the unquoted part of
/// the value carries no further colon. Anything else stays free text.
fn split_field<'a>(bare: &str, body: &'a str) -> Option<(&'a str, &'a str)> {
    let colon = bare.find(':')?;
    let identifier = &body[..colon];
    if identifier.is_empty() || !identifier.chars().all(char::is_alphabetic) {
        return None;
    }
    if bare[colon + 1..].contains(':') {
        return None;
    }

    let value = &body[colon + 1..];
    if value.is_empty() {
        return None;
    }
    Some((identifier, value))
}

fn classify(token: RawToken) -> Option<Clause> {
    let phrase = token.quote_start.is_some();
    let bare_end = token.quote_start.unwrap_or(token.text.len());

    let negated = bare_end > 0 && token.text.starts_with('-');
    let offset = usize::from(negated);
    let body = &token.text[offset..];
    let bare = &token.text[offset..bare_end];

    let (field, value) = match split_field(bare, body) {
        Some((field, value)) => (Some(field.to_string()), value),
        None => (None, body),
    };

    if value.is_empty() {
        return None;
    }

    Some(Clause {
        field,
        value: value.to_string(),
        phrase,
        negated,
    })
}

/// A field named earlier in the query reads as free text, `field:value` verbatim.
fn demote_repeated_field(clause: Clause, seen: &mut BTreeSet<String>) -> Clause {
    let Some(field) = clause.field.clone() else {
        return clause;
    };
    if seen.insert(field.to_lowercase()) {
        return clause;
    }

    Clause {
        value: format!("{}:{}", field, clause.value),
        field: None,
        ..clause
    }
}

/// Parse a raw search string. Never fails; tokens that reduce to nothing are dropped.
pub fn parse(raw: &str) -> Query {
    let mut seen = BTreeSet::new();
    Query::new(
        tokenize(raw)
            .into_iter()
            .filter_map(classify)
            .map(|clause| demote_repeated_field(clause, &mut seen))
            .collect(),
    )
}

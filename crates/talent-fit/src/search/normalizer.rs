/// Case folding shared by haystack construction and clause evaluation.
pub(crate) fn fold(value: &str) -> String {
    value.to_lowercase()
}

pub(crate) fn contains_folded(target: &str, needle: &str) -> bool {
    fold(target).contains(&fold(needle))
}

/// Join non-empty parts into a single lowercase, single-spaced haystack.
pub(crate) fn join_haystack<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = parts
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    fold(&joined)
}

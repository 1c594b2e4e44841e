use std::collections::HashSet;

/// Lowercases tags and drops case-insensitive duplicates.
///
/// The first occurrence of each tag decides its position in the output.
///
/// # Examples
///
/// ```
/// use quire_core::tags::canonicalize_tags;
///
/// assert_eq!(canonicalize_tags(["Go", "go", "RUST"]), vec!["go", "rust"]);
/// assert!(canonicalize_tags(Vec::<String>::new()).is_empty());
/// ```
pub fn canonicalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tags = tags.into_iter();
    let mut seen = HashSet::new();
    let mut canonical = Vec::with_capacity(tags.size_hint().0);
    for tag in tags {
        let lowered = tag.as_ref().to_lowercase();
        if seen.insert(lowered.clone()) {
            canonical.push(lowered);
        }
    }
    canonical
}

/// Returns true when `tags` is already in canonical form.
pub fn is_canonical<S: AsRef<str>>(tags: &[S]) -> bool {
    let mut seen = HashSet::new();
    tags.iter().all(|tag| {
        let tag = tag.as_ref();
        tag.to_lowercase() == tag && seen.insert(tag)
    })
}

//! Entry ids derived from content file paths.

use std::path::{Component, Path};

/// Returns true for Unicode combining marks (Mn, Mc, Me) used by common scripts.
///
/// Scripts such as Devanagari or Arabic render wrongly without them, so they
/// survive slugification even though they are not alphanumeric.
fn is_combining_mark(ch: char) -> bool {
    use std::ops::RangeInclusive;

    const RANGES: &[RangeInclusive<u32>] = &[
        0x0300..=0x036F,
        0x0591..=0x05BD,
        0x05BF..=0x05BF,
        0x05C1..=0x05C2,
        0x05C4..=0x05C5,
        0x05C7..=0x05C7,
        0x0610..=0x061A,
        0x064B..=0x065F,
        0x0670..=0x0670,
        0x0900..=0x0903,
        0x093A..=0x094F,
        0x0951..=0x0957,
        0x0962..=0x0963,
        0x0980..=0x0983,
        0x09BC..=0x09CD,
        0x0A01..=0x0A03,
        0x0A3C..=0x0A4D,
        0x0A81..=0x0A83,
        0x0ABC..=0x0ACD,
        0x0B01..=0x0B03,
        0x0BBE..=0x0BCD,
        0x0E31..=0x0E3A,
        0x0E47..=0x0E4E,
        0x1AB0..=0x1AFF,
        0x1DC0..=0x1DFF,
        0x302A..=0x302F,
        0x3099..=0x309A,
        0xFE20..=0xFE2F,
    ];

    let cp = ch as u32;
    RANGES.iter().any(|r| r.contains(&cp))
}

/// Slugifies one path segment the way github-slugger does.
///
/// Lowercases, keeps alphanumerics, `-`, `_` and combining marks, turns
/// spaces into hyphens and drops everything else. Hyphens are neither
/// collapsed nor trimmed.
///
/// ```
/// use quire_core::slug::slugify_segment;
///
/// assert_eq!(slugify_segment("Hello World"), "hello-world");
/// assert_eq!(slugify_segment("astro.config.mjs"), "astroconfigmjs");
/// ```
pub fn slugify_segment(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            slug.push(ch.to_ascii_lowercase());
        } else if !ch.is_ascii() && (ch.is_alphanumeric() || is_combining_mark(ch)) {
            slug.extend(ch.to_lowercase());
        } else if ch == ' ' {
            slug.push('-');
        }
    }
    slug
}

/// Derives an entry id from a file path relative to the collection base.
///
/// The extension is dropped, every directory segment is slugified, and a
/// trailing `index` segment collapses into its parent (`guides/index.md`
/// becomes `guides`). A lone `index.md` keeps the id `index`.
///
/// ```
/// use std::path::Path;
/// use quire_core::slug::entry_id_from_path;
///
/// assert_eq!(entry_id_from_path(Path::new("2026/Hello World.md")), "2026/hello-world");
/// assert_eq!(entry_id_from_path(Path::new("guides/index.mdx")), "guides");
/// ```
pub fn entry_id_from_path(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let mut segments: Vec<String> = without_ext
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(slugify_segment(&part.to_string_lossy())),
            _ => None,
        })
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() > 1 && segments.last().is_some_and(|last| last == "index") {
        segments.pop();
    }

    segments.join("/")
}

/// Normalizes a user supplied `slug` frontmatter value into an entry id.
///
/// Surrounding slashes are stripped; the rest is kept verbatim.
pub fn entry_id_from_slug(slug: &str) -> Option<String> {
    let trimmed = slug.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

//! Flat `path:  id` listings

use crate::client::{Group, Project};

/// Gap between the name column and the ID column.
const COLUMN_GAP: usize = 2;

/// Something that can appear in a flat listing.
pub trait ListEntry {
    /// Namespaced path shown in the name column
    fn path(&self) -> &str;
    /// Numeric ID shown in the ID column
    fn id(&self) -> u64;
}

impl ListEntry for Group {
    fn path(&self) -> &str {
        &self.full_path
    }

    fn id(&self) -> u64 {
        self.id
    }
}

impl ListEntry for Project {
    fn path(&self) -> &str {
        &self.path_with_namespace
    }

    fn id(&self) -> u64 {
        self.id
    }
}

/// Width of the widest `path:` label in `entries`.
pub fn label_width<T: ListEntry>(entries: &[T]) -> usize {
    entries
        .iter()
        .map(|e| e.path().chars().count() + 1)
        .max()
        .unwrap_or(0)
}

/// Render one line per entry: `path:` padded to the name column, then the ID
/// right-aligned in six columns.
///
/// Labels are padded to at least `min_width`; the name column is the widest
/// padded label plus a two-space gap. Listings rendered with the same
/// `min_width` (at least as wide as every label) line up.
pub fn format_list<T: ListEntry>(entries: &[T], min_width: usize) -> String {
    let column = label_width(entries).max(min_width) + COLUMN_GAP;

    let mut out = String::new();
    for entry in entries {
        let label = format!("{}:", entry.path());
        out.push_str(&format!("{:<column$}{:>6}\n", label, entry.id()));
    }
    out
}

/// Sort entries by case-folded path.
pub fn sort_by_path<T: ListEntry>(entries: &mut [T]) {
    entries.sort_by_key(|e| e.path().to_lowercase());
}

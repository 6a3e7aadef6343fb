//! Schools listed by a district's menu directory.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A school with its own menu calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// URL-safe identifier from the menu API, unique within a district
    pub slug: String,
    /// Display name (falls back to the slug)
    pub name: String,
}

/// A directory entry as returned by the API, before validation.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSchool {
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl School {
    /// Build a school from a directory entry.
    ///
    /// Entries without a slug are dropped. So are slugs that could not be
    /// used as a file name inside the output directory.
    pub(crate) fn from_raw(raw: RawSchool) -> Option<Self> {
        let slug = raw.slug.filter(|s| !s.is_empty())?;
        if !is_safe_slug(&slug) {
            warn!(%slug, "Skipping school with unusable slug");
            return None;
        }
        let name = raw.name.filter(|n| !n.is_empty()).unwrap_or_else(|| slug.clone());
        Some(School { slug, name })
    }

    /// Name of the calendar file for this school: `{slug}.ics`.
    pub fn file_name(&self) -> String {
        format!("{}.ics", self.slug)
    }
}

/// A slug is usable as-is for a file name when it cannot leave the directory.
fn is_safe_slug(slug: &str) -> bool {
    slug != "." && !slug.contains("..") && !slug.contains(['/', '\\', '\0'])
}

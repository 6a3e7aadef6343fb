//! Writing a generation run to the output directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use lunchcal_core::{School, SchoolCalendar};
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Summary of a run, written next to the calendars as `manifest.json`.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub generated_at: String,
    pub district: String,
    pub menu_type: String,
    pub days_ahead: u32,
    pub schools: Vec<School>,
}

impl Manifest {
    pub fn new(settings: &Settings, schools: Vec<School>, generated_at: DateTime<Utc>) -> Self {
        Manifest {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            district: settings.district.clone(),
            menu_type: settings.menu_type.clone(),
            days_ahead: settings.days_ahead,
            schools,
        }
    }
}

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory at {}", dir.display()))
}

/// Write each calendar to `{dir}/{file name}`, returning the paths written.
pub fn write_calendars(dir: &Path, calendars: &[SchoolCalendar]) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;

    calendars
        .iter()
        .map(|calendar| {
            let path = dir.join(calendar.school.file_name());
            std::fs::write(&path, &calendar.document)
                .with_context(|| format!("Failed to write calendar at {}", path.display()))?;
            debug!(path = %path.display(), events = calendar.event_count, "Wrote calendar");
            Ok(path)
        })
        .collect()
}

pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    ensure_dir(dir)?;

    let path = dir.join(MANIFEST_FILE);
    let contents = serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write manifest at {}", path.display()))?;
    debug!(path = %path.display(), schools = manifest.schools.len(), "Wrote manifest");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn settings(dir: &Path) -> Settings {
        Settings {
            district: "a2schools".to_string(),
            menu_type: "lunch".to_string(),
            days_ahead: 28,
            output_dir: dir.to_path_buf(),
        }
    }

    fn school(slug: &str, name: &str) -> School {
        School {
            slug: slug.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_write_calendars_one_file_per_school() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/public");

        let calendars = vec![
            SchoolCalendar {
                school: school("pattengill", "Pattengill"),
                document: "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n".to_string(),
                event_count: 0,
            },
            SchoolCalendar {
                school: school("tappan", "Tappan"),
                document: "BEGIN:VCALENDAR\r\nX\r\nEND:VCALENDAR\r\n".to_string(),
                event_count: 0,
            },
        ];

        let written = write_calendars(&out, &calendars).unwrap();

        assert_eq!(written, vec![out.join("pattengill.ics"), out.join("tappan.ics")]);
        assert_eq!(
            std::fs::read_to_string(out.join("tappan.ics")).unwrap(),
            "BEGIN:VCALENDAR\r\nX\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn test_write_manifest_contents() {
        let dir = tempfile::tempdir().unwrap();
        let generated_at = Utc.with_ymd_and_hms(2024, 1, 9, 6, 0, 0).unwrap();
        let manifest = Manifest::new(
            &settings(dir.path()),
            vec![school("pattengill", "Pattengill"), school("tappan", "tappan")],
            generated_at,
        );

        let path = write_manifest(dir.path(), &manifest).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "generated_at": "2024-01-09T06:00:00Z",
                "district": "a2schools",
                "menu_type": "lunch",
                "days_ahead": 28,
                "schools": [
                    {"slug": "pattengill", "name": "Pattengill"},
                    {"slug": "tappan", "name": "tappan"}
                ]
            })
        );
    }

    #[test]
    fn test_write_manifest_without_schools() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::new(&settings(dir.path()), vec![], Utc::now());

        let path = write_manifest(dir.path(), &manifest).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(value["schools"], serde_json::json!([]));
    }
}

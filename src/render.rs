//! Terminal rendering for generation results.

use lunchcal_core::{Generation, SchoolCalendar, SchoolFailure};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for SchoolCalendar {
    fn render(&self) -> String {
        let count = format!("{} {}", self.event_count, pluralize("day", self.event_count));
        format!(
            "   {} {} {}",
            "✓".green(),
            self.school.name,
            format!("({}, {})", count, self.school.file_name()).dimmed()
        )
    }
}

impl Render for SchoolFailure {
    fn render(&self) -> String {
        format!(
            "   {} {} {}",
            "✗".red(),
            self.school.name.red(),
            self.error.to_string().dimmed()
        )
    }
}

impl Render for Generation {
    fn render(&self) -> String {
        if self.calendars.is_empty() && self.failures.is_empty() {
            return "   No schools found".dimmed().to_string();
        }

        let mut lines: Vec<String> = self.calendars.iter().map(Render::render).collect();
        lines.extend(self.failures.iter().map(Render::render));
        lines.join("\n")
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

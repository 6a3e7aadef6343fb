//! The static `index.html` listing every school's calendar.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lunchcal_core::School;

use crate::output::ensure_dir;

pub const INDEX_FILE: &str = "index.html";

const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>School Lunch Calendars</title>
    <style>
      :root {
        color-scheme: light;
        font-family: "Inter", "Segoe UI", system-ui, -apple-system, sans-serif;
        line-height: 1.6;
        color: #1f2937;
        background: #f3f4f6;
      }

      * {
        box-sizing: border-box;
      }

      body {
        margin: 0;
      }

      main {
        max-width: 960px;
        margin: 0 auto;
        padding: 48px 20px 64px;
      }

      header {
        margin-bottom: 32px;
      }

      h1 {
        font-size: clamp(2rem, 3vw, 2.75rem);
        margin-bottom: 12px;
        letter-spacing: -0.02em;
      }

      p {
        margin: 0;
        color: #4b5563;
        font-size: 1.05rem;
      }

      .card {
        background: #ffffff;
        border-radius: 16px;
        padding: 28px;
        box-shadow: 0 12px 30px rgba(15, 23, 42, 0.08);
      }

      .school-list {
        list-style: none;
        padding: 0;
        margin: 32px 0 0;
        display: grid;
        gap: 18px;
      }

      .school-card {
        border: 1px solid #e5e7eb;
        border-radius: 14px;
        padding: 20px 22px;
        background: #f9fafb;
        display: grid;
        gap: 16px;
      }

      .school-card__header {
        display: flex;
        flex-direction: column;
        gap: 6px;
      }

      .school-card h2 {
        font-size: 1.25rem;
        margin: 0;
        color: #111827;
      }

      .ics-link {
        font-size: 0.95rem;
        color: #2563eb;
        text-decoration: none;
        font-weight: 600;
      }

      .ics-link:hover {
        text-decoration: underline;
      }

      .school-card__actions {
        display: flex;
        flex-wrap: wrap;
        gap: 12px;
      }

      .button {
        display: inline-flex;
        align-items: center;
        justify-content: center;
        padding: 10px 16px;
        border-radius: 999px;
        background: #1d4ed8;
        color: #ffffff;
        text-decoration: none;
        font-weight: 600;
        font-size: 0.95rem;
        transition: transform 0.15s ease, box-shadow 0.15s ease;
      }

      .button:hover {
        transform: translateY(-1px);
        box-shadow: 0 8px 18px rgba(37, 99, 235, 0.2);
      }

      .button[data-action="outlook"] {
        background: #0f6cbd;
      }

      .button[data-action="ical"] {
        background: #6b7280;
      }

      footer {
        margin-top: 36px;
        color: #6b7280;
        font-size: 0.9rem;
      }
    </style>
  </head>
  <body>
    <main>
      <header>
        <h1>School Lunch Calendars</h1>
        <p>
          Subscribe once and your calendar will update automatically with the latest lunch
          menus. Use the buttons below for the most popular calendar apps or download the
          .ics file directly.
        </p>
      </header>
      <section class="card">
        <ul class="school-list">
"##;

const PAGE_TAIL: &str = r##"        </ul>
      </section>
      <footer>
        Tip: Most calendar apps refresh subscriptions every few hours. If you just
        subscribed, give it a little time for new menus to appear.
      </footer>
    </main>
    <script>
      const cards = document.querySelectorAll(".school-card");
      cards.forEach((card) => {
        const file = card.dataset.file;
        const name = card.dataset.name;
        const icsUrl = new URL(file, window.location.href).toString();
        card.querySelector('[data-action="google"]').href =
          `https://calendar.google.com/calendar/r?cid=${encodeURIComponent(icsUrl)}`;
        card.querySelector('[data-action="outlook"]').href =
          `https://outlook.live.com/calendar/0/addcal?url=${encodeURIComponent(icsUrl)}&name=${encodeURIComponent(name)}`;
        card.querySelector('[data-action="ical"]').href = `webcal://${new URL(icsUrl).host}${new URL(icsUrl).pathname}`;
      });
    </script>
  </body>
</html>
"##;

/// Escape text for use in HTML content and quoted attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_card(school: &School) -> String {
    let slug = escape_html(&school.slug);
    let name = escape_html(&school.name);
    let file = escape_html(&school.file_name());

    format!(
        r##"          <li class="school-card" data-slug="{slug}" data-name="{name}" data-file="{file}">
            <div class="school-card__header">
              <h2>{name}</h2>
              <a class="ics-link" href="{file}">Download .ics</a>
            </div>
            <div class="school-card__actions">
              <a class="button" data-action="google" href="#">Google Calendar</a>
              <a class="button" data-action="outlook" href="#">Outlook</a>
              <a class="button" data-action="ical" href="#">iCal</a>
            </div>
          </li>
"##
    )
}

/// Render the full page for `schools`, in the order given.
pub fn render_index(schools: &[School]) -> String {
    let mut page = String::from(PAGE_HEAD);
    for school in schools {
        page.push_str(&render_card(school));
    }
    page.push_str(PAGE_TAIL);
    page
}

pub fn write_index(dir: &Path, schools: &[School]) -> Result<PathBuf> {
    ensure_dir(dir)?;

    let path = dir.join(INDEX_FILE);
    std::fs::write(&path, render_index(schools))
        .with_context(|| format!("Failed to write index at {}", path.display()))?;

    Ok(path)
}

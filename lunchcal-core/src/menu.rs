//! Menu payloads from the API and their normalized per-day form.
//!
//! The raw types mirror the Nutrislice weekly menu JSON closely enough to
//! pick out what a calendar needs. Every field is optional on the wire, so
//! they are all defaulted here and filtered in [`parse_menu_day`].

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::error::{LunchCalError, LunchCalResult};

/// Item categories that count as the day's main dish.
const ENTREE_CATEGORIES: [&str; 2] = ["entree", "main"];

/// One week of menus for a school.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct WeekMenu {
    #[serde(default)]
    pub days: Vec<RawMenuDay>,
}

/// A single day inside a [`WeekMenu`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawMenuDay {
    /// ISO date (YYYY-MM-DD). `None` when missing, null or not a string.
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default)]
    pub menu_items: Option<Vec<RawMenuItem>>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawMenuItem {
    #[serde(default)]
    pub is_station_header: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub food: Option<RawFood>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawFood {
    #[serde(default)]
    pub name: Option<String>,
}

/// Accept any JSON value, keeping it only when it is a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Field::deserialize(deserializer)? {
        Field::Text(text) => Some(text),
        Field::Other(_) => None,
    })
}

impl RawMenuItem {
    /// The food name, if this item is an actual food with a usable name.
    fn food_name(&self) -> Option<&str> {
        if self.is_station_header.unwrap_or(false) {
            return None;
        }
        self.food
            .as_ref()?
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
    }

    fn is_entree(&self) -> bool {
        self.category
            .as_deref()
            .map(|c| c.to_lowercase())
            .is_some_and(|c| ENTREE_CATEGORIES.contains(&c.as_str()))
    }
}

/// A day's lunch, ready to become a calendar event.
///
/// `foods` is never empty and every entree also appears in `foods`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDay {
    pub date: NaiveDate,
    pub entrees: Vec<String>,
    pub foods: Vec<String>,
}

/// Normalize one raw day.
///
/// Returns `Ok(None)` when the day has no menu (no items, or nothing but
/// headers and nameless items). The date is only parsed for days that do
/// have food, so an empty day with a broken date is still just empty.
pub fn parse_menu_day(day: &RawMenuDay) -> LunchCalResult<Option<MenuDay>> {
    let items = match day.menu_items.as_deref() {
        Some(items) if !items.is_empty() => items,
        _ => return Ok(None),
    };

    let mut entrees = Vec::new();
    let mut foods = Vec::new();

    for item in items {
        let Some(name) = item.food_name() else {
            continue;
        };
        foods.push(name.to_string());
        if item.is_entree() {
            entrees.push(name.to_string());
        }
    }

    if foods.is_empty() {
        return Ok(None);
    }

    let raw_date = day.date.as_deref().ok_or(LunchCalError::MissingDate)?;
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|source| {
        LunchCalError::InvalidDate {
            value: raw_date.to_string(),
            source,
        }
    })?;

    Ok(Some(MenuDay {
        date,
        entrees: dedupe(entrees),
        foods: dedupe(foods),
    }))
}

/// Drop repeated values, keeping the first occurrence of each.
fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Menu days for one school keyed by date.
///
/// Inserting a day for a date that is already present replaces it, so when
/// two fetched weeks overlap the later fetch wins. Iteration is in date order.
#[derive(Debug, Default, Clone)]
pub struct MenuLog {
    days: BTreeMap<NaiveDate, MenuDay>,
}

impl MenuLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a day, returning the one it replaced.
    pub fn insert(&mut self, day: MenuDay) -> Option<MenuDay> {
        self.days.insert(day.date, day)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&MenuDay> {
        self.days.get(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = &MenuDay> {
        self.days.values()
    }

    pub fn into_days(self) -> Vec<MenuDay> {
        self.days.into_values().collect()
    }
}

//! Per-district generation: schools → weekly menus → one calendar per school.
//!
//! Everything runs sequentially. Each school's menus are collected into its
//! own [`MenuLog`] and serialized before the next school is fetched.

use tracing::{info, warn};

use crate::client::NutrisliceClient;
use crate::date_range::DateRange;
use crate::error::{LunchCalError, LunchCalResult};
use crate::ics;
use crate::menu::{MenuLog, parse_menu_day};
use crate::school::School;

/// What to do when fetching a single school's menus fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchoolErrorPolicy {
    /// Stop the whole run at the first failing school.
    #[default]
    Abort,
    /// Leave the school out of the output and carry on.
    Skip,
}

/// Parameters for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub district: String,
    pub menu_type: String,
    pub range: DateRange,
    pub on_school_error: SchoolErrorPolicy,
}

/// A finished calendar document for one school.
#[derive(Debug, Clone)]
pub struct SchoolCalendar {
    pub school: School,
    pub document: String,
    pub event_count: usize,
}

/// A school left out of the run because its menus could not be fetched.
#[derive(Debug)]
pub struct SchoolFailure {
    pub school: School,
    pub error: LunchCalError,
}

/// Result of a generation run.
#[derive(Debug, Default)]
pub struct Generation {
    pub calendars: Vec<SchoolCalendar>,
    pub failures: Vec<SchoolFailure>,
}

impl Generation {
    /// Schools that got a calendar, in directory order.
    pub fn schools(&self) -> Vec<School> {
        self.calendars.iter().map(|c| c.school.clone()).collect()
    }
}

/// Fetch every week overlapping the request range and merge the days.
///
/// Days outside the range are dropped. A day with a malformed date is
/// skipped with a warning; fetch errors are returned as-is.
pub async fn collect_school_menu(
    client: &NutrisliceClient,
    request: &GenerationRequest,
    school: &School,
) -> LunchCalResult<MenuLog> {
    let mut log = MenuLog::new();

    for week_start in request.range.week_starts() {
        let week = client
            .fetch_week_menu(&request.district, &school.slug, &request.menu_type, week_start)
            .await?;

        for raw_day in &week.days {
            let day = match parse_menu_day(raw_day) {
                Ok(Some(day)) => day,
                Ok(None) => continue,
                Err(e) => {
                    warn!(school = %school.slug, %week_start, "Skipping menu day: {e}");
                    continue;
                }
            };

            if request.range.contains(day.date) {
                log.insert(day);
            }
        }
    }

    Ok(log)
}

/// Build calendars for every school in the district.
///
/// A failure to list schools always ends the run. A failure for one school
/// ends it too unless the request's policy is [`SchoolErrorPolicy::Skip`].
pub async fn generate(
    client: &NutrisliceClient,
    request: &GenerationRequest,
) -> LunchCalResult<Generation> {
    let schools = client.fetch_schools(&request.district).await?;
    info!(district = %request.district, count = schools.len(), "Fetched schools");

    let mut generation = Generation::default();

    for school in schools {
        match generate_school(client, request, &school).await {
            Ok(calendar) => generation.calendars.push(calendar),
            Err(error) => match request.on_school_error {
                SchoolErrorPolicy::Abort => return Err(error),
                SchoolErrorPolicy::Skip => {
                    warn!(school = %school.slug, "Skipping school: {error}");
                    generation.failures.push(SchoolFailure { school, error });
                }
            },
        }
    }

    Ok(generation)
}

/// Collect and serialize a single school's calendar.
pub async fn generate_school(
    client: &NutrisliceClient,
    request: &GenerationRequest,
    school: &School,
) -> LunchCalResult<SchoolCalendar> {
    let log = collect_school_menu(client, request, school).await?;
    let days = log.into_days();
    let document = ics::build_calendar(school, &days, &request.district);

    info!(school = %school.slug, events = days.len(), "Built calendar");

    Ok(SchoolCalendar {
        school: school.clone(),
        document,
        event_count: days.len(),
    })
}

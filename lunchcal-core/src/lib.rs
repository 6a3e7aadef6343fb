//! Core of lunchcal: school lunch menus in, ICS calendars out.
//!
//! - `client` fetches the school directory and weekly menus from Nutrislice
//! - `menu` normalizes raw menu days
//! - `ics` serializes menu days into calendar documents
//! - `generate` runs the whole pipeline for a district

pub mod client;
pub mod date_range;
pub mod error;
pub mod generate;
pub mod ics;
pub mod menu;
pub mod school;

pub use client::NutrisliceClient;
pub use date_range::{DateRange, week_starts};
pub use error::{LunchCalError, LunchCalResult};
pub use generate::{
    Generation, GenerationRequest, SchoolCalendar, SchoolErrorPolicy, SchoolFailure, generate,
    generate_school,
};
pub use menu::{MenuDay, MenuLog, parse_menu_day};
pub use school::School;

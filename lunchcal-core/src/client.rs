//! HTTP client for the Nutrislice menu API.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{LunchCalError, LunchCalResult};
use crate::menu::WeekMenu;
use crate::school::{RawSchool, School};

/// Deadline for each individual request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("lunchcal/", env!("CARGO_PKG_VERSION"));

/// Client for one or more districts' menu APIs.
///
/// Requests are never retried. Any transport error, non-2xx status or
/// unexpected body comes back as an error for the caller to handle.
#[derive(Debug, Clone)]
pub struct NutrisliceClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl NutrisliceClient {
    /// Client for the public API at `https://{district}.api.nutrislice.com`.
    pub fn new() -> LunchCalResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(LunchCalError::Client)?;

        Ok(NutrisliceClient {
            http,
            base_url: None,
        })
    }

    /// Send every district's requests to `base_url` instead of the public host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn api_root(&self, district: &str) -> LunchCalResult<Url> {
        let root = match &self.base_url {
            Some(base) => base.clone(),
            None => format!("https://{district}.api.nutrislice.com"),
        };
        Url::parse(&root).map_err(|e| LunchCalError::InvalidUrl(format!("{root}: {e}")))
    }

    /// Build `{root}/menu/api/{segments...}/` with each segment percent-encoded.
    fn endpoint(&self, district: &str, segments: &[&str]) -> LunchCalResult<Url> {
        let mut url = self.api_root(district)?;
        let root = url.to_string();
        url.path_segments_mut()
            .map_err(|_| LunchCalError::InvalidUrl(root))?
            .pop_if_empty()
            .extend(["menu", "api"])
            .extend(segments)
            .push("");
        Ok(url)
    }

    /// List the schools in a district's menu directory.
    pub async fn fetch_schools(&self, district: &str) -> LunchCalResult<Vec<School>> {
        let url = self.endpoint(district, &["schools"])?;
        let entries: Vec<RawSchool> = self.get_json(url).await?;

        Ok(entries.into_iter().filter_map(School::from_raw).collect())
    }

    /// Fetch the menu for the week containing `week_start`.
    pub async fn fetch_week_menu(
        &self,
        district: &str,
        school_slug: &str,
        menu_type: &str,
        week_start: NaiveDate,
    ) -> LunchCalResult<WeekMenu> {
        let year = week_start.year().to_string();
        let month = format!("{:02}", week_start.month());
        let day = format!("{:02}", week_start.day());

        let mut url = self.endpoint(
            district,
            &[
                "weeks", "school", school_slug, "menu-type", menu_type, &year, &month, &day,
            ],
        )?;
        url.query_pairs_mut().append_pair("format", "json");

        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> LunchCalResult<T> {
        debug!(%url, "GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| LunchCalError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LunchCalError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.json::<T>().await.map_err(|source| LunchCalError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

//! Configuration types for quarter-calendar

use crate::error::{Error, Result};
use crate::types::AcademicYear;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration
///
/// Designed to nest inside the host application's own configuration document
/// under a single `calendar` section.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Academic calendar source settings
    #[serde(default)]
    pub calendar: CalendarConfig,
}

impl Config {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.calendar.validate()
    }
}

/// Where and how academic calendar documents are downloaded
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Directory URL the `{label}-academic-calendar.ics` files are published under
    /// (default: "https://blink.ucsd.edu/_files/SCI-tab")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (default: 10 seconds)
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl CalendarConfig {
    /// URL of the calendar document for an academic year
    pub fn calendar_url(&self, academic_year: AcademicYear) -> String {
        format!(
            "{}/{}-academic-calendar.ics",
            self.base_url.trim_end_matches('/'),
            academic_year
        )
    }

    /// Check that the base URL is an absolute http(s) URL and the timeout is non-zero
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::config("base_url", format!("invalid base URL: {}", e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(
                "base_url",
                format!("unsupported URL scheme '{}'", url.scheme()),
            ));
        }

        if self.timeout.is_zero() {
            return Err(Error::config("timeout", "timeout must be greater than zero"));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::config("user_agent", "user agent must not be empty"));
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://blink.ucsd.edu/_files/SCI-tab".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; WebRegExport/1.0)".to_string()
}

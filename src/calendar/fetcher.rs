//! Downloading academic calendar documents

use super::document::CalendarDocument;
use crate::config::CalendarConfig;
use crate::error::{Error, Result};
use crate::types::{AcademicYear, Term};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

/// Source of decoded academic calendar documents
///
/// The quarter pipeline only talks to this trait, so production code can use
/// [`CalendarFetcher`] while tests substitute scripted sources.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Fetch and decode the calendar covering `term` of calendar year `year`
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no document exists for the academic year
    /// - [`Error::NotPublished`] if the remote served a placeholder page
    /// - [`Error::Fetch`] on transport failure, timeout or unexpected status
    /// - [`Error::Parse`] if the document cannot be decoded
    async fn fetch_calendar(&self, term: Term, year: i32) -> Result<CalendarDocument>;
}

/// Fetches calendar documents over HTTP
///
/// One GET per call, bounded by the configured timeout. No retries.
#[derive(Debug, Clone)]
pub struct CalendarFetcher {
    /// HTTP client with timeout and user agent preset
    http_client: reqwest::Client,

    /// Source location and request settings
    config: CalendarConfig,
}

impl CalendarFetcher {
    /// Create a fetcher for the given configuration
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the configuration is invalid or the HTTP
    /// client cannot be created
    pub fn new(config: CalendarConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {}", e),
                key: None,
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Download the raw calendar text for an academic year
    pub async fn fetch_text(&self, academic_year: AcademicYear) -> Result<String> {
        let url = self.config.calendar_url(academic_year);
        debug!(%url, %academic_year, "fetching academic calendar");

        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                academic_year: academic_year.to_string(),
            });
        }
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "request failed with status code {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;

        if is_html_placeholder(&body) {
            return Err(Error::NotPublished {
                academic_year: academic_year.to_string(),
            });
        }

        debug!(%academic_year, bytes = body.len(), "academic calendar downloaded");
        Ok(body)
    }
}

#[async_trait]
impl CalendarSource for CalendarFetcher {
    async fn fetch_calendar(&self, term: Term, year: i32) -> Result<CalendarDocument> {
        let body = self.fetch_text(AcademicYear::for_term(term, year)).await?;
        CalendarDocument::parse(&body)
    }
}

/// The calendar host answers unpublished years with an HTML page and 200 OK
fn is_html_placeholder(body: &str) -> bool {
    body.to_ascii_lowercase().contains("<!doctype html>")
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MINIMAL_ICS: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:begin\r\n\
DTSTART;VALUE=DATE:20250106\r\n\
SUMMARY:Instruction Begins - Winter Quarter\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    fn fetcher_for(server: &MockServer) -> CalendarFetcher {
        CalendarFetcher::new(CalendarConfig {
            base_url: format!("{}/_files/SCI-tab", server.uri()),
            timeout: Duration::from_millis(500),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetches_calendar_for_the_terms_academic_year() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/_files/SCI-tab/2024-2025-academic-calendar.ics"))
            .and(header(
                "user-agent",
                "Mozilla/5.0 (compatible; WebRegExport/1.0)",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string(MINIMAL_ICS))
            .expect(1)
            .mount(&server)
            .await;

        let doc = fetcher_for(&server)
            .fetch_calendar(Term::Winter, 2025)
            .await
            .unwrap();

        assert_eq!(doc.len(), 1);
        assert_eq!(
            doc.get("begin").unwrap().summary_text(),
            "Instruction Begins - Winter Quarter"
        );
    }

    #[tokio::test]
    async fn not_found_names_the_academic_year() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher_for(&server)
            .fetch_calendar(Term::Fall, 2031)
            .await
            .unwrap_err();

        match err {
            Error::NotFound { academic_year } => assert_eq!(academic_year, "2031-2032"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn html_placeholder_means_not_published() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<!DOCTYPE html>\n<html><body>Coming soon</body></html>"),
            )
            .mount(&server)
            .await;

        let err = fetcher_for(&server)
            .fetch_calendar(Term::Spring, 2027)
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::NotPublished { ref academic_year } if academic_year == "2026-2027"),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn server_error_is_a_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = fetcher_for(&server)
            .fetch_calendar(Term::Fall, 2024)
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::Fetch(ref msg) if msg.contains("500")),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn slow_response_times_out_as_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(MINIMAL_ICS)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = fetcher_for(&server)
            .fetch_calendar(Term::Fall, 2024)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Fetch(_)), "{err:?}");
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("garbage"))
            .mount(&server)
            .await;

        let err = fetcher_for(&server)
            .fetch_calendar(Term::Fall, 2024)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Parse(_)), "{err:?}");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = CalendarFetcher::new(CalendarConfig {
            base_url: "nope".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn html_detection_ignores_case() {
        assert!(is_html_placeholder("<!doctype html><html></html>"));
        assert!(!is_html_placeholder(MINIMAL_ICS));
    }
}

//! Common test utilities for quarter-calendar integration tests

#[allow(dead_code)]
pub mod fixtures;

pub use fixtures::*;

use quarter_calendar::{AcademicCalendar, CalendarConfig, FetchEvent, FetchObserver};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

/// Observer that keeps every event it receives
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<FetchEvent>>,
}

#[allow(dead_code)]
impl RecordingObserver {
    /// Events received so far
    pub fn events(&self) -> Vec<FetchEvent> {
        self.events.lock().expect("observer lock poisoned").clone()
    }
}

impl FetchObserver for RecordingObserver {
    fn on_event(&self, event: &FetchEvent) {
        self.events
            .lock()
            .expect("observer lock poisoned")
            .push(event.clone());
    }
}

/// Calendar configuration pointing at a mock server
#[allow(dead_code)]
pub fn config_for(server: &MockServer) -> CalendarConfig {
    CalendarConfig {
        base_url: format!("{}/_files/SCI-tab", server.uri()),
        timeout: Duration::from_secs(2),
        ..Default::default()
    }
}

/// HTTP-backed pipeline against a mock server, with a recording observer
pub fn calendar_for(server: &MockServer) -> (AcademicCalendar, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let calendar = AcademicCalendar::new(config_for(server))
        .expect("valid test config")
        .with_observer(observer.clone());
    (calendar, observer)
}

//! Click event model for asynchronous click counting.

/// A redirect that still has to be counted.
///
/// Sent from [`crate::application::services::ShortenerService::redirect`] to
/// [`crate::domain::click_worker::run_click_worker`] over a bounded channel so the
/// redirect response never waits on the counter update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let event = ClickEvent::new("abc123");
        assert_eq!(event.code, "abc123");
    }

    #[test]
    fn test_click_event_clone() {
        let event = ClickEvent::new(String::from("Zq9Xw1"));
        let cloned = event.clone();

        assert_eq!(cloned, event);
    }
}

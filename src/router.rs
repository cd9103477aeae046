use std::sync::Mutex;

use anyhow::Result;

/// One recorded navigation, in the order the code under test issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Push(String),
    Replace(String),
    Prefetch(String),
    Back,
    Forward,
    Refresh,
}

/// Client-side navigation seam.
///
/// Navigation methods return `Result` so a real implementation can fail;
/// the recording double never does.
pub trait Router: Send + Sync {
    /// Navigates to `url`, adding a history entry.
    fn push(&self, url: &str) -> Result<()>;

    /// Navigates to `url`, replacing the current history entry.
    fn replace(&self, url: &str) -> Result<()>;

    /// Hints that `url` is likely to be visited next.
    fn prefetch(&self, url: &str) -> Result<()>;

    /// Goes back one history entry.
    fn back(&self) -> Result<()>;

    /// Goes forward one history entry.
    fn forward(&self) -> Result<()>;

    /// Re-renders the current location.
    fn refresh(&self) -> Result<()>;

    /// Pathname of the current location.
    fn pathname(&self) -> String;

    /// Decoded query pairs of the current location.
    fn search_params(&self) -> Vec<(String, String)>;
}

struct Location {
    pathname: String,
    query: String,
}

/// Recording router double.
///
/// Navigations are record-only: they never move the reported location, so
/// assertions against `pathname()` stay unambiguous no matter what the code
/// under test did. Tests that need a different starting point seed it with
/// [`with_location`](StubRouter::with_location) or reposition with
/// [`set_location`](StubRouter::set_location).
pub struct StubRouter {
    location: Mutex<Location>,
    events: Mutex<Vec<NavigationEvent>>,
}

impl StubRouter {
    /// Positioned at `/` with an empty query.
    pub fn new() -> Self {
        Self::with_location("/", "")
    }

    /// Positioned at `pathname` with the given query string. A leading `?`
    /// is tolerated and stripped.
    pub fn with_location(pathname: &str, query: &str) -> Self {
        Self {
            location: Mutex::new(Location {
                pathname: pathname.to_string(),
                query: query.strip_prefix('?').unwrap_or(query).to_string(),
            }),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Repositions the reported location. A leading `?` on `query` is
    /// tolerated and stripped.
    pub fn set_location(&self, pathname: &str, query: &str) {
        let mut location = self.location.lock().unwrap();
        location.pathname = pathname.to_string();
        location.query = query.strip_prefix('?').unwrap_or(query).to_string();
    }

    /// Every recorded navigation, in issue order.
    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: NavigationEvent) -> Result<()> {
        log::debug!("router: {:?}", event);
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

impl Default for StubRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for StubRouter {
    fn push(&self, url: &str) -> Result<()> {
        self.record(NavigationEvent::Push(url.to_string()))
    }

    fn replace(&self, url: &str) -> Result<()> {
        self.record(NavigationEvent::Replace(url.to_string()))
    }

    fn prefetch(&self, url: &str) -> Result<()> {
        self.record(NavigationEvent::Prefetch(url.to_string()))
    }

    fn back(&self) -> Result<()> {
        self.record(NavigationEvent::Back)
    }

    fn forward(&self) -> Result<()> {
        self.record(NavigationEvent::Forward)
    }

    fn refresh(&self) -> Result<()> {
        self.record(NavigationEvent::Refresh)
    }

    fn pathname(&self) -> String {
        self.location.lock().unwrap().pathname.clone()
    }

    fn search_params(&self) -> Vec<(String, String)> {
        let query = self.location.lock().unwrap().query.clone();
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_navigations_in_order() {
        let router = StubRouter::new();
        router.push("/cart").unwrap();
        router.replace("/checkout").unwrap();
        router.back().unwrap();
        router.refresh().unwrap();

        assert_eq!(
            router.events(),
            vec![
                NavigationEvent::Push("/cart".to_string()),
                NavigationEvent::Replace("/checkout".to_string()),
                NavigationEvent::Back,
                NavigationEvent::Refresh,
            ]
        );
    }

    #[test]
    fn navigations_never_move_the_location() {
        let router = StubRouter::new();
        router.push("/somewhere/else").unwrap();

        assert_eq!(router.pathname(), "/");
        assert!(router.search_params().is_empty());
    }

    #[test]
    fn seeded_location_is_reported_and_parsed() {
        let router = StubRouter::with_location("/search", "q=rust+book&page=2");

        assert_eq!(router.pathname(), "/search");
        assert_eq!(
            router.search_params(),
            vec![
                ("q".to_string(), "rust book".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn set_location_repositions_and_strips_the_question_mark() {
        let router = StubRouter::new();
        router.set_location("/orders", "?status=open");

        assert_eq!(router.pathname(), "/orders");
        assert_eq!(
            router.search_params(),
            vec![("status".to_string(), "open".to_string())]
        );
    }

    #[test]
    fn prefetch_and_forward_are_recorded_too() {
        let router = StubRouter::new();
        router.prefetch("/next").unwrap();
        router.forward().unwrap();

        assert_eq!(
            router.events(),
            vec![
                NavigationEvent::Prefetch("/next".to_string()),
                NavigationEvent::Forward,
            ]
        );
    }
}

//! Interfaces the feed container consumes, plus in-memory implementations
//! used by the desktop shell and tests.

use crate::constants::{HOME_ROUTE, WELCOME_QUERY_PARAM};
use crate::error::{FeedError, Result};
use crate::types::{ActionKind, AnalyticsEvent, Density, SearchVariant};
use reqwest::Url;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Read-only view of the user's feed settings for one render
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsSnapshot {
    pub density: Density,
    pub list_mode_preferred: bool,
    pub loaded: bool,
    pub num_cards_by_density: HashMap<Density, u8>,
}

impl SettingsSnapshot {
    /// Snapshot reported before the settings store has finished loading
    pub fn not_loaded() -> Self {
        Self {
            density: Density::Eco,
            list_mode_preferred: false,
            loaded: false,
            num_cards_by_density: HashMap::new(),
        }
    }

    /// Cards per row for the active density. Missing entries use one card.
    pub fn num_cards(&self) -> u8 {
        self.num_cards_by_density
            .get(&self.density)
            .copied()
            .unwrap_or(1)
    }
}

pub trait SettingsStore {
    fn snapshot(&self) -> SettingsSnapshot;
}

/// Current route: path plus query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    pub path: String,
    pub query: HashMap<String, String>,
}

impl RouteContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: HashMap::new(),
        }
    }

    /// Parse a location such as `/posts/finder?welcome=true`. Anything
    /// unparsable lands on the home route.
    pub fn parse(location: &str) -> Self {
        let url = Url::parse("http://localhost/").and_then(|base| base.join(location));
        match url {
            Ok(url) => Self {
                path: url.path().to_string(),
                query: url.query_pairs().into_owned().collect(),
            },
            Err(e) => {
                warn!(location, error = %e, "Invalid route, using home");
                Self::new(HOME_ROUTE)
            }
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// True when the query parameter is literally `"true"`
    pub fn query_flag(&self, name: &str) -> bool {
        self.query.get(name).is_some_and(|v| v == "true")
    }

    pub fn is_welcome(&self) -> bool {
        self.query_flag(WELCOME_QUERY_PARAM)
    }
}

pub trait ExperimentFlags {
    fn search_variant(&self) -> SearchVariant;
    fn feed_layout_v1(&self) -> bool;
}

/// Flags fixed at startup from the settings file
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFlags {
    pub search: SearchVariant,
    pub feed_layout_v1: bool,
}

impl ExperimentFlags for StaticFlags {
    fn search_variant(&self) -> SearchVariant {
        self.search
    }

    fn feed_layout_v1(&self) -> bool {
        self.feed_layout_v1
    }
}

pub trait ActionTracker {
    fn has_completed(&self, kind: ActionKind) -> Result<bool>;
    fn complete(&self, kind: ActionKind) -> Result<()>;
}

/// Session-local action log
#[derive(Debug)]
pub struct MemoryActions {
    completed: RefCell<HashSet<ActionKind>>,
    available: Cell<bool>,
}

impl MemoryActions {
    pub fn new() -> Self {
        Self {
            completed: RefCell::new(HashSet::new()),
            available: Cell::new(true),
        }
    }

    pub fn with_completed(kinds: &[ActionKind]) -> Self {
        let actions = Self::new();
        actions.completed.borrow_mut().extend(kinds.iter().copied());
        actions
    }

    /// Simulate the backing service going away (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    fn check_available(&self) -> Result<()> {
        if self.available.get() {
            Ok(())
        } else {
            Err(FeedError::ActionsUnavailable("action log offline".into()))
        }
    }
}

impl Default for MemoryActions {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionTracker for MemoryActions {
    fn has_completed(&self, kind: ActionKind) -> Result<bool> {
        self.check_available()?;
        Ok(self.completed.borrow().contains(&kind))
    }

    fn complete(&self, kind: ActionKind) -> Result<()> {
        self.check_available()?;
        self.completed.borrow_mut().insert(kind);
        Ok(())
    }
}

pub trait Analytics {
    /// Fire-and-forget; callers log and drop the error
    fn track(&self, event: AnalyticsEvent) -> Result<()>;
}

/// Analytics sink that writes events to the log
#[derive(Debug, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) -> Result<()> {
        info!(event = event.name(), "Analytics event");
        Ok(())
    }
}

/// Analytics sink that keeps every event, for assertions
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: RefCell<Vec<AnalyticsEvent>>,
    failing: Cell<bool>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: AnalyticsEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: AnalyticsEvent) -> Result<()> {
        if self.failing.get() {
            return Err(FeedError::Analytics("sink rejected event".into()));
        }
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_cards_reads_active_density() {
        let snapshot = SettingsSnapshot {
            density: Density::Roomy,
            list_mode_preferred: false,
            loaded: true,
            num_cards_by_density: HashMap::from([(Density::Eco, 4), (Density::Roomy, 3)]),
        };
        assert_eq!(snapshot.num_cards(), 3);
        assert_eq!(SettingsSnapshot::not_loaded().num_cards(), 1);
    }

    #[test]
    fn welcome_flag_requires_literal_true() {
        assert!(RouteContext::new("/").with_query("welcome", "true").is_welcome());
        assert!(!RouteContext::new("/").with_query("welcome", "1").is_welcome());
        assert!(!RouteContext::new("/").is_welcome());
    }

    #[test]
    fn parse_splits_path_and_query() {
        let route = RouteContext::parse("/posts/finder?welcome=true&tab=top");
        assert_eq!(route.path, "/posts/finder");
        assert!(route.is_welcome());
        assert_eq!(route.query.get("tab").map(String::as_str), Some("top"));
        assert_eq!(RouteContext::parse("").path, "/");
    }

    #[test]
    fn unavailable_tracker_errors() {
        let actions = MemoryActions::new();
        actions.complete(ActionKind::AcceptedSearch).unwrap();
        actions.set_available(false);
        assert!(actions.has_completed(ActionKind::AcceptedSearch).is_err());
        assert!(actions.complete(ActionKind::UsedSearch).is_err());
        actions.set_available(true);
        assert!(actions.has_completed(ActionKind::AcceptedSearch).unwrap());
        assert!(!actions.has_completed(ActionKind::UsedSearch).unwrap());
    }
}

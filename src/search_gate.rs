//! Search experiment gate and the one-time highlight pulse

use crate::collaborators::{ActionTracker, Analytics, ExperimentFlags, RouteContext};
use crate::constants::FINDER_ROUTE;
use crate::error::Result;
use crate::types::{ActionKind, AnalyticsEvent, SearchVariant};
use reqwest::Url;
use tracing::{debug, warn};

/// Whether the inline search bar belongs on this page
pub fn evaluate(route_path: &str, show_search_requested: bool, variant: SearchVariant) -> bool {
    show_search_requested && variant == SearchVariant::V1 && route_path != FINDER_ROUTE
}

/// Users who accepted search but never used it get the highlight
pub fn should_pulse(accepted_search: bool, used_search: bool) -> bool {
    accepted_search && !used_search
}

fn pulse_wanted(actions: &dyn ActionTracker) -> Result<bool> {
    let accepted = actions.has_completed(ActionKind::AcceptedSearch)?;
    let used = actions.has_completed(ActionKind::UsedSearch)?;
    Ok(should_pulse(accepted, used))
}

/// Whether the highlight analytics event has gone out this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PulseState {
    #[default]
    NotFired,
    Fired,
}

impl PulseState {
    /// Take the NotFired -> Fired transition. Returns false if already fired.
    pub fn fire(&mut self) -> bool {
        match self {
            PulseState::NotFired => {
                *self = PulseState::Fired;
                true
            }
            PulseState::Fired => false,
        }
    }

    pub fn has_fired(self) -> bool {
        self == PulseState::Fired
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchGateState {
    pub enabled: bool,
    /// Only ever true while `enabled`
    pub show_pulse: bool,
    pub pulse_fired: bool,
}

/// Per-container gate. Dropping it (remounting the container) resets the pulse.
#[derive(Debug, Default)]
pub struct SearchGate {
    pulse: PulseState,
}

impl SearchGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulse_state(&self) -> PulseState {
        self.pulse
    }

    /// Evaluate the gate for one render and run the pulse side effect
    pub fn evaluate(
        &mut self,
        route: &RouteContext,
        show_search_requested: bool,
        flags: &dyn ExperimentFlags,
        actions: &dyn ActionTracker,
        analytics: &dyn Analytics,
    ) -> SearchGateState {
        let pulse = match pulse_wanted(actions) {
            Ok(pulse) => pulse,
            Err(e) => {
                warn!(error = %e, "Action tracker unavailable, search gate disabled");
                return SearchGateState {
                    enabled: false,
                    show_pulse: false,
                    pulse_fired: self.pulse.has_fired(),
                };
            }
        };

        let enabled = evaluate(&route.path, show_search_requested, flags.search_variant());

        if pulse && self.pulse.fire() {
            debug!("Search highlight pulse fired");
            if let Err(e) = analytics.track(AnalyticsEvent::SearchHighlightAnimation) {
                warn!(error = %e, "Failed to track search highlight");
            }
        }

        SearchGateState {
            enabled,
            show_pulse: enabled && pulse,
            pulse_fired: self.pulse.has_fired(),
        }
    }

    /// Focus on the search input counts as using search while the pulse is up
    pub fn on_search_focus(&self, actions: &dyn ActionTracker) {
        match pulse_wanted(actions) {
            Ok(true) => {
                if let Err(e) = actions.complete(ActionKind::UsedSearch) {
                    warn!(error = %e, "Failed to record search usage");
                } else {
                    debug!("Recorded search usage");
                }
            }
            Ok(false) => {}
            Err(e) => warn!(error = %e, "Action tracker unavailable on search focus"),
        }
    }
}

/// URL the app navigates to when a search is submitted
pub fn search_url(webapp_url: &str, query: &str) -> Option<Url> {
    let base = Url::parse(webapp_url).ok()?;
    let mut url = base.join("search").ok()?;
    url.query_pairs_mut().append_pair("q", query);
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MemoryActions, RecordingAnalytics, StaticFlags};

    fn v1() -> StaticFlags {
        StaticFlags {
            search: SearchVariant::V1,
            feed_layout_v1: false,
        }
    }

    #[test]
    fn gate_requires_request_variant_and_route() {
        assert!(evaluate("/", true, SearchVariant::V1));
        assert!(!evaluate("/", false, SearchVariant::V1));
        assert!(!evaluate("/", true, SearchVariant::Control));
        assert!(!evaluate(FINDER_ROUTE, true, SearchVariant::V1));
    }

    #[test]
    fn pulse_truth_table() {
        assert!(should_pulse(true, false));
        assert!(!should_pulse(true, true));
        assert!(!should_pulse(false, false));
        assert!(!should_pulse(false, true));
    }

    #[test]
    fn pulse_state_fires_once() {
        let mut state = PulseState::default();
        assert!(state.fire());
        assert!(!state.fire());
        assert!(state.has_fired());
    }

    #[test]
    fn repeated_evaluations_track_once() {
        let actions = MemoryActions::with_completed(&[ActionKind::AcceptedSearch]);
        let analytics = RecordingAnalytics::new();
        let route = RouteContext::new("/");
        let mut gate = SearchGate::new();

        for _ in 0..10 {
            let state = gate.evaluate(&route, true, &v1(), &actions, &analytics);
            assert!(state.enabled);
            assert!(state.show_pulse);
            assert!(state.pulse_fired);
        }
        assert_eq!(analytics.count(AnalyticsEvent::SearchHighlightAnimation), 1);
    }

    #[test]
    fn focus_records_usage_and_clears_pulse() {
        let actions = MemoryActions::with_completed(&[ActionKind::AcceptedSearch]);
        let analytics = RecordingAnalytics::new();
        let route = RouteContext::new("/");
        let mut gate = SearchGate::new();

        assert!(gate.evaluate(&route, true, &v1(), &actions, &analytics).show_pulse);
        gate.on_search_focus(&actions);
        assert!(actions.has_completed(ActionKind::UsedSearch).unwrap());

        let state = gate.evaluate(&route, true, &v1(), &actions, &analytics);
        assert!(!state.show_pulse);
        assert!(state.pulse_fired);
    }

    #[test]
    fn focus_without_pulse_records_nothing() {
        let actions = MemoryActions::new();
        SearchGate::new().on_search_focus(&actions);
        assert!(!actions.has_completed(ActionKind::UsedSearch).unwrap());
    }

    #[test]
    fn finder_route_disables_gate() {
        let actions = MemoryActions::new();
        let analytics = RecordingAnalytics::new();
        let route = RouteContext::new(FINDER_ROUTE);
        let state = SearchGate::new().evaluate(&route, true, &v1(), &actions, &analytics);
        assert!(!state.enabled);
        assert!(!state.show_pulse);
    }

    #[test]
    fn unavailable_tracker_disables_everything() {
        let actions = MemoryActions::with_completed(&[ActionKind::AcceptedSearch]);
        actions.set_available(false);
        let analytics = RecordingAnalytics::new();
        let mut gate = SearchGate::new();

        let state = gate.evaluate(&RouteContext::new("/"), true, &v1(), &actions, &analytics);
        assert_eq!(state, SearchGateState::default());
        assert!(analytics.events().is_empty());

        gate.on_search_focus(&actions);
    }

    #[test]
    fn analytics_failure_is_swallowed_and_not_retried() {
        let actions = MemoryActions::with_completed(&[ActionKind::AcceptedSearch]);
        let analytics = RecordingAnalytics::new();
        analytics.set_failing(true);
        let mut gate = SearchGate::new();
        let route = RouteContext::new("/");

        let state = gate.evaluate(&route, true, &v1(), &actions, &analytics);
        assert!(state.pulse_fired);

        analytics.set_failing(false);
        gate.evaluate(&route, true, &v1(), &actions, &analytics);
        assert!(analytics.events().is_empty());
    }

    #[test]
    fn pulse_hidden_while_disabled() {
        let actions = MemoryActions::with_completed(&[ActionKind::AcceptedSearch]);
        let analytics = RecordingAnalytics::new();
        let state = SearchGate::new().evaluate(
            &RouteContext::new("/"),
            true,
            &StaticFlags::default(),
            &actions,
            &analytics,
        );
        assert!(!state.enabled);
        assert!(!state.show_pulse);
    }

    #[test]
    fn search_url_encodes_query() {
        let url = search_url("https://app.daily.dev/", "rust & wasm").unwrap();
        assert_eq!(url.as_str(), "https://app.daily.dev/search?q=rust+%26+wasm");
        assert!(search_url("not a url", "x").is_none());
    }
}

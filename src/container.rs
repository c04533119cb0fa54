//! Feed container: the structural wrapper around feed items
//!
//! `render` is a pure composition of a resolved layout and a search gate
//! state into an element tree. `FeedContainer` is the stateful part: it owns
//! the gate's pulse and the suggestions request for one mounted container.

use crate::collaborators::{
    ActionTracker, Analytics, ExperimentFlags, RouteContext, SettingsSnapshot, SettingsStore,
};
use crate::layout::{self, GapClass, LayoutConfig, LayoutInputs, StyleHints};
use crate::search_gate::{SearchGate, SearchGateState};
use crate::suggestions::{SearchSuggestions, SuggestionsHandle};
use crate::types::{AriaLive, Origin, ToastSubject, ViewportClass};
use tracing::debug;

pub const FEED_TEST_ID: &str = "posts-feed";

#[derive(Debug, Clone, PartialEq)]
pub enum Region<T> {
    Container { centered: bool },
    ScrollToTop,
    Feed { style: StyleHints },
    Header(T),
    Cards {
        max_width_rem: Option<f32>,
        /// Grid mode styling
        cards: bool,
        aria_live: AriaLive,
        test_id: &'static str,
    },
    FeedReady,
    SearchRow,
    SearchBar { pulse: bool },
    BesideSearch(T),
    SuggestionRow,
    /// Not shown on viewports narrower than `hidden_below`
    SuggestionList { hidden_below: ViewportClass },
    ActionButtons(T),
    Grid {
        columns: u8,
        gap: GapClass,
        /// Extra spacing below the search rows
        top_margin: bool,
    },
    Item(T),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element<T> {
    pub region: Region<T>,
    pub children: Vec<Element<T>>,
}

impl<T> Element<T> {
    pub fn new(region: Region<T>) -> Self {
        Self {
            region,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: Element<T>) -> Self {
        self.children.push(child);
        self
    }

    pub fn child_opt(mut self, child: Option<Element<T>>) -> Self {
        self.children.extend(child);
        self
    }

    /// Depth-first, parent before children
    pub fn walk(&self) -> Vec<&Element<T>> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }

    pub fn find(&self, pred: impl Fn(&Region<T>) -> bool) -> Option<&Element<T>> {
        self.walk().into_iter().find(|e| pred(&e.region))
    }

    pub fn count(&self, pred: impl Fn(&Region<T>) -> bool) -> usize {
        self.walk().into_iter().filter(|e| pred(&e.region)).count()
    }
}

pub struct FeedContainerProps<T> {
    pub children: Vec<T>,
    pub header: Option<T>,
    pub inline_header: bool,
    pub show_search: bool,
    pub force_card_mode: bool,
    pub beside_search: Option<T>,
    pub action_buttons: Option<T>,
}

impl<T> Default for FeedContainerProps<T> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            header: None,
            inline_header: false,
            show_search: false,
            force_card_mode: false,
            beside_search: None,
            action_buttons: None,
        }
    }
}

/// Everything `render` reads besides the props
pub struct RenderContext<'a> {
    pub settings: &'a SettingsSnapshot,
    pub layout: LayoutConfig,
    pub search: SearchGateState,
    pub route: &'a RouteContext,
    pub viewport: ViewportClass,
    pub toast: Option<ToastSubject>,
}

fn search_rows<T>(
    pulse: bool,
    beside_search: Option<T>,
    action_buttons: Option<T>,
) -> [Element<T>; 2] {
    let search_row = Element::new(Region::SearchRow)
        .child(Element::new(Region::SearchBar { pulse }))
        .child_opt(beside_search.map(|b| Element::new(Region::BesideSearch(b))));

    let suggestion_row = Element::new(Region::SuggestionRow)
        .child(Element::new(Region::SuggestionList {
            hidden_below: ViewportClass::Tablet,
        }))
        .child_opt(action_buttons.map(|a| Element::new(Region::ActionButtons(a))));

    [search_row, suggestion_row]
}

/// Compose the container tree. `None` until settings have loaded.
pub fn render<T>(props: FeedContainerProps<T>, ctx: &RenderContext<'_>) -> Option<Element<T>> {
    if !ctx.settings.loaded {
        return None;
    }

    let FeedContainerProps {
        children,
        header,
        inline_header,
        beside_search,
        action_buttons,
        ..
    } = props;
    let (outer_header, inline) = if inline_header {
        (None, header)
    } else {
        (header, None)
    };
    let enabled = ctx.search.enabled;

    let aria_live = match ctx.toast {
        Some(ToastSubject::Feed) => AriaLive::Assertive,
        _ => AriaLive::Off,
    };

    let mut cards = Element::new(Region::Cards {
        max_width_rem: ctx.layout.max_width_rem,
        cards: !ctx.layout.is_list(),
        aria_live,
        test_id: FEED_TEST_ID,
    })
    .child_opt(ctx.route.is_welcome().then(|| Element::new(Region::FeedReady)))
    .child_opt(inline.map(|h| Element::new(Region::Header(h))));

    if enabled {
        let [search_row, suggestion_row] =
            search_rows(ctx.search.show_pulse, beside_search, action_buttons);
        cards = cards.child(search_row).child(suggestion_row);
    }

    let mut grid = Element::new(Region::Grid {
        columns: ctx.layout.columns,
        gap: ctx.layout.gap,
        top_margin: enabled,
    });
    grid.children = children
        .into_iter()
        .map(|c| Element::new(Region::Item(c)))
        .collect();
    cards = cards.child(grid);

    let feed = Element::new(Region::Feed {
        style: ctx.layout.style_hints(ctx.settings.num_cards()),
    })
    .child_opt(outer_header.map(|h| Element::new(Region::Header(h))))
    .child(cards);

    Some(
        Element::new(Region::Container {
            centered: ctx.viewport >= ViewportClass::LaptopL,
        })
        .child(Element::new(Region::ScrollToTop))
        .child(feed),
    )
}

/// Collaborators a mounted container reads on every frame
pub struct Collaborators<'a> {
    pub settings: &'a dyn SettingsStore,
    pub route: &'a RouteContext,
    pub flags: &'a dyn ExperimentFlags,
    pub actions: &'a dyn ActionTracker,
    pub analytics: &'a dyn Analytics,
    pub suggestions: &'a dyn SearchSuggestions,
}

/// One mounted feed container. Dropping it cancels any in-flight
/// suggestions request and forgets the pulse.
#[derive(Default)]
pub struct FeedContainer {
    gate: SearchGate,
    suggestions: Option<SuggestionsHandle>,
    /// Whether the live handle was requested enabled
    suggestions_enabled: Option<bool>,
}

impl FeedContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate(&self) -> &SearchGate {
        &self.gate
    }

    pub fn suggestions(&self) -> Option<&SuggestionsHandle> {
        self.suggestions.as_ref()
    }

    fn sync_suggestions(&mut self, enabled: bool, provider: &dyn SearchSuggestions) {
        if self.suggestions_enabled == Some(enabled) {
            return;
        }
        debug!(enabled, "Search suggestions toggled");
        // Replacing the old handle drops it, which cancels its request
        self.suggestions = Some(provider.suggestions(Origin::HomePage, !enabled));
        self.suggestions_enabled = Some(enabled);
    }

    /// Run one render pass: resolve layout, evaluate the gate, keep the
    /// suggestions request in step, and compose the tree
    pub fn render<T>(
        &mut self,
        props: FeedContainerProps<T>,
        env: &Collaborators<'_>,
        viewport: ViewportClass,
        toast: Option<ToastSubject>,
    ) -> Option<Element<T>> {
        let settings = env.settings.snapshot();
        let num_cards = settings.num_cards();
        let layout = layout::resolve(&LayoutInputs {
            density: settings.density,
            list_mode_preferred: settings.list_mode_preferred,
            force_card_mode: props.force_card_mode,
            num_cards,
            layout_v1: env.flags.feed_layout_v1(),
        });

        let search = self.gate.evaluate(
            env.route,
            props.show_search,
            env.flags,
            env.actions,
            env.analytics,
        );
        self.sync_suggestions(search.enabled, env.suggestions);

        render(
            props,
            &RenderContext {
                settings: &settings,
                layout,
                search,
                route: env.route,
                viewport,
                toast,
            },
        )
    }

    pub fn on_search_focus(&self, actions: &dyn ActionTracker) {
        self.gate.on_search_focus(actions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Density, LayoutMode};
    use std::collections::HashMap;

    fn snapshot(loaded: bool) -> SettingsSnapshot {
        SettingsSnapshot {
            density: Density::Cozy,
            list_mode_preferred: false,
            loaded,
            num_cards_by_density: HashMap::from([(Density::Cozy, 3)]),
        }
    }

    fn grid_layout() -> LayoutConfig {
        LayoutConfig {
            mode: LayoutMode::Grid,
            columns: 3,
            gap: GapClass::Gap14,
            max_width_rem: None,
        }
    }

    fn props(n: usize) -> FeedContainerProps<&'static str> {
        FeedContainerProps {
            children: vec!["post"; n],
            header: Some("header"),
            beside_search: Some("beside"),
            action_buttons: Some("actions"),
            show_search: true,
            ..FeedContainerProps::default()
        }
    }

    fn enabled_gate() -> SearchGateState {
        SearchGateState {
            enabled: true,
            show_pulse: true,
            pulse_fired: true,
        }
    }

    #[test]
    fn unloaded_settings_render_nothing() {
        let settings = snapshot(false);
        let route = RouteContext::new("/").with_query("welcome", "true");
        let ctx = RenderContext {
            settings: &settings,
            layout: grid_layout(),
            search: enabled_gate(),
            route: &route,
            viewport: ViewportClass::LaptopL,
            toast: Some(ToastSubject::Feed),
        };
        assert!(render(props(5), &ctx).is_none());
    }

    #[test]
    fn children_land_in_grid() {
        let settings = snapshot(true);
        let route = RouteContext::new("/");
        let ctx = RenderContext {
            settings: &settings,
            layout: grid_layout(),
            search: SearchGateState::default(),
            route: &route,
            viewport: ViewportClass::Laptop,
            toast: None,
        };
        let tree = render(props(40), &ctx).unwrap();
        let grid = tree.find(|r| matches!(r, Region::Grid { .. })).unwrap();
        assert_eq!(grid.children.len(), 40);
        assert_eq!(
            grid.region,
            Region::Grid {
                columns: 3,
                gap: GapClass::Gap14,
                top_margin: false,
            }
        );
        let feed = tree.find(|r| matches!(r, Region::Feed { .. })).unwrap();
        assert_eq!(
            feed.region,
            Region::Feed {
                style: StyleHints {
                    num_cards: 3,
                    feed_gap_rem: 3.5,
                    max_width_rem: None,
                }
            }
        );
    }

    #[test]
    fn disabled_gate_omits_search_and_actions() {
        let settings = snapshot(true);
        let route = RouteContext::new("/");
        let ctx = RenderContext {
            settings: &settings,
            layout: grid_layout(),
            search: SearchGateState::default(),
            route: &route,
            viewport: ViewportClass::LaptopL,
            toast: None,
        };
        let tree = render(props(2), &ctx).unwrap();
        assert_eq!(tree.count(|r| matches!(r, Region::SearchBar { .. })), 0);
        assert_eq!(tree.count(|r| matches!(r, Region::SuggestionList { .. })), 0);
        assert_eq!(tree.count(|r| matches!(r, Region::ActionButtons(_))), 0);
        assert_eq!(tree.count(|r| matches!(r, Region::BesideSearch(_))), 0);
    }

    #[test]
    fn enabled_gate_renders_search_rows() {
        let settings = snapshot(true);
        let route = RouteContext::new("/");
        let ctx = RenderContext {
            settings: &settings,
            layout: grid_layout(),
            search: enabled_gate(),
            route: &route,
            viewport: ViewportClass::Mobile,
            toast: None,
        };
        let tree = render(props(2), &ctx).unwrap();
        assert!(tree.find(|r| *r == Region::SearchBar { pulse: true }).is_some());
        assert!(tree
            .find(|r| {
                *r == Region::SuggestionList {
                    hidden_below: ViewportClass::Tablet,
                }
            })
            .is_some());
        assert!(tree.find(|r| *r == Region::ActionButtons("actions")).is_some());
        assert!(tree.find(|r| *r == Region::BesideSearch("beside")).is_some());
        let grid = tree.find(|r| matches!(r, Region::Grid { .. })).unwrap();
        assert!(matches!(grid.region, Region::Grid { top_margin: true, .. }));
    }

    #[test]
    fn header_placement_follows_inline_flag() {
        let settings = snapshot(true);
        let route = RouteContext::new("/").with_query("welcome", "true");
        let ctx = RenderContext {
            settings: &settings,
            layout: grid_layout(),
            search: SearchGateState::default(),
            route: &route,
            viewport: ViewportClass::Laptop,
            toast: Some(ToastSubject::Feed),
        };

        let tree = render(props(1), &ctx).unwrap();
        let feed = &tree.children[1];
        assert_eq!(feed.children[0].region, Region::Header("header"));

        let inline = FeedContainerProps {
            inline_header: true,
            ..props(1)
        };
        let tree = render(inline, &ctx).unwrap();
        let cards = tree.find(|r| matches!(r, Region::Cards { .. })).unwrap();
        assert_eq!(cards.children[0].region, Region::FeedReady);
        assert_eq!(cards.children[1].region, Region::Header("header"));
        assert!(matches!(
            cards.region,
            Region::Cards {
                aria_live: AriaLive::Assertive,
                test_id: FEED_TEST_ID,
                cards: true,
                ..
            }
        ));
    }

    #[test]
    fn other_toasts_keep_feed_quiet() {
        let settings = snapshot(true);
        let route = RouteContext::new("/");
        for toast in [None, Some(ToastSubject::Other)] {
            let ctx = RenderContext {
                settings: &settings,
                layout: grid_layout(),
                search: SearchGateState::default(),
                route: &route,
                viewport: ViewportClass::Laptop,
                toast,
            };
            let tree = render(props(1), &ctx).unwrap();
            let cards = tree.find(|r| matches!(r, Region::Cards { .. })).unwrap();
            assert!(matches!(
                cards.region,
                Region::Cards {
                    aria_live: AriaLive::Off,
                    ..
                }
            ));
        }
    }

    #[test]
    fn feed_ready_needs_literal_welcome_flag() {
        let settings = snapshot(true);
        let routes = [
            RouteContext::new("/"),
            RouteContext::new("/").with_query("welcome", "false"),
            RouteContext::new("/").with_query("welcome", "1"),
            RouteContext::new("/").with_query("welcome", ""),
        ];
        for route in &routes {
            let ctx = RenderContext {
                settings: &settings,
                layout: grid_layout(),
                search: SearchGateState::default(),
                route,
                viewport: ViewportClass::Laptop,
                toast: None,
            };
            let tree = render(props(1), &ctx).unwrap();
            assert_eq!(tree.count(|r| *r == Region::FeedReady), 0);
        }
    }
}

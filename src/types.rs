//! Common types and data structures

use serde::{Deserialize, Serialize};

/// How tightly feed items are packed ("spaciness")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Eco,
    Cozy,
    Roomy,
}

impl Density {
    pub const ALL: [Density; 3] = [Density::Eco, Density::Cozy, Density::Roomy];

    pub fn label(self) -> &'static str {
        match self {
            Density::Eco => "Eco",
            Density::Cozy => "Cozy",
            Density::Roomy => "Roomy",
        }
    }
}

/// Single-column list vs. multi-column card grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    List,
    Grid,
}

/// Viewport width class, ordered from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ViewportClass {
    Mobile,
    Tablet,
    Laptop,
    LaptopL,
}

impl ViewportClass {
    pub const TABLET_MIN: f32 = 656.0;
    pub const LAPTOP_MIN: f32 = 1020.0;
    pub const LAPTOP_L_MIN: f32 = 1440.0;

    /// Classify an available width in logical pixels
    pub fn from_width(width: f32) -> Self {
        if width >= Self::LAPTOP_L_MIN {
            ViewportClass::LaptopL
        } else if width >= Self::LAPTOP_MIN {
            ViewportClass::Laptop
        } else if width >= Self::TABLET_MIN {
            ViewportClass::Tablet
        } else {
            ViewportClass::Mobile
        }
    }
}

/// Variant of the "search" A/B experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchVariant {
    #[default]
    Control,
    V1,
}

/// Onboarding actions tracked per user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    AcceptedSearch,
    UsedSearch,
}

/// Analytics events emitted by the feed container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEvent {
    SearchHighlightAnimation,
}

impl AnalyticsEvent {
    pub fn name(self) -> &'static str {
        match self {
            AnalyticsEvent::SearchHighlightAnimation => "search highlight animation",
        }
    }
}

/// Where a search suggestion request originates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    HomePage,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::HomePage => "home page",
        }
    }
}

/// Subject of the toast currently on screen, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastSubject {
    Feed,
    Other,
}

/// Screen-reader announcement politeness for the cards region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaLive {
    Assertive,
    Off,
}

/// Single search suggestion entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    pub title: String,
}

/// Response body of the suggestions endpoint
#[derive(Debug, Deserialize)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub hits: Vec<Suggestion>,
}

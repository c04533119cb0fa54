//! Feed layout resolution
//!
//! Turns a settings snapshot into the grid/list parameters applied to the
//! feed wrapper. Everything here is pure: the same inputs always give the
//! same `LayoutConfig`.

use crate::constants::{MAX_COLUMNS, ROOT_FONT_PX};
use crate::types::{Density, LayoutMode};
use tracing::warn;

/// Max-width tier for list mode at Roomy density
pub const TIGHT_MAX_WIDTH_REM: f32 = 48.75;
/// Max-width tier for list mode at Cozy density
pub const WIDE_MAX_WIDTH_REM: f32 = 63.75;

/// Discrete gap vocabulary shared by list and grid modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapClass {
    Gap2,
    Gap3,
    Gap5,
    Gap8,
    Gap12,
    Gap14,
}

impl GapClass {
    pub fn px(self) -> f32 {
        match self {
            GapClass::Gap2 => 8.0,
            GapClass::Gap3 => 12.0,
            GapClass::Gap5 => 20.0,
            GapClass::Gap8 => 32.0,
            GapClass::Gap12 => 48.0,
            GapClass::Gap14 => 56.0,
        }
    }

    pub fn rem(self) -> f32 {
        self.px() / ROOT_FONT_PX
    }
}

/// Inputs to [`resolve`], taken from the settings snapshot and feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInputs {
    pub density: Density,
    pub list_mode_preferred: bool,
    /// Page asks for cards even if the user prefers a list
    pub force_card_mode: bool,
    pub num_cards: u8,
    /// Feed layout v1 always renders a single column
    pub layout_v1: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    pub columns: u8,
    pub gap: GapClass,
    pub max_width_rem: Option<f32>,
}

impl LayoutConfig {
    pub fn is_list(&self) -> bool {
        self.mode == LayoutMode::List
    }

    pub fn gap_rem(&self) -> f32 {
        self.gap.rem()
    }

    /// Custom-property equivalents for the feed wrapper
    pub fn style_hints(&self, num_cards: u8) -> StyleHints {
        StyleHints {
            num_cards,
            feed_gap_rem: self.gap_rem(),
            max_width_rem: self.max_width_rem,
        }
    }
}

/// `--num-cards`, `--feed-gap` and `max-width` as consumed by the wrapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleHints {
    pub num_cards: u8,
    pub feed_gap_rem: f32,
    pub max_width_rem: Option<f32>,
}

impl StyleHints {
    pub fn feed_gap_px(&self) -> f32 {
        self.feed_gap_rem * ROOT_FONT_PX
    }

    pub fn max_width_px(&self) -> Option<f32> {
        self.max_width_rem.map(|rem| rem * ROOT_FONT_PX)
    }
}

pub fn layout_mode(inputs: &LayoutInputs) -> LayoutMode {
    let list_requested = inputs.list_mode_preferred && !inputs.force_card_mode;
    if inputs.layout_v1 || (list_requested && inputs.num_cards > 1) {
        LayoutMode::List
    } else {
        LayoutMode::Grid
    }
}

fn list_gap(density: Density) -> GapClass {
    match density {
        Density::Cozy => GapClass::Gap5,
        Density::Roomy => GapClass::Gap3,
        _ => GapClass::Gap2,
    }
}

fn grid_gap(density: Density) -> GapClass {
    match density {
        Density::Cozy => GapClass::Gap14,
        Density::Roomy => GapClass::Gap12,
        _ => GapClass::Gap8,
    }
}

fn max_width(mode: LayoutMode, density: Density) -> Option<f32> {
    match (mode, density) {
        (LayoutMode::List, Density::Cozy) => Some(WIDE_MAX_WIDTH_REM),
        (LayoutMode::List, Density::Roomy) => Some(TIGHT_MAX_WIDTH_REM),
        _ => None,
    }
}

fn clamp_columns(num_cards: u8) -> u8 {
    if !(1..=MAX_COLUMNS).contains(&num_cards) {
        warn!(num_cards, max = MAX_COLUMNS, "Card count out of range, clamping");
    }
    num_cards.clamp(1, MAX_COLUMNS)
}

/// Resolve the layout for one render
pub fn resolve(inputs: &LayoutInputs) -> LayoutConfig {
    let mode = layout_mode(inputs);
    let (columns, gap) = match mode {
        LayoutMode::List => (1, list_gap(inputs.density)),
        LayoutMode::Grid => (clamp_columns(inputs.num_cards), grid_gap(inputs.density)),
    };

    LayoutConfig {
        mode,
        columns,
        gap,
        max_width_rem: max_width(mode, inputs.density),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(density: Density, list: bool, num_cards: u8) -> LayoutInputs {
        LayoutInputs {
            density,
            list_mode_preferred: list,
            force_card_mode: false,
            num_cards,
            layout_v1: false,
        }
    }

    #[test]
    fn grid_columns_follow_card_count() {
        for density in Density::ALL {
            for n in 1..=MAX_COLUMNS {
                let config = resolve(&inputs(density, false, n));
                assert_eq!(config.mode, LayoutMode::Grid);
                assert_eq!(config.columns, n);
            }
        }
    }

    #[test]
    fn list_is_always_single_column() {
        for n in 2..=MAX_COLUMNS {
            let config = resolve(&inputs(Density::Roomy, true, n));
            assert!(config.is_list());
            assert_eq!(config.columns, 1);
        }

        let mut v1 = inputs(Density::Eco, false, 5);
        v1.layout_v1 = true;
        assert_eq!(resolve(&v1).columns, 1);
    }

    #[test]
    fn single_card_preference_stays_grid() {
        let config = resolve(&inputs(Density::Cozy, true, 1));
        assert_eq!(config.mode, LayoutMode::Grid);
        assert_eq!(config.columns, 1);
        assert_eq!(config.gap, GapClass::Gap14);
    }

    #[test]
    fn force_card_mode_overrides_list_preference() {
        let mut forced = inputs(Density::Cozy, true, 3);
        forced.force_card_mode = true;
        let config = resolve(&forced);
        assert_eq!(config.mode, LayoutMode::Grid);
        assert_eq!(config.columns, 3);

        forced.layout_v1 = true;
        assert_eq!(resolve(&forced).mode, LayoutMode::List);
    }

    #[test]
    fn eco_falls_back_to_default_gaps() {
        assert_eq!(resolve(&inputs(Density::Eco, true, 3)).gap, GapClass::Gap2);
        assert_eq!(resolve(&inputs(Density::Eco, false, 3)).gap, GapClass::Gap8);
    }

    #[test]
    fn eco_list_has_no_max_width() {
        assert_eq!(resolve(&inputs(Density::Eco, true, 3)).max_width_rem, None);
    }

    #[test]
    fn cozy_list_scenario() {
        let config = resolve(&inputs(Density::Cozy, true, 3));
        assert!(config.is_list());
        assert_eq!(config.columns, 1);
        assert_eq!(config.gap, GapClass::Gap5);
        assert_eq!(config.gap_rem(), 1.25);
        assert_eq!(config.max_width_rem, Some(WIDE_MAX_WIDTH_REM));
    }

    #[test]
    fn roomy_grid_scenario() {
        let config = resolve(&inputs(Density::Roomy, false, 4));
        assert_eq!(config.mode, LayoutMode::Grid);
        assert_eq!(config.columns, 4);
        assert_eq!(config.gap, GapClass::Gap12);
        assert_eq!(config.gap_rem(), 3.0);
        assert_eq!(config.max_width_rem, None);
    }

    #[test]
    fn roomy_list_uses_tight_tier() {
        let config = resolve(&inputs(Density::Roomy, true, 4));
        assert_eq!(config.gap, GapClass::Gap3);
        assert_eq!(config.max_width_rem, Some(TIGHT_MAX_WIDTH_REM));
    }

    #[test]
    fn out_of_range_card_counts_are_clamped() {
        assert_eq!(resolve(&inputs(Density::Cozy, false, 0)).columns, 1);
        assert_eq!(resolve(&inputs(Density::Cozy, false, 12)).columns, MAX_COLUMNS);
    }

    #[test]
    fn resolve_is_deterministic() {
        for density in Density::ALL {
            for list in [false, true] {
                for n in 0..=9 {
                    let i = inputs(density, list, n);
                    assert_eq!(resolve(&i), resolve(&i));
                }
            }
        }
    }

    #[test]
    fn style_hints_carry_gap_in_rem() {
        let config = resolve(&inputs(Density::Roomy, false, 4));
        let hints = config.style_hints(4);
        assert_eq!(hints.num_cards, 4);
        assert_eq!(hints.feed_gap_rem, 3.0);
        assert_eq!(hints.feed_gap_px(), 48.0);
        assert_eq!(hints.max_width_px(), None);

        let list = resolve(&inputs(Density::Cozy, true, 3)).style_hints(3);
        assert_eq!(list.max_width_px(), Some(1020.0));
    }
}

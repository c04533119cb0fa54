//! Centralized theme constants for the feed shell
//! Colors, sizes and frames used by the painter in `app::feed_view`

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x0e, 0x10, 0x17); // pepper-90
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x1c, 0x1f, 0x26); // pepper-70
pub const BG_INPUT: Color32 = Color32::from_rgb(0x17, 0x19, 0x21);
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x2d, 0x31, 0x3a); // pepper-50
pub const BG_HOVER: Color32 = Color32::from_rgb(0x24, 0x1b, 0x3a); // subtle cabbage hover

// =============================================================================
// COLORS - Accent (Cabbage)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0xa8, 0x55, 0xf7); // cabbage-40
pub const ACCENT_LIGHT: Color32 = Color32::from_rgb(0xc2, 0x91, 0xfa); // cabbage-30
pub const ACCENT_DARK: Color32 = Color32::from_rgb(0x6b, 0x21, 0xa8); // cabbage-70

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xcf, 0xd6, 0xe6); // salt-90
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa8, 0xb3, 0xcf); // salt-50
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x6e, 0x77, 0x8a);

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x2d, 0x31, 0x3a); // divider-tertiary

// =============================================================================
// COLORS - Feed ready banner
// =============================================================================
pub const READY_BG: Color32 = Color32::from_rgb(0x12, 0x2a, 0x22);
pub const READY_TEXT: Color32 = Color32::from_rgb(0x39, 0xe5, 0x8c); // avocado-40

// =============================================================================
// COLORS - Segmented toggle
// =============================================================================
pub const TOGGLE_SELECTED: Color32 = ACCENT_DARK;
pub const TOGGLE_UNSELECTED: Color32 = BG_SURFACE;

// =============================================================================
// SIZES
// =============================================================================
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_SMALL: f32 = 11.0;

pub const SETTINGS_PANEL_WIDTH: f32 = 260.0;
pub const SEARCH_MAX_WIDTH: f32 = 672.0; // max-w-2xl
pub const CARD_HEIGHT_GRID: f32 = 280.0;
pub const CARD_HEIGHT_LIST: f32 = 96.0;
pub const SEARCH_TOP_MARGIN: f32 = 32.0; // mt-8
pub const FEED_READY_MARGIN: f32 = 40.0; // mb-10

// =============================================================================
// ROUNDING / STROKES / SPACING
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_CARD: f32 = 16.0;
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_PULSE: f32 = 2.0;

pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: BG_ELEVATED,
        extreme_bg_color: BG_INPUT,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT_LIGHT,
        selection: egui::style::Selection {
            bg_fill: ACCENT_DARK,
            stroke: egui::Stroke::NONE,
        },
        widgets: egui::style::Widgets {
            noninteractive: egui::style::WidgetVisuals {
                bg_fill: BG_ELEVATED,
                weak_bg_fill: BG_SURFACE,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            inactive: egui::style::WidgetVisuals {
                bg_fill: Color32::TRANSPARENT,
                weak_bg_fill: BG_ELEVATED,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            hovered: egui::style::WidgetVisuals {
                bg_fill: BG_HOVER,
                weak_bg_fill: BG_SURFACE,
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            active: egui::style::WidgetVisuals {
                bg_fill: ACCENT_DARK,
                weak_bg_fill: ACCENT_DARK,
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: -1.0,
            },
            open: egui::style::WidgetVisuals {
                bg_fill: BG_SURFACE,
                weak_bg_fill: BG_ELEVATED,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
        },
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_corner_radius: egui::CornerRadius::same(8),
        menu_corner_radius: egui::CornerRadius::same(8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(SPACING_MD, 6.0);
        style.spacing.button_padding = egui::vec2(SPACING_LG, 6.0);
        style.spacing.scroll.bar_width = 6.0;
        style.spacing.scroll.floating = false;
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn section_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_INPUT)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
}

pub fn banner_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(READY_BG)
        .corner_radius(RADIUS_CARD)
        .inner_margin(egui::Margin::symmetric(SPACING_XL as i8, SPACING_LG as i8))
}

// =============================================================================
// HELPER - Buttons
// =============================================================================
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BG_SURFACE)
        .corner_radius(RADIUS_DEFAULT)
}

pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_PRIMARY))
        .fill(ACCENT)
        .corner_radius(RADIUS_DEFAULT)
}

// =============================================================================
// HELPER - Segmented toggle (pill-style)
// =============================================================================

/// Pill-style selector over any number of options. Returns true if the
/// selection changed.
pub fn segmented_toggle(ui: &mut egui::Ui, labels: &[&str], selected: &mut usize) -> bool {
    let mut changed = false;
    let height = 29.0;
    let segment_width = 72.0;
    let rounding = 4.0;

    let total = egui::vec2(segment_width * labels.len() as f32, height);
    let (rect, _) = ui.allocate_exact_size(total, egui::Sense::hover());
    ui.painter().rect_filled(rect, rounding + 2.0, TOGGLE_UNSELECTED);

    for (i, label) in labels.iter().enumerate() {
        let seg = egui::Rect::from_min_size(
            egui::pos2(rect.min.x + segment_width * i as f32, rect.min.y),
            egui::vec2(segment_width, height),
        );
        let response = ui.interact(seg, ui.id().with(("segment", i)), egui::Sense::click());
        let active = *selected == i;
        if active {
            ui.painter().rect_filled(seg.shrink(2.0), rounding, TOGGLE_SELECTED);
        } else if response.hovered() {
            ui.painter().rect_filled(seg.shrink(2.0), rounding, BG_HOVER);
        }
        ui.painter().text(
            seg.center(),
            egui::Align2::CENTER_CENTER,
            *label,
            egui::FontId::proportional(FONT_SMALL),
            if active { TEXT_PRIMARY } else { TEXT_MUTED },
        );
        if response.clicked() && !active {
            *selected = i;
            changed = true;
        }
    }

    changed
}

//! Reusable UI components
//!
//! Standalone widgets painted by the feed view. None of them hold state.

use crate::theme;
use eframe::egui;
use feed_container::types::Suggestion;

/// Search input with an optional highlight ring. `pulse` is the ring
/// opacity, `None` when the pulse is off.
pub fn search_bar(
    ui: &mut egui::Ui,
    query: &mut String,
    pulse: Option<f32>,
    width: f32,
) -> egui::Response {
    let frame = egui::Frame::new()
        .fill(theme::BG_INPUT)
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
        .corner_radius(theme::RADIUS_CARD)
        .inner_margin(egui::Margin::symmetric(12, 10));

    let inner = frame.show(ui, |ui| {
        ui.set_width(width - 24.0);
        ui.horizontal(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS)
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
            ui.add(
                egui::TextEdit::singleline(query)
                    .id(ui.make_persistent_id("feed_search"))
                    .hint_text("Search posts or ask a question...")
                    .frame(false)
                    .desired_width(ui.available_width()),
            )
        })
        .inner
    });

    if let Some(alpha) = pulse {
        let ring = egui::Color32::from_rgba_unmultiplied(
            theme::ACCENT.r(),
            theme::ACCENT.g(),
            theme::ACCENT.b(),
            (255.0 * alpha) as u8,
        );
        ui.painter().rect_stroke(
            inner.response.rect.expand(2.0),
            theme::RADIUS_CARD + 2.0,
            egui::Stroke::new(theme::STROKE_PULSE, ring),
            egui::StrokeKind::Outside,
        );
    }

    inner.inner
}

/// Clickable suggestion pill. Returns true when clicked.
pub fn suggestion_chip(ui: &mut egui::Ui, suggestion: &Suggestion) -> bool {
    ui.add(
        egui::Button::new(
            egui::RichText::new(format!(
                "{}  {}",
                egui_phosphor::regular::SPARKLE,
                suggestion.title
            ))
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_SECONDARY),
        )
        .fill(theme::BG_ELEVATED)
        .corner_radius(theme::RADIUS_CARD),
    )
    .clicked()
}

/// One-time "your feed is ready" banner shown after onboarding
pub fn feed_ready_banner(ui: &mut egui::Ui) {
    theme::banner_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(egui_phosphor::regular::CONFETTI)
                    .size(theme::FONT_HEADING)
                    .color(theme::READY_TEXT),
            );
            ui.label(
                egui::RichText::new("Your feed is ready! Start reading.")
                    .size(theme::FONT_BODY)
                    .color(theme::READY_TEXT),
            );
        });
    });
}

/// Feed card: title, source and read time, sized by the caller
pub fn post_card(
    ui: &mut egui::Ui,
    size: egui::Vec2,
    title: &str,
    source: &str,
    read_time: u32,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let fill = if response.hovered() {
            theme::BG_SURFACE
        } else {
            theme::BG_ELEVATED
        };
        painter.rect_filled(rect, theme::RADIUS_CARD, fill);
        painter.rect_stroke(
            rect,
            theme::RADIUS_CARD,
            egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE),
            egui::StrokeKind::Inside,
        );

        let inner = rect.shrink(theme::SPACING_XL);
        let galley = painter.layout(
            title.to_owned(),
            egui::FontId::proportional(theme::FONT_HEADING),
            theme::TEXT_PRIMARY,
            inner.width(),
        );
        painter.galley(inner.min, galley, theme::TEXT_PRIMARY);

        painter.text(
            inner.left_bottom(),
            egui::Align2::LEFT_BOTTOM,
            format!("{}  ·  {} min read", source, read_time),
            egui::FontId::proportional(theme::FONT_SMALL),
            theme::TEXT_MUTED,
        );
    }

    response
}

//! Paints the container tree with egui

use super::{App, FeedSlot};
use crate::theme;
use crate::ui::components::{feed_ready_banner, post_card, search_bar, suggestion_chip};
use eframe::egui;
use feed_container::container::{Element, Region};
use feed_container::search_gate::search_url;
use feed_container::suggestions::SuggestionsStatus;
use tracing::{debug, warn};

impl App {
    pub(crate) fn paint_element(&mut self, ui: &mut egui::Ui, element: &Element<FeedSlot>) {
        match &element.region {
            Region::Container { centered } => {
                let layout = if *centered {
                    egui::Layout::top_down(egui::Align::Center)
                } else {
                    egui::Layout::top_down(egui::Align::Min)
                };
                ui.with_layout(layout, |ui| self.paint_children(ui, element));
            }
            Region::ScrollToTop => self.paint_scroll_to_top(ui),
            Region::Feed { style } => {
                let gap = style.feed_gap_px();
                let scroll = egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .id_salt("feed_scroll");
                let scroll = if std::mem::take(&mut self.scroll_to_top) {
                    scroll.vertical_scroll_offset(0.0)
                } else {
                    scroll
                };
                scroll.show(ui, |ui| {
                    ui.spacing_mut().item_spacing.y = gap.min(theme::SPACING_XL);
                    ui.add_space(theme::SPACING_MD);
                    self.paint_children(ui, element);
                });
            }
            Region::Header(slot) | Region::BesideSearch(slot) | Region::ActionButtons(slot) => {
                self.paint_slot(ui, *slot);
            }
            Region::Cards { max_width_rem, .. } => {
                let width = max_width_rem
                    .map(|rem| rem * feed_container::constants::ROOT_FONT_PX)
                    .map_or(ui.available_width(), |w| w.min(ui.available_width()));
                ui.vertical_centered(|ui| {
                    ui.set_max_width(width);
                    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                        self.paint_children(ui, element);
                    });
                });
            }
            Region::FeedReady => {
                feed_ready_banner(ui);
                ui.add_space(theme::FEED_READY_MARGIN);
            }
            Region::SearchRow => {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = theme::SPACING_LG;
                    self.paint_children(ui, element);
                });
            }
            Region::SearchBar { pulse } => self.paint_search_bar(ui, *pulse),
            Region::SuggestionRow => {
                ui.add_space(theme::SPACING_XL);
                ui.horizontal(|ui| self.paint_children(ui, element));
            }
            Region::SuggestionList { hidden_below } => {
                if self.viewport >= *hidden_below {
                    self.paint_suggestions(ui);
                }
            }
            Region::Grid {
                columns,
                gap,
                top_margin,
            } => {
                if *top_margin {
                    ui.add_space(theme::SEARCH_TOP_MARGIN);
                }
                self.paint_grid(ui, element, *columns, gap.px());
            }
            Region::Item(slot) => self.paint_slot(ui, *slot),
        }
    }

    fn paint_children(&mut self, ui: &mut egui::Ui, element: &Element<FeedSlot>) {
        for child in &element.children {
            self.paint_element(ui, child);
        }
    }

    /// Cards in rows of `columns`, each row `gap` apart. A single column
    /// gets shorter list-style cards.
    fn paint_grid(
        &mut self,
        ui: &mut egui::Ui,
        element: &Element<FeedSlot>,
        columns: u8,
        gap: f32,
    ) {
        let columns = columns.max(1) as usize;
        let available = ui.available_width();
        let card_w = ((available - gap * (columns as f32 - 1.0)) / columns as f32).floor();
        let card_h = if columns == 1 {
            theme::CARD_HEIGHT_LIST
        } else {
            theme::CARD_HEIGHT_GRID
        };

        for row in element.children.chunks(columns) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = gap;
                for item in row {
                    if let Region::Item(FeedSlot::Post(idx)) = item.region {
                        self.paint_post(ui, idx, egui::vec2(card_w, card_h));
                    }
                }
            });
            let spacing = ui.spacing().item_spacing.y;
            ui.add_space((gap - spacing).max(0.0));
        }
    }

    fn paint_post(&mut self, ui: &mut egui::Ui, idx: usize, size: egui::Vec2) {
        let Some(post) = self.posts.get(idx) else {
            return;
        };
        let response = post_card(ui, size, &post.title, post.source, post.read_time);
        if response.clicked() {
            debug!(idx, title = %post.title, "Post opened");
        }
    }

    fn paint_slot(&mut self, ui: &mut egui::Ui, slot: FeedSlot) {
        match slot {
            FeedSlot::Header => {
                ui.label(
                    egui::RichText::new("Popular")
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.add_space(theme::SPACING_MD);
            }
            FeedSlot::BesideSearch => {
                let icon = if self.show_settings {
                    egui_phosphor::regular::X
                } else {
                    egui_phosphor::regular::SLIDERS_HORIZONTAL
                };
                if ui
                    .add(theme::button(icon))
                    .on_hover_text("Feed settings")
                    .clicked()
                {
                    self.show_settings = !self.show_settings;
                }
            }
            FeedSlot::ActionButtons => {
                // Show the icon for the view we'll switch TO
                let list_mode = self.settings.get().is_some_and(|s| s.list_mode);
                let (icon, tooltip) = if list_mode {
                    (egui_phosphor::regular::SQUARES_FOUR, "Switch to Grid view")
                } else {
                    (egui_phosphor::regular::LIST, "Switch to List view")
                };
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(theme::button(icon)).on_hover_text(tooltip).clicked() {
                        self.toggle_list_mode();
                    }
                });
            }
            FeedSlot::Post(idx) => {
                let size = egui::vec2(ui.available_width(), theme::CARD_HEIGHT_LIST);
                self.paint_post(ui, idx, size);
            }
        }
    }

    fn paint_scroll_to_top(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let pos = egui::pos2(rect.right() - 48.0, rect.bottom() - 48.0);
        let ctx = ui.ctx().clone();
        egui::Area::new(egui::Id::new("scroll_to_top"))
            .fixed_pos(pos)
            .show(&ctx, |ui| {
                if ui
                    .add(theme::button(egui_phosphor::regular::ARROW_UP))
                    .on_hover_text("Scroll to top")
                    .clicked()
                {
                    self.scroll_to_top = true;
                }
            });
    }

    fn paint_search_bar(&mut self, ui: &mut egui::Ui, pulse: bool) {
        let time = ui.input(|i| i.time);
        let ring = pulse.then(|| self.pulse.intensity(time));
        if pulse && self.pulse.is_animated() {
            ui.ctx().request_repaint();
        }

        let width = ui.available_width().min(theme::SEARCH_MAX_WIDTH) - 48.0;
        let response = search_bar(ui, &mut self.search_query, ring, width);

        if response.gained_focus() {
            self.container.on_search_focus(&self.actions);
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.submit_search();
        }
    }

    fn paint_suggestions(&mut self, ui: &mut egui::Ui) {
        let Some(handle) = self.container.suggestions() else {
            return;
        };
        match handle.status() {
            SuggestionsStatus::Loading => {
                ui.spinner();
            }
            SuggestionsStatus::Ready => {
                let mut picked = None;
                for suggestion in handle.items() {
                    if suggestion_chip(ui, &suggestion) {
                        picked = Some(suggestion.title);
                    }
                }
                if let Some(title) = picked {
                    self.search_query = title;
                    self.submit_search();
                }
            }
            SuggestionsStatus::Idle
            | SuggestionsStatus::Failed(_)
            | SuggestionsStatus::Cancelled => {}
        }
    }

    fn submit_search(&mut self) {
        let query = self.search_query.trim();
        if query.is_empty() {
            return;
        }
        match search_url(&self.webapp_url(), query) {
            Some(url) => {
                debug!(url = %url, "Opening search");
                if let Err(e) = open::that(url.as_str()) {
                    warn!(error = %e, "Failed to open search in browser");
                }
            }
            None => warn!("Invalid webapp URL in settings"),
        }
    }
}

//! Feed settings side panel
//!
//! Every change is written through the shared settings store and saved
//! immediately, so the next frame's layout reflects it.

use super::App;
use crate::theme;
use eframe::egui;
use feed_container::collaborators::{ActionTracker, RouteContext};
use feed_container::constants::{FINDER_ROUTE, HOME_ROUTE, MAX_COLUMNS};
use feed_container::settings::Settings;
use feed_container::types::{ActionKind, Density, SearchVariant, ToastSubject};
use tracing::{debug, warn};

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.add_space(theme::SPACING_LG);
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_DIM),
    );
    ui.add_space(theme::SPACING_SM);
}

impl App {
    fn apply_setting(&mut self, f: impl FnOnce(&mut Settings)) {
        match self.settings.update(f) {
            Some(settings) => settings.save(&self.data_dir),
            None => debug!("Settings not loaded yet, change dropped"),
        }
    }

    pub(crate) fn toggle_list_mode(&mut self) {
        let mut list_mode = false;
        self.apply_setting(|s| {
            s.list_mode = !s.list_mode;
            list_mode = s.list_mode;
        });
        let message = if list_mode {
            "Switched to list view"
        } else {
            "Switched to grid view"
        };
        self.show_toast(message, ToastSubject::Feed);
    }

    pub(crate) fn render_settings_panel(&mut self, ui: &mut egui::Ui) {
        let Some(settings) = self.settings.get() else {
            ui.spinner();
            return;
        };

        ui.label(
            egui::RichText::new("FEED SETTINGS")
                .size(theme::FONT_SMALL)
                .strong()
                .color(theme::TEXT_MUTED),
        );

        // Layout
        section_label(ui, "DENSITY");
        let mut density_idx = Density::ALL
            .iter()
            .position(|d| *d == settings.density)
            .unwrap_or(0);
        let labels: Vec<&str> = Density::ALL.iter().map(|d| d.label()).collect();
        if theme::segmented_toggle(ui, &labels, &mut density_idx) {
            let density = Density::ALL[density_idx];
            self.apply_setting(|s| s.density = density);
        }

        section_label(ui, "LAYOUT");
        let mut list_mode = settings.list_mode;
        if ui.checkbox(&mut list_mode, "List mode").changed() {
            self.toggle_list_mode();
        }
        let mut layout_v1 = settings.feed_layout_v1;
        if ui.checkbox(&mut layout_v1, "Feed layout v1").changed() {
            self.apply_setting(|s| s.feed_layout_v1 = layout_v1);
        }

        let mut num_cards = settings.num_cards.get(settings.density);
        let slider = egui::Slider::new(&mut num_cards, 1..=MAX_COLUMNS)
            .text(format!("cards ({})", settings.density.label()));
        if ui.add(slider).changed() {
            let density = settings.density;
            self.apply_setting(|s| match density {
                Density::Eco => s.num_cards.eco = num_cards,
                Density::Cozy => s.num_cards.cozy = num_cards,
                Density::Roomy => s.num_cards.roomy = num_cards,
            });
        }

        // Search experiment
        section_label(ui, "SEARCH EXPERIMENT");
        let mut variant_idx = match settings.search_variant {
            SearchVariant::Control => 0,
            SearchVariant::V1 => 1,
        };
        if theme::segmented_toggle(ui, &["Control", "V1"], &mut variant_idx) {
            let variant = if variant_idx == 1 {
                SearchVariant::V1
            } else {
                SearchVariant::Control
            };
            self.apply_setting(|s| s.search_variant = variant);
        }
        let mut show_search = settings.show_search;
        if ui.checkbox(&mut show_search, "Show search").changed() {
            self.apply_setting(|s| s.show_search = show_search);
        }

        ui.add_space(theme::SPACING_SM);
        let accepted = self
            .actions
            .has_completed(ActionKind::AcceptedSearch)
            .unwrap_or(false);
        let accept = ui.add_enabled(!accepted, theme::button_accent("Accept search"));
        if accept.on_hover_text("Mark search as accepted to trigger the highlight").clicked() {
            if let Err(e) = self.actions.complete(ActionKind::AcceptedSearch) {
                warn!(error = %e, "Failed to record accepted search");
            }
        }

        // Route
        section_label(ui, "ROUTE");
        theme::section_frame().show(ui, |ui| {
            ui.label(
                egui::RichText::new(&self.route.path)
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_SECONDARY),
            );
        });
        ui.horizontal(|ui| {
            if ui.add(theme::button("Home")).clicked() {
                self.navigate(RouteContext::new(HOME_ROUTE));
            }
            if ui.add(theme::button("Finder")).clicked() {
                self.navigate(RouteContext::new(FINDER_ROUTE));
            }
            if ui.add(theme::button("Welcome")).clicked() {
                self.navigate(RouteContext::new(HOME_ROUTE).with_query("welcome", "true"));
            }
        });
    }
}

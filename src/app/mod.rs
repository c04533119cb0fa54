//! App module - contains the shell state wiring collaborators to the feed

mod feed_view;
mod settings_panel;

use crate::theme;
use crate::ui::pulse::{self, PulseAnimation};
use eframe::egui;
use feed_container::collaborators::{MemoryActions, RouteContext, StaticFlags, TracingAnalytics};
use feed_container::container::Collaborators;
use feed_container::settings::{Settings, SharedSettings};
use feed_container::suggestions::HttpSuggestions;
use feed_container::types::{ToastSubject, ViewportClass};
use feed_container::{FeedContainer, FeedContainerProps};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Demo feed entry
#[derive(Clone)]
pub(crate) struct Post {
    pub title: String,
    pub source: &'static str,
    pub read_time: u32,
}

/// Slot contents handed to the container; the painter resolves them
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FeedSlot {
    Header,
    Post(usize),
    BesideSearch,
    ActionButtons,
}

fn demo_posts() -> Vec<Post> {
    const SOURCES: [&str; 5] = ["daily.dev", "This Week in Rust", "Hacker News", "LWN", "InfoQ"];
    const TOPICS: [&str; 8] = [
        "Async cancellation without tears",
        "Laying out responsive grids",
        "Feature flags that stay out of the way",
        "Why your analytics fire twice",
        "Immediate-mode GUIs in production",
        "Structured logging for desktop apps",
        "Zero-cost state machines",
        "What a density setting really controls",
    ];
    (0..48)
        .map(|i| Post {
            title: TOPICS[i % TOPICS.len()].to_string(),
            source: SOURCES[i % SOURCES.len()],
            read_time: 3 + (i as u32 * 7) % 12,
        })
        .collect()
}

pub struct App {
    pub(crate) settings: SharedSettings,
    pub(crate) data_dir: PathBuf,
    pub(crate) route: RouteContext,
    pub(crate) actions: MemoryActions,
    pub(crate) analytics: TracingAnalytics,
    pub(crate) suggestions: HttpSuggestions,
    pub(crate) container: FeedContainer,
    pub(crate) pulse: Box<dyn PulseAnimation>,
    pub(crate) posts: Vec<Post>,
    pub(crate) search_query: String,
    pub(crate) show_settings: bool,
    pub(crate) scroll_to_top: bool,
    /// Viewport class of the last feed render
    pub(crate) viewport: ViewportClass,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<Instant>,
    pub(crate) toast_subject: Option<ToastSubject>,
    // Window geometry for saving on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    // Owns the workers behind `suggestions`. Kept last so in-flight
    // requests are cancelled before the runtime stops.
    _runtime: tokio::runtime::Runtime,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        data_dir: PathBuf,
        route: RouteContext,
        runtime: tokio::runtime::Runtime,
        reduce_motion: bool,
        suggestions_url: String,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        // Settings arrive asynchronously; the feed renders nothing until then
        let settings = SharedSettings::new();
        let repaint_ctx = cc.egui_ctx.clone();
        settings.load_in_background(data_dir.clone(), move || repaint_ctx.request_repaint());

        let repaint_ctx = cc.egui_ctx.clone();
        let suggestions = HttpSuggestions::new(suggestions_url, runtime.handle().clone())
            .with_update_hook(move || repaint_ctx.request_repaint());

        info!(route = %route.path, "Feed shell initialised");

        Self {
            settings,
            data_dir,
            route,
            actions: MemoryActions::new(),
            analytics: TracingAnalytics,
            suggestions,
            container: FeedContainer::new(),
            pulse: pulse::select(reduce_motion),
            posts: demo_posts(),
            search_query: String::new(),
            show_settings: false,
            scroll_to_top: false,
            viewport: ViewportClass::LaptopL,
            toast_message: None,
            toast_start: None,
            toast_subject: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            _runtime: runtime,
        }
    }

    pub(crate) fn flags(&self) -> StaticFlags {
        self.settings.get().map(|s| s.flags()).unwrap_or_default()
    }

    pub(crate) fn webapp_url(&self) -> String {
        self.settings
            .get()
            .map(|s| s.webapp_url)
            .unwrap_or_else(|| Settings::default().webapp_url)
    }

    /// Navigate to another route. The container is remounted, which
    /// cancels its suggestions request and resets the pulse.
    pub(crate) fn navigate(&mut self, route: RouteContext) {
        debug!(from = %self.route.path, to = %route.path, "Navigating");
        self.route = route;
        self.container = FeedContainer::new();
    }

    pub(crate) fn show_toast(&mut self, message: impl Into<String>, subject: ToastSubject) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(Instant::now());
        self.toast_subject = Some(subject);
    }

    pub fn save_settings(&self) {
        let updated = self.settings.update(|s| {
            s.window_x = self.window_pos.map(|p| p.x);
            s.window_y = self.window_pos.map(|p| p.y);
            s.window_w = self.window_size.map(|v| v.x);
            s.window_h = self.window_size.map(|v| v.y);
        });
        if let Some(settings) = updated {
            settings.save(&self.data_dir);
        }
    }

    /// Run the container for this frame and paint whatever it produced
    pub(crate) fn render_feed(&mut self, ui: &mut egui::Ui) {
        let viewport = ViewportClass::from_width(ui.available_width());
        self.viewport = viewport;
        let show_search = self.settings.get().is_some_and(|s| s.show_search);
        let props = FeedContainerProps {
            children: (0..self.posts.len()).map(FeedSlot::Post).collect(),
            header: Some(FeedSlot::Header),
            inline_header: false,
            show_search,
            force_card_mode: false,
            beside_search: Some(FeedSlot::BesideSearch),
            action_buttons: Some(FeedSlot::ActionButtons),
        };

        let flags = self.flags();
        let env = Collaborators {
            settings: &self.settings,
            route: &self.route,
            flags: &flags,
            actions: &self.actions,
            analytics: &self.analytics,
            suggestions: &self.suggestions,
        };
        let tree = self.container.render(props, &env, viewport, self.toast_subject);

        match tree {
            Some(tree) => self.paint_element(ui, &tree),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            }
        }
    }

    fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.toast_message.clone() else {
            return;
        };
        let visible_duration = 2.5;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let elapsed = self
            .toast_start
            .map(|t| t.elapsed().as_secs_f32())
            .unwrap_or(0.0);
        let alpha = if elapsed > visible_duration {
            ((total_duration - elapsed) / fade_duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let fill = egui::Color32::from_rgba_unmultiplied(0x1c, 0x1f, 0x26, (230.0 * alpha) as u8);
        let text = egui::Color32::from_rgba_unmultiplied(255, 255, 255, (255.0 * alpha) as u8);

        let screen = ctx.screen_rect();
        egui::Area::new(egui::Id::new("feed_toast"))
            .fixed_pos(egui::pos2(screen.center().x, screen.bottom() - 24.0))
            .pivot(egui::Align2::CENTER_BOTTOM)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(theme::RADIUS_DEFAULT * 2.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(msg).color(text));
                    });
            });

        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
            self.toast_subject = None;
        } else {
            ctx.request_repaint();
        }
    }
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        if self.show_settings {
            egui::SidePanel::right("settings_panel")
                .exact_width(theme::SETTINGS_PANEL_WIDTH)
                .resizable(false)
                .frame(
                    egui::Frame::new()
                        .fill(theme::BG_ELEVATED)
                        .inner_margin(egui::Margin::same(theme::SPACING_XL as i8)),
                )
                .show(ctx, |ui| self.render_settings_panel(ui));
        }

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(theme::SPACING_XL as i8)),
            )
            .show(ctx, |ui| self.render_feed(ui));

        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}

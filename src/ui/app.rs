//! Main application struct and eframe integration

use crate::integration::AppConfig;
use crate::ui::components::{
    ChatList, ChatSelector, DirectoryManager, Header, InputBar, MessageList, VoicePicker,
};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use crate::Result;
use egui::{CentralPanel, SidePanel, TopBottomPanel};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Main Parley application
pub struct ParleyApp {
    state: AppState,
    theme: Theme,
}

impl ParleyApp {
    /// Create the application from configuration
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Result<Self> {
        let theme = Theme::from_mode(config.ui.theme);
        theme.apply(&cc.egui_ctx);

        // A bad font path leaves the default fonts in place
        let font_path = config.ui.font_path.as_deref();
        let extra_font = match Theme::install_fonts(&cc.egui_ctx, font_path) {
            Ok(()) => font_path.is_some(),
            Err(e) => {
                warn!("{}", e);
                false
            }
        };

        let state = AppState::from_config(config)?.with_extra_font(extra_font);
        info!("Parley UI initialized");
        Ok(Self::with_state(state, theme))
    }

    pub fn with_state(state: AppState, theme: Theme) -> Self {
        Self { state, theme }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Poll events and draw one frame
    pub fn render(&mut self, ctx: &egui::Context) {
        self.state.poll_events(Instant::now());

        self.show_header(ctx);
        self.show_chat_panel(ctx);
        self.show_settings_panel(ctx);
        self.show_input_area(ctx);
        self.show_content(ctx);

        // Keep polling while adapters or the responder have work in flight
        if self.state.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(self.theme.bg_secondary).inner_margin(12.0))
            .show(ctx, |ui| {
                Header::new(&mut self.state, &self.theme).show(ui);
            });
    }

    /// Chat list on the reading-start side
    fn show_chat_panel(&mut self, ctx: &egui::Context) {
        let panel = if self.state.is_rtl() {
            SidePanel::right("chat_panel")
        } else {
            SidePanel::left("chat_panel")
        };

        panel
            .resizable(true)
            .default_width(220.0)
            .min_width(160.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                ChatList::new(&mut self.state, &self.theme).show(ui);
            });
    }

    /// Settings on the reading-end side
    fn show_settings_panel(&mut self, ctx: &egui::Context) {
        if !self.state.show_settings {
            return;
        }

        let panel = if self.state.is_rtl() {
            SidePanel::left("settings_panel")
        } else {
            SidePanel::right("settings_panel")
        };

        panel
            .resizable(true)
            .default_width(280.0)
            .min_width(220.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                VoicePicker::new(&mut self.state, &self.theme).show(ui);
                ui.separator();
                DirectoryManager::new(&mut self.state, &self.theme).show(ui);
            });
    }

    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                ChatSelector::new(&mut self.state, &self.theme).show(ui);
                ui.add_space(self.theme.spacing_sm);
                InputBar::new(&mut self.state, &self.theme).show(ui);
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                MessageList::new(&mut self.state, &self.theme).show(ui);
            });
    }
}

impl eframe::App for ParleyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.stop_speech();
        info!("Parley shutting down");
    }
}

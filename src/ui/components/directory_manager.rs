//! Work directory settings: add form, list and removal

use super::{column_layout, mirrored_row, set_label};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, WidgetType};
use uuid::Uuid;

pub struct DirectoryManager<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> DirectoryManager<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        let rtl = self.state.is_rtl();

        ui.with_layout(column_layout(rtl), |ui| {
            mirrored_row(ui, rtl, |ui| {
                ui.label(
                    RichText::new(self.state.t("settings.workDirectories"))
                        .size(15.0)
                        .strong()
                        .color(self.theme.text_primary),
                );

                let key = if self.state.directory_form.open {
                    "settings.hideForm"
                } else {
                    "settings.addDirectory"
                };
                let label = self.state.t(key).to_string();
                let response = ui.add(
                    egui::Button::new(label.as_str()).rounding(self.theme.button_rounding),
                );
                set_label(&response, WidgetType::Button, true, label);
                if response.clicked() {
                    self.state.toggle_directory_form();
                }
            });

            if self.state.directory_form.open {
                ui.add_space(self.theme.spacing_sm);
                self.show_form(ui);
            }

            ui.add_space(self.theme.spacing_sm);
            self.show_directories(ui);
        });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let rtl = self.state.is_rtl();
        let path_label = self.state.t("settings.directoryPath").to_string();
        let name_label = self.state.t("settings.displayName").to_string();
        let save_label = self.state.t("settings.saveDirectory").to_string();

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.with_layout(column_layout(rtl), |ui| {
                    let mut submit = false;

                    ui.label(
                        RichText::new(path_label.as_str())
                            .size(12.0)
                            .color(self.theme.text_secondary),
                    );
                    let path = ui.add(
                        egui::TextEdit::singleline(&mut self.state.directory_form.path)
                            .hint_text("/home/user/projects/my-project")
                            .desired_width(f32::INFINITY)
                            .id(egui::Id::new("directory_path_input")),
                    );
                    set_label(&path, WidgetType::TextEdit, true, path_label);
                    if path.changed() {
                        self.state.directory_form.error = None;
                    }
                    submit |= path.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

                    ui.label(
                        RichText::new(name_label.as_str())
                            .size(12.0)
                            .color(self.theme.text_secondary),
                    );
                    let name = ui.add(
                        egui::TextEdit::singleline(&mut self.state.directory_form.name)
                            .desired_width(f32::INFINITY)
                            .id(egui::Id::new("directory_name_input")),
                    );
                    set_label(&name, WidgetType::TextEdit, true, name_label);
                    submit |= name.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

                    if let Some(key) = self.state.directory_form.error_key() {
                        let message = self.state.t(key).to_string();
                        let response = ui.label(
                            RichText::new(message.as_str()).size(12.0).color(self.theme.error),
                        );
                        let label = format!("Error: {}", message);
                        set_label(&response, WidgetType::Label, true, label);
                    }

                    let save = ui.add(
                        egui::Button::new(
                            RichText::new(save_label.as_str()).color(egui::Color32::WHITE),
                        )
                        .rounding(self.theme.button_rounding)
                        .fill(self.theme.primary),
                    );
                    set_label(&save, WidgetType::Button, true, save_label);
                    submit |= save.clicked();

                    if submit {
                        self.state.submit_directory_form();
                    }
                });
            });
    }

    fn show_directories(&mut self, ui: &mut egui::Ui) {
        let rtl = self.state.is_rtl();

        if self.state.directories.is_empty() {
            ui.label(
                RichText::new(self.state.t("settings.noDirectories"))
                    .size(12.0)
                    .color(self.theme.text_muted),
            );
            return;
        }

        let remove_label = self.state.t("settings.removeDirectory").to_string();
        let mut removed: Option<Uuid> = None;

        for directory in self.state.directories.directories() {
            egui::Frame::none()
                .fill(self.theme.bg_secondary)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_sm)
                .show(ui, |ui| {
                    mirrored_row(ui, rtl, |ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(&directory.name)
                                    .strong()
                                    .color(self.theme.text_primary),
                            );
                            ui.label(
                                RichText::new(&directory.path)
                                    .size(11.0)
                                    .family(egui::FontFamily::Monospace)
                                    .color(self.theme.text_muted),
                            );
                        });

                        let response = ui.add(
                            egui::Button::new(RichText::new("🗑").color(self.theme.error))
                                .frame(false),
                        );
                        set_label(
                            &response,
                            WidgetType::Button,
                            true,
                            format!("{}: {}", remove_label, directory.name),
                        );
                        if response.on_hover_text(remove_label.as_str()).clicked() {
                            removed = Some(directory.id);
                        }
                    });
                });
        }

        if let Some(id) = removed {
            self.state.remove_directory(id);
        }
    }
}

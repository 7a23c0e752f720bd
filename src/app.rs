//! App module - main application logic and UI

use eframe::egui;
use sprite_gif::i18n::Language;

use crate::settings::AppSettings;
use crate::ui::SpriteTab;

pub struct SpriteApp {
    pub settings: AppSettings,
    pub tab: SpriteTab,
    pub status_message: Option<(String, egui::Color32)>,
    pub status_timer: f64, // 消息倒计时
}

impl Default for SpriteApp {
    fn default() -> Self {
        let settings = AppSettings::load();
        let tab = SpriteTab::new(&settings);
        Self {
            settings,
            tab,
            status_message: None,
            status_timer: 0.0,
        }
    }
}

impl SpriteApp {
    fn set_success_message(&mut self, msg: String) {
        self.status_message = Some((msg, egui::Color32::from_rgb(100, 255, 100))); // 绿色提示
        self.status_timer = 3.5;
    }

    fn set_error_message(&mut self, msg: String) {
        self.status_message = Some((msg, egui::Color32::from_rgb(255, 100, 100))); // 警告红色
        self.status_timer = 3.5;
    }

    fn save_settings(&mut self) {
        self.settings.update_from_form(&self.tab.form);
        if let Err(e) = self.settings.save() {
            tracing::warn!("{:#}", e);
        }
    }
}

impl eframe::App for SpriteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let text = self.settings.language.text();

        if self.status_timer > 0.0 {
            self.status_timer -= ctx.input(|i| i.stable_dt) as f64;
            if self.status_timer <= 0.0 {
                self.status_message = None;
            } else {
                ctx.request_repaint();
            }
        }

        let mut language_changed = false;
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(text.tab_title).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::ComboBox::from_id_salt("language_combo")
                        .selected_text(self.settings.language.display_name())
                        .show_ui(ui, |ui| {
                            for lang in Language::ALL {
                                if ui.selectable_value(&mut self.settings.language, lang, lang.display_name()).changed() {
                                    language_changed = true;
                                }
                            }
                        });
                    ui.label(text.menu_language);
                });
            });
        });

        if language_changed {
            self.save_settings();
        }

        if let Some((msg, color)) = &self.status_message {
            egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
                ui.colored_label(*color, msg);
            });
        }

        let mut result = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                result = self.tab.show(ui, text, &mut self.settings);
            });
        });

        match result {
            Some(Ok(msg)) => {
                self.set_success_message(msg);
                self.save_settings();
            }
            Some(Err(msg)) => self.set_error_message(msg),
            None => {}
        }
    }
}

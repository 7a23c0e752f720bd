// src/ui/player.rs

use eframe::egui;
use std::path::PathBuf;
use sprite_gif::i18n::Translation;
use sprite_gif::{Export, Playback};

/// Plays back the frames of the last export inside the result column
pub struct PreviewPlayer {
    pub path: PathBuf,
    playback: Playback,
    textures: Vec<egui::TextureHandle>,
}

impl PreviewPlayer {
    pub fn from_export(ctx: &egui::Context, export: &Export) -> Self {
        let textures = export
            .frames
            .iter()
            .enumerate()
            .map(|(i, frame)| {
                let size = [frame.width() as usize, frame.height() as usize];
                let image = egui::ColorImage::from_rgba_unmultiplied(size, frame.as_raw());
                ctx.load_texture(format!("preview_frame_{}", i), image, egui::TextureOptions::NEAREST)
            })
            .collect::<Vec<_>>();

        Self {
            path: export.path.clone(),
            playback: Playback::new(textures.len(), export.frame_delay_ms, export.loop_mode),
            textures,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, text: &Translation) {
        let dt = ui.ctx().input(|i| i.stable_dt) as f64;
        self.playback.advance(dt);
        if self.playback.playing {
            ui.ctx().request_repaint();
        }

        let total = self.playback.frame_count();

        ui.horizontal(|ui| {
            ui.visuals_mut().widgets.hovered.bg_stroke = egui::Stroke::NONE;
            ui.visuals_mut().widgets.active.bg_stroke = egui::Stroke::NONE;

            let play_btn_text = if self.playback.playing { text.player_pause } else { text.player_play };
            if ui.selectable_label(self.playback.playing, play_btn_text).clicked() { self.playback.toggle(); }
            if ui.selectable_label(false, text.player_stop).clicked() { self.playback.stop(); }

            ui.separator();
            ui.label(format!("{}: {} / {}", text.player_frame, self.playback.current_frame + 1, total));
        });

        if total > 1 {
            let mut slider_frame = self.playback.current_frame + 1;
            if ui.add(egui::Slider::new(&mut slider_frame, 1..=total)).changed() {
                self.playback.seek(slider_frame - 1);
            }
        }

        if let Some(texture) = self.textures.get(self.playback.current_frame) {
            let available = ui.available_size().max(egui::vec2(160.0, 120.0));
            ui.add(
                egui::Image::new(texture)
                    .max_width(available.x)
                    .max_height(available.y)
                    .maintain_aspect_ratio(true),
            );
        }

        ui.label(egui::RichText::new(self.path.display().to_string()).small().color(egui::Color32::GRAY));
    }
}

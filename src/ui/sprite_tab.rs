//! Sprite sheet → GIF converter tab

use anyhow::Context;
use eframe::egui;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use sprite_gif::i18n::Translation;
use sprite_gif::{GridSpec, NamingScheme, SpriteExporter, SpriteForm};

use super::player::PreviewPlayer;
use crate::settings::AppSettings;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];
const GRID_LINE: egui::Color32 = egui::Color32::from_rgb(0, 174, 239);

struct LoadedSheet {
    image: DynamicImage,
    path: PathBuf,
    texture: egui::TextureHandle,
}

/// 精灵图转 GIF 页面
pub struct SpriteTab {
    pub form: SpriteForm,
    sheet: Option<LoadedSheet>,
    preview: Option<PreviewPlayer>,
}

impl SpriteTab {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            form: settings.to_form(),
            sheet: None,
            preview: None,
        }
    }

    fn load_sheet(&mut self, ctx: &egui::Context, path: &Path) -> anyhow::Result<()> {
        let image = image::open(path)
            .with_context(|| format!("Unable to open: {}", path.display()))?;

        let rgba = image.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let texture = ctx.load_texture(
            "sprite_sheet",
            egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()),
            egui::TextureOptions::NEAREST,
        );

        tracing::info!(path = %path.display(), width = size[0], height = size[1], "sprite sheet loaded");
        self.sheet = Some(LoadedSheet { image, path: path.to_path_buf(), texture });
        Ok(())
    }

    fn convert(&mut self, ctx: &egui::Context, settings: &AppSettings, text: &Translation) -> Result<String, String> {
        let exporter = SpriteExporter::new(&settings.output_dir).naming(settings.naming);

        let result = exporter
            .export(self.sheet.as_ref().map(|s| &s.image), &self.form.request())
            .context("GIF export failed");

        match result {
            Ok(Some(export)) => {
                self.preview = Some(PreviewPlayer::from_export(ctx, &export));
                Ok(format!("{} {}", text.msg_saved, export.path.display()))
            }
            Ok(None) => Err(text.msg_no_image.to_string()),
            Err(e) => {
                tracing::error!("{:#}", e);
                Err(format!("{} {:#}", text.msg_export_failed, e))
            }
        }
    }

    /// Renders the tab. Returns a status message when something happened.
    pub fn show(&mut self, ui: &mut egui::Ui, text: &Translation, settings: &mut AppSettings) -> Option<Result<String, String>> {
        let mut status = None;

        ui.heading(text.heading);
        ui.add_space(6.0);

        ui.columns(2, |columns| {
            if let Some(s) = self.show_settings(&mut columns[0], text, settings) {
                status = Some(s);
            }
            self.show_result(&mut columns[1], text);
        });

        status
    }

    fn show_settings(&mut self, ui: &mut egui::Ui, text: &Translation, settings: &mut AppSettings) -> Option<Result<String, String>> {
        let ctx = ui.ctx().clone();
        let mut status = None;

        // === 精灵图 ===
        ui.label(egui::RichText::new(text.label_sheet).strong());
        ui.horizontal(|ui| {
            if ui.button(text.btn_pick_image).clicked() {
                if let Some(path) = rfd::FileDialog::new().add_filter("Images", IMAGE_EXTENSIONS).pick_file() {
                    if let Err(e) = self.load_sheet(&ctx, &path) {
                        status = Some(Err(format!("{} {:#}", text.msg_load_failed, e)));
                    }
                }
            }
            match &self.sheet {
                Some(sheet) => {
                    let name = sheet.path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
                    ui.label(format!("{} ({} × {})", name, sheet.image.width(), sheet.image.height()));
                }
                None => { ui.label(egui::RichText::new(text.label_no_image).color(egui::Color32::GRAY)); }
            }
        });

        if let Some(sheet) = &self.sheet {
            let response = ui.add(
                egui::Image::new(&sheet.texture)
                    .max_width(ui.available_width())
                    .max_height(240.0)
                    .maintain_aspect_ratio(true),
            );
            draw_grid_overlay(ui, response.rect, &self.form, sheet.image.width(), sheet.image.height());
        }

        ui.add_space(8.0);

        // === 网格 ===
        ui.horizontal(|ui| {
            let mut rows = self.form.rows;
            ui.label(text.label_rows);
            if ui.add(egui::DragValue::new(&mut rows).range(1..=1024)).changed() { self.form.set_rows(rows); }

            let mut cols = self.form.cols;
            ui.label(text.label_cols);
            if ui.add(egui::DragValue::new(&mut cols).range(1..=1024)).changed() { self.form.set_cols(cols); }
        });

        if let (Some(sheet), Ok(grid)) = (&self.sheet, GridSpec::new(self.form.rows, self.form.cols)) {
            let size = grid.frame_size(sheet.image.width(), sheet.image.height());
            let label = format!("{}: {} × {} · {} f", text.label_frame_size, size.width, size.height, grid.frame_count());
            let color = if size.is_empty() { egui::Color32::from_rgb(255, 100, 100) } else { egui::Color32::GRAY };
            ui.label(egui::RichText::new(label).color(color));
        }

        ui.add_space(8.0);

        // === 时间设置 (联动) ===
        ui.group(|ui| {
            ui.label(egui::RichText::new(text.group_timing).strong());
            ui.horizontal(|ui| {
                let mut fps = self.form.fps.unwrap_or_default();
                ui.label(text.label_fps);
                if ui.add(egui::DragValue::new(&mut fps).range(0.1..=1000.0).speed(1.0).max_decimals(2)).changed() {
                    self.form.set_fps(Some(fps));
                }

                let mut duration = self.form.duration_ms.unwrap_or_default();
                ui.label(text.label_duration);
                if ui.add(egui::DragValue::new(&mut duration).range(1..=60_000).speed(10.0)).changed() {
                    self.form.set_duration_ms(Some(duration));
                }
            });
        });

        let mut loop_forever = self.form.loop_forever;
        if ui.checkbox(&mut loop_forever, text.label_loop).changed() { self.form.set_loop(loop_forever); }

        ui.add_space(8.0);

        // === 输出 ===
        ui.horizontal(|ui| {
            ui.label(text.label_output_dir);
            ui.add(egui::TextEdit::singleline(&mut settings.output_dir).desired_width(180.0));
            if ui.button(text.btn_pick_dir).clicked() {
                if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                    settings.output_dir = dir.to_string_lossy().to_string();
                }
            }
        });

        let mut unique = settings.naming == NamingScheme::Unique;
        if ui.checkbox(&mut unique, text.label_unique_names).on_hover_text(text.hover_unique_names).changed() {
            settings.naming = if unique { NamingScheme::Unique } else { NamingScheme::Timestamp };
        }

        ui.add_space(12.0);

        let convert_btn = egui::Button::new(egui::RichText::new(text.btn_convert).strong())
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add(convert_btn).clicked() {
            status = Some(self.convert(&ctx, settings, text));
        }

        status
    }

    fn show_result(&mut self, ui: &mut egui::Ui, text: &Translation) {
        ui.label(egui::RichText::new(text.label_result).strong());
        ui.separator();
        if let Some(player) = &mut self.preview {
            player.show(ui, text);
        }
    }
}

/// Draws the slicing grid over the sheet thumbnail
///
/// Lines sit on the real crop boundaries; when the sheet does not divide
/// evenly the last line marks where the dropped remainder begins.
fn draw_grid_overlay(ui: &egui::Ui, rect: egui::Rect, form: &SpriteForm, width: u32, height: u32) {
    let Ok(grid) = GridSpec::new(form.rows, form.cols) else { return; };
    if width == 0 || height == 0 { return; }

    let painter = ui.painter_at(rect);
    let stroke = egui::Stroke::new(1.0, GRID_LINE);
    let sx = rect.width() / width as f32;
    let sy = rect.height() / height as f32;
    let (xs, ys) = grid.cut_lines(width, height);

    for px in xs {
        let x = rect.left() + px as f32 * sx;
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
    }
    for py in ys {
        let y = rect.top() + py as f32 * sy;
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
    }
}

use anyhow::{bail, Context as _};
use base64::Engine as _;
use detect_client_core::controller::{PredictionView, RequestKind, UiController};
use detect_shared::{prediction::Detection, req_args::ImageUpload};
use egui_extras::{Column, TableBuilder};
use tracing::{info, warn};

use crate::ui_helpers::get_text_height;

/// Keeps the texture of the processed image so it is only decoded once per
/// result
#[derive(Default)]
pub struct UiPredict {
    result_image: Option<ResultImage>,
}

struct ResultImage {
    /// The base64 the texture was built from
    source: String,
    texture: Result<egui::TextureHandle, String>,
}

impl std::fmt::Debug for UiPredict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiPredict")
            .field("has_result_image", &self.result_image.is_some())
            .finish()
    }
}

impl UiPredict {
    pub fn show(&mut self, ui: &mut egui::Ui, controller: &mut UiController) {
        ui.heading("Распознавание объектов");
        ui_file_selection(ui, controller);

        ui.horizontal(|ui| {
            if ui.button("Загрузить").clicked() {
                controller.upload();
            }
            if controller.is_awaiting(RequestKind::Predict) {
                ui.spinner();
            }
        });

        match controller.prediction() {
            Some(view) => {
                ui.separator();
                self.ui_result(ui, view);
            }
            None => self.result_image = None,
        }
    }

    fn ui_result(&mut self, ui: &mut egui::Ui, view: &PredictionView) {
        ui.heading("Результат");

        let is_stale = self
            .result_image
            .as_ref()
            .map_or(true, |image| image.source != view.processed_image);
        if is_stale {
            let texture = decode_processed_image(&view.processed_image)
                .map(|image| {
                    ui.ctx()
                        .load_texture("processed-image", image, egui::TextureOptions::LINEAR)
                })
                .map_err(|e| {
                    warn!(?e, "unable to show processed image");
                    format!("{e:#}")
                });
            self.result_image = Some(ResultImage {
                source: view.processed_image.clone(),
                texture,
            });
        }
        if let Some(result_image) = &self.result_image {
            match &result_image.texture {
                Ok(texture) => {
                    ui.add(egui::Image::new(texture).max_width(ui.available_width()));
                }
                Err(e) => {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("Не удалось отобразить изображение: {e}"),
                    );
                }
            }
        }

        if let Some(detections) = &view.detections {
            ui.push_id("detections", |ui| ui_detections_table(ui, detections));
        }

        egui::CollapsingHeader::new("JSON")
            .default_open(view.detections.is_none())
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut view.detections_text.as_str())
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
    }
}

fn ui_file_selection(ui: &mut egui::Ui, controller: &mut UiController) {
    ui.horizontal(|ui| {
        #[cfg(not(target_arch = "wasm32"))]
        if ui.button("Выбрать изображение…").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Изображения", &["jpg", "jpeg", "png", "bmp", "webp", "gif"])
                .pick_file()
            {
                match read_image_file(&path) {
                    Ok(upload) => select(controller, upload),
                    Err(e) => warn!(?e, "failed to read selected file"),
                }
            }
        }
        match &controller.forms.predict.selected {
            Some(upload) => ui.label(&upload.file_name),
            None => ui.weak("Перетащите изображение в окно"),
        };
    });

    let is_hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
    if is_hovering {
        ui.label("Отпустите, чтобы выбрать файл");
    }
    let dropped = ui.ctx().input(|i| i.raw.dropped_files.first().cloned());
    if let Some(file) = dropped {
        match upload_from_dropped(&file) {
            Ok(upload) => select(controller, upload),
            Err(e) => warn!(?e, "failed to use dropped file"),
        }
    }
}

fn select(controller: &mut UiController, upload: ImageUpload) {
    info!(?upload, "image selected");
    controller.forms.predict.selected = Some(upload);
}

fn ui_detections_table(ui: &mut egui::Ui, detections: &[Detection]) {
    let text_height = get_text_height(ui);
    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::LEFT))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .min_scrolled_height(0.0)
        .header(text_height, |mut header| {
            header.col(|ui| {
                ui.strong("Класс");
            });
            header.col(|ui| {
                ui.strong("Уверенность");
            });
            header.col(|ui| {
                ui.strong("Рамка");
            });
        })
        .body(|body| {
            body.rows(text_height, detections.len(), |mut row| {
                let detection = &detections[row.index()];
                row.col(|ui| {
                    ui.label(&detection.class_name);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}%", detection.confidence * 100.0));
                });
                row.col(|ui| {
                    ui.label(format!("{:?}", detection.bounding_box));
                });
            });
        });
}

fn upload_from_dropped(file: &egui::DroppedFile) -> anyhow::Result<ImageUpload> {
    if let Some(bytes) = &file.bytes {
        return Ok(ImageUpload::new(file.name.clone(), bytes.to_vec()));
    }
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        return read_image_file(path);
    }
    bail!("dropped file {:?} has no content", file.name)
}

#[cfg(not(target_arch = "wasm32"))]
fn read_image_file(path: &std::path::Path) -> anyhow::Result<ImageUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {path:?}"))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(ImageUpload::new(file_name, bytes))
}

/// Turns the base64 image from the backend into something egui can draw
fn decode_processed_image(processed_image: &str) -> anyhow::Result<egui::ColorImage> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(processed_image)
        .context("processed image is not valid base64")?;
    let image = image::load_from_memory(&bytes)
        .context("failed to decode processed image")?
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        image.as_flat_samples().as_slice(),
    ))
}

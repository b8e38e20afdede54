use crate::app::core::Msg;
use crate::app::main::App;
use crate::app::view::{View, ViewGallery, ViewPicker, ViewResult};
use crate::frontend::interface::Frontend;
use crate::image_reference::ImageReference;
use eframe::egui;
use std::collections::HashMap;
use std::time::Duration;

const PREVIEW_SIZE: f32 = 320.0;

type Texture = Result<egui::TextureHandle, String>;

/// Decoded images keyed by reference. Selecting an image again drops its
/// entry, so a file that failed to load earlier gets another try.
struct TextureCache<T> {
    entries: HashMap<ImageReference, Result<T, String>>,
}

impl<T> TextureCache<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn get_or_load(
        &mut self,
        image: &ImageReference,
        load: impl FnOnce() -> Result<T, String>,
    ) -> &Result<T, String> {
        self.entries.entry(image.clone()).or_insert_with(load)
    }

    fn forget(&mut self, image: &ImageReference) {
        self.entries.remove(image);
    }
}

struct Window {
    app: App,
    repaint_rate: Duration,
    textures: TextureCache<egui::TextureHandle>,
    path_input: String,
}

impl Window {
    fn texture(&mut self, ctx: &egui::Context, image: &ImageReference) -> &Texture {
        self.textures.get_or_load(image, || load_texture(ctx, image))
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Msg::ImageSelected(image) = &msg {
            self.textures.forget(image);
        }
        self.app.dispatch(msg);
    }

    fn show_image(&mut self, ui: &mut egui::Ui, image: &ImageReference) {
        let ctx = ui.ctx().clone();
        match self.texture(&ctx, image) {
            Ok(texture) => {
                ui.add(
                    egui::Image::new((texture.id(), texture.size_vec2()))
                        .max_size(egui::vec2(PREVIEW_SIZE, PREVIEW_SIZE)),
                );
            }
            Err(message) => {
                ui.label(egui::RichText::new(message.as_str()).color(egui::Color32::RED));
            }
        }
    }

    fn show_picker(&mut self, ctx: &egui::Context, picker: ViewPicker) {
        let mut msgs = Vec::new();

        egui::SidePanel::left("gallery")
            .resizable(true)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Gallery");
                    if ui.small_button("Refresh").clicked() {
                        msgs.push(Msg::RefreshGallery);
                    }
                });
                ui.separator();
                match &picker.gallery {
                    ViewGallery::Loading => {
                        ui.spinner();
                    }
                    ViewGallery::Error(message) => {
                        ui.label(message.as_str());
                    }
                    ViewGallery::Images { images, selected } => {
                        if images.is_empty() {
                            ui.label("No images");
                        }
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            for (index, image) in images.iter().enumerate() {
                                let is_selected = Some(index) == *selected;
                                if ui
                                    .selectable_label(is_selected, image.file_name())
                                    .clicked()
                                {
                                    msgs.push(Msg::ImageSelected(image.clone()));
                                }
                            }
                        });
                    }
                }
            });

        if let Some(notice) = &picker.notice {
            egui::TopBottomPanel::bottom("notice").show(ctx, |ui| {
                ui.label(egui::RichText::new(notice.as_str()).strong());
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Image path:");
                let response = ui.text_edit_singleline(&mut self.path_input);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (ui.button("Open").clicked() || submitted) && !self.path_input.trim().is_empty()
                {
                    msgs.push(Msg::ImageSelected(ImageReference::new(
                        self.path_input.trim(),
                    )));
                }
            });
            ui.separator();

            match &picker.preview {
                Some(image) => self.show_image(ui, image),
                None => {
                    ui.label("Pick an image from the gallery, type a path or drop a file here.");
                }
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(picker.analyze_enabled, egui::Button::new("Analyze"))
                    .clicked()
                {
                    msgs.push(Msg::AnalyzePressed);
                }
                if picker.loading {
                    ui.spinner();
                }
            });
        });

        for msg in msgs {
            self.dispatch(msg);
        }
    }

    fn show_result(&mut self, ctx: &egui::Context, result: ViewResult) {
        let mut back = false;

        egui::TopBottomPanel::top("result_bar").show(ctx, |ui| {
            back = ui.button("Back").clicked();
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                self.show_image(ui, &result.image);
                ui.add_space(12.0);
                ui.label(egui::RichText::new(result.text.as_str()).size(18.0));
            });
        });

        if back {
            self.dispatch(Msg::BackPressed);
        }
    }
}

impl eframe::App for Window {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // results from worker threads reach the model only here, on the UI thread
        self.app.pump();

        let dropped: Vec<ImageReference> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.as_deref().map(ImageReference::from_path))
                .collect()
        });
        if let Some(image) = dropped.into_iter().last() {
            self.dispatch(Msg::ImageSelected(image));
        }

        match self.app.view() {
            View::Picker(picker) => self.show_picker(ctx, picker),
            View::Result(result) => self.show_result(ctx, result),
        }

        ctx.request_repaint_after(self.repaint_rate);
    }
}

fn load_texture(ctx: &egui::Context, image: &ImageReference) -> Texture {
    let decoded = image::open(image.to_path())
        .map_err(|e| format!("Failed to open image {}: {}", image, e))?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok(ctx.load_texture(image.as_str(), color_image, egui::TextureOptions::default()))
}

pub struct FrontendGui {
    title: String,
    repaint_rate: Duration,
}

impl FrontendGui {
    pub fn new(title: &str, repaint_rate: Duration) -> Self {
        Self {
            title: title.to_string(),
            repaint_rate,
        }
    }
}

impl Frontend for FrontendGui {
    fn run(self: Box<Self>, mut app: App) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        app.start();

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 560.0]),
            ..Default::default()
        };

        let window = Window {
            app,
            repaint_rate: self.repaint_rate,
            textures: TextureCache::new(),
            path_input: String::new(),
        };

        eframe::run_native(&self.title, options, Box::new(|_cc| Box::new(window)))
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

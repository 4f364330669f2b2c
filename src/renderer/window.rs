//! The flashing alert window (eframe/egui).

use std::time::Instant;

use egui::{Color32, RichText};
use tracing::{debug, info};

use super::schedule::{shade, FlashSchedule};
use crate::alert::AlertRequest;
use crate::config::WindowConfig;

const WINDOW_TITLE: &str = "Notebook Alert";
const MESSAGE_COLOR: Color32 = Color32::from_rgb(0x2C, 0x3E, 0x50);

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

pub struct AlertWindow {
    request: AlertRequest,
    body: String,
    schedule: FlashSchedule,
    started: Instant,
}

impl AlertWindow {
    pub fn new(request: AlertRequest, body: String, schedule: FlashSchedule) -> Self {
        Self {
            request,
            body,
            schedule,
            started: Instant::now(),
        }
    }
}

impl eframe::App for AlertWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let elapsed = self.started.elapsed();
        if self.schedule.is_expired(elapsed) {
            debug!("Alert timed out after {:.1}s", elapsed.as_secs_f32());
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let status = self.request.status;
        let fill = rgb(shade(status.background(), self.schedule.is_bright(elapsed)));
        let mut dismissed = false;

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(fill).inner_margin(egui::Margin::same(20)))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new(status.headline())
                            .size(32.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                    ui.add_space(15.0);
                    ui.label(RichText::new(&self.body).size(16.0).color(MESSAGE_COLOR));
                    ui.add_space(15.0);

                    let ok = egui::Button::new(
                        RichText::new("OK").size(14.0).strong().color(Color32::WHITE),
                    )
                    .fill(rgb(status.button()))
                    .min_size(egui::vec2(90.0, 36.0));
                    if ui.add(ok).clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            debug!("Alert dismissed");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        ctx.request_repaint_after(self.schedule.next_change(elapsed));
    }
}

/// Show the window and block until it closes.
pub fn run(
    request: AlertRequest,
    body: String,
    schedule: FlashSchedule,
    config: &WindowConfig,
) -> Result<(), String> {
    let mut viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size([config.width, config.height])
        .with_resizable(false);
    if config.always_on_top {
        viewport = viewport.with_always_on_top();
    }

    let options = eframe::NativeOptions {
        viewport,
        centered: true,
        ..Default::default()
    };

    info!("Showing {} alert for {:?}", request.status, schedule.duration());
    let app = AlertWindow::new(request, body, schedule);
    eframe::run_native(WINDOW_TITLE, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| format!("Failed to open alert window: {e}"))
}

#[cfg(test)]
mod tests {
    use crate::alert::AlertStatus;

    #[test]
    fn bundled_fonts_draw_every_headline() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |_| {});

        let heading = egui::FontId::proportional(32.0);
        for status in [AlertStatus::Success, AlertStatus::Error] {
            let headline = status.headline();
            assert!(
                ctx.fonts(|f| f.has_glyphs(&heading, headline)),
                "missing glyph in {headline:?}"
            );
        }
    }
}

use eframe::egui;

use super::theme::PALETTE;

pub const BUBBLE_MAX_WIDTH_FRACTION: f32 = 0.7;

pub fn bubble<R>(
    ui: &mut egui::Ui,
    fill: egui::Color32,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let max_width = ui.available_width() * BUBBLE_MAX_WIDTH_FRACTION;
    egui::Frame::NONE
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_max_width(max_width);
            add_contents(ui)
        })
        .inner
}

/// Three dots that pulse in turn while a generation is pending.
pub fn typing_dots(ui: &mut egui::Ui) {
    let time = ui.input(|i| i.time);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(42.0, 14.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    for index in 0..3 {
        let phase = (time * 4.0 - index as f64 * 0.6).sin() as f32;
        let alpha = 0.35 + 0.65 * (phase * 0.5 + 0.5);
        let center = egui::pos2(rect.left() + 7.0 + index as f32 * 14.0, rect.center().y);
        painter.circle_filled(center, 4.0, egui::Color32::WHITE.gamma_multiply(alpha));
    }
    ui.ctx()
        .request_repaint_after(std::time::Duration::from_millis(33));
}

/// Round badge with the first letter of `name`, used until an avatar loads.
pub fn initial_badge(ui: &mut egui::Ui, name: &str, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.circle_filled(rect.center(), size / 2.0, PALETTE.user_bubble);
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initial,
        egui::FontId::proportional(size * 0.5),
        egui::Color32::WHITE,
    );
    response
}

pub fn error_banner(ui: &mut egui::Ui, message: &str) -> bool {
    let mut dismissed = false;
    egui::Frame::NONE
        .fill(PALETTE.error_fill)
        .stroke(egui::Stroke::new(1.0, PALETTE.error_stroke))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    dismissed
}

//! Dark chat palette and global style setup.

use eframe::egui;

#[derive(Debug, Clone, Copy)]
pub struct ChatPalette {
    pub app_background: egui::Color32,
    pub header_background: egui::Color32,
    pub composer_background: egui::Color32,
    pub user_bubble: egui::Color32,
    pub bot_bubble: egui::Color32,
    pub banner_text: egui::Color32,
    pub weak_text: egui::Color32,
    pub error_fill: egui::Color32,
    pub error_stroke: egui::Color32,
}

pub const PALETTE: ChatPalette = ChatPalette {
    app_background: egui::Color32::from_rgb(0x11, 0x18, 0x27),
    header_background: egui::Color32::from_rgb(0x1F, 0x29, 0x37),
    composer_background: egui::Color32::from_rgb(0x1F, 0x29, 0x37),
    user_bubble: egui::Color32::from_rgb(0x25, 0x63, 0xEB),
    bot_bubble: egui::Color32::from_rgb(0x37, 0x41, 0x51),
    banner_text: egui::Color32::from_rgb(0xFB, 0xBF, 0x24),
    weak_text: egui::Color32::from_rgb(0x9C, 0xA3, 0xAF),
    error_fill: egui::Color32::from_rgb(111, 53, 53),
    error_stroke: egui::Color32::from_rgb(175, 96, 96),
};

pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::dark();
    style.visuals.panel_fill = PALETTE.app_background;
    style.visuals.window_fill = PALETTE.header_background;
    style.visuals.extreme_bg_color = PALETTE.app_background;

    // Make text inputs reliably visible against the dark panels.
    style.visuals.widgets.inactive.bg_stroke =
        egui::Stroke::new(1.0, style.visuals.widgets.noninteractive.bg_stroke.color);
    style.visuals.widgets.active.bg_stroke =
        egui::Stroke::new(1.2, style.visuals.selection.bg_fill.gamma_multiply(0.9));

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.interact_size = egui::vec2(40.0, 30.0);
    ctx.set_style(style);
}

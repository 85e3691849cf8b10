//! Header, transcript and composer panels.

use client_core::view::{AccountView, Alignment, ChatView, RowView};
use eframe::egui;

use super::app::{ImageSlot, ImageifyApp};
use super::theme::PALETTE;
use super::widgets;

const AVATAR_SIZE: f32 = 32.0;
const IMAGE_MAX_WIDTH: f32 = 360.0;

impl ImageifyApp {
    pub(super) fn show_header(&mut self, ctx: &egui::Context, view: &ChatView) {
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::NONE
                    .fill(PALETTE.header_background)
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(egui::RichText::new(view.header.title).strong());
                    if let Some(banner) = &view.header.attempts_banner {
                        ui.add_space(12.0);
                        ui.label(egui::RichText::new(banner).color(PALETTE.banner_text));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        match &view.header.account {
                            Some(account) => self.show_account(ui, account),
                            None => self.show_sign_in(ui),
                        }
                    });
                });

                if let Some(banner) = self.status_banner.clone() {
                    ui.add_space(6.0);
                    if widgets::error_banner(ui, &banner.message) {
                        self.status_banner = None;
                    }
                }
            });
    }

    fn show_account(&mut self, ui: &mut egui::Ui, account: &AccountView) {
        if ui.button("Logout").clicked() {
            self.sign_out();
            return;
        }
        ui.label(&account.display_name);

        let slot = account
            .avatar_url
            .as_deref()
            .map(|url| self.image_slot(url));
        match slot {
            Some(ImageSlot::Ready(texture)) => {
                ui.add(
                    egui::Image::new(&texture)
                        .fit_to_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE))
                        .corner_radius(egui::CornerRadius::same(16)),
                );
            }
            _ => {
                widgets::initial_badge(ui, &account.display_name, AVATAR_SIZE);
            }
        }
    }

    fn show_sign_in(&mut self, ui: &mut egui::Ui) {
        let clicked = ui.button("Sign in with Google").clicked();
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.credential_input)
                .id_salt("credential_input")
                .password(true)
                .hint_text("Paste Google ID token")
                .desired_width(260.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if clicked || submitted {
            self.try_login();
        }
    }

    pub(super) fn show_composer(&mut self, ctx: &egui::Context, view: &ChatView) {
        egui::TopBottomPanel::bottom("composer")
            .frame(
                egui::Frame::NONE
                    .fill(PALETTE.composer_background)
                    .inner_margin(egui::Margin::symmetric(16, 12)),
            )
            .show(ctx, |ui| {
                let composer = &view.composer;
                ui.horizontal(|ui| {
                    let button_width = 160.0;
                    let mut input = composer.input.clone();
                    let response = ui.add_enabled(
                        composer.input_enabled,
                        egui::TextEdit::singleline(&mut input)
                            .id_salt("prompt_input")
                            .hint_text(composer.placeholder)
                            .desired_width(ui.available_width() - button_width),
                    );
                    if response.changed() {
                        self.edit_prompt(input);
                    }
                    let submitted = response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    let clicked = ui
                        .add_enabled(
                            composer.submit_enabled,
                            egui::Button::new(composer.submit_label)
                                .min_size(egui::vec2(button_width - 12.0, 30.0)),
                        )
                        .clicked();

                    if composer.submit_enabled && (clicked || submitted) {
                        self.submit_prompt();
                    }
                });
                ui.add_space(2.0);
                ui.label(egui::RichText::new(&self.status).small().color(PALETTE.weak_text));
            });
    }

    pub(super) fn show_transcript(&mut self, ctx: &egui::Context, view: &ChatView) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::NONE
                    .fill(PALETTE.app_background)
                    .inner_margin(egui::Margin::symmetric(16, 12)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if view.rows.is_empty() {
                            ui.add_space(24.0);
                            ui.vertical_centered(|ui| {
                                let hint = if view.show_sign_in {
                                    "Sign in to start generating images."
                                } else {
                                    "Describe an image below to get started."
                                };
                                ui.label(egui::RichText::new(hint).color(PALETTE.weak_text));
                            });
                        }

                        for row in &view.rows {
                            self.show_row(ui, row);
                            ui.add_space(8.0);
                        }

                        if view.transcript_revision != self.last_scrolled_revision {
                            ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                            self.last_scrolled_revision = view.transcript_revision;
                        }
                    });
            });
    }

    fn show_row(&mut self, ui: &mut egui::Ui, row: &RowView) {
        let (align, fill) = match row.alignment() {
            Alignment::Right => (egui::Align::Max, PALETTE.user_bubble),
            Alignment::Left => (egui::Align::Min, PALETTE.bot_bubble),
        };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            widgets::bubble(ui, fill, |ui| match row {
                RowView::User { text } | RowView::BotText { text } => {
                    ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
                }
                RowView::BotPending => widgets::typing_dots(ui),
                RowView::BotImage { url } => self.show_generated_image(ui, url),
            });
        });
    }

    fn show_generated_image(&mut self, ui: &mut egui::Ui, url: &str) {
        match self.image_slot(url) {
            ImageSlot::Ready(texture) => {
                ui.add(
                    egui::Image::new(&texture)
                        .max_width(IMAGE_MAX_WIDTH)
                        .corner_radius(egui::CornerRadius::same(8)),
                );
            }
            ImageSlot::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new("Loading image...").color(PALETTE.weak_text));
                });
            }
            ImageSlot::Failed(_) => {
                ui.hyperlink_to("Open generated image", url);
            }
        }
    }
}

use detect_client_core::controller::{RequestKind, UiController};

use crate::ui_helpers::{readonly_checkbox_no_text, ui_text_edit};

pub fn show(ui: &mut egui::Ui, controller: &mut UiController) {
    ui.heading("Профиль");

    match controller.profile() {
        Some(profile) => {
            egui::Grid::new("profile_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    ui.label("Email:");
                    ui.label(&profile.email);
                    ui.end_row();

                    ui.label("Имя:");
                    ui.label(&profile.name);
                    ui.end_row();

                    ui.label("Администратор:");
                    readonly_checkbox_no_text(ui, profile.is_admin);
                    ui.end_row();
                });
        }
        None if controller.is_awaiting(RequestKind::CurrentUser) => {
            ui.spinner();
        }
        None => {
            if ui.button("Загрузить профиль").clicked() {
                controller.load_profile();
            }
        }
    }

    ui.separator();
    ui.label("Оставьте поле пустым, чтобы не менять его");
    let form = &mut controller.forms.profile;
    ui_text_edit(ui, &mut form.new_email, "Новый email");
    ui_text_edit(ui, &mut form.new_name, "Новое имя");
    ui.horizontal(|ui| {
        if ui.button("Сохранить").clicked() {
            controller.submit_profile_update();
        }
        if controller.is_awaiting(RequestKind::UpdateUser) {
            ui.spinner();
        }
    });
}

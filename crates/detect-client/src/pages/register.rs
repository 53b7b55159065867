use detect_client_core::controller::{RequestKind, UiController};

use crate::ui_helpers::{is_secret_set, ui_password_edit, ui_text_edit};

pub fn show(ui: &mut egui::Ui, controller: &mut UiController) {
    ui.vertical_centered(|ui| {
        ui.heading("Регистрация");

        let form = &mut controller.forms.register;
        ui_text_edit(ui, &mut form.name, "Имя");
        ui_text_edit(ui, &mut form.email, "Email");
        ui_password_edit(ui, &mut form.password, "Пароль");
        ui_password_edit(ui, &mut form.confirm_password, "Подтверждение пароля");
        // Matching passwords is left to the backend so its message is shown
        let is_ready = !form.name.trim().is_empty()
            && !form.email.trim().is_empty()
            && is_secret_set(&form.password);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(is_ready, egui::Button::new("Зарегистрироваться"))
                .clicked()
            {
                controller.submit_register();
            }
            if controller.is_awaiting(RequestKind::Register) {
                ui.spinner();
            }
        });

        if ui.link("Уже есть аккаунт? Войти").clicked() {
            controller.click_login();
        }
    });
}

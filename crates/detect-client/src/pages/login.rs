use detect_client_core::controller::{RequestKind, UiController};

use crate::ui_helpers::{is_enter_submit, is_secret_set, ui_password_edit, ui_text_edit};

/// Returns `true` if a login attempt was sent
pub fn show(ui: &mut egui::Ui, controller: &mut UiController) -> bool {
    let mut is_submit = false;
    ui.vertical_centered(|ui| {
        ui.heading("Вход");

        let form = &mut controller.forms.login;
        let email = ui_text_edit(ui, &mut form.email, "Email");
        let password = ui_password_edit(ui, &mut form.password, "Пароль");
        let is_ready = !form.email.trim().is_empty() && is_secret_set(&form.password);
        is_submit = is_ready && (is_enter_submit(ui, &email) || is_enter_submit(ui, &password));

        ui.horizontal(|ui| {
            if ui
                .add_enabled(is_ready, egui::Button::new("Войти"))
                .clicked()
            {
                is_submit = true;
            }
            if controller.is_awaiting(RequestKind::Login) {
                ui.spinner();
            }
        });

        if ui.link("Нет аккаунта? Зарегистрироваться").clicked() {
            controller.click_register();
        }
    });

    if is_submit {
        controller.submit_login();
    }
    is_submit
}

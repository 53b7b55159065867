use secrecy::{ExposeSecret as _, SecretString};

pub fn get_text_height(ui: &mut egui::Ui) -> f32 {
    egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y)
}

pub fn ui_password_edit(
    ui: &mut egui::Ui,
    password: &mut SecretString,
    hint_text: &str,
) -> egui::Response {
    let mut temp = password.expose_secret().to_owned();
    let result = ui.add(
        egui::TextEdit::singleline(&mut temp)
            .password(true)
            .hint_text(hint_text),
    );
    *password = SecretString::from(temp);
    result
}

pub fn ui_text_edit(ui: &mut egui::Ui, text: &mut String, hint_text: &str) -> egui::Response {
    ui.add(egui::TextEdit::singleline(text).hint_text(hint_text))
}

pub fn readonly_checkbox_no_text(ui: &mut egui::Ui, mut value: bool) {
    ui.add_enabled(false, egui::Checkbox::without_text(&mut value));
}

/// Returns true if the field lost focus because enter was pressed
pub fn is_enter_submit(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

pub fn is_secret_set(secret: &SecretString) -> bool {
    !secret.expose_secret().is_empty()
}

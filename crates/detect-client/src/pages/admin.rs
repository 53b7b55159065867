use detect_client_core::controller::{RequestKind, UiController};
use detect_shared::uac::UserListRow;
use egui_extras::{Column, TableBuilder};

use crate::ui_helpers::get_text_height;

pub fn show(ui: &mut egui::Ui, controller: &mut UiController) {
    ui.horizontal(|ui| {
        ui.heading("Пользователи");
        if controller.is_awaiting(RequestKind::Users) {
            ui.spinner();
        } else if ui.button("Обновить").clicked() {
            controller.load_users();
        }
    });
    ui.separator();

    if controller.users().is_empty() {
        ui.label("Нет данных");
        return;
    }
    ui_users_table(ui, controller.users());
}

fn ui_users_table(ui: &mut egui::Ui, users: &[UserListRow]) {
    let text_height = get_text_height(ui);
    let table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::LEFT))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .min_scrolled_height(0.0)
        .header(text_height, |mut header| {
            header.col(|ui| {
                ui.strong("ID");
            });
            header.col(|ui| {
                ui.strong("Имя");
            });
            header.col(|ui| {
                ui.strong("Email");
            });
            header.col(|ui| {
                ui.strong("Роль");
            });
            header.col(|ui| {
                ui.strong("Статус");
            });
        });

    table.body(|body| {
        body.rows(text_height, users.len(), |mut row| {
            let user = &users[row.index()];
            row.col(|ui| {
                ui.label(user.id.to_string());
            });
            row.col(|ui| {
                ui.label(&user.name);
            });
            row.col(|ui| {
                ui.label(&user.email);
            });
            row.col(|ui| {
                ui.label(user.roles_name.as_deref().unwrap_or("-"));
            });
            row.col(|ui| {
                ui.label(user.status_label());
            });
        });
    });
}

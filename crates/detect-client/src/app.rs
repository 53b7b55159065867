use detect_client_core::{
    controller::{RequestKind, Section, UiController, UiState, WakeFn},
    Client, Session,
};
use std::sync::Arc;
use tracing::{info, warn};
use web_time::Instant;

use crate::{
    configuration::Settings,
    pages::{self, UiPredict},
    toasts::Toasts,
};

/// What is kept between runs. The token is persisted separately by the
/// session's store
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct PersistedState {
    last_email: String,
}

#[derive(Debug)]
pub struct DetectApp {
    persisted: PersistedState,
    controller: UiController,
    toasts: Toasts,
    predict_page: UiPredict,
}

impl eframe::App for DetectApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        info!("Saving with key: {}", eframe::APP_KEY);
        eframe::set_value(storage, eframe::APP_KEY, &self.persisted);
    }

    /// Called each time the UI needs repainting, which may be many times per
    /// second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();
        let now = Instant::now();
        for notification in self.controller.take_notifications() {
            self.toasts.push(notification, now);
        }

        self.top_panel(ctx);
        self.bottom_panel(ctx);
        self.central_panel(ctx);
    }
}

impl DetectApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, session: Session) -> Self {
        let persisted: PersistedState = if let Some(storage) = cc.storage {
            info!("Storage found. Loading...");
            match eframe::get_value(storage, eframe::APP_KEY) {
                Some(value) => {
                    info!("Loaded succeeded");
                    value
                }
                None => {
                    warn!("Load failed");
                    Default::default()
                }
            }
        } else {
            info!("No storage found");
            Default::default()
        };

        let client = Client::new(settings.server_address.clone());
        let mut controller = UiController::new(client, session, wake_fn(cc.egui_ctx.clone()));
        controller
            .forms
            .login
            .email
            .clone_from(&persisted.last_email);

        Self {
            persisted,
            controller,
            toasts: Toasts::new(settings.notification_timeout()),
            predict_page: Default::default(),
        }
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.separator();
                self.ui_navigation(ui);
                if self.controller.has_pending_requests() {
                    ui.spinner();
                }
            });
        });
    }

    fn ui_navigation(&mut self, ui: &mut egui::Ui) {
        let navigation = self.controller.navigation();
        let state = self.controller.state();
        if navigation.login
            && ui
                .selectable_label(matches!(state, UiState::LoggedOut | UiState::Login), "Вход")
                .clicked()
        {
            self.controller.click_login();
        }
        if navigation.register
            && ui
                .selectable_label(state == UiState::Register, "Регистрация")
                .clicked()
        {
            self.controller.click_register();
        }
        if self.controller.is_authenticated()
            && ui
                .selectable_label(state == UiState::Predict, "Распознавание")
                .clicked()
        {
            self.controller.click_predict();
        }
        if navigation.profile
            && ui
                .selectable_label(state == UiState::Profile, "Профиль")
                .clicked()
        {
            self.controller.click_profile();
        }
        if navigation.admin
            && ui
                .selectable_label(state == UiState::Admin, "Пользователи")
                .clicked()
        {
            self.controller.click_admin();
        }
        if navigation.logout && ui.button("Выход").clicked() {
            self.controller.logout();
        }
    }

    fn bottom_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            self.toasts.show(ui);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::BOTTOM), |ui| {
                if let Some(profile) = self.controller.profile() {
                    ui.label(format!("Вы вошли как {}", profile.name));
                } else if self.controller.is_awaiting(RequestKind::CurrentUser) {
                    ui.spinner();
                }
                egui::warn_if_debug_build(ui);
            });
        });
    }

    fn central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for section in self.controller.sections().visible() {
                    ui.push_id(section.id(), |ui| match section {
                        Section::Auth => {
                            if pages::login::show(ui, &mut self.controller) {
                                self.persisted.last_email =
                                    self.controller.forms.login.email.trim().to_string();
                            }
                        }
                        Section::Register => pages::register::show(ui, &mut self.controller),
                        Section::Profile => pages::profile::show(ui, &mut self.controller),
                        Section::Predict => self.predict_page.show(ui, &mut self.controller),
                        Section::Admin => pages::admin::show(ui, &mut self.controller),
                    });
                }
            });
        });
    }
}

#[inline]
pub fn wake_fn(ctx: egui::Context) -> WakeFn {
    Arc::new(move || ctx.request_repaint())
}

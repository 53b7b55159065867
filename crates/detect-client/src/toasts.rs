use detect_client_core::controller::Notification;
use std::time::Duration;
use web_time::Instant;

/// Notifications on screen until they expire or are dismissed
#[derive(Debug)]
pub struct Toasts {
    timeout: Duration,
    active: Vec<Toast>,
}

#[derive(Debug)]
struct Toast {
    notification: Notification,
    shown_at: Instant,
}

impl Toasts {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            active: Vec::new(),
        }
    }

    pub fn push(&mut self, notification: Notification, now: Instant) {
        self.active.push(Toast {
            notification,
            shown_at: now,
        });
    }

    /// Drops expired toasts
    pub fn prune(&mut self, now: Instant) {
        let timeout = self.timeout;
        self.active
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < timeout);
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.active.len()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        self.prune(Instant::now());
        let mut dismissed = None;
        for (i, toast) in self.active.iter().enumerate() {
            ui.horizontal(|ui| {
                if ui.small_button("x").clicked() {
                    dismissed = Some(i);
                }
                let color = if toast.notification.is_error() {
                    ui.visuals().error_fg_color
                } else {
                    ui.visuals().text_color()
                };
                ui.colored_label(color, &toast.notification.message);
            });
        }
        if let Some(i) = dismissed {
            self.active.remove(i);
        }
        if !self.is_empty() {
            // Keep painting so toasts disappear on time without input
            ui.ctx().request_repaint_after(Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire() {
        let start = Instant::now();
        let mut toasts = Toasts::new(Duration::from_secs(6));
        toasts.push(Notification::error("first"), start);
        toasts.push(
            Notification::info("second"),
            start + Duration::from_secs(3),
        );

        toasts.prune(start + Duration::from_secs(5));
        assert_eq!(toasts.len(), 2);

        toasts.prune(start + Duration::from_secs(7));
        assert_eq!(toasts.len(), 1);

        toasts.prune(start + Duration::from_secs(9));
        assert!(toasts.is_empty());
    }
}

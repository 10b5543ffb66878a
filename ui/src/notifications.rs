use crate::theme::*;
use eframe::egui;
use queuelab_core::{Notification, NotificationSink};

struct Toast {
    notification: Notification,
    shown_at: Option<f64>,
}

/// Stack of timed toasts in the top-right corner.
#[derive(Default)]
pub struct Toasts {
    active: Vec<Toast>,
}

impl NotificationSink for Toasts {
    fn notify(&mut self, notification: Notification) {
        log::info!("[{}] {}", notification.severity, notification.message);
        self.active.push(Toast {
            notification,
            shown_at: None,
        });
    }
}

impl Toasts {
    pub fn show(&mut self, ctx: &egui::Context, now: f64) {
        for toast in &mut self.active {
            toast.shown_at.get_or_insert(now);
        }
        self.active.retain(|t| {
            let shown = t.shown_at.unwrap_or(now);
            now - shown < t.notification.display_ms as f64 / 1000.0
        });
        if self.active.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
            .show(ctx, |ui| {
                ui.set_max_width(360.0);
                for (i, toast) in self.active.iter().enumerate() {
                    let color = severity_color(toast.notification.severity);
                    egui::Frame::none()
                        .fill(COLOR_PANEL)
                        .stroke(egui::Stroke::new(1.0, color))
                        .rounding(4.0)
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new(&toast.notification.message).color(color));
                                if ui.small_button("✕").clicked() {
                                    dismissed = Some(i);
                                }
                            });
                        });
                    ui.add_space(6.0);
                }
            });
        if let Some(i) = dismissed {
            self.active.remove(i);
        }
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

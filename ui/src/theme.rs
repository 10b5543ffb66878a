use eframe::egui;
use queuelab_core::Severity;

pub const COLOR_BG: egui::Color32 = egui::Color32::from_rgb(43, 48, 59);
pub const COLOR_PANEL: egui::Color32 = egui::Color32::from_rgb(59, 66, 82);
pub const COLOR_ACCENT: egui::Color32 = egui::Color32::from_rgb(136, 192, 208);
pub const COLOR_TEXT: egui::Color32 = egui::Color32::from_rgb(229, 233, 240);
pub const COLOR_TEXT_DIM: egui::Color32 = egui::Color32::from_rgb(144, 155, 175);
pub const COLOR_WARN: egui::Color32 = egui::Color32::from_rgb(235, 203, 139);
pub const COLOR_CRITICAL: egui::Color32 = egui::Color32::from_rgb(191, 97, 106);
pub const COLOR_SUCCESS: egui::Color32 = egui::Color32::from_rgb(163, 190, 140);
pub const COLOR_HEAD_OF_LINE: egui::Color32 = egui::Color32::from_rgb(255, 215, 0);

pub fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Info => COLOR_ACCENT,
        Severity::Warning => COLOR_WARN,
        Severity::Success => COLOR_SUCCESS,
        Severity::Danger => COLOR_CRITICAL,
    }
}

use crate::theme::*;
use eframe::egui;
use queuelab_core::{FrameSink, SimulationState};

const MAX_DRAWN: u64 = 60;
const SLOTS_PER_ROW: u64 = 10;

/// Keeps the latest snapshot for the next repaint.
#[derive(Default)]
pub struct FrameBuffer {
    pub latest: SimulationState,
}

impl FrameSink for FrameBuffer {
    fn render(&mut self, frame: &SimulationState) {
        self.latest = frame.clone();
    }
}

pub fn render_queue(ui: &mut egui::Ui, frame: &SimulationState) {
    let canvas_rect = ui.max_rect();
    let painter = ui.painter();
    let padding = 16.0;

    let server = egui::Rect::from_min_size(
        canvas_rect.left_top() + egui::vec2(padding, padding + 10.0),
        egui::vec2(80.0, 200.0),
    );
    painter.rect_filled(server, 4.0, COLOR_SUCCESS.gamma_multiply(0.15));
    painter.rect_stroke(server, 4.0, egui::Stroke::new(1.5, COLOR_SUCCESS));
    painter.text(
        server.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        "Server",
        egui::FontId::proportional(13.0),
        COLOR_TEXT,
    );

    let queue_origin = egui::pos2(server.right() + 24.0, server.top());
    let slot = egui::vec2(18.0, 30.0);
    let gap = 6.0;

    for i in 0..frame.queue_length.min(MAX_DRAWN) {
        let col = (i % SLOTS_PER_ROW) as f32;
        let row = (i / SLOTS_PER_ROW) as f32;
        let rect = egui::Rect::from_min_size(
            queue_origin + egui::vec2((slot.x + gap) * col, (slot.y + gap) * row),
            slot,
        );
        let fill = if i == 0 { COLOR_HEAD_OF_LINE } else { COLOR_ACCENT };
        painter.rect_filled(rect, 2.0, fill);
        painter.rect_stroke(rect, 2.0, egui::Stroke::new(1.0, egui::Color32::from_black_alpha(40)));
    }

    let rows = MAX_DRAWN.div_ceil(SLOTS_PER_ROW) as f32;
    if frame.queue_length > MAX_DRAWN {
        painter.text(
            queue_origin + egui::vec2(0.0, rows * (slot.y + gap) + 4.0),
            egui::Align2::LEFT_TOP,
            format!("+{} more", frame.queue_length - MAX_DRAWN),
            egui::FontId::proportional(14.0),
            COLOR_CRITICAL,
        );
    }

    let stats = egui::Rect::from_min_size(
        queue_origin + egui::vec2(0.0, rows * (slot.y + gap) + 32.0),
        egui::vec2(280.0, 52.0),
    );
    painter.rect_filled(stats, 4.0, COLOR_PANEL);
    painter.rect_stroke(stats, 4.0, egui::Stroke::new(1.0, egui::Color32::from_gray(80)));
    let font = egui::FontId::monospace(12.0);
    painter.text(
        stats.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        format!("t = {}s", frame.elapsed_ticks),
        font.clone(),
        COLOR_TEXT,
    );
    painter.text(
        stats.left_top() + egui::vec2(8.0, 28.0),
        egui::Align2::LEFT_TOP,
        format!("Queue = {}", frame.queue_length),
        font.clone(),
        COLOR_TEXT,
    );
    painter.text(
        stats.left_top() + egui::vec2(130.0, 8.0),
        egui::Align2::LEFT_TOP,
        format!("A={} D={}", frame.arrivals, frame.departures),
        font,
        COLOR_TEXT_DIM,
    );
}

use crate::theme::*;
use eframe::egui;

/// Small filled line chart with a caption and a headline value.
pub struct SparklineWidget {
    label: String,
    values: Vec<f32>,
    color: egui::Color32,
    current_value_text: String,
    /// Horizontal position in `[0, 1]` of a highlighted point, if any.
    marker: Option<(f32, f32)>,
    size: egui::Vec2,
}

impl SparklineWidget {
    pub fn new(label: &str, values: Vec<f32>, color: egui::Color32, value_text: String) -> Self {
        Self {
            label: label.to_string(),
            values,
            color,
            current_value_text: value_text,
            marker: None,
            size: egui::vec2(320.0, 90.0),
        }
    }

    pub fn with_marker(mut self, x_fraction: f32, value: f32) -> Self {
        self.marker = Some((x_fraction.clamp(0.0, 1.0), value));
        self
    }
}

impl egui::Widget for SparklineWidget {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(self.size, egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();

            painter.rect_filled(rect, 2.0, egui::Color32::from_black_alpha(40));
            painter.rect_stroke(
                rect,
                2.0,
                egui::Stroke::new(1.0, egui::Color32::from_gray(60)),
            );

            let text_margin_y = 18.0;
            let graph_rect = egui::Rect::from_min_max(
                rect.left_top() + egui::vec2(0.0, text_margin_y),
                rect.right_bottom(),
            );

            let max_val = self
                .values
                .iter()
                .copied()
                .chain(self.marker.map(|(_, v)| v))
                .fold(0.0, f32::max)
                .max(0.001);
            let to_y = |v: f32| graph_rect.bottom() - (v / max_val) * (graph_rect.height() * 0.8) - 2.0;

            if self.values.len() >= 2 {
                let points: Vec<egui::Pos2> = self
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        let x = graph_rect.left()
                            + (i as f32 / (self.values.len() - 1) as f32) * graph_rect.width();
                        egui::pos2(x, to_y(v))
                    })
                    .collect();

                let mut shape_points = points.clone();
                shape_points.push(egui::pos2(graph_rect.right(), graph_rect.bottom()));
                shape_points.push(egui::pos2(graph_rect.left(), graph_rect.bottom()));
                painter.add(egui::Shape::convex_polygon(
                    shape_points,
                    self.color.gamma_multiply(0.15),
                    egui::Stroke::NONE,
                ));

                painter.add(egui::Shape::line(
                    points,
                    egui::Stroke::new(1.5, self.color),
                ));
            } else {
                painter.text(
                    graph_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "NO DATA",
                    egui::FontId::proportional(10.0),
                    COLOR_TEXT_DIM,
                );
            }

            if let Some((fraction, value)) = self.marker {
                let pos = egui::pos2(graph_rect.left() + fraction * graph_rect.width(), to_y(value));
                painter.circle_filled(pos, 4.0, COLOR_HEAD_OF_LINE);
            }

            painter.text(
                rect.left_top() + egui::vec2(8.0, 4.0),
                egui::Align2::LEFT_TOP,
                &self.label,
                egui::FontId::proportional(10.0),
                COLOR_TEXT_DIM,
            );
            painter.text(
                rect.right_top() + egui::vec2(-8.0, 4.0),
                egui::Align2::RIGHT_TOP,
                &self.current_value_text,
                egui::FontId::proportional(13.0),
                self.color,
            );
        }

        response
    }
}

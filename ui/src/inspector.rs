use crate::theme::*;
use eframe::egui;
use queuelab_core::{AnalyticResult, Metric, MetricKind, ResultSink, RunSummary, StatsSummary, StopReason};

/// Display strings for the analytic metrics, in publication order.
#[derive(Default)]
pub struct ResultBoard {
    rows: Vec<(MetricKind, Metric)>,
}

impl ResultSink for ResultBoard {
    fn publish(&mut self, kind: MetricKind, metric: Metric) {
        match self.rows.iter_mut().find(|(k, _)| *k == kind) {
            Some(row) => row.1 = metric,
            None => self.rows.push((kind, metric)),
        }
    }
}

fn format_metric(kind: MetricKind, metric: Metric) -> (String, egui::Color32) {
    match (kind, metric) {
        (MetricKind::Utilization, Metric::Value(v)) => (format!("{:.2}%", v * 100.0), COLOR_TEXT),
        (MetricKind::EmptyProbability, Metric::Value(v)) => (format!("{:.2}%", v * 100.0), COLOR_TEXT),
        (MetricKind::MeanTimeInSystem | MetricKind::MeanTimeInQueue, Metric::Value(hours)) => (
            format!("{hours:.4} h ({:.1} min)", hours * 60.0),
            COLOR_TEXT,
        ),
        (_, Metric::Value(v)) => (format!("{v:.4} {}", kind.unit()), COLOR_TEXT),
        (_, Metric::Divergent) => ("Not stable".to_string(), COLOR_WARN),
        (_, invalid @ Metric::InvalidProbability(_)) => (invalid.to_string(), COLOR_WARN),
    }
}

pub fn render_results(ui: &mut egui::Ui, board: &ResultBoard, analytic: Option<&AnalyticResult>) {
    ui.add_space(15.0);
    ui.heading("Steady state");
    ui.add_space(10.0);

    if board.rows.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.label(egui::RichText::new("Enter λ and μ\nthen press Calculate").color(COLOR_TEXT_DIM));
        });
        return;
    }

    if let Some(result) = analytic {
        let (text, color) = if result.stable {
            ("STABLE (ρ < 1)", COLOR_SUCCESS)
        } else {
            ("UNSTABLE (ρ ≥ 1)", COLOR_CRITICAL)
        };
        ui.label(egui::RichText::new(text).small().strong().color(color));
        ui.add_space(6.0);
    }

    egui::Grid::new("analytic_results")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for (kind, metric) in &board.rows {
                let (text, color) = format_metric(*kind, *metric);
                ui.label(egui::RichText::new(kind.label()).color(COLOR_TEXT_DIM));
                ui.label(egui::RichText::new(text).color(color).strong());
                ui.end_row();
            }
        });
}

pub fn render_run_stats(ui: &mut egui::Ui, live: Option<StatsSummary>, last: Option<&RunSummary>) {
    ui.add_space(20.0);
    ui.separator();
    ui.add_space(10.0);
    ui.label(egui::RichText::new("OBSERVED").small().strong().color(COLOR_ACCENT));

    let (stats, reason) = match (live, last) {
        (Some(stats), _) => (stats, None),
        (None, Some(summary)) => (summary.stats, Some(summary.reason)),
        (None, None) => {
            ui.label(egui::RichText::new("No simulation yet").color(COLOR_TEXT_DIM));
            return;
        }
    };

    if let Some(reason) = reason {
        let (text, color) = match reason {
            StopReason::Requested => ("Stopped by user", COLOR_TEXT_DIM),
            StopReason::HorizonReached => ("Completed", COLOR_SUCCESS),
            StopReason::SafetyLimit => ("Stopped: saturation", COLOR_CRITICAL),
        };
        ui.label(egui::RichText::new(text).color(color));
    }

    egui::Grid::new("run_stats")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("Mean queue length");
            ui.label(format!("{:.3}", stats.mean_queue_length));
            ui.end_row();
            ui.label("p50 / p99 / max");
            ui.label(format!(
                "{} / {} / {}",
                stats.p50_queue_length, stats.p99_queue_length, stats.max_queue_length
            ));
            ui.end_row();
            ui.label("Throughput");
            ui.label(format!("{:.2} /h", stats.throughput_per_hour));
            ui.end_row();
        });
}

use crate::app::QueueLabApp;
use crate::theme::*;
use eframe::egui;

fn labeled_input(ui: &mut egui::Ui, label: &str, hint: &str, value: &mut String) {
    ui.label(egui::RichText::new(label).color(COLOR_TEXT));
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(8.0);
}

pub fn render_controls(ui: &mut egui::Ui, app: &mut QueueLabApp) {
    ui.add_space(15.0);
    ui.heading("Parameters");
    ui.add_space(10.0);

    labeled_input(ui, "Arrival rate λ (per hour)", "e.g. 2", &mut app.inputs.arrival_rate);
    labeled_input(ui, "Service rate μ (per hour)", "e.g. 5", &mut app.inputs.service_rate);
    labeled_input(
        ui,
        "Simulation time (hours)",
        "0 = until stopped",
        &mut app.inputs.horizon_hours,
    );

    if ui
        .add_sized(
            [ui.available_width(), 30.0],
            egui::Button::new("Calculate").fill(COLOR_ACCENT.gamma_multiply(0.2)),
        )
        .clicked()
    {
        app.calculate();
    }

    ui.add_space(20.0);
    ui.separator();
    ui.add_space(10.0);
    ui.label(egui::RichText::new("SIMULATION").small().color(COLOR_TEXT_DIM));

    let running = app.simulation.is_running();
    ui.horizontal(|ui| {
        let width = (ui.available_width() - 8.0) / 2.0;
        if ui
            .add_enabled(
                !running,
                egui::Button::new("▶ Simulate")
                    .fill(COLOR_SUCCESS.gamma_multiply(0.2))
                    .min_size(egui::vec2(width, 30.0)),
            )
            .clicked()
        {
            app.start_simulation();
        }
        if ui
            .add_enabled(
                running,
                egui::Button::new("⏹ Stop")
                    .fill(COLOR_CRITICAL.gamma_multiply(0.2))
                    .min_size(egui::vec2(width, 30.0)),
            )
            .clicked()
        {
            app.stop_simulation();
        }
    });

    ui.add_space(10.0);
    let status = if running { "Running" } else { "Stopped" };
    ui.label(egui::RichText::new(status).strong().color(if running {
        COLOR_SUCCESS
    } else {
        COLOR_TEXT_DIM
    }));

    ui.add_space(10.0);
    ui.label("Time Speed:");
    ui.add(
        egui::Slider::new(&mut app.sim_speed, 1.0..=3_600.0)
            .suffix("x")
            .logarithmic(true),
    );
}

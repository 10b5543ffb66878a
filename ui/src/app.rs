use crate::analytics::SparklineWidget;
use crate::canvas::{render_queue, FrameBuffer};
use crate::inspector::{render_results, render_run_stats, ResultBoard};
use crate::notifications::Toasts;
use crate::palette::render_controls;
use crate::theme::*;
use eframe::egui;
use queuelab_core::{
    occupancy_curve, perform_calculation, AnalyticResult, QueueResult, RawInputs, Simulation,
    SimulationConfig, StartOutcome, TickDriver,
};
use serde::{Deserialize, Serialize};

const CURVE_SAMPLES: usize = 60;
const CURVE_MAX_UTILIZATION: f64 = 0.95;

pub struct QueueLabApp {
    pub inputs: RawInputs,
    pub simulation: Simulation,
    pub driver: TickDriver,
    pub frames: FrameBuffer,
    pub results: ResultBoard,
    pub analytic: Option<AnalyticResult>,
    pub toasts: Toasts,
    pub sim_speed: f32,
    pub last_frame_time: f64,
}

#[derive(Serialize, Deserialize)]
pub struct PersistedState {
    inputs: RawInputs,
    sim_speed: f32,
}

impl QueueLabApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> QueueResult<Self> {
        let config = SimulationConfig::default();
        let mut app = Self {
            inputs: RawInputs::new("2", "5", "1"),
            simulation: Simulation::new(config.clone())?,
            driver: TickDriver::from_config(&config),
            frames: FrameBuffer::default(),
            results: ResultBoard::default(),
            analytic: None,
            toasts: Toasts::default(),
            sim_speed: 1.0,
            last_frame_time: 0.0,
        };
        app.frames.latest = app.simulation.state().clone();
        if let Some(storage) = cc.storage {
            if let Some(state) = eframe::get_value::<PersistedState>(storage, eframe::APP_KEY) {
                app.inputs = state.inputs;
                app.sim_speed = state.sim_speed;
            }
        }
        Ok(app)
    }

    pub fn calculate(&mut self) {
        let mut board = ResultBoard::default();
        match perform_calculation(&self.inputs, &mut board, &mut self.toasts) {
            Ok(result) => {
                self.results = board;
                self.analytic = Some(result);
            }
            Err(e) => log::debug!("calculation failed: {e}"),
        }
    }

    pub fn start_simulation(&mut self) {
        match self
            .simulation
            .start_from(&self.inputs, &mut self.frames, &mut self.toasts)
        {
            Ok(StartOutcome::Started(token)) => self.driver.arm(token),
            Ok(StartOutcome::AlreadyRunning) => {}
            Err(e) => log::debug!("simulation not started: {e}"),
        }
    }

    pub fn stop_simulation(&mut self) {
        self.driver.cancel();
        self.simulation.stop(&mut self.frames);
    }

    fn render_charts(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let history: Vec<f32> = match self.simulation.history() {
                Some(live) => live.iter().map(|p| p.queue_length as f32).collect(),
                None => self
                    .simulation
                    .last_run()
                    .map(|run| run.history.iter().map(|p| p.queue_length as f32).collect())
                    .unwrap_or_default(),
            };
            let current = history.last().copied().unwrap_or(0.0);
            ui.add(SparklineWidget::new(
                "QUEUE LENGTH",
                history,
                COLOR_ACCENT,
                format!("{current:.0}"),
            ));

            ui.add_space(8.0);

            let curve: Vec<f32> = occupancy_curve(CURVE_SAMPLES, CURVE_MAX_UTILIZATION)
                .iter()
                .map(|p| p.customers_in_system as f32)
                .collect();
            let widget = match &self.analytic {
                Some(result) => match result.mean_customers_in_system.value() {
                    Some(l) if result.utilization <= CURVE_MAX_UTILIZATION => SparklineWidget::new(
                        "L vs ρ (analytic)",
                        curve,
                        COLOR_SUCCESS,
                        format!("ρ={:.2} L={l:.2}", result.utilization),
                    )
                    .with_marker((result.utilization / CURVE_MAX_UTILIZATION) as f32, l as f32),
                    _ => SparklineWidget::new(
                        "L vs ρ (analytic)",
                        curve,
                        COLOR_WARN,
                        format!("ρ={:.2} off scale", result.utilization),
                    ),
                },
                None => SparklineWidget::new("L vs ρ (analytic)", curve, COLOR_SUCCESS, String::new()),
            };
            ui.add(widget);
        });
    }
}

impl eframe::App for QueueLabApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = PersistedState {
            inputs: self.inputs.clone(),
            sim_speed: self.sim_speed,
        };
        eframe::set_value(storage, eframe::APP_KEY, &state);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.stop_simulation();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let current_real_time = ctx.input(|i| i.time);
        let dt = (current_real_time - self.last_frame_time).max(0.0);
        self.last_frame_time = current_real_time;

        if self.driver.is_armed() {
            let elapsed_ms = dt * 1000.0 * self.sim_speed as f64;
            self.driver
                .pump(elapsed_ms, &mut self.simulation, &mut self.frames, &mut self.toasts);
            ctx.request_repaint();
        }

        egui::TopBottomPanel::bottom("bottom_dashboard")
            .frame(egui::Frame::none().fill(COLOR_PANEL).inner_margin(12.0))
            .show(ctx, |ui| self.render_charts(ui));

        egui::SidePanel::left("controls")
            .default_width(220.0)
            .show(ctx, |ui| render_controls(ui, self));

        egui::SidePanel::right("results")
            .default_width(300.0)
            .show(ctx, |ui| {
                render_results(ui, &self.results, self.analytic.as_ref());
                render_run_stats(ui, self.simulation.live_stats(), self.simulation.last_run());
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(COLOR_BG))
            .show(ctx, |ui| render_queue(ui, &self.frames.latest));

        self.toasts.show(ctx, current_real_time);
    }
}

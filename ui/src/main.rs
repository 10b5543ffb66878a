mod analytics;
mod app;
mod canvas;
mod inspector;
mod notifications;
mod palette;
mod theme;

use app::QueueLabApp;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,queuelab_core=info,queuelab_ui=info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 820.0])
            .with_title("QueueLab"),
        ..Default::default()
    };
    eframe::run_native(
        "QueueLab",
        options,
        Box::new(|cc| Ok(Box::new(QueueLabApp::new(cc)?))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();
    eframe::WebLogger::init(log::LevelFilter::Info).ok();

    let web_options = eframe::WebOptions::default();
    wasm_bindgen_futures::spawn_local(async {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("queuelab_canvas"))
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok());
        let Some(canvas) = canvas else {
            log::error!("canvas #queuelab_canvas not found");
            return;
        };
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(QueueLabApp::new(cc)?))),
            )
            .await;
        if let Err(e) = started {
            log::error!("failed to start eframe: {e:?}");
        }
    });
}

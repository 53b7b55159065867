#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use clap::Parser;
    use detect_client::{configuration::get_configuration, APP_NAME};
    use detect_client_core::{FileTokenStore, Session};

    let args = detect_client::cli::Cli::parse();

    if let Err(e) = detect_client::tracing::init(&args) {
        eprintln!("Failed to start tracing: {e}");
    }

    let settings = match get_configuration(args.server.clone()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings, using defaults: {e:?}");
            detect_client::configuration::Settings::default()
        }
    };
    ::tracing::info!(?settings, "Settings loaded");

    let session = match FileTokenStore::in_config_dir(APP_NAME) {
        Ok(store) => Session::restore(store),
        Err(e) => {
            ::tracing::warn!(?e, "No place to persist the token, it will be lost on exit");
            Session::in_memory()
        }
    };

    let rt = detect_client::background_worker::create_runtime();
    let _enter = rt.enter(); // This Guard must be held to call `tokio::spawn` anywhere in the program
    detect_client::background_worker::start_background_worker(rt); // This is also needed to prevent the runtime from stopping

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([400.0, 300.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(detect_client::DetectApp::new(cc, settings, session)))),
    )
}

// When compiling to web using trunk
#[cfg(target_arch = "wasm32")]
fn main() {
    use detect_client::configuration::Settings;
    use detect_client_core::{LocalStorageTokenStore, Session};
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(detect_client::wasm_log_level()).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let window = web_sys::window().expect("No window found");
        let document = window.document().expect("No document found (No DOM)");

        // The page is served by the backend so requests go back to the same origin
        let settings = match window.location().origin() {
            Ok(origin) => Settings::with_server_address(origin),
            Err(e) => {
                log::warn!("Failed to read page origin, using default server: {e:?}");
                Settings::default()
            }
        };
        let session = Session::restore(LocalStorageTokenStore);

        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Failed to find the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(detect_client::DetectApp::new(cc, settings, session)))),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

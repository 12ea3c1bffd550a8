//! Ofrenda UI - memorial board in the browser

pub mod app;
pub mod images;
pub mod modals;
pub mod panels;

pub use app::OfrendaApp;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    web_sys::console::log_1(&"=== OFRENDA UI WASM LOADED ===".into());

    wasm_bindgen_futures::spawn_local(async {
        eframe::WebRunner::new()
            .start(
                "ofrenda_canvas",
                eframe::WebOptions::default(),
                Box::new(|cc| {
                    egui_extras::install_image_loaders(&cc.egui_ctx);
                    Ok(Box::new(OfrendaApp::from_creation_context(cc)?))
                }),
            )
            .await
            .expect("Failed to start eframe");
    });
}

// ============================================================================
// DESCUBRIENDO WEB - Frontend del planificador de salidas (RUST PURO)
// ============================================================================
// Arquitectura:
// - Views: renderizan DOM y atan eventos
// - ViewModels: estado + lógica del pipeline (sin DOM)
// - Services: SOLO comunicación con el exterior (HTTP, cookies, GPS)
// - Widgets: afordanzas de UI independientes del pipeline
// - Models: estructuras compartidas con el backend
// ============================================================================

mod app;
mod config;
mod dom;
mod models;
mod services;
mod utils;
mod viewmodels;
mod views;
mod widgets;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook para stacktraces legibles en consola
    console_error_panic_hook::set_once();

    wasm_logger::init(Config::default());
    log::info!("🚀 Descubriendo - planificador de salidas");

    App::mount()
}

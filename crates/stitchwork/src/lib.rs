//! # Stitchwork
//!
//! Host side of the game: drawing, the sidebar, the browser entry point and
//! the headless scenario runner. The simulation itself lives in
//! `stitchwork-core`.

pub mod app;
pub mod render;
pub mod sidebar;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;

// Headless runs (native only)
#[cfg(not(target_arch = "wasm32"))]
pub mod scenario;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-export core modules for convenience
pub use stitchwork_core::entity;
pub use stitchwork_core::items;
pub use stitchwork_core::simulation;
pub use stitchwork_core::world;

pub use app::App;

// WASM entry point
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages in the browser console
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }

    log::info!("Stitchwork WASM module initialized");
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn run() -> Result<(), JsValue> {
    log::info!("Starting Stitchwork (WASM)");

    web::launch().map_err(|e| JsValue::from_str(&format!("Failed to start: {:#}", e)))
}

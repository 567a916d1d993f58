//! Wallet bootstrap WASM front end.
//!
//! Resolves RPC endpoints, builds the connector list and runs the one-time
//! wallet session handshake before the page content is shown.

pub mod bridge;
pub mod dom;
pub mod exports;
pub mod render;
pub mod state;

use std::rc::Rc;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wb_config::BootstrapConfig;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    init()
}

fn init() -> Result<(), JsValue> {
    let app = Rc::new(state::App::new(BootstrapConfig::from_build_env()));
    if !state::install(Rc::clone(&app)) {
        warn!("bootstrap already installed");
        return Ok(());
    }
    info!(
        chains = app.transports.table().chains().len(),
        groups = app.connectors.len(),
        "wallet bootstrap configured"
    );

    render::render(app.session.status());

    let driver = Rc::clone(&app);
    wasm_bindgen_futures::spawn_local(async move {
        let status = driver.session.run(&driver.gate).await;
        render::render(status);
    });

    dom::when_hydrated(move || {
        on_hydrated(&app);
    })
}

/// Runs once the document is parsed: `#session-retry` only exists from here
/// on. Returns whether the retry button was bound.
fn on_hydrated(app: &state::App) -> bool {
    let bound = match dom::on_click(render::RETRY_ID, |_| spawn_retry()) {
        Ok(true) => true,
        Ok(false) => {
            warn!("no #{} element, retry unavailable", render::RETRY_ID);
            false
        }
        Err(err) => {
            warn!(?err, "failed to bind retry button");
            false
        }
    };

    render::render(app.session.status());
    if app.gate.open() {
        info!("client hydrated, mount gate open");
    }
    bound
}

fn spawn_retry() {
    wasm_bindgen_futures::spawn_local(async {
        if let Some(app) = state::app() {
            let status = app.session.retry().await;
            render::render(status);
        }
    });
}

//! Functions exported to the page's JavaScript.

use wasm_bindgen::prelude::*;
use wb_api_types::ChainId;
use wb_chain_client::EndpointTable;
use wb_session::{AccountEvent, SessionStatus};

use crate::{render, state};

#[wasm_bindgen]
pub fn session_ready() -> bool {
    state::app().is_some_and(|app| app.session.is_ready())
}

#[wasm_bindgen]
pub fn session_status() -> String {
    state::app()
        .map(|app| app.session.status())
        .unwrap_or(SessionStatus::Idle)
        .to_string()
}

/// The wallet handle once ready, `null` before.
#[wasm_bindgen]
pub fn wallet_handle() -> JsValue {
    state::app()
        .and_then(|app| app.session.handle())
        .map(|session| session.wallet.clone())
        .unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn rpc_url(chain_id: u32) -> String {
    let chain = ChainId(u64::from(chain_id));
    match state::app() {
        Some(app) => app.transports.resolve(chain).to_owned(),
        None => EndpointTable::public().resolve(chain).to_owned(),
    }
}

#[wasm_bindgen]
pub fn connector_groups() -> Result<JsValue, JsValue> {
    let groups = state::app()
        .map(|app| app.connectors.clone())
        .unwrap_or_default();
    serde_wasm_bindgen::to_value(&groups).map_err(Into::into)
}

/// Re-runs a failed session; resolves to the resulting status string.
#[wasm_bindgen]
pub fn retry_session() -> js_sys::Promise {
    wasm_bindgen_futures::future_to_promise(async {
        let Some(app) = state::app() else {
            return Ok(JsValue::from_str(SessionStatus::Idle.as_str()));
        };
        let status = app.session.retry().await;
        render::render(status);
        Ok(JsValue::from_str(status.as_str()))
    })
}

/// Pass `null` for a disconnect.
#[wasm_bindgen]
pub fn notify_account(address: Option<String>) {
    let Some(app) = state::app() else {
        return;
    };
    let event = match address {
        Some(address) => AccountEvent::Connected { address },
        None => AccountEvent::Disconnected,
    };
    app.session.on_account_event(&event);
}

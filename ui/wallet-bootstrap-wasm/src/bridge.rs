//! Bindings to the wallet-connection SDK.
//!
//! The page loads the SDK bundle and exposes it as `window.WalletConnectBridge`
//! with `initSignClient`, `createCore` and `initWeb3Wallet`. This module only
//! forwards to those functions; the handshake itself happens in JavaScript.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wb_api_types::{AppMetadata, Credential};
use wb_session::WalletSdk;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "WalletConnectBridge"], js_name = initSignClient, catch)]
    async fn init_sign_client(options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "WalletConnectBridge"], js_name = createCore, catch)]
    fn create_core(options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "WalletConnectBridge"], js_name = initWeb3Wallet, catch)]
    async fn init_web3_wallet(options: JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectOptions<'a> {
    project_id: &'a str,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsWalletSdk;

#[async_trait(?Send)]
impl WalletSdk for JsWalletSdk {
    type SignClient = JsValue;
    type Core = JsValue;
    type Wallet = JsValue;

    async fn init_sign_client(&self, credential: &Credential) -> Result<JsValue> {
        let options = project_options(credential)?;
        init_sign_client(options).await.map_err(js_error)
    }

    fn create_core(&self, credential: &Credential) -> Result<JsValue> {
        let options = project_options(credential)?;
        create_core(options).map_err(js_error)
    }

    async fn init_wallet(&self, core: JsValue, metadata: &AppMetadata) -> Result<JsValue> {
        let metadata = serde_wasm_bindgen::to_value(metadata)
            .map_err(|err| anyhow!("metadata conversion: {err}"))?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("core"), &core).map_err(js_error)?;
        js_sys::Reflect::set(&options, &JsValue::from_str("metadata"), &metadata)
            .map_err(js_error)?;

        init_web3_wallet(options.into()).await.map_err(js_error)
    }
}

fn project_options(credential: &Credential) -> Result<JsValue> {
    serde_wasm_bindgen::to_value(&ProjectOptions {
        project_id: credential.as_str(),
    })
    .map_err(|err| anyhow!("project options conversion: {err}"))
}

/// JS exceptions are not `Send`; keep only their message.
fn js_error(value: JsValue) -> anyhow::Error {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return anyhow!("{}", String::from(err.message()));
    }
    match value.as_string() {
        Some(message) => anyhow!(message),
        None => anyhow!("{value:?}"),
    }
}

//! Page-wide bootstrap state.
//!
//! Built once in `start()` and kept in a `thread_local!` (WASM is
//! single-threaded). Exported functions read it through [`app`].

use std::cell::RefCell;
use std::rc::Rc;
use wb_api_types::ConnectorGroup;
use wb_chain_client::TransportFactory;
use wb_config::BootstrapConfig;
use wb_connectors::ConnectorRegistry;
use wb_session::{MountGate, SessionInitializer};

use crate::bridge::JsWalletSdk;

pub struct App {
    pub config: BootstrapConfig,
    pub transports: TransportFactory,
    pub connectors: Vec<ConnectorGroup>,
    pub gate: MountGate,
    pub session: SessionInitializer<JsWalletSdk>,
}

impl App {
    pub fn new(config: BootstrapConfig) -> Self {
        let transports = TransportFactory::new(config.endpoint_table());
        let connectors =
            ConnectorRegistry::with_defaults().build(&config.credential, &config.app_name);
        let session = SessionInitializer::from_config(JsWalletSdk, &config);

        Self {
            config,
            transports,
            connectors,
            gate: MountGate::new(),
            session,
        }
    }
}

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

/// Installs the app; the first installation wins.
pub fn install(app: Rc<App>) -> bool {
    APP.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(app);
        true
    })
}

pub fn app() -> Option<Rc<App>> {
    APP.with(|slot| slot.borrow().clone())
}

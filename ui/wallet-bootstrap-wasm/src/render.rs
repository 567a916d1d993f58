//! Placeholder / content gate.
//!
//! Until the session is ready only `#app-placeholder` is visible. A failed
//! session additionally reveals `#session-retry`.

use wb_session::SessionStatus;

use crate::dom;

pub const PLACEHOLDER_ID: &str = "app-placeholder";
pub const ROOT_ID: &str = "app-root";
pub const RETRY_ID: &str = "session-retry";

/// Which gate elements are hidden for a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub placeholder_hidden: bool,
    pub root_hidden: bool,
    pub retry_hidden: bool,
}

impl Visibility {
    pub fn for_status(status: SessionStatus) -> Self {
        let ready = status == SessionStatus::Ready;
        Self {
            placeholder_hidden: ready,
            root_hidden: !ready,
            retry_hidden: status != SessionStatus::Failed,
        }
    }
}

pub fn render(status: SessionStatus) {
    let visibility = Visibility::for_status(status);

    if let Some(placeholder) = dom::by_id(PLACEHOLDER_ID) {
        dom::set_hidden(&placeholder, visibility.placeholder_hidden);
    }
    if let Some(root) = dom::by_id(ROOT_ID) {
        dom::set_hidden(&root, visibility.root_hidden);
    }
    if let Some(retry) = dom::by_id(RETRY_ID) {
        dom::set_hidden(&retry, visibility.retry_hidden);
    }
    dom::set_body_state(status.as_str());
}

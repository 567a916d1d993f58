use tokio::sync::watch;

/// Opens once, when the client environment has finished hydrating.
#[derive(Debug)]
pub struct MountGate {
    open: watch::Sender<bool>,
}

impl Default for MountGate {
    fn default() -> Self {
        Self::new()
    }
}

impl MountGate {
    pub fn new() -> Self {
        let (open, _) = watch::channel(false);
        Self { open }
    }

    /// Returns `true` only for the call that actually opened the gate.
    pub fn open(&self) -> bool {
        self.open.send_if_modified(|open| flip(open))
    }

    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    pub async fn wait(&self) {
        let mut rx = self.open.subscribe();
        // The sender is borrowed from self, so the channel cannot close here.
        let _ = rx.wait_for(|open| *open).await;
    }
}

/// Read-only view of the session readiness flag handed to the rendering layer.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    ready: watch::Receiver<bool>,
}

impl ReadinessGate {
    pub(crate) fn new(ready: watch::Receiver<bool>) -> Self {
        Self { ready }
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Resolves `true` once ready, or `false` if the initializer went away first.
    pub async fn wait_ready(&self) -> bool {
        let mut rx = self.ready.clone();
        rx.wait_for(|ready| *ready).await.is_ok()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.ready.clone()
    }
}

/// One-way false → true transition; reports whether it happened.
pub(crate) fn flip(flag: &mut bool) -> bool {
    if *flag {
        return false;
    }
    *flag = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_gate_opens_once() {
        let gate = MountGate::new();
        assert!(!gate.is_open());

        assert!(gate.open());
        assert!(gate.is_open());
        assert!(!gate.open());
        assert!(gate.is_open());
    }

    #[tokio::test]
    async fn wait_resolves_after_open() {
        let gate = MountGate::new();
        futures::join!(gate.wait(), async {
            tokio::task::yield_now().await;
            gate.open();
        });
        assert!(gate.is_open());
    }

    #[tokio::test]
    async fn wait_on_open_gate_returns_immediately() {
        let gate = MountGate::new();
        gate.open();
        gate.wait().await;
    }

    #[tokio::test]
    async fn readiness_reports_closed_channel() {
        let (tx, rx) = watch::channel(false);
        let readiness = ReadinessGate::new(rx);
        drop(tx);

        assert!(!readiness.wait_ready().await);
        assert!(!readiness.is_ready());
    }
}

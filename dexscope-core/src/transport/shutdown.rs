use tokio::sync::watch;

/// Broadcasts a one-way "stop" to every transport reader that subscribed.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        if !self.tx.send_replace(true) {
            tracing::debug!("shutdown signaled");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

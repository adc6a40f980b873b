//! Graceful shutdown.
//!
//! One [`Shutdown`] handle is cloned into whatever may stop the server
//! (signal listener, tests); the server holds a [`ShutdownSignal`] and
//! stops accepting once it fires.

use tokio::sync::broadcast;

/// Cloneable trigger side.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
            fired: false,
        }
    }

    /// Fire every outstanding signal. Returns how many were listening.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side; resolves once shutdown is triggered or every
/// [`Shutdown`] handle is gone.
#[derive(Debug)]
pub struct ShutdownSignal {
    rx: broadcast::Receiver<()>,
    fired: bool,
}

impl ShutdownSignal {
    pub async fn recv(&mut self) {
        if !self.fired {
            // Closed and Lagged both mean the trigger side has moved on.
            let _ = self.rx.recv().await;
            self.fired = true;
        }
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_fires_every_signal() {
        let shutdown = Shutdown::new();
        let mut first = shutdown.signal();
        let mut second = shutdown.clone().signal();

        assert_eq!(shutdown.trigger(), 2);
        first.recv().await;
        second.recv().await;
        assert!(first.is_fired() && second.is_fired());

        // Already fired: returns immediately.
        first.recv().await;
    }

    #[tokio::test]
    async fn test_dropping_all_handles_fires() {
        let shutdown = Shutdown::new();
        let mut signal = shutdown.signal();
        drop(shutdown);

        signal.recv().await;
        assert!(signal.is_fired());
    }

    #[test]
    fn test_trigger_without_listeners() {
        assert_eq!(Shutdown::new().trigger(), 0);
    }
}

//! Session provider seam: the external identity provider's contract.

use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::session::{Session, SessionChange};

/// A subscription to session-change notifications.
///
/// Each subscriber gets every change published by the provider, starting
/// with the state current at subscription time.
#[derive(Debug)]
pub struct SessionEvents {
    receiver: mpsc::UnboundedReceiver<SessionChange>,
}

impl SessionEvents {
    pub fn new(receiver: mpsc::UnboundedReceiver<SessionChange>) -> Self {
        Self { receiver }
    }

    /// Next notification, or `None` once the provider is gone.
    pub async fn next(&mut self) -> Option<SessionChange> {
        self.receiver.recv().await
    }
}

/// External identity/session provider contract.
///
/// The callback contract: a subscriber is notified with `None` on
/// sign-out/no-session and with the session on sign-in; notifications may
/// repeat with unchanged state. The first notification reflects the state
/// current at subscription time.
pub trait SessionProvider: Send + Sync {
    fn subscribe(&self) -> SessionEvents;

    fn current_session(&self) -> Option<Session>;

    fn sign_out(&self);

    /// Kick off an interactive sign-in flow where one exists.
    ///
    /// Headless providers (tests, tooling) have nothing to show; the
    /// default is a no-op.
    fn sign_in_interactive(&self) {}
}

/// In-memory session provider for tests/dev.
///
/// - No IO / best-effort fan-out
/// - Dead subscribers are pruned while publishing
#[derive(Debug, Default)]
pub struct InMemorySessionProvider {
    state: Mutex<ProviderState>,
}

#[derive(Debug, Default)]
struct ProviderState {
    current: Option<Session>,
    subscribers: Vec<mpsc::UnboundedSender<SessionChange>>,
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish a session and notify subscribers.
    pub fn sign_in(&self, session: Session) {
        if let Ok(mut state) = self.state.lock() {
            state.current = Some(session.clone());
            state
                .subscribers
                .retain(|tx| tx.send(Some(session.clone())).is_ok());
        }
    }
}

impl SessionProvider for InMemorySessionProvider {
    fn subscribe(&self) -> SessionEvents {
        let (tx, rx) = mpsc::unbounded_channel();

        // If the lock is poisoned the subscription still exists; it just
        // never receives notifications until the process restarts.
        if let Ok(mut state) = self.state.lock() {
            // New subscribers immediately observe the current state.
            let _ = tx.send(state.current.clone());
            state.subscribers.push(tx);
        }

        SessionEvents::new(rx)
    }

    fn current_session(&self) -> Option<Session> {
        self.state.lock().ok().and_then(|state| state.current.clone())
    }

    fn sign_out(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.current = None;
            state.subscribers.retain(|tx| tx.send(None).is_ok());
        }
    }
}

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tokio::sync::watch;

/// Process-wide reload signal (C9). Every `trigger()` call replaces the
/// sender, which completes every existing receiver's `.changed()` future —
/// a fresh `.subscribe()` only observes *future* triggers, giving reload
/// universality (spec invariant 9) for free without extra bookkeeping.
pub struct ReloadSignal {
    tx: std::sync::Mutex<watch::Sender<()>>,
}

impl ReloadSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(());
        ReloadSignal {
            tx: std::sync::Mutex::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<()> {
        self.tx.lock().expect("reload signal mutex poisoned").subscribe()
    }

    /// Fires the current signal and installs a fresh one for future
    /// connections.
    pub fn trigger(&self) {
        let (new_tx, _rx) = watch::channel(());
        let mut guard = self.tx.lock().expect("reload signal mutex poisoned");
        let old_tx = std::mem::replace(&mut *guard, new_tx);
        let _ = old_tx.send(());
    }
}

impl Default for ReloadSignal {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AdminState {
    pub reload: Arc<ReloadSignal>,
    pub connections: Arc<AtomicI64>,
}

/// `POST /sse/admin/force-reload`: fires the shared reload signal and
/// reports how many connections were live at the moment of the call.
pub async fn force_reload(State(state): State<Arc<AdminState>>) -> impl IntoResponse {
    let count = state.connections.load(Ordering::SeqCst);
    state.reload.trigger();
    Json(json!({ "status": "ok", "connections": count }))
}

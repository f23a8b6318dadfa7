use std::sync::Arc;
use horizon_ledger::InventoryLedger;
use horizon_shared::LedgerEvent;
use tokio::sync::{broadcast, Mutex};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    /// One writer at a time; every handler goes through this lock.
    pub ledger: Arc<Mutex<InventoryLedger>>,
    pub events: broadcast::Sender<LedgerEvent>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(ledger: InventoryLedger, auth: AuthConfig) -> Self {
        let (events, _) = broadcast::channel(100);
        let ledger = ledger.with_events(events.clone());
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            events,
            auth,
        }
    }
}

use crate::metrics::StockMetrics;
use crate::stock::StockLedger;

/// Inventory service shared state.
pub struct InventoryState {
    /// The authoritative stock ledger. Mutated only via `reserve`.
    pub ledger: StockLedger,
}

impl InventoryState {
    pub fn new(ledger: StockLedger) -> Self {
        Self { ledger }
    }

    /// Point every stock gauge at the current ledger level and zero the
    /// reservation counter, so the first scrape carries a sample per
    /// instrument. Safe to call more than once.
    pub fn init_instruments(&self) {
        StockMetrics::init(super::SERVICE);
        for (item, level) in self.ledger.snapshot() {
            StockMetrics::set_stock_level(super::SERVICE, &item, level);
        }
    }
}

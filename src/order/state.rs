use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::client::InventoryClient;

/// Order service shared state.
pub struct OrderState {
    pub inventory: InventoryClient,
    /// Last issued order-id timestamp (ms). Bumped past itself on ties so
    /// ids stay unique under concurrent placements.
    last_issued_ms: AtomicU64,
}

impl OrderState {
    pub fn new(inventory: InventoryClient) -> Self {
        Self {
            inventory,
            last_issued_ms: AtomicU64::new(0),
        }
    }

    /// Generate the next order identifier.
    ///
    /// Derived from the wall clock, strictly monotonic: two placements in
    /// the same millisecond get distinct, increasing ids.
    pub fn next_order_id(&self) -> String {
        format!("ORDER-{}", self.next_order_ms())
    }

    fn next_order_ms(&self) -> u64 {
        let mut last = self.last_issued_ms.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms().max(last + 1);
            match self.last_issued_ms.compare_exchange_weak(
                last,
                candidate,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => last = observed,
            }
        }
    }
}

/// Current time in milliseconds
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_state() -> OrderState {
        let client =
            InventoryClient::new("http://localhost:3002", Duration::from_millis(100)).unwrap();
        OrderState::new(client)
    }

    #[test]
    fn order_ids_carry_the_prefix() {
        let state = test_state();
        let id = state.next_order_id();
        assert!(id.starts_with("ORDER-"));
        assert!(id.len() > "ORDER-".len());
    }

    #[test]
    fn order_ids_are_strictly_increasing() {
        let state = test_state();
        let a = state.next_order_ms();
        let b = state.next_order_ms();
        let c = state.next_order_ms();
        assert!(a < b && b < c);
    }

    #[test]
    fn concurrent_ids_are_unique() {
        let state = Arc::new(test_state());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    (0..100).map(|_| state.next_order_id()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate order id issued");
            }
        }
        assert_eq!(seen.len(), 800);
    }
}

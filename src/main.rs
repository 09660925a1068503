//! ordermesh - Order-Fulfillment Coordination
//!
//! Entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌────────────┐
//! │ Gateway  │───▶│  Order   │───▶│ Inventory  │
//! │  :8000   │    │  :3001   │    │   :3002    │
//! └──────────┘    └──────────┘    └────────────┘
//!       │         ┌──────────┐
//!       └────────▶│   User   │
//!                 │  :3003   │
//! ```
//!
//! One process runs one service (`--service order`) the way the reference
//! deployment does, or all four (`--service all`, the default) for local
//! development. Every service shares the process-wide metrics recorder;
//! samples stay distinguishable through the `service` label.

use std::sync::Arc;

use anyhow::Context;

use ordermesh::config::AppConfig;
use ordermesh::stock::StockLedger;
use ordermesh::{gateway, inventory, logging, metrics, order, user};

fn get_service() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--service" || args[i] == "-s") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "all".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let _guard = logging::init_logging(&config.log);

    metrics::install().context("failed to install metrics recorder")?;

    let service = get_service();
    println!("🚀 ordermesh ({}) starting: {}", env!("GIT_HASH"), service);

    match service.as_str() {
        "gateway" => {
            let state = Arc::new(gateway::state::GatewayState::new(&config.gateway));
            gateway::serve(config.gateway.port, state).await?;
        }
        "order" => {
            let state = order::build_state(&config.order)?;
            order::serve(config.order.port, state).await?;
        }
        "inventory" => {
            let state = Arc::new(inventory::state::InventoryState::new(StockLedger::seeded()));
            inventory::serve(config.inventory.port, state).await?;
        }
        "user" => {
            let state = Arc::new(user::UserState::seeded());
            user::serve(config.user.port, state).await?;
        }
        "all" => {
            let inventory_state =
                Arc::new(inventory::state::InventoryState::new(StockLedger::seeded()));
            let order_state = order::build_state(&config.order)?;
            let user_state = Arc::new(user::UserState::seeded());
            let gateway_state = Arc::new(gateway::state::GatewayState::new(&config.gateway));

            tokio::try_join!(
                inventory::serve(config.inventory.port, inventory_state),
                order::serve(config.order.port, order_state),
                user::serve(config.user.port, user_state),
                gateway::serve(config.gateway.port, gateway_state),
            )?;
        }
        other => {
            anyhow::bail!(
                "unknown service {:?} (expected gateway|order|inventory|user|all)",
                other
            );
        }
    }

    Ok(())
}

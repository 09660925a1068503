//! Environment-driven configuration.
//!
//! Every service reads its listening port and upstream base URLs from the
//! environment, falling back to the fixed local defaults when unset.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log: LogConfig,
    pub gateway: GatewayConfig,
    pub order: OrderConfig,
    pub inventory: InventoryConfig,
    pub user: UserConfig,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub rotation: String,
    pub use_json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "ordermesh.log".to_string(),
            rotation: "daily".to_string(),
            use_json: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub order_url: String,
    pub inventory_url: String,
    pub user_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            order_url: "http://localhost:3001".to_string(),
            inventory_url: "http://localhost:3002".to_string(),
            user_url: "http://localhost:3003".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderConfig {
    pub port: u16,
    pub inventory_url: String,
    /// Bound on the reserve call into the inventory service.
    pub inventory_timeout_ms: u64,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            inventory_url: "http://localhost:3002".to_string(),
            inventory_timeout_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InventoryConfig {
    pub port: u16,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { port: 3002 }
    }
}

#[derive(Debug, Clone)]
pub struct UserConfig {
    pub port: u16,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self { port: 3003 }
    }
}

impl AppConfig {
    /// Assemble the full configuration from the environment.
    pub fn from_env() -> Self {
        let order_url = env_or("ORDER_SERVICE_URL", "http://localhost:3001");
        let inventory_url = env_or("INVENTORY_SERVICE_URL", "http://localhost:3002");
        let user_url = env_or("USER_SERVICE_URL", "http://localhost:3003");

        Self {
            log: LogConfig {
                level: env_or("LOG_LEVEL", "info"),
                dir: env_or("LOG_DIR", "logs"),
                file: env_or("LOG_FILE", "ordermesh.log"),
                rotation: env_or("LOG_ROTATION", "daily"),
                use_json: env_parse("LOG_JSON", false),
            },
            gateway: GatewayConfig {
                port: env_parse("GATEWAY_PORT", 8000),
                order_url: order_url.clone(),
                inventory_url: inventory_url.clone(),
                user_url,
            },
            order: OrderConfig {
                port: env_parse("ORDER_PORT", 3001),
                inventory_url,
                inventory_timeout_ms: env_parse("INVENTORY_TIMEOUT_MS", 2_000),
            },
            inventory: InventoryConfig {
                port: env_parse("INVENTORY_PORT", 3002),
            },
            user: UserConfig {
                port: env_parse("USER_PORT", 3003),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an env var, keeping the default when it is unset or malformed.
fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("⚠️  Ignoring malformed {}={:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

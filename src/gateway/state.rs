use crate::config::GatewayConfig;

/// Gateway shared state: one pooled client plus the upstream base URLs.
#[derive(Clone)]
pub struct GatewayState {
    pub http: reqwest::Client,
    pub order_url: String,
    pub inventory_url: String,
    pub user_url: String,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            order_url: config.order_url.clone(),
            inventory_url: config.inventory_url.clone(),
            user_url: config.user_url.clone(),
        }
    }
}

//! OpenAPI document for the public HTTP surface, served by the gateway.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ordermesh",
        description = "Order-fulfillment coordination: gateway, order, inventory and user services."
    ),
    paths(
        crate::gateway::handlers::proxy_users,
        crate::gateway::handlers::proxy_inventory,
        crate::gateway::handlers::proxy_orders,
        crate::order::handlers::place_order,
        crate::inventory::handlers::list_stock,
        crate::inventory::handlers::reduce_stock,
        crate::user::list_users,
    ),
    tags(
        (name = "Gateway", description = "Forwarding routes"),
        (name = "Orders", description = "Order placement"),
        (name = "Inventory", description = "Stock ledger"),
        (name = "Users", description = "Read-only user directory")
    )
)]
pub struct ApiDoc;

//! HTTP handlers for items-service.

pub mod health;
pub mod index;
pub mod items;
pub mod metrics;

pub use health::{health_check, readiness_check};
pub use index::{index, not_found, CONFIRMATION_MESSAGE};
pub use items::list_items;
pub use self::metrics::metrics_endpoint;

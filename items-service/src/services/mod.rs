pub mod database;
pub mod metrics;
pub mod store;

pub use database::ItemDb;
pub use self::metrics::{get_metrics, init_metrics, record_items_listed};
pub use store::{ItemStore, StoreState};

pub mod cache;
pub mod database;
pub mod impls;
pub mod model;
mod store;

pub use cache::CacheService;
pub use database::{Database, MIGRATOR};
pub use model::progression::{ProgressionRecord, UserProfile};

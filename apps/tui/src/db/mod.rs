pub mod migrations;
pub mod models;
pub mod queries;
pub use migrations::{create_database_pool, setup_database};
pub use queries::{fetch_radar_rows, insert_blip};

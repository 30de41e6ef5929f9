pub mod app;
pub mod cards;
pub mod demographics;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod source;
pub mod state;
pub mod table;
pub mod ui;

pub use app::router;
pub use demographics::aggregate;
pub use source::{fetch_marketing_data, resolve_data_source, DataSource};
pub use state::{AppState, LoadState};

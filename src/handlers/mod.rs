pub mod health;
pub mod items;
pub mod me;

pub use health::health_handler;
pub use items::{create_handler, delete_handler, get_handler, list_handler, update_handler};
pub use me::me_handler;

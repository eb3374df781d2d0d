pub mod table_manager;

pub use table_manager::{GameCommand, TableManager};

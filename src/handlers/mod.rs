pub mod health;
pub mod create;
pub mod read;
pub mod update;
pub mod delete;

pub use health::{health_handler, ready_handler};
pub use create::create_handler;
pub use read::read_handler;
pub use update::update_handler;
pub use delete::delete_handler;

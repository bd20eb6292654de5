pub mod draw;
pub mod events;

pub use events::{AppCommand, EventHandler};

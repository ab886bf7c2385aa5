pub mod console;
pub mod menu;
pub mod messages;

pub use console::{Console, InterruptDecision};

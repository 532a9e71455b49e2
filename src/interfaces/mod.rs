//! Interface layer: conversation transports driving the intake engine.

pub mod console;

pub use console::{run_console, ConsoleDriver};

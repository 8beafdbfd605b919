//! CLI infrastructure for snake-q
//!
//! Commands for training the agent on the Snake game and inspecting the
//! value tables it leaves behind.

pub mod commands;
pub mod output;

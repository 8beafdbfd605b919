//! Subcommands of the `snake-q` binary

pub mod inspect;
pub mod train;

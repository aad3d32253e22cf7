//! Pokédex TUI - paginated PokeAPI catalog browser
//!
//! The binary wires these modules to a terminal; the library exposes them for
//! testing.

pub mod action;
pub mod api;
pub mod config;
pub mod effect;
pub mod evolution;
pub mod logging;
pub mod pagination;
pub mod reducer;
pub mod state;
pub mod ui;

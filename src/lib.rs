//! Weathervue - weather panel and signup form for the terminal
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod icons;
pub mod logging;
pub mod reducer;
pub mod report;
pub mod sprites;
pub mod state;
pub mod validation;

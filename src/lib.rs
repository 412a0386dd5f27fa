//! Weather screen - current conditions and a 7-day forecast for a searchable city
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod conditions;
pub mod config;
pub mod effect;
pub mod format;
pub mod persist;
pub mod reducer;
pub mod state;
pub mod tasks;

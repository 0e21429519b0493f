//! Shared models used by every feature slice.

pub mod models;

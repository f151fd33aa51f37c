// Library root for the Tokyo Weekend Events service

pub mod core;
pub mod state;
pub mod engine;
pub mod loader;
pub mod auth;
pub mod api;
pub mod config;

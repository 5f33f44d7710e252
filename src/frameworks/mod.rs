pub mod app;
pub mod config;
pub mod google;
pub mod provider;

pub mod cli;
pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod render;
pub mod repository;
pub mod state;
pub mod views;

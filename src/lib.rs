pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod present;
pub mod services;
pub mod session;
pub mod source;
pub mod state;

pub mod app;
pub mod client;
pub mod config;
pub mod dto;
pub mod handler;
pub mod model;
pub mod router;
pub mod service;
pub mod util;

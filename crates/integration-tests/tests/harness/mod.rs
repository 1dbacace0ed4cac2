#![allow(dead_code, clippy::new_without_default, clippy::return_self_not_must_use)]

pub mod config;
pub mod mock_provider;
pub mod server;

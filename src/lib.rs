#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod event_handler;
pub mod layout;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod ui;

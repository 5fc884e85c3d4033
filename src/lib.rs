//! Photogrid Library
//!
//! A terminal image search browser. This module exposes the search client,
//! session cache, pagination controller and UI for the binary and for
//! integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod controller;
pub mod data;
pub mod fetcher;
pub mod logging;
pub mod ui;

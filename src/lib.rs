// ABOUTME: Library crate for trendify exposing the wizard, media and UI layers for the binary and tests

#![allow(missing_docs)]

pub mod analytics;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod media;
pub mod timer;
pub mod wizard;

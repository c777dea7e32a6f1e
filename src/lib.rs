//! Interactive employment / unemployment dashboard.
//!
//! Four chart panels over one yearly table, each with its own chart kind,
//! date range and fixed missing-data strategy. Everything below `app` and
//! `ui` is toolkit-independent and driven through [`state::Session`].

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod dispatch;
pub mod error;
pub mod impute;
pub mod panel;
pub mod state;
pub mod ui;
pub mod visibility;

//! Papergum News - a news aggregation frontend
//!
//! This crate renders the Papergum news listing and article pages.
//! Every view fetches its data from the external news backend and
//! renders it server side, with htmx loading the content after the
//! page shell is shown.

pub mod card;
pub mod client;
pub mod config;
pub mod models;
pub mod routes;
pub mod state;

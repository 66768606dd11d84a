//! Application service layer - config, link handling, form view-models,
//! authentication and order submission

pub mod app;
pub mod config;
pub mod constants;
pub mod export;
pub mod form;
pub mod link;
pub mod repository;

//! Client core for the HelpFreshers career guidance platform: volunteer
//! registration and approval, mentor browsing, session booking and the
//! role-gated admin and volunteer dashboards, all over the REST API.

pub mod api;
pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

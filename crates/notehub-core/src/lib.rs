//! Core notehub library (config, session store, REST client, hierarchy cursor).

pub mod api;
pub mod config;
pub mod hierarchy;
pub mod logging;
pub mod session;

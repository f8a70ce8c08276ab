//! Terminal front end for the Empowering The Nation course app.

pub mod app;
pub mod config;
pub mod logging;
pub mod render;

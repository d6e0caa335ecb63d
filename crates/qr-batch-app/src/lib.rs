//! Application service layer - config, artifact naming, batch conversion

pub mod config;
pub mod constants;
pub mod converter;
pub mod naming;

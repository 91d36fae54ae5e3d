//! Command handlers for the redive CLI

pub mod build;
pub mod configure;
pub mod decode;
pub mod update;

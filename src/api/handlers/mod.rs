//! API handlers

pub mod assets;
pub mod info;
pub mod page;
pub mod tasks;

// src/services/mod.rs

pub mod gate;
pub mod quiz_fetch;
pub mod scoring;
pub mod session;
pub mod store;
pub mod timer;

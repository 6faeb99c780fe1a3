// timejump - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: app or platform.

pub mod discovery;
pub mod export;
pub mod gaps;
pub mod model;
pub mod report;
pub mod timestamp;

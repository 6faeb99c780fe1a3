// timejump - app/mod.rs
//
// Application layer: multi-file scan orchestration.
// Dependencies: core and platform layers.

pub mod scan;

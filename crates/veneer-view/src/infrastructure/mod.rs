//! Infrastructure layer: bridge plumbing for the view process.

pub mod bridge;

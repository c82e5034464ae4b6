//! Core value types, transforms, and file I/O.

pub mod loaders;
pub mod transforms;
pub mod types;
pub mod writers;

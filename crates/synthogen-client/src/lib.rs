//! Client facade for the Synthogen native data-generation engine.
//!
//! The engine is a precompiled C-ABI dynamic library; this crate locates
//! and loads it once per process, serializes typed requests from
//! `synthogen-schema` into the wire contract, bridges native progress
//! notifications back to caller closures, and converts every native failure
//! into a typed error.

pub mod client;
pub mod error;
pub mod ffi;
pub mod loader;

pub use client::{AsWireSchema, Client};
pub use error::{Error, Result};
pub use ffi::{Engine, NativeEngine, ProgressSink};
pub use loader::LIBRARY_NAME;

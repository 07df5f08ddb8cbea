//! Schema model and wire contract for the Synthogen native engine.
//!
//! This crate defines the typed request model a caller builds client-side
//! (`Schema` nodes, string generators, transforms) and the canonical JSON
//! mapping the native engine parses. It is pure data: generation itself
//! happens inside the engine, behind `synthogen-client`.

pub mod generator;
pub mod schema;
pub mod transform;
pub mod wire;

pub use generator::{FormatArg, StringGenerator};
pub use schema::{
    AnyOfSchema, ArrayLength, ArraySchema, BoolSchema, CounterSchema, FileMode, FileSchema,
    FlattenSchema, IntegerSchema, NullSchema, NumberSchema, ObjectSchema, PluginSchema, Schema,
    StringSchema,
};
pub use transform::{
    FilterOperator, FilterTransform, PluginTransform, RegexFilter, SortTransform,
    StringCaseTransform, ToStringTransform, Transform,
};
pub use wire::{from_wire, to_wire, to_wire_value};

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use synthogen_schema::Schema;
use tracing::debug;

use crate::error::Result;
use crate::ffi::Engine;
use crate::loader;

/// Anything that can cross the wire as a generation request: a typed
/// `Schema` tree (serialized first) or raw JSON text (passed through
/// unvalidated; a malformed document is rejected by the engine, not here).
pub trait AsWireSchema {
    fn wire_schema(&self) -> Result<Cow<'_, str>>;
}

impl AsWireSchema for Schema {
    fn wire_schema(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Owned(synthogen_schema::to_wire(self)?))
    }
}

impl AsWireSchema for str {
    fn wire_schema(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl AsWireSchema for String {
    fn wire_schema(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<T: AsWireSchema + ?Sized> AsWireSchema for &T {
    fn wire_schema(&self) -> Result<Cow<'_, str>> {
        (**self).wire_schema()
    }
}

/// Public entry point for generation requests.
///
/// Construction ensures the native engine is loaded (once per process);
/// every generation call is an independent, synchronous foreign call.
/// Cloning is cheap and clones share the same engine.
#[derive(Clone)]
pub struct Client {
    engine: Arc<dyn Engine>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Connects to the engine via the default resolution order.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: loader::load(None)?,
        })
    }

    /// Connects to the engine at an explicit path, or by logical name when
    /// the argument carries no path separator. Only the call that performs
    /// the process-wide load observes the argument.
    pub fn with_library_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            engine: loader::load(Some(path.as_ref()))?,
        })
    }

    /// Runs the facade against an arbitrary engine implementation. The seam
    /// used by tests; also handy for instrumenting an engine.
    pub fn from_engine(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Generates a document and returns the raw result text.
    pub fn generate(&self, schema: impl AsWireSchema) -> Result<String> {
        let wire = schema.wire_schema()?;
        debug!(bytes = wire.len(), "submitting generation request");
        self.engine.generate_random_data(&wire, None)
    }

    /// Generates a document, forwarding native progress events to
    /// `on_progress` as `(current, total)` pairs, in order, on this call
    /// path only.
    pub fn generate_with_progress(
        &self,
        schema: impl AsWireSchema,
        mut on_progress: impl FnMut(u64, u64),
    ) -> Result<String> {
        let wire = schema.wire_schema()?;
        debug!(bytes = wire.len(), "submitting generation request with progress");
        self.engine
            .generate_random_data(&wire, Some(&mut on_progress))
    }

    /// Generates a document and deserializes it into `T`.
    pub fn generate_as<T: DeserializeOwned>(&self, schema: impl AsWireSchema) -> Result<T> {
        Ok(serde_json::from_str(&self.generate(schema)?)?)
    }

    /// Typed generation with progress forwarding.
    pub fn generate_as_with_progress<T: DeserializeOwned>(
        &self,
        schema: impl AsWireSchema,
        on_progress: impl FnMut(u64, u64),
    ) -> Result<T> {
        Ok(serde_json::from_str(
            &self.generate_with_progress(schema, on_progress)?,
        )?)
    }

    /// The engine's self-describing schema document, for validation and
    /// tooling. Independent of any request schema.
    pub fn engine_schema(&self) -> Result<String> {
        self.engine.schema_document()
    }
}

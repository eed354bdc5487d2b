//! Context passed to operation handlers.
//!
//! Carries the parsed input and a reference to the shared state the service
//! was built over.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;

/// The context passed to every operation handler.
///
/// Generic over `S`, the state the service dispatches against.
pub struct Context<'a, S> {
    /// Raw JSON arguments from the request.
    input: Value,
    state: &'a S,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(input: Value, state: &'a S) -> Self {
        Self { input, state }
    }

    /// Deserialize the arguments into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Get the raw JSON arguments.
    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    pub fn state(&self) -> &S {
        self.state
    }

    /// Check if the arguments contain a non-null field.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some_and(|v| !v.is_null())
    }

    /// Check if the arguments contain all specified fields.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}

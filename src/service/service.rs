//! Service — operation handler registry and dispatch.
//!
//! `Service<S>` holds shared state and a set of named operation handlers.
//! Each handler receives a `Context<S>` and returns `Result<Value, HandlerError>`.
//!
//! ## Example
//!
//! ```
//! use media_catalog::service::Service;
//! use serde_json::json;
//!
//! let service = Service::new(()).operation("ping", |_ctx| Ok(json!({ "pong": true })));
//! let result = service.dispatch("ping", json!({})).unwrap();
//! assert_eq!(result, json!({ "pong": true }));
//! ```

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::context::Context;
use super::error::HandlerError;

type Guard<S> = Box<dyn Fn(&Context<S>) -> bool + Send + Sync>;
type Handler<S> = Box<dyn Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered operation handler with optional guard.
struct OperationHandler<S> {
    guard: Option<Guard<S>>,
    handle: Handler<S>,
}

/// Routes named operations to handler functions.
pub struct Service<S> {
    state: S,
    handlers: HashMap<String, OperationHandler<S>>,
}

impl<S: Send + Sync + 'static> Service<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            handlers: HashMap::new(),
        }
    }

    /// Register an operation handler.
    pub fn operation<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            OperationHandler {
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register an operation handler with a guard function.
    ///
    /// The guard is called before the handler. If it returns `false`,
    /// the operation is rejected with `HandlerError::GuardRejected`.
    pub fn operation_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<S>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            OperationHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch an operation by name.
    pub fn dispatch(&self, operation: &str, input: Value) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(operation)
            .ok_or_else(|| HandlerError::UnknownOperation(operation.to_string()))?;

        let ctx = Context::new(input, &self.state);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                debug!(operation, "guard rejected operation");
                return Err(HandlerError::GuardRejected(operation.to_string()));
            }
        }

        (handler.handle)(&ctx)
    }

    /// Registered operation names, sorted.
    pub fn operations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

//! Handler references and dispatch.

use crate::capability::CapabilitySet;
use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Signature shared by every handler: the application context, the current
/// role, and any extra arguments forwarded from the permission check.
pub type InlineFn<C> = dyn Fn(&C, &str, &[Value]) -> Value + Send + Sync;

/// A rule's handler.
///
/// Either a closure invoked directly, or a `"set.method"` target dispatched
/// through a registered [`CapabilitySet`]. Both shapes receive the same
/// `(context, role, args)` argument list, so inline and generated rules share
/// one call path.
#[derive(Clone)]
pub enum Handler<C> {
    Inline(Arc<InlineFn<C>>),
    Named(String),
}

impl<C> Handler<C> {
    /// Wrap a closure as an inline handler.
    pub fn inline<F>(f: F) -> Self
    where
        F: Fn(&C, &str, &[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Inline(Arc::new(f))
    }

    /// Reference a `"set.method"` target, resolved at check time.
    pub fn named(target: impl Into<String>) -> Self {
        Self::Named(target.into())
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Inline(_) => f.write_str("Handler::Inline(..)"),
            Handler::Named(target) => f.debug_tuple("Handler::Named").field(target).finish(),
        }
    }
}

/// Invoke a handler with the uniform argument contract.
pub(crate) fn invoke<C>(
    handler: &Handler<C>,
    sets: &HashMap<String, Arc<dyn CapabilitySet<C>>>,
    context: &C,
    role: &str,
    args: &[Value],
) -> Result<Value> {
    match handler {
        Handler::Inline(f) => Ok(f(context, role, args)),
        Handler::Named(target) => {
            let (set_name, method) = target
                .split_once('.')
                .ok_or_else(|| Error::BadTarget(target.clone()))?;
            let set = sets
                .get(set_name)
                .ok_or_else(|| Error::UnknownCapabilitySet(set_name.to_string()))?;
            set.call(method, context, role, args)
        }
    }
}

/// Interpret a raw handler result against the requested action.
///
/// Booleans decide directly and ignore the action. Arrays grant the action
/// when it appears as an exact string element. Anything else denies.
pub(crate) fn interpret(result: &Value, action: &str) -> bool {
    match result {
        Value::Bool(allowed) => *allowed,
        Value::Array(actions) => actions.iter().any(|a| a.as_str() == Some(action)),
        _ => false,
    }
}

//! Capability sets and reflective rule generation.

use crate::Result;
use cache::RuleMap;
use serde_json::Value;

/// A set of named capabilities exposed by the host application.
///
/// This is the registration interface behind named handlers and
/// [`define_rules_from_class_methods`](crate::Permissions::define_rules_from_class_methods):
/// the host lists its exposed method names and dispatches calls to them,
/// rather than the engine reflecting over the type at runtime.
pub trait CapabilitySet<C>: Send + Sync {
    /// Identifier used to namespace generated targets and cache keys.
    fn name(&self) -> &str;

    /// Names of the exposed capability methods.
    ///
    /// Constructor and reserved names are filtered out during generation, so
    /// listing them here is harmless.
    fn methods(&self) -> Vec<String>;

    /// Dispatch one of the exposed methods with the uniform
    /// `(context, role, args)` contract.
    ///
    /// Implementations return [`Error::BadTarget`](crate::Error::BadTarget)
    /// for method names they do not recognize.
    fn call(&self, method: &str, context: &C, role: &str, args: &[Value]) -> Result<Value>;
}

/// Constructor and double-underscore names never become rules.
pub(crate) fn is_reserved(method: &str) -> bool {
    method == "new" || method.starts_with("__")
}

/// Build the generated rule map for a capability set: one
/// `method -> "set.method"` entry per exposed method, reserved names excluded.
pub(crate) fn scan<C>(set: &dyn CapabilitySet<C>) -> RuleMap {
    set.methods()
        .into_iter()
        .filter(|method| !is_reserved(method))
        .map(|method| {
            let target = format!("{}.{method}", set.name());
            (method, target)
        })
        .collect()
}

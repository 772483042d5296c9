//! Permission checking against the rule registry.

use crate::capability::{scan, CapabilitySet};
use crate::config::RuleConfig;
use crate::handler::{interpret, invoke};
use crate::{Error, Handler, Result, RuleRegistry};
use cache::{RuleCache, RuleMap};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Permission checker for one authorization context.
///
/// Owns the rule registry, the registered capability sets, the current role,
/// and the application context handed to every handler. Intended for a single
/// logical owner (one request or session) at a time; every mutating operation
/// takes `&mut self`.
pub struct Permissions<C> {
    registry: RuleRegistry<C>,
    sets: HashMap<String, Arc<dyn CapabilitySet<C>>>,
    cache: Option<Box<dyn RuleCache>>,
    context: C,
    current_role: String,
}

impl<C> Permissions<C> {
    /// Create a checker with the given context and initial role.
    pub fn new(context: C, current_role: impl Into<String>) -> Self {
        Self {
            registry: RuleRegistry::new(),
            sets: HashMap::new(),
            cache: None,
            context,
            current_role: current_role.into(),
        }
    }

    /// Attach a cache backend for reflective rule generation.
    ///
    /// Caching stays disengaged until a generation call also passes a
    /// non-zero TTL.
    pub fn with_cache(mut self, cache: impl RuleCache + 'static) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    /// Register a capability set under its own name, for named dispatch and
    /// rule generation.
    pub fn register(&mut self, set: Arc<dyn CapabilitySet<C>>) {
        self.sets.insert(set.name().to_string(), set);
    }

    /// Set the current role for all subsequent checks.
    pub fn set_current_role(&mut self, role: impl Into<String>) {
        self.current_role = role.into();
    }

    /// The role checks currently run under.
    pub fn current_role(&self) -> &str {
        &self.current_role
    }

    /// Whether the current role equals `role` exactly.
    pub fn is(&self, role: &str) -> bool {
        self.current_role == role
    }

    /// The rule registry backing this checker.
    pub fn registry(&self) -> &RuleRegistry<C> {
        &self.registry
    }

    /// Define a rule.
    ///
    /// Fails with [`Error::DuplicateRule`] when `name` exists and `overwrite`
    /// is false; replaces silently otherwise.
    pub fn define_rule(
        &mut self,
        name: impl Into<String>,
        handler: Handler<C>,
        overwrite: bool,
    ) -> Result<()> {
        self.registry.define(name, handler, overwrite)
    }

    /// Define one list-shaped rule per entry in a static configuration.
    ///
    /// Names colliding with existing rules are errors; configuration is
    /// setup-time and fails loud.
    pub fn define_rules_from_config(&mut self, config: &RuleConfig) -> Result<()> {
        for (name, handler) in config.handlers() {
            self.registry.define(name, handler, false)?;
        }
        Ok(())
    }

    /// Derive one rule per exposed method of the registered capability set
    /// `name`, merging them into the registry.
    ///
    /// With a cache attached and `ttl > 0`, a fresh cached scan is merged
    /// without consulting the set again; otherwise the set is scanned and the
    /// result stored before merging. A cache hit and a fresh scan yield the
    /// same rules for the same set.
    pub fn define_rules_from_class_methods(&mut self, name: &str, ttl: u64) -> Result<()> {
        let set = self
            .sets
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownCapabilitySet(name.to_string()))?;

        let use_cache = ttl > 0 && self.cache.is_some();
        let cache_key = format!("rules_class_methods/{name}");

        if use_cache {
            if let Some(cache) = self.cache.as_ref() {
                if let Some(entry) = cache.get(&cache_key)? {
                    if entry.is_fresh(ttl) {
                        debug!(set = name, "reusing cached rule set");
                        self.merge_named(entry.rules);
                        return Ok(());
                    }
                }
            }
        }

        let rules = scan(set.as_ref());
        if use_cache {
            if let Some(cache) = self.cache.as_mut() {
                cache.put(&cache_key, &rules, ttl)?;
            }
        }
        debug!(set = name, count = rules.len(), "generated rule set");
        self.merge_named(rules);
        Ok(())
    }

    fn merge_named(&mut self, rules: RuleMap) {
        self.registry.merge(
            rules
                .into_iter()
                .map(|(name, target)| (name, Handler::named(target))),
        );
    }

    /// Check whether the current role may perform `permission`.
    ///
    /// The permission may carry one dotted action (`"video.create"` checks
    /// action `"create"` under rule `"video"`). Checking an undefined rule is
    /// an error, never a silent deny; an unrecognized handler result shape is
    /// a silent deny, never an error.
    pub fn can(&self, permission: &str, args: &[Value]) -> Result<bool> {
        let (base, action) = split_permission(permission);
        let handler = self.registry.lookup(base)?;
        let result = invoke(handler, &self.sets, &self.context, &self.current_role, args)?;
        let allowed = interpret(&result, action);
        debug!(permission, role = %self.current_role, allowed, "permission check");
        Ok(allowed)
    }

    /// Alias for [`can`](Self::can) with no extra arguments.
    pub fn has(&self, permission: &str) -> Result<bool> {
        self.can(permission, &[])
    }
}

/// Split a permission into base rule name and action at the first `.`.
///
/// Anything past a second `.` is discarded.
fn split_permission(permission: &str) -> (&str, &str) {
    match permission.split_once('.') {
        Some((base, rest)) => {
            let action = rest.split('.').next().unwrap_or("");
            (base, action)
        }
        None => (permission, ""),
    }
}

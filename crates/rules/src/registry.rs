//! Rule registry.

use crate::{Error, Handler, Result};
use std::collections::HashMap;

/// Named rules for one authorization context.
///
/// Rule names are unique; redefining a name is an error unless overwrite is
/// requested. Looking up an unknown name is an error, never a silent deny.
pub struct RuleRegistry<C> {
    rules: HashMap<String, Handler<C>>,
}

impl<C> RuleRegistry<C> {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Register `handler` under `name`.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        handler: Handler<C>,
        overwrite: bool,
    ) -> Result<()> {
        let name = name.into();
        if !overwrite && self.rules.contains_key(&name) {
            return Err(Error::DuplicateRule(name));
        }
        self.rules.insert(name, handler);
        Ok(())
    }

    /// Bulk-insert rules, overwriting entries with the same name.
    pub fn merge(&mut self, rules: impl IntoIterator<Item = (String, Handler<C>)>) {
        self.rules.extend(rules);
    }

    /// Look up the handler for `name`.
    pub fn lookup(&self, name: &str) -> Result<&Handler<C>> {
        self.rules
            .get(name)
            .ok_or_else(|| Error::UndefinedRule(name.to_string()))
    }

    /// Whether a rule with `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Number of defined rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<C> Default for RuleRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn allow_all() -> Handler<()> {
        Handler::inline(|_: &(), _: &str, _: &[serde_json::Value]| json!(true))
    }

    #[test]
    fn define_then_lookup() {
        let mut registry = RuleRegistry::new();
        registry.define("video", allow_all(), false).unwrap();

        assert!(registry.contains("video"));
        assert!(registry.lookup("video").is_ok());
    }

    #[test]
    fn duplicate_define_errors() {
        let mut registry = RuleRegistry::new();
        registry.define("video", allow_all(), false).unwrap();

        let err = registry.define("video", allow_all(), false).unwrap_err();
        assert!(matches!(err, Error::DuplicateRule(name) if name == "video"));
    }

    #[test]
    fn overwrite_replaces_handler() {
        let mut registry = RuleRegistry::new();
        registry.define("video", allow_all(), false).unwrap();
        registry
            .define("video", Handler::named("videos.watch"), true)
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(matches!(
            registry.lookup("video").unwrap(),
            Handler::Named(target) if target == "videos.watch"
        ));
    }

    #[test]
    fn lookup_missing_errors() {
        let registry = RuleRegistry::<()>::new();
        let err = registry.lookup("video").unwrap_err();
        assert!(matches!(err, Error::UndefinedRule(name) if name == "video"));
    }

    #[test]
    fn merge_overwrites_without_duplicate_check() {
        let mut registry = RuleRegistry::new();
        registry.define("watch", allow_all(), false).unwrap();

        registry.merge([
            ("watch".to_string(), Handler::named("videos.watch")),
            ("upload".to_string(), Handler::named("videos.upload")),
        ]);

        assert_eq!(registry.len(), 2);
        assert!(matches!(
            registry.lookup("watch").unwrap(),
            Handler::Named(target) if target == "videos.watch"
        ));
    }
}

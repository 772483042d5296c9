//! Static rule configuration loaded from TOML.

use crate::{Error, Handler, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Role-keyed action grants for static rules.
///
/// ```toml
/// [rules.video]
/// admin  = ["create", "read", "update", "delete"]
/// editor = ["read", "update"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfig {
    /// Rule name to role-keyed allowed actions.
    #[serde(default)]
    pub rules: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl RuleConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Expand each configured rule into an inline handler.
    ///
    /// The handler returns the action list granted to the current role, or
    /// `false` when the role has no grants for the rule.
    pub(crate) fn handlers<C>(&self) -> impl Iterator<Item = (String, Handler<C>)> + '_ {
        self.rules.iter().map(|(name, grants)| {
            let grants = grants.clone();
            let handler = Handler::inline(move |_context: &C, role: &str, _args: &[Value]| {
                match grants.get(role) {
                    Some(actions) => Value::from(actions.clone()),
                    None => Value::Bool(false),
                }
            });
            (name.clone(), handler)
        })
    }
}

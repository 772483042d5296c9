//! Role-based authorization rule engine.
//!
//! Rules bind a permission name to a handler that decides access for the
//! current role. A handler either returns a boolean (a direct allow/deny) or
//! a list of allowed action names, matched against the dotted action of the
//! permission under test: `"video.create"` checks action `"create"` under
//! rule `"video"`.
//!
//! # Overview
//!
//! A [`Permissions`] checker owns the rules for one authorization context
//! (one request or session). Rules come from three places:
//!
//! 1. **Direct definition** — [`Permissions::define_rule`] with an inline
//!    closure or a named `"set.method"` target.
//! 2. **Static configuration** — [`RuleConfig`] loaded from TOML and expanded
//!    into one list-shaped rule per entry.
//! 3. **Generation** — [`Permissions::define_rules_from_class_methods`]
//!    derives one rule per exposed method of a registered [`CapabilitySet`],
//!    optionally memoized through a TTL cache backend from the `cache` crate.
//!
//! Both handler shapes receive the same `(context, role, args)` argument
//! list. The context type is injected at construction; there is no ambient
//! global state.
//!
//! Missing rules fail loud ([`Error::UndefinedRule`]) while unrecognized
//! handler result shapes deny quietly: absent configuration is a programmer
//! error, unexpected handler output fails closed.
//!
//! # Example
//!
//! ```
//! use rules::{Handler, Permissions};
//! use serde_json::{json, Value};
//!
//! let mut perms = Permissions::new((), "editor");
//! perms.define_rule(
//!     "video",
//!     Handler::inline(|_ctx: &(), role: &str, _args: &[Value]| match role {
//!         "admin" => json!(true),
//!         "editor" => json!(["read", "update"]),
//!         _ => json!(false),
//!     }),
//!     false,
//! )?;
//!
//! assert!(perms.can("video.update", &[])?);
//! assert!(!perms.can("video.delete", &[])?);
//! assert!(perms.is("editor"));
//!
//! perms.set_current_role("admin");
//! assert!(perms.can("video.delete", &[])?);
//! # Ok::<(), rules::Error>(())
//! ```

mod capability;
mod checker;
mod config;
mod error;
mod handler;
mod registry;

pub use capability::CapabilitySet;
pub use checker::Permissions;
pub use config::RuleConfig;
pub use error::{Error, Result};
pub use handler::{Handler, InlineFn};
pub use registry::RuleRegistry;

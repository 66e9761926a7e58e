//! Request filters applied ahead of the decision engine.
//!
//! Filters are resolved from configuration through a static registry: a
//! declared name maps to a concrete type once, at load time. There is no
//! runtime module loading. A filter can only short-circuit a request before
//! evaluation; it never alters the engine's decision.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::PalisadeError;

/// A filter declared in configuration: a registry name plus filter-specific
/// config, parsed by the implementation it resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    pub name: String,
    #[serde(default)]
    pub config: Value,
}

pub trait RequestFilter: Send + Sync + std::fmt::Debug {
    /// `false` rejects the request before the engine runs.
    fn apply(&self, actor: &str, path: &str, action: &str) -> bool;
}

/// Resolve every declared filter against the static registry, preserving
/// declaration order. An unknown name is a configuration error.
pub fn build_filters(specs: &[FilterSpec]) -> Result<Vec<Box<dyn RequestFilter>>, PalisadeError> {
    specs.iter().map(build_filter).collect()
}

fn build_filter(spec: &FilterSpec) -> Result<Box<dyn RequestFilter>, PalisadeError> {
    match spec.name.as_str() {
        "actor_blocklist" => Ok(Box::new(ActorBlocklist::parse_config(&spec.config)?)),
        "path_prefix" => Ok(Box::new(PathPrefix::parse_config(&spec.config)?)),
        other => Err(PalisadeError::UnknownFilter(other.to_string())),
    }
}

/// Rejects requests from actors on a configured list.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorBlocklist {
    pub actors: Vec<String>,
}

impl ActorBlocklist {
    pub fn parse_config(config: &Value) -> Result<Self, PalisadeError> {
        let filter: Self = serde_json::from_value(config.clone())?;
        Ok(filter)
    }
}

impl RequestFilter for ActorBlocklist {
    fn apply(&self, actor: &str, _path: &str, _action: &str) -> bool {
        !self.actors.iter().any(|blocked| blocked == actor)
    }
}

/// Only admits paths under one of the configured prefixes.
#[derive(Debug, Clone, Deserialize)]
pub struct PathPrefix {
    pub prefixes: Vec<String>,
}

impl PathPrefix {
    pub fn parse_config(config: &Value) -> Result<Self, PalisadeError> {
        let filter: Self = serde_json::from_value(config.clone())?;
        Ok(filter)
    }
}

impl RequestFilter for PathPrefix {
    fn apply(&self, _actor: &str, path: &str, _action: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_filter_name_rejected_at_build() {
        let specs = vec![FilterSpec {
            name: "reflection_loader".into(),
            config: json!({}),
        }];

        let err = build_filters(&specs).unwrap_err();
        assert!(matches!(err, PalisadeError::UnknownFilter(name) if name == "reflection_loader"));
    }

    #[test]
    fn test_malformed_filter_config_rejected() {
        let specs = vec![FilterSpec {
            name: "actor_blocklist".into(),
            config: json!({ "actors": "not-a-list" }),
        }];

        assert!(build_filters(&specs).is_err());
    }

    #[test]
    fn test_actor_blocklist() {
        let filter = ActorBlocklist::parse_config(&json!({ "actors": ["mallory"] })).unwrap();

        assert!(!filter.apply("mallory", "/articles", "POST"));
        assert!(filter.apply("alice", "/articles", "POST"));
    }

    #[test]
    fn test_path_prefix() {
        let filter = PathPrefix::parse_config(&json!({ "prefixes": ["/api/"] })).unwrap();

        assert!(filter.apply("alice", "/api/articles", "GET"));
        assert!(!filter.apply("alice", "/internal/metrics", "GET"));
    }

    #[test]
    fn test_chain_preserves_declaration_order() {
        let specs = vec![
            FilterSpec {
                name: "actor_blocklist".into(),
                config: json!({ "actors": [] }),
            },
            FilterSpec {
                name: "path_prefix".into(),
                config: json!({ "prefixes": ["/"] }),
            },
        ];

        let chain = build_filters(&specs).unwrap();
        assert_eq!(chain.len(), 2);
        assert!(chain.iter().all(|f| f.apply("alice", "/articles", "GET")));
    }
}

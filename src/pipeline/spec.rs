//! Run specification types.
//!
//! A [`RunSpec`] describes a full graph-and-rank run: aggregation settings,
//! PageRank parameters, teleport mode, and runtime limits. These types are
//! the input to the [`super::validation::ValidationEngine`] and to
//! [`super::runner::Pipeline::from_spec`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "graph": { "max_books_per_user": 50, "min_weight": 2 },
//!   "rank": { "damping": 0.85, "tolerance": 1e-6, "max_iterations": 100,
//!             "teleport": "popularity" },
//!   "runtime": { "max_users": 100000 },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level run specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// Graph construction settings.
    #[serde(default)]
    pub graph: GraphSpec,

    /// PageRank settings.
    #[serde(default)]
    pub rank: RankSpec,

    /// Runtime execution limits.
    #[serde(default)]
    pub runtime: RuntimeSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for RunSpec {
    fn default() -> Self {
        Self {
            v: 1,
            graph: GraphSpec::default(),
            rank: RankSpec::default(),
            runtime: RuntimeSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Co-occurrence aggregation and filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSpec {
    /// Users with more distinct books than this contribute no edges.
    #[serde(default)]
    pub max_books_per_user: Option<usize>,

    /// Minimum edge weight retained; 1 keeps everything.
    #[serde(default = "default_min_weight")]
    pub min_weight: u64,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for GraphSpec {
    fn default() -> Self {
        Self {
            max_books_per_user: None,
            min_weight: default_min_weight(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// PageRank engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankSpec {
    #[serde(default = "default_damping")]
    pub damping: f64,

    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Restart distribution used by the engine.
    #[serde(default)]
    pub teleport: TeleportMode,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for RankSpec {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            teleport: TeleportMode::default(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// Teleport (restart) distribution selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeleportMode {
    /// Uniform 1/N restart (standard PageRank).
    #[default]
    Uniform,
    /// Restart biased toward heavily reviewed books.
    Popularity,
}

/// Runtime execution limits (fail-fast guards for the surrounding tooling).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeSpec {
    /// Maximum number of distinct users fed into aggregation.
    #[serde(default)]
    pub max_users: Option<usize>,

    /// Maximum number of aggregated edges before rejecting.
    #[serde(default)]
    pub max_edges: Option<usize>,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_min_weight() -> u64 {
    1
}

fn default_damping() -> f64 {
    0.85
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_iterations() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec: RunSpec = serde_json::from_str(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(spec.v, 1);
        assert_eq!(spec.graph.min_weight, 1);
        assert_eq!(spec.rank.damping, 0.85);
        assert_eq!(spec.rank.max_iterations, 100);
        assert_eq!(spec.rank.teleport, TeleportMode::Uniform);
        assert!(!spec.strict);
    }

    #[test]
    fn test_deserialize_full_spec() {
        let spec: RunSpec = serde_json::from_str(
            r#"{
                "v": 1,
                "graph": { "max_books_per_user": 50, "min_weight": 2 },
                "rank": { "damping": 0.9, "teleport": "popularity" },
                "runtime": { "max_users": 1000 },
                "strict": true
            }"#,
        )
        .unwrap();
        assert_eq!(spec.graph.max_books_per_user, Some(50));
        assert_eq!(spec.graph.min_weight, 2);
        assert_eq!(spec.rank.damping, 0.9);
        assert_eq!(spec.rank.teleport, TeleportMode::Popularity);
        assert_eq!(spec.runtime.max_users, Some(1000));
        assert!(spec.strict);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let spec: RunSpec = serde_json::from_str(
            r#"{
                "v": 1,
                "bogus_top_level": 42,
                "rank": { "bogus_rank": "xyz" }
            }"#,
        )
        .unwrap();
        assert!(spec.unknown_fields.contains_key("bogus_top_level"));
        assert!(spec.rank.unknown_fields.contains_key("bogus_rank"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = r#"{"v":1,"rank":{"teleport":"popularity"}}"#;
        let spec: RunSpec = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back["rank"]["teleport"], "popularity");
    }
}

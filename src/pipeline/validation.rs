//! Validation engine for run specifications.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`RunSpec`](super::spec::RunSpec) and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first error, so
//! users see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use shelfrank::pipeline::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&spec);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use serde::Serialize;

use super::errors::{ErrorCode, SpecError};
use super::spec::RunSpec;

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: SpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: SpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: SpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A single validation rule that inspects a [`RunSpec`] and returns zero or
/// more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so they can be shared
/// across threads in a long-lived engine.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"damping_range"`).
    fn name(&self) -> &str;

    /// Inspect `spec` and return any findings.
    fn validate(&self, spec: &RunSpec) -> Vec<ValidationDiagnostic>;
}

/// Runs a set of [`ValidationRule`]s against a [`RunSpec`] and collects all
/// diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(DampingRangeRule));
        engine.add_rule(Box::new(ConvergenceRule));
        engine.add_rule(Box::new(EdgeFilterRule));
        engine.add_rule(Box::new(UserCapRule));
        engine.add_rule(Box::new(RuntimeLimitsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &RunSpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ---------------------------------------------------------------------------
// Concrete rules
// ---------------------------------------------------------------------------

/// Damping must lie strictly inside (0, 1).
struct DampingRangeRule;

impl ValidationRule for DampingRangeRule {
    fn name(&self) -> &str {
        "damping_range"
    }

    fn validate(&self, spec: &RunSpec) -> Vec<ValidationDiagnostic> {
        let d = spec.rank.damping;
        if d > 0.0 && d < 1.0 {
            vec![]
        } else {
            vec![ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::InvalidValue,
                    "/rank/damping",
                    format!("damping must be strictly between 0 and 1, got {d}"),
                )
                .with_hint("0.85 is the conventional choice"),
            )]
        }
    }
}

/// Tolerance must be positive and the iteration cap nonzero.
struct ConvergenceRule;

impl ValidationRule for ConvergenceRule {
    fn name(&self) -> &str {
        "convergence"
    }

    fn validate(&self, spec: &RunSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        if !(spec.rank.tolerance > 0.0) {
            out.push(ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::InvalidValue,
                    "/rank/tolerance",
                    "tolerance must be greater than 0",
                )
                .with_hint("1e-6 is the conventional choice"),
            ));
        }
        if spec.rank.max_iterations == 0 {
            out.push(ValidationDiagnostic::error(SpecError::new(
                ErrorCode::InvalidValue,
                "/rank/max_iterations",
                "max_iterations must be greater than 0",
            )));
        }
        out
    }
}

/// min_weight 0 would admit edges that can never exist.
struct EdgeFilterRule;

impl ValidationRule for EdgeFilterRule {
    fn name(&self) -> &str {
        "edge_filter"
    }

    fn validate(&self, spec: &RunSpec) -> Vec<ValidationDiagnostic> {
        if spec.graph.min_weight >= 1 {
            vec![]
        } else {
            vec![ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::InvalidValue,
                    "/graph/min_weight",
                    "min_weight must be at least 1",
                )
                .with_hint("Set min_weight to 1 to keep all edges"),
            )]
        }
    }
}

/// A books-per-user cap below 2 silences every user.
struct UserCapRule;

impl ValidationRule for UserCapRule {
    fn name(&self) -> &str {
        "user_cap"
    }

    fn validate(&self, spec: &RunSpec) -> Vec<ValidationDiagnostic> {
        match spec.graph.max_books_per_user {
            Some(cap) if cap < 2 => vec![ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::InvalidValue,
                    "/graph/max_books_per_user",
                    format!("a cap of {cap} excludes every pair-forming user"),
                )
                .with_hint("Remove the cap or set it to at least 2"),
            )],
            _ => vec![],
        }
    }
}

/// Runtime limits must be positive when set.
struct RuntimeLimitsRule;

impl ValidationRule for RuntimeLimitsRule {
    fn name(&self) -> &str {
        "runtime_limits"
    }

    fn validate(&self, spec: &RunSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        let checks: &[(&str, Option<usize>)] = &[
            ("max_users", spec.runtime.max_users),
            ("max_edges", spec.runtime.max_edges),
        ];

        for &(field, value) in checks {
            if value == Some(0) {
                out.push(ValidationDiagnostic::error(
                    SpecError::new(
                        ErrorCode::LimitExceeded,
                        format!("/runtime/{field}"),
                        format!("{field} must be greater than 0"),
                    )
                    .with_hint(format!(
                        "Remove {field} to disable the limit, or set it to a positive value"
                    )),
                ));
            }
        }

        out
    }
}

/// Unknown fields: strict → error, non-strict → warning.
struct UnknownFieldsRule;

impl UnknownFieldsRule {
    fn check_unknowns(
        path: &str,
        unknowns: &std::collections::HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        unknowns
            .keys()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    SpecError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &RunSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &spec.unknown_fields, spec.strict));
        out.extend(Self::check_unknowns(
            "/graph",
            &spec.graph.unknown_fields,
            spec.strict,
        ));
        out.extend(Self::check_unknowns(
            "/rank",
            &spec.rank.unknown_fields,
            spec.strict,
        ));
        out.extend(Self::check_unknowns(
            "/runtime",
            &spec.runtime.unknown_fields,
            spec.strict,
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> RunSpec {
        serde_json::from_str(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    #[test]
    fn test_minimal_spec_is_valid() {
        let report = engine().validate(&spec(r#"{ "v": 1 }"#));
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_default_spec_is_valid() {
        let report = engine().validate(&RunSpec::default());
        assert!(report.is_empty());
    }

    #[test]
    fn test_full_valid_spec() {
        let report = engine().validate(&spec(
            r#"{
                "v": 1,
                "graph": { "max_books_per_user": 50, "min_weight": 2 },
                "rank": { "damping": 0.85, "teleport": "popularity" },
                "runtime": { "max_users": 100000, "max_edges": 1000000 }
            }"#,
        ));
        assert!(report.is_valid());
    }

    #[test]
    fn test_damping_zero_fails() {
        let report = engine().validate(&spec(r#"{ "v": 1, "rank": { "damping": 0.0 } }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::InvalidValue);
        assert_eq!(errs[0].path, "/rank/damping");
    }

    #[test]
    fn test_damping_one_fails() {
        let report = engine().validate(&spec(r#"{ "v": 1, "rank": { "damping": 1.0 } }"#));
        assert!(report.has_errors());
    }

    #[test]
    fn test_zero_tolerance_fails() {
        let report = engine().validate(&spec(r#"{ "v": 1, "rank": { "tolerance": 0.0 } }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].path.contains("tolerance"));
    }

    #[test]
    fn test_zero_max_iterations_fails() {
        let report = engine().validate(&spec(r#"{ "v": 1, "rank": { "max_iterations": 0 } }"#));
        assert!(report.has_errors());
    }

    #[test]
    fn test_zero_min_weight_fails() {
        let report = engine().validate(&spec(r#"{ "v": 1, "graph": { "min_weight": 0 } }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/graph/min_weight");
    }

    #[test]
    fn test_user_cap_below_two_fails() {
        let report =
            engine().validate(&spec(r#"{ "v": 1, "graph": { "max_books_per_user": 1 } }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].path.contains("max_books_per_user"));
    }

    #[test]
    fn test_user_cap_two_is_valid() {
        let report =
            engine().validate(&spec(r#"{ "v": 1, "graph": { "max_books_per_user": 2 } }"#));
        assert!(report.is_valid());
    }

    #[test]
    fn test_absent_cap_is_valid() {
        let report = engine().validate(&spec(r#"{ "v": 1, "graph": {} }"#));
        assert!(report.is_valid());
    }

    #[test]
    fn test_zero_runtime_limits_fail() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "runtime": { "max_users": 0, "max_edges": 0 } }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 2);
        assert!(errs.iter().all(|e| e.code == ErrorCode::LimitExceeded));
    }

    #[test]
    fn test_absent_limits_are_fine() {
        let report = engine().validate(&spec(r#"{ "v": 1, "runtime": {} }"#));
        assert!(report.is_valid());
    }

    #[test]
    fn test_unknown_fields_non_strict_are_warnings() {
        let report = engine().validate(&spec(r#"{ "v": 1, "strict": false, "bogus": 42 }"#));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::UnknownField);
        assert!(warns[0].path.contains("bogus"));
    }

    #[test]
    fn test_unknown_fields_strict_are_errors() {
        let report = engine().validate(&spec(r#"{ "v": 1, "strict": true, "bogus": 42 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::UnknownField);
    }

    #[test]
    fn test_unknown_nested_field_strict() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "strict": true, "rank": { "max_threads": 8 } }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].path.contains("max_threads"));
    }

    #[test]
    fn test_multiple_rules_fire_independently() {
        let report = engine().validate(&spec(
            r#"{
                "v": 1,
                "strict": true,
                "bogus": true,
                "graph": { "min_weight": 0 },
                "rank": { "damping": 2.0 }
            }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 3);
    }

    #[test]
    fn test_custom_rule() {
        struct AlwaysWarnRule;
        impl ValidationRule for AlwaysWarnRule {
            fn name(&self) -> &str {
                "always_warn"
            }
            fn validate(&self, _spec: &RunSpec) -> Vec<ValidationDiagnostic> {
                vec![ValidationDiagnostic::warning(SpecError::new(
                    ErrorCode::ValidationFailed,
                    "",
                    "custom warning",
                ))]
            }
        }

        let mut eng = ValidationEngine::new();
        eng.add_rule(Box::new(AlwaysWarnRule));
        let report = eng.validate(&spec(r#"{ "v": 1 }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = engine().validate(&spec(r#"{ "v": 1, "rank": { "damping": 0.0 } }"#));
        let json = serde_json::to_value(&report).unwrap();
        let diags = json["diagnostics"].as_array().unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0]["severity"], "error");
        assert_eq!(diags[0]["code"], "invalid_value");
    }
}

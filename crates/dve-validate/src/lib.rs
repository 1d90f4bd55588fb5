//! Rule registry and validation engine
//!
//! Declarative toetsregels (validation rules) are loaded at process start
//! from the builtin table or a YAML rules directory, indexed into an
//! immutable snapshot and evaluated against candidate definition texts by
//! the weighted [`ValidationEngine`].
//!
//! Rules are data, not code: each rule is a tagged variant (pattern-based or
//! delegate-based) behind one `evaluate` entry point. Reload replaces the
//! whole registry snapshot atomically; readers never observe a half-updated
//! rule set.

/// Validation engine
pub mod engine;
/// Delegate rule evaluators
pub mod evaluators;
/// Rule model, registry and loading
pub mod rules;

pub use engine::{ValidationEngine, ValidationSettings};
pub use evaluators::{DelegateCheck, RuleOutcome};
pub use rules::{
    Applicability, Detection, PatternPolarity, Rule, RuleCategory, RulePriority,
};
pub use rules::loader::{LoadReport, RuleLoadError};
pub use rules::registry::{RuleRegistry, RuleSet, RuleSource};

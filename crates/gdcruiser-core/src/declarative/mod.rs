//! Declarative dependency rules driven by configuration.
//!
//! # Architecture
//!
//! ```text
//! TOML / JSON text
//!   ↓ serde (DTO layer)
//! config_dto types ──→ validator (all errors + warnings)
//!   ↓ loader: compile regexes, parse severities
//! RuleSet (pure domain model)
//!   ↓ create_rules()
//! Vec<GraphRuleBox>
//! ```

pub mod config_dto;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod rules;
pub mod validator;

use crate::rule::GraphRuleBox;
use crate::types::RuleCategory;

use model::{RuleDef, RuleForm, RuleSet};

/// Errors from parsing configuration text and loading rules.
#[derive(Debug, thiserror::Error)]
pub enum LoadRulesError {
    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Domain model validation failed.
    #[error("{0}")]
    Load(#[from] loader::LoadError),
}

/// Parses TOML rule sections and loads them into a [`RuleSet`].
///
/// # Errors
///
/// Returns an error if TOML parsing or model validation fails.
pub fn load_rules_from_toml(content: &str) -> Result<RuleSet, LoadRulesError> {
    let dto: config_dto::RuleConfigDto = toml::from_str(content)?;
    Ok(loader::load(&dto)?)
}

/// Compiles every non-ignored rule of `set` into its graph rule.
///
/// Rules come out in evaluation order: forbidden, allowed, required.
#[must_use]
pub fn create_rules(set: &RuleSet) -> Vec<GraphRuleBox> {
    set.iter()
        .filter(|def| !def.is_ignored())
        .map(|def| create_rule(def.clone()))
        .collect()
}

fn create_rule(def: RuleDef) -> GraphRuleBox {
    match (def.category(), def.form()) {
        (RuleCategory::Forbidden, RuleForm::Circular) => Box::new(rules::CircularRule::new(def)),
        (RuleCategory::Forbidden, RuleForm::Orphan) => Box::new(rules::OrphanRule::new(def)),
        (RuleCategory::Forbidden, RuleForm::Plain) => {
            Box::new(rules::ForbiddenDependencyRule::new(def))
        }
        (RuleCategory::Allowed, _) => Box::new(rules::AllowedRule::new(def)),
        (RuleCategory::Required, _) => Box::new(rules::RequiredRule::new(def)),
    }
}

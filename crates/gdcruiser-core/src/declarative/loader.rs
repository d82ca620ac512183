//! DTO → Domain model conversion with validation.

use tracing::debug;

use crate::types::{RuleCategory, Severity};

use super::config_dto::{MatcherDto, RuleConfigDto, RuleDto};
use super::matcher::{Exclusions, PathMatcher, Pattern};
use super::model::{ModelError, RuleDef, RuleForm, RuleSet};

/// Errors during DTO → Domain conversion.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    #[diagnostic(
        code(gdcruiser::config::invalid_field),
        help("patterns use Rust regex syntax and are searched anywhere in the `res://` path")
    )]
    Validation {
        /// Where the error occurred (e.g., "forbidden[0] 'no-ui-to-core'.from.path").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },

    /// Unknown severity string.
    #[error("{context}: unknown severity `{value}`, expected: error, warning, warn, info, ignore")]
    #[diagnostic(code(gdcruiser::config::unknown_severity))]
    UnknownSeverity {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },
}

/// Converts a [`RuleConfigDto`] into a validated [`RuleSet`].
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: &RuleConfigDto) -> Result<RuleSet, LoadError> {
    let forbidden = convert_category(&dto.forbidden, RuleCategory::Forbidden)?;
    let allowed = convert_category(&dto.allowed, RuleCategory::Allowed)?;
    let required = convert_category(&dto.required, RuleCategory::Required)?;

    let exclusions = dto
        .options
        .exclude
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Pattern::new(p).map_err(|e| LoadError::Validation {
                context: format!("options.exclude[{i}]"),
                source: e,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let set = RuleSet::new(forbidden, allowed, required, Exclusions::new(exclusions));
    debug!(
        rules = set.len(),
        exclusions = set.exclusions().patterns().len(),
        "loaded rule set"
    );
    Ok(set)
}

fn convert_category(rules: &[RuleDto], category: RuleCategory) -> Result<Vec<RuleDef>, LoadError> {
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| convert_rule(rule, category, i))
        .collect()
}

fn convert_rule(dto: &RuleDto, category: RuleCategory, index: usize) -> Result<RuleDef, LoadError> {
    let ctx = format!("{category}[{index}] '{}'", dto.name);

    let severity = parse_severity(&dto.severity, &format!("{ctx}.severity"))?;
    let from = convert_matcher(dto.from.as_ref(), &format!("{ctx}.from"))?;
    let to = convert_matcher(dto.to.as_ref(), &format!("{ctx}.to"))?;

    let form = match category {
        RuleCategory::Forbidden if dto.circular => RuleForm::Circular,
        RuleCategory::Forbidden if dto.orphan => RuleForm::Orphan,
        _ => RuleForm::Plain,
    };

    let rule = RuleDef::new(&dto.name, category, severity, from, to).map_err(|e| {
        LoadError::Validation {
            context: format!("{ctx}.name"),
            source: e,
        }
    })?;

    Ok(rule.with_form(form).with_comment(dto.comment.clone()))
}

fn convert_matcher(dto: Option<&MatcherDto>, ctx: &str) -> Result<PathMatcher, LoadError> {
    let Some(dto) = dto else {
        return Ok(PathMatcher::any());
    };

    let compile = |raw: Option<&String>, field: &str| {
        raw.filter(|p| !p.is_empty())
            .map(|p| Pattern::new(p))
            .transpose()
            .map_err(|e| LoadError::Validation {
                context: format!("{ctx}.{field}"),
                source: e,
            })
    };

    let include = compile(dto.path.as_ref(), "path")?;
    let exclude = compile(dto.path_not.as_ref(), "pathNot")?;
    Ok(PathMatcher::new(include, exclude))
}

fn parse_severity(value: &str, context: &str) -> Result<Severity, LoadError> {
    Severity::parse(value).ok_or_else(|| LoadError::UnknownSeverity {
        context: context.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_and_load(toml_str: &str) -> Result<RuleSet, LoadError> {
        let dto: RuleConfigDto = toml::from_str(toml_str).unwrap();
        load(&dto)
    }

    // -- Happy path --

    #[test]
    fn load_empty_config() {
        let set = parse_and_load("").unwrap();
        assert!(set.is_empty());
        assert!(set.exclusions().is_empty());
    }

    #[test]
    fn load_full_config() {
        let set = parse_and_load(
            r#"
[options]
exclude = ["^res://addons/"]

[[forbidden]]
name = "no-ui-to-core"
severity = "warn"
comment = "UI talks to core through signals"
from = { path = "^res://ui/" }
to = { path = "^res://core/" }

[[forbidden]]
name = "no-cycles"
circular = true

[[forbidden]]
name = "no-orphans"
severity = "info"
orphan = true

[[allowed]]
name = "ui-only-ui"
from = { path = "^res://ui/" }
to = { path = "^res://ui/" }

[[required]]
name = "levels-use-base"
from = { path = "^res://levels/" }
to = { path = "level_base\\.gd$" }
"#,
        )
        .unwrap();

        assert_eq!(set.len(), 5);
        let first = &set.forbidden()[0];
        assert_eq!(first.severity(), Severity::Warning);
        assert_eq!(first.comment(), Some("UI talks to core through signals"));
        assert_eq!(first.form(), RuleForm::Plain);
        assert_eq!(set.forbidden()[1].form(), RuleForm::Circular);
        assert_eq!(set.forbidden()[2].form(), RuleForm::Orphan);
        assert!(set.exclusions().is_excluded("res://addons/x.gd"));
    }

    #[test]
    fn circular_wins_over_orphan() {
        let set = parse_and_load(
            r#"
[[forbidden]]
name = "both"
circular = true
orphan = true
"#,
        )
        .unwrap();
        assert_eq!(set.forbidden()[0].form(), RuleForm::Circular);
    }

    #[test]
    fn flags_on_allowed_rules_are_ignored() {
        let set = parse_and_load(
            r#"
[[allowed]]
name = "odd"
circular = true
to = { path = "^res://ui/" }
"#,
        )
        .unwrap();
        assert_eq!(set.allowed()[0].form(), RuleForm::Plain);
    }

    // -- Error cases --

    #[test]
    fn load_rejects_invalid_regex_with_field_path() {
        let err = parse_and_load(
            r#"
[[forbidden]]
name = "broken"
from = { path = "^res://ui/(" }
"#,
        )
        .unwrap_err();

        match err {
            LoadError::Validation { context, source } => {
                assert_eq!(context, "forbidden[0] 'broken'.from.path");
                assert!(matches!(source, ModelError::InvalidPattern { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_rejects_invalid_path_not() {
        let err = parse_and_load(
            r#"
[[required]]
name = "r"
to = { pathNot = "[" }
"#,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("required[0] 'r'.to.pathNot"));
    }

    #[test]
    fn load_rejects_unknown_severity() {
        let result = parse_and_load(
            r#"
[[forbidden]]
name = "bad"
severity = "critical"
"#,
        );
        assert!(matches!(result, Err(LoadError::UnknownSeverity { .. })));
    }

    #[test]
    fn load_rejects_empty_name() {
        let result = parse_and_load(
            r#"
[[allowed]]
name = ""
"#,
        );
        assert!(matches!(
            result,
            Err(LoadError::Validation {
                source: ModelError::EmptyRuleName,
                ..
            })
        ));
    }

    #[test]
    fn load_rejects_invalid_exclusion() {
        let err = parse_and_load(
            r#"
[options]
exclude = ["ok", "*bad"]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("options.exclude[1]"));
    }
}

//! YAML Rule Loader
//!
//! Loads declarative rule files from a directory. Each `.yml`/`.yaml` file
//! holds a sequence of rule entries. Malformed entries are rejected
//! individually with a reported error and excluded from the active set;
//! one bad rule never takes down the rest of a file.

use super::{Applicability, Detection, PatternPolarity, Rule, RuleCategory, RulePriority};
use crate::evaluators::DelegateCheck;
use dve_domain::{Error, Result};
use regex::RegexBuilder;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Tags accepted in an applicability list
const KNOWN_TAGS: &[&str] = &[
    "entiteit",
    "proces",
    "resultaat",
    "overig",
    "organisatorisch",
    "juridisch",
    "wettelijk",
];

/// One rejected rule definition
#[derive(Debug, Clone)]
pub struct RuleLoadError {
    /// Source file, when the error is file-bound
    pub file: Option<PathBuf>,
    /// Rule id, when the entry got far enough to have one
    pub rule_id: Option<String>,
    /// What went wrong
    pub message: String,
}

/// Result of loading a declarative rule source
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Number of rules accepted into the active set
    pub loaded: usize,
    /// Individually rejected definitions
    pub rejected: Vec<RuleLoadError>,
}

/// Raw rule entry as written in YAML
#[derive(Debug, Deserialize)]
struct RawRule {
    id: String,
    naam: String,
    omschrijving: String,
    melding: String,
    #[serde(default)]
    suggestie: Option<String>,
    weight: f64,
    priority: RulePriority,
    category: RuleCategory,
    #[serde(default)]
    applicability: RawApplicability,
    detection: RawDetection,
    #[serde(default)]
    voorbeeld_goed: Vec<String>,
    #[serde(default)]
    voorbeeld_fout: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawApplicability {
    Keyword(String),
    Tags(Vec<String>),
}

impl Default for RawApplicability {
    fn default() -> Self {
        Self::Keyword("all".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawDetection {
    Patterns {
        polarity: PatternPolarity,
        patterns: Vec<String>,
    },
    Delegate {
        #[serde(flatten)]
        check: DelegateCheck,
    },
}

/// Load all rule files from a directory, sorted by file name for
/// deterministic ordering and duplicate-id resolution.
pub fn load_directory(dir: &Path) -> Result<(Vec<Rule>, LoadReport)> {
    if !dir.is_dir() {
        return Err(Error::configuration(format!(
            "rules directory does not exist: {}",
            dir.display()
        )));
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("yml") | Some("yaml")
            )
        })
        .collect();
    files.sort();

    let mut rules: Vec<Rule> = Vec::new();
    let mut report = LoadReport::default();
    let mut seen_ids: BTreeSet<String> = BTreeSet::new();

    for file in files {
        let content = match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(err) => {
                report.rejected.push(RuleLoadError {
                    file: Some(file.clone()),
                    rule_id: None,
                    message: format!("unreadable rule file: {err}"),
                });
                continue;
            }
        };

        let raw_rules: Vec<serde_yaml::Value> = match serde_yaml::from_str(&content) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(file = %file.display(), error = %err, "rule file rejected");
                report.rejected.push(RuleLoadError {
                    file: Some(file.clone()),
                    rule_id: None,
                    message: format!("YAML parse error: {err}"),
                });
                continue;
            }
        };

        for value in raw_rules {
            let rule_id = value
                .get("id")
                .and_then(|v| v.as_str())
                .map(ToString::to_string);
            let outcome = serde_yaml::from_value::<RawRule>(value)
                .map_err(|err| err.to_string())
                .and_then(convert_rule);
            match outcome {
                Ok(rule) => {
                    if seen_ids.contains(&rule.id) {
                        report.rejected.push(RuleLoadError {
                            file: Some(file.clone()),
                            rule_id: Some(rule.id),
                            message: "duplicate rule id; first definition wins".to_string(),
                        });
                    } else {
                        seen_ids.insert(rule.id.clone());
                        rules.push(rule);
                    }
                }
                Err(message) => {
                    tracing::warn!(
                        file = %file.display(),
                        rule_id = rule_id.as_deref().unwrap_or("<unknown>"),
                        error = %message,
                        "rule definition rejected"
                    );
                    report.rejected.push(RuleLoadError {
                        file: Some(file.clone()),
                        rule_id,
                        message,
                    });
                }
            }
        }
    }

    report.loaded = rules.len();
    Ok((rules, report))
}

fn convert_rule(raw: RawRule) -> std::result::Result<Rule, String> {
    if raw.id.trim().is_empty() {
        return Err("rule id must not be empty".to_string());
    }
    if !raw.weight.is_finite() || raw.weight < 0.0 {
        return Err(format!("weight must be a finite value >= 0, got {}", raw.weight));
    }

    let applicability = match raw.applicability {
        RawApplicability::Keyword(word) if word == "all" => Applicability::All,
        RawApplicability::Keyword(word) => {
            return Err(format!("unknown applicability keyword '{word}', expected \"all\""));
        }
        RawApplicability::Tags(tags) => {
            if tags.is_empty() {
                return Err("applicability tag list must not be empty".to_string());
            }
            for tag in &tags {
                if !KNOWN_TAGS.contains(&tag.as_str()) {
                    return Err(format!("unknown applicability tag '{tag}'"));
                }
            }
            Applicability::Tags(tags.into_iter().collect())
        }
    };

    let detection = match raw.detection {
        RawDetection::Patterns { polarity, patterns } => {
            if patterns.is_empty() {
                return Err("pattern detection requires at least one pattern".to_string());
            }
            let compiled = patterns
                .iter()
                .map(|p| {
                    RegexBuilder::new(p)
                        .case_insensitive(true)
                        .build()
                        .map_err(|err| format!("invalid pattern '{p}': {err}"))
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Detection::Patterns {
                patterns: compiled,
                polarity,
            }
        }
        RawDetection::Delegate { check } => Detection::Delegate(check),
    };

    Ok(Rule {
        id: raw.id,
        naam: raw.naam,
        omschrijving: raw.omschrijving,
        melding: raw.melding,
        suggestie: raw.suggestie,
        weight: raw.weight,
        priority: raw.priority,
        category: raw.category,
        applicability,
        detection,
        voorbeeld_goed: raw.voorbeeld_goed,
        voorbeeld_fout: raw.voorbeeld_fout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_RULE: &str = r#"
- id: TST001
  naam: Geen etcetera
  omschrijving: Een definitie somt niet op met etcetera.
  melding: definitie bevat een open opsomming
  weight: 0.5
  priority: midden
  category: content
  detection:
    type: patterns
    polarity: forbid
    patterns: ['\betc\b', '\benz\b']
  voorbeeld_fout:
    - "Dwangmiddelen, etc."
"#;

    const DELEGATE_RULE: &str = r#"
- id: TST002
  naam: Lengte binnen band
  omschrijving: Definities blijven binnen de lengteband.
  melding: definitie valt buiten de lengteband
  weight: 1.0
  priority: hoog
  category: structuur
  applicability: [wettelijk]
  detection:
    type: delegate
    check: lengte_band
    min_woorden: 5
    max_woorden: 60
"#;

    const BROKEN_RULE: &str = r#"
- id: TST003
  naam: Kapotte regel
  omschrijving: Regex compileert niet.
  melding: n.v.t.
  weight: 1.0
  priority: laag
  category: content
  detection:
    type: patterns
    polarity: forbid
    patterns: ['(unclosed']
"#;

    fn write_rules(dir: &Path, name: &str, content: &str) {
        let mut f = std::fs::File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn loads_pattern_and_delegate_rules() {
        let tmp = tempfile::tempdir().unwrap();
        write_rules(tmp.path(), "content.yml", VALID_RULE);
        write_rules(tmp.path(), "structuur.yml", DELEGATE_RULE);

        let (rules, report) = load_directory(tmp.path()).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(report.loaded, 2);
        assert!(report.rejected.is_empty());

        let lengte = rules.iter().find(|r| r.id == "TST002").unwrap();
        assert!(matches!(lengte.detection, Detection::Delegate(_)));
        assert_eq!(lengte.priority, RulePriority::Hoog);
    }

    #[test]
    fn malformed_rules_are_rejected_individually() {
        let tmp = tempfile::tempdir().unwrap();
        write_rules(tmp.path(), "good.yml", VALID_RULE);
        write_rules(tmp.path(), "broken.yml", BROKEN_RULE);

        let (rules, report) = load_directory(tmp.path()).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        let rejection = &report.rejected[0];
        assert_eq!(rejection.rule_id.as_deref(), Some("TST003"));
        assert!(rejection.message.contains("invalid pattern"));
    }

    #[test]
    fn duplicate_ids_keep_first_definition() {
        let tmp = tempfile::tempdir().unwrap();
        write_rules(tmp.path(), "a.yml", VALID_RULE);
        write_rules(tmp.path(), "b.yml", VALID_RULE);

        let (rules, report) = load_directory(tmp.path()).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert!(report.rejected[0].message.contains("duplicate"));
    }

    #[test]
    fn unknown_applicability_tag_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let rule = VALID_RULE.replace("category: content", "category: content\n  applicability: [kosmisch]");
        write_rules(tmp.path(), "a.yml", &rule);

        let (rules, report) = load_directory(tmp.path()).unwrap();
        assert!(rules.is_empty());
        assert!(report.rejected[0].message.contains("kosmisch"));
    }

    #[test]
    fn missing_directory_is_a_configuration_error() {
        let err = load_directory(Path::new("/nonexistent/rules")).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}

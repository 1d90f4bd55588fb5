//! Delegate Rule Evaluators
//!
//! Richer checks than a single regex can express, each behind the one
//! `evaluate(text, term, context) -> RuleOutcome` entry point. A passing
//! check always scores 1.0; graded partial credit only applies to failures,
//! so a text satisfying every applicable rule aggregates to exactly 1.0.

use dve_domain::ContextSet;
use serde::{Deserialize, Serialize};

/// Outcome of evaluating one rule against one text
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    /// Whether the rule is satisfied
    pub passed: bool,
    /// Confidence-like score in [0, 1]; 1.0 when passed
    pub score: f64,
    /// Violation message; the rule's configured melding is used when None
    pub message: Option<String>,
}

impl RuleOutcome {
    fn pass() -> Self {
        Self {
            passed: true,
            score: 1.0,
            message: None,
        }
    }

    fn fail(score: f64) -> Self {
        Self {
            passed: false,
            score: score.clamp(0.0, 1.0),
            message: None,
        }
    }

    fn fail_with(score: f64, message: String) -> Self {
        Self {
            passed: false,
            score: score.clamp(0.0, 1.0),
            message: Some(message),
        }
    }
}

/// Filler words counted by the vaagtaal density check
const VAAGTAAL: &[&str] = &[
    "ongeveer",
    "eigenlijk",
    "mogelijk",
    "wellicht",
    "soort",
    "dingen",
    "iets",
    "vaak",
    "meestal",
    "redelijk",
    "behoorlijk",
    "nogal",
];

/// Openings that push the core noun out of first position
const FILLER_OPENINGS: &[&str] = &[
    "dit", "dat", "het is", "is", "wordt", "betekent", "men", "er", "zo",
];

/// Dutch articles skipped before comparing the opening against the term
const LIDWOORDEN: &[&str] = &["de", "het", "een"];

/// Typed delegate check, selected declaratively per rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum DelegateCheck {
    /// Word count must fall inside a band; failures grade proportionally
    LengteBand {
        /// Minimum word count
        min_woorden: usize,
        /// Maximum word count
        max_woorden: usize,
    },
    /// The definition must not open with the begrip itself
    GeenCirculariteit,
    /// The essence must be stated in a single sentence
    EnkeleZin,
    /// Ratio of filler words must stay under a maximum; graded on failure
    VaagtaalDichtheid {
        /// Maximum tolerated vague-word ratio
        max_ratio: f64,
    },
    /// The definition must open with the core noun, not a filler opening
    KernOpening,
    /// With statutory context declared, the text must anchor to it
    WettelijkeVerwijzing,
}

impl DelegateCheck {
    /// Evaluate the check against a candidate text
    pub fn evaluate(&self, text: &str, term: &str, context: &ContextSet) -> RuleOutcome {
        match self {
            Self::LengteBand {
                min_woorden,
                max_woorden,
            } => lengte_band(text, *min_woorden, *max_woorden),
            Self::GeenCirculariteit => geen_circulariteit(text, term),
            Self::EnkeleZin => enkele_zin(text),
            Self::VaagtaalDichtheid { max_ratio } => vaagtaal_dichtheid(text, *max_ratio),
            Self::KernOpening => kern_opening(text),
            Self::WettelijkeVerwijzing => wettelijke_verwijzing(text, context),
        }
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn lengte_band(text: &str, min_woorden: usize, max_woorden: usize) -> RuleOutcome {
    let n = word_count(text);
    if n >= min_woorden && n <= max_woorden {
        return RuleOutcome::pass();
    }
    // Grade by how far outside the band the text sits
    let score = if n < min_woorden {
        n as f64 / min_woorden.max(1) as f64
    } else {
        max_woorden as f64 / n as f64
    };
    let message = if n < min_woorden {
        format!("definitie telt {n} woorden, minimaal {min_woorden} vereist")
    } else {
        format!("definitie telt {n} woorden, maximaal {max_woorden} toegestaan")
    };
    RuleOutcome::fail_with(score, message)
}

fn geen_circulariteit(text: &str, term: &str) -> RuleOutcome {
    let text = text.trim().to_lowercase();
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return RuleOutcome::pass();
    }

    // Skip a leading article before comparing against the term
    let mut opening = text.as_str();
    for lidwoord in LIDWOORDEN {
        if let Some(rest) = opening.strip_prefix(&format!("{lidwoord} ")) {
            opening = rest;
            break;
        }
    }

    if opening.starts_with(&term) {
        RuleOutcome::fail(0.0)
    } else {
        RuleOutcome::pass()
    }
}

fn enkele_zin(text: &str) -> RuleOutcome {
    let trimmed = text.trim();
    // A terminator followed by more text marks a sentence break
    let breaks = trimmed
        .char_indices()
        .filter(|&(i, c)| {
            matches!(c, '.' | '!' | '?')
                && trimmed[i + c.len_utf8()..]
                    .chars()
                    .any(|n| n.is_alphanumeric())
        })
        .count();
    if breaks == 0 {
        RuleOutcome::pass()
    } else {
        RuleOutcome::fail_with(
            0.0,
            format!("definitie bevat {} zinsovergang(en), een enkele zin is vereist", breaks),
        )
    }
}

fn vaagtaal_dichtheid(text: &str, max_ratio: f64) -> RuleOutcome {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .collect();
    if words.is_empty() {
        return RuleOutcome::fail(0.0);
    }
    let vaag = words
        .iter()
        .filter(|w| VAAGTAAL.contains(&w.as_str()))
        .count();
    let ratio = vaag as f64 / words.len() as f64;
    if ratio <= max_ratio {
        RuleOutcome::pass()
    } else {
        RuleOutcome::fail_with(
            (max_ratio / ratio).min(0.9),
            format!("{vaag} vage formuleringen op {} woorden", words.len()),
        )
    }
}

fn kern_opening(text: &str) -> RuleOutcome {
    let lowered = text.trim().to_lowercase();
    let opens_with_filler = FILLER_OPENINGS.iter().any(|f| {
        lowered
            .strip_prefix(f)
            .is_some_and(|rest| rest.starts_with([' ', ',']))
    });
    if opens_with_filler {
        RuleOutcome::fail(0.0)
    } else {
        RuleOutcome::pass()
    }
}

fn wettelijke_verwijzing(text: &str, context: &ContextSet) -> RuleOutcome {
    if context.wettelijk.is_empty() {
        return RuleOutcome::pass();
    }
    let lowered = text.to_lowercase();
    let mentioned = context
        .wettelijk
        .iter()
        .any(|tag| lowered.contains(&tag.to_lowercase()));
    if mentioned {
        RuleOutcome::pass()
    } else {
        RuleOutcome::fail(0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengte_band_grades_failures() {
        let inside = lengte_band("een twee drie vier vijf zes", 5, 10);
        assert!(inside.passed);
        assert_eq!(inside.score, 1.0);

        let short = lengte_band("een twee", 4, 10);
        assert!(!short.passed);
        assert_eq!(short.score, 0.5);

        let long_text = vec!["woord"; 20].join(" ");
        let long = lengte_band(&long_text, 4, 10);
        assert!(!long.passed);
        assert_eq!(long.score, 0.5);
    }

    #[test]
    fn circulariteit_skips_articles() {
        let fail = geen_circulariteit(
            "De voorlopige hechtenis is vrijheidsbeneming.",
            "voorlopige hechtenis",
        );
        assert!(!fail.passed);

        let ok = geen_circulariteit(
            "Vrijheidsbeneming voorafgaand aan de behandeling van een strafzaak.",
            "voorlopige hechtenis",
        );
        assert!(ok.passed);
    }

    #[test]
    fn enkele_zin_counts_breaks() {
        assert!(enkele_zin("Een enkele zin zonder onderbreking.").passed);
        assert!(!enkele_zin("Eerste zin. Tweede zin.").passed);
        // Terminal period with no trailing text is not a break
        assert!(enkele_zin("Zin met afsluitende punt.").passed);
    }

    #[test]
    fn vaagtaal_ratio() {
        let clean = vaagtaal_dichtheid("Vrijheidsbeneming voorafgaand aan de behandeling.", 0.1);
        assert!(clean.passed);

        let vague = vaagtaal_dichtheid("Een soort dingen die eigenlijk vaak voorkomen.", 0.1);
        assert!(!vague.passed);
        assert!(vague.score < 1.0);
    }

    #[test]
    fn kern_opening_rejects_fillers() {
        assert!(!kern_opening("Dit is een vorm van vrijheidsbeneming.").passed);
        assert!(!kern_opening("Is een vorm van vrijheidsbeneming.").passed);
        assert!(kern_opening("Vrijheidsbeneming voorafgaand aan de behandeling.").passed);
    }

    #[test]
    fn wettelijke_verwijzing_anchors_to_context() {
        let ctx = ContextSet::new().with_wettelijk(["Sv"]);
        assert!(wettelijke_verwijzing("Vrijheidsbeneming op grond van Sv.", &ctx).passed);

        let missing = wettelijke_verwijzing("Vrijheidsbeneming zonder verwijzing.", &ctx);
        assert!(!missing.passed);
        assert!((missing.score - 0.3).abs() < f64::EPSILON);

        // No statutory context declared: vacuously satisfied
        assert!(wettelijke_verwijzing("Wat dan ook.", &ContextSet::new()).passed);
    }
}

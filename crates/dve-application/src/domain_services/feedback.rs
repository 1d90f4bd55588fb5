//! Feedback Generation
//!
//! Translates a violation list plus iteration history into a short,
//! prioritized list of human-actionable suggestions for the next
//! generation round. Pure: the same inputs return the same items.

use dve_domain::constants::{DEFAULT_STAGNATION_THRESHOLD, MAX_FEEDBACK_ITEMS};
use dve_domain::{FeedbackItem, FeedbackKind, ValidationResult};
use serde::{Deserialize, Serialize};

/// Stagnation detection settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeedbackSettings {
    /// Improvement below this value over two iterations counts as stagnation
    pub stagnation_threshold: f64,
    /// Maximum number of items returned
    pub max_items: usize,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            stagnation_threshold: DEFAULT_STAGNATION_THRESHOLD,
            max_items: MAX_FEEDBACK_ITEMS,
        }
    }
}

/// Static table: rule id to an actionable instruction.
///
/// Falls back to the category prefix, then to the violation's own message.
fn template_for(rule_id: &str) -> Option<&'static str> {
    match rule_id {
        "STR001" => Some("omschrijf het begrip zonder het begrip zelf als opening te gebruiken"),
        "STR002" => Some("houd de definitie tussen de vijf en zestig woorden"),
        "STR003" => Some("sluit de definitie af met een punt"),
        "ESS001" => Some("open de definitie met het dragende zelfstandig naamwoord"),
        "ESS002" => Some("breng de essentie terug tot een enkele zin"),
        "CON001" => Some("vervang vage formuleringen door concrete kenmerken"),
        "CON002" => Some("sluit de opsomming: benoem de volledige verzameling"),
        "CON003" => Some("verplaats voorbeelden naar de toelichting"),
        "INT001" => Some("maak de definitie zelfstandig leesbaar, zonder verwijzingen elders"),
        "INT002" => Some("beschrijf wat het begrip is, niet wat zou moeten gebeuren"),
        "COH001" => Some("veranker de definitie in de opgegeven wettelijke regeling"),
        "VER001" => Some("verwijder versieaanduidingen uit de definitietekst"),
        "AIK001" => Some("verwijder elke verwijzing naar het taalmodel"),
        "AIK002" => Some("lever alleen de definitietekst, zonder commentaar erop"),
        "LEGE_TEKST" => Some("lever een definitietekst aan"),
        _ => None,
    }
}

/// Fallback instruction per rule category prefix
fn prefix_template(rule_id: &str) -> Option<&'static str> {
    let prefix: String = rule_id.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    match prefix.as_str() {
        "STR" => Some("herzie de zinsstructuur van de definitie"),
        "ESS" => Some("stel de essentie van het begrip voorop"),
        "CON" => Some("scherp de woordkeuze van de definitie aan"),
        "INT" => Some("maak de definitie zelfstandig en verwijzingsvrij"),
        "COH" => Some("breng de definitie in lijn met de opgegeven context"),
        "VER" => Some("houd versie-informatie buiten de definitietekst"),
        "AIK" => Some("verwijder generatie-artefacten uit de tekst"),
        _ => None,
    }
}

/// Iteration-aware feedback generator
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackGenerator {
    settings: FeedbackSettings,
}

impl FeedbackGenerator {
    /// Create a generator with the given settings
    pub fn new(settings: FeedbackSettings) -> Self {
        Self { settings }
    }

    /// Build the prioritized suggestion list for the next iteration.
    ///
    /// # Arguments
    /// * `validation` - Result of the iteration that just failed
    /// * `iteration` - 1-based number of the completed iteration
    /// * `score_history` - Scores of all completed iterations, oldest first
    pub fn generate(
        &self,
        validation: &ValidationResult,
        iteration: u32,
        score_history: &[f64],
    ) -> Vec<FeedbackItem> {
        let kind = phrasing_tier(iteration);
        let mut items = Vec::new();

        if let Some(stagnation) = self.detect_stagnation(score_history) {
            items.push(stagnation);
        }

        // Violations arrive sorted critical-first by the engine; keep that
        // order and truncate
        for violation in &validation.violations {
            if items.len() >= self.settings.max_items {
                break;
            }
            let base = template_for(&violation.rule_id)
                .or_else(|| prefix_template(&violation.rule_id))
                .map(ToString::to_string)
                .unwrap_or_else(|| violation.message.clone());
            items.push(FeedbackItem {
                kind,
                rule_id: Some(violation.rule_id.clone()),
                message: phrase(kind, &base),
            });
        }

        items.truncate(self.settings.max_items);
        items
    }

    /// Emit the distinguished stagnation item when the last two iterations
    /// improved less than the threshold.
    fn detect_stagnation(&self, score_history: &[f64]) -> Option<FeedbackItem> {
        if score_history.len() < 2 {
            return None;
        }
        let last = score_history[score_history.len() - 1];
        let window_start = score_history[score_history.len().saturating_sub(3)];
        let improvement = last - window_start;
        if improvement < self.settings.stagnation_threshold {
            Some(FeedbackItem {
                kind: FeedbackKind::Stagnation,
                rule_id: None,
                message: format!(
                    "de score verbetert nauwelijks ({improvement:+.2} over de laatste iteraties); \
                     kies een wezenlijk andere formulering in plaats van een kleine aanpassing"
                ),
            })
        } else {
            None
        }
    }
}

fn phrasing_tier(iteration: u32) -> FeedbackKind {
    match iteration {
        0 | 1 => FeedbackKind::Instruction,
        2 => FeedbackKind::Rephrase,
        _ => FeedbackKind::Restructure,
    }
}

fn phrase(kind: FeedbackKind, base: &str) -> String {
    match kind {
        FeedbackKind::Instruction => base.to_string(),
        FeedbackKind::Rephrase => format!("probeer een andere formulering: {base}"),
        FeedbackKind::Restructure | FeedbackKind::Stagnation => {
            format!("herstructureer de definitie volledig: {base}")
        }
    }
}

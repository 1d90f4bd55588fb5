//! Generation feedback value objects

use serde::{Deserialize, Serialize};

/// Phrasing tier of a feedback item, chosen by iteration number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// First iteration: direct instruction
    Instruction,
    /// Second iteration: alternative phrasing suggestion
    Rephrase,
    /// Third iteration onward: fundamental restructuring
    Restructure,
    /// Distinguished item emitted when scores stop improving
    Stagnation,
}

/// Value Object: One Actionable Suggestion
///
/// Items are ordered critical-first and truncated to a small fixed number so
/// the external generator receives focused guidance rather than the raw
/// violation dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Phrasing tier
    pub kind: FeedbackKind,
    /// Rule the suggestion derives from; None for stagnation items
    pub rule_id: Option<String>,
    /// Human-actionable message
    pub message: String,
}

impl FeedbackItem {
    /// Render items as a guidance block for the generator
    pub fn render_guidance(items: &[FeedbackItem]) -> String {
        items
            .iter()
            .map(|i| format!("- {}", i.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guidance_rendering() {
        let items = vec![
            FeedbackItem {
                kind: FeedbackKind::Instruction,
                rule_id: Some("STR001".to_string()),
                message: "Begin niet met het begrip zelf".to_string(),
            },
            FeedbackItem {
                kind: FeedbackKind::Stagnation,
                rule_id: None,
                message: "Kies een andere aanpak".to_string(),
            },
        ];
        let guidance = FeedbackItem::render_guidance(&items);
        assert!(guidance.contains("- Begin niet"));
        assert!(guidance.contains("- Kies een andere aanpak"));
    }
}

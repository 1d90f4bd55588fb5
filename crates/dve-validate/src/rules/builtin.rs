//! Builtin Standard Rule Tables
//!
//! The standard toetsregels shipped with the engine, one table per
//! category. A YAML rules directory replaces this set wholesale when
//! configured.

use super::{Applicability, Detection, PatternPolarity, Rule, RuleCategory, RulePriority};
use crate::evaluators::DelegateCheck;
use dve_domain::{Error, Result};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;

fn pattern(p: &str) -> Result<Regex> {
    RegexBuilder::new(p)
        .case_insensitive(true)
        .build()
        .map_err(|err| {
            Error::configuration_with_source(format!("builtin pattern '{p}' failed to compile"), err)
        })
}

fn tags(list: &[&str]) -> Applicability {
    Applicability::Tags(list.iter().map(ToString::to_string).collect::<BTreeSet<_>>())
}

/// The complete builtin rule set
pub fn builtin_rules() -> Result<Vec<Rule>> {
    let mut rules = Vec::new();
    rules.extend(content_rules()?);
    rules.extend(essentie_rules());
    rules.extend(structuur_rules()?);
    rules.extend(integriteit_rules()?);
    rules.extend(coherentie_rules());
    rules.extend(versie_rules()?);
    rules.extend(ai_kwaliteit_rules()?);
    Ok(rules)
}

/// Content rules: wording and word choice
fn content_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule {
            id: "CON001".into(),
            naam: "Geen vaagtaal".into(),
            omschrijving: "Een definitie vermijdt vage en afzwakkende formuleringen.".into(),
            melding: "definitie bevat vage formuleringen".into(),
            suggestie: Some("vervang vage woorden door een concrete omschrijving".into()),
            weight: 0.5,
            priority: RulePriority::Midden,
            category: RuleCategory::Content,
            applicability: Applicability::All,
            detection: Detection::Delegate(DelegateCheck::VaagtaalDichtheid { max_ratio: 0.1 }),
            voorbeeld_goed: vec![
                "Vrijheidsbeneming voorafgaand aan de inhoudelijke behandeling van een strafzaak."
                    .into(),
            ],
            voorbeeld_fout: vec!["Een soort maatregel die eigenlijk vaak wordt opgelegd.".into()],
        },
        Rule {
            id: "CON002".into(),
            naam: "Geen open opsomming".into(),
            omschrijving: "Een definitie somt niet op met etcetera of vergelijkbare afkortingen."
                .into(),
            melding: "definitie eindigt in een open opsomming".into(),
            suggestie: Some("benoem de volledige verzameling of het onderscheidende kenmerk".into()),
            weight: 0.3,
            priority: RulePriority::Laag,
            category: RuleCategory::Content,
            applicability: Applicability::All,
            detection: Detection::Patterns {
                patterns: vec![
                    pattern(r"\betc\.?\b")?,
                    pattern(r"\benz\.?\b")?,
                    pattern(r"\be\.d\.")?,
                    pattern(r"\ben dergelijke\b")?,
                ],
                polarity: PatternPolarity::Forbid,
            },
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec!["Dwangmiddelen zoals aanhouding, inverzekeringstelling, etc.".into()],
        },
        Rule {
            id: "CON003".into(),
            naam: "Geen voorbeelden in de definitie".into(),
            omschrijving: "Voorbeelden horen in een toelichting, niet in de definitietekst.".into(),
            melding: "definitie bevat een voorbeeldopsomming".into(),
            suggestie: None,
            weight: 0.3,
            priority: RulePriority::Laag,
            category: RuleCategory::Content,
            applicability: Applicability::All,
            detection: Detection::Patterns {
                patterns: vec![pattern(r"\bbijvoorbeeld\b")?, pattern(r"\bzoals\b")?],
                polarity: PatternPolarity::Forbid,
            },
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec!["Een maatregel zoals bijvoorbeeld voorlopige hechtenis.".into()],
        },
    ])
}

/// Essentie rules: the essential meaning is stated first and completely
fn essentie_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "ESS001".into(),
            naam: "Kern voorop".into(),
            omschrijving: "Een definitie opent met het kernzelfstandig naamwoord, niet met een aanloop.".into(),
            melding: "definitie opent niet met de kern".into(),
            suggestie: Some("begin de definitie met het dragende zelfstandig naamwoord".into()),
            weight: 1.0,
            priority: RulePriority::Hoog,
            category: RuleCategory::Essentie,
            applicability: Applicability::All,
            detection: Detection::Delegate(DelegateCheck::KernOpening),
            voorbeeld_goed: vec![
                "Vrijheidsbeneming voorafgaand aan de inhoudelijke behandeling van een strafzaak."
                    .into(),
            ],
            voorbeeld_fout: vec!["Dit is een vorm van vrijheidsbeneming.".into()],
        },
        Rule {
            id: "ESS002".into(),
            naam: "Enkele zin".into(),
            omschrijving: "De essentie staat in een enkele zin.".into(),
            melding: "definitie beslaat meer dan een zin".into(),
            suggestie: Some("verplaats toelichting naar een apart toelichtingsveld".into()),
            weight: 0.7,
            priority: RulePriority::Midden,
            category: RuleCategory::Essentie,
            applicability: Applicability::All,
            detection: Detection::Delegate(DelegateCheck::EnkeleZin),
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec!["Vrijheidsbeneming. Deze wordt opgelegd door de rechter.".into()],
        },
    ]
}

/// Structuur rules: sentence and text structure
fn structuur_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule {
            id: "STR001".into(),
            naam: "Geen circulaire definitie".into(),
            omschrijving: "Een definitie opent niet met het begrip dat zij definieert.".into(),
            melding: "definitie is circulair: zij opent met het begrip zelf".into(),
            suggestie: Some("omschrijf het begrip zonder het begrip zelf te gebruiken".into()),
            weight: 1.0,
            priority: RulePriority::Verplicht,
            category: RuleCategory::Structuur,
            applicability: Applicability::All,
            detection: Detection::Delegate(DelegateCheck::GeenCirculariteit),
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec![
                "Voorlopige hechtenis is hechtenis die voorlopig wordt opgelegd.".into(),
            ],
        },
        Rule {
            id: "STR002".into(),
            naam: "Lengte binnen band".into(),
            omschrijving: "Een definitie telt minimaal 5 en maximaal 60 woorden.".into(),
            melding: "definitie valt buiten de lengteband".into(),
            suggestie: None,
            weight: 0.8,
            priority: RulePriority::Hoog,
            category: RuleCategory::Structuur,
            applicability: Applicability::All,
            detection: Detection::Delegate(DelegateCheck::LengteBand {
                min_woorden: 5,
                max_woorden: 60,
            }),
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec!["Vrijheidsbeneming.".into()],
        },
        Rule {
            id: "STR003".into(),
            naam: "Afgesloten zin".into(),
            omschrijving: "Een definitie eindigt met een punt.".into(),
            melding: "definitie eindigt niet met een punt".into(),
            suggestie: None,
            weight: 0.2,
            priority: RulePriority::Laag,
            category: RuleCategory::Structuur,
            applicability: Applicability::All,
            detection: Detection::Patterns {
                patterns: vec![pattern(r"\.\s*$")?],
                polarity: PatternPolarity::Require,
            },
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec![],
        },
    ])
}

/// Integriteit rules: the definition stands on its own
fn integriteit_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule {
            id: "INT001".into(),
            naam: "Geen onbestemde verwijzing".into(),
            omschrijving: "Een definitie verwijst niet naar een niet nader bepaalde plaats of tekst.".into(),
            melding: "definitie leunt op een onbestemde verwijzing".into(),
            suggestie: Some("maak de definitie zelfstandig leesbaar".into()),
            weight: 0.5,
            priority: RulePriority::Midden,
            category: RuleCategory::Integriteit,
            applicability: Applicability::All,
            detection: Detection::Patterns {
                patterns: vec![
                    pattern(r"\bzie boven\b")?,
                    pattern(r"\bzoals eerder\b")?,
                    pattern(r"\bvoornoemd")?,
                    pattern(r"\bbovengenoemd")?,
                ],
                polarity: PatternPolarity::Forbid,
            },
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec!["De voornoemde maatregel van vrijheidsbeneming.".into()],
        },
        Rule {
            id: "INT002".into(),
            naam: "Beschrijvend, niet normatief".into(),
            omschrijving: "Een definitie beschrijft wat iets is, niet wat behoort te gebeuren.".into(),
            melding: "definitie bevat normatieve lading".into(),
            suggestie: None,
            weight: 0.5,
            priority: RulePriority::Midden,
            category: RuleCategory::Integriteit,
            applicability: Applicability::All,
            detection: Detection::Patterns {
                patterns: vec![
                    pattern(r"\bbehoort te\b")?,
                    pattern(r"\bzou moeten\b")?,
                    pattern(r"\bdient te\b")?,
                ],
                polarity: PatternPolarity::Forbid,
            },
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec!["Vrijheidsbeneming die zou moeten worden beperkt.".into()],
        },
    ])
}

/// Coherentie rules: consistency with the declared context
fn coherentie_rules() -> Vec<Rule> {
    vec![Rule {
        id: "COH001".into(),
        naam: "Verankering in wettelijke context".into(),
        omschrijving: "Met een wettelijke context verwijst de definitie naar die regeling.".into(),
        melding: "definitie verwijst niet naar de opgegeven wettelijke context".into(),
        suggestie: Some("noem de regeling waarbinnen het begrip zijn betekenis krijgt".into()),
        weight: 0.4,
        priority: RulePriority::Midden,
        category: RuleCategory::Coherentie,
        applicability: tags(&["wettelijk"]),
        detection: Detection::Delegate(DelegateCheck::WettelijkeVerwijzing),
        voorbeeld_goed: vec![],
        voorbeeld_fout: vec![],
    }]
}

/// Versie rules: version hygiene of the text itself
fn versie_rules() -> Result<Vec<Rule>> {
    Ok(vec![Rule {
        id: "VER001".into(),
        naam: "Geen versieaanduiding in de tekst".into(),
        omschrijving: "Versiebeheer loopt via het register, niet via de definitietekst.".into(),
        melding: "definitietekst bevat een versieaanduiding".into(),
        suggestie: None,
        weight: 0.2,
        priority: RulePriority::Laag,
        category: RuleCategory::Versie,
        applicability: Applicability::All,
        detection: Detection::Patterns {
            patterns: vec![pattern(r"\bversie\s+\d")?, pattern(r"\bv\d+\.\d+")?],
            polarity: PatternPolarity::Forbid,
        },
        voorbeeld_goed: vec![],
        voorbeeld_fout: vec!["Vrijheidsbeneming (versie 2).".into()],
    }])
}

/// AI-kwaliteit rules: artifacts of machine generation
fn ai_kwaliteit_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule {
            id: "AIK001".into(),
            naam: "Geen AI-disclaimer".into(),
            omschrijving: "Gegenereerde tekst bevat geen verwijzing naar het taalmodel zelf.".into(),
            melding: "definitie bevat een AI-disclaimer".into(),
            suggestie: Some("verwijder de verwijzing naar het taalmodel en houd de definitie over".into()),
            weight: 0.6,
            priority: RulePriority::Verplicht,
            category: RuleCategory::AiKwaliteit,
            applicability: Applicability::All,
            detection: Detection::Patterns {
                patterns: vec![
                    pattern(r"\bals (een )?ai\b")?,
                    pattern(r"\btaalmodel\b")?,
                    pattern(r"\bik kan (geen|niet)\b")?,
                ],
                polarity: PatternPolarity::Forbid,
            },
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec!["Als AI kan ik geen juridisch advies geven.".into()],
        },
        Rule {
            id: "AIK002".into(),
            naam: "Geen metacommentaar".into(),
            omschrijving: "De tekst is de definitie zelf, geen commentaar op de definitie.".into(),
            melding: "definitie bevat metacommentaar over zichzelf".into(),
            suggestie: None,
            weight: 0.5,
            priority: RulePriority::Hoog,
            category: RuleCategory::AiKwaliteit,
            applicability: Applicability::All,
            detection: Detection::Patterns {
                patterns: vec![
                    pattern(r"\bhier is een definitie\b")?,
                    pattern(r"\bdeze definitie beschrijft\b")?,
                    pattern(r"^definitie:")?,
                ],
                polarity: PatternPolarity::Forbid,
            },
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec!["Hier is een definitie van voorlopige hechtenis.".into()],
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_loads() {
        let rules = builtin_rules().unwrap();
        assert!(rules.len() >= 12);

        // Ids are unique
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn every_category_is_covered() {
        let rules = builtin_rules().unwrap();
        for category in [
            RuleCategory::Content,
            RuleCategory::Essentie,
            RuleCategory::Structuur,
            RuleCategory::Integriteit,
            RuleCategory::Coherentie,
            RuleCategory::Versie,
            RuleCategory::AiKwaliteit,
        ] {
            assert!(
                rules.iter().any(|r| r.category == category),
                "no builtin rule for category {category}"
            );
        }
    }

    #[test]
    fn verplicht_rules_exist() {
        let rules = builtin_rules().unwrap();
        assert!(
            rules
                .iter()
                .any(|r| r.priority == RulePriority::Verplicht)
        );
    }
}

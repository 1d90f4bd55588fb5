//! End-to-end tests over the engine facade

use dve::providers::{MemoryRepository, ScriptedGenerator, StaticSynonymLookup};
use dve::validate::{RuleRegistry, RuleSource};
use dve::{
    Categorie, ContextSet, Definition, DefinitionStatus, Engine, EngineBuilder, Error, MatchKind,
    Severity,
};
use std::io::Write;
use std::sync::Arc;

const GOOD_TEXT: &str =
    "Vrijheidsbeneming voorafgaand aan de inhoudelijke behandeling van een strafzaak, \
     opgelegd op grond van het Wetboek van Strafvordering Sv.";

fn engine_with(generator: ScriptedGenerator, repository: Arc<MemoryRepository>) -> Engine {
    EngineBuilder::new()
        .with_generator(Arc::new(generator))
        .with_repository(repository)
        .build()
        .unwrap()
}

fn wettelijk_context() -> ContextSet {
    ContextSet::new()
        .with_organisatorisch(["OM"])
        .with_wettelijk(["Sv"])
}

#[test]
fn builder_requires_a_generator() {
    let err = EngineBuilder::new().build().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn scenario_a_minor_content_violation_stays_acceptable() {
    let engine = engine_with(
        ScriptedGenerator::new(Vec::<String>::new()),
        Arc::new(MemoryRepository::new()),
    );
    // Satisfies the structural and essence rules, trips the vaagtaal
    // content rule (priority midden)
    let text = "Vrijheidsbeneming die meestal wordt toegepast voorafgaand aan de \
                inhoudelijke behandeling van een redelijk zware strafzaak.";
    let context = ContextSet::new().with_juridisch(["Sv"]);

    let result = engine
        .validate(text, "voorlopige hechtenis", Categorie::Proces, &context)
        .unwrap();

    assert!(result.is_acceptable);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule_id, "CON001");
    assert!(result.violations[0].severity < Severity::Critical);
    assert!(result.overall_score < 1.0);
}

#[test]
fn scenario_b_empty_context_blocks_establishment() {
    let engine = engine_with(
        ScriptedGenerator::new(Vec::<String>::new()),
        Arc::new(MemoryRepository::new()),
    );
    let validation = engine
        .validate(GOOD_TEXT, "voorlopige hechtenis", Categorie::Proces, &wettelijk_context())
        .unwrap();
    assert!(validation.is_acceptable);

    let decision = engine.decide_gate(
        &validation,
        &ContextSet::new(),
        DefinitionStatus::Established,
        DefinitionStatus::Review,
    );
    assert!(!decision.allowed);
    assert!(decision.reason.to_string().contains("minimaal een context"));
}

#[tokio::test]
async fn scenario_c_categorie_splits_the_exact_key() {
    let context = ContextSet::new().with_organisatorisch(["OM"]);
    let existing = Definition::new_draft(
        "voorlopige hechtenis",
        GOOD_TEXT,
        Categorie::Entiteit,
        context.clone(),
    );
    let repository = Arc::new(MemoryRepository::with_records([existing]).await);
    let engine = engine_with(ScriptedGenerator::new(Vec::<String>::new()), repository);

    let matches = engine
        .check_duplicates("voorlopige hechtenis", &context, Categorie::Proces)
        .await
        .unwrap();

    // No exact hit across categorieen, but the identical term string
    // surfaces as a top-tier fuzzy match
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, MatchKind::Fuzzy);
    assert_eq!(matches[0].similarity, 1.0);
}

#[tokio::test]
async fn orchestration_end_to_end_persists_an_accepted_draft() {
    let repository = Arc::new(MemoryRepository::new());
    let engine = engine_with(ScriptedGenerator::new([GOOD_TEXT]), repository.clone());

    let result = engine
        .orchestrate("voorlopige hechtenis", &wettelijk_context(), Categorie::Proces, None)
        .await
        .unwrap();

    assert!(result.accepted);
    assert_eq!(result.definition.status, DefinitionStatus::Review);
    assert_eq!(result.definition.version_number, 1);
    assert_eq!(repository.len().await, 1);

    // A second run for the same term now reports the stored record as a
    // duplicate
    let matches = engine
        .check_duplicates("voorlopige hechtenis", &wettelijk_context(), Categorie::Proces)
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, MatchKind::Exact);
}

#[tokio::test]
async fn synonym_lookup_is_wired_through_the_builder() {
    let context = ContextSet::new().with_organisatorisch(["OM"]);
    let existing = Definition::new_draft(
        "advocaat",
        "Rechtsbijstandverlener die een verdachte in een strafzaak bijstaat.",
        Categorie::Entiteit,
        context.clone(),
    );
    let repository = Arc::new(MemoryRepository::with_records([existing]).await);
    let engine = EngineBuilder::new()
        .with_generator(Arc::new(ScriptedGenerator::new(Vec::<String>::new())))
        .with_repository(repository)
        .with_synonyms(Arc::new(StaticSynonymLookup::from_groups([[
            "raadsman", "advocaat",
        ]])))
        .build()
        .unwrap();

    let matches = engine
        .check_duplicates("raadsman", &context, Categorie::Entiteit)
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, MatchKind::Synonym);
}

#[test]
fn reload_keeps_the_registry_populated() {
    let engine = engine_with(
        ScriptedGenerator::new(Vec::<String>::new()),
        Arc::new(MemoryRepository::new()),
    );
    let report = engine.reload_rules().unwrap();
    assert!(report.loaded > 0);
    assert!(report.rejected.is_empty());
}

const RULE_FILE: &str = r#"
- id: TST001
  naam: Afgesloten zin
  omschrijving: Een definitie eindigt met een punt.
  melding: definitie eindigt niet met een punt
  weight: 0.5
  priority: hoog
  category: structuur
  detection:
    type: patterns
    polarity: require
    patterns: ['\.\s*$']
- id: TST002
  naam: Verankering in wettelijke context
  omschrijving: Met een wettelijke context verwijst de definitie naar die regeling.
  melding: geen verwijzing naar de wettelijke context
  weight: 0.4
  priority: midden
  category: coherentie
  applicability: [wettelijk]
  detection:
    type: delegate
    check: wettelijke_verwijzing
"#;

#[test]
fn rule_source_round_trip_preserves_applicability() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("regels.yml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(RULE_FILE.as_bytes()).unwrap();

    let source = RuleSource::Directory(tmp.path().to_path_buf());
    let (first, _) = RuleRegistry::load(source.clone()).unwrap();
    let (second, _) = RuleRegistry::load(source).unwrap();

    let with_wet = ContextSet::new().with_wettelijk(["Sv"]);
    let without = ContextSet::new();
    for context in [&with_wet, &without] {
        let ids_first: Vec<String> = first
            .applicable_rules(Categorie::Proces, context)
            .iter()
            .map(|r| r.id.clone())
            .collect();
        let ids_second: Vec<String> = second
            .applicable_rules(Categorie::Proces, context)
            .iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(ids_first, ids_second);
    }

    // The statutory rule applies only with statutory context
    assert_eq!(first.applicable_rules(Categorie::Proces, &with_wet).len(), 2);
    assert_eq!(first.applicable_rules(Categorie::Proces, &without).len(), 1);
}

#[tokio::test]
async fn duplicate_ordering_is_stable_between_calls() {
    let context = ContextSet::new().with_organisatorisch(["OM"]);
    let records: Vec<Definition> = [
        "voorlopige hechtenis",
        "voorlopige hechtennis",
        "voorlopige hechting",
    ]
    .iter()
    .map(|begrip| Definition::new_draft(*begrip, GOOD_TEXT, Categorie::Proces, context.clone()))
    .collect();
    let repository = Arc::new(MemoryRepository::with_records(records).await);
    let engine = engine_with(ScriptedGenerator::new(Vec::<String>::new()), repository);

    let first = engine
        .check_duplicates("voorlopige hechtenis", &context, Categorie::Proces)
        .await
        .unwrap();
    let second = engine
        .check_duplicates("voorlopige hechtenis", &context, Categorie::Proces)
        .await
        .unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

use std::collections::BTreeSet;
use std::sync::Arc;

use lexicomb::config::PhonotacticConfig;
use lexicomb::error::Result;
use lexicomb::phonotactic::{GenerationOptions, ModelDocument, PhonotacticModel, VowelGroupSyllabifier};
use lexicomb::puzzle::PuzzleConstraint;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

const TRAINING: &[&str] = &["grand", "dragoon", "agron", "wagon", "iron", "apron"];

fn toy_model() -> Result<PhonotacticModel> {
    PhonotacticModel::train(
        TRAINING.iter().copied(),
        Arc::new(VowelGroupSyllabifier),
        PhonotacticConfig::default(),
    )
}

#[test]
fn test_toy_dictionary_scores() -> Result<()> {
    let model = toy_model()?;

    assert_eq!(model.syllabify("dragon"), vec!["dra", "gon"]);
    let dragon = model.score("dragon");
    assert!(dragon > -4.0, "dragon scored {dragon}");
    assert!(model.is_viable("dragon"));

    let garbage = model.score("pgrnod");
    assert!(garbage < -4.0, "pgrnod scored {garbage}");
    assert!(!model.is_viable("pgrnod"));

    assert_eq!(model.score(""), -100.0);
    assert!(!model.is_viable(""));
    Ok(())
}

#[test]
fn test_scores_are_log_probabilities() -> Result<()> {
    let model = toy_model()?;
    for word in ["dragon", "grand", "iron", "zzz", "a"] {
        let score = model.score(word);
        assert!(score.is_finite());
        assert!(score <= 0.0);
    }
    Ok(())
}

#[test]
fn test_generation_invariants() -> Result<()> {
    let model = toy_model()?;
    let options = GenerationOptions::new("dragon", 'g', 4, 8)?;
    let generated: Vec<String> = model.generate_viable_words(&options).collect();
    assert!(!generated.is_empty());

    let alphabet: BTreeSet<char> = "dragon".chars().collect();
    for word in &generated {
        assert!(word.contains('g'), "{word} lacks the center letter");
        assert!((4..=8).contains(&word.chars().count()), "{word} has a bad length");
        assert!(word.chars().all(|c| alphabet.contains(&c)), "{word} leaves the pool");
    }

    let distinct: BTreeSet<&str> = generated.iter().map(String::as_str).collect();
    assert!(distinct.contains("grand"));
    assert!(distinct.contains("agron"));
    assert!(distinct.contains("dragoon"));
    Ok(())
}

#[test]
fn test_count_matches_materialized() -> Result<()> {
    let model = toy_model()?;
    for (pool, center, min_len, max_len) in [("dragon", 'g', 4, 8), ("dragon", 'o', 1, 12), ("wagonir", 'n', 3, 6)] {
        let options = GenerationOptions::new(pool, center, min_len, max_len)?;
        let materialized = model.generate_viable_words(&options).count();
        assert_eq!(model.count_viable_words(&options), materialized);
    }
    Ok(())
}

#[test]
fn test_generation_from_puzzle_constraint() -> Result<()> {
    let model = toy_model()?;
    let constraint = PuzzleConstraint::new("dragon", 'g', 4)?;
    let options = GenerationOptions::from_constraint(&constraint, 8)?;
    let direct = GenerationOptions::new("dragon", 'g', 4, 8)?;
    assert_eq!(
        model.generate_viable_words(&options).collect::<Vec<_>>(),
        model.generate_viable_words(&direct).collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn test_random_word_properties() -> Result<()> {
    let model = toy_model()?;
    let options = GenerationOptions::new("dragon", 'g', 4, 8)?;
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let word = model
            .random_viable_word_with_rng(&options, 100, &mut rng)
            .expect("the toy pool always yields a word");
        assert!(word.contains('g'));
        assert!((4..=8).contains(&word.chars().count()));
        assert!(word.chars().all(|c| "dragon".contains(c)));
        assert!(model.is_viable(&word));
    }
    Ok(())
}

#[test]
fn test_random_word_without_anchor() -> Result<()> {
    let model = toy_model()?;
    let options = GenerationOptions::new("dragon", 'z', 1, 8)?;
    assert_eq!(model.random_viable_word(&options, 100), None);
    Ok(())
}

#[test]
fn test_export_import_preserves_scores() -> Result<()> {
    let model = toy_model()?;
    let dir = TempDir::new()?;
    let path = dir.path().join("model.json");
    model.save_to_file(&path)?;

    let loaded = PhonotacticModel::load_from_file(&path, Arc::new(VowelGroupSyllabifier), PhonotacticConfig::default())?;
    assert_eq!(loaded.summary(), model.summary());
    assert_eq!(loaded.char_transitions(), model.char_transitions());
    assert_eq!(loaded.syllable_bigrams(), model.syllable_bigrams());
    for word in ["dragon", "pgrnod", "wagon", "ragano"] {
        assert_eq!(loaded.score(word), model.score(word));
    }

    let options = GenerationOptions::new("dragon", 'g', 4, 8)?;
    assert_eq!(
        loaded.generate_viable_words(&options).collect::<Vec<_>>(),
        model.generate_viable_words(&options).collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn test_document_markers() -> Result<()> {
    let json = toy_model()?.to_document().to_json_string(false)?;
    let document = ModelDocument::from_json_str(&json)?;
    assert!(document.syllable_bigrams.contains_key("^^"));
    assert!(document.char_transitions.keys().any(|k| k.starts_with('^')));
    Ok(())
}

#[test]
fn test_import_rejects_positive_values() {
    let json = r#"{"charTransitions": {"^^": {"a": 0.5}}, "syllableBigrams": {}}"#;
    let result = PhonotacticModel::from_json_str(json, Arc::new(VowelGroupSyllabifier), PhonotacticConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_filter_model() -> Result<()> {
    let model = toy_model()?;
    let filtered = model.filter_model("dragon");

    let before = model.summary();
    let after = filtered.summary();
    assert!(after.syllable_transitions <= before.syllable_transitions);
    assert!(after.char_transitions < before.char_transitions);

    for word in ["dragon", "grand", "agron"] {
        assert!((filtered.score(word) - model.score(word)).abs() < 1e-12);
    }

    let options = GenerationOptions::new("dragon", 'g', 4, 8)?;
    assert_eq!(
        filtered.generate_viable_words(&options).collect::<Vec<_>>(),
        model.generate_viable_words(&options).collect::<Vec<_>>()
    );
    Ok(())
}

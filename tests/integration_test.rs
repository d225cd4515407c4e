// Integration tests for aisle
use aisle::prelude::*;
use aisle::{classify_by_prefix, find_nearest, CatalogRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::sync::Arc;

const DIM: usize = 32;

fn random_unit(rng: &mut StdRng) -> Vector {
    let data: Vec<f32> = (0..DIM).map(|_| rng.random_range(-1.0f32..1.0)).collect();
    Vector::new(data).normalized()
}

fn grocery_catalog(rng: &mut StdRng) -> Catalog {
    let items = [
        ("Apple", Category::Produce),
        ("Apple Juice", Category::Beverages),
        ("Pineapple", Category::Produce),
        ("Banana", Category::Produce),
        ("Whole Milk", Category::Dairy),
        ("Cheddar Cheese", Category::Dairy),
        ("Sourdough Bread", Category::Bakery),
        ("Salmon Fillet", Category::MeatAndSeafood),
        ("Frozen Peas", Category::Frozen),
        ("Potato Chips", Category::Snacks),
        ("Dish Soap", Category::Household),
        ("Toothpaste", Category::PersonalCare),
        ("Cat Litter", Category::PetSupplies),
    ];
    Catalog::load(
        items
            .iter()
            .map(|(name, category)| CatalogEntry::new(*name, random_unit(rng), *category)),
    )
    .unwrap()
}

#[test]
fn test_find_nearest_sorted_for_random_queries() {
    let mut rng = StdRng::seed_from_u64(2024);
    let catalog = grocery_catalog(&mut rng);

    for k in [1, 5, 13, 20] {
        let query = random_unit(&mut rng);
        let neighbors = find_nearest(&query, &catalog, k).unwrap();
        assert_eq!(neighbors.len(), k.min(catalog.len()));
        for pair in neighbors.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }
}

#[test]
fn test_classify_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(5);
    let catalog = grocery_catalog(&mut rng);
    let classifier = Classifier::new(ClassifierConfig {
        confidence_threshold: 0.0,
        ..Default::default()
    });

    for _ in 0..10 {
        let query = random_unit(&mut rng);
        let first = classifier.classify(Some(&query), &catalog).unwrap();
        let second = classifier.classify(Some(&query), &catalog).unwrap();
        assert_eq!(first.category, second.category);
        assert_eq!(first.confidence, second.confidence);
        let names = |r: &ClassificationResult| {
            r.neighbors.iter().map(|n| n.entry.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }
}

#[test]
fn test_exact_catalog_vector_overrides_vote() {
    let mut rng = StdRng::seed_from_u64(8);
    let catalog = grocery_catalog(&mut rng);
    let classifier = Classifier::default();

    for entry in catalog.iter() {
        let result = classifier.classify(Some(&entry.vector), &catalog).unwrap();
        assert_eq!(result.category, entry.category);
        assert!(result.confidence > 0.95);
        assert_eq!(result.neighbors[0].entry.name, entry.name);
    }
}

#[test]
fn test_lexical_autocomplete_example() {
    let catalog = Catalog::load(["apple", "apple juice", "pineapple"].iter().enumerate().map(
        |(i, name)| {
            let mut v = vec![0.0; 3];
            v[i] = 1.0;
            CatalogEntry::new(*name, Vector::new(v), Category::Produce)
        },
    ))
    .unwrap();

    let ranker = AutocompleteRanker::default();
    let names: Vec<String> = ranker
        .suggest("app", &catalog, 2, None)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["apple", "apple juice"]);
}

#[test]
fn test_hybrid_suggestions_never_exceed_limit_or_repeat() {
    let mut rng = StdRng::seed_from_u64(77);
    let catalog = grocery_catalog(&mut rng);
    let ranker = AutocompleteRanker::default();

    for limit in 1..8 {
        let query = random_unit(&mut rng);
        let suggestions = ranker.suggest("apple", &catalog, limit, Some(&query)).unwrap();
        assert!(suggestions.len() <= limit);

        let mut names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), suggestions.len());

        for s in &suggestions {
            assert_eq!(s.is_lexical_match, s.name.to_lowercase().starts_with("apple"));
            assert!(s.score <= 1.0);
        }
    }
}

#[test]
fn test_empty_catalog_and_text_never_fail() {
    let empty = Arc::new(Catalog::empty(DIM));
    let engine = Engine::new(
        empty.clone(),
        ClassifierConfig::default(),
        SuggestConfig::default(),
        None,
    )
    .unwrap();

    let result = engine.classify_text("milk").unwrap();
    assert_eq!(result.category, Category::Other);
    assert_eq!(result.confidence, 0.0);
    assert!(result.neighbors.is_empty());
    assert!(engine.suggest_text("milk", 5).unwrap().is_empty());

    let mut rng = StdRng::seed_from_u64(1);
    let query = random_unit(&mut rng);
    let result = Classifier::default().classify(Some(&query), &empty).unwrap();
    assert_eq!(result.category, Category::Other);

    let catalog = grocery_catalog(&mut rng);
    assert_eq!(classify_by_prefix("", &catalog).category, Category::Other);
}

#[test]
fn test_engine_from_catalog_file() {
    let records = vec![
        CatalogRecord {
            name: "Greek Yogurt".to_string(),
            vector: vec![1.0, 0.0, 0.0],
            category: Category::Dairy,
        },
        CatalogRecord {
            name: "Grapes".to_string(),
            vector: vec![0.0, 5.0, 0.0],
            category: Category::Produce,
        },
        CatalogRecord {
            name: "Granola".to_string(),
            vector: vec![0.0, 0.0, 2.0],
            category: Category::Pantry,
        },
    ];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&records).unwrap().as_bytes())
        .unwrap();

    let catalog = Catalog::from_json_file(file.path()).unwrap();
    for entry in catalog.iter() {
        assert!((entry.vector.norm() - 1.0).abs() < 1e-6);
    }

    let engine = Engine::new(
        Arc::new(catalog),
        ClassifierConfig::default(),
        SuggestConfig::default(),
        None,
    )
    .unwrap();

    let suggestions = engine.suggest_text("gr", 5).unwrap();
    let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Greek Yogurt", "Grapes", "Granola"]);

    // Three categories with one prefix match each: first seen wins
    let result = engine.classify_text("gr").unwrap();
    assert_eq!(result.category, Category::Dairy);
    assert_eq!(result.confidence, 0.7);
}

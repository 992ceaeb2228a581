//! End-to-end flow over real files: catalog CSV, partitioned rating
//! history, and a compressed model artifact, driven through both
//! recommenders the way the dashboard consumes them.

use std::fs;
use std::path::PathBuf;

use sugerir::catalog::Catalog;
use sugerir::config::{CollaborativeConfig, ContentConfig, SourcePaths};
use sugerir::model::artifact::{ArtifactMetadata, ArtifactWriter};
use sugerir::model::FactorModel;
use sugerir::ratings::RatingStore;
use sugerir::recommend::{CollaborativeRecommender, ContentRecommender};

const CATALOG_CSV: &str = "\
product_code,name,description,tokens,avg_rating,image,price,list_price
SP001,Hydrating Day Cream,Gentle daily moisture,\"['cream', 'hydrating', 'skin', 'gentle', 'daily', 'moisture', 'soft']\",4.0,img/sp001.jpg,150000,180000
SP002,Rich Night Cream,Rich overnight repair,\"['cream', 'hydrating', 'skin', 'gentle', 'daily', 'moisture', 'rich']\",3.0,img/sp002.jpg,210000,250000
SP003,Velvet Matte Lipstick,Bold velvet color,\"['lipstick', 'matte', 'red', 'velvet', 'bold', 'glossy', 'wear']\",3.5,img/sp003.jpg,99000,120000
";

const RATINGS_PART1: &str = "\
customer_code,product_code,stars,name,image,price,list_price,description,avg_rating
U1,SP001,5,Hydrating Day Cream,img/sp001.jpg,150000,180000,Gentle daily moisture,4.0
U2,SP002,4,Rich Night Cream,img/sp002.jpg,210000,250000,Rich overnight repair,3.0
";

const RATINGS_PART2: &str = "\
customer_code,product_code,stars,name,image,price,list_price,description,avg_rating
U2,SP003,2,Velvet Matte Lipstick,img/sp003.jpg,99000,120000,Bold velvet color,3.5
U3,SP003,5,Velvet Matte Lipstick,img/sp003.jpg,99000,120000,Bold velvet color,3.5
";

fn write_fixtures(dir: &std::path::Path) -> SourcePaths {
    let catalog = dir.join("catalog.csv");
    let part1 = dir.join("ratings_part1.csv");
    let part2 = dir.join("ratings_part2.csv");
    let model = dir.join("rating_model.sgr");

    fs::write(&catalog, CATALOG_CSV).expect("write catalog");
    fs::write(&part1, RATINGS_PART1).expect("write ratings part1");
    fs::write(&part2, RATINGS_PART2).expect("write ratings part2");

    let mut writer = ArtifactWriter::new(ArtifactMetadata {
        model_type: "matrix_factorization".to_string(),
        n_factors: 1,
        rating_min: 1.0,
        rating_max: 5.0,
        global_mean: 3.0,
        users: vec!["U1".to_string(), "U2".to_string(), "U3".to_string()],
        items: vec!["SP001".to_string(), "SP002".to_string(), "SP003".to_string()],
    });
    writer.add_block("user_bias", vec![0.4, -0.2, 0.1]);
    writer.add_block("item_bias", vec![0.5, 0.8, -0.3]);
    writer.add_block("user_factors", vec![0.5, -0.5, 0.0]);
    writer.add_block("item_factors", vec![0.2, 0.6, -0.4]);
    writer.write(&model).expect("write artifact");

    SourcePaths::new()
        .with_catalog(catalog)
        .with_ratings(vec![part1, part2])
        .with_model(model)
}

#[test]
fn content_pipeline_over_catalog_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = write_fixtures(dir.path());

    let catalog = Catalog::load(&paths.catalog).expect("catalog load");
    assert_eq!(catalog.len(), 3);

    let recommender = ContentRecommender::new(catalog)
        .with_config(ContentConfig::new().with_top_n(3));
    let rows = recommender.recommend("SP001").expect("recommend");

    // Shared-vocabulary sibling outranks the better-rated stranger.
    let order: Vec<&str> = rows.iter().map(|r| r.product_code.as_str()).collect();
    assert_eq!(order, ["SP001", "SP002", "SP003"]);

    for row in &rows {
        let expected = row.similarity * 0.7 + row.avg_rating * 0.3;
        assert!((row.final_score - expected).abs() < 1e-9);
    }
    assert_eq!(rows[1].image, "img/sp002.jpg");
}

#[test]
fn collaborative_pipeline_over_rating_files_and_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = write_fixtures(dir.path());

    let store = RatingStore::load(&paths.ratings).expect("ratings load");
    assert_eq!(store.customers(), ["U1", "U2", "U3"]);

    let model = FactorModel::load(&paths.model).expect("model load");
    let recommender = CollaborativeRecommender::new(store, model)
        .with_config(CollaborativeConfig::new().with_top_n(6));

    let rows = recommender.recommend("U1").expect("recommend");

    // U1 rated SP001 with 5 stars; it must be excluded.
    assert!(rows.iter().all(|r| r.product_code != "SP001"));
    assert_eq!(rows.len(), 2);

    // Known-pair estimates: SP002 = 3 + 0.4 + 0.8 + 0.5*0.6 = 4.5,
    // SP003 = 3 + 0.4 - 0.3 + 0.5*(-0.4) = 2.9.
    assert_eq!(rows[0].product_code, "SP002");
    assert!((rows[0].estimated_rating - 4.5).abs() < 1e-6);
    assert_eq!(rows[1].product_code, "SP003");
    assert!((rows[1].estimated_rating - 2.9).abs() < 1e-6);

    // Display metadata joined back from the rating table.
    assert_eq!(rows[0].name, "Rich Night Cream");
    assert_eq!(rows[0].image, "img/sp002.jpg");
}

#[test]
fn reloading_inputs_reproduces_identical_behavior() {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = write_fixtures(dir.path());

    let catalog_a = Catalog::load(&paths.catalog).expect("catalog load");
    let catalog_b = Catalog::load(&paths.catalog).expect("catalog load");
    assert_eq!(catalog_a.fingerprint(), catalog_b.fingerprint());

    let content_a = ContentRecommender::new(catalog_a)
        .recommend("SP002")
        .expect("recommend");
    let content_b = ContentRecommender::new(catalog_b)
        .recommend("SP002")
        .expect("recommend");
    for (a, b) in content_a.iter().zip(&content_b) {
        assert_eq!(a.product_code, b.product_code);
        assert_eq!(a.final_score.to_bits(), b.final_score.to_bits());
    }

    let model_a = FactorModel::load(&paths.model).expect("model load");
    let model_b = FactorModel::load(&paths.model).expect("model load");
    let store = RatingStore::load(&paths.ratings).expect("ratings load");

    let rec_a = CollaborativeRecommender::new(store.clone(), model_a)
        .recommend("U2")
        .expect("recommend");
    let rec_b = CollaborativeRecommender::new(store, model_b)
        .recommend("U2")
        .expect("recommend");
    assert_eq!(rec_a.len(), rec_b.len());
    for (a, b) in rec_a.iter().zip(&rec_b) {
        assert_eq!(a.product_code, b.product_code);
        assert_eq!(a.estimated_rating.to_bits(), b.estimated_rating.to_bits());
    }
}

#[test]
fn unreadable_inputs_fail_fast() {
    let missing: Vec<PathBuf> = vec![PathBuf::from("no/such/ratings.csv")];
    assert!(RatingStore::load(&missing).is_err());
    assert!(Catalog::load("no/such/catalog.csv").is_err());
    assert!(FactorModel::load("no/such/model.sgr").is_err());
}

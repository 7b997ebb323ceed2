// Tests for filter bank persistence: JSON round-trips and validation of
// corrupt or malformed banks.

use conv3x3::{ConvError, ConvLayer, Grid, SimpleRng};
use tempfile::tempdir;

#[test]
fn test_save_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("filters.json");

    let mut rng = SimpleRng::new(42);
    let layer = ConvLayer::new(6, &mut rng);
    layer.save_filters(&path).unwrap();

    let loaded = ConvLayer::load_filters(&path).unwrap();
    assert_eq!(loaded.num_filters(), 6);
    assert_eq!(loaded.filters(), layer.filters());
}

#[test]
fn test_loaded_layer_produces_same_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("filters.json");

    let mut rng = SimpleRng::new(123);
    let mut layer = ConvLayer::new(3, &mut rng);
    layer.save_filters(&path).unwrap();

    let mut loaded = ConvLayer::load_filters(&path).unwrap();
    let input = Grid::from_vec(6, 4, (0..24).map(|v| v as f32 * 0.5).collect());

    assert_eq!(layer.forward(&input), loaded.forward(&input));
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let result = ConvLayer::load_filters(dir.path().join("does_not_exist.json"));
    assert!(matches!(result, Err(ConvError::Io(_))));
}

#[test]
fn test_load_invalid_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("filters.json");
    std::fs::write(&path, "not json at all").unwrap();

    assert!(matches!(
        ConvLayer::load_filters(&path),
        Err(ConvError::Serde(_))
    ));
}

#[test]
fn test_load_wrong_weight_count() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("filters.json");
    std::fs::write(
        &path,
        r#"{"num_filters": 2, "weights": [0.0, 1.0, 2.0]}"#,
    )
    .unwrap();

    assert!(matches!(
        ConvLayer::load_filters(&path),
        Err(ConvError::InvalidFilterBank(_))
    ));
}

#[test]
fn test_load_zero_filters() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("filters.json");
    std::fs::write(&path, r#"{"num_filters": 0, "weights": []}"#).unwrap();

    assert!(matches!(
        ConvLayer::load_filters(&path),
        Err(ConvError::InvalidFilterBank(_))
    ));
}

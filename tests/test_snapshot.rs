// Snapshot persistence tests: exact round trips, the fixed file length and
// the failure modes of a missing or truncated file.

use std::fs;

use rand::{rngs::StdRng, SeedableRng};
use tempfile::tempdir;

use ferrite_digits::network::snapshot::{snapshot_len, SNAPSHOT_LEN};
use ferrite_digits::{Error, Model, HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE};

fn seeded_model(seed: u64) -> Model {
    Model::he_with_rng(INPUT_SIZE, HIDDEN_SIZE, OUTPUT_SIZE, &mut StdRng::seed_from_u64(seed))
}

#[test]
fn production_snapshot_is_407080_bytes() {
    assert_eq!(SNAPSHOT_LEN, 407_080);
    assert_eq!(snapshot_len(INPUT_SIZE, HIDDEN_SIZE, OUTPUT_SIZE), SNAPSHOT_LEN);
    assert_eq!(seeded_model(1).to_bytes().len(), SNAPSHOT_LEN);
}

#[test]
fn save_then_load_is_bit_exact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.bin");

    let mut model = seeded_model(2);
    model.b1[5] = -0.25;
    model.b2[9] = 1.5e-7;
    model.save(&path).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), SNAPSHOT_LEN as u64);

    let loaded = Model::load(&path).unwrap();
    assert_eq!(loaded.to_bytes(), model.to_bytes());
    assert_eq!(loaded, model);
}

#[test]
fn layout_is_w1_b1_w2_b2_in_native_order() {
    let mut model = Model::with_shape(INPUT_SIZE, HIDDEN_SIZE, OUTPUT_SIZE);
    model.w1.data[0] = 1.25;
    model.b1[0] = 2.5;
    model.w2.data[0] = -3.0;
    *model.b2.last_mut().unwrap() = 4.75;

    let bytes = model.to_bytes();
    let at = |offset: usize| {
        f32::from_ne_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
    };

    let b1_start = HIDDEN_SIZE * INPUT_SIZE * 4;
    let w2_start = b1_start + HIDDEN_SIZE * 4;
    assert_eq!(at(0), 1.25);
    assert_eq!(at(b1_start), 2.5);
    assert_eq!(at(w2_start), -3.0);
    assert_eq!(at(SNAPSHOT_LEN - 4), 4.75);
}

#[test]
fn missing_file_is_none_for_load_optional_and_io_for_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.bin");

    assert!(Model::load_optional(&path).unwrap().is_none());
    assert!(matches!(Model::load(&path), Err(Error::Io(_))));
}

#[test]
fn truncated_snapshot_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.bin");
    let bytes = seeded_model(3).to_bytes();
    fs::write(&path, &bytes[..bytes.len() - 4]).unwrap();

    match Model::load(&path) {
        Err(Error::SnapshotSize { expected, got }) => {
            assert_eq!(expected, SNAPSHOT_LEN);
            assert_eq!(got, SNAPSHOT_LEN - 4);
        }
        other => panic!("expected SnapshotSize, got {:?}", other),
    }
    assert!(matches!(
        Model::load_optional(&path),
        Err(Error::SnapshotSize { .. })
    ));
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("model.bin");
    seeded_model(4).save(&path).unwrap();
    assert!(path.exists());
    assert!(Model::load_optional(&path).unwrap().is_some());
}

#[test]
fn small_shapes_round_trip_through_bytes() {
    let model = Model::he_with_rng(6, 4, 3, &mut StdRng::seed_from_u64(5));
    let bytes = model.to_bytes();
    assert_eq!(bytes.len(), snapshot_len(6, 4, 3));

    let back = Model::from_bytes_with_shape(&bytes, 6, 4, 3).unwrap();
    assert_eq!(back, model);

    // A small blob is not a production snapshot.
    assert!(matches!(
        Model::from_bytes(&bytes),
        Err(Error::SnapshotSize { .. })
    ));
}

#[test]
fn loaded_model_predicts_like_the_saved_one() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.bin");
    let model = seeded_model(6);
    model.save(&path).unwrap();
    let loaded = Model::load(&path).unwrap();

    let pixels: Vec<u8> = (0..INPUT_SIZE).map(|i| ((i * 13) % 256) as u8).collect();
    assert_eq!(
        ferrite_digits::predict(&model, &pixels).unwrap(),
        ferrite_digits::predict(&loaded, &pixels).unwrap()
    );
}

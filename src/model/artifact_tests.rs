pub(crate) use super::*;

use crate::model::{FactorModel, RatingPredictor};

fn sample_metadata() -> ArtifactMetadata {
    ArtifactMetadata {
        model_type: "matrix_factorization".to_string(),
        n_factors: 2,
        rating_min: 1.0,
        rating_max: 5.0,
        global_mean: 3.0,
        users: vec!["U1".to_string(), "U2".to_string()],
        items: vec!["P1".to_string(), "P2".to_string()],
    }
}

fn sample_writer() -> ArtifactWriter {
    let mut writer = ArtifactWriter::new(sample_metadata());
    writer.add_block("user_bias", vec![0.2, -0.1]);
    writer.add_block("item_bias", vec![0.3, -0.4]);
    writer.add_block("user_factors", vec![1.0, 0.5, 0.0, -1.0]);
    writer.add_block("item_factors", vec![0.5, 1.0, 1.0, 0.0]);
    writer
}

fn gunzip(data: &[u8]) -> Vec<u8> {
    let mut payload = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut payload)
        .expect("gunzip");
    payload
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

#[test]
fn test_round_trip_bytes() {
    let bytes = sample_writer().to_bytes().expect("to_bytes");
    let reader = ArtifactReader::from_bytes(&bytes).expect("from_bytes");

    assert_eq!(reader.metadata().model_type, "matrix_factorization");
    assert_eq!(reader.metadata().users, ["U1", "U2"]);
    assert_eq!(reader.block("user_bias").expect("block"), &[0.2, -0.1]);
    assert_eq!(
        reader.block("item_factors").expect("block"),
        &[0.5, 1.0, 1.0, 0.0]
    );
}

#[test]
fn test_round_trip_file_reproduces_predictions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rating_model.sgr");
    sample_writer().write(&path).expect("write");

    let from_artifact = FactorModel::load(&path).expect("load");
    let reloaded = FactorModel::load(&path).expect("reload");
    let from_parts = FactorModel::from_parts(
        sample_metadata(),
        vec![0.2, -0.1],
        vec![0.3, -0.4],
        vec![1.0, 0.5, 0.0, -1.0],
        vec![0.5, 1.0, 1.0, 0.0],
    )
    .expect("from_parts");

    for customer in ["U1", "U2", "GHOST"] {
        for product in ["P1", "P2", "P404"] {
            let expected = from_parts.predict(customer, product);
            assert_eq!(from_artifact.predict(customer, product), expected);
            assert_eq!(reloaded.predict(customer, product), expected);
        }
    }
}

#[test]
fn test_missing_file_is_model_load_error() {
    let err = ArtifactReader::open("no/such/model.sgr").unwrap_err();
    assert!(matches!(err, SugerirError::ModelLoad { .. }));
}

#[test]
fn test_garbage_bytes_fail_decompression() {
    let err = ArtifactReader::from_bytes(b"definitely not gzip").unwrap_err();
    assert!(matches!(err, SugerirError::ModelLoad { .. }));
    assert!(err.to_string().contains("decompression"));
}

#[test]
fn test_bad_magic_rejected() {
    let mut payload = gunzip(&sample_writer().to_bytes().expect("to_bytes"));
    payload[0] = b'X';

    let err = ArtifactReader::from_bytes(&gzip(&payload)).unwrap_err();
    assert!(err.to_string().contains("bad magic"));
}

#[test]
fn test_corrupted_payload_fails_checksum() {
    let mut payload = gunzip(&sample_writer().to_bytes().expect("to_bytes"));
    // Flip a byte between the magic and the trailing CRC.
    let mid = payload.len() / 2;
    payload[mid] ^= 0xFF;

    let err = ArtifactReader::from_bytes(&gzip(&payload)).unwrap_err();
    assert!(err.to_string().contains("checksum mismatch"));
}

#[test]
fn test_truncated_payload_rejected() {
    let err = ArtifactReader::from_bytes(&gzip(b"SGR1")).unwrap_err();
    assert!(err.to_string().contains("truncated"));
}

#[test]
fn test_missing_block_reported_by_name() {
    let bytes = sample_writer().to_bytes().expect("to_bytes");
    let reader = ArtifactReader::from_bytes(&bytes).expect("from_bytes");

    let err = reader.block("weights").unwrap_err();
    assert!(err.to_string().contains("missing block: weights"));
}

#[test]
fn test_model_rejects_artifact_without_blocks() {
    let writer = ArtifactWriter::new(sample_metadata());
    let bytes = writer.to_bytes().expect("to_bytes");
    let reader = ArtifactReader::from_bytes(&bytes).expect("from_bytes");

    let err = FactorModel::from_artifact(&reader).unwrap_err();
    assert!(matches!(err, SugerirError::ModelLoad { .. }));
}

#[test]
fn test_crc32_known_value() {
    // IEEE CRC32 of "123456789" is the classic check value.
    assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
}

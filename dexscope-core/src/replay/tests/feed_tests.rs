use crate::replay::{ReplaySource, feed_lines};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::mpsc;

#[test]
fn dash_and_missing_path_mean_stdin() {
    assert_eq!(ReplaySource::from_arg(None), ReplaySource::Stdin);
    assert_eq!(ReplaySource::from_arg(Some(Path::new("-"))), ReplaySource::Stdin);
    assert_eq!(
        ReplaySource::from_arg(Some(Path::new("events.jsonl"))),
        ReplaySource::File(PathBuf::from("events.jsonl"))
    );
}

#[tokio::test]
async fn feeds_non_blank_lines_in_order() {
    // Arrange
    let input: &[u8] = b"{\"a\":1}\n\n   \n{\"b\":2}\nnot json\n";
    let (tx, mut rx) = mpsc::channel(8);

    // Act
    let sent = feed_lines(input, tx).await.unwrap();

    // Assert
    assert_eq!(sent, 3);
    let mut texts = Vec::new();
    while let Some(message) = rx.recv().await {
        assert!(message.received_at_us > 0);
        texts.push(message.text);
    }
    assert_eq!(texts, vec!["{\"a\":1}", "{\"b\":2}", "not json"]);
}

#[tokio::test]
async fn stops_when_consumer_is_gone() {
    let input: &[u8] = b"1\n2\n3\n";
    let (tx, rx) = mpsc::channel(1);
    drop(rx);

    let sent = feed_lines(input, tx).await.unwrap();

    assert_eq!(sent, 0);
}

#[tokio::test]
async fn reads_from_file() {
    // Arrange
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{\"BlockMeta\":{{}}}}").unwrap();
    let source = ReplaySource::File(file.path().to_path_buf());
    let (tx, mut rx) = mpsc::channel(4);

    // Act
    let reader = source.open().await.unwrap();
    let sent = feed_lines(reader, tx).await.unwrap();

    // Assert
    assert_eq!(sent, 1);
    assert_eq!(rx.recv().await.unwrap().text, "{\"BlockMeta\":{}}");
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = ReplaySource::File(dir.path().join("missing.jsonl"));

    let err = source.open().await.err().unwrap();

    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

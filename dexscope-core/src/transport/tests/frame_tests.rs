use crate::transport::ShutdownHandle;
use crate::transport::{Frame, read_frame};
use pretty_assertions::assert_eq;
use tokio_tungstenite::tungstenite::Message;

const ENDPOINT: &str = "ws://127.0.0.1:9001";

#[test]
fn text_frames_are_forwarded() {
    let frame = read_frame(Message::Text("{\"a\":1}".into()), ENDPOINT);

    assert_eq!(frame, Frame::Data("{\"a\":1}".to_string()));
}

#[test]
fn utf8_binary_frames_are_treated_as_text() {
    let frame = read_frame(Message::Binary(b"{\"b\":2}".to_vec().into()), ENDPOINT);

    assert_eq!(frame, Frame::Data("{\"b\":2}".to_string()));
}

#[test]
fn invalid_utf8_binary_frames_are_skipped() {
    let frame = read_frame(Message::Binary(vec![0xff, 0xfe].into()), ENDPOINT);

    assert_eq!(frame, Frame::Skip);
}

#[test]
fn control_frames_are_skipped() {
    assert_eq!(read_frame(Message::Ping(Vec::new().into()), ENDPOINT), Frame::Skip);
    assert_eq!(read_frame(Message::Pong(Vec::new().into()), ENDPOINT), Frame::Skip);
}

#[test]
fn close_frame_ends_the_stream() {
    assert_eq!(read_frame(Message::Close(None), ENDPOINT), Frame::Close);
}

//-----------------------------------------------------------------------------
// Shutdown
//-----------------------------------------------------------------------------

#[test]
fn shutdown_reaches_existing_subscribers() {
    // Arrange
    let handle = ShutdownHandle::new();
    let rx = handle.subscribe();

    // Act
    handle.trigger();

    // Assert
    assert!(handle.is_triggered());
    assert!(*rx.borrow());
}

#[test]
fn late_subscribers_see_shutdown() {
    let handle = ShutdownHandle::new();
    handle.trigger();

    let rx = handle.subscribe();

    assert!(*rx.borrow());
}

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("value {value} at index {index} is not a byte")]
    ByteOutOfRange { index: usize, value: u64 },
}

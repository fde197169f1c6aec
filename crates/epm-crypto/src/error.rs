use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid length: expected at most {expected} hex digits, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Compact target {0:#010x} is negative")]
    NegativeTarget(u32),

    #[error("Compact target {0:#010x} overflows 256 bits")]
    TargetOverflow(u32),
}

pub mod error;
pub mod hash;
pub mod pow;
pub mod target;

pub use error::CryptoError;
pub use hash::{hex_array, sha256d, Hash256};
pub use pow::{PowHasher, Sha256dHasher, HEADER_SIZE};
pub use target::Target;

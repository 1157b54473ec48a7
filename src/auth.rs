//! Caller credentials and per-request signature headers.

pub mod credentials;
pub mod signer;

pub use credentials::*;
pub use signer::*;

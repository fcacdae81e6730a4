//! Security utilities: credential handling.

pub mod credentials;

pub use credentials::{ProviderCredentials, SecretString};

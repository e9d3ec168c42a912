//! Authentication for Expensio
//!
//! - The provider contract the rest of the crate depends on
//! - A local provider backed by argon2 hashes in `users.json`
//! - Zeroizing password buffers

pub mod local;
pub mod secret;
pub mod traits;

pub use local::LocalAuthProvider;
pub use secret::SecretString;
pub use traits::AuthProvider;

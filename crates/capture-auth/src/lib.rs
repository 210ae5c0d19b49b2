//! # capture-auth
//!
//! Authentication building blocks: JWT encoding/decoding with a revocation
//! blocklist, Argon2id password hashing with strength validation, and
//! verification of the administrative service credential used by the
//! account-deletion endpoint.

pub mod jwt;
pub mod password;
pub mod service_role;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
pub use service_role::ServiceRoleVerifier;

//! # snipvault-auth
//!
//! Bearer token handling for SnipVault. Tokens are HS256 JWTs carrying the
//! user id in `sub`; the API verifies them with [`JwtDecoder`] and the CLI
//! mints them for local use with [`JwtEncoder`].

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenType};

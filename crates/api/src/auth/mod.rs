//! Identity verification.
//!
//! - [`verifier`] -- The [`verifier::IdentityVerifier`] seam that turns a
//!   bearer credential into a verified [`verifier::Principal`].
//! - [`jwt`] -- HS256 access tokens and the shipped [`verifier::JwtVerifier`]
//!   configuration.

pub mod jwt;
pub mod verifier;

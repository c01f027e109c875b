//! practica-auth
//!
//! Cognito sign-in flows and bearer token verification.

pub mod client;
pub mod error;
pub mod flows;
pub mod jwt;

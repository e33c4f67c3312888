//! OAuth2 credential persistence and refresh.
//!
//! This crate provides:
//! - A credential store that keeps one OAuth2 token set alive across
//!   unattended runs (load, refresh, bootstrap, re-persist)
//! - A refresh-grant client against the provider's token endpoint
//! - Client-config file parsing for the bootstrap path

pub mod client_config;
pub mod error;
pub mod refresh;
pub mod store;

pub use client_config::{load_client_app, ClientApp};
pub use error::{AuthError, AuthResult};
pub use refresh::refresh_credential;
pub use store::{AuthConfig, CredentialStore, UPLOAD_SCOPE};

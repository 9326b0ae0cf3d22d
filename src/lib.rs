//! Aura License - offline, machine-bound license keys for the Aura plugin
//!
//! The crate has two halves:
//!
//! - [`hardware`] derives a stable 8-character machine id from the host's
//!   computer name and volume serial.
//! - [`license_key`] generates and validates 23-character keys in the format
//!   `AURA-CCCC-MMMM-SSSSSSSS`, bound to a customer id and a machine id by a
//!   keyed signature.
//!
//! Everything is deterministic and offline: no server, no activation, no
//! storage. The issuing tool and the validating plugin share a baked-in
//! secret ([`secret`]) and must agree on it byte for byte.
//!
//! # Example
//!
//! ```rust,ignore
//! use aura_license::hardware::derive_machine_id;
//! use aura_license::license_key::{generate_key, validate_key};
//!
//! let machine_id = derive_machine_id();
//! let key = generate_key("0001", &machine_id)?;
//! assert!(validate_key(&key, &machine_id).valid);
//! ```

pub mod config;
pub mod errors;
pub mod hardware;
pub mod license_key;
pub mod secret;

//! Machine fingerprint derivation.
//!
//! Builds a short, stable identifier for the current machine from two ambient
//! traits: the computer name and the serial of the host volume. The raw
//! fingerprint string is `name|serial|AuRa_HW_v2`; its MD5 digest, truncated
//! to 8 uppercase hex characters, is the machine id shown to the customer and
//! embedded in license keys.
//!
//! Derivation must always succeed: if the volume serial cannot be read or
//! parsed it falls back to 0, and an unresolvable computer name falls back to
//! `UNKNOWN`. The id changes when the hostname or volume serial changes
//! (rename, reformat), which is accepted behavior for this scheme.

use std::env;
use std::process::Command;

use log::debug;
use md5::{Digest, Md5};
use regex::Regex;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

/// Version tag mixed into the fingerprint. Bumping it re-keys every machine.
const FINGERPRINT_VERSION: &str = "AuRa_HW_v2";

/// Width of the derived machine id in hex characters.
pub const MACHINE_ID_LENGTH: usize = 8;

/// Derive the machine id for the current machine.
///
/// Deterministic for stable hardware traits; safe to call repeatedly and from
/// multiple threads.
pub fn derive_machine_id() -> String {
    let fingerprint = fingerprint();
    debug!("machine fingerprint: {}", fingerprint);
    machine_id_from_fingerprint(&fingerprint)
}

/// Build the raw fingerprint string for the current machine.
pub fn fingerprint() -> String {
    format!(
        "{}|{}|{}",
        computer_name(),
        volume_serial(),
        FINGERPRINT_VERSION
    )
}

/// Hash-and-truncate step: MD5 over the fingerprint, first 8 hex characters,
/// uppercase.
pub fn machine_id_from_fingerprint(fingerprint: &str) -> String {
    let digest = Md5::digest(fingerprint.as_bytes());
    hex::encode(digest)[..MACHINE_ID_LENGTH].to_uppercase()
}

/// Resolve the computer name: environment variable first, then the
/// `hostname` command, then a fixed fallback.
fn computer_name() -> String {
    let var = if cfg!(target_os = "windows") {
        "COMPUTERNAME"
    } else {
        "HOSTNAME"
    };

    if let Ok(name) = env::var(var) {
        let name = name.trim().to_string();
        if !name.is_empty() {
            return name;
        }
    }

    if let Ok(output) = Command::new("hostname").output() {
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !name.is_empty() {
            return name;
        }
    }

    "UNKNOWN".to_string()
}

/// Read the host volume serial, falling back to 0 on any failure.
fn volume_serial() -> u64 {
    let output = {
        #[cfg(target_os = "windows")]
        {
            windows::volume_info()
        }
        #[cfg(target_os = "macos")]
        {
            macos::volume_info()
        }
        #[cfg(target_os = "linux")]
        {
            linux::volume_info()
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None::<String>
        }
    };

    match output {
        Some(text) => extract_volume_serial(&text),
        None => {
            debug!("volume info unavailable, using serial 0");
            0
        }
    }
}

/// Pull the first `XXXX-XXXX` hex group out of volume-info output and parse
/// the 8 digits as one number. Missing pattern yields 0.
fn extract_volume_serial(output: &str) -> u64 {
    let re = Regex::new(r"([0-9A-Fa-f]{4})-([0-9A-Fa-f]{4})").expect("static regex");
    match re.captures(output) {
        Some(caps) => {
            let joined = format!("{}{}", &caps[1], &caps[2]);
            u64::from_str_radix(&joined, 16).unwrap_or(0)
        }
        None => 0,
    }
}

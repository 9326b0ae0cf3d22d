use std::process::Command;

/// Volume info for the root filesystem, via `lsblk -no UUID /`.
///
/// Filesystem UUIDs contain hex groups in the `XXXX-XXXX` shape the serial
/// extractor looks for.
pub fn volume_info() -> Option<String> {
    let output = Command::new("lsblk").args(["-no", "UUID", "/"]).output().ok()?;
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

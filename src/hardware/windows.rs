use std::process::Command;

/// Volume info for the system drive, via `vol C:`.
///
/// Output contains a line like `Volume Serial Number is 62C1-49CD`.
pub fn volume_info() -> Option<String> {
    let output = Command::new("cmd").args(["/c", "vol", "C:"]).output().ok()?;
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

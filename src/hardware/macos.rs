use std::process::Command;

/// Volume info for the root volume, via `diskutil info /`.
///
/// The volume UUID line carries hex groups in the `XXXX-XXXX` shape the
/// serial extractor looks for.
pub fn volume_info() -> Option<String> {
    let output = Command::new("diskutil").args(["info", "/"]).output().ok()?;
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

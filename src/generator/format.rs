use std::path::Path;
use std::process::Command;

/// Environment variable overriding the rustfmt binary
pub const RUSTFMT_BIN_ENV: &str = "HANDLERGEN_RUSTFMT_BIN";

/// Format one generated file in place with rustfmt
///
/// # Errors
///
/// Returns an error if rustfmt cannot be started or exits unsuccessfully
pub fn format_file(path: &Path) -> anyhow::Result<()> {
    // Allow tests to override the rustfmt binary path without mutating PATH
    let rustfmt_bin = std::env::var(RUSTFMT_BIN_ENV).unwrap_or_else(|_| "rustfmt".to_string());

    let mut cmd = Command::new(rustfmt_bin);
    cmd.arg("--edition").arg("2021").arg(path);
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("rustfmt failed on {}", path.display());
    }
    Ok(())
}

//! Generator configuration
//!
//! A module can carry a `handlergen.toml` next to its sources to pin the
//! generated file name, the setup function name, or the paths of the
//! transport and runtime support modules (useful when they are re-exported
//! from another crate).
//!
//! ```toml
//! module_name = "handlers"
//! setup_fn = "configure_routes"
//! transport_path = "my_runtime::transport"
//! runtime_path = "my_runtime::web"
//! rustfmt = true
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::{
    AnalysisOptions, DEFAULT_RUNTIME_PATH, DEFAULT_SETUP_FN, DEFAULT_TRANSPORT_PATH,
};

/// File name looked up in the input directory
pub const CONFIG_FILE_NAME: &str = "handlergen.toml";

/// Generator settings loaded from `handlergen.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Module name rendered into the generated header (default: input directory name)
    pub module_name: Option<String>,
    /// Output file (default: `<dir>/<dir name>.gen.rs`); relative paths are
    /// resolved against the input directory
    pub output: Option<PathBuf>,
    /// Name of the generated setup function
    pub setup_fn: Option<String>,
    /// Module providing `Request`, `ResponseWriter` and `ServeMux`
    pub transport_path: Option<String>,
    /// Module providing `Codec` and `HandlerSetupOptions`
    pub runtime_path: Option<String>,
    /// Identifier of the injected request type
    pub request_type: Option<String>,
    /// Identifier of the injected response writer trait
    pub response_writer: Option<String>,
    /// Run rustfmt on the generated file
    pub rustfmt: bool,
}

impl GeneratorConfig {
    /// Analysis options, falling back to `default_module` and the built-in paths
    #[must_use]
    pub fn analysis_options(&self, default_module: &str) -> AnalysisOptions {
        let mut options =
            AnalysisOptions::new(self.module_name.as_deref().unwrap_or(default_module));
        options.setup_fn = self
            .setup_fn
            .clone()
            .unwrap_or_else(|| DEFAULT_SETUP_FN.to_string());
        options.transport_path = self
            .transport_path
            .clone()
            .unwrap_or_else(|| DEFAULT_TRANSPORT_PATH.to_string());
        options.runtime_path = self
            .runtime_path
            .clone()
            .unwrap_or_else(|| DEFAULT_RUNTIME_PATH.to_string());
        if let Some(request_type) = &self.request_type {
            options.request_type = request_type.clone();
        }
        if let Some(response_writer) = &self.response_writer {
            options.response_writer = response_writer.clone();
        }
        options
    }
}

/// Load a generator configuration file
///
/// # Returns
///
/// `Ok(Some(config))` if the file exists and parses, `Ok(None)` if it does
/// not exist, `Err` if it exists but cannot be read or parsed.
pub fn load_generator_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!(
            "Failed to read generator config: {}",
            config_path.display()
        )
    })?;

    let config: GeneratorConfig = toml::from_str(&contents).with_context(|| {
        format!(
            "Failed to parse generator config: {}",
            config_path.display()
        )
    })?;

    Ok(Some(config))
}

/// `handlergen.toml` inside `input_dir`, if present
pub fn auto_detect_config_path(input_dir: &Path) -> Option<PathBuf> {
    let config_path = input_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Resolve the configuration path
///
/// Priority:
/// 1. Explicitly provided path (via CLI); it must exist
/// 2. Auto-detected in the input directory
/// 3. None (built-in defaults)
pub fn resolve_config_path(
    explicit_path: Option<&Path>,
    input_dir: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }
    Ok(auto_detect_config_path(input_dir))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_generator_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
        assert!(auto_detect_config_path(dir.path()).is_none());
    }

    #[test]
    fn test_load_and_apply_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "module_name = \"api\"\nsetup_fn = \"configure\"\ntransport_path = \"rt::net\"\nrustfmt = true\n",
        )
        .unwrap();

        assert_eq!(auto_detect_config_path(dir.path()), Some(path.clone()));
        let config = load_generator_config(&path).unwrap().unwrap();
        assert!(config.rustfmt);

        let options = config.analysis_options("ignored");
        assert_eq!(options.module_name, "api");
        assert_eq!(options.setup_fn, "configure");
        assert_eq!(options.request_type_path(), "rt::net::Request");
        assert_eq!(options.runtime_path, DEFAULT_RUNTIME_PATH);
    }

    #[test]
    fn test_defaults_use_directory_name() {
        let options = GeneratorConfig::default().analysis_options("handlers");
        assert_eq!(options, AnalysisOptions::new("handlers"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "modul_name = \"typo\"\n").unwrap();
        assert!(load_generator_config(&path).is_err());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(resolve_config_path(Some(&missing), dir.path()).is_err());
        assert_eq!(resolve_config_path(None, dir.path()).unwrap(), None);
    }
}

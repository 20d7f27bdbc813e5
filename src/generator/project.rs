use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::format::format_file;
use super::templates::render_dispatch;
use crate::analysis::{analyze_files, AnalysisOptions};

/// Suffix of generated dispatch files; such files are never read back as input
pub const GENERATED_SUFFIX: &str = ".gen.rs";

/// Options for one generator run over a module directory
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory holding the module's source files
    pub input_dir: PathBuf,
    /// Destination file; `None` means [`default_output_path`]
    pub output: Option<PathBuf>,
    /// Analysis settings (module name, setup function, runtime paths)
    pub analysis: AnalysisOptions,
    /// Run rustfmt on the rendered file before it replaces the destination
    pub rustfmt: bool,
    /// Render without touching the filesystem
    pub dry_run: bool,
}

impl GenerateOptions {
    /// Defaults for `input_dir`, naming the module after the directory
    pub fn for_dir(input_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let input_dir = input_dir.into();
        let module_name = directory_name(&input_dir)?;
        Ok(Self {
            input_dir,
            output: None,
            analysis: AnalysisOptions::new(module_name),
            rustfmt: false,
            dry_run: false,
        })
    }
}

/// Outcome of [`generate_dispatch`]
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Destination path
    pub output: PathBuf,
    /// Number of registered handlers
    pub handlers: usize,
    /// Whether the destination was written (false for dry runs)
    pub written: bool,
    /// Rendered file contents
    pub source: String,
}

/// Name of `dir` after canonicalization (so `.` resolves to a real name)
pub fn directory_name(dir: &Path) -> anyhow::Result<String> {
    let canonical = fs::canonicalize(dir)
        .with_context(|| format!("Failed to canonicalize input dir: {}", dir.display()))?;
    canonical
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("Input dir has no usable name: {}", canonical.display()))
}

/// `<dir>/<dir name>.gen.rs`
pub fn default_output_path(dir: &Path) -> anyhow::Result<PathBuf> {
    let name = directory_name(dir)?;
    Ok(dir.join(format!("{name}{GENERATED_SUFFIX}")))
}

/// `*.rs` files directly inside `dir`, sorted by file name.
///
/// Generated files are skipped so that regeneration never analyzes its own
/// previous output.
pub fn collect_source_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read input dir: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".rs") || name.ends_with(GENERATED_SUFFIX) {
            continue;
        }
        files.push(path);
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Analyze a module directory and write its dispatch file.
///
/// The file is rendered in memory, written to a temporary file next to the
/// destination and persisted over it in one rename. If analysis, rendering,
/// formatting or writing fails, the destination keeps its previous state.
///
/// # Errors
///
/// Returns the first analysis error, or any rendering and I/O error
pub fn generate_dispatch(opts: &GenerateOptions) -> anyhow::Result<GenerationReport> {
    let output = match &opts.output {
        Some(path) => path.clone(),
        None => default_output_path(&opts.input_dir)?,
    };

    let files: Vec<PathBuf> = collect_source_files(&opts.input_dir)?
        .into_iter()
        .filter(|p| p != &output)
        .collect();
    debug!(
        input = %opts.input_dir.display(),
        files = files.len(),
        "collected source files"
    );

    let ctx = analyze_files(&files, &opts.analysis)
        .with_context(|| format!("Failed to analyze {}", opts.input_dir.display()))?;
    let mut source = render_dispatch(&ctx)?;

    if opts.dry_run {
        info!(
            output = %output.display(),
            handlers = ctx.descriptors.len(),
            "dry run, dispatch file not written"
        );
        return Ok(GenerationReport {
            output,
            handlers: ctx.descriptors.len(),
            written: false,
            source,
        });
    }

    if opts.rustfmt {
        source = write_atomically_formatted(&output, &source)?;
    } else {
        write_atomically(&output, &source)?;
    }

    info!(
        output = %output.display(),
        handlers = ctx.descriptors.len(),
        "generated dispatch file"
    );
    Ok(GenerationReport {
        output,
        handlers: ctx.descriptors.len(),
        written: true,
        source,
    })
}

/// Replace `path` with `contents` in one rename
pub fn write_atomically(path: &Path, contents: &str) -> anyhow::Result<()> {
    let tmp = stage(path, contents)?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Like [`write_atomically`], running rustfmt on the staged file first.
/// Returns the formatted contents.
fn write_atomically_formatted(path: &Path, contents: &str) -> anyhow::Result<String> {
    let tmp = stage(path, contents)?;
    format_file(tmp.path())?;
    let formatted = fs::read_to_string(tmp.path())?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(formatted)
}

fn stage(path: &Path, contents: &str) -> anyhow::Result<tempfile::NamedTempFile> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".handlergen")
        .suffix(".rs")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    Ok(tmp)
}

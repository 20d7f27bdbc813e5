use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::analysis::{analyze_files, GenerationContext};
use crate::generator::{
    collect_source_files, default_output_path, directory_name, generate_dispatch,
    load_generator_config, resolve_config_path, GenerateOptions, GeneratorConfig,
};
use crate::logging::LogConfig;

/// Command-line interface for handlergen
///
/// Generates the dispatch file that registers a module's handler functions
/// on a `ServeMux`.
#[derive(Parser, Debug)]
#[command(name = "handlergen")]
#[command(version, about = "Router dispatch generator for plain handler functions", long_about = None)]
pub struct Cli {
    /// Debug-level logs with source locations (ignores HANDLERGEN_LOG_*)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the dispatch file of a handler module
    Generate {
        /// Directory holding the module's source files
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: <input>/<input dir name>.gen.rs)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to the generator config (default: <input>/handlergen.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Module name rendered into the generated header
        #[arg(long)]
        module_name: Option<String>,

        /// Name of the generated setup function
        #[arg(long)]
        setup_fn: Option<String>,

        /// Print the generated file instead of writing it
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Format the generated file with rustfmt
        #[arg(long, default_value_t = false)]
        fmt: bool,
    },
    /// Print the handler descriptors of a module without generating anything
    Inspect {
        /// Directory holding the module's source files
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the generator config (default: <input>/handlergen.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = InspectFormat::Json)]
        format: InspectFormat,
    },
}

/// Output format of `inspect`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    Json,
    Yaml,
}

impl Cli {
    /// Logging setup selected by the command line
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        if self.verbose {
            LogConfig::default_dev()
        } else {
            LogConfig::from_env()
        }
    }
}

/// Run a parsed command line
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            config,
            module_name,
            setup_fn,
            dry_run,
            fmt,
        } => {
            let file_config = load_config(config.as_deref(), &input)?;
            let mut opts = generate_options(&input, &file_config)?;
            if let Some(module_name) = module_name {
                opts.analysis.module_name = module_name;
            }
            if let Some(setup_fn) = setup_fn {
                opts.analysis.setup_fn = setup_fn;
            }
            if output.is_some() {
                opts.output = output;
            }
            opts.rustfmt |= fmt;
            opts.dry_run = dry_run;

            let report = generate_dispatch(&opts)?;
            if report.written {
                println!(
                    "✅ Generated {} ({} handlers)",
                    report.output.display(),
                    report.handlers
                );
            } else {
                print!("{}", report.source);
            }
            Ok(())
        }
        Commands::Inspect {
            input,
            config,
            format,
        } => {
            let file_config = load_config(config.as_deref(), &input)?;
            let opts = generate_options(&input, &file_config)?;
            let ctx = inspect(&opts)?;
            let rendered = match format {
                InspectFormat::Json => serde_json::to_string_pretty(&ctx)?,
                InspectFormat::Yaml => serde_yaml::to_string(&ctx)?,
            };
            println!("{rendered}");
            Ok(())
        }
    }
}

/// Explicit config, auto-detected config, or defaults
fn load_config(explicit: Option<&Path>, input: &Path) -> anyhow::Result<GeneratorConfig> {
    let Some(path) = resolve_config_path(explicit, input)? else {
        return Ok(GeneratorConfig::default());
    };
    debug!(config = %path.display(), "loading generator config");
    Ok(load_generator_config(&path)?.unwrap_or_default())
}

/// Options from the config file; relative config outputs resolve against `input`
pub fn generate_options(input: &Path, config: &GeneratorConfig) -> anyhow::Result<GenerateOptions> {
    let module_dir_name = directory_name(input)?;
    Ok(GenerateOptions {
        input_dir: input.to_path_buf(),
        output: config.output.as_ref().map(|p| {
            if p.is_relative() {
                input.join(p)
            } else {
                p.clone()
            }
        }),
        analysis: config.analysis_options(&module_dir_name),
        rustfmt: config.rustfmt,
        dry_run: false,
    })
}

/// Analyze the module without rendering
pub fn inspect(opts: &GenerateOptions) -> anyhow::Result<GenerationContext> {
    let output = match &opts.output {
        Some(p) => p.clone(),
        None => default_output_path(&opts.input_dir)?,
    };
    let files: Vec<PathBuf> = collect_source_files(&opts.input_dir)?
        .into_iter()
        .filter(|p| p != &output)
        .collect();
    analyze_files(&files, &opts.analysis)
        .with_context(|| format!("Failed to analyze {}", opts.input_dir.display()))
}

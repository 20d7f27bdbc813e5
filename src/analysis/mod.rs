//! # Analysis Module
//!
//! Static analysis of a handler module: every `pub fn` declared at the top
//! level of the input files is classified into a [`FunctionDescriptor`].
//!
//! ## Pipeline
//!
//! ```text
//! source files → ModuleScope (parse + declarations + imports)
//!              → Classifier (one descriptor per pub fn, file order)
//!              → TypeResolver (names types, fills the ImportAliasTable)
//!              → GenerationContext
//! ```
//!
//! Analysis is all-or-nothing: the first error aborts the run and no context
//! is returned, so nothing is ever generated from a partially understood
//! module.
//!
//! ## Usage
//!
//! ```rust
//! use handlergen::analysis::{analyze_sources, AnalysisOptions, SourceFile};
//!
//! let file = SourceFile::parse("handlers.rs", "pub fn hello(name: String) -> String { name }")?;
//! let ctx = analyze_sources(vec![file], &AnalysisOptions::new("handlers"))?;
//! assert_eq!(ctx.descriptors[0].name, "hello");
//! # Ok::<(), handlergen::analysis::AnalysisError>(())
//! ```

mod classify;
mod descriptor;
mod error;
mod resolver;
mod scope;

pub use classify::{is_handler_candidate, Classifier};
pub use descriptor::{
    parameter_var_name, result_var_name, FunctionDescriptor, ParameterRole, ParameterSlot,
    ResultRole, ResultSlot, REQUEST_VAR, RESPONSE_WRITER_VAR,
};
pub use error::{
    AnalysisError, ClassificationError, ClassificationErrorKind, InjectedKind, SourcePosition,
};
pub use resolver::{relative_to_generated, ImportAliasTable, ImportEntry, TypeResolver};
pub use scope::{LocalType, ModuleScope, Resolution, SourceFile};

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default module path of the transport types (request, writer, mux)
pub const DEFAULT_TRANSPORT_PATH: &str = "handlergen::transport";
/// Default module path of the runtime support types (codec, options)
pub const DEFAULT_RUNTIME_PATH: &str = "handlergen::web";
/// Default name of the generated setup function
pub const DEFAULT_SETUP_FN: &str = "config_serve_mux_handler";

/// Knobs of one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Name of the analyzed module, rendered into the generated header
    pub module_name: String,
    /// Name of the generated setup function
    pub setup_fn: String,
    /// Module providing `Request`, `ResponseWriter` and `ServeMux`
    pub transport_path: String,
    /// Module providing `Codec` and `HandlerSetupOptions`
    pub runtime_path: String,
    /// Identifier of the request type inside `transport_path`
    pub request_type: String,
    /// Identifier of the response writer trait inside `transport_path`
    pub response_writer: String,
}

impl AnalysisOptions {
    /// Defaults for a module named `module_name`
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            setup_fn: DEFAULT_SETUP_FN.to_string(),
            transport_path: DEFAULT_TRANSPORT_PATH.to_string(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            request_type: "Request".to_string(),
            response_writer: "ResponseWriter".to_string(),
        }
    }

    /// Full path of the injected request type
    #[must_use]
    pub fn request_type_path(&self) -> String {
        format!("{}::{}", self.transport_path, self.request_type)
    }

    /// Full path of the injected response writer trait
    #[must_use]
    pub fn response_writer_path(&self) -> String {
        format!("{}::{}", self.transport_path, self.response_writer)
    }
}

/// Everything the emitter needs, produced by one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationContext {
    /// Name of the analyzed module
    pub module_name: String,
    /// Name of the generated setup function
    pub setup_fn: String,
    /// Alias of the transport module in the generated file
    pub transport_alias: String,
    /// Alias of the runtime support module in the generated file
    pub runtime_alias: String,
    /// Imports of the generated file
    pub imports: ImportAliasTable,
    /// Handlers in declaration order across the input files
    pub descriptors: Vec<FunctionDescriptor>,
}

/// Read, parse and analyze `paths` as one module
pub fn analyze_files(
    paths: &[PathBuf],
    options: &AnalysisOptions,
) -> Result<GenerationContext, AnalysisError> {
    let files = paths
        .iter()
        .map(|p| SourceFile::read(p))
        .collect::<Result<Vec<_>, _>>()?;
    analyze_sources(files, options)
}

/// Analyze already parsed files as one module
pub fn analyze_sources(
    files: Vec<SourceFile>,
    options: &AnalysisOptions,
) -> Result<GenerationContext, AnalysisError> {
    if files.is_empty() {
        return Err(AnalysisError::NoInput);
    }

    let scope = ModuleScope::new(files)?;
    let aliases = ImportAliasTable::seeded(&options.transport_path, &options.runtime_path);
    let transport_alias = aliases
        .get(&options.transport_path)
        .unwrap_or_default()
        .to_string();
    let runtime_alias = aliases
        .get(&options.runtime_path)
        .unwrap_or_default()
        .to_string();
    let mut resolver = TypeResolver::new(aliases);
    let classifier = Classifier::new(
        &scope,
        &options.request_type_path(),
        &options.response_writer_path(),
    );

    let mut descriptors = Vec::new();
    for file in scope.files() {
        for item in &file.ast.items {
            let syn::Item::Fn(item_fn) = item else {
                continue;
            };
            if !is_handler_candidate(item_fn) {
                debug!(function = %item_fn.sig.ident, file = %file.path.display(), "skipping non-public function");
                continue;
            }
            let descriptor = classifier.classify(item_fn, &file.path, &mut resolver)?;
            debug!(
                function = %descriptor.name,
                parameters = descriptor.parameters.len(),
                decodable = descriptor.decodable_parameter_count,
                results = descriptor.results.len(),
                "classified handler"
            );
            descriptors.push(descriptor);
        }
    }

    let imports = resolver.into_aliases();
    info!(
        module = %options.module_name,
        files = scope.files().len(),
        handlers = descriptors.len(),
        imports = imports.len(),
        "analysis complete"
    );

    Ok(GenerationContext {
        module_name: options.module_name.clone(),
        setup_fn: options.setup_fn.clone(),
        transport_alias,
        runtime_alias,
        imports,
        descriptors,
    })
}

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Location of a declaration in an analyzed source file.
///
/// Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourcePosition {
    /// File the declaration was read from
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl SourcePosition {
    /// Position of a `syn` span inside `file`.
    ///
    /// Relies on the `span-locations` feature of `proc-macro2`; proc-macro2
    /// reports 0-based columns, which are shifted to 1-based here.
    #[must_use]
    pub fn from_span(file: &std::path::Path, span: proc_macro2::Span) -> Self {
        let start = span.start();
        Self {
            file: file.to_path_buf(),
            line: start.line,
            column: start.column + 1,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Which transport-supplied parameter a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InjectedKind {
    /// The incoming request (`&Request`)
    Request,
    /// The response writer capability (`&mut dyn ResponseWriter`)
    ResponseWriter,
}

impl fmt::Display for InjectedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectedKind::Request => f.write_str("request"),
            InjectedKind::ResponseWriter => f.write_str("response writer"),
        }
    }
}

/// Why a single function signature could not be classified
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationErrorKind {
    /// The parameter type has a shape that cannot be decoded
    #[error("parameter `{parameter}`: {shape} is not supported")]
    UnsupportedType { parameter: String, shape: String },
    /// A trait object other than the response writer
    #[error("parameter `{parameter}`: interface types are not supported")]
    UnsupportedInterface { parameter: String },
    /// A borrowed parameter other than the request
    #[error("parameter `{parameter}`: borrowed parameters are not supported, take it by value or as a Box")]
    BorrowedParameter { parameter: String },
    /// The request or the response writer appears twice
    #[error("parameter `{parameter}`: duplicate injected {role} parameter")]
    DuplicateInjected {
        parameter: String,
        role: InjectedKind,
    },
    /// A type name that is neither declared nor imported
    #[error("parameter `{parameter}`: unresolved type `{name}`")]
    UnresolvedType { parameter: String, name: String },
    /// The function itself cannot be called from a synchronous handler
    #[error("{reason}")]
    UnsupportedSignature { reason: String },
}

/// Positioned failure to classify one handler function
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{position}: function `{function}`: {kind}")]
pub struct ClassificationError {
    /// Where the offending type (or function) is declared
    pub position: SourcePosition,
    /// Function being classified
    pub function: String,
    /// What went wrong
    pub kind: ClassificationErrorKind,
}

/// Any failure of the analysis pass. All of these abort the run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// An input file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An input file is not valid Rust
    #[error("{position}: syntax error: {message}")]
    Parse {
        position: SourcePosition,
        message: String,
    },
    /// The same name is imported from two different paths
    #[error("{position}: `{ident}` is imported as both `{first}` and `{second}`")]
    ConflictingImport {
        position: SourcePosition,
        ident: String,
        first: String,
        second: String,
    },
    /// Nothing to analyze
    #[error("no input files")]
    NoInput,
    /// A handler signature could not be classified
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

impl AnalysisError {
    /// Position of the offending declaration, when there is one
    #[must_use]
    pub fn position(&self) -> Option<&SourcePosition> {
        match self {
            AnalysisError::Parse { position, .. }
            | AnalysisError::ConflictingImport { position, .. } => Some(position),
            AnalysisError::Classification(err) => Some(&err.position),
            AnalysisError::Io { .. } | AnalysisError::NoInput => None,
        }
    }
}

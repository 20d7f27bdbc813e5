//! The resolved view of one analyzed module.
//!
//! Every input file is parsed up front and its top-level declarations and
//! `use` imports are merged into a single namespace before any function is
//! classified, so a handler in the first file may use a type declared in the
//! last one.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use syn::spanned::Spanned;
use tracing::debug;

use super::error::{AnalysisError, SourcePosition};

/// One parsed input file
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path used in diagnostics
    pub path: PathBuf,
    /// Parsed syntax tree
    pub ast: syn::File,
}

impl SourceFile {
    /// Parse `source` as a Rust file, reporting syntax errors against `path`
    pub fn parse(path: impl Into<PathBuf>, source: &str) -> Result<Self, AnalysisError> {
        let path = path.into();
        match syn::parse_file(source) {
            Ok(ast) => Ok(Self { path, ast }),
            Err(err) => Err(AnalysisError::Parse {
                position: SourcePosition::from_span(&path, err.span()),
                message: err.to_string(),
            }),
        }
    }

    /// Read and parse a file from disk
    pub fn read(path: &Path) -> Result<Self, AnalysisError> {
        let source = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &source)
    }
}

/// Kind of a type declared directly in the analyzed module
#[derive(Debug, Clone)]
pub enum LocalType {
    Struct,
    Enum,
    Union,
    Trait,
    /// `type Name = Target;`
    Alias {
        target: Box<syn::Type>,
        /// Whether the alias declares type parameters of its own
        generic: bool,
    },
}

/// Where a path written in the analyzed module points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Declared in the analyzed module
    Local(String),
    /// Declared in another module. `module` is written relative to the
    /// analyzed module (it may start with `self` or `super`).
    External { module: Vec<String>, ident: String },
    /// Only a glob import can supply the name
    Glob(String),
    /// Nothing declares or imports the name
    Unresolved,
}

impl Resolution {
    /// Fully joined path, as written relative to the analyzed module
    #[must_use]
    pub fn full_path(&self) -> Option<String> {
        match self {
            Resolution::External { module, ident } => {
                Some(format!("{}::{}", module.join("::"), ident))
            }
            Resolution::Local(ident) | Resolution::Glob(ident) => Some(ident.clone()),
            Resolution::Unresolved => None,
        }
    }
}

#[derive(Debug, Clone)]
struct ImportedName {
    path: Vec<String>,
    position: SourcePosition,
}

/// Declarations and imports of the analyzed module, merged across files
#[derive(Debug, Default)]
pub struct ModuleScope {
    files: Vec<SourceFile>,
    locals: HashMap<String, LocalType>,
    modules: HashSet<String>,
    imports: HashMap<String, ImportedName>,
    globs: Vec<Vec<String>>,
}

impl ModuleScope {
    /// Build the scope from already parsed files, in the given order
    pub fn new(files: Vec<SourceFile>) -> Result<Self, AnalysisError> {
        let mut scope = ModuleScope::default();
        for file in &files {
            for item in &file.ast.items {
                scope.collect_item(&file.path, item)?;
            }
        }
        debug!(
            files = files.len(),
            locals = scope.locals.len(),
            imports = scope.imports.len(),
            globs = scope.globs.len(),
            "module scope collected"
        );
        scope.files = files;
        Ok(scope)
    }

    /// Parsed files in analysis order
    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Locally declared type named `ident`
    #[must_use]
    pub fn local_type(&self, ident: &str) -> Option<&LocalType> {
        self.locals.get(ident)
    }

    /// Module paths imported with `use path::*`
    #[must_use]
    pub fn glob_modules(&self) -> &[Vec<String>] {
        &self.globs
    }

    fn collect_item(&mut self, file: &Path, item: &syn::Item) -> Result<(), AnalysisError> {
        match item {
            syn::Item::Struct(s) => {
                self.locals.insert(s.ident.to_string(), LocalType::Struct);
            }
            syn::Item::Enum(e) => {
                self.locals.insert(e.ident.to_string(), LocalType::Enum);
            }
            syn::Item::Union(u) => {
                self.locals.insert(u.ident.to_string(), LocalType::Union);
            }
            syn::Item::Trait(t) => {
                self.locals.insert(t.ident.to_string(), LocalType::Trait);
            }
            syn::Item::Type(t) => {
                self.locals.insert(
                    t.ident.to_string(),
                    LocalType::Alias {
                        target: t.ty.clone(),
                        generic: t.generics.type_params().next().is_some(),
                    },
                );
            }
            syn::Item::Mod(m) => {
                self.modules.insert(m.ident.to_string());
            }
            syn::Item::Use(u) => {
                let position = SourcePosition::from_span(file, u.span());
                let mut flat = Vec::new();
                flatten_use_tree(&u.tree, Vec::new(), &mut flat);
                for entry in flat {
                    match entry {
                        UseEntry::Name { ident, path } => {
                            self.add_import(ident, path, position.clone())?;
                        }
                        UseEntry::Glob(prefix) => {
                            if !self.globs.contains(&prefix) {
                                self.globs.push(prefix);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn add_import(
        &mut self,
        ident: String,
        path: Vec<String>,
        position: SourcePosition,
    ) -> Result<(), AnalysisError> {
        if let Some(existing) = self.imports.get(&ident) {
            if existing.path != path {
                return Err(AnalysisError::ConflictingImport {
                    position,
                    ident,
                    first: existing.path.join("::"),
                    second: path.join("::"),
                });
            }
            return Ok(());
        }
        self.imports.insert(ident, ImportedName { path, position });
        Ok(())
    }

    /// Resolve a path as written in the analyzed module
    ///
    /// Only the identifiers of the segments are considered; generic
    /// arguments are the caller's concern.
    #[must_use]
    pub fn resolve(&self, path: &syn::Path) -> Resolution {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        self.resolve_segments(&segments)
    }

    fn resolve_segments(&self, segments: &[String]) -> Resolution {
        let Some((last, init)) = segments.split_last() else {
            return Resolution::Unresolved;
        };

        if init.is_empty() {
            if self.locals.contains_key(last) {
                return Resolution::Local(last.clone());
            }
            if let Some(import) = self.imports.get(last) {
                return split_full_path(&import.path);
            }
            if !self.globs.is_empty() {
                return Resolution::Glob(last.clone());
            }
            return Resolution::Unresolved;
        }

        let first = init[0].as_str();
        match first {
            "self" if init.len() == 1 => {
                if self.locals.contains_key(last) {
                    Resolution::Local(last.clone())
                } else {
                    Resolution::Unresolved
                }
            }
            "crate" | "self" | "super" => split_full_path(segments),
            _ => {
                if let Some(import) = self.imports.get(first) {
                    let mut full = import.path.clone();
                    full.extend(segments[1..].iter().cloned());
                    split_full_path(&full)
                } else if self.modules.contains(first) {
                    let mut full = vec!["self".to_string()];
                    full.extend(segments.iter().cloned());
                    split_full_path(&full)
                } else {
                    // An extern crate path such as `chrono::DateTime`
                    split_full_path(segments)
                }
            }
        }
    }

    /// Position of the `use` item that imported `ident`, if any
    #[must_use]
    pub fn import_position(&self, ident: &str) -> Option<&SourcePosition> {
        self.imports.get(ident).map(|i| &i.position)
    }
}

fn split_full_path(path: &[String]) -> Resolution {
    match path.split_last() {
        Some((ident, module)) if !module.is_empty() => Resolution::External {
            module: module.to_vec(),
            ident: ident.clone(),
        },
        Some((ident, _)) => Resolution::Glob(ident.clone()),
        None => Resolution::Unresolved,
    }
}

enum UseEntry {
    Name { ident: String, path: Vec<String> },
    Glob(Vec<String>),
}

fn flatten_use_tree(tree: &syn::UseTree, prefix: Vec<String>, out: &mut Vec<UseEntry>) {
    match tree {
        syn::UseTree::Path(p) => {
            let mut next = prefix;
            next.push(p.ident.to_string());
            flatten_use_tree(&p.tree, next, out);
        }
        syn::UseTree::Name(n) => {
            let ident = n.ident.to_string();
            if ident == "self" {
                if let Some(last) = prefix.last().cloned() {
                    out.push(UseEntry::Name {
                        ident: last,
                        path: prefix,
                    });
                }
            } else {
                let mut path = prefix;
                path.push(ident.clone());
                out.push(UseEntry::Name { ident, path });
            }
        }
        syn::UseTree::Rename(r) => {
            let rename = r.rename.to_string();
            // `use Trait as _;` only brings methods into scope
            if rename == "_" {
                return;
            }
            let mut path = prefix;
            if r.ident != "self" {
                path.push(r.ident.to_string());
            }
            out.push(UseEntry::Name {
                ident: rename,
                path,
            });
        }
        syn::UseTree::Glob(_) => out.push(UseEntry::Glob(prefix)),
        syn::UseTree::Group(g) => {
            for item in &g.items {
                flatten_use_tree(item, prefix.clone(), out);
            }
        }
    }
}

use std::collections::HashMap;

use serde::Serialize;

use super::scope::Resolution;

/// Path keywords that cannot be bound with `use path;`
const PATH_KEYWORDS: &[&str] = &["crate", "self", "super"];

/// One `use` line of the generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEntry {
    /// Module path, relative to the generated module
    pub path: String,
    /// Name the generated code refers to the module by
    pub alias: String,
}

impl ImportEntry {
    /// Whether the `use` needs an explicit `as alias`
    #[must_use]
    pub fn needs_alias(&self) -> bool {
        self.path.rsplit("::").next() != Some(self.alias.as_str())
    }
}

/// Module path → alias mapping for one generation run.
///
/// Entries keep their insertion order so the rendered import block is stable.
/// The first reference to a module fixes its alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportAliasTable {
    entries: Vec<ImportEntry>,
    #[serde(skip)]
    by_path: HashMap<String, usize>,
}

impl ImportAliasTable {
    /// Table pre-seeded with the transport and runtime support modules
    #[must_use]
    pub fn seeded(transport_path: &str, runtime_path: &str) -> Self {
        let mut table = Self::default();
        table.alias_for(transport_path);
        table.alias_for(runtime_path);
        table
    }

    /// Alias of `path`, assigning one if the path has not been seen yet
    pub fn alias_for(&mut self, path: &str) -> String {
        if let Some(&idx) = self.by_path.get(path) {
            return self.entries[idx].alias.clone();
        }
        let base = path.rsplit("::").next().unwrap_or(path);
        let alias = self.unique_alias(base);
        self.by_path.insert(path.to_string(), self.entries.len());
        self.entries.push(ImportEntry {
            path: path.to_string(),
            alias: alias.clone(),
        });
        alias
    }

    /// Alias already assigned to `path`
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.by_path
            .get(path)
            .map(|&idx| self.entries[idx].alias.as_str())
    }

    /// Entries in the order they were first referenced
    #[must_use]
    pub fn entries(&self) -> &[ImportEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn unique_alias(&self, base: &str) -> String {
        let taken = |name: &str| self.entries.iter().any(|e| e.alias == name);
        if !taken(base) {
            return base.to_string();
        }
        let mut i = 1;
        loop {
            let candidate = format!("{base}_{i}");
            if !taken(&candidate) {
                return candidate;
            }
            i += 1;
        }
    }
}

/// Names types for the generated module, recording the imports it needs
#[derive(Debug, Clone)]
pub struct TypeResolver {
    aliases: ImportAliasTable,
}

impl TypeResolver {
    #[must_use]
    pub fn new(aliases: ImportAliasTable) -> Self {
        Self { aliases }
    }

    /// Qualified, generation-ready name of a resolved type.
    ///
    /// Local and glob-provided types keep their bare identifier; the
    /// generated module sees them through `use super::*`.
    pub fn qualify(&mut self, resolution: &Resolution) -> String {
        match resolution {
            Resolution::Local(ident) | Resolution::Glob(ident) => ident.clone(),
            Resolution::External { module, ident } => {
                let module = relative_to_generated(module);
                if module.iter().all(|s| PATH_KEYWORDS.contains(&s.as_str())) {
                    return format!("{}::{}", module.join("::"), ident);
                }
                let alias = self.aliases.alias_for(&module.join("::"));
                format!("{alias}::{ident}")
            }
            // Callers reject unresolved names before naming them
            Resolution::Unresolved => String::new(),
        }
    }

    #[must_use]
    pub fn aliases(&self) -> &ImportAliasTable {
        &self.aliases
    }

    #[must_use]
    pub fn into_aliases(self) -> ImportAliasTable {
        self.aliases
    }
}

/// Rewrite a module path written in the analyzed module so it is valid from
/// the generated module, which is one of its children.
#[must_use]
pub fn relative_to_generated(module: &[String]) -> Vec<String> {
    match module.first().map(String::as_str) {
        Some("self") => std::iter::once("super".to_string())
            .chain(module[1..].iter().cloned())
            .collect(),
        Some("super") => std::iter::once("super".to_string())
            .chain(module.iter().cloned())
            .collect(),
        _ => module.to_vec(),
    }
}

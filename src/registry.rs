use log::debug;
use wsdl_model::AnyURI;

use crate::error::GeneratorError;
use crate::naming;

/// Assigns every namespace encountered during one generation run a stable
/// `(module name, short alias)` pair, in first-seen order.
///
/// One registry lives for exactly one [`generate`](crate::generate) call;
/// the mapping is append-only for that lifetime, and no two namespaces ever
/// share a module name or alias. Cross-namespace references in generated
/// code are qualified through these aliases, so the assignment order is an
/// externally observable part of the output.
#[derive(Debug, Default)]
pub struct NamespaceRegistry {
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
    namespace: AnyURI,
    module_name: String,
    alias: String,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a namespace. Registering an already-known namespace is a
    /// no-op; the first registration wins and keeps its position.
    pub fn add(&mut self, namespace: &str) {
        if self.position(namespace).is_some() {
            return;
        }
        let mut module_name = derive_module_name(namespace);
        // Distinct URIs can sanitize to the same module name; suffix with
        // the entry index, bumping until the name is actually unused. A
        // suffixed candidate can collide with an earlier derived name.
        if self.entries.iter().any(|e| e.module_name == module_name) {
            let base = module_name;
            let mut n = self.entries.len();
            module_name = loop {
                let candidate = format!("{}_{}", base, n);
                if !self.entries.iter().any(|e| e.module_name == candidate) {
                    break candidate;
                }
                n += 1;
            };
        }
        let alias = format!("ns{}", self.entries.len());
        debug!(
            "registered namespace {:?} as module {:?}, alias {}",
            namespace, module_name, alias
        );
        self.entries.push(Entry {
            namespace: namespace.to_owned(),
            module_name,
            alias,
        });
    }

    pub fn module_name_of(&self, namespace: &str) -> Result<&str, GeneratorError> {
        self.lookup(namespace).map(|e| e.module_name.as_str())
    }

    pub fn alias_of(&self, namespace: &str) -> Result<&str, GeneratorError> {
        self.lookup(namespace).map(|e| e.alias.as_str())
    }

    /// All registered namespaces with their module names, in first-seen
    /// order.
    pub fn modules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.namespace.as_str(), e.module_name.as_str()))
    }

    fn position(&self, namespace: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.namespace == namespace)
    }

    fn lookup(&self, namespace: &str) -> Result<&Entry, GeneratorError> {
        self.position(namespace)
            .map(|i| &self.entries[i])
            .ok_or_else(|| GeneratorError::UnregisteredNamespace {
                namespace: namespace.to_owned(),
            })
    }
}

/// Renders a namespace URI as an identifier-safe module name: the URI
/// scheme is stripped, separator characters become underscores, one
/// trailing underscore is dropped, and the remainder is sanitized so
/// unusual URI characters cannot reach identifier minting.
fn derive_module_name(namespace: &str) -> String {
    let stripped = namespace
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or_else(|| {
            namespace
                .split_once(':')
                .map(|(scheme, rest)| {
                    if scheme.chars().all(|c| c.is_ascii_alphabetic()) {
                        rest
                    } else {
                        namespace
                    }
                })
                .unwrap_or(namespace)
        });
    let mut name: String = stripped
        .chars()
        .map(|c| match c {
            '-' | '.' | '/' | ':' | '?' | '#' | ' ' => '_',
            other => other,
        })
        .collect();
    if name.ends_with('_') {
        name.pop();
    }
    naming::sanitize(&name)
}

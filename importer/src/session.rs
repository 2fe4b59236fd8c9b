use std::collections::{HashMap, HashSet};

use crate::{
    descriptor::{AsyncTypes, BindingDescriptor, TypeMapping},
    identifiers::CodeIdentifiers,
    options::ImportOptions,
    warnings::ImportWarnings,
};

/// State shared by every binding of one import run.
///
/// Not synchronised: a session belongs to a single import on a single thread.
#[derive(Debug)]
pub struct ImportSession {
    options: ImportOptions,
    pub(crate) class_names: CodeIdentifiers,
    header_keys: HashSet<String>,
    header_types: Vec<TypeMapping>,
    async_types: HashMap<String, AsyncTypes>,
    warnings: ImportWarnings,
    namespace_warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ImportResult {
    pub bindings: Vec<BindingDescriptor>,
    /// Every distinct header type, in first-use order, across all bindings.
    pub header_types: Vec<TypeMapping>,
    pub warnings: ImportWarnings,
    /// Warnings that could not be attached to a binding.
    pub namespace_warnings: Vec<String>,
}

impl ImportSession {
    pub fn new(options: ImportOptions) -> Self {
        Self {
            options,
            class_names: CodeIdentifiers::default(),
            header_keys: HashSet::new(),
            header_types: Vec::new(),
            async_types: HashMap::new(),
            warnings: ImportWarnings::empty(),
            namespace_warnings: Vec::new(),
        }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn warnings(&self) -> ImportWarnings {
        self.warnings
    }

    pub fn namespace_warnings(&self) -> &[String] {
        &self.namespace_warnings
    }

    pub(crate) fn raise(&mut self, warnings: ImportWarnings) {
        self.warnings |= warnings;
    }

    pub(crate) fn warn_namespace(&mut self, warning: ImportWarnings, message: String) {
        warn!("{}", message);
        self.warnings |= warning;
        self.namespace_warnings.push(message);
    }

    /// Records a header type the first time its key is seen in the run.
    pub(crate) fn declare_header_type(&mut self, key: &str, mapping: &TypeMapping) {
        if self.header_keys.insert(key.to_owned()) {
            self.header_types.push(mapping.clone());
        }
    }

    pub(crate) fn async_types(&self, signature: &str) -> Option<&AsyncTypes> {
        self.async_types.get(signature)
    }

    pub(crate) fn declare_async_types(&mut self, signature: String, types: AsyncTypes) {
        self.async_types.entry(signature).or_insert(types);
    }

    pub fn finish(self, bindings: Vec<BindingDescriptor>) -> ImportResult {
        ImportResult {
            bindings,
            header_types: self.header_types,
            warnings: self.warnings,
            namespace_warnings: self.namespace_warnings,
        }
    }
}

impl ImportResult {
    pub fn binding(&self, name: &str) -> Option<&BindingDescriptor> {
        self.bindings.iter().find(|binding| binding.binding == name)
    }
}

//! Registry of user-defined functions planted on the target

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UdfSignature {
    pub name: String,
    pub input: Vec<String>,
    pub output: String,
}

impl UdfSignature {
    pub fn new(name: &str, input: &[&str], output: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.iter().map(|t| t.to_string()).collect(),
            output: output.to_string(),
        }
    }

    /// Parameter types as a PostgreSQL argument list
    pub fn parameter_list(&self) -> String {
        self.input.join(", ")
    }
}

/// Ordered UDF name to signature mapping
#[derive(Debug, Clone, Default, Serialize)]
pub struct UdfRegistry {
    udfs: Vec<UdfSignature>,
}

impl UdfRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Functions the OS takeover installs by default
    pub fn system() -> Self {
        let mut registry = Self::new();
        registry.insert(UdfSignature::new("sys_exec", &["text"], "int"));
        registry.insert(UdfSignature::new("sys_eval", &["text"], "text"));
        registry.insert(UdfSignature::new("sys_bineval", &["text"], "int"));
        registry
    }

    /// Add a function, replacing any previous one with the same name
    pub fn insert(&mut self, udf: UdfSignature) {
        match self.udfs.iter_mut().find(|u| u.name == udf.name) {
            Some(existing) => *existing = udf,
            None => self.udfs.push(udf),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &UdfSignature> {
        self.udfs.iter()
    }
}

//! Schema builder: merges named fragments into one finalized snapshot.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use crate::error::SchemaError;
use crate::model::ModelDefinition;
use crate::schema::SchemaDefinition;
use crate::validation;

/// Named schema fragment contributed by a plugin.
#[derive(Debug, Clone)]
pub struct SchemaPlugin {
    /// Plugin name, reported in merge errors
    pub name: String,
    /// Models the plugin contributes
    pub models: Vec<ModelDefinition>,
}

impl SchemaPlugin {
    /// Creates a named fragment from a set of models.
    pub fn new(name: impl Into<String>, models: Vec<ModelDefinition>) -> Self {
        Self {
            name: name.into(),
            models,
        }
    }
}

/// Starts a schema from a base set of models.
///
/// Further fragments are merged with [`SchemaBuilder::with_plugin`]; the
/// finalized snapshot comes from [`SchemaBuilder::schema`].
pub fn define_db(models: Vec<ModelDefinition>) -> SchemaBuilder {
    SchemaBuilder {
        fragments: vec![SchemaPlugin::new("base", models)],
        snapshot: OnceLock::new(),
    }
}

/// Accumulates schema fragments and produces one immutable snapshot.
#[derive(Debug)]
pub struct SchemaBuilder {
    fragments: Vec<SchemaPlugin>,
    snapshot: OnceLock<Result<Arc<SchemaDefinition>, SchemaError>>,
}

impl SchemaBuilder {
    /// Returns the builder extended with another fragment.
    ///
    /// Merging happens at finalization; a model key collision fails there
    /// with [`SchemaError::DuplicateModel`] rather than silently
    /// overwriting the earlier definition.
    pub fn with_plugin(mut self, plugin: SchemaPlugin) -> Self {
        self.fragments.push(plugin);
        self.snapshot = OnceLock::new();
        self
    }

    /// Merges, validates, and returns the finalized schema.
    ///
    /// Idempotent: repeated calls return the same snapshot.
    pub fn schema(&self) -> Result<Arc<SchemaDefinition>, SchemaError> {
        self.snapshot.get_or_init(|| self.finalize()).clone()
    }

    fn finalize(&self) -> Result<Arc<SchemaDefinition>, SchemaError> {
        let mut seen = HashSet::new();
        let mut models = Vec::new();
        for plugin in &self.fragments {
            for model in &plugin.models {
                if !seen.insert(model.name.clone()) {
                    return Err(SchemaError::DuplicateModel {
                        model: model.name.clone(),
                        plugin: plugin.name.clone(),
                    });
                }
                models.push(model.clone());
            }
        }
        validation::validate_models(&models)?;
        Ok(Arc::new(SchemaDefinition::new(models)))
    }
}

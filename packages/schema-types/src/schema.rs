//! Finalized schema: the immutable collection of models adapters consume.

use crate::error::SchemaError;
use crate::model::ModelDefinition;
use crate::validation;

/// Finalized schema definition.
///
/// Produced by [`SchemaBuilder::schema`](crate::SchemaBuilder::schema) and
/// never mutated afterwards; adapters share one snapshot behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SchemaDefinition {
    models: Vec<ModelDefinition>,
}

impl SchemaDefinition {
    pub(crate) fn new(models: Vec<ModelDefinition>) -> Self {
        Self { models }
    }

    /// Returns the models in registration order.
    pub fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    /// Returns the model definition for the given model name.
    pub fn get_model(&self, name: &str) -> Option<&ModelDefinition> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Returns `true` if the schema defines the given model.
    pub fn has_model(&self, name: &str) -> bool {
        self.get_model(name).is_some()
    }

    /// Returns all model names in registration order.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    /// Returns the number of models in the schema.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Returns a copy of the schema without the named models.
    ///
    /// This is the structured counterpart to filtering generated output:
    /// consumers that must skip pre-existing/reserved models drop them from
    /// the schema before any text generation. The remaining models are
    /// re-validated, so a surviving reference to a dropped model fails here
    /// rather than in whatever consumes the filtered schema.
    pub fn without_models(&self, excluded: &[&str]) -> Result<SchemaDefinition, SchemaError> {
        let models: Vec<ModelDefinition> = self
            .models
            .iter()
            .filter(|m| !excluded.contains(&m.name.as_str()))
            .cloned()
            .collect();
        validation::validate_models(&models)?;
        Ok(SchemaDefinition::new(models))
    }
}

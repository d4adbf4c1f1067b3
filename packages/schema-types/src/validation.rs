//! Validation for merged schema fragments.

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::field::{DefaultValue, OnDelete};
use crate::model::ModelDefinition;
use crate::value::FieldType;

/// The implicit identifier field present on every model.
pub(crate) const ID_FIELD: &str = "id";

/// Validates a merged model set.
///
/// Checks field-name uniqueness, the reserved `id` name, fixed-default
/// types, and every reference: the target model and field must exist, the
/// referencing field must carry the referenced field's type, and a required
/// field cannot be cleared by a set-null action.
pub(crate) fn validate_models(models: &[ModelDefinition]) -> Result<(), SchemaError> {
    for model in models {
        let mut seen_names = HashSet::new();
        for field in &model.fields {
            if field.name == ID_FIELD {
                return Err(SchemaError::ReservedFieldName {
                    model: model.name.clone(),
                });
            }
            if !seen_names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    model: model.name.clone(),
                    field: field.name.clone(),
                });
            }

            if let Some(DefaultValue::Fixed(value)) = &field.default {
                if !value.matches_type(field.field_type) {
                    return Err(SchemaError::DefaultTypeMismatch {
                        model: model.name.clone(),
                        field: field.name.clone(),
                        expected: field.field_type,
                    });
                }
            }

            if let Some(reference) = &field.references {
                validate_reference(models, model, field.name.as_str(), field.field_type, reference)?;
                if field.required && reference.on_delete == OnDelete::SetNull {
                    return Err(SchemaError::RequiredSetNull {
                        model: model.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn validate_reference(
    models: &[ModelDefinition],
    model: &ModelDefinition,
    field_name: &str,
    field_type: FieldType,
    reference: &crate::field::Reference,
) -> Result<(), SchemaError> {
    let target = models
        .iter()
        .find(|m| m.name == reference.model)
        .ok_or_else(|| SchemaError::UnknownReferencedModel {
            model: model.name.clone(),
            field: field_name.to_string(),
            target: reference.model.clone(),
        })?;

    // The implicit identifier is a string; any other target must be declared.
    let expected = if reference.field == ID_FIELD {
        FieldType::String
    } else {
        target
            .get_field(&reference.field)
            .map(|f| f.field_type)
            .ok_or_else(|| SchemaError::UnknownReferencedField {
                model: model.name.clone(),
                field: field_name.to_string(),
                target_model: reference.model.clone(),
                target_field: reference.field.clone(),
            })?
    };

    if field_type != expected {
        return Err(SchemaError::ReferenceTypeMismatch {
            model: model.name.clone(),
            field: field_name.to_string(),
            target_model: reference.model.clone(),
            target_field: reference.field.clone(),
            expected,
        });
    }

    Ok(())
}

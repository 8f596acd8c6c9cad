//! Component definition codec (RON)
//!
//! A `.ncd` file holds a RON list of definitions. Exactly one definition
//! is mandatory; extra definitions are tolerated with a warning and only
//! the first is honored.

use super::{emit_ron, parse_ron, CodecError, Deserialized};
use crate::message::MessageLog;
use crate::payload::ComponentDefinition;

/// Deserialize a `.ncd` file.
pub fn deserialize_component_definition(bytes: &[u8]) -> Deserialized<ComponentDefinition> {
    let mut log = MessageLog::new();
    let Some(mut definitions) = parse_ron::<Vec<ComponentDefinition>>(bytes, &mut log) else {
        return Deserialized::failure(log);
    };

    if definitions.is_empty() {
        log.error("a component definition file must define exactly one component, found none");
        return Deserialized::failure(log);
    }
    if definitions.len() > 1 {
        log.warning(format!(
            "file defines {} components, only the first ({:?}) is honored",
            definitions.len(),
            definitions[0].name
        ));
    }

    let definition = definitions.swap_remove(0);
    if definition.name.is_empty() {
        log.error("component definition has no name");
        return Deserialized::failure(log);
    }
    let mut seen = std::collections::HashSet::new();
    for field in &definition.fields {
        if !seen.insert(field.name.as_str()) {
            log.warning(format!("duplicate field {:?}", field.name));
        }
    }
    Deserialized::success(definition, log)
}

/// Serialize a component definition to `.ncd` bytes.
///
/// Always emits a one-element list so the on-disk shape stays symmetric
/// with what the deserializer accepts.
pub fn serialize_component_definition(
    definition: &ComponentDefinition,
) -> Result<Vec<u8>, CodecError> {
    emit_ron(&std::slice::from_ref(definition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{ComponentField, FieldType};

    fn health() -> ComponentDefinition {
        ComponentDefinition {
            name: "Health".to_string(),
            fields: vec![
                ComponentField {
                    name: "current".to_string(),
                    field_type: FieldType::Float,
                },
                ComponentField {
                    name: "max".to_string(),
                    field_type: FieldType::Float,
                },
            ],
        }
    }

    #[test]
    fn test_round_trip() {
        let bytes = serialize_component_definition(&health()).expect("serialize");
        let out = deserialize_component_definition(&bytes);
        assert_eq!(out.value, Some(health()));
        assert!(!out.log.has_warnings());
    }

    #[test]
    fn test_zero_definitions_is_an_error() {
        let out = deserialize_component_definition(b"[]");
        assert!(!out.is_success());
        assert!(out.log.has_errors());
    }

    #[test]
    fn test_multiple_definitions_warn_and_keep_first() {
        let two = vec![
            health(),
            ComponentDefinition {
                name: "Armor".to_string(),
                fields: Vec::new(),
            },
        ];
        let bytes = emit_ron(&two).expect("serialize");
        let out = deserialize_component_definition(&bytes);
        assert!(out.is_success());
        assert!(out.log.has_warnings());
        assert_eq!(out.value.map(|d| d.name), Some("Health".to_string()));
    }

    #[test]
    fn test_duplicate_fields_warn() {
        let mut definition = health();
        definition.fields.push(ComponentField {
            name: "current".to_string(),
            field_type: FieldType::Int,
        });
        let bytes = serialize_component_definition(&definition).expect("serialize");
        let out = deserialize_component_definition(&bytes);
        assert!(out.is_success());
        assert!(out.log.has_warnings());
    }
}

use crate::ast;
use crate::schema::SchemaBuildError;

/// Names of the root operation types, in schema order.
pub const ROOTS_NAMES: [&str; 3] = ["Query", "Mutation", "Subscription"];

/// Merges several definitions of the same root type into one.
///
/// Fields are concatenated in input order. The first description wins and
/// implemented interfaces are unioned. A field defined twice is an error.
pub fn merge_root_nodes(
    nodes: &[ast::schema::TypeDefinition],
) -> Result<ast::schema::TypeDefinition, SchemaBuildError> {
    let Some(first) = nodes.first() else {
        return Err(SchemaBuildError::MissingQueryType);
    };
    let root_name = ast::schema::type_def_name(first).to_string();
    log::trace!("merging {} `{root_name}` definitions", nodes.len());

    let mut merged = ast::schema::ObjectType::new(root_name.to_string());
    for node in nodes {
        let ast::schema::TypeDefinition::Object(object) = node else {
            return Err(SchemaBuildError::InvalidBindingTarget {
                type_name: root_name,
                expected: "object".to_string(),
                found: crate::types::GraphQLTypeKind::from(node).to_string(),
            });
        };

        if merged.description.is_none() {
            merged.description = object.description.clone();
        }
        for interface in &object.implements_interfaces {
            if !merged.implements_interfaces.contains(interface) {
                merged.implements_interfaces.push(interface.to_string());
            }
        }
        for field in &object.fields {
            if merged.fields.iter().any(|merged_field| merged_field.name == field.name) {
                return Err(SchemaBuildError::DuplicateRootField {
                    root_name,
                    field_name: field.name.to_string(),
                });
            }
            merged.fields.push(field.clone());
        }
        merged.directives.extend(object.directives.iter().cloned());
    }

    Ok(ast::schema::TypeDefinition::Object(merged))
}

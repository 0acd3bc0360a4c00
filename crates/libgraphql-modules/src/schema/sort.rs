use crate::ast;
use crate::schema::ROOTS_NAMES;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// Orders a schema document deterministically.
///
/// Directive definitions come first (alphabetically), then the schema
/// definition, then the root types. Types reachable from the roots follow in
/// the order they are first referenced, then any unreachable types
/// alphabetically. Type extensions go last.
///
/// The result doesn't depend on the input order, and sorting a sorted
/// document is a no-op.
pub fn sort_schema_document(document: ast::schema::Document) -> ast::schema::Document {
    let mut directives = vec![];
    let mut schema_defs = vec![];
    let mut types = IndexMap::new();
    let mut extensions = vec![];

    for definition in document.definitions {
        match definition {
            ast::schema::Definition::DirectiveDefinition(directive) =>
                directives.push(directive),
            ast::schema::Definition::SchemaDefinition(schema_def) =>
                schema_defs.push(schema_def),
            ast::schema::Definition::TypeDefinition(type_def) => {
                types.insert(ast::schema::type_def_name(&type_def).to_string(), type_def);
            },
            ast::schema::Definition::TypeExtension(extension) =>
                extensions.push(extension),
        }
    }
    directives.sort_by(|a, b| a.name.cmp(&b.name));

    let mut order: IndexSet<String> = IndexSet::new();
    for root_name in ROOTS_NAMES {
        if types.contains_key(root_name) {
            visit_type(root_name, &types, &mut order);
        }
    }
    let mut unreachable: Vec<&String> =
        types.keys().filter(|name| !order.contains(*name)).collect();
    unreachable.sort();
    let unreachable: Vec<String> = unreachable.into_iter().cloned().collect();
    order.extend(unreachable);

    let mut definitions = vec![];
    definitions.extend(directives.into_iter().map(ast::schema::Definition::DirectiveDefinition));
    definitions.extend(schema_defs.into_iter().map(ast::schema::Definition::SchemaDefinition));
    for name in order {
        if let Some(type_def) = types.swap_remove(&name) {
            definitions.push(ast::schema::Definition::TypeDefinition(type_def));
        }
    }
    definitions.extend(extensions.into_iter().map(ast::schema::Definition::TypeExtension));

    ast::schema::Document { definitions }
}

fn visit_type(
    name: &str,
    types: &IndexMap<String, ast::schema::TypeDefinition>,
    order: &mut IndexSet<String>,
) {
    let Some(type_def) = types.get(name) else {
        return;
    };
    if !order.insert(name.to_string()) {
        return;
    }

    let mut referenced: Vec<&str> = vec![];
    match type_def {
        ast::schema::TypeDefinition::Object(object) => {
            referenced.extend(object.implements_interfaces.iter().map(String::as_str));
            collect_field_types(&object.fields, &mut referenced);
        },
        ast::schema::TypeDefinition::Interface(interface) => {
            referenced.extend(interface.implements_interfaces.iter().map(String::as_str));
            collect_field_types(&interface.fields, &mut referenced);
        },
        ast::schema::TypeDefinition::Union(union_type) =>
            referenced.extend(union_type.types.iter().map(String::as_str)),
        ast::schema::TypeDefinition::InputObject(input) =>
            referenced.extend(
                input.fields
                    .iter()
                    .map(|field| ast::schema::innermost_type_name(&field.value_type)),
            ),
        ast::schema::TypeDefinition::Enum(_)
            | ast::schema::TypeDefinition::Scalar(_) => (),
    }

    for referenced_name in referenced {
        visit_type(referenced_name, types, order);
    }
}

fn collect_field_types<'a>(fields: &'a [ast::schema::Field], referenced: &mut Vec<&'a str>) {
    for field in fields {
        referenced.push(ast::schema::innermost_type_name(&field.field_type));
        for argument in &field.arguments {
            referenced.push(ast::schema::innermost_type_name(&argument.value_type));
        }
    }
}

use crate::ast;
use crate::schema::merge_root_nodes;
use crate::schema::runtime::SchemaRuntime;
use crate::schema::sort_schema_document;
use crate::schema::Metadata;
use crate::schema::Schema;
use crate::schema::SchemaBindings;
use crate::schema::SchemaBuildError;
use crate::schema::ROOTS_NAMES;
use crate::types::GraphQLType;
use crate::TypeRegistry;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Assembles declarations (and everything they reference) into an
/// executable [`Schema`].
///
/// Equivalent to `ExecutableSchemaBuilder::new().add_types(types).build()`.
pub fn make_executable_schema(types: &[GraphQLType]) -> Result<Schema> {
    ExecutableSchemaBuilder::new().add_types(types).build()
}

/// Configures a schema build.
///
/// ```
/// use libgraphql_modules::types::ObjectTypeBuilder;
/// use libgraphql_modules::types::TypeHint;
/// use libgraphql_modules::ExecutableSchemaBuilder;
///
/// let query_a = ObjectTypeBuilder::new("QueryA")
///     .graphql_name("Query")
///     .annotation("a", TypeHint::Int)
///     .build()
///     .unwrap();
/// let query_b = ObjectTypeBuilder::new("QueryB")
///     .graphql_name("Query")
///     .annotation("b", TypeHint::Int)
///     .build()
///     .unwrap();
///
/// let schema = ExecutableSchemaBuilder::new()
///     .add_type(&query_a)
///     .add_type(&query_b)
///     .build()
///     .unwrap();
/// assert_eq!(schema.sdl(), "type Query {\n  a: Int!\n  b: Int!\n}\n");
/// ```
#[derive(Debug)]
pub struct ExecutableSchemaBuilder {
    types: Vec<GraphQLType>,
    registry: TypeRegistry,
    merge_roots: bool,
}
impl ExecutableSchemaBuilder {
    pub fn new() -> Self {
        Self {
            types: vec![],
            registry: TypeRegistry::new(),
            merge_roots: true,
        }
    }

    pub fn add_type(mut self, graphql_type: &GraphQLType) -> Self {
        self.types.push(graphql_type.clone());
        self
    }

    pub fn add_types<'a>(mut self, types: impl IntoIterator<Item = &'a GraphQLType>) -> Self {
        self.types.extend(types.into_iter().cloned());
        self
    }

    /// Resolves [`TypeHint::Deferred`](crate::types::TypeHint::Deferred)
    /// hints against `registry`.
    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Whether several declarations of the same root type are merged field
    /// by field (the default) or rejected as duplicates.
    pub fn merge_roots(mut self, merge_roots: bool) -> Self {
        self.merge_roots = merge_roots;
        self
    }

    pub fn build(self) -> Result<Schema> {
        let mut metadata = Metadata::with_registry(self.registry);

        let types = collect_types(&self.types, &mut metadata)?;
        log::debug!("collected {} types for the schema", types.len());

        let mut models = vec![];
        for graphql_type in &types {
            models.push(metadata.get_graphql_model(graphql_type)?);
        }

        let mut roots: IndexMap<String, Vec<ast::schema::TypeDefinition>> = IndexMap::new();
        let mut class_names: HashMap<String, &str> = HashMap::new();
        let mut definitions = vec![];
        for (graphql_type, model) in types.iter().zip(&models) {
            if self.merge_roots && ROOTS_NAMES.contains(&model.name.as_str()) {
                roots.entry(model.name.to_string()).or_default().push(model.ast.clone());
                continue;
            }
            if let Some(other) = class_names.insert(model.name.to_string(), graphql_type.class_name()) {
                return Err(SchemaBuildError::DuplicateTypeName {
                    type_name: model.name.to_string(),
                    class_name1: other.to_string(),
                    class_name2: graphql_type.class_name().to_string(),
                });
            }
            definitions.push(ast::schema::Definition::TypeDefinition(model.ast.clone()));
        }
        for (root_name, nodes) in roots {
            let root = match nodes.len() {
                1 => nodes.into_iter().next(),
                _ => Some(merge_root_nodes(&nodes)?),
            };
            log::trace!("adding root type `{root_name}`");
            definitions.extend(root.map(ast::schema::Definition::TypeDefinition));
        }

        let document = sort_schema_document(ast::schema::Document { definitions });
        let sdl = document.to_string();
        let document = ast::schema::parse_owned(&sdl).map_err(|err| SchemaBuildError::SdlParse {
            message: err.to_string(),
        })?;

        let mut bindings = SchemaBindings::from_document(&document);
        for model in &models {
            model.bind_to_schema(&mut bindings)?;
        }
        bindings.inherit_interface_bindings();

        let type_names = types
            .iter()
            .zip(&models)
            .map(|(graphql_type, model)| (graphql_type.key(), model.name.to_string()))
            .collect();
        let runtime = Arc::new(SchemaRuntime::new(&document, bindings, type_names));
        let inner = runtime.build_schema(&document)?;
        log::debug!("built executable schema with {} definitions", document.definitions.len());

        Ok(Schema::new(inner, document, sdl))
    }
}
impl std::default::Default for ExecutableSchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks declarations depth-first, collecting each one once.
fn collect_types(
    roots: &[GraphQLType],
    metadata: &mut Metadata,
) -> Result<Vec<GraphQLType>> {
    let mut collected = IndexSet::new();
    for graphql_type in roots {
        visit_type(graphql_type, metadata, &mut collected)?;
    }
    Ok(collected.into_iter().collect())
}

fn visit_type(
    graphql_type: &GraphQLType,
    metadata: &mut Metadata,
    collected: &mut IndexSet<GraphQLType>,
) -> Result<()> {
    if !collected.insert(graphql_type.clone()) {
        return Ok(());
    }
    for referenced in graphql_type.graphql_types(metadata)? {
        visit_type(&referenced, metadata, collected)?;
    }
    Ok(())
}

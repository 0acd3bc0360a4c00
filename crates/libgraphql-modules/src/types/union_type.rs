use crate::ast;
use crate::description::get_description_node;
use crate::schema::Metadata;
use crate::schema::Model;
use crate::schema::ModelKind;
use crate::schema::SchemaBuildError;
use crate::types::graphql_type::graphql_name_from_class_name;
use crate::types::graphql_type::join_names;
use crate::types::graphql_type::parse_type_definition;
use crate::types::graphql_type::validate_schema_definition;
use crate::types::DeclarationError;
use crate::types::DeclaredType;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::TypeKey;
use crate::types::TypeResolverFn;
use crate::Resolved;
use inherent::inherent;
use std::sync::Arc;

/// A built union declaration.
pub struct UnionType {
    key: TypeKey,
    class_name: String,
    graphql_name: Option<String>,
    description: Option<String>,
    schema_def: Option<ast::schema::TypeDefinition>,
    types: Vec<GraphQLType>,
    requires: Vec<GraphQLType>,
    resolve_type: Option<TypeResolverFn>,
}
impl UnionType {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn types(&self) -> &[GraphQLType] {
        self.types.as_slice()
    }

    pub(crate) fn build_model(&self, metadata: &mut Metadata) -> Result<Model, SchemaBuildError> {
        log::trace!("building union model for `{}`", self.class_name);
        let mut members = vec![];
        for member in &self.types {
            members.push((member.key(), metadata.get_graphql_name(member)?));
        }

        let def = match &self.schema_def {
            Some(def) => {
                let mut def = def.clone();
                if let ast::schema::TypeDefinition::Union(union_type) = &mut def
                    && union_type.description.is_none() {
                    union_type.description = get_description_node(self.description.as_deref());
                }
                def
            },
            None => {
                let mut union_type = ast::schema::UnionType::new(metadata.get_declared_name(self));
                union_type.description = get_description_node(self.description.as_deref());
                union_type.types = members.iter().map(|(_, name)| name.to_string()).collect();
                ast::schema::TypeDefinition::Union(union_type)
            },
        };

        Ok(Model {
            name: ast::schema::type_def_name(&def).to_string(),
            ast: def,
            kind: ModelKind::Union {
                members,
                resolve_type: self.resolve_type.clone(),
            },
        })
    }

    pub(crate) fn graphql_types(&self) -> Vec<GraphQLType> {
        self.types.iter().chain(self.requires.iter()).cloned().collect()
    }
}

#[inherent]
impl DeclaredType for UnionType {
    pub fn class_name(&self) -> &str {
        self.class_name.as_str()
    }

    pub fn graphql_name(&self) -> String {
        if let Some(name) = &self.graphql_name {
            return name.to_string();
        }
        if let Some(def) = &self.schema_def {
            return ast::schema::type_def_name(def).to_string();
        }
        graphql_name_from_class_name(&self.class_name)
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn kind(&self) -> GraphQLTypeKind {
        GraphQLTypeKind::Union
    }
}

impl std::fmt::Debug for UnionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionType")
            .field("key", &self.key)
            .field("class_name", &self.class_name)
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}

/// Builds union declarations.
///
/// Member values are matched to member types by the declaration that
/// created them (see [`GraphQLType::instance`] and [`GraphQLType::wrap`]),
/// unless a custom `resolve_type` is given.
pub struct UnionTypeBuilder {
    class_name: String,
    graphql_name: Option<String>,
    description: Option<String>,
    schema: Option<String>,
    types: Vec<GraphQLType>,
    types_from_schema: bool,
    requires: Vec<GraphQLType>,
    resolve_type: Option<TypeResolverFn>,
}
impl UnionTypeBuilder {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            graphql_name: None,
            description: None,
            schema: None,
            types: vec![],
            types_from_schema: false,
            requires: vec![],
            resolve_type: None,
        }
    }

    pub fn graphql_name(mut self, name: impl Into<String>) -> Self {
        self.graphql_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn schema(mut self, sdl: impl Into<String>) -> Self {
        self.schema = Some(sdl.into());
        self
    }

    pub fn types<'a>(mut self, types: impl IntoIterator<Item = &'a GraphQLType>) -> Self {
        self.types.extend(types.into_iter().cloned());
        self
    }

    /// Leaves member types to the schema text. Members must then be
    /// supplied to the schema build by other means.
    pub(crate) fn types_from_schema(mut self) -> Self {
        self.types_from_schema = true;
        self
    }

    pub fn requires(mut self, graphql_type: &GraphQLType) -> Self {
        self.requires.push(graphql_type.clone());
        self
    }

    pub fn resolve_type<F>(mut self, resolve_type: F) -> Self
    where
        F: Fn(&Resolved) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.resolve_type = Some(Arc::new(resolve_type));
        self
    }

    pub fn build(self) -> Result<GraphQLType, DeclarationError> {
        if self.types.is_empty() && !self.types_from_schema {
            return Err(DeclarationError::UnionTypesMissing {
                class_name: self.class_name,
            });
        }

        let schema_def = match &self.schema {
            Some(sdl) => {
                let def = parse_type_definition(&self.class_name, sdl)?;
                validate_schema_definition(
                    &self.class_name,
                    &def,
                    GraphQLTypeKind::Union,
                    self.graphql_name.as_deref(),
                    self.description.as_deref(),
                )?;
                if !self.types_from_schema {
                    self.validate_types_with_schema(&def)?;
                }
                Some(def)
            },
            None => None,
        };

        let union_type = UnionType {
            key: TypeKey::next(),
            class_name: self.class_name,
            graphql_name: self.graphql_name,
            description: self.description,
            schema_def,
            types: self.types,
            requires: self.requires,
            resolve_type: self.resolve_type,
        };
        log::trace!("built union declaration `{}`", union_type.class_name);
        Ok(GraphQLType::Union(Arc::new(union_type)))
    }

    /// Checks declared member types and schema members against each other
    /// in both directions.
    fn validate_types_with_schema(&self, def: &ast::schema::TypeDefinition) -> Result<(), DeclarationError> {
        let schema_types = match def {
            ast::schema::TypeDefinition::Union(union_type) => union_type.types.as_slice(),
            _ => &[],
        };
        let declared: Vec<String> = self.types.iter().map(GraphQLType::graphql_name).collect();

        let not_in_schema: Vec<String> = declared
            .iter()
            .filter(|name| !schema_types.contains(name))
            .cloned()
            .collect();
        if !not_in_schema.is_empty() {
            return Err(DeclarationError::UnionTypesNotInSchema {
                class_name: self.class_name.to_string(),
                type_names: join_names(not_in_schema.iter()),
            });
        }

        let not_declared: Vec<String> = schema_types
            .iter()
            .filter(|name| !declared.contains(name))
            .cloned()
            .collect();
        if !not_declared.is_empty() {
            return Err(DeclarationError::UnionSchemaTypesNotDeclared {
                class_name: self.class_name.to_string(),
                type_names: join_names(not_declared.iter()),
            });
        }

        Ok(())
    }
}

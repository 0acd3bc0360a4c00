use crate::ast;
use crate::description::get_description_node;
use crate::schema::Metadata;
use crate::schema::Model;
use crate::schema::ModelKind;
use crate::schema::SchemaBuildError;
use crate::types::graphql_type::graphql_name_from_class_name;
use crate::types::graphql_type::parse_type_definition;
use crate::types::graphql_type::validate_schema_definition;
use crate::types::DeclarationError;
use crate::types::DeclaredType;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::TypeKey;
use crate::value::get_value_from_node;
use crate::Resolved;
use async_graphql::Value;
use inherent::inherent;
use std::sync::Arc;

/// Turns a resolved value into its wire representation.
pub type SerializeFn = Arc<
    dyn Fn(&Resolved) -> anyhow::Result<Value> + Send + Sync
>;

/// Turns a variable value into the value resolvers see.
pub type ParseValueFn = Arc<
    dyn Fn(&Value) -> anyhow::Result<Resolved> + Send + Sync
>;

/// Turns a literal in SDL (such as an argument default) into the value
/// resolvers see.
pub type ParseLiteralFn = Arc<
    dyn Fn(&ast::schema::Value) -> anyhow::Result<Resolved> + Send + Sync
>;

/// A built custom scalar declaration.
pub struct ScalarType {
    key: TypeKey,
    class_name: String,
    graphql_name: Option<String>,
    description: Option<String>,
    schema_def: Option<ast::schema::TypeDefinition>,
    serialize: Option<SerializeFn>,
    parse_value: Option<ParseValueFn>,
    parse_literal: Option<ParseLiteralFn>,
}
impl ScalarType {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Serializes with the declared serializer, else by unwrapping a
    /// wrapped [`Value`] (or passing a plain value through).
    pub fn serialize(&self, value: &Resolved) -> anyhow::Result<Value> {
        match &self.serialize {
            Some(serialize) => serialize(value),
            None => default_serialize(value),
        }
    }

    pub fn parse_value(&self, value: &Value) -> anyhow::Result<Resolved> {
        match &self.parse_value {
            Some(parse_value) => parse_value(value),
            None => Ok(Resolved::Value(value.clone())),
        }
    }

    pub fn parse_literal(&self, node: &ast::schema::Value) -> anyhow::Result<Resolved> {
        match &self.parse_literal {
            Some(parse_literal) => parse_literal(node),
            None => self.parse_value(&get_value_from_node(node)?),
        }
    }

    pub(crate) fn build_model(&self, metadata: &mut Metadata) -> Result<Model, SchemaBuildError> {
        log::trace!("building scalar model for `{}`", self.class_name);
        let def = match &self.schema_def {
            Some(def) => {
                let mut def = def.clone();
                if let ast::schema::TypeDefinition::Scalar(scalar) = &mut def
                    && scalar.description.is_none() {
                    scalar.description = get_description_node(self.description.as_deref());
                }
                def
            },
            None => {
                let mut scalar = ast::schema::ScalarType::new(metadata.get_declared_name(self));
                scalar.description = get_description_node(self.description.as_deref());
                ast::schema::TypeDefinition::Scalar(scalar)
            },
        };

        let serialize: SerializeFn = match &self.serialize {
            Some(serialize) => serialize.clone(),
            None => Arc::new(default_serialize),
        };
        let parse_value: ParseValueFn = match &self.parse_value {
            Some(parse_value) => parse_value.clone(),
            None => Arc::new(|value: &Value| Ok(Resolved::Value(value.clone()))),
        };
        let parse_literal: ParseLiteralFn = match &self.parse_literal {
            Some(parse_literal) => parse_literal.clone(),
            None => {
                let parse_value = parse_value.clone();
                Arc::new(move |node: &ast::schema::Value| parse_value(&get_value_from_node(node)?))
            },
        };

        Ok(Model {
            name: ast::schema::type_def_name(&def).to_string(),
            ast: def,
            kind: ModelKind::Scalar {
                serialize,
                parse_value,
                parse_literal,
            },
        })
    }
}

#[inherent]
impl DeclaredType for ScalarType {
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
        GraphQLTypeKind::Scalar
    }
}

impl std::fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarType")
            .field("key", &self.key)
            .field("class_name", &self.class_name)
            .field("graphql_name", &self.graphql_name)
            .finish_non_exhaustive()
    }
}

fn default_serialize(value: &Resolved) -> anyhow::Result<Value> {
    if let Some(wrapped) = value.downcast_scalar::<Value>() {
        return Ok(wrapped.clone());
    }
    match value {
        Resolved::Null => Ok(Value::Null),
        Resolved::Value(value) => Ok(value.clone()),
        Resolved::List(items) => Ok(Value::List(
            items.iter().map(default_serialize).collect::<anyhow::Result<_>>()?,
        )),
        _ => anyhow::bail!("Cannot serialize {value:?} without a custom serializer"),
    }
}

/// Builds custom scalar declarations.
///
/// ```
/// use async_graphql::Value;
/// use libgraphql_modules::types::ScalarTypeBuilder;
///
/// let upper = ScalarTypeBuilder::new("UpperScalar")
///     .serialize(|value| Ok(Value::from(value.as_str().unwrap_or("").to_uppercase())))
///     .build()
///     .unwrap();
/// assert_eq!(upper.graphql_name(), "Upper");
/// ```
pub struct ScalarTypeBuilder {
    class_name: String,
    graphql_name: Option<String>,
    description: Option<String>,
    schema: Option<String>,
    serialize: Option<SerializeFn>,
    parse_value: Option<ParseValueFn>,
    parse_literal: Option<ParseLiteralFn>,
}
impl ScalarTypeBuilder {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            graphql_name: None,
            description: None,
            schema: None,
            serialize: None,
            parse_value: None,
            parse_literal: None,
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

    pub fn serialize<F>(mut self, serialize: F) -> Self
    where
        F: Fn(&Resolved) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.serialize = Some(Arc::new(serialize));
        self
    }

    pub fn parse_value<F>(mut self, parse_value: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Resolved> + Send + Sync + 'static,
    {
        self.parse_value = Some(Arc::new(parse_value));
        self
    }

    pub fn parse_literal<F>(mut self, parse_literal: F) -> Self
    where
        F: Fn(&ast::schema::Value) -> anyhow::Result<Resolved> + Send + Sync + 'static,
    {
        self.parse_literal = Some(Arc::new(parse_literal));
        self
    }

    pub fn build(self) -> Result<GraphQLType, DeclarationError> {
        let schema_def = match &self.schema {
            Some(sdl) => {
                let def = parse_type_definition(&self.class_name, sdl)?;
                validate_schema_definition(
                    &self.class_name,
                    &def,
                    GraphQLTypeKind::Scalar,
                    self.graphql_name.as_deref(),
                    self.description.as_deref(),
                )?;
                Some(def)
            },
            None => None,
        };

        let scalar_type = ScalarType {
            key: TypeKey::next(),
            class_name: self.class_name,
            graphql_name: self.graphql_name,
            description: self.description,
            schema_def,
            serialize: self.serialize,
            parse_value: self.parse_value,
            parse_literal: self.parse_literal,
        };
        log::trace!("built scalar declaration `{}`", scalar_type.class_name);
        Ok(GraphQLType::Scalar(Arc::new(scalar_type)))
    }
}

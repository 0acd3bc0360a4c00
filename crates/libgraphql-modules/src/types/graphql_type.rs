use crate::ast;
use crate::resolved::ScalarValue;
use crate::schema::Metadata;
use crate::schema::Model;
use crate::schema::SchemaBuildError;
use crate::types::DeclarationError;
use crate::types::EnumType;
use crate::types::EnumTypeBuilder;
use crate::types::GraphQLTypeKind;
use crate::types::InputType;
use crate::types::InputTypeBuilder;
use crate::types::ObjectType;
use crate::types::ObjectTypeBuilder;
use crate::types::ScalarType;
use crate::types::ScalarTypeBuilder;
use crate::types::UnionType;
use crate::types::UnionTypeBuilder;
use crate::Instance;
use crate::Resolved;
use inherent::inherent;
use std::any::Any;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// A process-unique identifier for a built declaration.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeKey(u64);
impl TypeKey {
    pub(crate) fn next() -> Self {
        static NEXT_KEY: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

/// Behavior shared by every built declaration.
pub trait DeclaredType {
    fn class_name(&self) -> &str;

    /// The GraphQL name: the explicit name if one was given, else the name
    /// in the declaration's schema, else one derived from the class name.
    fn graphql_name(&self) -> String;

    fn key(&self) -> TypeKey;

    fn kind(&self) -> GraphQLTypeKind;
}

/// A built type declaration.
///
/// Cloning is cheap. Two handles are equal when they refer to the same
/// declaration.
#[derive(Clone)]
pub enum GraphQLType {
    Enum(Arc<EnumType>),
    Input(Arc<InputType>),
    Interface(Arc<ObjectType>),
    Object(Arc<ObjectType>),
    Scalar(Arc<ScalarType>),
    Subscription(Arc<ObjectType>),
    Union(Arc<UnionType>),
}
impl GraphQLType {
    /// Builds a schema-first declaration of whichever kind `sdl` defines.
    ///
    /// An object type named `Subscription` becomes a subscription
    /// declaration. Union members are taken from the schema text.
    pub fn from_schema(
        class_name: impl Into<String>,
        sdl: impl Into<String>,
    ) -> Result<Self, DeclarationError> {
        let class_name = class_name.into();
        let sdl = sdl.into();
        let def = parse_type_definition(&class_name, &sdl)?;

        match def {
            ast::schema::TypeDefinition::Enum(_) =>
                EnumTypeBuilder::new(class_name).schema(sdl).build(),
            ast::schema::TypeDefinition::InputObject(_) =>
                InputTypeBuilder::new(class_name).schema(sdl).build(),
            ast::schema::TypeDefinition::Interface(_) =>
                ObjectTypeBuilder::interface(class_name).schema(sdl).build(),
            ast::schema::TypeDefinition::Object(obj) if obj.name == "Subscription" =>
                ObjectTypeBuilder::subscription(class_name).schema(sdl).build(),
            ast::schema::TypeDefinition::Object(_) =>
                ObjectTypeBuilder::new(class_name).schema(sdl).build(),
            ast::schema::TypeDefinition::Scalar(_) =>
                ScalarTypeBuilder::new(class_name).schema(sdl).build(),
            ast::schema::TypeDefinition::Union(_) =>
                UnionTypeBuilder::new(class_name)
                    .schema(sdl)
                    .types_from_schema()
                    .build(),
        }
    }

    pub(crate) fn build_model(
        &self,
        metadata: &mut Metadata,
    ) -> Result<Model, SchemaBuildError> {
        match self {
            Self::Enum(t) => t.build_model(metadata),
            Self::Input(t) => t.build_model(metadata),
            Self::Interface(t) | Self::Object(t) | Self::Subscription(t) =>
                t.build_model(metadata),
            Self::Scalar(t) => t.build_model(metadata),
            Self::Union(t) => t.build_model(metadata),
        }
    }

    /// The declarations this declaration refers to directly.
    pub(crate) fn graphql_types(
        &self,
        metadata: &mut Metadata,
    ) -> Result<Vec<GraphQLType>, SchemaBuildError> {
        Ok(match self {
            Self::Enum(_) | Self::Scalar(_) => vec![],
            Self::Input(t) => t.graphql_types(metadata),
            Self::Interface(t) | Self::Object(t) | Self::Subscription(t) =>
                t.graphql_types(metadata)?,
            Self::Union(t) => t.graphql_types(),
        })
    }

    /// Creates an instance of an object, interface, input or subscription
    /// declaration.
    ///
    /// Attributes not passed in `kwargs` take their declared defaults (or
    /// null). Unknown keyword arguments are an error.
    pub fn instance<I, K, V>(&self, kwargs: I) -> Result<Resolved, DeclarationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Resolved>,
    {
        let defaults = match self {
            Self::Input(t) => &t.kwargs,
            Self::Interface(t) | Self::Object(t) | Self::Subscription(t) => &t.kwargs,
            Self::Enum(_) | Self::Scalar(_) | Self::Union(_) =>
                return Err(DeclarationError::NotInstantiable {
                    class_name: self.class_name().to_string(),
                    kind: self.kind().to_string(),
                }),
        };

        let mut attrs = defaults.clone();
        for (kwarg, value) in kwargs {
            let kwarg = kwarg.into();
            if !defaults.contains_key(&kwarg) {
                return Err(DeclarationError::UnexpectedKeywordArgument {
                    class_name: self.class_name().to_string(),
                    kwarg,
                    valid_kwargs: join_names(defaults.keys()),
                });
            }
            attrs.insert(kwarg, value.into());
        }

        Ok(Resolved::Instance(Instance::new(self.key(), self.class_name(), attrs)))
    }

    /// Wraps a native value so that it is attributed to this declaration.
    ///
    /// Custom scalars receive wrapped values in their serializer. Unions and
    /// interfaces use the attribution to pick the object type of a value.
    pub fn wrap<T: Any + Send + Sync>(&self, value: T) -> Resolved {
        Resolved::Scalar(ScalarValue::new(Some(self.key()), value))
    }

    pub fn as_object_type(&self) -> Option<&ObjectType> {
        match self {
            Self::Interface(t) | Self::Object(t) | Self::Subscription(t) => Some(t),
            _ => None,
        }
    }
}

#[inherent]
impl DeclaredType for GraphQLType {
    pub fn class_name(&self) -> &str {
        match self {
            Self::Enum(t) => t.class_name(),
            Self::Input(t) => t.class_name(),
            Self::Interface(t) | Self::Object(t) | Self::Subscription(t) => t.class_name(),
            Self::Scalar(t) => t.class_name(),
            Self::Union(t) => t.class_name(),
        }
    }

    pub fn graphql_name(&self) -> String {
        match self {
            Self::Enum(t) => t.graphql_name(),
            Self::Input(t) => t.graphql_name(),
            Self::Interface(t) | Self::Object(t) | Self::Subscription(t) => t.graphql_name(),
            Self::Scalar(t) => t.graphql_name(),
            Self::Union(t) => t.graphql_name(),
        }
    }

    pub fn key(&self) -> TypeKey {
        match self {
            Self::Enum(t) => t.key(),
            Self::Input(t) => t.key(),
            Self::Interface(t) | Self::Object(t) | Self::Subscription(t) => t.key(),
            Self::Scalar(t) => t.key(),
            Self::Union(t) => t.key(),
        }
    }

    pub fn kind(&self) -> GraphQLTypeKind {
        GraphQLTypeKind::from(self)
    }
}

impl std::cmp::PartialEq for GraphQLType {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl std::cmp::Eq for GraphQLType {}

impl std::hash::Hash for GraphQLType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

impl std::fmt::Debug for GraphQLType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind(), self.class_name())
    }
}

/// Derives a GraphQL name from a declaration's class name by stripping (or
/// replacing) the first matching conventional suffix.
pub(crate) fn graphql_name_from_class_name(class_name: &str) -> String {
    const SUFFIXES: [(&str, &str); 7] = [
        ("GraphQLEnum", "Enum"),
        ("GraphQLInput", "Input"),
        ("GraphQLScalar", ""),
        ("Scalar", ""),
        ("GraphQL", ""),
        ("Type", ""),
        ("GraphQLType", ""),
    ];

    for (suffix, replacement) in SUFFIXES {
        if let Some(stem) = class_name.strip_suffix(suffix)
            && !stem.is_empty() {
            return format!("{stem}{replacement}");
        }
    }
    class_name.to_string()
}

/// Parses the schema text of a declaration into its single type
/// definition.
pub(crate) fn parse_type_definition(
    class_name: &str,
    sdl: &str,
) -> Result<ast::schema::TypeDefinition, DeclarationError> {
    let document = ast::schema::parse_owned(sdl).map_err(|err| {
        DeclarationError::InvalidSchemaText {
            class_name: class_name.to_string(),
            message: err.to_string(),
        }
    })?;

    let count = document.definitions.len();
    match document.definitions.into_iter().next() {
        Some(ast::schema::Definition::TypeDefinition(def)) if count == 1 => Ok(def),
        _ => Err(DeclarationError::SchemaTextDefinitionCount {
            class_name: class_name.to_string(),
            count,
        }),
    }
}

/// Checks the parts of a schema-first declaration every kind shares: the
/// definition kind, the GraphQL name and the description.
pub(crate) fn validate_schema_definition(
    class_name: &str,
    def: &ast::schema::TypeDefinition,
    expected_kind: GraphQLTypeKind,
    graphql_name: Option<&str>,
    description: Option<&str>,
) -> Result<(), DeclarationError> {
    let found_kind = GraphQLTypeKind::from(def);
    if found_kind != expected_kind {
        return Err(DeclarationError::InvalidSchemaTypeKind {
            class_name: class_name.to_string(),
            expected: expected_kind.to_string(),
            found: found_kind.to_string(),
        });
    }

    let schema_name = ast::schema::type_def_name(def);
    if let Some(declared) = graphql_name
        && declared != schema_name {
        return Err(DeclarationError::GraphQLNameMismatch {
            class_name: class_name.to_string(),
            declared: declared.to_string(),
            schema_name: schema_name.to_string(),
        });
    }

    if description.is_some() && ast::schema::type_def_description(def).is_some() {
        return Err(DeclarationError::DuplicateDescription {
            class_name: class_name.to_string(),
        });
    }

    Ok(())
}

pub(crate) fn join_names<'a>(names: impl IntoIterator<Item = &'a String>) -> String {
    names.into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("', '")
}

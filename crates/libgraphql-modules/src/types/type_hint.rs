use crate::ast;
use crate::schema::Metadata;
use crate::schema::SchemaBuildError;
use crate::types::DeclaredType;
use crate::types::GraphQLType;
use crate::DeferredType;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// The declared type of a field or argument.
///
/// Hints are non-null unless wrapped in [`TypeHint::Optional`].
#[derive(Clone, Debug, PartialEq)]
pub enum TypeHint {
    Boolean,
    Float,
    Id,
    Int,
    String,
    List(Box<TypeHint>),
    Optional(Box<TypeHint>),
    /// A declaration (including a declaration built from a native enum).
    Type(GraphQLType),
    /// A declaration registered in a [`TypeRegistry`](crate::TypeRegistry)
    /// under `module`, looked up by its declaration name.
    Deferred {
        type_name: String,
        module: DeferredType,
    },
    /// A reference to the declaration being declared, by declaration name.
    ForwardRef(String),
}
impl TypeHint {
    pub fn deferred(type_name: impl Into<String>, module: DeferredType) -> Self {
        Self::Deferred {
            type_name: type_name.into(),
            module,
        }
    }

    pub fn forward_ref(class_name: impl Into<String>) -> Self {
        Self::ForwardRef(class_name.into())
    }

    pub fn list(inner: impl Into<TypeHint>) -> Self {
        Self::List(Box::new(inner.into()))
    }

    pub fn optional(inner: impl Into<TypeHint>) -> Self {
        Self::Optional(Box::new(inner.into()))
    }
}
impl std::convert::From<GraphQLType> for TypeHint {
    fn from(value: GraphQLType) -> Self {
        Self::Type(value)
    }
}
impl std::convert::From<&GraphQLType> for TypeHint {
    fn from(value: &GraphQLType) -> Self {
        Self::Type(value.clone())
    }
}
impl std::fmt::Display for TypeHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean => f.write_str("bool"),
            Self::Float => f.write_str("f64"),
            Self::Id => f.write_str("ID"),
            Self::Int => f.write_str("i32"),
            Self::String => f.write_str("String"),
            Self::List(inner) => write!(f, "Vec<{inner}>"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::Type(graphql_type) => f.write_str(graphql_type.class_name()),
            Self::Deferred { type_name, module } =>
                write!(f, "deferred({}.{type_name})", module.path()),
            Self::ForwardRef(name) => write!(f, "\"{name}\""),
        }
    }
}

/// Maps a [`TypeHint`] to the SDL type node it describes.
///
/// `parent` is the declaration whose field or argument is being mapped. It
/// is needed to resolve [`TypeHint::ForwardRef`]s.
pub fn get_type_node(
    metadata: &mut Metadata,
    type_hint: &TypeHint,
    parent: Option<&dyn DeclaredType>,
) -> Result<ast::schema::Type> {
    let (unwrapped_hint, nullable) = match type_hint {
        TypeHint::Optional(inner) => (inner.as_ref(), true),
        hint => (hint, false),
    };

    let type_node = match unwrapped_hint {
        TypeHint::Boolean => named_type("Boolean"),
        TypeHint::Float => named_type("Float"),
        TypeHint::Id => named_type("ID"),
        TypeHint::Int => named_type("Int"),
        TypeHint::String => named_type("String"),

        TypeHint::List(inner) => ast::schema::Type::ListType(
            Box::new(get_type_node(metadata, inner, parent)?),
        ),

        TypeHint::Type(graphql_type) =>
            named_type(&metadata.get_graphql_name(graphql_type)?),

        TypeHint::Deferred { type_name, module } => {
            let graphql_type = metadata
                .registry()
                .get(module.path(), type_name)
                .cloned()
                .ok_or_else(|| SchemaBuildError::DeferredTypeNotRegistered {
                    module_path: module.path().to_string(),
                    type_name: type_name.to_string(),
                })?;
            named_type(&metadata.get_graphql_name(&graphql_type)?)
        },

        TypeHint::ForwardRef(name) => match parent {
            Some(parent) if parent.class_name() == name =>
                named_type(&metadata.get_declared_name(parent)),
            _ => return Err(SchemaBuildError::ForwardRefMismatch {
                forward_ref: name.to_string(),
                parent: parent.map(|parent| parent.class_name().to_string()),
            }),
        },

        TypeHint::Optional(_) => return Err(SchemaBuildError::InvalidTypeHint {
            type_hint: type_hint.to_string(),
        }),
    };

    Ok(
        if nullable {
            type_node
        } else {
            ast::schema::Type::NonNullType(Box::new(type_node))
        }
    )
}

/// Returns the declaration a hint refers to, if any. Optional and list
/// wrappers are looked through. Deferred hints are not resolved.
pub fn get_graphql_type(type_hint: &TypeHint) -> Option<GraphQLType> {
    match type_hint {
        TypeHint::List(inner) | TypeHint::Optional(inner) => get_graphql_type(inner),
        TypeHint::Type(graphql_type) => Some(graphql_type.clone()),
        _ => None,
    }
}

/// Like [`get_graphql_type`], but also resolves deferred hints that are
/// present in the metadata's registry.
pub(crate) fn get_referenced_type(
    metadata: &Metadata,
    type_hint: &TypeHint,
) -> Option<GraphQLType> {
    match type_hint {
        TypeHint::List(inner) | TypeHint::Optional(inner) =>
            get_referenced_type(metadata, inner),
        TypeHint::Deferred { type_name, module } =>
            metadata.registry().get(module.path(), type_name).cloned(),
        hint => get_graphql_type(hint),
    }
}

fn named_type(name: &str) -> ast::schema::Type {
    ast::schema::Type::NamedType(name.to_string())
}

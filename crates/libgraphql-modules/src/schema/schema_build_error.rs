use crate::types::DeclarationError;
use thiserror::Error;

/// Errors raised while assembling declarations into an executable schema.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(
        "Deferred type '{type_name}' was not registered under '{module_path}'"
    )]
    DeferredTypeNotRegistered {
        module_path: String,
        type_name: String,
    },

    #[error(
        "Multiple {root_name} types are defining same field '{field_name}'"
    )]
    DuplicateRootField {
        root_name: String,
        field_name: String,
    },

    #[error(
        "Types '{class_name1}' and '{class_name2}' both define GraphQL type \
        with name '{type_name}'"
    )]
    DuplicateTypeName {
        type_name: String,
        class_name1: String,
        class_name2: String,
    },

    #[error(
        "The GraphQL engine rejected the assembled schema: {message}"
    )]
    Engine {
        message: String,
    },

    #[error(
        "Forward reference '{forward_ref}' doesn't name the type being \
        declared ({parent:?})"
    )]
    ForwardRefMismatch {
        forward_ref: String,
        parent: Option<String>,
    },

    #[error(
        "Type '{type_name}' can't bind {expected} data: it is a {found} in \
        the schema"
    )]
    InvalidBindingTarget {
        type_name: String,
        expected: String,
        found: String,
    },

    #[error("Unsupported type hint: {type_hint}")]
    InvalidTypeHint {
        type_hint: String,
    },

    #[error("Schema is missing a Query type")]
    MissingQueryType,

    #[error("Failed to parse the assembled schema:\n{message}")]
    SdlParse {
        message: String,
    },

    #[error(
        "Field '{type_name}.{field_name}' has no argument named '{arg_name}'"
    )]
    UndefinedArgInSchema {
        type_name: String,
        field_name: String,
        arg_name: String,
    },

    #[error("Type '{type_name}' has no field named '{field_name}'")]
    UndefinedFieldInSchema {
        type_name: String,
        field_name: String,
    },

    #[error("Type '{type_name}' is not defined in the schema")]
    UndefinedTypeInSchema {
        type_name: String,
    },
}

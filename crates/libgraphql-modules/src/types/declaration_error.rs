use crate::ValueNodeError;
use thiserror::Error;

/// Errors detected while building a declaration, before it ever reaches
/// schema assembly.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DeclarationError {
    #[error(
        "Declaration '{class_name}' defines alias '{field_name}' for a field that \
        has a custom resolver"
    )]
    AliasForResolvedField {
        class_name: String,
        field_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines an alias for an undefined field \
        '{field_name}'. (Valid fields: '{valid_fields}')"
    )]
    AliasForUndefinedField {
        class_name: String,
        field_name: String,
        valid_fields: String,
    },

    #[error(
        "Declaration '{class_name}' defines 'name' option for '{arg_name}' argument \
        of the '{field_name}' field. This is not supported for types defining \
        a schema"
    )]
    ArgNameOptionWithSchema {
        class_name: String,
        field_name: String,
        arg_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines options for '{param_name}' argument of \
        the '{field_name}' field that doesn't exist. (Expected arguments: \
        '{expected}')"
    )]
    ArgOptionsForUndefinedParam {
        class_name: String,
        field_name: String,
        param_name: String,
        expected: String,
    },

    #[error(
        "Declaration '{class_name}' defines options for '{arg_name}' argument of the \
        '{field_name}' field that doesn't exist in the schema"
    )]
    ArgOptionsForUndefinedSchemaArg {
        class_name: String,
        field_name: String,
        arg_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines 'type' option for '{arg_name}' argument \
        of the '{field_name}' field. This is not supported for types defining \
        a schema"
    )]
    ArgTypeOptionWithSchema {
        class_name: String,
        field_name: String,
        arg_name: String,
    },

    #[error(
        "Declaration '{class_name}' doesn't define a type for '{arg_name}' argument \
        of the '{field_name}' field"
    )]
    ArgWithoutType {
        class_name: String,
        field_name: String,
        arg_name: String,
    },

    #[error(
        "'{module_path}' points outside of the '{package}' package"
    )]
    DeferredPathOutsidePackage {
        module_path: String,
        package: String,
    },

    #[error(
        "Declaration '{class_name}' defines description for '{arg_name}' argument \
        of the '{field_name}' field both in the schema and in the argument \
        options"
    )]
    DuplicateArgDescription {
        class_name: String,
        field_name: String,
        arg_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines multiple arguments named '{arg_name}' \
        on the '{field_name}' field"
    )]
    DuplicateArgName {
        class_name: String,
        field_name: String,
        arg_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines description in both the schema and the \
        declaration"
    )]
    DuplicateDescription {
        class_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines the '{member}' enum member more than \
        once"
    )]
    DuplicateEnumMember {
        class_name: String,
        member: String,
    },

    #[error(
        "Declaration '{class_name}' defines description for the '{member}' enum \
        member both in the schema and in the member descriptions"
    )]
    DuplicateEnumMemberDescription {
        class_name: String,
        member: String,
    },

    #[error(
        "Declaration '{class_name}' defines multiple fields with GraphQL name \
        '{graphql_name}': '{attr1}' and '{attr2}'"
    )]
    DuplicateGraphQLFieldName {
        class_name: String,
        graphql_name: String,
        attr1: String,
        attr2: String,
    },

    #[error(
        "Declaration '{class_name}' defines multiple fields with the out name \
        '{out_name}'"
    )]
    DuplicateOutName {
        class_name: String,
        out_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines the '{param_name}' parameter more than \
        once for the '{field_name}' field"
    )]
    DuplicateParam {
        class_name: String,
        field_name: String,
        param_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines a description for an undefined enum \
        member '{member}'. (Valid members: '{valid_members}')"
    )]
    EnumMemberDescriptionForUndefined {
        class_name: String,
        member: String,
        valid_members: String,
    },

    #[error(
        "Declaration '{class_name}' defines members that don't match the schema. \
        Missing from the declaration: '{missing}'. Missing from the schema: \
        '{extra}'"
    )]
    EnumMembersMismatch {
        class_name: String,
        missing: String,
        extra: String,
    },

    #[error(
        "Declaration '{class_name}' doesn't define any enum members. Specify them \
        with `members`, `member` or `native`"
    )]
    EnumMembersMissing {
        class_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines a field descriptor for '{attr_name}'. \
        Field descriptors are not supported for types defining a schema"
    )]
    FieldDescriptorWithSchema {
        class_name: String,
        attr_name: String,
    },

    #[error(
        "Declaration '{class_name}' doesn't define a type for the '{attr_name}' field"
    )]
    FieldWithoutType {
        class_name: String,
        attr_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines GraphQL name '{declared}' that doesn't \
        match the name '{schema_name}' in its schema"
    )]
    GraphQLNameMismatch {
        class_name: String,
        declared: String,
        schema_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines a schema with an invalid type: \
        expected {expected}, found {found}"
    )]
    InvalidSchemaTypeKind {
        class_name: String,
        expected: String,
        found: String,
    },

    #[error(
        "Declaration '{class_name}' can't inherit from '{base_name}', which is a \
        {kind} declaration"
    )]
    InvalidBaseType {
        class_name: String,
        base_name: String,
        kind: String,
    },

    #[error(
        "Declaration '{class_name}' defines a schema that failed to parse:\n{message}"
    )]
    InvalidSchemaText {
        class_name: String,
        message: String,
    },

    #[error(
        "Declaration '{class_name}' defines arguments options for '{field_name}' \
        field multiple times"
    )]
    MultipleArgOptions {
        class_name: String,
        field_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines multiple descriptions for the \
        '{field_name}' field"
    )]
    MultipleFieldDescriptions {
        class_name: String,
        field_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines multiple resolvers for the \
        '{field_name}' field"
    )]
    MultipleResolvers {
        class_name: String,
        field_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines multiple sources for the '{field_name}' \
        subscription field"
    )]
    MultipleSubscribers {
        class_name: String,
        field_name: String,
    },

    #[error(
        "Declaration '{class_name}' is a {kind} declaration and can't create \
        instances"
    )]
    NotInstantiable {
        class_name: String,
        kind: String,
    },

    #[error(
        "Declaration '{class_name}' defines an out name for an undefined field \
        '{field_name}'. (Valid fields: '{valid_fields}')"
    )]
    OutNameForUndefinedField {
        class_name: String,
        field_name: String,
        valid_fields: String,
    },

    #[error(
        "Declaration '{class_name}' defines out names without a schema. Out names \
        are only supported for types defining a schema"
    )]
    OutNamesWithoutSchema {
        class_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines resolver for an undefined field \
        '{field_name}'. (Valid fields: '{valid_fields}')"
    )]
    ResolverForUndefinedField {
        class_name: String,
        field_name: String,
        valid_fields: String,
    },

    #[error(
        "Declaration '{class_name}' defines a schema with {count} definitions. \
        Exactly one type definition is required"
    )]
    SchemaTextDefinitionCount {
        class_name: String,
        count: usize,
    },

    #[error(
        "Declaration '{class_name}' defines a schema for '{type_name}' without any \
        fields"
    )]
    SchemaTypeWithoutFields {
        class_name: String,
        type_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines source for an undefined field \
        '{field_name}'. (Valid fields: '{valid_fields}')"
    )]
    SubscriberForUndefinedField {
        class_name: String,
        field_name: String,
        valid_fields: String,
    },

    #[error(
        "Declaration '{class_name}' defines a source for the '{field_name}' field \
        but only subscription types can define sources"
    )]
    SubscriberOnNonSubscription {
        class_name: String,
        field_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines types for its union that are missing \
        from its schema: '{type_names}'"
    )]
    UnionSchemaTypesNotDeclared {
        class_name: String,
        type_names: String,
    },

    #[error(
        "Declaration '{class_name}' doesn't define any types for its union. Specify \
        them with `types`"
    )]
    UnionTypesMissing {
        class_name: String,
    },

    #[error(
        "Declaration '{class_name}' defines a schema with union members that are \
        not declared with `types`: '{type_names}'"
    )]
    UnionTypesNotInSchema {
        class_name: String,
        type_names: String,
    },

    #[error(
        "{class_name}::instance() got an unexpected keyword argument \
        '{kwarg}'. Valid keyword arguments: '{valid_kwargs}'"
    )]
    UnexpectedKeywordArgument {
        class_name: String,
        kwarg: String,
        valid_kwargs: String,
    },

    #[error(
        "Declaration '{class_name}' defines default value for '{arg_name}' argument \
        of the '{field_name}' field that can't be represented in the \
        schema: {source}"
    )]
    UnrepresentableArgDefault {
        class_name: String,
        field_name: String,
        arg_name: String,
        source: ValueNodeError,
    },

    #[error(
        "Declaration '{class_name}' defines default value for the '{field_name}' \
        field that can't be represented in the schema: {source}"
    )]
    UnrepresentableFieldDefault {
        class_name: String,
        field_name: String,
        source: ValueNodeError,
    },
}

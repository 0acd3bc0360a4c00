mod declaration_error;
mod enum_type;
mod field;
mod graphql_type;
mod graphql_type_kind;
mod input_type;
mod object_type;
pub(crate) mod object_type_data;
mod scalar_type;
mod type_hint;
mod union_type;

pub use declaration_error::DeclarationError;
pub use enum_type::EnumType;
pub use enum_type::EnumTypeBuilder;
pub use enum_type::NativeEnum;
pub use field::field_args_from_params;
pub use field::update_field_args_options;
pub use field::ArgOptions;
pub use field::EventStream;
pub use field::FieldArg;
pub use field::FieldDecl;
pub use field::Param;
pub use field::Resolver;
pub use field::ResolverArgs;
pub use field::ResolverDecl;
pub use field::ResolverFn;
pub use field::Subscriber;
pub use field::SubscriberDecl;
pub use field::SubscriberFn;
pub use field::TypeResolverFn;
pub use graphql_type::DeclaredType;
pub use graphql_type::GraphQLType;
pub use graphql_type::TypeKey;
pub use graphql_type_kind::GraphQLTypeKind;
pub use input_type::InputFieldDecl;
pub use input_type::InputType;
pub use input_type::InputTypeBuilder;
pub use object_type::ObjectType;
pub use object_type::ObjectTypeBuilder;
pub use object_type::ObjectTypeMixin;
pub use object_type_data::ObjectFieldData;
pub use object_type_data::ObjectTypeData;
pub use scalar_type::ParseLiteralFn;
pub use scalar_type::ParseValueFn;
pub use scalar_type::ScalarType;
pub use scalar_type::ScalarTypeBuilder;
pub use scalar_type::SerializeFn;
pub use type_hint::get_graphql_type;
pub use type_hint::get_type_node;
pub use type_hint::TypeHint;
pub use union_type::UnionType;
pub use union_type::UnionTypeBuilder;

#[cfg(test)]
mod tests;

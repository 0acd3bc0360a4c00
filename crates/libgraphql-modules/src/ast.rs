pub use graphql_parser::Pos;

pub mod schema {
    pub use graphql_parser::schema::ParseError;
    pub use graphql_parser::schema::parse_schema;

    pub type Definition = graphql_parser::schema::Definition<'static, String>;
    pub type Directive = graphql_parser::schema::Directive<'static, String>;
    pub type DirectiveDefinition = graphql_parser::schema::DirectiveDefinition<'static, String>;
    pub type Document = graphql_parser::schema::Document<'static, String>;
    pub type EnumType = graphql_parser::schema::EnumType<'static, String>;
    pub type EnumValue = graphql_parser::schema::EnumValue<'static, String>;
    pub type Field = graphql_parser::schema::Field<'static, String>;
    pub type InputObjectType = graphql_parser::schema::InputObjectType<'static, String>;
    pub type InputValue = graphql_parser::schema::InputValue<'static, String>;
    pub type InterfaceType = graphql_parser::schema::InterfaceType<'static, String>;
    pub type ObjectType = graphql_parser::schema::ObjectType<'static, String>;
    pub type ScalarType = graphql_parser::schema::ScalarType<'static, String>;
    pub type SchemaDefinition = graphql_parser::schema::SchemaDefinition<'static, String>;
    pub type Type = graphql_parser::schema::Type<'static, String>;
    pub type TypeDefinition = graphql_parser::schema::TypeDefinition<'static, String>;
    pub type UnionType = graphql_parser::schema::UnionType<'static, String>;
    pub type Value = graphql_parser::schema::Value<'static, String>;

    /// Parses `content` as a schema document whose nodes own their strings.
    pub fn parse_owned(
        content: &str,
    ) -> std::result::Result<Document, ParseError> {
        Ok(parse_schema::<String>(content)?.into_static())
    }

    /// The name of any [`TypeDefinition`].
    pub fn type_def_name(def: &TypeDefinition) -> &str {
        match def {
            TypeDefinition::Enum(def) => def.name.as_str(),
            TypeDefinition::InputObject(def) => def.name.as_str(),
            TypeDefinition::Interface(def) => def.name.as_str(),
            TypeDefinition::Object(def) => def.name.as_str(),
            TypeDefinition::Scalar(def) => def.name.as_str(),
            TypeDefinition::Union(def) => def.name.as_str(),
        }
    }

    /// The description of any [`TypeDefinition`].
    pub fn type_def_description(def: &TypeDefinition) -> Option<&str> {
        match def {
            TypeDefinition::Enum(def) => def.description.as_deref(),
            TypeDefinition::InputObject(def) => def.description.as_deref(),
            TypeDefinition::Interface(def) => def.description.as_deref(),
            TypeDefinition::Object(def) => def.description.as_deref(),
            TypeDefinition::Scalar(def) => def.description.as_deref(),
            TypeDefinition::Union(def) => def.description.as_deref(),
        }
    }

    /// The innermost named type of a (possibly wrapped) type annotation.
    pub fn innermost_type_name(ty: &Type) -> &str {
        match ty {
            Type::NamedType(name) => name.as_str(),
            Type::ListType(inner) | Type::NonNullType(inner) =>
                innermost_type_name(inner),
        }
    }
}

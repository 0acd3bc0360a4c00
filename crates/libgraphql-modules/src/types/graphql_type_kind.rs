use crate::ast;
use crate::types::GraphQLType;

/// Similar to [`GraphQLType`] except without the corresponding declaration.
/// Useful when representing a group or category of [`GraphQLType`]s.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphQLTypeKind {
    Enum,
    InputObject,
    Interface,
    Object,
    Scalar,
    Subscription,
    Union,
}
impl GraphQLTypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Enum => "Enum",
            Self::InputObject => "InputObject",
            Self::Interface => "Interface",
            Self::Object => "Object",
            Self::Scalar => "Scalar",
            Self::Subscription => "Subscription",
            Self::Union => "Union",
        }
    }
}
impl std::fmt::Display for GraphQLTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
impl std::convert::From<&GraphQLType> for GraphQLTypeKind {
    fn from(value: &GraphQLType) -> Self {
        match value {
            GraphQLType::Enum(_) => GraphQLTypeKind::Enum,
            GraphQLType::Input(_) => GraphQLTypeKind::InputObject,
            GraphQLType::Interface(_) => GraphQLTypeKind::Interface,
            GraphQLType::Object(_) => GraphQLTypeKind::Object,
            GraphQLType::Scalar(_) => GraphQLTypeKind::Scalar,
            GraphQLType::Subscription(_) => GraphQLTypeKind::Subscription,
            GraphQLType::Union(_) => GraphQLTypeKind::Union,
        }
    }
}
/// The kind of SDL node a definition is. Subscription roots are plain
/// object definitions in the SDL.
impl std::convert::From<&ast::schema::TypeDefinition> for GraphQLTypeKind {
    fn from(value: &ast::schema::TypeDefinition) -> Self {
        match value {
            ast::schema::TypeDefinition::Enum(_) => GraphQLTypeKind::Enum,
            ast::schema::TypeDefinition::InputObject(_) => GraphQLTypeKind::InputObject,
            ast::schema::TypeDefinition::Interface(_) => GraphQLTypeKind::Interface,
            ast::schema::TypeDefinition::Object(_) => GraphQLTypeKind::Object,
            ast::schema::TypeDefinition::Scalar(_) => GraphQLTypeKind::Scalar,
            ast::schema::TypeDefinition::Union(_) => GraphQLTypeKind::Union,
        }
    }
}

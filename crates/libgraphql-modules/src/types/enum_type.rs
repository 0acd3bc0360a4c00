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
use async_graphql::Value;
use indexmap::IndexMap;
use indexmap::IndexSet;
use inherent::inherent;
use std::sync::Arc;

type Result<T> = std::result::Result<T, DeclarationError>;

/// A Rust enum that can be declared as a GraphQL enum.
///
/// ```
/// use async_graphql::Value;
/// use libgraphql_modules::types::EnumTypeBuilder;
/// use libgraphql_modules::types::NativeEnum;
///
/// enum UserLevel {
///     Guest,
///     Member,
/// }
/// impl NativeEnum for UserLevel {
///     const NAME: &'static str = "UserLevel";
///
///     fn members() -> Vec<(&'static str, Value)> {
///         vec![
///             ("GUEST", Value::from(UserLevel::Guest as i32)),
///             ("MEMBER", Value::from(UserLevel::Member as i32)),
///         ]
///     }
/// }
///
/// let user_level = EnumTypeBuilder::from_native::<UserLevel>().build().unwrap();
/// assert_eq!(user_level.graphql_name(), "UserLevel");
/// ```
pub trait NativeEnum {
    const NAME: &'static str;

    /// Member names paired with the values resolvers see.
    fn members() -> Vec<(&'static str, Value)>;
}

/// A built enum declaration.
pub struct EnumType {
    key: TypeKey,
    class_name: String,
    graphql_name: Option<String>,
    description: Option<String>,
    schema_def: Option<ast::schema::TypeDefinition>,
    members: IndexMap<String, Value>,
    members_descriptions: IndexMap<String, String>,
}
impl EnumType {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn members(&self) -> &IndexMap<String, Value> {
        &self.members
    }

    pub(crate) fn build_model(&self, metadata: &mut Metadata) -> std::result::Result<Model, SchemaBuildError> {
        log::trace!("building enum model for `{}`", self.class_name);
        let def = match &self.schema_def {
            Some(def) => {
                let mut def = def.clone();
                if let ast::schema::TypeDefinition::Enum(enum_type) = &mut def {
                    if enum_type.description.is_none() {
                        enum_type.description =
                            get_description_node(self.description.as_deref());
                    }
                    for value in enum_type.values.iter_mut() {
                        if value.description.is_none() {
                            value.description = get_description_node(
                                self.members_descriptions.get(&value.name).map(String::as_str),
                            );
                        }
                    }
                }
                def
            },
            None => {
                let mut enum_type = ast::schema::EnumType::new(metadata.get_declared_name(self));
                enum_type.description = get_description_node(self.description.as_deref());
                enum_type.values = self.members
                    .keys()
                    .map(|member| {
                        let mut value = ast::schema::EnumValue::new(member.to_string());
                        value.description = get_description_node(
                            self.members_descriptions.get(member).map(String::as_str),
                        );
                        value
                    })
                    .collect();
                ast::schema::TypeDefinition::Enum(enum_type)
            },
        };

        Ok(Model {
            name: ast::schema::type_def_name(&def).to_string(),
            ast: def,
            kind: ModelKind::Enum {
                members: self.members.clone(),
            },
        })
    }
}

#[inherent]
impl DeclaredType for EnumType {
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
        GraphQLTypeKind::Enum
    }
}

impl std::fmt::Debug for EnumType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumType")
            .field("key", &self.key)
            .field("class_name", &self.class_name)
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

/// Builds enum declarations from a member list, a member map or a
/// [`NativeEnum`].
pub struct EnumTypeBuilder {
    class_name: String,
    graphql_name: Option<String>,
    description: Option<String>,
    schema: Option<String>,
    members: Vec<(String, Value)>,
    members_descriptions: Vec<(String, String)>,
    include_members: Option<Vec<String>>,
    exclude_members: Vec<String>,
}
impl EnumTypeBuilder {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            graphql_name: None,
            description: None,
            schema: None,
            members: vec![],
            members_descriptions: vec![],
            include_members: None,
            exclude_members: vec![],
        }
    }

    /// Declares a native enum under its own name.
    pub fn from_native<E: NativeEnum>() -> Self {
        Self::new(E::NAME).graphql_name(E::NAME).native::<E>()
    }

    /// Takes members from a native enum.
    pub fn native<E: NativeEnum>(mut self) -> Self {
        self.members.extend(
            E::members()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value)),
        );
        self
    }

    /// Declares members whose values are their names.
    pub fn members<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            let value = Value::String(name.to_string());
            self.members.push((name, value));
        }
        self
    }

    pub fn member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.push((name.into(), value.into()));
        self
    }

    pub fn member_description(
        mut self,
        member: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.members_descriptions.push((member.into(), description.into()));
        self
    }

    /// Keeps only the named members.
    pub fn include_members<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_members = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude_members<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_members.extend(names.into_iter().map(Into::into));
        self
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

    pub fn build(self) -> Result<GraphQLType> {
        let mut members = self.declared_members()?;

        let schema_def = match &self.schema {
            Some(sdl) => {
                let def = parse_type_definition(&self.class_name, sdl)?;
                validate_schema_definition(
                    &self.class_name,
                    &def,
                    GraphQLTypeKind::Enum,
                    self.graphql_name.as_deref(),
                    self.description.as_deref(),
                )?;
                let schema_values = match &def {
                    ast::schema::TypeDefinition::Enum(enum_type) => enum_type.values.as_slice(),
                    _ => &[],
                };
                if members.is_empty() {
                    members = schema_values
                        .iter()
                        .map(|value| (value.name.to_string(), Value::String(value.name.to_string())))
                        .collect();
                } else {
                    self.validate_members_with_schema(&members, schema_values)?;
                }
                Some(def)
            },
            None => None,
        };

        if members.is_empty() {
            return Err(DeclarationError::EnumMembersMissing {
                class_name: self.class_name,
            });
        }

        let members_descriptions = self.validate_members_descriptions(
            &members,
            schema_def.as_ref(),
        )?;

        let enum_type = EnumType {
            key: TypeKey::next(),
            class_name: self.class_name,
            graphql_name: self.graphql_name,
            description: self.description,
            schema_def,
            members,
            members_descriptions,
        };
        log::trace!("built enum declaration `{}`", enum_type.class_name);
        Ok(GraphQLType::Enum(Arc::new(enum_type)))
    }

    fn declared_members(&self) -> Result<IndexMap<String, Value>> {
        let mut members = IndexMap::new();
        for (name, value) in &self.members {
            if let Some(include) = &self.include_members
                && !include.contains(name) {
                continue;
            }
            if self.exclude_members.contains(name) {
                continue;
            }
            if members.insert(name.to_string(), value.clone()).is_some() {
                return Err(DeclarationError::DuplicateEnumMember {
                    class_name: self.class_name.to_string(),
                    member: name.to_string(),
                });
            }
        }
        Ok(members)
    }

    fn validate_members_with_schema(
        &self,
        members: &IndexMap<String, Value>,
        schema_values: &[ast::schema::EnumValue],
    ) -> Result<()> {
        let schema_names: IndexSet<String> =
            schema_values.iter().map(|value| value.name.to_string()).collect();
        let missing: Vec<String> = schema_names
            .iter()
            .filter(|name| !members.contains_key(*name))
            .cloned()
            .collect();
        let extra: Vec<String> = members
            .keys()
            .filter(|name| !schema_names.contains(*name))
            .cloned()
            .collect();

        if missing.is_empty() && extra.is_empty() {
            return Ok(());
        }
        Err(DeclarationError::EnumMembersMismatch {
            class_name: self.class_name.to_string(),
            missing: join_names(missing.iter()),
            extra: join_names(extra.iter()),
        })
    }

    fn validate_members_descriptions(
        &self,
        members: &IndexMap<String, Value>,
        schema_def: Option<&ast::schema::TypeDefinition>,
    ) -> Result<IndexMap<String, String>> {
        let schema_values = match schema_def {
            Some(ast::schema::TypeDefinition::Enum(enum_type)) => enum_type.values.as_slice(),
            _ => &[],
        };

        let mut descriptions = IndexMap::new();
        for (member, description) in &self.members_descriptions {
            if !members.contains_key(member) {
                return Err(DeclarationError::EnumMemberDescriptionForUndefined {
                    class_name: self.class_name.to_string(),
                    member: member.to_string(),
                    valid_members: join_names(members.keys()),
                });
            }
            let described_in_schema = schema_values
                .iter()
                .any(|value| &value.name == member && value.description.is_some());
            if described_in_schema {
                return Err(DeclarationError::DuplicateEnumMemberDescription {
                    class_name: self.class_name.to_string(),
                    member: member.to_string(),
                });
            }
            descriptions.insert(member.to_string(), description.to_string());
        }
        Ok(descriptions)
    }
}

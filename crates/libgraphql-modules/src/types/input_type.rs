use crate::ast;
use crate::convert_name::convert_graphql_name_to_python;
use crate::convert_name::convert_python_name_to_graphql;
use crate::description::get_description_node;
use crate::schema::Metadata;
use crate::schema::Model;
use crate::schema::ModelKind;
use crate::schema::SchemaBuildError;
use crate::types::graphql_type::graphql_name_from_class_name;
use crate::types::graphql_type::join_names;
use crate::types::graphql_type::parse_type_definition;
use crate::types::graphql_type::validate_schema_definition;
use crate::types::type_hint::get_referenced_type;
use crate::types::type_hint::get_type_node;
use crate::types::DeclarationError;
use crate::types::DeclaredType;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::TypeHint;
use crate::types::TypeKey;
use crate::value::get_value_from_node;
use crate::value::get_value_node;
use crate::Resolved;
use indexmap::IndexMap;
use inherent::inherent;
use std::collections::HashMap;
use std::sync::Arc;

/// Options for a single field of an input declaration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFieldDecl {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) type_hint: Option<TypeHint>,
    pub(crate) default_value: Option<Resolved>,
}
impl InputFieldDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn type_hint(mut self, type_hint: impl Into<TypeHint>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<Resolved>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// A single field of a code-first input declaration.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct InputFieldData {
    name: String,
    description: Option<String>,
    type_hint: TypeHint,
    default_value: Option<Resolved>,
}

/// A built input object declaration.
pub struct InputType {
    key: TypeKey,
    class_name: String,
    graphql_name: Option<String>,
    description: Option<String>,
    schema_def: Option<ast::schema::TypeDefinition>,
    /// Attribute name -> field, for code-first declarations.
    fields: IndexMap<String, InputFieldData>,
    /// GraphQL field name -> attribute name.
    out_names: IndexMap<String, String>,
    requires: Vec<GraphQLType>,
    pub(crate) kwargs: IndexMap<String, Resolved>,
}
impl InputType {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn schema_def(&self) -> Option<&ast::schema::TypeDefinition> {
        self.schema_def.as_ref()
    }

    pub(crate) fn build_model(&self, metadata: &mut Metadata) -> Result<Model, SchemaBuildError> {
        log::trace!("building input model for `{}`", self.class_name);
        let def = match &self.schema_def {
            Some(def) => {
                let mut def = def.clone();
                if let ast::schema::TypeDefinition::InputObject(input) = &mut def
                    && input.description.is_none() {
                    input.description = get_description_node(self.description.as_deref());
                }
                def
            },
            None => {
                let mut input = ast::schema::InputObjectType::new(
                    metadata.get_declared_name(self),
                );
                input.description = get_description_node(self.description.as_deref());
                for (attr_name, field) in &self.fields {
                    let default_value = match &field.default_value {
                        Some(value) if !value.is_null() => Some(
                            validate_field_default(&self.class_name, attr_name, value)?,
                        ),
                        _ => None,
                    };
                    input.fields.push(ast::schema::InputValue {
                        position: ast::Pos::default(),
                        description: get_description_node(field.description.as_deref()),
                        name: field.name.to_string(),
                        value_type: get_type_node(
                            metadata,
                            &field.type_hint,
                            Some(self as &dyn DeclaredType),
                        )?,
                        default_value,
                        directives: vec![],
                    });
                }
                ast::schema::TypeDefinition::InputObject(input)
            },
        };

        let defaults = self.kwargs
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(attr_name, value)| (attr_name.to_string(), value.clone()))
            .collect();

        Ok(Model {
            name: ast::schema::type_def_name(&def).to_string(),
            ast: def,
            kind: ModelKind::Input {
                type_key: self.key,
                class_name: self.class_name.to_string(),
                out_names: self.out_names.clone(),
                defaults,
            },
        })
    }

    pub(crate) fn graphql_types(&self, metadata: &mut Metadata) -> Vec<GraphQLType> {
        let mut types: Vec<GraphQLType> = self.fields
            .values()
            .filter_map(|field| get_referenced_type(metadata, &field.type_hint))
            .collect();
        types.extend(self.requires.iter().cloned());
        types
    }
}

#[inherent]
impl DeclaredType for InputType {
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
        GraphQLTypeKind::InputObject
    }
}

impl std::fmt::Debug for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputType")
            .field("key", &self.key)
            .field("class_name", &self.class_name)
            .field("graphql_name", &self.graphql_name)
            .field("out_names", &self.out_names)
            .finish_non_exhaustive()
    }
}

fn validate_field_default(
    class_name: &str,
    attr_name: &str,
    value: &Resolved,
) -> Result<ast::schema::Value, DeclarationError> {
    get_value_node(value).map_err(|source| DeclarationError::UnrepresentableFieldDefault {
        class_name: class_name.to_string(),
        field_name: attr_name.to_string(),
        source,
    })
}

/// Builds input object declarations.
///
/// Input values reach resolvers as [`Instance`](crate::Instance)s whose
/// attributes are keyed by attribute name.
pub struct InputTypeBuilder {
    class_name: String,
    graphql_name: Option<String>,
    description: Option<String>,
    schema: Option<String>,
    annotations: IndexMap<String, TypeHint>,
    attributes: IndexMap<String, Resolved>,
    fields: IndexMap<String, InputFieldDecl>,
    out_names: IndexMap<String, String>,
    requires: Vec<GraphQLType>,
}
impl InputTypeBuilder {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            graphql_name: None,
            description: None,
            schema: None,
            annotations: IndexMap::new(),
            attributes: IndexMap::new(),
            fields: IndexMap::new(),
            out_names: IndexMap::new(),
            requires: vec![],
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

    pub fn annotation(mut self, attr_name: impl Into<String>, type_hint: impl Into<TypeHint>) -> Self {
        self.annotations.insert(attr_name.into(), type_hint.into());
        self
    }

    pub fn attribute(mut self, attr_name: impl Into<String>, value: impl Into<Resolved>) -> Self {
        self.attributes.insert(attr_name.into(), value.into());
        self
    }

    pub fn field(mut self, attr_name: impl Into<String>, field: InputFieldDecl) -> Self {
        self.fields.insert(attr_name.into(), field);
        self
    }

    /// Delivers the schema field `field_name` under the `attr_name`
    /// attribute. Only valid with a schema.
    pub fn out_name(mut self, field_name: impl Into<String>, attr_name: impl Into<String>) -> Self {
        self.out_names.insert(field_name.into(), attr_name.into());
        self
    }

    pub fn requires(mut self, graphql_type: &GraphQLType) -> Self {
        self.requires.push(graphql_type.clone());
        self
    }

    pub fn build(self) -> Result<GraphQLType, DeclarationError> {
        let (schema_def, fields, out_names, kwargs) = match &self.schema {
            Some(sdl) => {
                let def = parse_type_definition(&self.class_name, sdl)?;
                validate_schema_definition(
                    &self.class_name,
                    &def,
                    GraphQLTypeKind::InputObject,
                    self.graphql_name.as_deref(),
                    self.description.as_deref(),
                )?;
                let (out_names, kwargs) = self.schema_out_names(&def)?;
                (Some(def), IndexMap::new(), out_names, kwargs)
            },
            None => {
                if !self.out_names.is_empty() {
                    return Err(DeclarationError::OutNamesWithoutSchema {
                        class_name: self.class_name,
                    });
                }
                let fields = self.code_first_fields()?;
                let out_names = fields
                    .iter()
                    .map(|(attr_name, field)| (field.name.to_string(), attr_name.to_string()))
                    .collect();
                let kwargs = fields
                    .iter()
                    .map(|(attr_name, field)| (
                        attr_name.to_string(),
                        field.default_value.clone().unwrap_or_default(),
                    ))
                    .collect();
                (None, fields, out_names, kwargs)
            },
        };

        let input_type = InputType {
            key: TypeKey::next(),
            class_name: self.class_name,
            graphql_name: self.graphql_name,
            description: self.description,
            schema_def,
            fields,
            out_names,
            requires: self.requires,
            kwargs,
        };
        log::trace!("built input declaration `{}`", input_type.class_name);
        Ok(GraphQLType::Input(Arc::new(input_type)))
    }

    fn code_first_fields(&self) -> Result<IndexMap<String, InputFieldData>, DeclarationError> {
        let mut attr_names: Vec<&String> = self.annotations.keys().collect();
        for attr_name in self.fields.keys() {
            if !self.annotations.contains_key(attr_name) {
                attr_names.push(attr_name);
            }
        }

        let mut graphql_names: HashMap<String, &String> = HashMap::new();
        let mut fields = IndexMap::new();
        for attr_name in attr_names {
            let decl = self.fields.get(attr_name);
            let name = decl
                .and_then(|decl| decl.name.clone())
                .unwrap_or_else(|| convert_python_name_to_graphql(attr_name));
            if let Some(other_attr) = graphql_names.insert(name.to_string(), attr_name) {
                return Err(DeclarationError::DuplicateGraphQLFieldName {
                    class_name: self.class_name.to_string(),
                    graphql_name: name,
                    attr1: other_attr.to_string(),
                    attr2: attr_name.to_string(),
                });
            }

            let type_hint = decl
                .and_then(|decl| decl.type_hint.clone())
                .or_else(|| self.annotations.get(attr_name).cloned())
                .ok_or_else(|| DeclarationError::FieldWithoutType {
                    class_name: self.class_name.to_string(),
                    attr_name: attr_name.to_string(),
                })?;

            let default_value = decl
                .and_then(|decl| decl.default_value.clone())
                .or_else(|| self.attributes.get(attr_name).cloned());
            if let Some(value) = &default_value
                && !value.is_null() {
                validate_field_default(&self.class_name, attr_name, value)?;
            }

            fields.insert(attr_name.to_string(), InputFieldData {
                name,
                description: decl.and_then(|decl| decl.description.clone()),
                type_hint,
                default_value,
            });
        }
        Ok(fields)
    }

    /// Maps every schema field to its attribute name and default.
    #[allow(clippy::type_complexity)]
    fn schema_out_names(
        &self,
        def: &ast::schema::TypeDefinition,
    ) -> Result<(IndexMap<String, String>, IndexMap<String, Resolved>), DeclarationError> {
        let schema_fields = match def {
            ast::schema::TypeDefinition::InputObject(input) => input.fields.as_slice(),
            _ => &[],
        };
        if schema_fields.is_empty() {
            return Err(DeclarationError::SchemaTypeWithoutFields {
                class_name: self.class_name.to_string(),
                type_name: ast::schema::type_def_name(def).to_string(),
            });
        }
        if let Some(attr_name) = self.fields.keys().next() {
            return Err(DeclarationError::FieldDescriptorWithSchema {
                class_name: self.class_name.to_string(),
                attr_name: attr_name.to_string(),
            });
        }

        for field_name in self.out_names.keys() {
            if !schema_fields.iter().any(|field| &field.name == field_name) {
                let field_names: Vec<String> =
                    schema_fields.iter().map(|field| field.name.to_string()).collect();
                return Err(DeclarationError::OutNameForUndefinedField {
                    class_name: self.class_name.to_string(),
                    field_name: field_name.to_string(),
                    valid_fields: join_names(field_names.iter()),
                });
            }
        }

        let mut out_names = IndexMap::new();
        let mut kwargs = IndexMap::new();
        for field in schema_fields {
            let attr_name = self.out_names
                .get(&field.name)
                .cloned()
                .unwrap_or_else(|| convert_graphql_name_to_python(&field.name));
            if kwargs.contains_key(&attr_name) {
                return Err(DeclarationError::DuplicateOutName {
                    class_name: self.class_name.to_string(),
                    out_name: attr_name,
                });
            }
            let default = self.attributes
                .get(&attr_name)
                .cloned()
                .or_else(|| {
                    field.default_value
                        .as_ref()
                        .and_then(|value| get_value_from_node(value).ok())
                        .map(Resolved::Value)
                })
                .unwrap_or_default();
            out_names.insert(field.name.to_string(), attr_name.to_string());
            kwargs.insert(attr_name, default);
        }
        Ok((out_names, kwargs))
    }
}

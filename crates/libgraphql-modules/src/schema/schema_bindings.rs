use crate::ast;
use crate::schema::SchemaBuildError;
use crate::types::GraphQLTypeKind;
use crate::types::ParseLiteralFn;
use crate::types::ParseValueFn;
use crate::types::Resolver;
use crate::types::SerializeFn;
use crate::types::Subscriber;
use crate::types::TypeKey;
use crate::types::TypeResolverFn;
use crate::Resolved;
use async_graphql::Value;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Runtime data attached to one field.
#[derive(Clone, Default)]
pub(crate) struct FieldBinding {
    pub args: Vec<String>,
    pub resolver: Option<Resolver>,
    pub subscriber: Option<Subscriber>,
    pub alias: Option<String>,
    /// GraphQL argument name -> out-name.
    pub out_names: IndexMap<String, String>,
}

#[derive(Clone, Default)]
pub(crate) struct ObjectBinding {
    pub fields: IndexMap<String, FieldBinding>,
    pub interfaces: Vec<String>,
    pub resolve_type: Option<TypeResolverFn>,
}

#[derive(Clone, Default)]
pub(crate) struct InputBinding {
    pub fields: Vec<String>,
    pub class: Option<(TypeKey, String)>,
    /// GraphQL field name -> attribute name.
    pub out_names: IndexMap<String, String>,
    pub defaults: IndexMap<String, Resolved>,
}

#[derive(Clone)]
pub(crate) struct EnumBinding {
    pub members: IndexMap<String, Value>,
}

#[derive(Clone, Default)]
pub(crate) struct ScalarBinding {
    pub serialize: Option<SerializeFn>,
    pub parse_value: Option<ParseValueFn>,
    pub parse_literal: Option<ParseLiteralFn>,
}

#[derive(Clone, Default)]
pub(crate) struct UnionBinding {
    pub members: Vec<(TypeKey, String)>,
    pub resolve_type: Option<TypeResolverFn>,
}

#[derive(Clone)]
pub(crate) enum TypeBinding {
    Enum(EnumBinding),
    InputObject(InputBinding),
    Interface(ObjectBinding),
    Object(ObjectBinding),
    Scalar(ScalarBinding),
    Union(UnionBinding),
}
impl TypeBinding {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Enum(_) => GraphQLTypeKind::Enum.name(),
            Self::InputObject(_) => GraphQLTypeKind::InputObject.name(),
            Self::Interface(_) => GraphQLTypeKind::Interface.name(),
            Self::Object(_) => GraphQLTypeKind::Object.name(),
            Self::Scalar(_) => GraphQLTypeKind::Scalar.name(),
            Self::Union(_) => GraphQLTypeKind::Union.name(),
        }
    }
}

/// Runtime data for every type of an assembled schema document.
///
/// Bindings start out empty (default field resolution, enum values equal to
/// their names, pass-through scalars) and are filled in by models.
#[derive(Clone, Default)]
pub(crate) struct SchemaBindings {
    types: IndexMap<String, TypeBinding>,
}
impl SchemaBindings {
    pub fn from_document(document: &ast::schema::Document) -> Self {
        let mut types = IndexMap::new();
        for definition in &document.definitions {
            let ast::schema::Definition::TypeDefinition(type_def) = definition else {
                continue;
            };
            let binding = match type_def {
                ast::schema::TypeDefinition::Enum(enum_type) =>
                    TypeBinding::Enum(EnumBinding {
                        members: enum_type.values
                            .iter()
                            .map(|value| (value.name.to_string(), Value::String(value.name.to_string())))
                            .collect(),
                    }),
                ast::schema::TypeDefinition::InputObject(input) =>
                    TypeBinding::InputObject(InputBinding {
                        fields: input.fields.iter().map(|field| field.name.to_string()).collect(),
                        ..InputBinding::default()
                    }),
                ast::schema::TypeDefinition::Interface(interface) =>
                    TypeBinding::Interface(object_binding(
                        &interface.fields,
                        &interface.implements_interfaces,
                    )),
                ast::schema::TypeDefinition::Object(object) =>
                    TypeBinding::Object(object_binding(
                        &object.fields,
                        &object.implements_interfaces,
                    )),
                ast::schema::TypeDefinition::Scalar(_) =>
                    TypeBinding::Scalar(ScalarBinding::default()),
                ast::schema::TypeDefinition::Union(_) =>
                    TypeBinding::Union(UnionBinding::default()),
            };
            types.insert(ast::schema::type_def_name(type_def).to_string(), binding);
        }
        Self { types }
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeBinding> {
        self.types.get(type_name)
    }

    fn get_mut(&mut self, type_name: &str) -> Result<&mut TypeBinding> {
        self.types.get_mut(type_name).ok_or_else(|| SchemaBuildError::UndefinedTypeInSchema {
            type_name: type_name.to_string(),
        })
    }

    fn object_mut(&mut self, type_name: &str) -> Result<&mut ObjectBinding> {
        match self.get_mut(type_name)? {
            TypeBinding::Interface(object) | TypeBinding::Object(object) => Ok(object),
            other => Err(SchemaBuildError::InvalidBindingTarget {
                type_name: type_name.to_string(),
                expected: "object".to_string(),
                found: other.kind_name().to_string(),
            }),
        }
    }

    fn field_mut(&mut self, type_name: &str, field_name: &str) -> Result<&mut FieldBinding> {
        self.object_mut(type_name)?
            .fields
            .get_mut(field_name)
            .ok_or_else(|| SchemaBuildError::UndefinedFieldInSchema {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
            })
    }

    pub fn set_field_resolver(
        &mut self,
        type_name: &str,
        field_name: &str,
        resolver: Resolver,
    ) -> Result<()> {
        self.field_mut(type_name, field_name)?.resolver = Some(resolver);
        Ok(())
    }

    pub fn set_field_subscriber(
        &mut self,
        type_name: &str,
        field_name: &str,
        subscriber: Subscriber,
    ) -> Result<()> {
        self.field_mut(type_name, field_name)?.subscriber = Some(subscriber);
        Ok(())
    }

    pub fn set_field_alias(&mut self, type_name: &str, field_name: &str, attr_name: &str) -> Result<()> {
        self.field_mut(type_name, field_name)?.alias = Some(attr_name.to_string());
        Ok(())
    }

    pub fn set_arg_out_name(
        &mut self,
        type_name: &str,
        field_name: &str,
        arg_name: &str,
        out_name: &str,
    ) -> Result<()> {
        let field = self.field_mut(type_name, field_name)?;
        if !field.args.iter().any(|arg| arg == arg_name) {
            return Err(SchemaBuildError::UndefinedArgInSchema {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
                arg_name: arg_name.to_string(),
            });
        }
        field.out_names.insert(arg_name.to_string(), out_name.to_string());
        Ok(())
    }

    pub fn set_type_resolver(&mut self, type_name: &str, resolve_type: TypeResolverFn) -> Result<()> {
        match self.get_mut(type_name)? {
            TypeBinding::Interface(object) => object.resolve_type = Some(resolve_type),
            TypeBinding::Union(union_type) => union_type.resolve_type = Some(resolve_type),
            other => return Err(SchemaBuildError::InvalidBindingTarget {
                type_name: type_name.to_string(),
                expected: "abstract type".to_string(),
                found: other.kind_name().to_string(),
            }),
        }
        Ok(())
    }

    pub fn set_enum_members(&mut self, type_name: &str, members: IndexMap<String, Value>) -> Result<()> {
        match self.get_mut(type_name)? {
            TypeBinding::Enum(enum_type) => {
                enum_type.members = members;
                Ok(())
            },
            other => Err(SchemaBuildError::InvalidBindingTarget {
                type_name: type_name.to_string(),
                expected: GraphQLTypeKind::Enum.name().to_string(),
                found: other.kind_name().to_string(),
            }),
        }
    }

    pub fn set_scalar_functions(
        &mut self,
        type_name: &str,
        serialize: SerializeFn,
        parse_value: ParseValueFn,
        parse_literal: ParseLiteralFn,
    ) -> Result<()> {
        match self.get_mut(type_name)? {
            TypeBinding::Scalar(scalar) => {
                scalar.serialize = Some(serialize);
                scalar.parse_value = Some(parse_value);
                scalar.parse_literal = Some(parse_literal);
                Ok(())
            },
            other => Err(SchemaBuildError::InvalidBindingTarget {
                type_name: type_name.to_string(),
                expected: GraphQLTypeKind::Scalar.name().to_string(),
                found: other.kind_name().to_string(),
            }),
        }
    }

    pub fn set_input_binding(
        &mut self,
        type_name: &str,
        type_key: TypeKey,
        class_name: &str,
        out_names: IndexMap<String, String>,
        defaults: IndexMap<String, Resolved>,
    ) -> Result<()> {
        match self.get_mut(type_name)? {
            TypeBinding::InputObject(input) => {
                input.class = Some((type_key, class_name.to_string()));
                input.out_names = out_names;
                input.defaults = defaults;
                Ok(())
            },
            other => Err(SchemaBuildError::InvalidBindingTarget {
                type_name: type_name.to_string(),
                expected: GraphQLTypeKind::InputObject.name().to_string(),
                found: other.kind_name().to_string(),
            }),
        }
    }

    pub fn set_union_members(&mut self, type_name: &str, members: Vec<(TypeKey, String)>) -> Result<()> {
        match self.get_mut(type_name)? {
            TypeBinding::Union(union_type) => {
                union_type.members = members;
                Ok(())
            },
            other => Err(SchemaBuildError::InvalidBindingTarget {
                type_name: type_name.to_string(),
                expected: GraphQLTypeKind::Union.name().to_string(),
                found: other.kind_name().to_string(),
            }),
        }
    }

    /// Copies interface resolvers and aliases onto implementing objects'
    /// fields that have neither.
    pub fn inherit_interface_bindings(&mut self) {
        let interfaces: IndexMap<String, ObjectBinding> = self.types
            .iter()
            .filter_map(|(name, binding)| match binding {
                TypeBinding::Interface(object) => Some((name.to_string(), object.clone())),
                _ => None,
            })
            .collect();

        for binding in self.types.values_mut() {
            let object = match binding {
                TypeBinding::Interface(object) | TypeBinding::Object(object) => object,
                _ => continue,
            };
            for interface_name in object.interfaces.clone() {
                let Some(interface) = interfaces.get(&interface_name) else {
                    continue;
                };
                for (field_name, field) in object.fields.iter_mut() {
                    if field.resolver.is_some() || field.alias.is_some() {
                        continue;
                    }
                    let Some(interface_field) = interface.fields.get(field_name) else {
                        continue;
                    };
                    field.resolver = interface_field.resolver.clone();
                    field.alias = interface_field.alias.clone();
                    for (arg_name, out_name) in &interface_field.out_names {
                        field.out_names
                            .entry(arg_name.to_string())
                            .or_insert_with(|| out_name.to_string());
                    }
                }
            }
        }
    }
}

fn object_binding(fields: &[ast::schema::Field], interfaces: &[String]) -> ObjectBinding {
    ObjectBinding {
        fields: fields
            .iter()
            .map(|field| (
                field.name.to_string(),
                FieldBinding {
                    args: field.arguments.iter().map(|arg| arg.name.to_string()).collect(),
                    ..FieldBinding::default()
                },
            ))
            .collect(),
        interfaces: interfaces.to_vec(),
        resolve_type: None,
    }
}

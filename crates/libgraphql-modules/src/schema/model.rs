use crate::ast;
use crate::schema::SchemaBindings;
use crate::schema::SchemaBuildError;
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

/// The compiled form of a declaration: its SDL node plus everything needed
/// to bind it to an executable schema.
#[derive(Clone)]
pub struct Model {
    pub name: String,
    pub ast: ast::schema::TypeDefinition,
    pub kind: ModelKind,
}
impl Model {
    pub fn ast_type(&self) -> &ast::schema::TypeDefinition {
        &self.ast
    }

    /// Attaches this model's runtime data to the matching type in
    /// `bindings`.
    pub(crate) fn bind_to_schema(&self, bindings: &mut SchemaBindings) -> Result<()> {
        log::trace!("binding model `{}`", self.name);
        match &self.kind {
            ModelKind::Enum { members } =>
                bindings.set_enum_members(&self.name, members.clone()),

            ModelKind::Input { type_key, class_name, out_names, defaults } =>
                bindings.set_input_binding(
                    &self.name,
                    *type_key,
                    class_name,
                    out_names.clone(),
                    defaults.clone(),
                ),

            ModelKind::Interface(object)
                | ModelKind::Object(object)
                | ModelKind::Subscription(object) => {
                for (field_name, resolver) in &object.resolvers {
                    bindings.set_field_resolver(&self.name, field_name, resolver.clone())?;
                }
                for (field_name, subscriber) in &object.subscribers {
                    bindings.set_field_subscriber(&self.name, field_name, subscriber.clone())?;
                }
                for (field_name, attr_name) in &object.aliases {
                    bindings.set_field_alias(&self.name, field_name, attr_name)?;
                }
                for (field_name, arg_out_names) in &object.out_names {
                    for (arg_name, out_name) in arg_out_names {
                        bindings.set_arg_out_name(&self.name, field_name, arg_name, out_name)?;
                    }
                }
                if let Some(resolve_type) = &object.resolve_type {
                    bindings.set_type_resolver(&self.name, resolve_type.clone())?;
                }
                Ok(())
            },

            ModelKind::Scalar { serialize, parse_value, parse_literal } =>
                bindings.set_scalar_functions(
                    &self.name,
                    serialize.clone(),
                    parse_value.clone(),
                    parse_literal.clone(),
                ),

            ModelKind::Union { members, resolve_type } => {
                bindings.set_union_members(&self.name, members.clone())?;
                if let Some(resolve_type) = resolve_type {
                    bindings.set_type_resolver(&self.name, resolve_type.clone())?;
                }
                Ok(())
            },
        }
    }
}
impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("ast", &self.ast.to_string())
            .finish_non_exhaustive()
    }
}

/// Runtime data of an object, interface or subscription model, keyed by
/// GraphQL field name.
#[derive(Clone, Default)]
pub struct ObjectModel {
    pub resolvers: IndexMap<String, Resolver>,
    pub subscribers: IndexMap<String, Subscriber>,
    /// GraphQL field name -> attribute the field reads from.
    pub aliases: IndexMap<String, String>,
    /// GraphQL field name -> GraphQL argument name -> out-name.
    pub out_names: IndexMap<String, IndexMap<String, String>>,
    pub resolve_type: Option<TypeResolverFn>,
}

#[derive(Clone)]
pub enum ModelKind {
    Enum {
        members: IndexMap<String, Value>,
    },
    Input {
        type_key: TypeKey,
        class_name: String,
        /// GraphQL field name -> attribute name.
        out_names: IndexMap<String, String>,
        defaults: IndexMap<String, Resolved>,
    },
    Interface(ObjectModel),
    Object(ObjectModel),
    Scalar {
        serialize: SerializeFn,
        parse_value: ParseValueFn,
        parse_literal: ParseLiteralFn,
    },
    Subscription(ObjectModel),
    Union {
        members: Vec<(TypeKey, String)>,
        resolve_type: Option<TypeResolverFn>,
    },
}

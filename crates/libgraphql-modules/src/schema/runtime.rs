use crate::ast;
use crate::convert_name::convert_graphql_name_to_python;
use crate::schema::schema_bindings::EnumBinding;
use crate::schema::schema_bindings::FieldBinding;
use crate::schema::schema_bindings::InputBinding;
use crate::schema::schema_bindings::SchemaBindings;
use crate::schema::schema_bindings::TypeBinding;
use crate::schema::SchemaBuildError;
use crate::types::ResolverArgs;
use crate::types::TypeKey;
use crate::types::TypeResolverFn;
use crate::value::get_value_from_node;
use crate::value::get_value_node;
use crate::Instance;
use crate::Resolved;
use async_graphql::dynamic;
use async_graphql::dynamic::FieldFuture;
use async_graphql::dynamic::FieldValue;
use async_graphql::dynamic::ResolverContext;
use async_graphql::dynamic::SubscriptionFieldFuture;
use async_graphql::dynamic::TypeRef;
use async_graphql::Name;
use async_graphql::Value;
use futures::StreamExt;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Where an argument value came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum InputSource {
    /// Written inline in the query, or an SDL default.
    Literal,
    Variable,
}

/// A field as seen by its resolver closure.
struct FieldRuntime {
    name: String,
    field_type: ast::schema::Type,
    arg_types: IndexMap<String, ast::schema::Type>,
    binding: FieldBinding,
}

/// Converts between resolver values and engine values using the schema's
/// bindings. Shared by every resolver closure of one schema.
pub(crate) struct SchemaRuntime {
    bindings: SchemaBindings,
    input_fields: HashMap<String, IndexMap<String, ast::schema::Type>>,
    type_names: HashMap<TypeKey, String>,
}
impl SchemaRuntime {
    pub fn new(
        document: &ast::schema::Document,
        bindings: SchemaBindings,
        type_names: HashMap<TypeKey, String>,
    ) -> Self {
        let input_fields = document.definitions
            .iter()
            .filter_map(|definition| match definition {
                ast::schema::Definition::TypeDefinition(
                    ast::schema::TypeDefinition::InputObject(input),
                ) => Some((
                    input.name.to_string(),
                    input.fields
                        .iter()
                        .map(|field| (field.name.to_string(), field.value_type.clone()))
                        .collect(),
                )),
                _ => None,
            })
            .collect();

        Self {
            bindings,
            input_fields,
            type_names,
        }
    }

    /// Creates the engine schema for `document`.
    pub fn build_schema(
        self: Arc<Self>,
        document: &ast::schema::Document,
    ) -> Result<dynamic::Schema, SchemaBuildError> {
        let type_defs: Vec<&ast::schema::TypeDefinition> = document.definitions
            .iter()
            .filter_map(|definition| match definition {
                ast::schema::Definition::TypeDefinition(type_def) => Some(type_def),
                _ => None,
            })
            .collect();
        let is_defined = |name: &str| {
            type_defs.iter().any(|type_def| ast::schema::type_def_name(type_def) == name)
        };

        if !is_defined("Query") {
            return Err(SchemaBuildError::MissingQueryType);
        }
        let mut builder = dynamic::Schema::build(
            "Query",
            is_defined("Mutation").then_some("Mutation"),
            is_defined("Subscription").then_some("Subscription"),
        );
        for type_def in &type_defs {
            builder = builder.register(self.dynamic_type(type_def));
        }

        builder.finish().map_err(|err| SchemaBuildError::Engine {
            message: err.0,
        })
    }

    fn dynamic_type(self: &Arc<Self>, type_def: &ast::schema::TypeDefinition) -> dynamic::Type {
        match type_def {
            ast::schema::TypeDefinition::Enum(enum_type) => {
                let mut dynamic_enum = dynamic::Enum::new(enum_type.name.to_string());
                if let Some(description) = &enum_type.description {
                    dynamic_enum = dynamic_enum.description(description);
                }
                for value in &enum_type.values {
                    let mut item = dynamic::EnumItem::new(value.name.to_string());
                    if let Some(description) = &value.description {
                        item = item.description(description);
                    }
                    if let Some(reason) = deprecation(&value.directives) {
                        item = item.deprecation(reason.as_deref());
                    }
                    dynamic_enum = dynamic_enum.item(item);
                }
                dynamic_enum.into()
            },

            ast::schema::TypeDefinition::InputObject(input) => {
                let mut dynamic_input = dynamic::InputObject::new(input.name.to_string());
                if let Some(description) = &input.description {
                    dynamic_input = dynamic_input.description(description);
                }
                for field in &input.fields {
                    dynamic_input = dynamic_input.field(input_value(field));
                }
                dynamic_input.into()
            },

            ast::schema::TypeDefinition::Interface(interface) => {
                let mut dynamic_interface = dynamic::Interface::new(interface.name.to_string());
                if let Some(description) = &interface.description {
                    dynamic_interface = dynamic_interface.description(description);
                }
                for name in &interface.implements_interfaces {
                    dynamic_interface = dynamic_interface.implement(name.to_string());
                }
                for field in &interface.fields {
                    let mut interface_field = dynamic::InterfaceField::new(
                        field.name.to_string(),
                        type_ref(&field.field_type),
                    );
                    if let Some(description) = &field.description {
                        interface_field = interface_field.description(description);
                    }
                    if let Some(reason) = deprecation(&field.directives) {
                        interface_field = interface_field.deprecation(reason.as_deref());
                    }
                    for argument in &field.arguments {
                        interface_field = interface_field.argument(input_value(argument));
                    }
                    dynamic_interface = dynamic_interface.field(interface_field);
                }
                dynamic_interface.into()
            },

            ast::schema::TypeDefinition::Object(object) if object.name == "Subscription" => {
                let mut subscription = dynamic::Subscription::new(object.name.to_string());
                if let Some(description) = &object.description {
                    subscription = subscription.description(description);
                }
                for field in &object.fields {
                    subscription = subscription.field(self.subscription_field(&object.name, field));
                }
                subscription.into()
            },

            ast::schema::TypeDefinition::Object(object) => {
                let mut dynamic_object = dynamic::Object::new(object.name.to_string());
                if let Some(description) = &object.description {
                    dynamic_object = dynamic_object.description(description);
                }
                for name in &object.implements_interfaces {
                    dynamic_object = dynamic_object.implement(name.to_string());
                }
                for field in &object.fields {
                    dynamic_object = dynamic_object.field(self.object_field(&object.name, field));
                }
                dynamic_object.into()
            },

            ast::schema::TypeDefinition::Scalar(scalar) => {
                let mut dynamic_scalar = dynamic::Scalar::new(scalar.name.to_string());
                if let Some(description) = &scalar.description {
                    dynamic_scalar = dynamic_scalar.description(description);
                }
                dynamic_scalar.into()
            },

            ast::schema::TypeDefinition::Union(union_type) => {
                let mut dynamic_union = dynamic::Union::new(union_type.name.to_string());
                if let Some(description) = &union_type.description {
                    dynamic_union = dynamic_union.description(description);
                }
                for name in &union_type.types {
                    dynamic_union = dynamic_union.possible_type(name.to_string());
                }
                dynamic_union.into()
            },
        }
    }

    fn field_runtime(&self, type_name: &str, field: &ast::schema::Field) -> Arc<FieldRuntime> {
        let binding = match self.bindings.get(type_name) {
            Some(TypeBinding::Interface(object) | TypeBinding::Object(object)) =>
                object.fields.get(&field.name).cloned().unwrap_or_default(),
            _ => FieldBinding::default(),
        };
        Arc::new(FieldRuntime {
            name: field.name.to_string(),
            field_type: field.field_type.clone(),
            arg_types: field.arguments
                .iter()
                .map(|arg| (arg.name.to_string(), arg.value_type.clone()))
                .collect(),
            binding,
        })
    }

    fn object_field(self: &Arc<Self>, type_name: &str, field: &ast::schema::Field) -> dynamic::Field {
        let runtime = self.clone();
        let field_runtime = self.field_runtime(type_name, field);
        let mut dynamic_field = dynamic::Field::new(
            field.name.to_string(),
            type_ref(&field.field_type),
            move |ctx| {
                let result = runtime.resolve_field(&ctx, &field_runtime);
                FieldFuture::new(async move { result })
            },
        );
        if let Some(description) = &field.description {
            dynamic_field = dynamic_field.description(description);
        }
        if let Some(reason) = deprecation(&field.directives) {
            dynamic_field = dynamic_field.deprecation(reason.as_deref());
        }
        for argument in &field.arguments {
            dynamic_field = dynamic_field.argument(input_value(argument));
        }
        dynamic_field
    }

    fn subscription_field(
        self: &Arc<Self>,
        type_name: &str,
        field: &ast::schema::Field,
    ) -> dynamic::SubscriptionField {
        let runtime = self.clone();
        let field_runtime = self.field_runtime(type_name, field);
        let mut subscription_field = dynamic::SubscriptionField::new(
            field.name.to_string(),
            type_ref(&field.field_type),
            move |ctx| {
                let runtime = runtime.clone();
                let field = field_runtime.clone();
                let result = runtime.subscribe(&ctx, &field).map(|(events, args)| {
                    events.map(move |event| runtime.event_value(&field, &args, event))
                });
                SubscriptionFieldFuture::new(async move { result })
            },
        );
        if let Some(description) = &field.description {
            subscription_field = subscription_field.description(description);
        }
        if let Some(reason) = deprecation(&field.directives) {
            subscription_field = subscription_field.deprecation(reason.as_deref());
        }
        for argument in &field.arguments {
            subscription_field = subscription_field.argument(input_value(argument));
        }
        subscription_field
    }

    fn resolve_field<'a>(
        &self,
        ctx: &ResolverContext<'a>,
        field: &FieldRuntime,
    ) -> async_graphql::Result<Option<FieldValue<'a>>> {
        let parent = parent_value(ctx.parent_value);
        let value = match &field.binding.resolver {
            Some(resolver) => {
                let args = self.resolver_args(ctx, field)?;
                resolver.call(&parent, &args)?
            },
            None => default_resolve(&parent, &field.name, field.binding.alias.as_deref()),
        };
        Ok(self.output(&field.field_type, value)?)
    }

    fn subscribe(
        &self,
        ctx: &ResolverContext<'_>,
        field: &FieldRuntime,
    ) -> async_graphql::Result<(crate::types::EventStream, ResolverArgs)> {
        let Some(subscriber) = &field.binding.subscriber else {
            return Err(async_graphql::Error::new(format!(
                "Subscription field '{}' has no subscriber",
                field.name,
            )));
        };
        let parent = parent_value(ctx.parent_value);
        let args = self.resolver_args(ctx, field)?;
        let events = subscriber.subscribe(&parent, &args)?;
        log::trace!("subscribed to `{}`", field.name);
        Ok((events, args))
    }

    /// Runs one subscription event through the field's resolver, if any.
    fn event_value<'a>(
        &self,
        field: &FieldRuntime,
        args: &ResolverArgs,
        event: anyhow::Result<Resolved>,
    ) -> async_graphql::Result<FieldValue<'a>> {
        let event = event?;
        let value = match &field.binding.resolver {
            Some(resolver) => resolver.call(&event, args)?,
            None => event,
        };
        Ok(self.output(&field.field_type, value)?.unwrap_or(FieldValue::NULL))
    }

    fn resolver_args(
        &self,
        ctx: &ResolverContext<'_>,
        field: &FieldRuntime,
    ) -> anyhow::Result<ResolverArgs> {
        let mut args = ResolverArgs::new();
        for (arg_name, accessor) in ctx.args.iter() {
            let arg_name = arg_name.as_str();
            let value = accessor.as_value();
            // Absent arguments were filled from their SDL default.
            let source = match ctx.ctx.item.node.get_argument(arg_name) {
                Some(raw) if raw.node.clone().into_const().is_none() => InputSource::Variable,
                _ => InputSource::Literal,
            };
            let resolved = match field.arg_types.get(arg_name) {
                Some(arg_type) => self.input(arg_type, value, source)?,
                None => Resolved::Value(value.clone()),
            };
            let out_name = field.binding.out_names
                .get(arg_name)
                .map(String::as_str)
                .unwrap_or(arg_name);
            args.insert(out_name.to_string(), resolved);
        }
        Ok(args)
    }

    /// Converts an engine input value into the value resolvers see.
    ///
    /// Custom scalars parse literals with their `parse_literal` function and
    /// variables with `parse_value`.
    pub fn input(
        &self,
        input_type: &ast::schema::Type,
        value: &Value,
        source: InputSource,
    ) -> anyhow::Result<Resolved> {
        if let Value::Null = value {
            return Ok(Resolved::Null);
        }
        match input_type {
            ast::schema::Type::NonNullType(inner) => self.input(inner, value, source),
            ast::schema::Type::ListType(inner) => match value {
                Value::List(items) => Ok(Resolved::List(
                    items
                        .iter()
                        .map(|item| self.input(inner, item, source))
                        .collect::<anyhow::Result<_>>()?,
                )),
                item => Ok(Resolved::List(vec![self.input(inner, item, source)?])),
            },
            ast::schema::Type::NamedType(type_name) => match self.bindings.get(type_name) {
                Some(TypeBinding::Enum(enum_type)) => input_enum(type_name, enum_type, value),
                Some(TypeBinding::InputObject(input)) =>
                    self.input_object(type_name, input, value, source),
                Some(TypeBinding::Scalar(scalar)) => match (source, &scalar.parse_literal, &scalar.parse_value) {
                    (InputSource::Literal, Some(parse_literal), _) =>
                        parse_literal(&get_value_node(&Resolved::Value(value.clone()))?),
                    (_, _, Some(parse_value)) => parse_value(value),
                    _ => Ok(Resolved::Value(value.clone())),
                },
                _ => Ok(Resolved::Value(value.clone())),
            },
        }
    }

    fn input_object(
        &self,
        type_name: &str,
        input: &InputBinding,
        value: &Value,
        source: InputSource,
    ) -> anyhow::Result<Resolved> {
        let Value::Object(fields) = value else {
            anyhow::bail!("Expected an object value for input type '{type_name}', got {value}");
        };
        let Some((type_key, class_name)) = &input.class else {
            return Ok(Resolved::Value(value.clone()));
        };
        let field_types = self.input_fields.get(type_name);

        let mut attrs = IndexMap::new();
        for field_name in &input.fields {
            let attr_name = input.out_names
                .get(field_name)
                .cloned()
                .unwrap_or_else(|| field_name.to_string());
            let resolved = match fields.get(field_name.as_str()) {
                Some(field_value) => match field_types.and_then(|types| types.get(field_name)) {
                    Some(field_type) => self.input(field_type, field_value, source)?,
                    None => Resolved::Value(field_value.clone()),
                },
                None => input.defaults.get(&attr_name).cloned().unwrap_or_default(),
            };
            attrs.insert(attr_name, resolved);
        }
        for (attr_name, default) in &input.defaults {
            attrs.entry(attr_name.to_string()).or_insert_with(|| default.clone());
        }

        Ok(Resolved::Instance(Instance::new(*type_key, class_name, attrs)))
    }

    /// Converts a resolver value into the engine's output value for
    /// `output_type`. Null becomes `None`.
    pub fn output<'a>(
        &self,
        output_type: &ast::schema::Type,
        value: Resolved,
    ) -> anyhow::Result<Option<FieldValue<'a>>> {
        if value.is_null() {
            return Ok(None);
        }
        match output_type {
            ast::schema::Type::NonNullType(inner) => self.output(inner, value),
            ast::schema::Type::ListType(inner) => {
                let items = match value {
                    Resolved::List(items) => items,
                    Resolved::Value(Value::List(items)) =>
                        items.into_iter().map(Resolved::Value).collect(),
                    other => anyhow::bail!("Expected a list value, got {other:?}"),
                };
                let values = items
                    .into_iter()
                    .map(|item| Ok(self.output(inner, item)?.unwrap_or(FieldValue::NULL)))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Ok(Some(FieldValue::list(values)))
            },
            ast::schema::Type::NamedType(type_name) =>
                self.output_named(type_name, value).map(Some),
        }
    }

    fn output_named<'a>(&self, type_name: &str, value: Resolved) -> anyhow::Result<FieldValue<'a>> {
        match self.bindings.get(type_name) {
            None => Ok(FieldValue::value(to_value(&value)?)),
            Some(TypeBinding::Scalar(scalar)) => Ok(FieldValue::value(match &scalar.serialize {
                Some(serialize) => serialize(&value)?,
                None => to_value(&value)?,
            })),
            Some(TypeBinding::Enum(enum_type)) => Ok(FieldValue::value(Value::Enum(
                Name::new(output_enum(type_name, enum_type, &value)?),
            ))),
            Some(TypeBinding::Object(_)) => Ok(FieldValue::owned_any(value)),
            Some(TypeBinding::Interface(interface)) => {
                let object_name = self.resolve_abstract_type(
                    type_name,
                    interface.resolve_type.as_ref(),
                    &[],
                    &value,
                )?;
                Ok(FieldValue::owned_any(value).with_type(object_name))
            },
            Some(TypeBinding::Union(union_type)) => {
                let object_name = self.resolve_abstract_type(
                    type_name,
                    union_type.resolve_type.as_ref(),
                    &union_type.members,
                    &value,
                )?;
                Ok(FieldValue::owned_any(value).with_type(object_name))
            },
            Some(TypeBinding::InputObject(_)) =>
                anyhow::bail!("Input type '{type_name}' can't be used as an output type"),
        }
    }

    /// Picks the object type of an interface or union value: a custom type
    /// resolver wins, then the declaration that created the value, then a
    /// `__typename` entry.
    fn resolve_abstract_type(
        &self,
        type_name: &str,
        resolve_type: Option<&TypeResolverFn>,
        members: &[(TypeKey, String)],
        value: &Resolved,
    ) -> anyhow::Result<String> {
        if let Some(resolve_type) = resolve_type {
            return resolve_type(value);
        }
        if let Some(type_key) = value.type_key() {
            let member_name = members
                .iter()
                .find(|(member_key, _)| *member_key == type_key)
                .map(|(_, name)| name)
                .or_else(|| self.type_names.get(&type_key));
            if let Some(name) = member_name {
                return Ok(name.to_string());
            }
        }
        if let Some(name) = value
            .field("__typename")
            .and_then(|typename| typename.as_str().map(str::to_string)) {
            return Ok(name);
        }
        anyhow::bail!("Cannot resolve GraphQL type of '{type_name}' value {value:?}")
    }
}

fn input_enum(type_name: &str, enum_type: &EnumBinding, value: &Value) -> anyhow::Result<Resolved> {
    let member = match value {
        Value::Enum(name) => name.as_str(),
        Value::String(name) => name.as_str(),
        other => anyhow::bail!("'{other}' is not a valid value of enum '{type_name}'"),
    };
    enum_type.members
        .get(member)
        .cloned()
        .map(Resolved::Value)
        .ok_or_else(|| anyhow::anyhow!("'{member}' is not a member of enum '{type_name}'"))
}

fn output_enum(type_name: &str, enum_type: &EnumBinding, value: &Resolved) -> anyhow::Result<String> {
    let value = to_value(value)?;
    if let Some((member, _)) = enum_type.members.iter().find(|(_, member_value)| **member_value == value) {
        return Ok(member.to_string());
    }
    match &value {
        Value::Enum(name) if enum_type.members.contains_key(name.as_str()) =>
            Ok(name.to_string()),
        Value::String(name) if enum_type.members.contains_key(name) =>
            Ok(name.to_string()),
        other => anyhow::bail!("'{other}' is not a valid value of enum '{type_name}'"),
    }
}

/// Reads a field off the parent for fields without a resolver: the alias
/// target, else the GraphQL name, else its snake_case form.
fn default_resolve(parent: &Resolved, field_name: &str, alias: Option<&str>) -> Resolved {
    if let Some(alias) = alias {
        return parent.field(alias).unwrap_or_default();
    }
    parent
        .field(field_name)
        .or_else(|| parent.field(&convert_graphql_name_to_python(field_name)))
        .unwrap_or_default()
}

fn parent_value(parent: &FieldValue<'_>) -> Resolved {
    if let Some(resolved) = parent.downcast_ref::<Resolved>() {
        return resolved.clone();
    }
    match parent.as_value() {
        Some(value) => Resolved::Value(value.clone()),
        None => Resolved::Null,
    }
}

fn to_value(value: &Resolved) -> anyhow::Result<Value> {
    Ok(match value {
        Resolved::Null => Value::Null,
        Resolved::Value(value) => value.clone(),
        Resolved::List(items) => Value::List(
            items.iter().map(to_value).collect::<anyhow::Result<_>>()?,
        ),
        Resolved::Instance(instance) => Value::Object(
            instance.attrs()
                .iter()
                .map(|(attr_name, attr)| Ok((Name::new(attr_name), to_value(attr)?)))
                .collect::<anyhow::Result<_>>()?,
        ),
        Resolved::Scalar(scalar) => match scalar.downcast_ref::<Value>() {
            Some(value) => value.clone(),
            None => anyhow::bail!("Cannot convert {scalar:?} into a GraphQL value"),
        },
    })
}

fn type_ref(graphql_type: &ast::schema::Type) -> TypeRef {
    match graphql_type {
        ast::schema::Type::NamedType(name) => TypeRef::Named(name.to_string().into()),
        ast::schema::Type::ListType(inner) => TypeRef::List(Box::new(type_ref(inner))),
        ast::schema::Type::NonNullType(inner) => TypeRef::NonNull(Box::new(type_ref(inner))),
    }
}

fn input_value(input: &ast::schema::InputValue) -> dynamic::InputValue {
    let mut input_value = dynamic::InputValue::new(input.name.to_string(), type_ref(&input.value_type));
    if let Some(description) = &input.description {
        input_value = input_value.description(description);
    }
    if let Some(default_value) = &input.default_value {
        match get_value_from_node(default_value) {
            Ok(value) => input_value = input_value.default_value(value),
            Err(err) => log::warn!(
                "ignoring default value of `{}`: {err}",
                input.name,
            ),
        }
    }
    if let Some(reason) = deprecation(&input.directives) {
        input_value = input_value.deprecation(reason.as_deref());
    }
    input_value
}

/// The `@deprecated` reason of a schema element: `None` when it isn't
/// deprecated, `Some(None)` when it is deprecated without a reason.
fn deprecation(directives: &[ast::schema::Directive]) -> Option<Option<String>> {
    let directive = directives.iter().find(|directive| directive.name == "deprecated")?;
    let reason = directive.arguments
        .iter()
        .find(|(name, _)| name == "reason")
        .and_then(|(_, value)| match value {
            ast::schema::Value::String(reason) => Some(reason.to_string()),
            _ => None,
        });
    Some(reason)
}

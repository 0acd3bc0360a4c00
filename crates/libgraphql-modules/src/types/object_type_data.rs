use crate::ast;
use crate::convert_name::convert_python_name_to_graphql;
use crate::types::field::field_args_from_params;
use crate::types::field::update_field_args_options;
use crate::types::graphql_type::join_names;
use crate::types::ArgOptions;
use crate::types::DeclarationError;
use crate::types::FieldArg;
use crate::types::FieldDecl;
use crate::types::GraphQLTypeKind;
use crate::types::Param;
use crate::types::Resolver;
use crate::types::ResolverDecl;
use crate::types::Subscriber;
use crate::types::SubscriberDecl;
use crate::types::TypeHint;
use crate::value::get_value_node;
use crate::Resolved;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashSet;

type Result<T> = std::result::Result<T, DeclarationError>;

/// Everything an object-like declaration (or mixin) declares about its
/// fields.
#[derive(Clone, Debug, Default)]
pub(crate) struct ObjectMembers {
    pub annotations: IndexMap<String, TypeHint>,
    pub attributes: IndexMap<String, Resolved>,
    pub fields: IndexMap<String, FieldDecl>,
    pub resolvers: Vec<ResolverDecl>,
    pub subscribers: Vec<SubscriberDecl>,
    pub aliases: IndexMap<String, String>,
}
impl ObjectMembers {
    /// Layers `other` on top of these members.
    ///
    /// A resolver (or subscriber) declared by `other` replaces any inherited
    /// one that targets the same field.
    pub fn overlay(&mut self, other: &ObjectMembers) {
        self.annotations.extend(other.annotations.clone());
        self.attributes.extend(other.attributes.clone());
        self.fields.extend(other.fields.clone());
        self.aliases.extend(other.aliases.clone());

        let resolved_fields: HashSet<&str> =
            other.resolvers.iter().map(|r| r.field.as_str()).collect();
        self.resolvers.retain(|r| !resolved_fields.contains(r.field.as_str()));
        self.resolvers.extend(other.resolvers.iter().cloned());

        let subscribed_fields: HashSet<&str> =
            other.subscribers.iter().map(|s| s.field.as_str()).collect();
        self.subscribers.retain(|s| !subscribed_fields.contains(s.field.as_str()));
        self.subscribers.extend(other.subscribers.iter().cloned());
    }
}

/// A single field of a code-first object-like declaration.
#[derive(Clone, Debug)]
pub struct ObjectFieldData {
    pub attr_name: String,
    pub name: String,
    pub description: Option<String>,
    pub type_hint: TypeHint,
    pub args: IndexMap<String, FieldArg>,
    pub resolver: Option<Resolver>,
    pub subscriber: Option<Subscriber>,
    pub default_value: Option<Resolved>,
}

/// The field table of a code-first object-like declaration, keyed by
/// attribute name.
#[derive(Clone, Debug, Default)]
pub struct ObjectTypeData {
    pub fields: IndexMap<String, ObjectFieldData>,
    /// Attribute name -> the attribute the field's value is read from.
    pub aliases: IndexMap<String, String>,
}
impl ObjectTypeData {
    /// Validates code-first members and extracts the field table from them.
    pub(crate) fn extract(
        class_name: &str,
        kind: GraphQLTypeKind,
        members: &ObjectMembers,
    ) -> Result<Self> {
        let field_attrs = collect_field_attrs(members);
        let valid_fields = || join_names(field_attrs.iter());

        let mut graphql_names: IndexMap<String, String> = IndexMap::new();
        for attr_name in &field_attrs {
            let graphql_name = members.fields
                .get(attr_name)
                .and_then(|field| field.name.clone())
                .unwrap_or_else(|| convert_python_name_to_graphql(attr_name));
            if let Some(existing_attr) = graphql_names.get(&graphql_name) {
                return Err(DeclarationError::DuplicateGraphQLFieldName {
                    class_name: class_name.to_string(),
                    graphql_name,
                    attr1: existing_attr.to_string(),
                    attr2: attr_name.to_string(),
                });
            }
            graphql_names.insert(graphql_name, attr_name.to_string());
        }

        for resolver in &members.resolvers {
            if !field_attrs.contains(&resolver.field) {
                return Err(DeclarationError::ResolverForUndefinedField {
                    class_name: class_name.to_string(),
                    field_name: resolver.field.to_string(),
                    valid_fields: valid_fields(),
                });
            }
        }

        for subscriber in &members.subscribers {
            if kind != GraphQLTypeKind::Subscription {
                return Err(DeclarationError::SubscriberOnNonSubscription {
                    class_name: class_name.to_string(),
                    field_name: subscriber.field.to_string(),
                });
            }
            if !field_attrs.contains(&subscriber.field) {
                return Err(DeclarationError::SubscriberForUndefinedField {
                    class_name: class_name.to_string(),
                    field_name: subscriber.field.to_string(),
                    valid_fields: valid_fields(),
                });
            }
        }

        let mut fields = IndexMap::new();
        for (graphql_name, attr_name) in graphql_names {
            let field = extract_field(class_name, members, attr_name, graphql_name)?;
            fields.insert(field.attr_name.to_string(), field);
        }

        for (field_name, target) in &members.aliases {
            let Some(field) = fields.get(field_name) else {
                return Err(DeclarationError::AliasForUndefinedField {
                    class_name: class_name.to_string(),
                    field_name: field_name.to_string(),
                    valid_fields: valid_fields(),
                });
            };
            if field.resolver.is_some() {
                return Err(DeclarationError::AliasForResolvedField {
                    class_name: class_name.to_string(),
                    field_name: field_name.to_string(),
                });
            }
            log::trace!("`{class_name}.{field_name}` aliases `{target}`");
        }

        Ok(Self {
            fields,
            aliases: members.aliases.clone(),
        })
    }

    /// The keyword arguments instances of the declaration accept, with
    /// their defaults.
    pub(crate) fn instance_kwargs(&self) -> IndexMap<String, Resolved> {
        self.fields
            .values()
            .map(|field| {
                let attr_name = self.aliases
                    .get(&field.attr_name)
                    .unwrap_or(&field.attr_name);
                (
                    attr_name.to_string(),
                    field.default_value.clone().unwrap_or_default(),
                )
            })
            .collect()
    }
}

/// Annotated attributes first, then attributes that only carry a field
/// descriptor. Alias targets are not fields unless they carry a field
/// descriptor.
fn collect_field_attrs(members: &ObjectMembers) -> IndexSet<String> {
    let alias_targets: HashSet<&str> =
        members.aliases.values().map(String::as_str).collect();

    members.annotations
        .keys()
        .chain(members.fields.keys())
        .filter(|attr_name| {
            !alias_targets.contains(attr_name.as_str())
                || members.fields.contains_key(attr_name.as_str())
        })
        .cloned()
        .collect()
}

fn extract_field(
    class_name: &str,
    members: &ObjectMembers,
    attr_name: String,
    graphql_name: String,
) -> Result<ObjectFieldData> {
    let field_decl = members.fields.get(&attr_name);
    let resolver_decls: Vec<&ResolverDecl> = members.resolvers
        .iter()
        .filter(|resolver| resolver.field == attr_name)
        .collect();
    let subscriber_decls: Vec<&SubscriberDecl> = members.subscribers
        .iter()
        .filter(|subscriber| subscriber.field == attr_name)
        .collect();

    let resolvers_count = resolver_decls.len()
        + usize::from(field_decl.is_some_and(|f| f.resolver.is_some()));
    if resolvers_count > 1 {
        return Err(DeclarationError::MultipleResolvers {
            class_name: class_name.to_string(),
            field_name: attr_name,
        });
    }
    if subscriber_decls.len() > 1 {
        return Err(DeclarationError::MultipleSubscribers {
            class_name: class_name.to_string(),
            field_name: attr_name,
        });
    }
    let resolver_decl = resolver_decls.first().copied();
    let subscriber_decl = subscriber_decls.first().copied();

    let descriptions: Vec<&String> = [
        field_decl.and_then(|f| f.description.as_ref()),
        resolver_decl.and_then(|r| r.description.as_ref()),
        subscriber_decl.and_then(|s| s.description.as_ref()),
    ].into_iter().flatten().collect();
    if descriptions.len() > 1 {
        return Err(DeclarationError::MultipleFieldDescriptions {
            class_name: class_name.to_string(),
            field_name: attr_name,
        });
    }

    let resolver_args_options: Vec<&IndexMap<String, ArgOptions>> = [
        field_decl.and_then(|f| f.args.as_ref()),
        resolver_decl.and_then(|r| r.args.as_ref()),
    ].into_iter().flatten().collect();
    if resolver_args_options.len() > 1 {
        return Err(DeclarationError::MultipleArgOptions {
            class_name: class_name.to_string(),
            field_name: attr_name,
        });
    }

    let type_hint = field_decl
        .and_then(FieldDecl::field_type)
        .or_else(|| members.annotations.get(&attr_name))
        .or_else(|| resolver_decl.and_then(ResolverDecl::field_type))
        .or_else(|| subscriber_decl.and_then(SubscriberDecl::field_type))
        .cloned()
        .ok_or_else(|| DeclarationError::FieldWithoutType {
            class_name: class_name.to_string(),
            attr_name: attr_name.to_string(),
        })?;

    let resolver = field_decl
        .and_then(|f| f.resolver.clone())
        .or_else(|| resolver_decl.map(|r| r.resolver.clone()));
    let subscriber = subscriber_decl.map(|s| s.subscriber.clone());

    // A subscriber's arguments replace its resolver's.
    let mut args = IndexMap::new();
    if let Some(resolver) = &resolver {
        let options = resolver_args_options.first().copied();
        validate_params(class_name, &attr_name, resolver.params())?;
        validate_args_options(class_name, &attr_name, resolver.params(), options)?;
        args = update_field_args_options(
            field_args_from_params(resolver.params()),
            options,
        );
    }
    if let Some(subscriber) = &subscriber {
        let options = subscriber_decl.and_then(|s| s.args.as_ref());
        validate_params(class_name, &attr_name, subscriber.params())?;
        validate_args_options(class_name, &attr_name, subscriber.params(), options)?;
        args = update_field_args_options(
            field_args_from_params(subscriber.params()),
            options,
        );
    }
    validate_arg_names(
        class_name,
        &attr_name,
        args.values().map(|field_arg| field_arg.name.as_str()),
    )?;

    for field_arg in args.values() {
        if field_arg.type_hint.is_none() {
            return Err(DeclarationError::ArgWithoutType {
                class_name: class_name.to_string(),
                field_name: attr_name,
                arg_name: field_arg.out_name.to_string(),
            });
        }
        if let Some(default_value) = &field_arg.default_value {
            validate_arg_default(class_name, &attr_name, &field_arg.out_name, default_value)?;
        }
    }

    let default_value = members.attributes
        .get(&attr_name)
        .or_else(|| field_decl.and_then(|f| f.default_value.as_ref()))
        .cloned();

    Ok(ObjectFieldData {
        name: graphql_name,
        description: descriptions.first().map(|d| d.to_string()),
        type_hint,
        args,
        resolver,
        subscriber,
        default_value,
        attr_name,
    })
}

fn validate_params(class_name: &str, field_name: &str, params: &[Param]) -> Result<()> {
    let mut seen = HashSet::new();
    for param in params {
        if !seen.insert(param.name.as_str()) {
            return Err(DeclarationError::DuplicateParam {
                class_name: class_name.to_string(),
                field_name: field_name.to_string(),
                param_name: param.name.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_arg_names<'a>(
    class_name: &str,
    field_name: &str,
    arg_names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for arg_name in arg_names {
        if !seen.insert(arg_name) {
            return Err(DeclarationError::DuplicateArgName {
                class_name: class_name.to_string(),
                field_name: field_name.to_string(),
                arg_name: arg_name.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_args_options(
    class_name: &str,
    field_name: &str,
    params: &[Param],
    options: Option<&IndexMap<String, ArgOptions>>,
) -> Result<()> {
    let Some(options) = options else {
        return Ok(());
    };

    for (param_name, arg_options) in options {
        if !params.iter().any(|param| &param.name == param_name) {
            return Err(DeclarationError::ArgOptionsForUndefinedParam {
                class_name: class_name.to_string(),
                field_name: field_name.to_string(),
                param_name: param_name.to_string(),
                expected: params.iter()
                    .map(|param| param.name.as_str())
                    .collect::<Vec<_>>()
                    .join("', '"),
            });
        }
        if let Some(default_value) = &arg_options.default_value {
            validate_arg_default(class_name, field_name, param_name, default_value)?;
        }
    }
    Ok(())
}

pub(crate) fn validate_arg_default(
    class_name: &str,
    field_name: &str,
    arg_name: &str,
    default_value: &Resolved,
) -> Result<ast::schema::Value> {
    get_value_node(default_value).map_err(|source| {
        DeclarationError::UnrepresentableArgDefault {
            class_name: class_name.to_string(),
            field_name: field_name.to_string(),
            arg_name: arg_name.to_string(),
            source,
        }
    })
}

/// Validates the members of a schema-first object-like declaration against
/// its parsed definition's fields.
///
/// Resolvers, subscribers, aliases and argument options target fields and
/// arguments by their GraphQL names.
pub(crate) fn validate_object_type_with_schema(
    class_name: &str,
    kind: GraphQLTypeKind,
    type_name: &str,
    schema_fields: &[ast::schema::Field],
    members: &ObjectMembers,
) -> Result<()> {
    if schema_fields.is_empty() {
        return Err(DeclarationError::SchemaTypeWithoutFields {
            class_name: class_name.to_string(),
            type_name: type_name.to_string(),
        });
    }

    if let Some(attr_name) = members.fields.keys().next() {
        return Err(DeclarationError::FieldDescriptorWithSchema {
            class_name: class_name.to_string(),
            attr_name: attr_name.to_string(),
        });
    }

    for field in schema_fields {
        validate_arg_names(
            class_name,
            &field.name,
            field.arguments.iter().map(|arg| arg.name.as_str()),
        )?;
    }

    let field_names: Vec<&String> = schema_fields.iter().map(|f| &f.name).collect();
    let valid_fields = || join_names(field_names.iter().copied());
    let find_field = |name: &str| schema_fields.iter().find(|f| f.name == name);

    let mut resolved_fields: HashSet<&str> = HashSet::new();
    for resolver in &members.resolvers {
        let Some(field) = find_field(&resolver.field) else {
            return Err(DeclarationError::ResolverForUndefinedField {
                class_name: class_name.to_string(),
                field_name: resolver.field.to_string(),
                valid_fields: valid_fields(),
            });
        };
        if !resolved_fields.insert(resolver.field.as_str()) {
            return Err(DeclarationError::MultipleResolvers {
                class_name: class_name.to_string(),
                field_name: resolver.field.to_string(),
            });
        }
        validate_schema_field_options(
            class_name,
            field,
            resolver.description.as_ref(),
            resolver.args.as_ref(),
            resolver.resolver.params(),
        )?;
    }

    let mut subscribed_fields: HashSet<&str> = HashSet::new();
    for subscriber in &members.subscribers {
        if kind != GraphQLTypeKind::Subscription {
            return Err(DeclarationError::SubscriberOnNonSubscription {
                class_name: class_name.to_string(),
                field_name: subscriber.field.to_string(),
            });
        }
        let Some(field) = find_field(&subscriber.field) else {
            return Err(DeclarationError::SubscriberForUndefinedField {
                class_name: class_name.to_string(),
                field_name: subscriber.field.to_string(),
                valid_fields: valid_fields(),
            });
        };
        if !subscribed_fields.insert(subscriber.field.as_str()) {
            return Err(DeclarationError::MultipleSubscribers {
                class_name: class_name.to_string(),
                field_name: subscriber.field.to_string(),
            });
        }
        validate_schema_field_options(
            class_name,
            field,
            subscriber.description.as_ref(),
            subscriber.args.as_ref(),
            subscriber.subscriber.params(),
        )?;
    }

    for field_name in members.aliases.keys() {
        if find_field(field_name).is_none() {
            return Err(DeclarationError::AliasForUndefinedField {
                class_name: class_name.to_string(),
                field_name: field_name.to_string(),
                valid_fields: valid_fields(),
            });
        }
        if resolved_fields.contains(field_name.as_str()) {
            return Err(DeclarationError::AliasForResolvedField {
                class_name: class_name.to_string(),
                field_name: field_name.to_string(),
            });
        }
    }

    Ok(())
}

fn validate_schema_field_options(
    class_name: &str,
    field: &ast::schema::Field,
    description: Option<&String>,
    args_options: Option<&IndexMap<String, ArgOptions>>,
    params: &[Param],
) -> Result<()> {
    if description.is_some() && field.description.is_some() {
        return Err(DeclarationError::MultipleFieldDescriptions {
            class_name: class_name.to_string(),
            field_name: field.name.to_string(),
        });
    }

    validate_params(class_name, &field.name, params)?;
    // Parameters are matched to arguments by camelCase name.
    validate_arg_names(
        class_name,
        &field.name,
        field_args_from_params(params).values().map(|field_arg| field_arg.name.as_str()),
    )?;

    for (arg_name, options) in args_options.into_iter().flatten() {
        let Some(arg) = field.arguments.iter().find(|arg| &arg.name == arg_name) else {
            return Err(DeclarationError::ArgOptionsForUndefinedSchemaArg {
                class_name: class_name.to_string(),
                field_name: field.name.to_string(),
                arg_name: arg_name.to_string(),
            });
        };
        if options.name.is_some() {
            return Err(DeclarationError::ArgNameOptionWithSchema {
                class_name: class_name.to_string(),
                field_name: field.name.to_string(),
                arg_name: arg_name.to_string(),
            });
        }
        if options.type_hint.is_some() {
            return Err(DeclarationError::ArgTypeOptionWithSchema {
                class_name: class_name.to_string(),
                field_name: field.name.to_string(),
                arg_name: arg_name.to_string(),
            });
        }
        if options.description.is_some() && arg.description.is_some() {
            return Err(DeclarationError::DuplicateArgDescription {
                class_name: class_name.to_string(),
                field_name: field.name.to_string(),
                arg_name: arg_name.to_string(),
            });
        }
        if let Some(default_value) = &options.default_value {
            validate_arg_default(class_name, &field.name, arg_name, default_value)?;
        }
    }

    for param in params {
        if let Some(default_value) = &param.default_value {
            validate_arg_default(class_name, &field.name, &param.name, default_value)?;
        }
    }

    Ok(())
}

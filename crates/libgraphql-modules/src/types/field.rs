use crate::convert_name::convert_python_name_to_graphql;
use crate::types::TypeHint;
use crate::Resolved;
use futures::stream::BoxStream;
use indexmap::IndexMap;
use std::sync::Arc;

/// Arguments delivered to a resolver, keyed by their out-names.
pub type ResolverArgs = IndexMap<String, Resolved>;

pub type ResolverFn = Arc<
    dyn Fn(&Resolved, &ResolverArgs) -> anyhow::Result<Resolved> + Send + Sync
>;

pub type EventStream = BoxStream<'static, anyhow::Result<Resolved>>;

pub type SubscriberFn = Arc<
    dyn Fn(&Resolved, &ResolverArgs) -> anyhow::Result<EventStream> + Send + Sync
>;

/// Picks the GraphQL object type name for an abstract (interface or union)
/// value.
pub type TypeResolverFn = Arc<
    dyn Fn(&Resolved) -> anyhow::Result<String> + Send + Sync
>;

/// A parameter of a resolver or subscriber function.
///
/// The parameter's name is its out-name: the key under which the argument
/// value is delivered in [`ResolverArgs`]. The GraphQL argument name is the
/// camelCase form of it unless overridden with [`ArgOptions::name`].
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub(crate) name: String,
    pub(crate) type_hint: Option<TypeHint>,
    pub(crate) default_value: Option<Resolved>,
}
impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            default_value: None,
        }
    }

    pub fn typed(name: impl Into<String>, type_hint: impl Into<TypeHint>) -> Self {
        Self::new(name).type_hint(type_hint)
    }

    pub fn default_value(mut self, value: impl Into<Resolved>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn type_hint(mut self, type_hint: impl Into<TypeHint>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }
}

/// A field resolver: a function of the parent value and the arguments,
/// plus the parameter list arguments are derived from.
#[derive(Clone)]
pub struct Resolver {
    pub(crate) func: ResolverFn,
    pub(crate) params: Vec<Param>,
    pub(crate) return_hint: Option<TypeHint>,
}
impl Resolver {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Resolved, &ResolverArgs) -> anyhow::Result<Resolved> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            params: vec![],
            return_hint: None,
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, type_hint: impl Into<TypeHint>) -> Self {
        self.return_hint = Some(type_hint.into());
        self
    }

    pub fn call(&self, parent: &Resolved, args: &ResolverArgs) -> anyhow::Result<Resolved> {
        (self.func)(parent, args)
    }

    pub fn params(&self) -> &[Param] {
        self.params.as_slice()
    }
}
impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("params", &self.params)
            .field("return_hint", &self.return_hint)
            .finish_non_exhaustive()
    }
}

/// The source of a subscription field's events.
#[derive(Clone)]
pub struct Subscriber {
    pub(crate) func: SubscriberFn,
    pub(crate) params: Vec<Param>,
    pub(crate) return_hint: Option<TypeHint>,
}
impl Subscriber {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Resolved, &ResolverArgs) -> anyhow::Result<EventStream> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            params: vec![],
            return_hint: None,
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, type_hint: impl Into<TypeHint>) -> Self {
        self.return_hint = Some(type_hint.into());
        self
    }

    pub fn subscribe(&self, parent: &Resolved, args: &ResolverArgs) -> anyhow::Result<EventStream> {
        (self.func)(parent, args)
    }

    pub fn params(&self) -> &[Param] {
        self.params.as_slice()
    }
}
impl std::fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber")
            .field("params", &self.params)
            .field("return_hint", &self.return_hint)
            .finish_non_exhaustive()
    }
}

/// Overrides for a single resolver parameter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgOptions {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) type_hint: Option<TypeHint>,
    pub(crate) default_value: Option<Resolved>,
}
impl ArgOptions {
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

/// An explicit field declaration attached to an attribute.
#[derive(Clone, Debug, Default)]
pub struct FieldDecl {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) type_hint: Option<TypeHint>,
    pub(crate) args: Option<IndexMap<String, ArgOptions>>,
    pub(crate) resolver: Option<Resolver>,
    pub(crate) default_value: Option<Resolved>,
}
impl FieldDecl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the GraphQL name of the field.
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

    pub fn arg(mut self, param_name: impl Into<String>, options: ArgOptions) -> Self {
        self.args
            .get_or_insert_with(IndexMap::new)
            .insert(param_name.into(), options);
        self
    }

    pub fn resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn default_value(mut self, value: impl Into<Resolved>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// The declared field type: an explicit type, else the resolver's
    /// return type.
    pub(crate) fn field_type(&self) -> Option<&TypeHint> {
        self.type_hint.as_ref().or_else(|| {
            self.resolver.as_ref().and_then(|resolver| resolver.return_hint.as_ref())
        })
    }
}

/// Binds a [`Resolver`] to a field.
///
/// Code-first declarations target the field by attribute name, schema-first
/// declarations by GraphQL field name.
#[derive(Clone, Debug)]
pub struct ResolverDecl {
    pub(crate) field: String,
    pub(crate) resolver: Resolver,
    pub(crate) description: Option<String>,
    pub(crate) args: Option<IndexMap<String, ArgOptions>>,
    pub(crate) type_hint: Option<TypeHint>,
}
impl ResolverDecl {
    pub fn new(field: impl Into<String>, resolver: Resolver) -> Self {
        Self {
            field: field.into(),
            resolver,
            description: None,
            args: None,
            type_hint: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn arg(mut self, param_name: impl Into<String>, options: ArgOptions) -> Self {
        self.args
            .get_or_insert_with(IndexMap::new)
            .insert(param_name.into(), options);
        self
    }

    pub fn type_hint(mut self, type_hint: impl Into<TypeHint>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    pub(crate) fn field_type(&self) -> Option<&TypeHint> {
        self.type_hint.as_ref().or(self.resolver.return_hint.as_ref())
    }
}

/// Binds a [`Subscriber`] to a field of a subscription declaration.
#[derive(Clone, Debug)]
pub struct SubscriberDecl {
    pub(crate) field: String,
    pub(crate) subscriber: Subscriber,
    pub(crate) description: Option<String>,
    pub(crate) args: Option<IndexMap<String, ArgOptions>>,
    pub(crate) type_hint: Option<TypeHint>,
}
impl SubscriberDecl {
    pub fn new(field: impl Into<String>, subscriber: Subscriber) -> Self {
        Self {
            field: field.into(),
            subscriber,
            description: None,
            args: None,
            type_hint: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn arg(mut self, param_name: impl Into<String>, options: ArgOptions) -> Self {
        self.args
            .get_or_insert_with(IndexMap::new)
            .insert(param_name.into(), options);
        self
    }

    pub fn type_hint(mut self, type_hint: impl Into<TypeHint>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    pub(crate) fn field_type(&self) -> Option<&TypeHint> {
        self.type_hint.as_ref().or(self.subscriber.return_hint.as_ref())
    }
}

/// A field argument, derived from a resolver parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldArg {
    pub name: String,
    pub out_name: String,
    pub type_hint: Option<TypeHint>,
    pub description: Option<String>,
    pub default_value: Option<Resolved>,
}

/// Derives one [`FieldArg`] per parameter, keyed by parameter name.
pub fn field_args_from_params(params: &[Param]) -> IndexMap<String, FieldArg> {
    params
        .iter()
        .map(|param| (
            param.name.to_string(),
            FieldArg {
                name: convert_python_name_to_graphql(&param.name),
                out_name: param.name.to_string(),
                type_hint: param.type_hint.clone(),
                description: None,
                default_value: param.default_value.clone(),
            },
        ))
        .collect()
}

/// Applies per-parameter [`ArgOptions`] to derived arguments.
///
/// Options for parameters that don't exist are ignored here; declarations
/// reject them when they are built.
pub fn update_field_args_options(
    field_args: IndexMap<String, FieldArg>,
    args_options: Option<&IndexMap<String, ArgOptions>>,
) -> IndexMap<String, FieldArg> {
    let Some(args_options) = args_options else {
        return field_args;
    };

    field_args
        .into_iter()
        .map(|(param_name, mut field_arg)| {
            if let Some(options) = args_options.get(&param_name) {
                if let Some(name) = &options.name {
                    field_arg.name = name.to_string();
                }
                if let Some(description) = &options.description {
                    field_arg.description = Some(description.to_string());
                }
                if let Some(type_hint) = &options.type_hint {
                    field_arg.type_hint = Some(type_hint.clone());
                }
                if let Some(default_value) = &options.default_value {
                    field_arg.default_value = Some(default_value.clone());
                }
            }
            (param_name, field_arg)
        })
        .collect()
}

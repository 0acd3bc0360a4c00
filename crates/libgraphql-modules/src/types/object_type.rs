use crate::ast;
use crate::convert_name::convert_graphql_name_to_python;
use crate::description::get_description_node;
use crate::schema::Metadata;
use crate::schema::Model;
use crate::schema::ModelKind;
use crate::schema::ObjectModel;
use crate::schema::SchemaBuildError;
use crate::types::field::field_args_from_params;
use crate::types::graphql_type::graphql_name_from_class_name;
use crate::types::graphql_type::parse_type_definition;
use crate::types::graphql_type::validate_schema_definition;
use crate::types::object_type_data::validate_arg_default;
use crate::types::object_type_data::validate_object_type_with_schema;
use crate::types::object_type_data::ObjectMembers;
use crate::types::object_type_data::ObjectTypeData;
use crate::types::type_hint::get_referenced_type;
use crate::types::type_hint::get_type_node;
use crate::types::ArgOptions;
use crate::types::DeclarationError;
use crate::types::DeclaredType;
use crate::types::FieldDecl;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::Param;
use crate::types::ResolverDecl;
use crate::types::SubscriberDecl;
use crate::types::TypeHint;
use crate::types::TypeKey;
use crate::types::TypeResolverFn;
use crate::Resolved;
use indexmap::IndexMap;
use inherent::inherent;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// A built object, interface or subscription declaration.
pub struct ObjectType {
    pub(crate) key: TypeKey,
    pub(crate) kind: GraphQLTypeKind,
    pub(crate) class_name: String,
    pub(crate) graphql_name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) schema_def: Option<ast::schema::TypeDefinition>,
    pub(crate) members: ObjectMembers,
    pub(crate) implements: Vec<GraphQLType>,
    pub(crate) requires: Vec<GraphQLType>,
    pub(crate) resolve_type: Option<TypeResolverFn>,
    pub(crate) kwargs: IndexMap<String, Resolved>,
}
impl ObjectType {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn implements(&self) -> &[GraphQLType] {
        self.implements.as_slice()
    }

    pub fn requires(&self) -> &[GraphQLType] {
        self.requires.as_slice()
    }

    pub fn schema_def(&self) -> Option<&ast::schema::TypeDefinition> {
        self.schema_def.as_ref()
    }

    pub(crate) fn build_model(&self, metadata: &mut Metadata) -> Result<Model> {
        log::trace!("building {} model for `{}`", self.kind, self.class_name);
        let (ast, object_model) = match &self.schema_def {
            Some(def) => self.build_model_with_schema(def)?,
            None => self.build_model_without_schema(metadata)?,
        };

        let kind = match self.kind {
            GraphQLTypeKind::Interface => ModelKind::Interface(ObjectModel {
                resolve_type: self.resolve_type.clone(),
                ..object_model
            }),
            GraphQLTypeKind::Subscription => ModelKind::Subscription(object_model),
            _ => ModelKind::Object(object_model),
        };

        Ok(Model {
            name: ast::schema::type_def_name(&ast).to_string(),
            ast,
            kind,
        })
    }

    fn build_model_with_schema(
        &self,
        def: &ast::schema::TypeDefinition,
    ) -> Result<(ast::schema::TypeDefinition, ObjectModel)> {
        let mut def = def.clone();
        let found_kind = GraphQLTypeKind::from(&def);
        let description = get_description_node(self.description.as_deref());
        let fields = match &mut def {
            ast::schema::TypeDefinition::Object(obj) => {
                obj.description = obj.description.take().or(description);
                &mut obj.fields
            },
            ast::schema::TypeDefinition::Interface(iface) => {
                iface.description = iface.description.take().or(description);
                &mut iface.fields
            },
            _ => return Err(SchemaBuildError::Declaration(
                DeclarationError::InvalidSchemaTypeKind {
                    class_name: self.class_name.to_string(),
                    expected: self.kind.to_string(),
                    found: found_kind.to_string(),
                },
            )),
        };

        let mut model = ObjectModel::default();
        for resolver in &self.members.resolvers {
            if let Some(field) = fields.iter_mut().find(|f| f.name == resolver.field) {
                merge_schema_field(
                    &self.class_name,
                    field,
                    resolver.description.as_deref(),
                    resolver.args.as_ref(),
                    resolver.resolver.params(),
                    &mut model.out_names,
                )?;
                model.resolvers.insert(field.name.to_string(), resolver.resolver.clone());
            }
        }
        for subscriber in &self.members.subscribers {
            if let Some(field) = fields.iter_mut().find(|f| f.name == subscriber.field) {
                merge_schema_field(
                    &self.class_name,
                    field,
                    subscriber.description.as_deref(),
                    subscriber.args.as_ref(),
                    subscriber.subscriber.params(),
                    &mut model.out_names,
                )?;
                model.subscribers.insert(field.name.to_string(), subscriber.subscriber.clone());
            }
        }
        for (field_name, attr_name) in &self.members.aliases {
            model.aliases.insert(field_name.to_string(), attr_name.to_string());
        }

        Ok((def, model))
    }

    fn build_model_without_schema(
        &self,
        metadata: &mut Metadata,
    ) -> Result<(ast::schema::TypeDefinition, ObjectModel)> {
        let data = metadata.get_object_data(self)?;
        let mut model = ObjectModel::default();
        let mut fields = vec![];

        for field in data.fields.values() {
            let mut arguments = vec![];
            let mut field_out_names = IndexMap::new();
            for field_arg in field.args.values() {
                let arg_type = field_arg.type_hint.as_ref().ok_or_else(|| {
                    SchemaBuildError::Declaration(DeclarationError::ArgWithoutType {
                        class_name: self.class_name.to_string(),
                        field_name: field.attr_name.to_string(),
                        arg_name: field_arg.out_name.to_string(),
                    })
                })?;
                let default_value = match &field_arg.default_value {
                    Some(value) if !value.is_null() => Some(validate_arg_default(
                        &self.class_name,
                        &field.attr_name,
                        &field_arg.out_name,
                        value,
                    )?),
                    _ => None,
                };
                arguments.push(ast::schema::InputValue {
                    position: ast::Pos::default(),
                    description: get_description_node(field_arg.description.as_deref()),
                    name: field_arg.name.to_string(),
                    value_type: get_type_node(metadata, arg_type, Some(self as &dyn DeclaredType))?,
                    default_value,
                    directives: vec![],
                });
                field_out_names.insert(field_arg.name.to_string(), field_arg.out_name.to_string());
            }

            fields.push(ast::schema::Field {
                position: ast::Pos::default(),
                description: get_description_node(field.description.as_deref()),
                name: field.name.to_string(),
                arguments,
                field_type: get_type_node(metadata, &field.type_hint, Some(self as &dyn DeclaredType))?,
                directives: vec![],
            });

            if !field_out_names.is_empty() {
                model.out_names.insert(field.name.to_string(), field_out_names);
            }
            if let Some(resolver) = &field.resolver {
                model.resolvers.insert(field.name.to_string(), resolver.clone());
            } else {
                let attr_name = data.aliases.get(&field.attr_name).unwrap_or(&field.attr_name);
                if attr_name != &field.name {
                    model.aliases.insert(field.name.to_string(), attr_name.to_string());
                }
            }
            if let Some(subscriber) = &field.subscriber {
                model.subscribers.insert(field.name.to_string(), subscriber.clone());
            }
        }

        let mut implements_interfaces = vec![];
        for interface in &self.implements {
            implements_interfaces.push(metadata.get_graphql_name(interface)?);
        }

        let name = metadata.get_declared_name(self);
        let description = get_description_node(self.description.as_deref());
        let def = match self.kind {
            GraphQLTypeKind::Interface => {
                let mut iface = ast::schema::InterfaceType::new(name);
                iface.description = description;
                iface.implements_interfaces = implements_interfaces;
                iface.fields = fields;
                ast::schema::TypeDefinition::Interface(iface)
            },
            _ => {
                let mut obj = ast::schema::ObjectType::new(name);
                obj.description = description;
                obj.implements_interfaces = implements_interfaces;
                obj.fields = fields;
                ast::schema::TypeDefinition::Object(obj)
            },
        };

        Ok((def, model))
    }

    pub(crate) fn graphql_types(&self, metadata: &mut Metadata) -> Result<Vec<GraphQLType>> {
        let mut types = vec![];
        if self.schema_def.is_none() {
            let data = metadata.get_object_data(self)?;
            for field in data.fields.values() {
                types.extend(get_referenced_type(metadata, &field.type_hint));
                for field_arg in field.args.values() {
                    if let Some(type_hint) = &field_arg.type_hint {
                        types.extend(get_referenced_type(metadata, type_hint));
                    }
                }
            }
        }
        types.extend(self.implements.iter().cloned());
        types.extend(self.requires.iter().cloned());
        Ok(types)
    }

    /// Extracts the field table of a code-first declaration.
    pub(crate) fn object_data(&self) -> std::result::Result<ObjectTypeData, DeclarationError> {
        ObjectTypeData::extract(&self.class_name, self.kind, &self.members)
    }
}

#[inherent]
impl DeclaredType for ObjectType {
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
        self.kind
    }
}

impl std::fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectType")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("class_name", &self.class_name)
            .field("graphql_name", &self.graphql_name)
            .finish_non_exhaustive()
    }
}

/// Merges resolver-provided descriptions, argument descriptions and
/// argument defaults onto a parsed schema field, and records argument
/// out-names.
///
/// Parameters are matched to schema arguments by their camelCase names.
fn merge_schema_field(
    class_name: &str,
    field: &mut ast::schema::Field,
    description: Option<&str>,
    args_options: Option<&IndexMap<String, ArgOptions>>,
    params: &[Param],
    out_names: &mut IndexMap<String, IndexMap<String, String>>,
) -> Result<()> {
    if field.description.is_none() {
        field.description = get_description_node(description);
    }

    let field_args = field_args_from_params(params);
    let field_out_names = out_names.entry(field.name.to_string()).or_default();
    for arg in field.arguments.iter_mut() {
        let options = args_options.and_then(|options| options.get(&arg.name));
        let field_arg = field_args.values().find(|field_arg| field_arg.name == arg.name);

        if let Some(field_arg) = field_arg {
            field_out_names.insert(arg.name.to_string(), field_arg.out_name.to_string());
        }

        if arg.description.is_none() {
            arg.description = get_description_node(
                options.and_then(|options| options.description.as_deref()),
            );
        }

        if arg.default_value.is_none() {
            let default_value = options
                .and_then(|options| options.default_value.as_ref())
                .or_else(|| field_arg.and_then(|field_arg| field_arg.default_value.as_ref()));
            if let Some(default_value) = default_value
                && !default_value.is_null() {
                arg.default_value = Some(validate_arg_default(
                    class_name,
                    &field.name,
                    &arg.name,
                    default_value,
                )?);
            }
        }
    }
    if field_out_names.is_empty() {
        out_names.shift_remove(&field.name);
    }
    Ok(())
}

/// Builds object, interface and subscription declarations.
///
/// ```
/// use libgraphql_modules::types::ObjectTypeBuilder;
/// use libgraphql_modules::types::TypeHint;
///
/// let user = ObjectTypeBuilder::new("UserType")
///     .annotation("id", TypeHint::Id)
///     .annotation("full_name", TypeHint::optional(TypeHint::String))
///     .build()
///     .unwrap();
/// assert_eq!(user.graphql_name(), "User");
/// ```
pub struct ObjectTypeBuilder {
    kind: GraphQLTypeKind,
    class_name: String,
    graphql_name: Option<String>,
    description: Option<String>,
    schema: Option<String>,
    inherited: ObjectMembers,
    mixed: ObjectMembers,
    own: ObjectMembers,
    implements: Vec<GraphQLType>,
    requires: Vec<GraphQLType>,
    resolve_type: Option<TypeResolverFn>,
    errors: Vec<DeclarationError>,
}
impl ObjectTypeBuilder {
    fn with_kind(kind: GraphQLTypeKind, class_name: impl Into<String>) -> Self {
        Self {
            kind,
            class_name: class_name.into(),
            graphql_name: None,
            description: None,
            schema: None,
            inherited: ObjectMembers::default(),
            mixed: ObjectMembers::default(),
            own: ObjectMembers::default(),
            implements: vec![],
            requires: vec![],
            resolve_type: None,
            errors: vec![],
        }
    }

    pub fn new(class_name: impl Into<String>) -> Self {
        Self::with_kind(GraphQLTypeKind::Object, class_name)
    }

    pub fn interface(class_name: impl Into<String>) -> Self {
        Self::with_kind(GraphQLTypeKind::Interface, class_name)
    }

    pub fn subscription(class_name: impl Into<String>) -> Self {
        Self::with_kind(GraphQLTypeKind::Subscription, class_name)
    }

    pub fn graphql_name(mut self, name: impl Into<String>) -> Self {
        self.graphql_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declares the type with SDL text holding exactly one definition.
    pub fn schema(mut self, sdl: impl Into<String>) -> Self {
        self.schema = Some(sdl.into());
        self
    }

    /// Declares a typed attribute. Annotations seed the field list, in
    /// declaration order.
    pub fn annotation(mut self, attr_name: impl Into<String>, type_hint: impl Into<TypeHint>) -> Self {
        self.own.annotations.insert(attr_name.into(), type_hint.into());
        self
    }

    /// Declares an attribute's default value.
    pub fn attribute(mut self, attr_name: impl Into<String>, value: impl Into<Resolved>) -> Self {
        self.own.attributes.insert(attr_name.into(), value.into());
        self
    }

    pub fn field(mut self, attr_name: impl Into<String>, field: FieldDecl) -> Self {
        self.own.fields.insert(attr_name.into(), field);
        self
    }

    pub fn resolver(mut self, resolver: ResolverDecl) -> Self {
        self.own.resolvers.push(resolver);
        self
    }

    pub fn subscriber(mut self, subscriber: SubscriberDecl) -> Self {
        self.own.subscribers.push(subscriber);
        self
    }

    /// Reads `field_name`'s value from the `attr_name` attribute.
    pub fn alias(mut self, field_name: impl Into<String>, attr_name: impl Into<String>) -> Self {
        self.own.aliases.insert(field_name.into(), attr_name.into());
        self
    }

    /// Inherits the fields, resolvers and aliases of another object-like
    /// declaration. Inheriting from an interface also implements it.
    ///
    /// Schema-first declarations only inherit the implemented interfaces.
    pub fn inherits(mut self, base: &GraphQLType) -> Self {
        match base {
            GraphQLType::Interface(base_type) => {
                self.inherited.overlay(&base_type.members);
                self.add_implements(base_type.implements.iter().cloned());
                self.add_implements([base.clone()]);
            },
            GraphQLType::Object(base_type) | GraphQLType::Subscription(base_type) => {
                self.inherited.overlay(&base_type.members);
                self.add_implements(base_type.implements.iter().cloned());
            },
            _ => self.errors.push(DeclarationError::InvalidBaseType {
                class_name: self.class_name.to_string(),
                base_name: base.class_name().to_string(),
                kind: base.kind().to_string(),
            }),
        }
        self
    }

    /// Implements an interface, inheriting its members when the declaration
    /// is code-first.
    pub fn implements(self, interface: &GraphQLType) -> Self {
        match interface {
            GraphQLType::Interface(_) => self.inherits(interface),
            _ => {
                let mut builder = self;
                builder.errors.push(DeclarationError::InvalidBaseType {
                    class_name: builder.class_name.to_string(),
                    base_name: interface.class_name().to_string(),
                    kind: interface.kind().to_string(),
                });
                builder
            },
        }
    }

    pub fn mixin(mut self, mixin: &ObjectTypeMixin) -> Self {
        self.mixed.overlay(&mixin.members);
        self
    }

    /// Adds a declaration to the schema whenever this one is included.
    pub fn requires(mut self, graphql_type: &GraphQLType) -> Self {
        self.requires.push(graphql_type.clone());
        self
    }

    /// Picks the object type of interface values.
    pub fn resolve_type<F>(mut self, resolve_type: F) -> Self
    where
        F: Fn(&Resolved) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.resolve_type = Some(Arc::new(resolve_type));
        self
    }

    fn add_implements(&mut self, interfaces: impl IntoIterator<Item = GraphQLType>) {
        for interface in interfaces {
            if !self.implements.contains(&interface) {
                self.implements.push(interface);
            }
        }
    }

    /// Packages the declared members as a reusable mixin instead of a type.
    pub fn build_mixin(self) -> ObjectTypeMixin {
        let mut members = self.inherited;
        members.overlay(&self.mixed);
        members.overlay(&self.own);
        ObjectTypeMixin { members }
    }

    pub fn build(self) -> std::result::Result<GraphQLType, DeclarationError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        // Schema-first declarations take their fields from the schema, so
        // only mixins contribute resolvers on top of their own.
        let mut members = match &self.schema {
            Some(_) => ObjectMembers::default(),
            None => self.inherited,
        };
        members.overlay(&self.mixed);
        members.overlay(&self.own);

        let (schema_def, kwargs) = match &self.schema {
            Some(sdl) => {
                let def = parse_type_definition(&self.class_name, sdl)?;
                let expected_kind = match self.kind {
                    GraphQLTypeKind::Interface => GraphQLTypeKind::Interface,
                    _ => GraphQLTypeKind::Object,
                };
                validate_schema_definition(
                    &self.class_name,
                    &def,
                    expected_kind,
                    self.graphql_name.as_deref(),
                    self.description.as_deref(),
                )?;
                let schema_fields = match &def {
                    ast::schema::TypeDefinition::Object(obj) => obj.fields.as_slice(),
                    ast::schema::TypeDefinition::Interface(iface) => iface.fields.as_slice(),
                    _ => &[],
                };
                validate_object_type_with_schema(
                    &self.class_name,
                    self.kind,
                    ast::schema::type_def_name(&def),
                    schema_fields,
                    &members,
                )?;
                let kwargs = schema_fields
                    .iter()
                    .map(|field| {
                        let attr_name = members.aliases
                            .get(&field.name)
                            .cloned()
                            .unwrap_or_else(|| convert_graphql_name_to_python(&field.name));
                        let default = members.attributes
                            .get(&attr_name)
                            .cloned()
                            .unwrap_or_default();
                        (attr_name, default)
                    })
                    .collect();
                (Some(def), kwargs)
            },
            None => {
                let data = ObjectTypeData::extract(&self.class_name, self.kind, &members)?;
                (None, data.instance_kwargs())
            },
        };

        let object_type = Arc::new(ObjectType {
            key: TypeKey::next(),
            kind: self.kind,
            class_name: self.class_name,
            graphql_name: self.graphql_name,
            description: self.description,
            schema_def,
            members,
            implements: self.implements,
            requires: self.requires,
            resolve_type: self.resolve_type,
            kwargs,
        });
        log::trace!("built {} declaration `{}`", object_type.kind, object_type.class_name);

        Ok(match object_type.kind {
            GraphQLTypeKind::Interface => GraphQLType::Interface(object_type),
            GraphQLTypeKind::Subscription => GraphQLType::Subscription(object_type),
            _ => GraphQLType::Object(object_type),
        })
    }
}

/// Members shared between declarations without being a type of their own.
#[derive(Clone, Debug)]
pub struct ObjectTypeMixin {
    members: ObjectMembers,
}

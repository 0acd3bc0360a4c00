use super::utils::build_model;
use super::utils::model_sdl;
use crate::ast;
use crate::schema::ModelKind;
use crate::schema::ObjectModel;
use crate::types::ArgOptions;
use crate::types::DeclarationError;
use crate::types::FieldDecl;
use crate::types::GraphQLType;
use crate::types::ObjectTypeBuilder;
use crate::types::Param;
use crate::types::Resolver;
use crate::types::ResolverArgs;
use crate::types::ResolverDecl;
use crate::types::ScalarTypeBuilder;
use crate::types::Subscriber;
use crate::types::SubscriberDecl;
use crate::types::TypeHint;
use crate::Resolved;
use futures::StreamExt;

type Result<T> = std::result::Result<T, DeclarationError>;

fn noop_resolver() -> Resolver {
    Resolver::new(|_, _| Ok(Resolved::Null))
}

fn noop_subscriber() -> Subscriber {
    Subscriber::new(|_, _| Ok(futures::stream::empty::<anyhow::Result<Resolved>>().boxed()))
}

fn object_model(graphql_type: &GraphQLType) -> ObjectModel {
    match &build_model(graphql_type).kind {
        ModelKind::Interface(object)
            | ModelKind::Object(object)
            | ModelKind::Subscription(object) => object.clone(),
        _ => panic!("expected an object-like model"),
    }
}

fn object_fields(graphql_type: &GraphQLType) -> Vec<ast::schema::Field> {
    match build_model(graphql_type).ast.clone() {
        ast::schema::TypeDefinition::Object(object) => object.fields,
        ast::schema::TypeDefinition::Interface(interface) => interface.fields,
        _ => panic!("expected an object-like definition"),
    }
}

mod code_first {
    use super::*;

    #[test]
    fn annotations_become_camel_case_fields() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .annotation("id", TypeHint::Id)
            .annotation("full_name", TypeHint::optional(TypeHint::String))
            .annotation("age", TypeHint::Int)
            .build()?;

        assert_eq!(user.graphql_name(), "User");
        assert_eq!(model_sdl(&user), concat!(
            "type User {\n",
            "  id: ID!\n",
            "  fullName: String\n",
            "  age: Int!\n",
            "}\n",
        ));

        let model = object_model(&user);
        assert_eq!(model.aliases.len(), 1);
        assert_eq!(model.aliases["fullName"], "full_name");
        Ok(())
    }

    #[test]
    fn explicit_graphql_name_wins() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .graphql_name("Person")
            .annotation("id", TypeHint::Id)
            .build()?;

        assert_eq!(user.graphql_name(), "Person");
        assert_eq!(build_model(&user).name, "Person");
        Ok(())
    }

    #[test]
    fn descriptions_are_dedented() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .description("\n    A registered user.\n  ")
            .field("email_address", FieldDecl::new()
                .name("email")
                .type_hint(TypeHint::String)
                .description("Contact address."))
            .build()?;

        let model = build_model(&user);
        let ast::schema::TypeDefinition::Object(object) = &model.ast else {
            panic!("expected an object definition");
        };
        assert_eq!(object.description.as_deref(), Some("A registered user."));
        assert_eq!(object.fields[0].name, "email");
        assert_eq!(object.fields[0].description.as_deref(), Some("Contact address."));
        assert_eq!(object_model(&user).aliases["email"], "email_address");
        Ok(())
    }

    #[test]
    fn resolver_params_become_arguments() -> Result<()> {
        let query = ObjectTypeBuilder::new("QueryType")
            .annotation("user", TypeHint::optional(TypeHint::String))
            .resolver(
                ResolverDecl::new(
                    "user",
                    noop_resolver()
                        .param(Param::typed("user_id", TypeHint::Id))
                        .param(Param::typed("include_deleted", TypeHint::Boolean).default_value(false)),
                )
                .arg("include_deleted", ArgOptions::new().name("deleted")),
            )
            .build()?;

        assert_eq!(model_sdl(&query), concat!(
            "type Query {\n",
            "  user(userId: ID!, deleted: Boolean! = false): String\n",
            "}\n",
        ));

        let model = object_model(&query);
        assert!(model.resolvers.contains_key("user"));
        assert_eq!(model.out_names["user"]["userId"], "user_id");
        assert_eq!(model.out_names["user"]["deleted"], "include_deleted");
        Ok(())
    }

    #[test]
    fn subscriber_args_replace_resolver_args() -> Result<()> {
        let subscription = ObjectTypeBuilder::subscription("SubscriptionType")
            .annotation("events", TypeHint::Int)
            .resolver(
                ResolverDecl::new(
                    "events",
                    noop_resolver().param(Param::typed("channel", TypeHint::String)),
                )
                .arg("channel", ArgOptions::new().name("resolverChannel")),
            )
            .subscriber(
                SubscriberDecl::new(
                    "events",
                    noop_subscriber().param(Param::typed("channel", TypeHint::String)),
                )
                .arg("channel", ArgOptions::new().name("topic")),
            )
            .build()?;

        assert_eq!(model_sdl(&subscription), concat!(
            "type Subscription {\n",
            "  events(topic: String!): Int!\n",
            "}\n",
        ));
        assert_eq!(object_model(&subscription).out_names["events"]["topic"], "channel");
        Ok(())
    }

    #[test]
    fn field_type_falls_back_to_resolver_return_type() -> Result<()> {
        let query = ObjectTypeBuilder::new("QueryType")
            .field("answer", FieldDecl::new().resolver(
                Resolver::new(|_, _| Ok(42.into())).returns(TypeHint::Int),
            ))
            .build()?;

        assert_eq!(model_sdl(&query), "type Query {\n  answer: Int!\n}\n");
        Ok(())
    }

    #[test]
    fn forward_ref_to_self() -> Result<()> {
        let category = ObjectTypeBuilder::new("CategoryType")
            .annotation("name", TypeHint::String)
            .annotation("parent", TypeHint::optional(TypeHint::forward_ref("CategoryType")))
            .build()?;

        assert_eq!(model_sdl(&category), concat!(
            "type Category {\n",
            "  name: String!\n",
            "  parent: Category\n",
            "}\n",
        ));
        Ok(())
    }
}

mod code_first_errors {
    use super::*;

    #[test]
    fn duplicate_graphql_field_name() {
        let err = ObjectTypeBuilder::new("UserType")
            .annotation("full_name", TypeHint::String)
            .field("fullName", FieldDecl::new().type_hint(TypeHint::String))
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::DuplicateGraphQLFieldName {
            class_name: "UserType".to_string(),
            graphql_name: "fullName".to_string(),
            attr1: "full_name".to_string(),
            attr2: "fullName".to_string(),
        });
    }

    #[test]
    fn resolver_for_undefined_field() {
        let err = ObjectTypeBuilder::new("QueryType")
            .annotation("hello", TypeHint::String)
            .resolver(ResolverDecl::new("goodbye", noop_resolver()))
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::ResolverForUndefinedField {
            class_name: "QueryType".to_string(),
            field_name: "goodbye".to_string(),
            valid_fields: "hello".to_string(),
        });
    }

    #[test]
    fn field_without_type() {
        let err = ObjectTypeBuilder::new("QueryType")
            .field("hello", FieldDecl::new().description("Untyped."))
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            DeclarationError::FieldWithoutType { attr_name, .. } if attr_name == "hello",
        ));
    }

    #[test]
    fn multiple_resolvers() {
        let err = ObjectTypeBuilder::new("QueryType")
            .field("hello", FieldDecl::new().resolver(noop_resolver().returns(TypeHint::String)))
            .resolver(ResolverDecl::new("hello", noop_resolver()))
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::MultipleResolvers { .. }));
    }

    #[test]
    fn multiple_descriptions() {
        let err = ObjectTypeBuilder::new("QueryType")
            .field("hello", FieldDecl::new().type_hint(TypeHint::String).description("One."))
            .resolver(ResolverDecl::new("hello", noop_resolver()).description("Two."))
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::MultipleFieldDescriptions { .. }));
    }

    #[test]
    fn multiple_arg_options() {
        let err = ObjectTypeBuilder::new("QueryType")
            .field("hello", FieldDecl::new()
                .type_hint(TypeHint::String)
                .arg("name", ArgOptions::new().description("One.")))
            .resolver(
                ResolverDecl::new("hello", noop_resolver().param(Param::typed("name", TypeHint::String)))
                    .arg("name", ArgOptions::new().description("Two.")),
            )
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::MultipleArgOptions { .. }));
    }

    #[test]
    fn arg_options_for_undefined_param() {
        let err = ObjectTypeBuilder::new("QueryType")
            .annotation("hello", TypeHint::String)
            .resolver(
                ResolverDecl::new("hello", noop_resolver().param(Param::typed("name", TypeHint::String)))
                    .arg("nmae", ArgOptions::new().description("Typo.")),
            )
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::ArgOptionsForUndefinedParam {
            class_name: "QueryType".to_string(),
            field_name: "hello".to_string(),
            param_name: "nmae".to_string(),
            expected: "name".to_string(),
        });
    }

    #[test]
    fn duplicate_arg_names() {
        let err = ObjectTypeBuilder::new("QueryType")
            .annotation("user", TypeHint::Int)
            .resolver(
                ResolverDecl::new(
                    "user",
                    noop_resolver()
                        .param(Param::typed("user_id", TypeHint::Int))
                        .param(Param::typed("other", TypeHint::Int)),
                )
                .arg("other", ArgOptions::new().name("userId")),
            )
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::DuplicateArgName {
            class_name: "QueryType".to_string(),
            field_name: "user".to_string(),
            arg_name: "userId".to_string(),
        });
    }

    #[test]
    fn duplicate_params() {
        let err = ObjectTypeBuilder::new("QueryType")
            .annotation("user", TypeHint::Int)
            .resolver(ResolverDecl::new(
                "user",
                noop_resolver()
                    .param(Param::typed("a", TypeHint::Int))
                    .param(Param::typed("a", TypeHint::String)),
            ))
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::DuplicateParam {
            class_name: "QueryType".to_string(),
            field_name: "user".to_string(),
            param_name: "a".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Declaration 'QueryType' defines the 'a' parameter more than once for the 'user' field",
        );
    }

    #[test]
    fn arg_without_type() {
        let err = ObjectTypeBuilder::new("QueryType")
            .annotation("hello", TypeHint::String)
            .resolver(ResolverDecl::new("hello", noop_resolver().param(Param::new("name"))))
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            DeclarationError::ArgWithoutType { arg_name, .. } if arg_name == "name",
        ));
    }

    #[test]
    fn unrepresentable_arg_default() {
        let err = ObjectTypeBuilder::new("QueryType")
            .annotation("hello", TypeHint::String)
            .resolver(ResolverDecl::new(
                "hello",
                noop_resolver().param(
                    Param::typed("name", TypeHint::String).default_value(Resolved::scalar(1u8)),
                ),
            ))
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::UnrepresentableArgDefault { .. }));
    }

    #[test]
    fn alias_for_undefined_field() {
        let err = ObjectTypeBuilder::new("UserType")
            .annotation("name", TypeHint::String)
            .alias("title", "_title")
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            DeclarationError::AliasForUndefinedField { field_name, .. } if field_name == "title",
        ));
    }

    #[test]
    fn alias_for_resolved_field() {
        let err = ObjectTypeBuilder::new("UserType")
            .annotation("name", TypeHint::String)
            .alias("name", "_name")
            .resolver(ResolverDecl::new("name", noop_resolver()))
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::AliasForResolvedField { .. }));
    }

    #[test]
    fn subscriber_on_object_type() {
        let err = ObjectTypeBuilder::new("QueryType")
            .annotation("events", TypeHint::Int)
            .subscriber(SubscriberDecl::new("events", noop_subscriber()))
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::SubscriberOnNonSubscription { .. }));
    }

    #[test]
    fn subscriber_for_undefined_field() {
        let err = ObjectTypeBuilder::subscription("SubscriptionType")
            .annotation("events", TypeHint::Int)
            .subscriber(SubscriberDecl::new("messages", noop_subscriber()))
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::SubscriberForUndefinedField { .. }));
    }
}

mod schema_first {
    use super::*;

    #[test]
    fn name_comes_from_schema() -> Result<()> {
        let query = ObjectTypeBuilder::new("RootQuery")
            .schema("type Query { hello: String! }")
            .build()?;

        assert_eq!(query.graphql_name(), "Query");
        assert_eq!(model_sdl(&query), "type Query {\n  hello: String!\n}\n");
        Ok(())
    }

    #[test]
    fn resolver_options_merge_into_schema() -> Result<()> {
        let query = ObjectTypeBuilder::new("QueryType")
            .schema("type Query { hello(firstName: String): String! }")
            .resolver(
                ResolverDecl::new(
                    "hello",
                    noop_resolver().param(Param::new("first_name")),
                )
                .description("Greets someone.")
                .arg("firstName", ArgOptions::new()
                    .description("Who to greet.")
                    .default_value("World")),
            )
            .build()?;

        let fields = object_fields(&query);
        assert_eq!(fields[0].description.as_deref(), Some("Greets someone."));
        let arg = &fields[0].arguments[0];
        assert_eq!(arg.description.as_deref(), Some("Who to greet."));
        assert_eq!(arg.default_value, Some(ast::schema::Value::String("World".to_string())));

        let model = object_model(&query);
        assert!(model.resolvers.contains_key("hello"));
        assert_eq!(model.out_names["hello"]["firstName"], "first_name");
        Ok(())
    }

    #[test]
    fn aliases_target_graphql_names() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .schema("type User { name: String! }")
            .alias("name", "_name")
            .build()?;

        assert_eq!(object_model(&user).aliases["name"], "_name");
        let kwargs: Vec<&String> = user.as_object_type().unwrap().kwargs.keys().collect();
        assert_eq!(kwargs, vec!["_name"]);
        Ok(())
    }

    #[test]
    fn wrong_definition_kind() {
        let err = ObjectTypeBuilder::new("QueryType")
            .schema("enum Query { A }")
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::InvalidSchemaTypeKind {
            class_name: "QueryType".to_string(),
            expected: "Object".to_string(),
            found: "Enum".to_string(),
        });
    }

    #[test]
    fn interface_requires_interface_definition() {
        let err = ObjectTypeBuilder::interface("NodeType")
            .schema("type Node { id: ID! }")
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::InvalidSchemaTypeKind { .. }));
    }

    #[test]
    fn exactly_one_definition() {
        let err = ObjectTypeBuilder::new("QueryType")
            .schema(concat!(
                "type Query { a: Int }\n",
                "type Other { b: Int }\n",
            ))
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::SchemaTextDefinitionCount {
            class_name: "QueryType".to_string(),
            count: 2,
        });
    }

    #[test]
    fn invalid_schema_text() {
        let err = ObjectTypeBuilder::new("QueryType")
            .schema("type Query {")
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::InvalidSchemaText { .. }));
    }

    #[test]
    fn graphql_name_mismatch() {
        let err = ObjectTypeBuilder::new("QueryType")
            .graphql_name("Root")
            .schema("type Query { a: Int }")
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::GraphQLNameMismatch {
            class_name: "QueryType".to_string(),
            declared: "Root".to_string(),
            schema_name: "Query".to_string(),
        });
    }

    #[test]
    fn duplicate_description() {
        let err = ObjectTypeBuilder::new("QueryType")
            .description("Declared.")
            .schema(concat!(
                "\"In the schema.\"\n",
                "type Query { a: Int }",
            ))
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::DuplicateDescription { .. }));
    }

    #[test]
    fn type_without_fields() {
        let err = ObjectTypeBuilder::new("QueryType")
            .schema("type Query")
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::SchemaTypeWithoutFields { .. }));
    }

    #[test]
    fn field_descriptors_are_rejected() {
        let err = ObjectTypeBuilder::new("QueryType")
            .schema("type Query { a: Int }")
            .field("a", FieldDecl::new().type_hint(TypeHint::Int))
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::FieldDescriptorWithSchema { .. }));
    }

    #[test]
    fn resolver_for_undefined_field() {
        let err = ObjectTypeBuilder::new("QueryType")
            .schema("type Query { a: Int }")
            .resolver(ResolverDecl::new("b", noop_resolver()))
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::ResolverForUndefinedField {
            class_name: "QueryType".to_string(),
            field_name: "b".to_string(),
            valid_fields: "a".to_string(),
        });
    }

    #[test]
    fn multiple_resolvers() {
        let err = ObjectTypeBuilder::new("QueryType")
            .schema("type Query { a: Int }")
            .resolver(ResolverDecl::new("a", noop_resolver()))
            .resolver(ResolverDecl::new("a", noop_resolver()))
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::MultipleResolvers { .. }));
    }

    #[test]
    fn description_in_schema_and_resolver() {
        let err = ObjectTypeBuilder::new("QueryType")
            .schema(concat!(
                "type Query {\n",
                "  \"In the schema.\"\n",
                "  a: Int\n",
                "}",
            ))
            .resolver(ResolverDecl::new("a", noop_resolver()).description("In the resolver."))
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::MultipleFieldDescriptions { .. }));
    }

    #[test]
    fn arg_options_validation() {
        let build = |options: ArgOptions, arg_name: &str| {
            ObjectTypeBuilder::new("QueryType")
                .schema(concat!(
                    "type Query {\n",
                    "  a(\"In the schema.\" first: Int): Int\n",
                    "}",
                ))
                .resolver(ResolverDecl::new("a", noop_resolver()).arg(arg_name, options))
                .build()
                .unwrap_err()
        };

        assert!(matches!(
            build(ArgOptions::new().description("x"), "second"),
            DeclarationError::ArgOptionsForUndefinedSchemaArg { .. },
        ));
        assert!(matches!(
            build(ArgOptions::new().name("other"), "first"),
            DeclarationError::ArgNameOptionWithSchema { .. },
        ));
        assert!(matches!(
            build(ArgOptions::new().type_hint(TypeHint::Int), "first"),
            DeclarationError::ArgTypeOptionWithSchema { .. },
        ));
        assert!(matches!(
            build(ArgOptions::new().description("Declared."), "first"),
            DeclarationError::DuplicateArgDescription { .. },
        ));
    }

    #[test]
    fn duplicate_schema_args_and_params() {
        let err = ObjectTypeBuilder::new("QueryType")
            .schema("type Query { a(first: Int, first: Int): Int }")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            DeclarationError::DuplicateArgName { arg_name, .. } if arg_name == "first",
        ));

        let err = ObjectTypeBuilder::new("QueryType")
            .schema("type Query { a(firstName: Int): Int }")
            .resolver(ResolverDecl::new(
                "a",
                noop_resolver()
                    .param(Param::new("first_name"))
                    .param(Param::new("firstName")),
            ))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            DeclarationError::DuplicateArgName { arg_name, .. } if arg_name == "firstName",
        ));

        let err = ObjectTypeBuilder::new("QueryType")
            .schema("type Query { a(first: Int): Int }")
            .resolver(ResolverDecl::new(
                "a",
                noop_resolver().param(Param::new("first")).param(Param::new("first")),
            ))
            .build()
            .unwrap_err();
        assert!(matches!(err, DeclarationError::DuplicateParam { .. }));
    }

    #[test]
    fn alias_for_undefined_field() {
        let err = ObjectTypeBuilder::new("UserType")
            .schema("type User { name: String! }")
            .alias("title", "_title")
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::AliasForUndefinedField { .. }));
    }
}

mod composition {
    use super::*;

    #[test]
    fn implementing_an_interface_inherits_its_fields() -> Result<()> {
        let node = ObjectTypeBuilder::interface("NodeType")
            .annotation("id", TypeHint::Id)
            .build()?;
        let user = ObjectTypeBuilder::new("UserType")
            .implements(&node)
            .annotation("name", TypeHint::String)
            .build()?;

        assert_eq!(user.as_object_type().unwrap().implements(), &[node.clone()]);
        assert_eq!(model_sdl(&user), concat!(
            "type User implements Node {\n",
            "  id: ID!\n",
            "  name: String!\n",
            "}\n",
        ));
        Ok(())
    }

    #[test]
    fn implementing_a_non_interface_is_an_error() -> Result<()> {
        let base = ObjectTypeBuilder::new("BaseType")
            .annotation("id", TypeHint::Id)
            .build()?;
        let err = ObjectTypeBuilder::new("UserType")
            .implements(&base)
            .annotation("name", TypeHint::String)
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::InvalidBaseType {
            class_name: "UserType".to_string(),
            base_name: "BaseType".to_string(),
            kind: "Object".to_string(),
        });
        Ok(())
    }

    #[test]
    fn inheriting_a_scalar_is_an_error() -> Result<()> {
        let date = ScalarTypeBuilder::new("DateScalar").build()?;
        let err = ObjectTypeBuilder::new("UserType")
            .inherits(&date)
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            DeclarationError::InvalidBaseType { kind, .. } if kind == "Scalar",
        ));
        Ok(())
    }

    #[test]
    fn own_resolver_replaces_inherited_one() -> Result<()> {
        let base = ObjectTypeBuilder::new("BaseType")
            .annotation("name", TypeHint::String)
            .resolver(ResolverDecl::new("name", Resolver::new(|_, _| Ok("base".into()))))
            .build()?;
        let child = ObjectTypeBuilder::new("ChildType")
            .inherits(&base)
            .resolver(ResolverDecl::new("name", Resolver::new(|_, _| Ok("child".into()))))
            .build()?;

        let resolver = object_model(&child).resolvers["name"].clone();
        let value = resolver.call(&Resolved::Null, &ResolverArgs::new()).unwrap();
        assert_eq!(value, Resolved::from("child"));
        Ok(())
    }

    #[test]
    fn mixins_contribute_fields() -> Result<()> {
        let greeting = ObjectTypeBuilder::new("GreetingMixin")
            .field("greeting", FieldDecl::new().resolver(
                Resolver::new(|_, _| Ok("Hi!".into())).returns(TypeHint::String),
            ))
            .build_mixin();
        let query = ObjectTypeBuilder::new("QueryType")
            .mixin(&greeting)
            .annotation("name", TypeHint::String)
            .build()?;

        assert_eq!(model_sdl(&query), concat!(
            "type Query {\n",
            "  name: String!\n",
            "  greeting: String!\n",
            "}\n",
        ));
        Ok(())
    }

    #[test]
    fn mixins_contribute_resolvers_to_schema_types() -> Result<()> {
        let greeting = ObjectTypeBuilder::new("GreetingMixin")
            .resolver(ResolverDecl::new("greeting", Resolver::new(|_, _| Ok("Hi!".into()))))
            .build_mixin();
        let query = ObjectTypeBuilder::new("QueryType")
            .schema("type Query { greeting: String! }")
            .mixin(&greeting)
            .build()?;

        assert!(object_model(&query).resolvers.contains_key("greeting"));
        Ok(())
    }
}

mod instances {
    use super::*;

    #[test]
    fn defaults_fill_missing_kwargs() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .annotation("name", TypeHint::String)
            .annotation("age", TypeHint::optional(TypeHint::Int))
            .attribute("age", 18)
            .build()?;

        let bob = user.instance([("name", "Bob")])?;
        assert_eq!(bob.field("name"), Some(Resolved::from("Bob")));
        assert_eq!(bob.field("age"), Some(Resolved::from(18)));

        let nobody = user.instance(Vec::<(String, Resolved)>::new())?;
        assert_eq!(nobody.field("name"), Some(Resolved::Null));
        Ok(())
    }

    #[test]
    fn unexpected_kwarg() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .annotation("name", TypeHint::String)
            .annotation("age", TypeHint::Int)
            .build()?;

        let err = user.instance([("email", "bob@example.com")]).unwrap_err();
        assert_eq!(err, DeclarationError::UnexpectedKeywordArgument {
            class_name: "UserType".to_string(),
            kwarg: "email".to_string(),
            valid_kwargs: "name', 'age".to_string(),
        });
        Ok(())
    }

    #[test]
    fn aliased_fields_take_the_alias_target() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .annotation("name", TypeHint::String)
            .alias("name", "_name")
            .build()?;

        let bob = user.instance([("_name", "Bob")])?;
        assert_eq!(bob.field("_name"), Some(Resolved::from("Bob")));
        assert!(user.instance([("name", "Bob")]).is_err());
        Ok(())
    }

    #[test]
    fn schema_fields_take_snake_case_kwargs() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .schema("type User { fullName: String! }")
            .build()?;

        let bob = user.instance([("full_name", "Bob")])?;
        assert_eq!(bob.field("full_name"), Some(Resolved::from("Bob")));
        Ok(())
    }
}

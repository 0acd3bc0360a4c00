use crate::ast;
use crate::deferred;
use crate::schema::Metadata;
use crate::schema::SchemaBuildError;
use crate::types::get_graphql_type;
use crate::types::get_type_node;
use crate::types::DeclaredType;
use crate::types::ObjectTypeBuilder;
use crate::types::TypeHint;
use crate::TypeRegistry;

type Result<T> = std::result::Result<T, SchemaBuildError>;

fn named(name: &str) -> ast::schema::Type {
    ast::schema::Type::NamedType(name.to_string())
}

fn non_null(inner: ast::schema::Type) -> ast::schema::Type {
    ast::schema::Type::NonNullType(Box::new(inner))
}

fn list(inner: ast::schema::Type) -> ast::schema::Type {
    ast::schema::Type::ListType(Box::new(inner))
}

mod type_nodes {
    use super::*;

    #[test]
    fn builtins_are_non_null() -> Result<()> {
        let mut metadata = Metadata::new();
        for (hint, name) in [
            (TypeHint::Boolean, "Boolean"),
            (TypeHint::Float, "Float"),
            (TypeHint::Id, "ID"),
            (TypeHint::Int, "Int"),
            (TypeHint::String, "String"),
        ] {
            assert_eq!(get_type_node(&mut metadata, &hint, None)?, non_null(named(name)));
        }
        Ok(())
    }

    #[test]
    fn optional_and_list_wrappers() -> Result<()> {
        let mut metadata = Metadata::new();

        let hint = TypeHint::optional(TypeHint::String);
        assert_eq!(get_type_node(&mut metadata, &hint, None)?, named("String"));

        let hint = TypeHint::list(TypeHint::optional(TypeHint::Int));
        assert_eq!(get_type_node(&mut metadata, &hint, None)?, non_null(list(named("Int"))));

        let hint = TypeHint::optional(TypeHint::list(TypeHint::Int));
        assert_eq!(get_type_node(&mut metadata, &hint, None)?, list(non_null(named("Int"))));
        Ok(())
    }

    #[test]
    fn doubly_optional_hint_is_invalid() {
        let hint = TypeHint::optional(TypeHint::optional(TypeHint::Int));
        let err = get_type_node(&mut Metadata::new(), &hint, None).unwrap_err();
        assert_eq!(err, SchemaBuildError::InvalidTypeHint {
            type_hint: "Option<Option<i32>>".to_string(),
        });
    }

    #[test]
    fn declared_types_use_their_graphql_name() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .annotation("id", TypeHint::Id)
            .build()?;

        let hint = TypeHint::list(&user);
        assert_eq!(
            get_type_node(&mut Metadata::new(), &hint, None)?,
            non_null(list(non_null(named("User")))),
        );
        Ok(())
    }

    #[test]
    fn deferred_types_resolve_through_the_registry() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .annotation("id", TypeHint::Id)
            .build()?;
        let mut registry = TypeRegistry::new();
        registry.register("app.users", &user);

        let hint = TypeHint::deferred("UserType", deferred("app.users", "app")?);
        let mut metadata = Metadata::with_registry(registry);
        assert_eq!(get_type_node(&mut metadata, &hint, None)?, non_null(named("User")));
        Ok(())
    }

    #[test]
    fn unregistered_deferred_type() -> Result<()> {
        let hint = TypeHint::deferred("UserType", deferred("app.users", "app")?);
        let err = get_type_node(&mut Metadata::new(), &hint, None).unwrap_err();
        assert_eq!(err, SchemaBuildError::DeferredTypeNotRegistered {
            module_path: "app.users".to_string(),
            type_name: "UserType".to_string(),
        });
        Ok(())
    }

    #[test]
    fn forward_ref_must_name_the_parent() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .annotation("id", TypeHint::Id)
            .build()?;
        let parent = user.as_object_type().unwrap() as &dyn DeclaredType;
        let mut metadata = Metadata::new();

        let hint = TypeHint::forward_ref("UserType");
        assert_eq!(get_type_node(&mut metadata, &hint, Some(parent))?, non_null(named("User")));

        let hint = TypeHint::forward_ref("PostType");
        let err = get_type_node(&mut metadata, &hint, Some(parent)).unwrap_err();
        assert_eq!(err, SchemaBuildError::ForwardRefMismatch {
            forward_ref: "PostType".to_string(),
            parent: Some("UserType".to_string()),
        });

        let err = get_type_node(&mut metadata, &hint, None).unwrap_err();
        assert!(matches!(err, SchemaBuildError::ForwardRefMismatch { parent: None, .. }));
        Ok(())
    }
}

mod referenced_types {
    use super::*;

    #[test]
    fn wrappers_are_looked_through() -> Result<()> {
        let user = ObjectTypeBuilder::new("UserType")
            .annotation("id", TypeHint::Id)
            .build()?;

        let hint = TypeHint::optional(TypeHint::list(&user));
        assert_eq!(get_graphql_type(&hint), Some(user));
        assert_eq!(get_graphql_type(&TypeHint::String), None);
        assert_eq!(get_graphql_type(&TypeHint::forward_ref("UserType")), None);
        Ok(())
    }
}

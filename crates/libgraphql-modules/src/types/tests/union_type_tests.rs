use super::utils::build_model;
use super::utils::model_sdl;
use crate::schema::ModelKind;
use crate::types::DeclarationError;
use crate::types::GraphQLType;
use crate::types::ObjectTypeBuilder;
use crate::types::TypeHint;
use crate::types::UnionTypeBuilder;

type Result<T> = std::result::Result<T, DeclarationError>;

fn object(class_name: &str) -> GraphQLType {
    ObjectTypeBuilder::new(class_name)
        .annotation("id", TypeHint::Id)
        .build()
        .unwrap()
}

mod code_first {
    use super::*;

    #[test]
    fn members_are_declared_types() -> Result<()> {
        let user = object("UserType");
        let post = object("PostType");
        let result = UnionTypeBuilder::new("SearchResultType")
            .types([&user, &post])
            .build()?;

        assert_eq!(model_sdl(&result), "union SearchResult = User | Post\n");
        let model = build_model(&result);
        let ModelKind::Union { members, .. } = &model.kind else {
            panic!("expected a union model");
        };
        assert_eq!(members, &vec![
            (user.key(), "User".to_string()),
            (post.key(), "Post".to_string()),
        ]);
        Ok(())
    }

    #[test]
    fn members_are_collected_with_the_union() -> Result<()> {
        let user = object("UserType");
        let result = UnionTypeBuilder::new("SearchResultType")
            .types([&user])
            .build()?;

        let GraphQLType::Union(union_type) = &result else {
            panic!("expected a union declaration");
        };
        assert_eq!(union_type.types(), &[user.clone()]);
        assert_eq!(union_type.graphql_types(), vec![user]);
        Ok(())
    }

    #[test]
    fn types_are_required() {
        let err = UnionTypeBuilder::new("SearchResultType").build().unwrap_err();
        assert_eq!(err, DeclarationError::UnionTypesMissing {
            class_name: "SearchResultType".to_string(),
        });
    }
}

mod schema_first {
    use super::*;

    #[test]
    fn declared_types_match_schema() -> Result<()> {
        let user = object("UserType");
        let post = object("PostType");
        let result = UnionTypeBuilder::new("SearchResultType")
            .schema("union Result = User | Post")
            .types([&user, &post])
            .build()?;

        assert_eq!(result.graphql_name(), "Result");
        Ok(())
    }

    #[test]
    fn declared_type_missing_from_schema() {
        let user = object("UserType");
        let comment = object("CommentType");
        let err = UnionTypeBuilder::new("SearchResultType")
            .schema("union Result = User")
            .types([&user, &comment])
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::UnionTypesNotInSchema {
            class_name: "SearchResultType".to_string(),
            type_names: "Comment".to_string(),
        });
    }

    #[test]
    fn schema_member_not_declared() {
        let user = object("UserType");
        let err = UnionTypeBuilder::new("SearchResultType")
            .schema("union Result = User | Post")
            .types([&user])
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::UnionSchemaTypesNotDeclared {
            class_name: "SearchResultType".to_string(),
            type_names: "Post".to_string(),
        });
    }

    #[test]
    fn members_from_schema_text() -> Result<()> {
        let result = GraphQLType::from_schema("SearchResult", "union Result = User | Post")?;

        assert_eq!(model_sdl(&result), "union Result = User | Post\n");
        Ok(())
    }
}

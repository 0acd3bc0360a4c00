use super::utils::build_model;
use super::utils::model_sdl;
use crate::ast;
use crate::schema::ModelKind;
use crate::types::DeclarationError;
use crate::types::EnumTypeBuilder;
use crate::types::GraphQLType;
use crate::types::NativeEnum;
use async_graphql::Value;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, DeclarationError>;

enum UserLevel {
    Guest,
    Member,
    Admin,
}
impl NativeEnum for UserLevel {
    const NAME: &'static str = "UserLevel";

    fn members() -> Vec<(&'static str, Value)> {
        vec![
            ("GUEST", Value::from(UserLevel::Guest as i32)),
            ("MEMBER", Value::from(UserLevel::Member as i32)),
            ("ADMIN", Value::from(UserLevel::Admin as i32)),
        ]
    }
}

fn enum_members(graphql_type: &GraphQLType) -> IndexMap<String, Value> {
    match &build_model(graphql_type).kind {
        ModelKind::Enum { members } => members.clone(),
        _ => panic!("expected an enum model"),
    }
}

mod code_first {
    use super::*;

    #[test]
    fn members_list_uses_names_as_values() -> Result<()> {
        let role = EnumTypeBuilder::new("RoleEnum")
            .members(["USER", "ADMIN"])
            .build()?;

        assert_eq!(role.graphql_name(), "RoleEnum");
        assert_eq!(model_sdl(&role), "enum RoleEnum {\n  USER\n  ADMIN\n}\n");
        assert_eq!(enum_members(&role)["ADMIN"], Value::from("ADMIN"));
        Ok(())
    }

    #[test]
    fn graphql_enum_suffix_is_replaced() -> Result<()> {
        let role = EnumTypeBuilder::new("RoleGraphQLEnum")
            .members(["USER"])
            .build()?;

        assert_eq!(role.graphql_name(), "RoleEnum");
        Ok(())
    }

    #[test]
    fn member_values_are_kept() -> Result<()> {
        let level = EnumTypeBuilder::new("LevelEnum")
            .member("LOW", 1)
            .member("HIGH", 10)
            .build()?;

        let members = enum_members(&level);
        assert_eq!(members["LOW"], Value::from(1));
        assert_eq!(members["HIGH"], Value::from(10));
        Ok(())
    }

    #[test]
    fn native_enum() -> Result<()> {
        let level = EnumTypeBuilder::from_native::<UserLevel>().build()?;

        assert_eq!(level.graphql_name(), "UserLevel");
        assert_eq!(enum_members(&level)["MEMBER"], Value::from(1));
        Ok(())
    }

    #[test]
    fn native_enum_members_can_be_filtered() -> Result<()> {
        let included = EnumTypeBuilder::from_native::<UserLevel>()
            .include_members(["GUEST", "ADMIN"])
            .build()?;
        let excluded = EnumTypeBuilder::from_native::<UserLevel>()
            .exclude_members(["ADMIN"])
            .build()?;

        assert_eq!(model_sdl(&included), "enum UserLevel {\n  GUEST\n  ADMIN\n}\n");
        assert_eq!(model_sdl(&excluded), "enum UserLevel {\n  GUEST\n  MEMBER\n}\n");
        Ok(())
    }

    #[test]
    fn member_descriptions() -> Result<()> {
        let role = EnumTypeBuilder::new("RoleEnum")
            .members(["USER", "ADMIN"])
            .member_description("ADMIN", "Can do anything.")
            .build()?;

        let model = build_model(&role);
        let ast::schema::TypeDefinition::Enum(enum_type) = &model.ast else {
            panic!("expected an enum definition");
        };
        assert_eq!(enum_type.values[0].description, None);
        assert_eq!(enum_type.values[1].description.as_deref(), Some("Can do anything."));
        Ok(())
    }

    #[test]
    fn missing_members() {
        let err = EnumTypeBuilder::new("RoleEnum").build().unwrap_err();
        assert_eq!(err, DeclarationError::EnumMembersMissing {
            class_name: "RoleEnum".to_string(),
        });
    }

    #[test]
    fn duplicate_member() {
        let err = EnumTypeBuilder::new("RoleEnum")
            .members(["USER", "USER"])
            .build()
            .unwrap_err();
        assert!(matches!(err, DeclarationError::DuplicateEnumMember { .. }));
    }

    #[test]
    fn description_for_undefined_member() {
        let err = EnumTypeBuilder::new("RoleEnum")
            .members(["USER"])
            .member_description("ADMIN", "Can do anything.")
            .build()
            .unwrap_err();
        assert_eq!(err, DeclarationError::EnumMemberDescriptionForUndefined {
            class_name: "RoleEnum".to_string(),
            member: "ADMIN".to_string(),
            valid_members: "USER".to_string(),
        });
    }
}

mod schema_first {
    use super::*;

    #[test]
    fn members_come_from_schema() -> Result<()> {
        let role = EnumTypeBuilder::new("RoleEnum")
            .schema("enum Role { USER ADMIN }")
            .build()?;

        assert_eq!(role.graphql_name(), "Role");
        let members = enum_members(&role);
        assert_eq!(members.keys().collect::<Vec<_>>(), vec!["USER", "ADMIN"]);
        assert_eq!(members["USER"], Value::from("USER"));
        Ok(())
    }

    #[test]
    fn declared_members_provide_values() -> Result<()> {
        let level = EnumTypeBuilder::new("LevelEnum")
            .schema("enum Level { GUEST MEMBER ADMIN }")
            .native::<UserLevel>()
            .build()?;

        assert_eq!(enum_members(&level)["ADMIN"], Value::from(2));
        Ok(())
    }

    #[test]
    fn declared_members_must_match_schema() {
        let err = EnumTypeBuilder::new("LevelEnum")
            .schema("enum Level { GUEST MEMBER OWNER }")
            .native::<UserLevel>()
            .build()
            .unwrap_err();

        assert_eq!(err, DeclarationError::EnumMembersMismatch {
            class_name: "LevelEnum".to_string(),
            missing: "OWNER".to_string(),
            extra: "ADMIN".to_string(),
        });
    }

    #[test]
    fn member_descriptions_merge_into_schema() -> Result<()> {
        let role = EnumTypeBuilder::new("RoleEnum")
            .schema(concat!(
                "enum Role {\n",
                "  \"Regular user.\"\n",
                "  USER\n",
                "  ADMIN\n",
                "}",
            ))
            .member_description("ADMIN", "Can do anything.")
            .build()?;

        let model = build_model(&role);
        let ast::schema::TypeDefinition::Enum(enum_type) = &model.ast else {
            panic!("expected an enum definition");
        };
        assert_eq!(enum_type.values[0].description.as_deref(), Some("Regular user."));
        assert_eq!(enum_type.values[1].description.as_deref(), Some("Can do anything."));
        Ok(())
    }

    #[test]
    fn member_described_twice() {
        let err = EnumTypeBuilder::new("RoleEnum")
            .schema(concat!(
                "enum Role {\n",
                "  \"Regular user.\"\n",
                "  USER\n",
                "}",
            ))
            .member_description("USER", "Also a regular user.")
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::DuplicateEnumMemberDescription { .. }));
    }

    #[test]
    fn schema_must_define_an_enum() {
        let err = EnumTypeBuilder::new("RoleEnum")
            .schema("scalar Role")
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::InvalidSchemaTypeKind { .. }));
    }
}

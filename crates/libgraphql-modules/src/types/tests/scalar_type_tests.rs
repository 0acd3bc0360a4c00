use super::utils::build_model;
use super::utils::model_sdl;
use crate::ast;
use crate::types::DeclarationError;
use crate::types::GraphQLType;
use crate::types::ScalarType;
use crate::types::ScalarTypeBuilder;
use crate::Resolved;
use async_graphql::Value;
use std::sync::Arc;

type Result<T> = std::result::Result<T, DeclarationError>;

#[derive(Debug, PartialEq)]
struct Date {
    year: u16,
    month: u8,
    day: u8,
}

fn scalar_type(graphql_type: &GraphQLType) -> Arc<ScalarType> {
    match graphql_type {
        GraphQLType::Scalar(scalar) => scalar.clone(),
        _ => panic!("expected a scalar declaration"),
    }
}

fn date_scalar() -> Result<GraphQLType> {
    ScalarTypeBuilder::new("DateScalar")
        .serialize(|value| {
            let Some(date) = value.downcast_scalar::<Date>() else {
                anyhow::bail!("Expected a date, got {value:?}");
            };
            Ok(Value::from(format!("{:04}-{:02}-{:02}", date.year, date.month, date.day)))
        })
        .parse_value(|value| {
            let Value::String(text) = value else {
                anyhow::bail!("Expected a date string, got {value}");
            };
            let parts: Vec<&str> = text.split('-').collect();
            let [year, month, day] = parts.as_slice() else {
                anyhow::bail!("Invalid date '{text}'");
            };
            Ok(Resolved::scalar(Date {
                year: year.parse()?,
                month: month.parse()?,
                day: day.parse()?,
            }))
        })
        .build()
}

mod defaults {
    use super::*;

    #[test]
    fn values_pass_through() -> Result<()> {
        let scalar = scalar_type(&ScalarTypeBuilder::new("AnyScalar").build()?);

        assert_eq!(scalar.serialize(&Resolved::from("lorem")).unwrap(), Value::from("lorem"));
        assert_eq!(scalar.parse_value(&Value::from(5)).unwrap(), Resolved::from(5));
        assert_eq!(
            scalar.parse_literal(&ast::schema::Value::Boolean(true)).unwrap(),
            Resolved::from(true),
        );
        Ok(())
    }

    #[test]
    fn wrapped_values_are_unwrapped() -> Result<()> {
        let any = ScalarTypeBuilder::new("AnyScalar").build()?;
        let wrapped = any.wrap(Value::from("ipsum"));

        assert_eq!(scalar_type(&any).serialize(&wrapped).unwrap(), Value::from("ipsum"));
        Ok(())
    }

    #[test]
    fn opaque_values_need_a_serializer() -> Result<()> {
        let scalar = scalar_type(&ScalarTypeBuilder::new("AnyScalar").build()?);
        assert!(scalar.serialize(&Resolved::scalar(Date { year: 1989, month: 10, day: 30 })).is_err());
        Ok(())
    }

    #[test]
    fn sdl() -> Result<()> {
        let any = ScalarTypeBuilder::new("AnyScalar").build()?;
        assert_eq!(any.graphql_name(), "Any");
        assert_eq!(model_sdl(&any), "scalar Any\n");
        Ok(())
    }
}

mod custom {
    use super::*;

    #[test]
    fn serialize_and_parse() -> Result<()> {
        let date = scalar_type(&date_scalar()?);

        let serialized = date
            .serialize(&Resolved::scalar(Date { year: 1989, month: 10, day: 30 }))
            .unwrap();
        assert_eq!(serialized, Value::from("1989-10-30"));

        let parsed = date.parse_value(&Value::from("2024-02-29")).unwrap();
        assert_eq!(
            parsed.downcast_scalar::<Date>(),
            Some(&Date { year: 2024, month: 2, day: 29 }),
        );
        assert!(date.parse_value(&Value::from("yesterday")).is_err());
        Ok(())
    }

    #[test]
    fn parse_literal_defaults_to_parse_value() -> Result<()> {
        let date = scalar_type(&date_scalar()?);
        let parsed = date
            .parse_literal(&ast::schema::Value::String("2000-01-01".to_string()))
            .unwrap();
        assert_eq!(
            parsed.downcast_scalar::<Date>(),
            Some(&Date { year: 2000, month: 1, day: 1 }),
        );
        Ok(())
    }

    #[test]
    fn schema_first() -> Result<()> {
        let date = ScalarTypeBuilder::new("DateScalar")
            .schema("scalar Date")
            .description("An ISO-8601 date.")
            .build()?;

        let model = build_model(&date);
        let ast::schema::TypeDefinition::Scalar(scalar) = &model.ast else {
            panic!("expected a scalar definition");
        };
        assert_eq!(scalar.name, "Date");
        assert_eq!(scalar.description.as_deref(), Some("An ISO-8601 date."));
        Ok(())
    }

    #[test]
    fn schema_must_define_a_scalar() {
        let err = ScalarTypeBuilder::new("DateScalar")
            .schema("enum Date { TODAY }")
            .build()
            .unwrap_err();
        assert!(matches!(err, DeclarationError::InvalidSchemaTypeKind { .. }));
    }
}

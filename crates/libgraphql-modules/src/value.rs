use crate::ast;
use crate::convert_name::convert_python_name_to_graphql;
use crate::Resolved;
use async_graphql::Name;
use async_graphql::Value;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use thiserror::Error;

type Result<T> = std::result::Result<T, ValueNodeError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValueNodeError {
    #[error(
        "Int value `{value}` is outside of the range a GraphQL Int literal can \
        represent (32-bit signed)"
    )]
    IntOutOfRange {
        value: String,
    },

    #[error("Value `{value}` can't be represented as a GraphQL literal")]
    UnrepresentableValue {
        value: String,
    },

    #[error("Variable `${name}` can't be converted into a constant value")]
    VariableNode {
        name: String,
    },
}

/// Converts a native runtime value into an SDL literal node.
///
/// Instances are printed as object literals keyed by the GraphQL names of
/// their attributes. Opaque scalar wrappers and binary values have no
/// literal form and are rejected.
pub fn get_value_node(value: &Resolved) -> Result<ast::schema::Value> {
    match value {
        Resolved::Null => Ok(ast::schema::Value::Null),
        Resolved::Value(value) => value_node_from_const(value),
        Resolved::List(items) => Ok(ast::schema::Value::List(
            items.iter()
                .map(get_value_node)
                .collect::<Result<Vec<_>>>()?,
        )),
        Resolved::Instance(instance) => {
            let mut fields = BTreeMap::new();
            for (attr_name, attr_value) in instance.attrs() {
                fields.insert(
                    convert_python_name_to_graphql(attr_name),
                    get_value_node(attr_value)?,
                );
            }
            Ok(ast::schema::Value::Object(fields))
        },
        Resolved::Scalar(scalar) => Err(ValueNodeError::UnrepresentableValue {
            value: format!("{scalar:?}"),
        }),
    }
}

fn value_node_from_const(value: &Value) -> Result<ast::schema::Value> {
    Ok(match value {
        Value::Null => ast::schema::Value::Null,
        Value::Boolean(b) => ast::schema::Value::Boolean(*b),
        Value::String(s) => ast::schema::Value::String(s.to_string()),
        Value::Enum(name) => ast::schema::Value::Enum(name.to_string()),
        Value::Number(num) => {
            if let Some(int) = num.as_i64() {
                let int = i32::try_from(int).map_err(|_| {
                    ValueNodeError::IntOutOfRange { value: int.to_string() }
                })?;
                ast::schema::Value::Int(int.into())
            } else if num.is_u64() {
                return Err(ValueNodeError::IntOutOfRange {
                    value: num.to_string(),
                });
            } else if let Some(float) = num.as_f64() {
                ast::schema::Value::Float(float)
            } else {
                return Err(ValueNodeError::UnrepresentableValue {
                    value: num.to_string(),
                });
            }
        },
        Value::List(items) => ast::schema::Value::List(
            items.iter()
                .map(value_node_from_const)
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(fields) => {
            let mut object = BTreeMap::new();
            for (name, value) in fields {
                object.insert(name.to_string(), value_node_from_const(value)?);
            }
            ast::schema::Value::Object(object)
        },
        Value::Binary(bytes) => return Err(ValueNodeError::UnrepresentableValue {
            value: format!("<{} bytes>", bytes.len()),
        }),
    })
}

/// Converts an SDL literal node into a constant engine value.
pub fn get_value_from_node(node: &ast::schema::Value) -> Result<Value> {
    Ok(match node {
        ast::schema::Value::Variable(name) =>
            return Err(ValueNodeError::VariableNode { name: name.to_string() }),
        ast::schema::Value::Null => Value::Null,
        ast::schema::Value::Boolean(b) => Value::Boolean(*b),
        ast::schema::Value::Int(num) => match num.as_i64() {
            Some(int) => Value::from(int),
            None => return Err(ValueNodeError::UnrepresentableValue {
                value: format!("{num:?}"),
            }),
        },
        ast::schema::Value::Float(float) => Value::from(*float),
        ast::schema::Value::String(s) => Value::String(s.to_string()),
        ast::schema::Value::Enum(name) => Value::Enum(Name::new(name)),
        ast::schema::Value::List(items) => Value::List(
            items.iter()
                .map(get_value_from_node)
                .collect::<Result<Vec<_>>>()?,
        ),
        ast::schema::Value::Object(fields) => {
            let mut object = IndexMap::new();
            for (name, value) in fields {
                object.insert(Name::new(name), get_value_from_node(value)?);
            }
            Value::Object(object)
        },
    })
}

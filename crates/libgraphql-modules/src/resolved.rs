use crate::types::TypeKey;
use async_graphql::Value;
use indexmap::IndexMap;
use std::any::Any;
use std::sync::Arc;

/// A runtime value flowing through resolvers.
///
/// Resolvers receive their parent as a [`Resolved`] and return one. Plain
/// GraphQL data travels as [`Resolved::Value`]; values created from a
/// declaration (see [`GraphQLType::instance`](crate::types::GraphQLType::instance))
/// travel as [`Resolved::Instance`] so that unions and interfaces can find
/// the declaration that produced them.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Resolved {
    #[default]
    Null,
    Value(Value),
    List(Vec<Resolved>),
    Instance(Instance),
    Scalar(ScalarValue),
}
impl Resolved {
    /// Wraps an arbitrary native value, to be serialized by a custom scalar.
    pub fn scalar<T: Any + Send + Sync>(value: T) -> Self {
        Self::Scalar(ScalarValue::new(None, value))
    }

    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Resolved>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Value(Value::Null))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(Value::String(s)) => Some(s.as_str()),
            Self::Value(Value::Enum(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Value(Value::Number(num)) => num.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value(Value::Number(num)) => num.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Value(Value::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Resolved]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn downcast_scalar<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Scalar(scalar) => scalar.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Reads a named member off an instance or an object value.
    ///
    /// Instances are looked up by attribute name, object values by key.
    pub fn field(&self, name: &str) -> Option<Resolved> {
        match self {
            Self::Instance(instance) => instance.get(name).cloned(),
            Self::Value(Value::Object(fields)) =>
                fields.get(name).cloned().map(Resolved::Value),
            _ => None,
        }
    }

    /// The declaration a value was created from, if any.
    pub fn type_key(&self) -> Option<TypeKey> {
        match self {
            Self::Instance(instance) => Some(instance.type_key),
            Self::Scalar(scalar) => scalar.type_key,
            _ => None,
        }
    }
}

impl std::convert::From<Value> for Resolved {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}
impl std::convert::From<&str> for Resolved {
    fn from(value: &str) -> Self {
        Self::Value(Value::from(value))
    }
}
impl std::convert::From<String> for Resolved {
    fn from(value: String) -> Self {
        Self::Value(Value::from(value))
    }
}
impl std::convert::From<i32> for Resolved {
    fn from(value: i32) -> Self {
        Self::Value(Value::from(value))
    }
}
impl std::convert::From<i64> for Resolved {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}
impl std::convert::From<f64> for Resolved {
    fn from(value: f64) -> Self {
        Self::Value(Value::from(value))
    }
}
impl std::convert::From<bool> for Resolved {
    fn from(value: bool) -> Self {
        Self::Value(Value::from(value))
    }
}
impl std::convert::From<Instance> for Resolved {
    fn from(value: Instance) -> Self {
        Self::Instance(value)
    }
}
impl std::convert::From<ScalarValue> for Resolved {
    fn from(value: ScalarValue) -> Self {
        Self::Scalar(value)
    }
}
impl<T: Into<Resolved>> std::convert::From<Vec<T>> for Resolved {
    fn from(value: Vec<T>) -> Self {
        Self::list(value)
    }
}
impl<T: Into<Resolved>> std::convert::From<Option<T>> for Resolved {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

/// A value constructed from an object, interface, input or subscription
/// declaration. Attributes are keyed by their native (snake_case) names.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub(crate) type_key: TypeKey,
    pub(crate) class_name: String,
    pub(crate) attrs: IndexMap<String, Resolved>,
}
impl Instance {
    pub(crate) fn new(
        type_key: TypeKey,
        class_name: impl Into<String>,
        attrs: IndexMap<String, Resolved>,
    ) -> Self {
        Self {
            type_key,
            class_name: class_name.into(),
            attrs,
        }
    }

    pub fn attrs(&self) -> &IndexMap<String, Resolved> {
        &self.attrs
    }

    pub fn class_name(&self) -> &str {
        self.class_name.as_str()
    }

    pub fn get(&self, attr_name: &str) -> Option<&Resolved> {
        self.attrs.get(attr_name)
    }

    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }
}

/// An opaque native value, serialized by a custom scalar's serializer.
#[derive(Clone)]
pub struct ScalarValue {
    pub(crate) type_key: Option<TypeKey>,
    value: Arc<dyn Any + Send + Sync>,
}
impl ScalarValue {
    pub(crate) fn new<T: Any + Send + Sync>(
        type_key: Option<TypeKey>,
        value: T,
    ) -> Self {
        Self {
            type_key,
            value: Arc::new(value),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn type_key(&self) -> Option<TypeKey> {
        self.type_key
    }
}
impl std::fmt::Debug for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarValue")
            .field("type_key", &self.type_key)
            .finish_non_exhaustive()
    }
}
impl std::cmp::PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_key == other.type_key && Arc::ptr_eq(&self.value, &other.value)
    }
}

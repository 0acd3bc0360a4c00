use crate::schema::Model;
use crate::schema::SchemaBuildError;
use crate::types::DeclaredType;
use crate::types::GraphQLType;
use crate::types::ObjectType;
use crate::types::ObjectTypeData;
use crate::types::TypeKey;
use crate::TypeRegistry;
use std::collections::HashMap;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Per-build memo of models, GraphQL names and object field tables.
///
/// A `Metadata` belongs to a single schema build. Every lookup is keyed by
/// the declaration's [`TypeKey`].
#[derive(Debug, Default)]
pub struct Metadata {
    registry: TypeRegistry,
    data: HashMap<TypeKey, Arc<ObjectTypeData>>,
    models: HashMap<TypeKey, Arc<Model>>,
    names: HashMap<TypeKey, String>,
}
impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Builds (once) and returns the model of a declaration.
    pub fn get_graphql_model(&mut self, graphql_type: &GraphQLType) -> Result<Arc<Model>> {
        let key = graphql_type.key();
        if let Some(model) = self.models.get(&key) {
            return Ok(model.clone());
        }

        // Recorded up front so self-referencing fields resolve while the
        // model is being built.
        self.names
            .entry(key)
            .or_insert_with(|| graphql_type.graphql_name());

        log::debug!("building model for {graphql_type:?}");
        let model = Arc::new(graphql_type.build_model(self)?);
        self.names.insert(key, model.name.to_string());
        self.models.insert(key, model.clone());
        Ok(model)
    }

    /// The GraphQL name a declaration ends up with in the schema.
    pub fn get_graphql_name(&mut self, graphql_type: &GraphQLType) -> Result<String> {
        if let Some(name) = self.names.get(&graphql_type.key()) {
            return Ok(name.to_string());
        }
        Ok(self.get_graphql_model(graphql_type)?.name.to_string())
    }

    pub fn set_graphql_name(&mut self, key: TypeKey, name: impl Into<String>) {
        self.names.insert(key, name.into());
    }

    pub(crate) fn get_declared_name(&self, declared: &dyn DeclaredType) -> String {
        self.names
            .get(&declared.key())
            .cloned()
            .unwrap_or_else(|| declared.graphql_name())
    }

    /// The field table of a code-first object-like declaration, extracted
    /// once per build.
    pub fn get_object_data(&mut self, object_type: &ObjectType) -> Result<Arc<ObjectTypeData>> {
        if let Some(data) = self.data.get(&object_type.key()) {
            return Ok(data.clone());
        }
        let data = Arc::new(object_type.object_data()?);
        self.data.insert(object_type.key(), data.clone());
        Ok(data)
    }
}

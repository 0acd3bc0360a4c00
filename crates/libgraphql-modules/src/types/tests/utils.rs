use crate::schema::Metadata;
use crate::schema::Model;
use crate::types::GraphQLType;
use std::sync::Arc;

/// Builds the model of a single declaration in a fresh build.
pub fn build_model(graphql_type: &GraphQLType) -> Arc<Model> {
    Metadata::new()
        .get_graphql_model(graphql_type)
        .unwrap()
}

/// The printed SDL of a single declaration's model.
pub fn model_sdl(graphql_type: &GraphQLType) -> String {
    build_model(graphql_type).ast.to_string()
}

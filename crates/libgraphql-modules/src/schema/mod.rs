mod executable_schema;
mod metadata;
mod model;
mod roots;
mod runtime;
#[allow(clippy::module_inception)]
mod schema;
mod schema_bindings;
mod schema_build_error;
mod sort;

pub use executable_schema::make_executable_schema;
pub use executable_schema::ExecutableSchemaBuilder;
pub use metadata::Metadata;
pub use model::Model;
pub use model::ModelKind;
pub use model::ObjectModel;
pub use roots::merge_root_nodes;
pub use roots::ROOTS_NAMES;
pub use schema::Schema;
pub(crate) use schema_bindings::SchemaBindings;
pub use schema_build_error::SchemaBuildError;
pub use sort::sort_schema_document;

#[cfg(test)]
mod tests;

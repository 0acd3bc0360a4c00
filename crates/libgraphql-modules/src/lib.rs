//! Declare GraphQL types in Rust, code-first or schema-first, and compile
//! them into an executable [`async_graphql`] dynamic schema.
//!
//! ```
//! use libgraphql_modules::make_executable_schema;
//! use libgraphql_modules::types::ObjectTypeBuilder;
//! use libgraphql_modules::types::Resolver;
//! use libgraphql_modules::types::ResolverDecl;
//! use libgraphql_modules::types::TypeHint;
//!
//! # fn main() -> anyhow::Result<()> {
//! let query = ObjectTypeBuilder::new("QueryType")
//!     .annotation("hello", TypeHint::String)
//!     .resolver(ResolverDecl::new(
//!         "hello",
//!         Resolver::new(|_parent, _args| Ok("Hello World!".into())),
//!     ))
//!     .build()?;
//!
//! let schema = make_executable_schema(&[query])?;
//! assert_eq!(schema.sdl(), "type Query {\n  hello: String!\n}\n");
//! # Ok(())
//! # }
//! ```

pub mod ast;
mod convert_name;
mod deferred_type;
mod description;
mod resolved;
pub mod schema;
pub mod types;
mod value;

pub use convert_name::convert_graphql_name_to_python;
pub use convert_name::convert_python_name_to_graphql;
pub use deferred_type::deferred;
pub use deferred_type::DeferredType;
pub use deferred_type::TypeRegistry;
pub use description::get_description_node;
pub use resolved::Instance;
pub use resolved::Resolved;
pub use resolved::ScalarValue;
pub use schema::make_executable_schema;
pub use schema::ExecutableSchemaBuilder;
pub use schema::Schema;
pub use value::get_value_from_node;
pub use value::get_value_node;
pub use value::ValueNodeError;

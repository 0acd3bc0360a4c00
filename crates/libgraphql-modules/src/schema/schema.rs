use crate::ast;
use crate::Resolved;
use async_graphql::dynamic;
use async_graphql::dynamic::DynamicRequest;
use async_graphql::dynamic::DynamicRequestExt;
use async_graphql::dynamic::FieldValue;
use futures::stream::BoxStream;

/// An executable schema assembled from declarations.
///
/// Cloning is cheap. The schema can serve concurrent requests.
#[derive(Clone)]
pub struct Schema {
    inner: dynamic::Schema,
    document: ast::schema::Document,
    sdl: String,
}
impl Schema {
    pub(crate) fn new(
        inner: dynamic::Schema,
        document: ast::schema::Document,
        sdl: String,
    ) -> Self {
        Self {
            inner,
            document,
            sdl,
        }
    }

    /// The sorted SDL of the schema.
    pub fn sdl(&self) -> &str {
        self.sdl.as_str()
    }

    pub fn document(&self) -> &ast::schema::Document {
        &self.document
    }

    pub async fn execute(&self, request: impl Into<DynamicRequest>) -> async_graphql::Response {
        self.inner.execute(request).await
    }

    /// Executes `request` with `root` as the parent value of root fields.
    pub async fn execute_with_root(
        &self,
        request: impl Into<async_graphql::Request>,
        root: Resolved,
    ) -> async_graphql::Response {
        self.inner.execute(request.root_value(FieldValue::owned_any(root))).await
    }

    pub fn execute_stream(
        &self,
        request: impl Into<DynamicRequest>,
    ) -> BoxStream<'static, async_graphql::Response> {
        self.inner.execute_stream(request)
    }

    /// The underlying engine schema.
    pub fn inner(&self) -> &dynamic::Schema {
        &self.inner
    }
}
impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("sdl", &self.sdl)
            .finish_non_exhaustive()
    }
}

use crate::types::DeclarationError;
use crate::types::GraphQLType;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, DeclarationError>;

/// An absolute, dot-separated module path naming where a deferred type is
/// registered.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DeferredType {
    path: String,
}
impl DeferredType {
    pub fn path(&self) -> &str {
        self.path.as_str()
    }
}

/// Creates a [`DeferredType`] for `module_path`.
///
/// Absolute paths are stored verbatim. A relative path (one starting with
/// `.`) is resolved against `current_package`: the first dot refers to the
/// package itself and every further leading dot ascends one level, so
/// `..types` from `lorem.ipsum` is `lorem.types`. Ascending past the top of
/// `current_package` is an error.
///
/// The [`deferred!`](crate::deferred!) macro fills in `current_package`
/// from the calling module.
pub fn deferred(module_path: &str, current_package: &str) -> Result<DeferredType> {
    let Some(mut suffix) = module_path.strip_prefix('.') else {
        return Ok(DeferredType { path: module_path.to_string() });
    };

    let mut packages: Vec<&str> = current_package
        .split('.')
        .filter(|package| !package.is_empty())
        .collect();

    while let Some(rest) = suffix.strip_prefix('.') {
        suffix = rest;
        packages.pop();
        if packages.is_empty() {
            return Err(DeclarationError::DeferredPathOutsidePackage {
                module_path: module_path.to_string(),
                package: current_package.to_string(),
            });
        }
    }

    let path =
        if packages.is_empty() {
            suffix.to_string()
        } else {
            format!("{}.{suffix}", packages.join("."))
        };
    log::trace!("resolved deferred path `{module_path}` to `{path}`");
    Ok(DeferredType { path })
}

/// Resolves a possibly-relative module path against the calling module.
///
/// The package is the calling module itself, not its parent. Inside
/// `app::users`, `.types` means `app.users.types` (a child, like
/// `self::types`) and `..types` means `app.types` (a sibling, like
/// `super::types`).
///
/// ```
/// let deferred = libgraphql_modules::deferred!("crate_name.types").unwrap();
/// assert_eq!(deferred.path(), "crate_name.types");
/// ```
#[macro_export]
macro_rules! deferred {
    ($module_path:expr) => {
        $crate::deferred(
            $module_path,
            &::std::module_path!().replace("::", "."),
        )
    };
}

/// Maps module paths to the declarations registered under them.
///
/// Deferred type hints are resolved through a registry in a second phase,
/// after every declaration that may be referenced has been registered.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    modules: IndexMap<String, IndexMap<String, GraphQLType>>,
}
impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `graphql_type` under `module_path`, keyed by its
    /// declaration name.
    pub fn register(
        &mut self,
        module_path: impl Into<String>,
        graphql_type: &GraphQLType,
    ) -> &mut Self {
        self.modules
            .entry(module_path.into())
            .or_default()
            .insert(graphql_type.class_name().to_string(), graphql_type.clone());
        self
    }

    pub fn get(&self, module_path: &str, name: &str) -> Option<&GraphQLType> {
        self.modules.get(module_path)?.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = &GraphQLType> {
        self.modules.values().flat_map(|types| types.values())
    }
}

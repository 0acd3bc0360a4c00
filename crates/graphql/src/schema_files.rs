use crate::cli::SchemaFileArgs;
use libgraphql_modules::ast;
use libgraphql_modules::types::GraphQLType;
use libgraphql_modules::ExecutableSchemaBuilder;
use libgraphql_modules::Schema;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
pub(crate) enum SchemaFileError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to scan {path:?}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Failed to parse {path:?}: {message}")]
    Parse {
        path: PathBuf,
        message: String,
    },

    #[error("Invalid declaration of `{type_name}` in {path:?}: {source}")]
    Declaration {
        path: PathBuf,
        type_name: String,
        source: libgraphql_modules::types::DeclarationError,
    },

    #[error("Failed to assemble the schema: {0}")]
    Schema(#[from] libgraphql_modules::schema::SchemaBuildError),
}

/// The files found for a set of [`SchemaFileArgs`].
#[derive(Debug, Default)]
pub(crate) struct FoundFiles {
    pub file_paths: Vec<PathBuf>,
    pub num_skipped: usize,
    pub errors: Vec<SchemaFileError>,
}

/// Finds all GraphQL files recursively located at or under each path.
pub(crate) fn find_schema_files(args: &SchemaFileArgs) -> FoundFiles {
    let graphql_file_exts: HashSet<String> =
        args.graphql_file_exts.iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();

    log::debug!("Scanning {} input paths...", args.file_or_dir_paths.len());
    let mut found = FoundFiles::default();
    for path in &args.file_or_dir_paths {
        for entry in WalkDir::new(path.as_path()).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    log::trace!("Failed to scan an entry at/under {path:#?}.");
                    found.errors.push(SchemaFileError::Walk {
                        path: path.to_owned(),
                        source,
                    });
                    continue
                },
            };

            let entry_path = entry.path();
            let matches_ext = entry_path
                .extension()
                .is_some_and(|ext| graphql_file_exts.contains(&*ext.to_string_lossy()));
            if entry.file_type().is_file() && matches_ext {
                log::trace!("Found GraphQL file at {entry_path:#?}.");
                found.file_paths.push(entry_path.to_owned());
            } else {
                log::trace!("Skipping {entry_path:#?}.");
                found.num_skipped += 1;
            }
        }
    }

    // A single file passed explicitly is loaded even when its extension
    // doesn't match.
    if found.file_paths.is_empty()
        && args.file_or_dir_paths.len() == 1
        && let Some(path) = args.file_or_dir_paths.first()
        && path.is_file() {
        log::warn!(
            "Proceeding to load {path:#?} even though it doesn't match any of \
            the --graphql-file-exts ({}).",
            graphql_file_exts.iter()
                .map(|ext| format!("`.{ext}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        found.num_skipped = found.num_skipped.saturating_sub(1);
        found.file_paths.push(path.to_owned());
    }

    log::debug!("Found {} GraphQL files.", found.file_paths.len());
    found
}

/// Parses every file (in parallel) into one schema-first declaration per
/// type definition. Errors from all files are collected.
pub(crate) fn load_declarations(
    file_paths: &[PathBuf],
) -> Result<Vec<GraphQLType>, Vec<SchemaFileError>> {
    let results: Vec<Result<Vec<GraphQLType>, Vec<SchemaFileError>>> = file_paths
        .par_iter()
        .map(|path| load_file(path))
        .collect();

    let mut types = vec![];
    let mut errors = vec![];
    for result in results {
        match result {
            Ok(file_types) => types.extend(file_types),
            Err(file_errors) => errors.extend(file_errors),
        }
    }

    if errors.is_empty() {
        Ok(types)
    } else {
        Err(errors)
    }
}

fn load_file(path: &Path) -> Result<Vec<GraphQLType>, Vec<SchemaFileError>> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        vec![SchemaFileError::Io {
            path: path.to_owned(),
            source,
        }]
    })?;
    let document = ast::schema::parse_owned(&content).map_err(|err| {
        vec![SchemaFileError::Parse {
            path: path.to_owned(),
            message: err.to_string(),
        }]
    })?;

    let mut types = vec![];
    let mut errors = vec![];
    for definition in document.definitions {
        let ast::schema::Definition::TypeDefinition(type_def) = definition else {
            log::warn!("Ignoring a non-type definition in {path:#?}.");
            continue
        };
        let type_name = ast::schema::type_def_name(&type_def).to_string();
        match GraphQLType::from_schema(type_name.to_string(), type_def.to_string()) {
            Ok(graphql_type) => types.push(graphql_type),
            Err(source) => errors.push(SchemaFileError::Declaration {
                path: path.to_owned(),
                type_name,
                source,
            }),
        }
    }
    log::trace!("Loaded {} declarations from {path:#?}.", types.len());

    if errors.is_empty() {
        Ok(types)
    } else {
        Err(errors)
    }
}

/// Finds, loads and assembles the declarations named by `args`.
pub(crate) fn build_schema(
    args: &SchemaFileArgs,
) -> Result<(Schema, FoundFiles), Vec<SchemaFileError>> {
    let mut found = find_schema_files(args);
    if !found.errors.is_empty() {
        return Err(std::mem::take(&mut found.errors));
    }

    let types = load_declarations(&found.file_paths)?;
    let schema = ExecutableSchemaBuilder::new()
        .add_types(&types)
        .merge_roots(!args.no_merge_roots)
        .build()
        .map_err(|err| vec![SchemaFileError::from(err)])?;
    Ok((schema, found))
}

use clap::CommandFactory;
use crate::commands;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(name = "graphql", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        help="Enable verbose output.",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        Ok(())
    }
}

/// Where to look for schema declaration files.
#[derive(clap::Args, Debug)]
pub(crate) struct SchemaFileArgs {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "graphqls".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    pub graphql_file_exts: Vec<String>,

    #[arg(
        help="Reject schemas that define the same root type in more than one \
             declaration instead of merging their fields.",
        long,
    )]
    pub no_merge_roots: bool,

    #[arg(
        help="Paths to one or more GraphQL files or directories containing \
             GraphQL files. Every type definition found becomes one \
             schema-first declaration.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    pub file_or_dir_paths: Vec<PathBuf>,
}

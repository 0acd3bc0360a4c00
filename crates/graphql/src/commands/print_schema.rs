use crate::cli::SchemaFileArgs;
use crate::commands::RunnableCommand;
use crate::output_utils;
use crate::schema_files;
use crate::Cli;
use crate::CommandResult;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct PrintSchemaCmd {
    #[command(flatten)]
    files: SchemaFileArgs,

    #[arg(
        help="Write the schema to this file instead of stdout.",
        long,
        short='o',
    )]
    output: Option<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for PrintSchemaCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let (schema, _) = match schema_files::build_schema(&self.files) {
            Ok(built) => built,
            Err(errors) => return CommandResult::errors("Failed to assemble the schema", &errors),
        };

        let Some(output) = self.output else {
            return CommandResult::stdout(format_args!("{}", schema.sdl().trim_end()));
        };
        match std::fs::write(&output, schema.sdl()) {
            Ok(()) => {
                log::info!("Wrote schema to {output:#?}.");
                CommandResult::stdout(format_args!(
                    "{} Wrote schema to {}.",
                    output_utils::GREEN_CHECK,
                    output.display(),
                ))
            },
            Err(err) => CommandResult::stderr(format_args!(
                "{} Failed to write {}: {err}",
                output_utils::RED_X,
                output.display(),
            )),
        }
    }
}

mod print_schema;
mod validate;

use crate::Cli;
use crate::CommandResult;
use print_schema::PrintSchemaCmd;
use validate::ValidateCmd;

pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}

#[derive(Debug, clap::Parser)]
#[command(name = "graphql")]
pub(crate) enum CommandEnum {
    /// Assemble the declarations found in GraphQL files into an executable
    /// schema and report any errors.
    Validate(Box<ValidateCmd>),

    /// Print the sorted SDL of the assembled schema.
    PrintSchema(Box<PrintSchemaCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::PrintSchema(cmd) => cmd.run(cli).await,
            Self::Validate(cmd) => cmd.run(cli).await,
        }
    }
}

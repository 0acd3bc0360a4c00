use crate::cli::SchemaFileArgs;
use crate::commands::RunnableCommand;
use crate::output_utils;
use crate::schema_files;
use crate::Cli;
use crate::CommandResult;
use libgraphql_modules::ast;
use libgraphql_modules::schema::ROOTS_NAMES;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[command(flatten)]
    files: SchemaFileArgs,
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let (schema, found) = match schema_files::build_schema(&self.files) {
            Ok(built) => built,
            Err(errors) => return CommandResult::errors("GraphQL validation failed", &errors),
        };

        let type_defs: Vec<&ast::schema::TypeDefinition> = schema.document()
            .definitions
            .iter()
            .filter_map(|definition| match definition {
                ast::schema::Definition::TypeDefinition(type_def) => Some(type_def),
                _ => None,
            })
            .collect();
        let count = |pred: fn(&ast::schema::TypeDefinition) -> bool| {
            type_defs.iter().filter(|type_def| pred(type_def)).count()
        };
        let num_roots = type_defs
            .iter()
            .filter(|type_def| ROOTS_NAMES.contains(&ast::schema::type_def_name(type_def)))
            .count();

        CommandResult::stdout(format_args!(
            concat!(
                "{} All GraphQL validated successfully:\n",
                "  * Analyzed {}.\n",
                "  * Skipped {}.\n",
                "  * Validated {} ({}).\n",
                "  * Assembled {} object types, {} interfaces, {} unions, ",
                "{} enums, {} input types and {} scalars.",
            ),
            output_utils::GREEN_CHECK,
            output_utils::plural(found.file_paths.len(), "file"),
            output_utils::plural(found.num_skipped, "non-graphql entry"),
            output_utils::plural(type_defs.len(), "type definition"),
            output_utils::plural(num_roots, "root type"),
            count(|def| matches!(def, ast::schema::TypeDefinition::Object(_))),
            count(|def| matches!(def, ast::schema::TypeDefinition::Interface(_))),
            count(|def| matches!(def, ast::schema::TypeDefinition::Union(_))),
            count(|def| matches!(def, ast::schema::TypeDefinition::Enum(_))),
            count(|def| matches!(def, ast::schema::TypeDefinition::InputObject(_))),
            count(|def| matches!(def, ast::schema::TypeDefinition::Scalar(_))),
        ))
    }
}

use std::process::ExitCode;

#[derive(Debug)]
pub(crate) struct CommandResult {
    pub exit_code: ExitCode,
    pub stderr: Option<String>,
    pub stdout: Option<String>,
}

impl CommandResult {
    pub fn stderr(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            exit_code: ExitCode::FAILURE,
            stderr: Some(format!("{fmt_args}")),
            stdout: None,
        }
    }

    pub fn stdout(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            exit_code: ExitCode::SUCCESS,
            stderr: None,
            stdout: Some(format!("{fmt_args}")),
        }
    }

    /// Reports every error of a failed run, one per line.
    pub fn errors<E: std::fmt::Display>(summary: &str, errors: &[E]) -> Self {
        let details: Vec<String> = errors
            .iter()
            .map(|err| format!("  * {err}"))
            .collect();
        Self::stderr(format_args!(
            "{} {summary} ({} errors):\n{}",
            crate::output_utils::RED_X,
            errors.len(),
            details.join("\n"),
        ))
    }
}

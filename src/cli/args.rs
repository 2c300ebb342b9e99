//! Command-line argument parsing.

use thiserror::Error;

/// Usage text printed by `--help` and on argument errors.
pub const USAGE: &str = "\
Usage: claudeapi [OPTIONS] [MESSAGE...]

Send MESSAGE to the chat endpoint and print the streamed reply.
With no MESSAGE, the message is read from stdin.

Options:
      --orgs            List organizations and exit
      --org <ID>        Organization to chat with (default: the first one)
      --base-url <URL>  API server (default: $CLAUDEAPI_BASE_URL or http://localhost:3000)
  -V, --version         Print version
  -h, --help            Print help";

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Print `id<TAB>name` for each organization
    ListOrganizations,
    /// Send a message and stream the reply
    Chat {
        org_id: Option<String>,
        /// `None` means read from stdin
        message: Option<String>,
    },
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: CliCommand,
    pub base_url: Option<String>,
}

/// Error parsing the command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

/// Parse command-line arguments, skipping the program name.
///
/// ```
/// use claudeapi::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["claudeapi".to_string(), "--orgs".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap().command, CliCommand::ListOrganizations);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let mut base_url = None;
    let mut org_id = None;
    let mut list = false;
    let mut words: Vec<String> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliArgs { command: CliCommand::Version, base_url }),
            "--help" | "-h" => return Ok(CliArgs { command: CliCommand::Help, base_url }),
            "--orgs" => list = true,
            "--org" => org_id = Some(args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?),
            "--base-url" => {
                base_url = Some(args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?)
            }
            "--" => words.extend(args.by_ref()),
            flag if flag.starts_with("--") => return Err(ArgsError::UnknownOption(flag.to_string())),
            _ => words.push(arg),
        }
    }

    let command = if list {
        CliCommand::ListOrganizations
    } else {
        CliCommand::Chat {
            org_id,
            message: (!words.is_empty()).then(|| words.join(" ")),
        }
    };

    Ok(CliArgs { command, base_url })
}

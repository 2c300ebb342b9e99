//! Command-line front-end.
//!
//! Lists organizations or sends one message and prints the streamed reply
//! as it arrives:
//!
//! ```ignore
//! use claudeapi::cli::{parse_args, run};
//!
//! let args = parse_args(std::env::args())?;
//! run(args).await?;
//! ```

pub mod args;
pub mod output;
pub mod version;

pub use args::{parse_args, ArgsError, CliArgs, CliCommand, USAGE};
pub use output::event_text;
pub use version::{version_line, VERSION};

use std::io::{Read, Write};

use color_eyre::eyre::{bail, eyre, Report, WrapErr};
use color_eyre::{Result, Section};
use futures_util::StreamExt;
use tracing::debug;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::traits::HttpClient;

/// Execute a parsed command against the configured backend.
pub async fn run(args: CliArgs) -> Result<()> {
    let mut stdout = std::io::stdout();

    let client = match args.command {
        CliCommand::Version => {
            writeln!(stdout, "{}", version_line())?;
            return Ok(());
        }
        CliCommand::Help => {
            writeln!(stdout, "{}", USAGE)?;
            return Ok(());
        }
        _ => {
            let mut config = ClientConfig::from_env()?;
            if let Some(url) = &args.base_url {
                config = config.with_base_url(url)?;
            }
            ApiClient::new(config)?
        }
    };

    let result = match args.command {
        CliCommand::ListOrganizations => list_organizations(&client, &mut stdout).await,
        CliCommand::Chat { org_id, message } => {
            let message = match message {
                Some(message) => message,
                None => read_message(std::io::stdin().lock())?,
            };
            chat(&client, org_id.as_deref(), &message, &mut stdout).await
        }
        CliCommand::Version | CliCommand::Help => Ok(()),
    };

    result.map_err(|report| match recovery_hint(&report) {
        Some(hint) => report.suggestion(hint),
        None => report,
    })
}

/// Recovery advice for a failed API call anywhere in `report`'s chain.
pub fn recovery_hint(report: &Report) -> Option<&'static str> {
    report
        .chain()
        .find_map(|cause| cause.downcast_ref::<ApiError>())
        .map(|err| err.category().recovery_hint())
}

/// Print `id<TAB>name` for each organization.
pub async fn list_organizations<C, W>(client: &ApiClient<C>, out: &mut W) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    for org in client.get_organizations().await? {
        writeln!(out, "{}\t{}", org.id, org.name)?;
    }
    Ok(())
}

/// Send `message` and write the reply text to `out` as it streams in.
///
/// Without `org_id`, the first organization the backend lists is used.
pub async fn chat<C, W>(
    client: &ApiClient<C>,
    org_id: Option<&str>,
    message: &str,
    out: &mut W,
) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    if message.trim().is_empty() {
        bail!("Message is empty");
    }

    let org_id = match org_id {
        Some(id) => id.to_string(),
        None => client
            .get_organizations()
            .await?
            .into_iter()
            .next()
            .map(|org| org.id)
            .ok_or_else(|| eyre!("No organizations available"))?,
    };

    let mut events = client.stream_chat(&org_id, message).await?;
    while let Some(event) = events.next().await {
        let event = event.wrap_err("Chat stream failed")?;
        match event_text(&event) {
            Some(text) => {
                write!(out, "{}", text)?;
                out.flush()?;
            }
            None => debug!(%event, "event without text"),
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Read the whole message from `input`, trimming the trailing newline.
pub fn read_message<R: Read>(mut input: R) -> Result<String> {
    let mut message = String::new();
    input
        .read_to_string(&mut message)
        .wrap_err("Failed to read message from stdin")?;
    Ok(message.trim_end_matches(['\r', '\n']).to_string())
}

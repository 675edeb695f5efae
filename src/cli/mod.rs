//! CLI command handling
//!
//! Maps each parsed command to a [`Handler`] and runs it against the
//! Autify API.

mod handlers;

use async_trait::async_trait;
use std::io::Write;

use crate::api::{AutifyApi, AutifyClient};
use crate::commands::Commands;
use crate::common::config::{self, Config, ACCESS_TOKEN_ENV_NAME};
use crate::common::logging::LogSettings;
use crate::common::{Error, Result};

pub use handlers::{ResultHandler, RunHandler, ScenarioHandler, VersionHandler};

/// Process exit code on success, including a run that timed out
pub const EXIT_CODE_OK: i32 = 0;
/// Process exit code on any failure
pub const EXIT_CODE_ERROR: i32 = 1;

/// Everything a handler needs to execute
pub struct Context {
    pub config: Config,
    pub log: LogSettings,
    api: Option<Box<dyn AutifyApi>>,
}

impl Context {
    /// Context without API access, for commands that need no credential
    pub fn offline(config: Config, log: LogSettings) -> Self {
        Self {
            config,
            log,
            api: None,
        }
    }

    /// Context using the given API implementation
    pub fn with_api(config: Config, log: LogSettings, api: Box<dyn AutifyApi>) -> Self {
        Self {
            config,
            log,
            api: Some(api),
        }
    }

    /// The API gateway
    pub fn api(&self) -> Result<&dyn AutifyApi> {
        self.api
            .as_deref()
            .ok_or(Error::MissingCredential(ACCESS_TOKEN_ENV_NAME))
    }
}

/// A CLI command
#[async_trait]
pub trait Handler: Send + Sync {
    /// One-line description, used in logs
    fn describe(&self) -> &'static str;

    /// Whether the command talks to the API
    fn needs_credential(&self) -> bool {
        true
    }

    /// Run the command, writing its JSON output to `out`
    async fn execute(&self, ctx: &Context, out: &mut (dyn Write + Send)) -> Result<()>;
}

/// Look up the handler for a parsed command
pub fn handler(command: Commands) -> Box<dyn Handler> {
    match command {
        Commands::Run {
            project_id,
            plan_id,
            interval,
            timeout,
            no_spinner,
        } => Box::new(RunHandler {
            project_id,
            plan_id,
            interval,
            timeout,
            spinner: !no_spinner,
        }),
        Commands::Scenario {
            project_id,
            scenario_id,
        } => Box::new(ScenarioHandler {
            project_id,
            scenario_id,
        }),
        Commands::Result {
            project_id,
            result_id,
        } => Box::new(ResultHandler {
            project_id,
            result_id,
        }),
        Commands::Version => Box::new(VersionHandler),
    }
}

/// Dispatch a CLI command
///
/// The credential is checked once here, before any request is made.
pub async fn dispatch(command: Commands, config: Config, log: LogSettings) -> Result<()> {
    let handler = handler(command);

    let ctx = if handler.needs_credential() {
        let token = config::access_token()?;
        let client = AutifyClient::from_config(token, &config.api)?;
        Context::with_api(config, log, Box::new(client))
    } else {
        Context::offline(config, log)
    };

    tracing::debug!(command = handler.describe(), "Dispatching command");
    let mut stdout = std::io::stdout();
    handler.execute(&ctx, &mut stdout).await
}

/// Write `value` as one line of JSON
pub(crate) fn print_json<T: serde::Serialize>(
    out: &mut (dyn Write + Send),
    value: &T,
) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

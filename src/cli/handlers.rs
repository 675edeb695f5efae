//! Command handlers

use async_trait::async_trait;
use std::io::Write;

use crate::common::Result;
use crate::runner::{Coordinator, Outcome, PollConfig};

use super::{print_json, Context, Handler};

/// `atf run`: start a test plan and wait for its result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHandler {
    pub project_id: u64,
    pub plan_id: u64,
    /// Seconds between polls; falls back to config
    pub interval: Option<u64>,
    /// Minutes before giving up; falls back to config
    pub timeout: Option<u64>,
    pub spinner: bool,
}

#[async_trait]
impl Handler for RunHandler {
    fn describe(&self) -> &'static str {
        "Run test plan"
    }

    async fn execute(&self, ctx: &Context, out: &mut (dyn Write + Send)) -> Result<()> {
        let poll = PollConfig::from_cli_units(
            self.interval.unwrap_or(ctx.config.run.interval_secs),
            self.timeout.unwrap_or(ctx.config.run.timeout_minutes),
        )?;
        let api = ctx.api()?;

        let coordinator = Coordinator::new(poll, &ctx.log)
            .with_spinner(self.spinner && ctx.config.run.spinner);

        match coordinator
            .run_plan(api, self.project_id, self.plan_id)
            .await?
        {
            Outcome::Completed(result) => print_json(out, &result),
            Outcome::TimedOut { handle, polls, .. } => {
                // stdout stays empty so scripts only ever see a final result
                eprintln!(
                    "Test plan result {} still running after {} polls. Check it later with 'atf result --project-id {} --result-id {}'",
                    handle.result_id(),
                    polls,
                    self.project_id,
                    handle.result_id()
                );
                Ok(())
            }
        }
    }
}

/// `atf scenario`: print scenario metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioHandler {
    pub project_id: u64,
    pub scenario_id: u64,
}

#[async_trait]
impl Handler for ScenarioHandler {
    fn describe(&self) -> &'static str {
        "Get scenario"
    }

    async fn execute(&self, ctx: &Context, out: &mut (dyn Write + Send)) -> Result<()> {
        let scenario = ctx
            .api()?
            .fetch_scenario(self.project_id, self.scenario_id)
            .await?;
        print_json(out, &scenario)
    }
}

/// `atf result`: print one test plan result without waiting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultHandler {
    pub project_id: u64,
    pub result_id: u64,
}

#[async_trait]
impl Handler for ResultHandler {
    fn describe(&self) -> &'static str {
        "Get result"
    }

    async fn execute(&self, ctx: &Context, out: &mut (dyn Write + Send)) -> Result<()> {
        let result = ctx
            .api()?
            .fetch_result(self.project_id, self.result_id)
            .await?;
        print_json(out, &result)
    }
}

/// `atf version`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionHandler;

#[async_trait]
impl Handler for VersionHandler {
    fn describe(&self) -> &'static str {
        "Print cli version"
    }

    fn needs_credential(&self) -> bool {
        false
    }

    async fn execute(&self, _ctx: &Context, out: &mut (dyn Write + Send)) -> Result<()> {
        writeln!(
            out,
            "Version: {}\nRevision: {}",
            env!("CARGO_PKG_VERSION"),
            option_env!("ATF_REVISION").unwrap_or("unknown")
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AutifyApi, RunHandle, Scenario, StatusKind, TestPlanResult};
    use crate::cli::handler;
    use crate::commands::Commands;
    use crate::common::config::Config;
    use crate::common::logging::LogSettings;
    use crate::common::Error;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// In-memory API returning a scripted status sequence
    struct StubApi {
        statuses: Mutex<Vec<StatusKind>>,
        starts: AtomicU32,
        fetches: AtomicU32,
    }

    impl StubApi {
        fn new(statuses: Vec<StatusKind>) -> Self {
            Self {
                statuses: Mutex::new(statuses),
                starts: AtomicU32::new(0),
                fetches: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl AutifyApi for StubApi {
        async fn run_test_plan(&self, plan_id: u64) -> Result<RunHandle> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_value(serde_json::json!({
                "id": plan_id.to_string(),
                "type": "test_plan_result",
                "attributes": { "id": 500 }
            }))?)
        }

        async fn fetch_result(&self, _project_id: u64, result_id: u64) -> Result<TestPlanResult> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let mut statuses = self.statuses.lock().unwrap();
            let status = if statuses.len() > 1 {
                statuses.remove(0)
            } else {
                statuses[0].clone()
            };
            Ok(serde_json::from_value(serde_json::json!({
                "id": result_id,
                "status": status,
            }))?)
        }

        async fn fetch_scenario(&self, _project_id: u64, scenario_id: u64) -> Result<Scenario> {
            Ok(serde_json::from_value(serde_json::json!({
                "id": scenario_id,
                "name": "Checkout flow",
            }))?)
        }
    }

    fn context(api: StubApi) -> Context {
        Context::with_api(Config::default(), LogSettings::default(), Box::new(api))
    }

    fn run_handler(interval: u64, timeout: u64) -> RunHandler {
        RunHandler {
            project_id: 1,
            plan_id: 2,
            interval: Some(interval),
            timeout: Some(timeout),
            spinner: false,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_prints_terminal_result() {
        let ctx = context(StubApi::new(vec![
            StatusKind::Queuing,
            StatusKind::Running,
            StatusKind::Warning,
        ]));
        let mut out = Vec::new();

        run_handler(1, 1).execute(&ctx, &mut out).await.unwrap();

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["status"], "warning");
        assert_eq!(printed["id"], 500);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_timeout_prints_nothing() {
        let ctx = context(StubApi::new(vec![StatusKind::Running]));
        let mut out = Vec::new();

        run_handler(20, 1).execute(&ctx, &mut out).await.unwrap();

        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_run_rejects_zero_interval_from_config() {
        let mut config = Config::default();
        config.run.interval_secs = 0;
        let ctx = Context::with_api(
            config,
            LogSettings::default(),
            Box::new(StubApi::new(vec![StatusKind::Passed])),
        );
        let handler = RunHandler {
            interval: None,
            ..run_handler(1, 1)
        };
        let mut out = Vec::new();

        let err = handler.execute(&ctx, &mut out).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_prints_json() {
        let ctx = context(StubApi::new(vec![StatusKind::Passed]));
        let mut out = Vec::new();

        ScenarioHandler {
            project_id: 1,
            scenario_id: 77,
        }
        .execute(&ctx, &mut out)
        .await
        .unwrap();

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["id"], 77);
        assert_eq!(printed["name"], "Checkout flow");
    }

    #[tokio::test]
    async fn test_result_fetches_once() {
        let ctx = context(StubApi::new(vec![StatusKind::Running]));
        let mut out = Vec::new();

        ResultHandler {
            project_id: 1,
            result_id: 12,
        }
        .execute(&ctx, &mut out)
        .await
        .unwrap();

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["status"], "running");
    }

    #[tokio::test]
    async fn test_offline_context_has_no_api() {
        let ctx = Context::offline(Config::default(), LogSettings::default());
        let mut out = Vec::new();

        let err = ResultHandler {
            project_id: 1,
            result_id: 12,
        }
        .execute(&ctx, &mut out)
        .await
        .unwrap_err();
        assert!(matches!(err, Error::MissingCredential(_)));
    }

    #[tokio::test]
    async fn test_version_needs_no_credential() {
        let handler = handler(Commands::Version);
        assert!(!handler.needs_credential());

        let ctx = Context::offline(Config::default(), LogSettings::default());
        let mut out = Vec::new();
        handler.execute(&ctx, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_registry_maps_run_flags() {
        let handler = handler(Commands::Run {
            project_id: 1,
            plan_id: 2,
            interval: None,
            timeout: Some(10),
            no_spinner: true,
        });
        assert_eq!(handler.describe(), "Run test plan");
        assert!(handler.needs_credential());
    }
}

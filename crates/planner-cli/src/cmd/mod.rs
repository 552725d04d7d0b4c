pub mod config;
pub mod events;
pub mod init;
pub mod progress;
pub mod serve;
pub mod slots;
pub mod task;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;

use docstore_client::DocstoreClient;
use planner_core::config::{Config, GatewayConfig};
use planner_core::gateway::TaskGateway;
use planner_core::local::LocalStore;
use planner_core::remote::RemoteGateway;
use planner_core::store::TaskStore;

/// Build the task store against whichever gateway the config names.
pub(crate) fn open_store(root: &Path, config: &Config) -> anyhow::Result<TaskStore> {
    let registry = config.registry().context("invalid slot configuration")?;

    let gateway: Arc<dyn TaskGateway> = match &config.gateway {
        GatewayConfig::Local { data_file } => {
            let path = match data_file {
                Some(p) if p.is_absolute() => p.clone(),
                Some(p) => root.join(p),
                None => planner_core::paths::tasks_path(root),
            };
            Arc::new(LocalStore::new(path))
        }
        GatewayConfig::Docstore {
            base_url,
            project_id,
            api_key,
            collection,
        } => {
            let mut client = DocstoreClient::new(base_url.clone(), project_id.clone())?;
            if let Some(key) = api_key {
                client = client.with_api_key(key.clone());
            }
            Arc::new(RemoteGateway::new(client).with_collection(collection.clone()))
        }
    };

    Ok(TaskStore::new(registry, gateway))
}

/// `--date` value or today.
pub(crate) fn parse_date(s: Option<&str>) -> anyhow::Result<NaiveDate> {
    match s {
        Some(s) => s
            .parse()
            .with_context(|| format!("invalid date '{s}': expected YYYY-MM-DD")),
        None => Ok(chrono::Utc::now().date_naive()),
    }
}

/// The command layer is synchronous; each command brings up a runtime for
/// its gateway round trips.
pub(crate) fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}

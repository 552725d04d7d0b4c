use std::path::Path;
use std::sync::Arc;

use docstore_client::{IdentityClient, IdentityProvider};
use planner_core::config::Config;
use planner_server::AppState;

pub fn run(root: &Path, port: u16, no_open: bool) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let project = config.project.name.clone();
    let roster = config.roster();
    let store = Arc::new(super::open_store(root, &config)?);

    let provider: Option<Arc<dyn IdentityProvider>> = match &config.auth {
        Some(auth) => Some(Arc::new(IdentityClient::new(
            auth.base_url.clone(),
            auth.api_key.clone(),
        )?)),
        None => None,
    };
    if provider.is_none() {
        tracing::info!("no identity service configured; API is open");
    }

    let state = AppState::new(project.clone(), roster, store, provider);

    let rt = super::runtime()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!("Planner API for '{project}' → http://localhost:{actual_port}");

        tokio::select! {
            res = planner_server::serve_on(state, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}

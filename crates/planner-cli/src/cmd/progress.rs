use std::path::Path;

use planner_core::config::Config;
use planner_core::projector;

use crate::output::print_json;

pub fn run(root: &Path, date: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let store = super::open_store(root, &config)?;
    let date = super::parse_date(date)?;

    let rt = super::runtime()?;
    let snapshot = rt.block_on(async {
        store.load_for_date(date).await?;
        Ok::<_, anyhow::Error>(store.snapshot().await)
    })?;

    if json {
        print_json(&serde_json::json!({
            "date": date.to_string(),
            "progress": projector::progress_percentage(&snapshot),
            "completed": snapshot.completed_count(),
            "total": snapshot.total(),
        }))?;
        return Ok(());
    }

    println!("{date}: {}", super::task::summarize(&snapshot));
    Ok(())
}

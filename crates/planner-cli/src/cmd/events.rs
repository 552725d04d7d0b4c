use std::path::Path;

use planner_core::config::Config;
use planner_core::projector;

use crate::output::{print_json, print_table};

pub fn run(root: &Path, date: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let store = super::open_store(root, &config)?;
    let date = super::parse_date(date)?;

    let rt = super::runtime()?;
    let snapshot = rt.block_on(async {
        store.load_for_date(date).await?;
        Ok::<_, anyhow::Error>(store.snapshot().await)
    })?;

    let events = projector::calendar_events(&snapshot, store.registry(), date);

    if json {
        print_json(&serde_json::json!({ "date": date.to_string(), "events": events }))?;
        return Ok(());
    }

    if events.is_empty() {
        println!("No events for {date}.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|e| {
            vec![
                e.start.clone(),
                e.end.clone(),
                e.background_color.clone(),
                e.title.clone(),
            ]
        })
        .collect();
    print_table(&["START", "END", "COLOR", "TITLE"], rows);
    Ok(())
}

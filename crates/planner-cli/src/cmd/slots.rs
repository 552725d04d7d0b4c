use std::path::Path;

use planner_core::config::Config;
use planner_core::roster::Roster;

use crate::output::{print_json, print_table};

pub fn run_slots(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let registry = config.registry()?;

    if json {
        let labels: Vec<&str> = registry.labels().collect();
        print_json(&serde_json::json!({ "slots": labels }))?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = registry
        .slots()
        .iter()
        .map(|s| {
            vec![
                s.label.clone(),
                s.start.to_string(),
                s.end.to_string(),
            ]
        })
        .collect();
    print_table(&["SLOT", "START", "END"], rows);
    Ok(())
}

pub fn run_roster(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let roster = config.roster();

    if json {
        print_json(&serde_json::json!({ "members": roster.members() }))?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = roster
        .members()
        .iter()
        .map(|name| {
            vec![
                name.clone(),
                Roster::initial_for(name),
                roster.color_for(name).to_string(),
            ]
        })
        .collect();
    print_table(&["MEMBER", "INITIAL", "COLOR"], rows);
    Ok(())
}

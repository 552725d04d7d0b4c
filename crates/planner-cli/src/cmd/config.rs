use std::path::Path;

use anyhow::bail;
use clap::Subcommand;

use planner_core::config::{Config, WarnLevel};

use crate::output::{print_json, print_table};

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,
    /// Check the configuration for problems
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    if json {
        print_json(&config)?;
    } else {
        print!("{}", serde_yaml::to_string(&config)?);
    }
    Ok(())
}

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let warnings = config.validate();

    if json {
        print_json(&warnings)?;
    } else if warnings.is_empty() {
        println!("Configuration OK.");
    } else {
        let rows: Vec<Vec<String>> = warnings
            .iter()
            .map(|w| {
                vec![
                    match w.level {
                        WarnLevel::Error => "error".to_string(),
                        WarnLevel::Warning => "warning".to_string(),
                    },
                    w.message.clone(),
                ]
            })
            .collect();
        print_table(&["LEVEL", "MESSAGE"], rows);
    }

    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();
    if errors > 0 {
        bail!("configuration has {errors} error(s)");
    }
    Ok(())
}

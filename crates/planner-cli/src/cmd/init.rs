use std::path::Path;

use planner_core::config::Config;
use planner_core::paths;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let config_file = paths::config_path(root);
    if config_file.exists() {
        println!("Planner already initialized at {}", config_file.display());
        return Ok(());
    }

    let name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("work-planner")
        .to_string();
    let config = Config::new(name);
    config.save(root)?;

    println!("Initialized planner in {}", paths::planner_dir(root).display());
    println!("Edit {} to configure the roster, slots, and gateway.", config_file.display());
    Ok(())
}

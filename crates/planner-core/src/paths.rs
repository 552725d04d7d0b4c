use std::path::{Path, PathBuf};

pub const PLANNER_DIR: &str = ".planner";
pub const CONFIG_FILE: &str = ".planner/config.yaml";
pub const TASKS_FILE: &str = ".planner/tasks.json";

pub fn planner_dir(root: &Path) -> PathBuf {
    root.join(PLANNER_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn tasks_path(root: &Path) -> PathBuf {
    root.join(TASKS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.planner/config.yaml")
        );
        assert_eq!(
            tasks_path(root),
            PathBuf::from("/tmp/proj/.planner/tasks.json")
        );
    }
}

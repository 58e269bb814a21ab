//! Environment overrides live in their own test binary: they mutate process state.

use std::env;

use tempfile::TempDir;

use idtree::config::{local_config_path, Settings};

#[test]
fn given_env_vars_when_load_then_they_override_local_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        local_config_path(dir.path()),
        "path_separator = \" / \"\nshow_ids = true\n",
    )
    .unwrap();

    env::set_var("IDTREE_PATH_SEPARATOR", ",");
    env::set_var("IDTREE_SHOW_IDS", "false");
    env::set_var("IDTREE_MAX_LEVEL", "300");

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    env::remove_var("IDTREE_PATH_SEPARATOR");
    env::remove_var("IDTREE_SHOW_IDS");
    env::remove_var("IDTREE_MAX_LEVEL");

    assert_eq!(settings.path_separator, ",");
    assert!(!settings.show_ids);
    assert_eq!(settings.max_level, 300);
}

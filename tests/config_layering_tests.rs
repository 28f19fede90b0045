//! Configuration layering: defaults, project files, then environment
//!
//! Kept in its own test binary because it changes the working directory and
//! process environment.

use courseware_workflow::config::AuditBackend;
use courseware_workflow::WorkflowConfig;
use std::env;
use tempfile::TempDir;

const ENV_KEYS: [&str; 3] = [
    "COURSEWARE_WORKFLOW_BATCH__MAX_CONCURRENCY",
    "COURSEWARE_WORKFLOW_WORKFLOW__ALLOW_DIRECT_PUBLISH",
    "COURSEWARE_WORKFLOW_AUDIT__BACKEND",
];

/// Restores the working directory and clears the variables on drop
struct ScopedEnv {
    original_dir: std::path::PathBuf,
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for key in ENV_KEYS {
            env::remove_var(key);
        }
        let _ = env::set_current_dir(&self.original_dir);
    }
}

#[test]
fn test_load_layers_files_then_environment() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let _scope = ScopedEnv {
        original_dir: env::current_dir().unwrap(),
    };
    env::set_current_dir(temp_dir.path()).unwrap();

    std::fs::write(
        temp_dir.path().join("courseware-workflow.toml"),
        "[publishing]\ngeo_min_key_points = 5\nseo_title_max_len = 80\n\n[batch]\nmax_concurrency = 2\n",
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join(".courseware-workflow-rc"),
        "[publishing]\nseo_title_max_len = 70\n",
    )
    .unwrap();

    // Files only
    let from_files = WorkflowConfig::load().unwrap();
    assert_eq!(from_files.publishing.geo_min_key_points, 5);
    assert_eq!(from_files.publishing.seo_title_max_len, 70);
    assert_eq!(from_files.publishing.seo_description_min_len, 50);
    assert_eq!(from_files.batch.max_concurrency, 2);
    assert!(!from_files.workflow.allow_direct_publish);

    // Environment wins over both files
    env::set_var("COURSEWARE_WORKFLOW_BATCH__MAX_CONCURRENCY", "7");
    env::set_var("COURSEWARE_WORKFLOW_WORKFLOW__ALLOW_DIRECT_PUBLISH", "true");
    env::set_var("COURSEWARE_WORKFLOW_AUDIT__BACKEND", "json_file");

    let layered = WorkflowConfig::load().unwrap();
    assert_eq!(layered.batch.max_concurrency, 7);
    assert!(layered.workflow.allow_direct_publish);
    assert_eq!(layered.audit.backend, AuditBackend::JsonFile);
    assert_eq!(layered.publishing.geo_min_key_points, 5);
    assert_eq!(layered.publishing.seo_title_max_len, 70);
}

//! Integration tests for CLI commands

use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Helper to run rbacgen command
fn rbacgen(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rbacgen"))
        .args(args)
        .env_remove("RBACGEN_CONFIG")
        .output()
        .expect("Failed to execute rbacgen")
}

/// Path of the example operator configuration
fn fixture() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/operator.yaml").to_string()
}

/// Split multi-document YAML output
fn documents(output: &str) -> Vec<serde_yaml::Value> {
    output
        .split("---\n")
        .filter(|doc| !doc.trim().is_empty())
        .map(|doc| serde_yaml::from_str(doc).expect("Output should be valid YAML"))
        .collect()
}

fn strings(value: &serde_yaml::Value) -> Vec<String> {
    value
        .as_sequence()
        .expect("expected a sequence")
        .iter()
        .map(|v| v.as_str().expect("expected a string").to_string())
        .collect()
}

mod generate_command {
    use super::*;

    #[test]
    fn test_generate_all_controllers() {
        let output = rbacgen(&["generate", &fixture()]);
        assert!(output.status.success(), "Expected success for valid config");

        let stdout = String::from_utf8_lossy(&output.stdout);
        let docs = documents(&stdout);
        assert_eq!(docs.len(), 3);

        let names: Vec<&str> = docs
            .iter()
            .map(|d| d["metadata"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "widget-reconciler-cluster-role",
                "gadget-reconciler-cluster-role",
                "crd-validating-cluster-role",
            ]
        );
        assert!(docs.iter().all(|d| d["kind"].as_str() == Some("ClusterRole")));
    }

    #[test]
    fn test_generate_widget_rules() {
        let output = rbacgen(&["generate", &fixture(), "--controller", "widget-reconciler"]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        let docs = documents(&stdout);
        let rules = docs[0]["rules"].as_sequence().unwrap();
        assert_eq!(rules.len(), 5);

        assert_eq!(
            strings(&rules[0]["resources"]),
            vec!["widgets", "widgets/status", "widgets/finalizers"]
        );
        assert_eq!(strings(&rules[1]["resources"]), vec!["configmaps"]);
        assert_eq!(
            strings(&rules[1]["verbs"]),
            vec!["get", "list", "watch", "update", "delete"]
        );
        assert_eq!(strings(&rules[2]["resources"]), vec!["services"]);
        assert_eq!(
            strings(&rules[2]["verbs"]),
            vec!["get", "list", "watch", "create", "patch"]
        );
        assert_eq!(strings(&rules[3]["apiGroups"]), vec!["apps"]);
        assert_eq!(strings(&rules[3]["resources"]), vec!["*"]);
        assert_eq!(strings(&rules[4]["resources"]), vec!["leases"]);
    }

    #[test]
    fn test_generate_merges_duplicate_dependents() {
        let output = rbacgen(&["generate", &fixture(), "-c", "gadget-reconciler"]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        let docs = documents(&stdout);
        let rules = docs[0]["rules"].as_sequence().unwrap();
        assert_eq!(rules.len(), 3);

        assert_eq!(
            strings(&rules[0]["resources"]),
            vec!["gadgets", "gadgets/finalizers"]
        );
        assert_eq!(strings(&rules[1]["resources"]), vec!["secrets"]);
        assert_eq!(
            strings(&rules[1]["verbs"]),
            vec!["get", "list", "watch", "delete"]
        );
        // Generic dependent without a group/version/kind uses its static resource
        assert_eq!(strings(&rules[2]["apiGroups"]), vec!["batch"]);
        assert_eq!(strings(&rules[2]["resources"]), vec!["jobs"]);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let first = rbacgen(&["generate", &fixture()]);
        let second = rbacgen(&["generate", &fixture()]);
        assert_eq!(first.stdout, second.stdout);
    }

    #[test]
    fn test_generate_to_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("roles.yaml");

        let output = rbacgen(&["generate", &fixture(), "-o", out.to_str().unwrap()]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Wrote 3 cluster role(s)"));

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(documents(&content).len(), 3);
    }

    #[test]
    fn test_generate_to_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("missing-dir").join("roles.yaml");

        let output = rbacgen(&["generate", &fixture(), "-o", out.to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(1));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Failed to write"));
        assert!(!out.exists());
    }

    #[test]
    fn test_generate_validate_crds_flag() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("operator.yaml");
        fs::write(
            &config,
            r#"
controllers:
  - name: widget
    resource: { group: example.io, version: v1, kind: Widget }
"#,
        )
        .unwrap();

        let without = rbacgen(&["generate", config.to_str().unwrap()]);
        assert!(without.status.success());
        assert_eq!(documents(&String::from_utf8_lossy(&without.stdout)).len(), 1);

        let with = rbacgen(&["generate", config.to_str().unwrap(), "--validate-crds"]);
        assert!(with.status.success());
        let stdout = String::from_utf8_lossy(&with.stdout);
        assert_eq!(documents(&stdout).len(), 2);
        assert!(stdout.contains("customresourcedefinitions"));
    }

    #[test]
    fn test_generate_unknown_controller() {
        let output = rbacgen(&["generate", &fixture(), "--controller", "nope"]);
        assert_eq!(output.status.code(), Some(64));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Controller 'nope' not found"));
    }

    #[test]
    fn test_generate_missing_config() {
        let output = rbacgen(&["generate", "/nonexistent/operator.yaml"]);
        assert_eq!(output.status.code(), Some(5));
    }
}

mod rules_command {
    use super::*;

    #[test]
    fn test_rules_json_output() {
        let output = rbacgen(&["rules", &fixture(), "--json"]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");

        let controllers = json.as_array().unwrap();
        assert_eq!(controllers.len(), 2);
        assert_eq!(controllers[0]["controller"], "widget-reconciler");
        assert_eq!(
            controllers[0]["clusterRole"],
            "widget-reconciler-cluster-role"
        );
        assert_eq!(controllers[0]["rules"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_rules_table_output() {
        let output = rbacgen(&["rules", &fixture(), "-c", "widget-reconciler"]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("widget-reconciler"));
        assert!(stdout.contains("GROUPS"));
        assert!(stdout.contains("widgets,widgets/status,widgets/finalizers"));
        assert!(stdout.contains("get,list,watch,update,delete"));
        assert!(!stdout.contains("gadget-reconciler"));
    }
}

mod validate_command {
    use super::*;

    #[test]
    fn test_validate_valid_config() {
        let output = rbacgen(&["validate", &fixture()]);
        assert!(output.status.success(), "Expected success for valid config");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Configuration is valid"));
        assert!(stdout.contains("skipped, not a Kubernetes resource"));
        assert!(stdout.contains("falls back to batch/jobs"));
    }

    #[test]
    fn test_validate_invalid_generic_dependent() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("operator.yaml");
        fs::write(
            &config,
            r#"
controllers:
  - name: widget
    resource: { group: example.io, version: v1, kind: Widget }
    dependents:
      anything:
        type: generic
"#,
        )
        .unwrap();

        let output = rbacgen(&["validate", config.to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(2));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("groupVersionKind"));
    }

    #[test]
    fn test_validate_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("operator.yaml");
        fs::write(&config, "controllers: [ {name: ").unwrap();

        let output = rbacgen(&["validate", config.to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(2));
    }
}

use std::process::Command;

fn growable_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_growable-cmd"))
}

#[test]
fn test_demo_prints_walkthrough() {
    let output = growable_cmd().arg("demo").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("  append(30): [10, 20, 30] (size=3, capacity=4)"));
    assert!(stdout.contains("  grew to capacity: 8"));
    assert!(stdout.contains("  get(2) = 30"));
    assert!(stdout.contains("  remove_at(1): [10, 99, 40, 50] (size=4, capacity=8)"));
    assert!(stdout.contains("Final state: [] (size=0, capacity=8)"));
}

#[test]
fn test_demo_json_summary() {
    let output = growable_cmd().args(["demo", "--json"]).output().unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["length"], 0);
    assert_eq!(summary["capacity"], 8);
    assert_eq!(summary["heap_bytes"], 64);
    assert_eq!(summary["steps"].as_array().unwrap().len(), 10);
}

#[test]
fn test_run_reports_out_of_range() {
    let output = growable_cmd()
        .args(["run", "--capacity", "3", "push:1", "push:2", "get:5"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("index 5 out of range for length 2"));
}

#[test]
fn test_run_memory_limit_keep_going() {
    let output = growable_cmd()
        .args([
            "run",
            "--capacity",
            "1",
            "--memory-limit",
            "16",
            "--keep-going",
            "--json",
            "push:1",
            "push:2",
            "push:3",
            "get:-1",
            "len",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["items"], serde_json::json!([1, 2]));
    assert_eq!(summary["capacity"], 2);
    assert_eq!(summary["memory_limit"], 16);
    assert_eq!(summary["failed_steps"], 2);
    assert_eq!(summary["steps"][4]["value"], 2);
}

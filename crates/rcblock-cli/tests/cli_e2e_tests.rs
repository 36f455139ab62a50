//! End-to-end tests that invoke the compiled `rcblock` binary.
//!
//! Every test points the binary at a [`FakeHome`] through `RCBLOCK_HOME` and
//! clears the variables that would otherwise leak in from the developer's
//! shell.

use assert_cmd::Command;
use predicates::prelude::*;
use rcblock_test_utils::FakeHome;

fn rcblock(home: &FakeHome) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rcblock"));
    cmd.env("RCBLOCK_HOME", home.root())
        .env("NO_COLOR", "1")
        .env_remove("RCBLOCK_CONFIG")
        .env_remove("RCBLOCK_NAMESPACE")
        .env_remove("RCBLOCK_DRY_RUN")
        .env_remove("MAMBA_ROOT_PREFIX")
        .env_remove("MAMBA_EXE")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let home = FakeHome::new();
    rcblock(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("patch"))
        .stdout(predicate::str::contains("wire"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_no_command_prints_hint() {
    let home = FakeHome::new();
    rcblock(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("rcblock --help"));
}

// ============================================================================
// patch
// ============================================================================

#[test]
fn test_patch_appends_block_after_existing_content() {
    let home = FakeHome::new();
    home.write("rc", "# keep me\n");

    rcblock(&home)
        .arg("patch")
        .arg(home.path("rc"))
        .args(["--start", "# >>> X >>>", "--end", "# <<< X <<<", "-l", "export FOO=1"])
        .assert()
        .success();

    assert_eq!(
        home.read("rc"),
        "# keep me\n# >>> X >>>\nexport FOO=1\n# <<< X <<<\n"
    );
    assert_eq!(home.backups(), vec!["rc.bak.rcblock"]);
    assert_eq!(home.read("rc.bak.rcblock"), "# keep me\n");
}

#[test]
fn test_patch_twice_reports_already_configured() {
    let home = FakeHome::new();
    let args = ["--start", "# >>> X >>>", "--end", "# <<< X <<<", "-l", "export FOO=1"];

    rcblock(&home).arg("patch").arg(home.path("rc")).args(args).assert().success();
    let first = home.read("rc");

    rcblock(&home)
        .arg("patch")
        .arg(home.path("rc"))
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("already configured"));

    assert_eq!(home.read("rc"), first);
}

#[test]
fn test_patch_refuses_partial_block() {
    let home = FakeHome::new();
    let original = "a\n# >>> X >>>\nexport OLD=1\n";
    home.write("rc", original);

    rcblock(&home)
        .arg("patch")
        .arg(home.path("rc"))
        .args(["--start", "# >>> X >>>", "--end", "# <<< X <<<", "-l", "export FOO=1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));

    assert_eq!(home.read("rc"), original);
    assert!(home.backups().is_empty());
}

#[test]
fn test_patch_dry_run_shows_diff_and_keeps_file() {
    let home = FakeHome::new();
    let original = "# >>> X >>>\nexport FOO=0\n# <<< X <<<\n";
    home.write("rc", original);

    rcblock(&home)
        .arg("patch")
        .arg(home.path("rc"))
        .args(["--start", "# >>> X >>>", "--end", "# <<< X <<<", "-l", "export FOO=1"])
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] Would"))
        .stdout(predicate::str::contains("+export FOO=1"))
        .stdout(predicate::str::contains("-export FOO=0"))
        .stdout(predicate::str::contains("+1 -1 lines"));

    assert_eq!(home.read("rc"), original);
    assert!(home.backups().is_empty());
}

#[test]
fn test_patch_reads_body_from_file() {
    let home = FakeHome::new();
    home.write("body.sh", "export A=1\nexport B=2\n");

    rcblock(&home)
        .arg("patch")
        .arg(home.path("rc"))
        .args(["--start", "# >>> X >>>", "--end", "# <<< X <<<", "--from"])
        .arg(home.path("body.sh"))
        .assert()
        .success();

    assert_eq!(
        home.read("rc"),
        "# >>> X >>>\nexport A=1\nexport B=2\n# <<< X <<<\n"
    );
}

#[test]
fn test_patch_json_output() {
    let home = FakeHome::new();

    let output = rcblock(&home)
        .arg("patch")
        .arg(home.path("rc"))
        .args(["--start", "S", "--end", "E", "-l", "x", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["action"]["kind"], "created");
    assert_eq!(json["applied"], true);
    assert_eq!(json["dry_run"], false);
}

// ============================================================================
// wire / unwire / status
// ============================================================================

#[test]
fn test_wire_then_status_is_clean() {
    let home = FakeHome::new();
    home.write(".bashrc", "alias ll='ls -l'\n");

    rcblock(&home).arg("wire").assert().success();

    assert!(home.read(".bashrc").starts_with("alias ll='ls -l'\n"));
    assert_eq!(home.count_lines(".bashrc", "# >>> rcblock env >>>"), 1);
    assert_eq!(home.count_lines(".bashrc", "# >>> rcblock hook >>>"), 1);
    assert!(home.exists(".zshrc"));
    assert!(home.exists(".profile"));
    assert!(home.exists(".rcblock_env"));

    rcblock(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"))
        .stdout(predicate::str::contains("MISSING").not())
        .stdout(predicate::str::contains("rcblock wire").not());
}

#[test]
fn test_wire_is_idempotent() {
    let home = FakeHome::new();
    home.write(".bashrc", "alias ll='ls -l'\n");

    rcblock(&home).arg("wire").assert().success();
    let first = home.read(".bashrc");

    rcblock(&home)
        .arg("wire")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));

    assert_eq!(home.read(".bashrc"), first);
    assert_eq!(home.backups(), vec![".bashrc.bak.rcblock"]);
}

#[test]
fn test_wire_dry_run_creates_nothing() {
    let home = FakeHome::new();

    rcblock(&home)
        .args(["wire", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] Would create"));

    assert!(!home.exists(".bashrc"));
    assert!(!home.exists(".zshrc"));
    assert!(!home.exists(".profile"));
    assert!(!home.exists(".rcblock_env"));
}

#[test]
fn test_dry_run_from_environment() {
    let home = FakeHome::new();

    rcblock(&home)
        .arg("wire")
        .env("RCBLOCK_DRY_RUN", "true")
        .assert()
        .success();

    assert!(!home.exists(".bashrc"));
}

#[test]
fn test_wire_json_output() {
    let home = FakeHome::new();

    let output = rcblock(&home).args(["wire", "--json"]).output().unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["dry_run"], false);
    assert!(!json["outcomes"].as_array().unwrap().is_empty());
}

#[test]
fn test_wire_reports_partial_block_and_continues() {
    let home = FakeHome::new();
    let broken = "# >>> rcblock env >>>\nexport X=1\n";
    home.write(".zshrc", broken);

    rcblock(&home)
        .arg("wire")
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL"))
        .stderr(predicate::str::contains("could not be wired"));

    assert_eq!(home.read(".zshrc"), broken);
    assert_eq!(home.count_lines(".bashrc", "# >>> rcblock env >>>"), 1);
}

#[test]
fn test_status_flags_missing_blocks() {
    let home = FakeHome::new();

    rcblock(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("MISSING"))
        .stdout(predicate::str::contains("rcblock wire"));
}

#[test]
fn test_status_json_output() {
    let home = FakeHome::new();
    rcblock(&home).arg("wire").assert().success();

    let output = rcblock(&home).args(["status", "--json"]).output().unwrap();

    let states: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let states = states.as_array().unwrap();
    assert!(!states.is_empty());
    assert!(states.iter().all(|s| s["up_to_date"] == true));
    assert!(states.iter().all(|s| s["status"]["state"] == "present"));
}

#[test]
fn test_unwire_removes_blocks_and_keeps_content() {
    let home = FakeHome::new();
    home.write(".bashrc", "alias ll='ls -l'\n");

    rcblock(&home).arg("wire").assert().success();
    rcblock(&home).arg("unwire").assert().success();

    assert_eq!(home.read(".bashrc"), "alias ll='ls -l'\n");
}

#[test]
fn test_namespace_flag_changes_markers() {
    let home = FakeHome::new();

    rcblock(&home)
        .args(["wire", "--namespace", "dotfiles"])
        .assert()
        .success();

    assert_eq!(home.count_lines(".bashrc", "# >>> dotfiles env >>>"), 1);
    assert_eq!(home.count_lines(".bashrc", "# >>> rcblock env >>>"), 0);
}

#[test]
fn test_config_file_selects_targets() {
    let home = FakeHome::new();
    home.write(
        "rcblock.toml",
        "shell_hook = false\n\n[[targets]]\npath = \"~/.bash_profile\"\nshell = \"bash\"\nblocks = [\"env\", \"hook\"]\n",
    );

    rcblock(&home)
        .arg("wire")
        .arg("--config")
        .arg(home.path("rcblock.toml"))
        .assert()
        .success();

    assert!(home.exists(".bash_profile"));
    assert!(!home.exists(".bashrc"));
    assert_eq!(home.count_lines(".bash_profile", "# >>> rcblock hook >>>"), 0);
}

#[test]
fn test_missing_config_file_fails() {
    let home = FakeHome::new();

    rcblock(&home)
        .args(["wire", "--config"])
        .arg(home.path("nope.toml"))
        .assert()
        .failure()
        .code(1);
}

// ============================================================================
// render / completions
// ============================================================================

#[test]
fn test_render_env_for_posix() {
    let home = FakeHome::new();

    rcblock(&home)
        .args(["render", "env", "--shell", "posix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# >>> rcblock env >>>"))
        .stdout(predicate::str::contains("export MAMBA_ROOT_PREFIX="))
        .stdout(predicate::str::contains("BASH_ENV").not());
}

#[test]
fn test_render_hook_for_posix_is_rejected() {
    let home = FakeHome::new();

    rcblock(&home)
        .args(["render", "hook", "--shell", "posix"])
        .assert()
        .failure();
}

#[test]
fn test_mamba_exe_from_environment() {
    let home = FakeHome::new();

    rcblock(&home)
        .args(["render", "hook", "--shell", "bash"])
        .env("MAMBA_EXE", "/opt/mm/bin/micromamba")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"/opt/mm/bin/micromamba\" shell hook --shell bash"));
}

#[test]
fn test_completions_bash() {
    let home = FakeHome::new();

    rcblock(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rcblock"));
}

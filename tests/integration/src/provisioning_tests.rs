//! Provisioning scenarios
//!
//! Each module walks a home directory through the life cycle a machine
//! provisioning run goes through: first install, re-runs, config changes,
//! hand edits and removal.

use rcblock_blocks::{BlockSpec, BlockStatus, MarkedBlockPatcher, PatchAction};
use rcblock_core::{BlockKind, WiringConfig, WiringEngine, WiringOptions};
use rcblock_fs::DocumentPath;
use rcblock_test_utils::FakeHome;

// =============================================================================
// Test Infrastructure
// =============================================================================

const ENV_START: &str = "# >>> rcblock env >>>";
const ENV_END: &str = "# <<< rcblock env <<<";
const HOOK_START: &str = "# >>> rcblock hook >>>";

fn config(home: &FakeHome) -> WiringConfig {
    WiringConfig {
        home: Some(home.root().to_path_buf()),
        ..Default::default()
    }
}

fn wire(config: WiringConfig) -> rcblock_core::WiringReport {
    WiringEngine::new(config)
        .unwrap()
        .apply(WiringOptions::default())
        .unwrap()
}

fn startup_files() -> [&'static str; 4] {
    [".bashrc", ".zshrc", ".profile", ".rcblock_env"]
}

// =============================================================================
// Scenario 1: Fresh machine
// =============================================================================

mod s1_fresh_home {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_run_creates_every_startup_file() {
        let home = FakeHome::new();

        let report = wire(config(&home));

        assert!(report.success);
        for file in startup_files() {
            assert_eq!(home.count_lines(file, ENV_START), 1, "{file}");
            assert_eq!(home.count_lines(file, ENV_END), 1, "{file}");
        }
        assert_eq!(home.count_lines(".bashrc", HOOK_START), 1);
        assert_eq!(home.count_lines(".zshrc", HOOK_START), 1);
        assert_eq!(home.count_lines(".profile", HOOK_START), 0);
        // Nothing existed, so nothing needed saving
        assert!(home.backups().is_empty());
    }

    #[test]
    fn second_run_changes_nothing() {
        let home = FakeHome::new();
        wire(config(&home));
        let snapshot: Vec<String> = startup_files().iter().map(|f| home.read(f)).collect();

        let report = wire(config(&home));

        assert!(!report.has_changes());
        assert!(
            report
                .outcomes
                .iter()
                .all(|o| o.action == PatchAction::AlreadyConfigured)
        );
        let after: Vec<String> = startup_files().iter().map(|f| home.read(f)).collect();
        assert_eq!(after, snapshot);
    }

    #[test]
    fn bash_targets_point_bash_env_at_the_env_file() {
        let home = FakeHome::new();
        wire(config(&home));

        let expected = format!(
            "export BASH_ENV=\"{}\"",
            home.path(".rcblock_env").display()
        );
        assert_eq!(home.count_lines(".bashrc", &expected), 1);
        assert_eq!(home.count_lines(".zshrc", &expected), 0);
    }
}

// =============================================================================
// Scenario 2: Existing dotfiles
// =============================================================================

mod s2_existing_dotfiles {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn user_content_is_kept_and_backed_up_once() {
        let home = FakeHome::new();
        let original = "export EDITOR=vim\nalias gs='git status'\n";
        home.write(".bashrc", original);

        wire(config(&home));
        wire(WiringConfig {
            mamba_root_prefix: "/opt/micromamba".into(),
            ..config(&home)
        });

        let bashrc = home.read(".bashrc");
        assert!(bashrc.starts_with(original));
        assert!(bashrc.contains("export MAMBA_ROOT_PREFIX=\"/opt/micromamba\""));
        // Files rcblock created in the first run are snapshotted on their
        // first change in the second run; the user original stays intact
        assert!(home.backups().contains(&".bashrc.bak.rcblock".to_string()));
        assert_eq!(home.read(".bashrc.bak.rcblock"), original);
    }

    #[test]
    fn config_change_replaces_stale_blocks_in_place_of_appending() {
        let home = FakeHome::new();
        wire(config(&home));

        let report = wire(WiringConfig {
            bin_dirs: vec!["~/.local/bin".into(), "~/bin".into()],
            ..config(&home)
        });

        assert!(report.success);
        for file in startup_files() {
            assert_eq!(home.count_lines(file, ENV_START), 1, "{file}");
        }
        assert!(home.read(".profile").contains(&format!(
            "export PATH=\"{}:${{PATH}}\"",
            home.path("bin").display()
        )));
    }
}

// =============================================================================
// Scenario 3: Hand-edited files
// =============================================================================

mod s3_hand_edits {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pasted_duplicate_block_is_collapsed() {
        let home = FakeHome::new();
        wire(config(&home));
        let once = home.read(".zshrc");
        // A user copies the block into the file a second time
        let env_block: String = once
            .lines()
            .skip_while(|l| *l != ENV_START)
            .take_while(|l| *l != ENV_END)
            .map(|l| format!("{l}\n"))
            .collect();
        home.write(".zshrc", &format!("{once}{env_block}{ENV_END}\n"));

        let report = wire(config(&home));

        assert!(
            report
                .outcomes
                .iter()
                .any(|o| o.action == PatchAction::Collapsed { copies: 2 })
        );
        assert_eq!(home.count_lines(".zshrc", ENV_START), 1);
    }

    #[test]
    fn deleted_end_marker_stops_only_that_file() {
        let home = FakeHome::new();
        wire(config(&home));
        let damaged: String = home
            .read(".profile")
            .lines()
            .filter(|l| *l != ENV_END)
            .map(|l| format!("{l}\n"))
            .collect();
        home.write(".profile", &damaged);

        let report = wire(WiringConfig {
            mamba_exe: "/usr/local/bin/micromamba".into(),
            ..config(&home)
        });

        assert!(!report.success);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(home.read(".profile"), damaged);
        assert!(home.read(".bashrc").contains("/usr/local/bin/micromamba"));
    }

    #[test]
    fn status_reports_drift_after_manual_edit() {
        let home = FakeHome::new();
        wire(config(&home));
        let edited = home
            .read(".bashrc")
            .replace("export MAMBA_EXE=", "export MAMBA_EXE_OLD=");
        home.write(".bashrc", &edited);

        let states = WiringEngine::new(config(&home)).unwrap().status().unwrap();

        let stale: Vec<_> = states.iter().filter(|s| !s.up_to_date).collect();
        assert_eq!(stale.len(), 1);
        assert!(stale[0].path.ends_with(".bashrc"));
        assert_eq!(stale[0].block, BlockKind::Env);
        assert!(matches!(stale[0].status, BlockStatus::Present { .. }));
    }
}

// =============================================================================
// Scenario 4: Preview and removal
// =============================================================================

mod s4_preview_and_removal {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dry_run_previews_without_touching_disk() {
        let home = FakeHome::new();
        home.write(".bashrc", "keep\n");

        let report = WiringEngine::new(config(&home))
            .unwrap()
            .apply(WiringOptions { dry_run: true })
            .unwrap();

        assert!(report.outcomes.iter().all(|o| !o.applied));
        assert!(
            report
                .outcomes
                .iter()
                .all(|o| o.describe().starts_with("[dry-run] Would"))
        );
        let bashrc = report
            .outcomes
            .iter()
            .find(|o| o.path.ends_with(".bashrc"))
            .unwrap();
        assert!(bashrc.unified_diff().contains(&format!("+{ENV_START}")));
        assert_eq!(home.read(".bashrc"), "keep\n");
        assert!(!home.exists(".zshrc"));
        assert!(home.backups().is_empty());
    }

    #[test]
    fn unwire_restores_user_content() {
        let home = FakeHome::new();
        home.write(".zshrc", "setopt autocd\n");
        wire(config(&home));

        let report = WiringEngine::new(config(&home))
            .unwrap()
            .unwire(WiringOptions::default())
            .unwrap();

        assert!(report.success);
        assert_eq!(home.read(".zshrc"), "setopt autocd\n");
        assert_eq!(home.read(".bashrc"), "");
    }

    #[test]
    fn report_serializes_for_scripting() {
        let home = FakeHome::new();

        let report = wire(config(&home));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["outcomes"][0]["action"]["kind"], "created");
        assert!(json["outcomes"][0].get("before").is_none());
    }
}

// =============================================================================
// Scenario 5: Foreign blocks
// =============================================================================

mod s5_foreign_blocks {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn conda_block_and_managed_block_coexist() {
        let home = FakeHome::new();
        let conda = "# >>> conda initialize >>>\n__conda_setup=x\n# <<< conda initialize <<<\n";
        home.write(".bashrc", conda);

        wire(config(&home));
        let mut patcher = MarkedBlockPatcher::new("rcblock").unwrap();
        let custom = BlockSpec::new("aliases", "# >>> aliases >>>", "# <<< aliases <<<").unwrap();
        patcher
            .patch(
                &DocumentPath::new(home.path(".bashrc")),
                &custom,
                &["alias ll='ls -l'"],
            )
            .unwrap();

        let bashrc = home.read(".bashrc");
        assert!(bashrc.starts_with(conda));
        assert_eq!(home.count_lines(".bashrc", ENV_START), 1);
        assert_eq!(home.count_lines(".bashrc", "# >>> aliases >>>"), 1);
        assert!(!wire(config(&home)).has_changes());
    }
}

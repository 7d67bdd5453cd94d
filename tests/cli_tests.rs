// End-to-end CLI tests; every run is a dry run or touches only a temp dir

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn reelcut(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("reelcut").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("REELCUT_CONFIG")
        .env_remove("REELCUT_OUTPUT_DIR")
        .env_remove("REELCUT_NAMESPACE_RUNS");
    cmd
}

#[test]
fn dry_run_clip_prints_commands_and_report() {
    let dir = TempDir::new().unwrap();
    reelcut(&dir)
        .args([
            "--dry-run",
            "clip",
            "--source",
            "talk.mp4",
            "--scene",
            "00:00:01:000,00:00:03:000",
            "--mode",
            "portrait-crop",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("scale=1080:1920"))
        .stdout(predicate::str::contains("manual_cut_001"))
        .stdout(predicate::str::contains("clip: 1 succeeded, 0 not produced"));

    // Nothing is written during a dry run
    assert!(!dir.path().join("output").exists());
}

#[test]
fn dry_run_clip_json_report() {
    let dir = TempDir::new().unwrap();
    reelcut(&dir)
        .args([
            "--dry-run",
            "--json",
            "clip",
            "--source",
            "talk.mp4",
            "--scene",
            "00:00:01:000,00:00:03:000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"succeeded\""));
}

#[test]
fn invalid_scene_aborts_with_failure() {
    let dir = TempDir::new().unwrap();
    reelcut(&dir)
        .args([
            "--dry-run",
            "clip",
            "--source",
            "talk.mp4",
            "--scene",
            "00:00:05:000,00:00:01:000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stopped early"));
}

#[test]
fn unknown_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    reelcut(&dir)
        .args([
            "--dry-run",
            "clip",
            "--source",
            "talk.mp4",
            "--scene",
            "00:00:01:000,00:00:03:000",
            "--mode",
            "diagonal",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("ffmpeg").not())
        .stderr(predicate::str::contains("unrecognized output mode"));
}

#[test]
fn merge_with_mismatched_scene_counts_fails() {
    let dir = TempDir::new().unwrap();
    reelcut(&dir)
        .args([
            "--dry-run",
            "merge",
            "--source",
            "a.mp4",
            "--scene",
            "00:00:01:000,00:00:03:000",
            "--scene",
            "00:00:05:000,00:00:06:000",
            "--second-source",
            "b.mp4",
            "--second-scene",
            "00:01:00:000,00:01:02:000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scene count mismatch"));
}

#[test]
fn dry_run_auto_merge_advances_source_b() {
    let dir = TempDir::new().unwrap();
    reelcut(&dir)
        .args([
            "--dry-run",
            "auto-merge",
            "--source",
            "a.mp4",
            "--scene",
            "00:00:01:000,00:00:03:000",
            "--scene",
            "00:00:20:000,00:00:23:000",
            "--second-source",
            "b.mp4",
            "--window-start",
            "00:00:10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("00:00:10.000"))
        .stdout(predicate::str::contains("00:00:12.000"))
        .stdout(predicate::str::contains("merged_auto_002"));
}

#[test]
fn clip_reads_plan_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("plan.yaml"),
        "source: talk.mp4\nmode: letterbox\nbackground: white\nscenes:\n  - start: \"00:00:01:000\"\n    end: \"00:00:02:000\"\n",
    )
    .unwrap();

    reelcut(&dir)
        .args(["--dry-run", "clip", "--plan", "plan.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("color=c=white"));
}

#[test]
fn sweep_removes_temporaries() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output");
    std::fs::create_dir_all(&output).unwrap();
    std::fs::write(output.join("tmp_b_002.mp4"), b"x").unwrap();
    std::fs::write(output.join("merged_002.mp4"), b"x").unwrap();

    reelcut(&dir)
        .args(["sweep", "--dir", "output"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 temporaries removed"));

    assert!(!output.join("tmp_b_002.mp4").exists());
    assert!(output.join("merged_002.mp4").exists());
}

// tests/install.rs

//! Install-only flow: package-manager hook and `acc install`.

mod common;

use acc::filesystem::{Fault, MemoryFilesystem, OsFilesystem};
use acc::report::{ExitStatus, Level, MemoryReporter, ReportLayer};
use acc::trigger::{InstallTrigger, PackageEvent};
use acc::Filesystem;
use common::{Workspace, tree};
use std::path::{Path, PathBuf};
use std::process::Command;

#[test]
fn test_fresh_install_copies_everything() {
    let ws = Workspace::new();
    let fs = OsFilesystem::new();
    let result = InstallTrigger::new(&fs)
        .install(&ws.package, &ws.project, &())
        .unwrap();

    // 2 commands, 1 agent, 2 skills
    assert_eq!(result.copied(), 5);
    assert_eq!(result.skipped(), 0);
    assert!(result.is_success());
    assert_eq!(ws.project_file(".claude/commands/acc-commit.md"), "# acc-commit v2\n");
    assert_eq!(
        ws.project_file(".claude/skills/tdd/references/cycle.md"),
        "red, green, refactor v2\n"
    );
    assert!(!ws.project.join(".claude/settings.json").exists());
}

#[test]
fn test_customized_command_is_preserved() {
    let ws = Workspace::new();
    ws.write_project_file(".claude/commands/acc-commit.md", "my own commit flow\n");

    let fs = OsFilesystem::new();
    let reporter = MemoryReporter::new();
    let layer = ReportLayer::new(&reporter, true);
    let status = InstallTrigger::new(&fs).on_event(
        PackageEvent::Installed,
        &ws.package,
        &ws.project,
        &layer,
    );

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(ws.project_file(".claude/commands/acc-commit.md"), "my own commit flow\n");
    assert_eq!(ws.project_file(".claude/commands/acc-review.md"), "# acc-review v2\n");

    let lines = reporter.messages(Level::Status);
    assert!(lines.contains(&"Skipping (exists) .claude/commands/acc-commit.md".to_string()));
    assert!(lines.contains(&"Copying .claude/commands/acc-review.md".to_string()));
}

#[test]
fn test_second_install_is_a_noop() {
    let ws = Workspace::new();
    let fs = OsFilesystem::new();
    let trigger = InstallTrigger::new(&fs);
    trigger.install(&ws.package, &ws.project, &()).unwrap();
    let before = tree(&ws.project);

    let result = trigger.install(&ws.package, &ws.project, &()).unwrap();
    assert_eq!(result.copied(), 0);
    assert_eq!(result.skipped(), 5);
    assert_eq!(result.files_written(), 0);
    assert_eq!(tree(&ws.project), before);
}

#[test]
fn test_existing_skill_directory_is_skipped_whole() {
    let ws = Workspace::new();
    // Partial skill: only SKILL.md, no references/
    ws.write_project_file(".claude/skills/tdd/SKILL.md", "custom tdd\n");

    let fs = OsFilesystem::new();
    InstallTrigger::new(&fs)
        .install(&ws.package, &ws.project, &())
        .unwrap();

    assert_eq!(ws.project_file(".claude/skills/tdd/SKILL.md"), "custom tdd\n");
    assert!(!ws.project.join(".claude/skills/tdd/references").exists());
    assert!(ws.project.join(".claude/skills/git-flow/SKILL.md").exists());
}

#[test]
fn test_project_settings_are_never_touched() {
    let ws = Workspace::new();
    ws.write_project_file(".claude/settings.json", "{\"mine\": true}\n");
    ws.write_project_file(".claude/settings.local.json", "{}\n");

    let fs = OsFilesystem::new();
    InstallTrigger::new(&fs)
        .install(&ws.package, &ws.project, &())
        .unwrap();

    assert_eq!(ws.project_file(".claude/settings.json"), "{\"mine\": true}\n");
    assert_eq!(ws.project_file(".claude/settings.local.json"), "{}\n");
}

#[test]
fn test_no_temp_files_left_behind() {
    let ws = Workspace::new();
    let fs = OsFilesystem::new();
    InstallTrigger::new(&fs)
        .install(&ws.package, &ws.project, &())
        .unwrap();

    assert!(tree(&ws.project).iter().all(|(rel, _)| !rel.contains(".acc-tmp-")));
}

#[test]
fn test_failed_copy_is_warned_and_others_installed() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/pkg/.claude/commands/a.md", "a");
    fs.add_file("/pkg/.claude/agents/b.md", "b");
    fs.add_dir("/proj");
    fs.inject(Fault::FailWrite(PathBuf::from("/proj/.claude/agents")));

    let reporter = MemoryReporter::new();
    let layer = ReportLayer::new(&reporter, true);
    let status = InstallTrigger::new(&fs).on_event(
        PackageEvent::Updated,
        Path::new("/pkg"),
        Path::new("/proj"),
        &layer,
    );

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(reporter.messages(Level::Warning).len(), 1);
    assert!(reporter.messages(Level::Error).is_empty());
    assert_eq!(fs.read(Path::new("/proj/.claude/commands/a.md")).unwrap(), b"a");
}

#[test]
fn test_interrupted_copy_leaves_no_partial_file() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/pkg/.claude/commands/a.md", "a");
    fs.add_dir("/proj");
    fs.inject(Fault::CrashBeforeRename(PathBuf::from("/proj/.claude/commands/a.md")));

    let trigger = InstallTrigger::new(&fs);
    let result = trigger.install(Path::new("/pkg"), Path::new("/proj"), &()).unwrap();
    assert_eq!(result.failed(), 1);
    assert!(!fs.exists(Path::new("/proj/.claude/commands/a.md")));
    assert!(fs.snapshot("/proj").is_empty());

    // A rerun after the "crash" completes the install
    fs.clear_faults();
    let result = trigger.install(Path::new("/pkg"), Path::new("/proj"), &()).unwrap();
    assert_eq!(result.copied(), 1);
    assert_eq!(fs.read(Path::new("/proj/.claude/commands/a.md")).unwrap(), b"a");
}

#[cfg(unix)]
#[test]
fn test_symlinked_package_files_are_installed() {
    let ws = Workspace::new();
    std::os::unix::fs::symlink(
        ws.package.join(".claude/commands/acc-commit.md"),
        ws.package.join(".claude/commands/alias.md"),
    )
    .unwrap();
    std::os::unix::fs::symlink(
        ws.package.join(".claude/skills/tdd"),
        ws.package.join(".claude/skills/tdd-alias"),
    )
    .unwrap();

    let fs = OsFilesystem::new();
    let result = InstallTrigger::new(&fs)
        .install(&ws.package, &ws.project, &())
        .unwrap();

    assert_eq!(result.copied(), 7);
    assert_eq!(ws.project_file(".claude/commands/alias.md"), "# acc-commit v2\n");
    assert_eq!(
        ws.project_file(".claude/skills/tdd-alias/references/cycle.md"),
        "red, green, refactor v2\n"
    );
    let installed = ws.project.join(".claude/commands/alias.md");
    assert!(!installed.symlink_metadata().unwrap().file_type().is_symlink());
}

#[test]
fn test_hook_binary_exits_zero_on_missing_package() {
    let ws = Workspace::new();
    let output = Command::new(env!("CARGO_BIN_EXE_acc"))
        .arg("hook")
        .arg("post-install")
        .arg(ws.project.join("no-such-package"))
        .arg("--project")
        .arg(&ws.project)
        .env_remove("ACC_SOURCE_ROOT")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(!ws.project.join(".claude").exists());
}

#[test]
fn test_hook_binary_installs_components() {
    let ws = Workspace::new();
    let output = Command::new(env!("CARGO_BIN_EXE_acc"))
        .arg("hook")
        .arg("post-update")
        .arg(&ws.package)
        .arg("--project")
        .arg(&ws.project)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Copying .claude/agents/code-reviewer.md"));
    assert_eq!(ws.project_file(".claude/agents/code-reviewer.md"), "# code-reviewer v2\n");
}

#[test]
fn test_install_without_source_is_fatal() {
    let ws = Workspace::new();
    let output = Command::new(env!("CARGO_BIN_EXE_acc"))
        .arg("install")
        .arg("--project")
        .arg(&ws.project)
        .env_remove("ACC_SOURCE_ROOT")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

use super::*;
use crate::kernel::confirm::ConfirmState;
use crate::kernel::services::adapters::LocalFileProvider;
use std::fs;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

fn setup(names: &[&str]) -> (TempDir, SessionController) {
    let dir = tempdir().unwrap();
    for name in names {
        fs::write(dir.path().join(name), format!("{name}\n")).unwrap();
    }
    let controller = SessionController::new(
        Arc::new(LocalFileProvider::new()),
        SessionConfig::default(),
        dir.path(),
    );
    (dir, controller)
}

fn type_text(controller: &mut SessionController, text: &str) {
    for c in text.chars() {
        controller.dispatch(Action::Edit(EditorAction::InsertChar(c)));
    }
}

fn current(controller: &SessionController) -> PathBuf {
    controller.registry().current_path().unwrap().to_path_buf()
}

#[test]
fn test_open_emits_vcs_refresh_and_deferred_focus() {
    let (dir, mut controller) = setup(&["a.txt"]);
    let path = dir.path().join("a.txt");

    let result = controller.open_or_switch(&path);
    assert!(result.state_changed);
    assert_eq!(
        result.effects,
        vec![
            Effect::ProbeVcs(vec![path.clone()]),
            Effect::FocusOpenFile {
                path: path.clone(),
                delay: Duration::from_millis(200),
            },
        ]
    );
    assert_eq!(controller.workspace(), dir.path());
}

#[test]
fn test_open_in_other_directory_moves_workspace() {
    let (dir, mut controller) = setup(&[]);
    fs::create_dir(dir.path().join("sub")).unwrap();
    let nested = dir.path().join("sub").join("n.txt");
    fs::write(&nested, "n").unwrap();

    controller.open_or_switch(&nested);
    assert_eq!(controller.workspace(), dir.path().join("sub"));
    assert_eq!(controller.explorer().root(), dir.path().join("sub"));
    assert_eq!(controller.explorer().rows().len(), 2);
}

#[test]
fn test_open_missing_file_reports_status() {
    let (dir, mut controller) = setup(&[]);
    controller.open_or_switch(&dir.path().join("missing.txt"));

    let status = controller.status().unwrap();
    assert!(status.is_error);
    assert!(status.text.starts_with("Cannot open"));
    assert!(controller.registry().is_empty());
}

#[test]
fn test_switch_to_unknown_reports_and_keeps_current() {
    let (dir, mut controller) = setup(&["a.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));

    let result = controller.switch_to(&dir.path().join("b.txt"));
    assert!(result.effects.is_empty());
    assert!(controller.status().unwrap().text.ends_with("is not open"));
    assert_eq!(current(&controller), dir.path().join("a.txt"));
}

#[test]
fn test_save_clears_modified_and_writes_disk() {
    let (dir, mut controller) = setup(&["a.txt"]);
    let path = dir.path().join("a.txt");
    controller.open_or_switch(&path);
    type_text(&mut controller, "hi ");

    let result = controller.save();
    assert_eq!(result.effects, vec![Effect::ProbeVcs(vec![path.clone()])]);
    assert!(!controller.registry().any_modified());
    assert_eq!(fs::read_to_string(&path).unwrap(), "hi a.txt\n");
}

#[test]
fn test_failed_save_keeps_modified_flag() {
    let (dir, mut controller) = setup(&[]);
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("a.txt"), "a").unwrap();
    controller.open_or_switch(&sub.join("a.txt"));
    type_text(&mut controller, "x");

    fs::remove_dir_all(&sub).unwrap();
    fs::write(&sub, "now a regular file").unwrap();

    controller.save();
    assert!(controller.registry().any_modified());
    assert!(controller.status().unwrap().is_error);
    assert!(controller.status().unwrap().text.starts_with("Cannot save"));
}

#[test]
fn test_saved_text_reopens_identically() {
    let (dir, mut controller) = setup(&["a.txt"]);
    let path = dir.path().join("a.txt");
    controller.open_or_switch(&path);
    type_text(&mut controller, "héllo ");
    let text = controller.registry().current().unwrap().buffer().serialize();

    controller.save();
    controller.close_current();
    assert!(!controller.registry().is_open(&path));

    controller.open_or_switch(&path);
    let reopened = controller.registry().current().unwrap();
    assert_eq!(reopened.path(), path);
    assert_eq!(reopened.buffer().serialize(), text);
}

const WESTERN_1252: &[u8] = b"Le caf\xE9 \xE9tait tr\xE8s fr\xE9quent\xE9 \xE0 No\xEBl, o\xF9 l'on mangeait des cr\xEApes.\n";

#[test]
fn test_save_keeps_single_byte_encoding() {
    let (dir, mut controller) = setup(&[]);
    let path = dir.path().join("menu.txt");
    fs::write(&path, WESTERN_1252).unwrap();
    controller.open_or_switch(&path);
    assert_eq!(controller.status_view().encoding, "windows-1252");

    controller.save();
    assert!(!controller.status().unwrap().is_error);
    assert_eq!(fs::read(&path).unwrap(), WESTERN_1252);

    type_text(&mut controller, "é ");
    controller.save();
    let mut expected = b"\xE9 ".to_vec();
    expected.extend_from_slice(WESTERN_1252);
    assert_eq!(fs::read(&path).unwrap(), expected);
}

#[test]
fn test_undecodable_bytes_are_never_overwritten() {
    let original: &[u8] = b"ab\x00\xFF\xFE\n";
    let (dir, mut controller) = setup(&[]);
    let path = dir.path().join("raw.dat");
    fs::write(&path, original).unwrap();
    controller.open_or_switch(&path);

    controller.save();
    assert!(!controller.status().unwrap().is_error);
    assert_eq!(fs::read(&path).unwrap(), original);

    type_text(&mut controller, "z");
    controller.save();
    let status = controller.status().unwrap();
    assert!(status.is_error);
    assert!(status.text.starts_with("Cannot save"));
    assert!(controller.registry().any_modified());
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn test_switch_to_current_changes_nothing() {
    let (dir, mut controller) = setup(&["a.txt", "b.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));
    controller.open_or_switch(&dir.path().join("b.txt"));

    let paths_before: Vec<PathBuf> = controller.registry().paths().map(Path::to_path_buf).collect();
    let index_before = controller.registry().current_index();
    let workspace_before = controller.workspace().to_path_buf();
    let root_before = controller.explorer().root().to_path_buf();

    let current_path = current(&controller);
    controller.switch_to(&current_path);

    let paths_after: Vec<PathBuf> = controller.registry().paths().map(Path::to_path_buf).collect();
    assert_eq!(paths_after, paths_before);
    assert_eq!(controller.registry().current_index(), index_before);
    assert_eq!(controller.workspace(), workspace_before.as_path());
    assert_eq!(controller.explorer().root(), root_before.as_path());
}

#[test]
fn test_save_as_to_open_path_is_refused() {
    let (dir, mut controller) = setup(&["a.txt", "b.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));
    controller.open_or_switch(&dir.path().join("b.txt"));

    controller.save_as(&dir.path().join("a.txt"));
    assert_eq!(controller.registry().len(), 2);
    assert!(controller
        .status()
        .unwrap()
        .text
        .contains("already open"));
}

#[test]
fn test_save_as_same_path_is_save() {
    let (dir, mut controller) = setup(&["a.txt"]);
    let path = dir.path().join("a.txt");
    controller.open_or_switch(&path);
    type_text(&mut controller, "z");

    controller.save_as(&path);
    assert_eq!(controller.registry().len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "za.txt\n");
}

#[test]
fn test_save_as_keeps_cursor() {
    let (dir, mut controller) = setup(&["a.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));
    controller.dispatch(Action::Edit(EditorAction::LineEnd));

    controller.save_as(&dir.path().join("copy.txt"));
    let entry = controller.registry().current().unwrap();
    assert_eq!(entry.path(), dir.path().join("copy.txt"));
    assert_eq!(entry.buffer().cursor(), (0, 5));
    assert!(!entry.is_modified());
}

#[test]
fn test_new_file_uses_prefix() {
    let (dir, mut controller) = setup(&[]);
    controller.dispatch(Action::NewFile);

    let path = current(&controller);
    assert_eq!(path.parent(), Some(dir.path()));
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("quill_"));
    assert!(path.exists());
}

#[test]
fn test_new_file_falls_back_to_temp_dir() {
    let (dir, mut controller) = setup(&[]);
    controller.new_file(&dir.path().join("does-not-exist"));

    let path = current(&controller);
    assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));
    fs::remove_file(path).unwrap();
}

#[test]
fn test_new_or_resume_last_resumes_current() {
    let (dir, mut controller) = setup(&["a.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));

    controller.new_or_resume_last(dir.path());
    assert_eq!(controller.registry().len(), 1);
    assert_eq!(current(&controller), dir.path().join("a.txt"));
}

#[test]
fn test_close_first_of_two_creates_replacement() {
    let (dir, mut controller) = setup(&["a.txt", "b.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));
    controller.open_or_switch(&dir.path().join("b.txt"));
    controller.previous();

    controller.close_current();
    let registry = controller.registry();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(0).unwrap().path(), dir.path().join("b.txt"));
    assert!(registry
        .current()
        .unwrap()
        .file_name()
        .starts_with("quill_"));
}

#[test]
fn test_close_modified_waits_for_decision() {
    let (dir, mut controller) = setup(&["a.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));
    type_text(&mut controller, "x");

    controller.close_current();
    assert_eq!(controller.registry().len(), 1);
    assert!(matches!(
        controller.confirm().state(),
        ConfirmState::AwaitingDecision {
            index: 0,
            follow_up: FollowUp::CloseAfter,
            ..
        }
    ));

    controller.close_current();
    assert!(controller.status().unwrap().text.contains("pending save prompt"));
}

#[test]
fn test_cancel_on_close_still_closes_without_saving() {
    let (dir, mut controller) = setup(&["a.txt", "b.txt"]);
    let a = dir.path().join("a.txt");
    controller.open_or_switch(&dir.path().join("b.txt"));
    controller.open_or_switch(&a);
    type_text(&mut controller, "x");

    controller.close_current();
    controller.resolve_confirmation(Decision::Cancel);
    assert!(!controller.registry().is_open(&a));
    assert_eq!(current(&controller), dir.path().join("b.txt"));
    assert_eq!(fs::read_to_string(&a).unwrap(), "a.txt\n");
    assert!(!controller.confirm().is_pending());
}

#[test]
fn test_yes_with_failed_save_keeps_file_open() {
    let (dir, mut controller) = setup(&[]);
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("a.txt"), "a").unwrap();
    controller.open_or_switch(&sub.join("a.txt"));
    type_text(&mut controller, "x");
    fs::remove_dir_all(&sub).unwrap();
    fs::write(&sub, "file").unwrap();

    controller.close_current();
    controller.resolve_confirmation(Decision::Yes);
    assert_eq!(controller.registry().len(), 1);
    assert!(controller.registry().any_modified());
    assert!(!controller.confirm().is_pending());
}

#[test]
fn test_quit_prompts_one_file_at_a_time() {
    let (dir, mut controller) = setup(&["a.txt", "b.txt", "c.txt"]);
    for name in ["a.txt", "b.txt", "c.txt"] {
        controller.open_or_switch(&dir.path().join(name));
    }
    controller.switch_to(&dir.path().join("a.txt"));
    type_text(&mut controller, "1");
    controller.switch_to(&dir.path().join("c.txt"));
    type_text(&mut controller, "3");

    controller.check_all_for_save_on_quit();
    assert_eq!(current(&controller), dir.path().join("a.txt"));
    assert!(controller.confirm().is_pending());

    let result = controller.resolve_confirmation(Decision::Yes);
    assert!(!result.effects.contains(&Effect::Quit));
    assert_eq!(current(&controller), dir.path().join("c.txt"));
    assert!(controller.confirm().is_pending());

    let result = controller.resolve_confirmation(Decision::No);
    assert!(result.effects.contains(&Effect::Quit));
    assert!(controller.should_quit());
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "1a.txt\n");
    assert_eq!(fs::read_to_string(dir.path().join("c.txt")).unwrap(), "c.txt\n");
}

#[test]
fn test_cancel_on_quit_aborts() {
    let (dir, mut controller) = setup(&["a.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));
    type_text(&mut controller, "x");

    controller.check_all_for_save_on_quit();
    let result = controller.resolve_confirmation(Decision::Cancel);
    assert!(!result.effects.contains(&Effect::Quit));
    assert!(!controller.should_quit());
    assert!(controller.registry().any_modified());
}

#[test]
fn test_quit_without_changes() {
    let (dir, mut controller) = setup(&["a.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));

    let result = controller.dispatch(Action::CheckAllForSaveOnQuit);
    assert_eq!(result.effects, vec![Effect::Quit]);
    assert!(controller.should_quit());
}

#[test]
fn test_tick_refreshes_all_files_on_throttle_boundary() {
    let (dir, mut controller) = setup(&["a.txt", "b.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));
    controller.open_or_switch(&dir.path().join("b.txt"));

    for _ in 0..9 {
        let output = controller.tick();
        assert_eq!(output.probe, vec![dir.path().join("b.txt")]);
    }
    let output = controller.tick();
    assert_eq!(
        output.probe,
        vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
    );
    assert_eq!(output.view.file_name, "b.txt");
    assert_eq!(output.view.rows.len(), 2);
}

#[test]
fn test_apply_vcs_ignores_closed_files() {
    let (dir, mut controller) = setup(&["a.txt"]);
    let path = dir.path().join("a.txt");
    controller.open_or_switch(&path);

    let snapshot = VcsSnapshot {
        branch: "main".to_string(),
        ..VcsSnapshot::default()
    };
    assert!(controller.apply_vcs(&path, snapshot.clone()));
    assert!(!controller.apply_vcs(&path, snapshot.clone()));
    assert!(!controller.apply_vcs(&dir.path().join("gone.txt"), snapshot));
    assert_eq!(controller.status_view().vcs.branch, "main");
}

#[test]
fn test_explorer_activation_opens_text_file() {
    let (dir, mut controller) = setup(&["a.txt"]);
    controller.dispatch(Action::ExplorerMoveSelection { delta: 1 });
    controller.dispatch(Action::ExplorerActivate);

    assert_eq!(current(&controller), dir.path().join("a.txt"));
}

#[test]
fn test_toggle_hidden_rerenders_tree() {
    let (_dir, mut controller) = setup(&["a.txt", ".hidden"]);
    assert_eq!(controller.explorer().rows().len(), 2);

    controller.dispatch(Action::ToggleHidden);
    assert_eq!(controller.explorer().rows().len(), 3);
    assert!(controller.config().show_hidden);
}

#[test]
fn test_seed_cursor_is_clamped() {
    let (dir, mut controller) = setup(&["a.txt"]);
    controller.open_or_switch(&dir.path().join("a.txt"));

    controller.seed_cursor(40, 2);
    let view = controller.status_view();
    assert_eq!((view.line, view.column), (2, 1));
}

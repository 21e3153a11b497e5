use super::*;
use crate::kernel::registry::FileEntry;
use crate::kernel::services::ports::TextEncoding;
use crate::models::TextBuffer;

fn entry(path: &str, text: &str) -> FileEntry {
    FileEntry::new(
        PathBuf::from(path),
        TextBuffer::from_text(text),
        TextEncoding::utf8(),
    )
}

#[test]
fn test_scroll_percent_truncates() {
    assert_eq!(scroll_percent(0, 10), 0);
    assert_eq!(scroll_percent(5, 10), 50);
    assert_eq!(scroll_percent(2, 3), 66);
    assert_eq!(scroll_percent(0, 0), 0);
}

#[test]
fn test_throttle_fires_every_nth_tick() {
    let mut throttle = RefreshThrottle::new(10);
    let fired: Vec<u64> = (1..=30)
        .filter(|_| throttle.advance())
        .collect();
    assert_eq!(fired, vec![10, 20, 30]);
    assert_eq!(throttle.ticks(), 30);
}

#[test]
fn test_status_view_of_current_entry() {
    let mut registry = Registry::new();
    registry.push(entry("/w/a.txt", "one\n"));
    registry.push(entry("/w/b.txt", "l1\nl2\nl3\nl4\n"));
    registry.current_mut().unwrap().buffer_mut().set_cursor(2, 1);
    registry.current_mut().unwrap().buffer_mut().insert_char('x');

    let view = build_status_view(&registry);
    assert_eq!(view.file_name, "b.txt");
    assert_eq!(view.directory, PathBuf::from("/w"));
    assert!(view.modified);
    assert_eq!((view.line, view.column), (3, 3));
    assert_eq!(view.percent, 40);
    assert_eq!(view.encoding, "UTF-8");
    assert_eq!(view.vcs.commit, "No GIT");

    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].name, "a.txt");
    assert!(!view.rows[0].modified);
    assert!(!view.rows[0].is_current);
    assert!(view.rows[1].modified);
    assert!(view.rows[1].is_current);
}

#[test]
fn test_status_view_without_entries() {
    let view = build_status_view(&Registry::new());
    assert_eq!(view, StatusView::default());
}

use super::*;

#[test]
fn focus_cycles_through_every_panel() {
    let start = FocusTarget::default();
    assert_eq!(start, FocusTarget::Editor);
    assert_eq!(start.next(), FocusTarget::Explorer);
    assert_eq!(start.next().next(), FocusTarget::OpenFiles);
    assert_eq!(start.next().next().next(), start);
}

#[test]
fn event_result_predicates() {
    assert!(EventResult::Consumed.is_consumed());
    assert!(!EventResult::Ignored.is_consumed());
    assert!(EventResult::Quit.is_quit());
}

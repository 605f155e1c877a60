use super::*;
use crate::{Level, Score, SkillCatalog};

fn three_level_state() -> EditorState {
    let catalog: SkillCatalog = "Serving, Passing".parse().unwrap();
    let levels = vec![
        Level::new("A", "#ef4444", ""),
        Level::new("B", "#f97316", ""),
        Level::new("C", "#22c55e", ""),
    ];
    let anchors = vec![
        vec![Score::try_from_f64(4.0).unwrap(), Score::try_from_f64(7.0).unwrap()],
        vec![Score::try_from_f64(3.0).unwrap(), Score::try_from_f64(6.5).unwrap()],
    ];
    EditorState::new("Club", &catalog, levels, anchors).unwrap()
}

#[test]
fn missing_criteria_reads_as_absent() {
    let s = three_level_state();
    assert_eq!(s.criteria(0, 1), None);
    assert_eq!(s.criteria(5, 9), None);
    assert_eq!(s.criteria_count(), 0);
}

#[test]
fn set_then_get_returns_trimmed_text() {
    let s = three_level_state();
    let s = s.set_criteria(1, 2, "  Reads the hitter early \n").unwrap();
    assert_eq!(s.criteria(1, 2), Some("Reads the hitter early"));
    assert_eq!(s.criteria(0, 2), None);
}

#[test]
fn empty_text_removes_the_key() {
    let s = three_level_state()
        .set_criteria(0, 2, "Consistent float serve")
        .unwrap();
    let s = s.set_criteria(0, 2, "").unwrap();
    assert_eq!(s.criteria(0, 2), None);
    assert_eq!(s.criteria_count(), 0);
}

#[test]
fn whitespace_only_text_also_removes() {
    let s = three_level_state().set_criteria(0, 0, "x").unwrap();
    let s = s.set_criteria(0, 0, "   ").unwrap();
    assert_eq!(s.criteria(0, 0), None);
}

#[test]
fn set_leaves_previous_state_untouched() {
    let before = three_level_state();
    let after = before.set_criteria(0, 1, "Overhand serve").unwrap();
    assert_eq!(before.criteria(0, 1), None);
    assert_eq!(after.criteria(0, 1), Some("Overhand serve"));
    assert_ne!(before, after);
}

#[test]
fn set_rejects_out_of_range_cells() {
    let s = three_level_state();
    assert!(s.set_criteria(2, 0, "x").is_err());
    assert!(s.set_criteria(0, 3, "x").is_err());
}

#[test]
fn no_length_limit_is_enforced() {
    let long = "a".repeat(10_000);
    let s = three_level_state().set_criteria(1, 0, &long).unwrap();
    assert_eq!(s.criteria(1, 0).map(str::len), Some(10_000));
}

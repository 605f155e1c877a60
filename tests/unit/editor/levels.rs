use super::*;
use crate::SkillCatalog;

fn scores(values: &[f64]) -> Vec<Score> {
    values
        .iter()
        .map(|&v| Score::try_from_f64(v).unwrap())
        .collect()
}

fn state(names: &[&str], anchors: &[&[f64]]) -> EditorState {
    let catalog = SkillCatalog::new((0..anchors.len()).map(|i| format!("S{i}").into())).unwrap();
    let levels = names
        .iter()
        .zip(crate::COLOR_PALETTE)
        .map(|(n, c)| Level::new(*n, c, format!("{n} description")))
        .collect();
    let anchors = anchors.iter().map(|a| scores(a)).collect();
    EditorState::new("Club", &catalog, levels, anchors).unwrap()
}

fn names(s: &EditorState) -> Vec<&str> {
    s.levels().map(|l| l.name.as_str()).collect()
}

fn anchor_values(s: &EditorState, skill: usize) -> Vec<f64> {
    s.anchors(skill)
        .unwrap()
        .iter()
        .map(|a| a.as_f64())
        .collect()
}

#[test]
fn add_level_splits_widest_band_lowest_index_on_ties() {
    // Bands are 3, 3, 2, 2 wide: the first 3-wide band wins.
    let s = state(&["A", "B", "C", "D"], &[&[3.0, 6.0, 8.0]]);
    assert_eq!(s.add_level_index(), Some(0));
    let next = s.add_level(&EditorOpts::default()).applied().unwrap();
    assert_eq!(next.level_count(), 5);
    assert_eq!(anchor_values(&next, 0), vec![1.5, 3.0, 6.0, 8.0]);
    assert_eq!(names(&next), vec!["New Level", "A", "B", "C", "D"]);
    next.validate().unwrap();
}

#[test]
fn add_level_can_split_the_top_band() {
    let s = state(&["A", "B", "C", "D"], &[&[2.0, 4.0, 5.0]]);
    assert_eq!(s.add_level_index(), Some(3));
    let next = s.add_level(&EditorOpts::default()).applied().unwrap();
    assert_eq!(anchor_values(&next, 0), vec![2.0, 4.0, 5.0, 7.5]);
    assert_eq!(names(&next), vec!["A", "B", "C", "New Level", "D"]);
}

#[test]
fn add_level_averages_gaps_across_skills() {
    // Totals in half-steps: level 0 = 4 + 10, level 1 = 12 + 2, level 2 = 4 + 8.
    let s = state(&["A", "B", "C"], &[&[2.0, 8.0], &[5.0, 6.0]]);
    assert_eq!(s.add_level_index(), Some(0));
    let next = s.add_level(&EditorOpts::default()).applied().unwrap();
    assert_eq!(anchor_values(&next, 0), vec![1.0, 2.0, 8.0]);
    assert_eq!(anchor_values(&next, 1), vec![2.5, 5.0, 6.0]);
}

#[test]
fn add_level_skips_bands_too_narrow_in_any_skill() {
    // Level 1 is widest on average but only 0.5 wide in the second skill.
    let s = state(&["A", "B", "C"], &[&[1.0, 9.0], &[4.0, 4.5]]);
    assert_eq!(s.add_level_index(), Some(2));
    let next = s.add_level(&EditorOpts::default()).applied().unwrap();
    next.validate().unwrap();
}

#[test]
fn add_level_is_blocked_when_no_band_has_room_everywhere() {
    let s = state(&["A", "B"], &[&[0.5], &[9.5]]);
    let edit = s.add_level(&EditorOpts::default());
    assert_eq!(edit, Edit::Blocked(Blocked::NoRoom));
    assert_eq!(edit.or_keep(&s), s);
}

#[test]
fn add_level_uses_configured_defaults_and_next_free_color() {
    let s = state(&["A", "B"], &[&[5.0]]);
    let opts = EditorOpts {
        new_level_name: "Fresh".to_owned(),
        new_level_description: "todo".to_owned(),
        ..EditorOpts::default()
    };
    let next = s.add_level(&opts).applied().unwrap();
    let added = next.level(0).unwrap();
    assert_eq!(added.name, "Fresh");
    assert_eq!(added.description, "todo");
    // Palette entries 0 and 1 are taken by A and B; walk starts at index 2.
    assert_eq!(added.color, crate::COLOR_PALETTE[2]);
}

#[test]
fn add_level_shifts_criteria_at_and_above_the_insert() {
    let s = state(&["A", "B", "C"], &[&[2.0, 8.0]]);
    let s = s.set_criteria(0, 0, "a").unwrap();
    let s = s.set_criteria(0, 1, "b").unwrap();
    let s = s.set_criteria(0, 2, "c").unwrap();
    assert_eq!(s.add_level_index(), Some(1));
    let next = s.add_level(&EditorOpts::default()).applied().unwrap();
    assert_eq!(next.criteria(0, 0), Some("a"));
    assert_eq!(next.criteria(0, 1), None);
    assert_eq!(next.criteria(0, 2), Some("b"));
    assert_eq!(next.criteria(0, 3), Some("c"));
}

#[test]
fn delete_middle_level_merges_into_level_above() {
    let s = state(&["A", "B", "C"], &[&[4.0, 7.0]]);
    let s = s.set_criteria(0, 1, "b").unwrap();
    let s = s.set_criteria(0, 2, "c").unwrap();
    let next = s.delete_level(1).unwrap().applied().unwrap();
    assert_eq!(names(&next), vec!["A", "C"]);
    assert_eq!(anchor_values(&next, 0), vec![4.0]);
    assert_eq!(next.criteria(0, 1), Some("c"));
    assert_eq!(next.criteria_count(), 1);
}

#[test]
fn delete_last_level_drops_last_anchor() {
    let s = state(&["A", "B", "C"], &[&[4.0, 7.0], &[2.0, 3.0]]);
    let next = s.delete_level(2).unwrap().applied().unwrap();
    assert_eq!(names(&next), vec!["A", "B"]);
    assert_eq!(anchor_values(&next, 0), vec![4.0]);
    assert_eq!(anchor_values(&next, 1), vec![2.0]);
    next.validate().unwrap();
}

#[test]
fn delete_is_blocked_at_two_levels() {
    let s = state(&["A", "B"], &[&[5.0]]);
    assert!(!s.can_delete_level());
    let edit = s.delete_level(0).unwrap();
    assert_eq!(edit, Edit::Blocked(Blocked::MinimumLevels));
}

#[test]
fn delete_rejects_out_of_range_index() {
    let s = state(&["A", "B", "C"], &[&[4.0, 7.0]]);
    assert!(s.delete_level(3).is_err());
}

#[test]
fn add_then_delete_restores_count_and_other_criteria() {
    let s = state(&["A", "B", "C", "D"], &[&[1.0, 5.0, 6.0], &[2.0, 6.0, 8.0]]);
    let s = s.set_criteria(0, 0, "a0").unwrap();
    let s = s.set_criteria(1, 2, "c1").unwrap();
    let s = s.set_criteria(1, 3, "d1").unwrap();
    let idx = s.add_level_index().unwrap();
    let added = s.add_level(&EditorOpts::default()).applied().unwrap();
    let back = added.delete_level(idx).unwrap().applied().unwrap();
    assert_eq!(back.level_count(), s.level_count());
    assert_eq!(back.criteria_by_index(), s.criteria_by_index());
}

#[test]
fn reorder_moves_widths_with_the_level() {
    // Widths 2, 1, 4, 3.
    let s = state(&["A", "B", "C", "D"], &[&[2.0, 3.0, 7.0]]);
    let next = s.reorder_level(0, 2).unwrap();
    assert_eq!(names(&next), vec!["B", "C", "A", "D"]);
    assert_eq!(anchor_values(&next, 0), vec![1.0, 5.0, 7.0]);

    let next = s.reorder_level(3, 0).unwrap();
    assert_eq!(names(&next), vec!["D", "A", "B", "C"]);
    assert_eq!(anchor_values(&next, 0), vec![3.0, 5.0, 6.0]);
}

#[test]
fn reorder_remaps_criteria_like_a_single_item_move() {
    let s = state(&["A", "B", "C", "D"], &[&[2.0, 3.0, 7.0]]);
    let mut s = s;
    for (i, t) in ["a", "b", "c", "d"].iter().enumerate() {
        s = s.set_criteria(0, i, t).unwrap();
    }
    let down = s.reorder_level(0, 2).unwrap();
    let got: Vec<_> = (0..4).map(|i| down.criteria(0, i).unwrap()).collect();
    assert_eq!(got, vec!["b", "c", "a", "d"]);

    let up = s.reorder_level(3, 1).unwrap();
    let got: Vec<_> = (0..4).map(|i| up.criteria(0, i).unwrap()).collect();
    assert_eq!(got, vec!["a", "d", "b", "c"]);
}

#[test]
fn reorder_to_same_index_is_identity() {
    let s = state(&["A", "B", "C"], &[&[4.0, 7.0]]);
    assert_eq!(s.reorder_level(1, 1).unwrap(), s);
}

#[test]
fn reorder_rejects_out_of_range_index() {
    let s = state(&["A", "B", "C"], &[&[4.0, 7.0]]);
    assert!(s.reorder_level(0, 3).is_err());
    assert!(s.reorder_level(3, 0).is_err());
}

#[test]
fn edits_never_touch_the_source_state() {
    let s = state(&["A", "B", "C"], &[&[4.0, 7.0]]);
    let snapshot = s.clone();
    let _ = s.add_level(&EditorOpts::default());
    let _ = s.delete_level(0).unwrap();
    let _ = s.reorder_level(0, 2).unwrap();
    assert_eq!(s, snapshot);
}

use super::*;
use crate::RubricError;

fn band(order: u32, min: f64, max: f64, label: &str) -> Band {
    Band {
        order,
        min_score: min,
        max_score: max,
        label: label.to_owned(),
        criteria: None,
        color: "#22c55e".to_owned(),
        description: None,
    }
}

fn skill(name: &str, bands: Vec<Band>) -> SkillBands {
    SkillBands {
        skill: name.into(),
        bands,
    }
}

fn catalog() -> SkillCatalog {
    "Serving, Passing".parse().unwrap()
}

fn matrix() -> SkillMatrix {
    let mut serving = vec![
        band(1, 0.0, 4.0, "Beginner"),
        band(2, 4.0, 7.5, "Intermediate"),
        band(3, 7.5, 10.0, "Advanced"),
    ];
    serving[0].criteria = Some("Underhand over the net".to_owned());
    serving[0].description = Some("New to the club".to_owned());
    let mut passing = vec![
        band(1, 0.0, 3.0, "Beginner"),
        band(2, 3.0, 6.0, "Intermediate"),
        band(3, 6.0, 10.0, "Advanced"),
    ];
    passing[2].criteria = Some("Passes a jump float to target".to_owned());
    SkillMatrix {
        id: "m-1".to_owned(),
        name: "Club".to_owned(),
        skills: vec![skill("Serving", serving), skill("Passing", passing)],
    }
}

fn anchors(state: &EditorState, skill: usize) -> Vec<f64> {
    state
        .anchors(skill)
        .unwrap()
        .iter()
        .map(|s| s.as_f64())
        .collect()
}

#[test]
fn decode_reads_levels_anchors_and_criteria() {
    let state = decode(&matrix(), &catalog(), &EditorOpts::default()).unwrap();
    assert_eq!(state.name(), "Club");
    assert_eq!(state.level_count(), 3);
    let first = state.level(0).unwrap();
    assert_eq!(first.name, "Beginner");
    assert_eq!(first.description, "New to the club");
    assert_eq!(anchors(&state, 0), vec![4.0, 7.5]);
    assert_eq!(anchors(&state, 1), vec![3.0, 6.0]);
    assert_eq!(state.criteria(0, 0), Some("Underhand over the net"));
    assert_eq!(state.criteria(1, 2), Some("Passes a jump float to target"));
    assert_eq!(state.criteria_count(), 2);
}

#[test]
fn decode_sorts_bands_by_order() {
    let mut m = matrix();
    for s in &mut m.skills {
        s.bands.reverse();
    }
    let state = decode(&m, &catalog(), &EditorOpts::default()).unwrap();
    assert_eq!(state.level(0).unwrap().name, "Beginner");
    assert_eq!(anchors(&state, 0), vec![4.0, 7.5]);
}

#[test]
fn decode_lays_skills_out_in_catalog_order() {
    let mut m = matrix();
    m.skills.reverse();
    let state = decode(&m, &catalog(), &EditorOpts::default()).unwrap();
    assert_eq!(state.skills()[0].as_str(), "Serving");
    assert_eq!(anchors(&state, 0), vec![4.0, 7.5]);
    // Levels still come from the first stored skill (Passing now), which has no description.
    assert_eq!(state.level(0).unwrap().description, "");
}

#[test]
fn decode_rejects_differing_band_counts() {
    let mut m = matrix();
    m.skills[1].bands.pop();
    let err = decode(&m, &catalog(), &EditorOpts::default()).unwrap_err();
    assert!(matches!(err, RubricError::Malformed(_)), "{err}");
}

#[test]
fn decode_rejects_single_band() {
    let m = SkillMatrix {
        id: "m".to_owned(),
        name: "Tiny".to_owned(),
        skills: vec![
            skill("Serving", vec![band(1, 0.0, 10.0, "All")]),
            skill("Passing", vec![band(1, 0.0, 10.0, "All")]),
        ],
    };
    assert!(matches!(
        decode(&m, &catalog(), &EditorOpts::default()),
        Err(RubricError::Malformed(_))
    ));
}

#[test]
fn decode_rejects_skills_outside_the_catalog() {
    let mut m = matrix();
    m.skills[1].skill = "Blocking".into();
    assert!(decode(&m, &catalog(), &EditorOpts::default()).is_err());

    let mut m = matrix();
    m.skills.pop();
    let err = decode(&m, &catalog(), &EditorOpts::default()).unwrap_err();
    assert!(err.to_string().contains("missing"), "{err}");
}

#[test]
fn decode_rejects_off_grid_and_crowded_anchors() {
    let mut m = matrix();
    m.skills[0].bands[0].max_score = 4.2;
    m.skills[0].bands[1].min_score = 4.2;
    assert!(decode(&m, &catalog(), &EditorOpts::default()).is_err());

    let mut m = matrix();
    m.skills[0].bands[1].max_score = 4.0;
    m.skills[0].bands[2].min_score = 4.0;
    assert!(matches!(
        decode(&m, &catalog(), &EditorOpts::default()),
        Err(RubricError::Malformed(_))
    ));
}

#[test]
fn decode_tolerates_inconsistent_min_scores() {
    let mut m = matrix();
    m.skills[0].bands[1].min_score = 3.0;
    m.skills[0].bands[2].max_score = 9.0;
    let state = decode(&m, &catalog(), &EditorOpts::default()).unwrap();
    assert_eq!(anchors(&state, 0), vec![4.0, 7.5]);
}

#[test]
fn decode_fills_missing_colour() {
    let mut m = matrix();
    m.skills[0].bands[1].color = String::new();
    let opts = EditorOpts::default();
    let state = decode(&m, &catalog(), &opts).unwrap();
    assert_eq!(state.level(1).unwrap().color, opts.fallback_color);
}

#[test]
fn encode_writes_contiguous_bands() {
    let state = decode(&matrix(), &catalog(), &EditorOpts::default()).unwrap();
    let req = encode(&state);
    assert_eq!(req.name, "Club");
    assert_eq!(req.skills.len(), 2);
    let serving = &req.skills[0];
    assert_eq!(serving.skill.as_str(), "Serving");
    let bounds: Vec<(u32, f64, f64)> = serving
        .bands
        .iter()
        .map(|b| (b.order, b.min_score, b.max_score))
        .collect();
    assert_eq!(bounds, vec![(1, 0.0, 4.0), (2, 4.0, 7.5), (3, 7.5, 10.0)]);
    assert_eq!(serving.bands[0].description.as_deref(), Some("New to the club"));
    assert_eq!(serving.bands[1].description, None);
    assert_eq!(serving.bands[1].criteria, None);
    // Level metadata is shared across skills.
    assert_eq!(req.skills[1].bands[0].description.as_deref(), Some("New to the club"));
}

#[test]
fn encode_then_decode_gives_back_the_state() {
    let opts = EditorOpts::default();
    let state = decode(&matrix(), &catalog(), &opts)
        .unwrap()
        .add_level(&opts)
        .applied()
        .unwrap()
        .set_criteria(1, 1, "  Platform angle  ")
        .unwrap();
    let saved = matrix().with_update(encode(&state));
    let back = decode(&saved, &catalog(), &opts).unwrap();
    assert_eq!(back, state);
    assert_eq!(back.criteria(1, 1), Some("Platform angle"));
}

#[test]
fn stored_criteria_text_is_kept_verbatim() {
    let mut m = matrix();
    m.skills[0].bands[1].criteria = Some("  Overhand float\n".to_owned());
    m.skills[1].bands[1].criteria = Some("   ".to_owned());
    let opts = EditorOpts::default();
    let state = decode(&m, &catalog(), &opts).unwrap();
    assert_eq!(state.criteria(0, 1), Some("  Overhand float\n"));
    assert_eq!(state.criteria(1, 1), None);

    let saved = encode(&state);
    assert_eq!(saved.skills[0].bands[1].criteria.as_deref(), Some("  Overhand float\n"));
    assert_eq!(saved.skills[1].bands[1].criteria, None);
}

use super::*;
use crate::foundation::error::VignetteError;

fn def(title: &str, style: &str) -> SceneDef {
    SceneDef {
        title: title.to_owned(),
        time_period: "1492".to_owned(),
        location: "Atlantic".to_owned(),
        one_line: "Sails on the horizon.".to_owned(),
        narration: format!("narration for {title}"),
        visual_keywords: vec!["caravel".to_owned()],
        palette: vec!["#0a1f44".to_owned(), "#e0c068".to_owned(), "#ffffff".to_owned()],
        environment: "sea".to_owned(),
        camera_style: style.to_owned(),
    }
}

fn defs(n: usize) -> Vec<SceneDef> {
    (0..n).map(|i| def(&format!("s{i}"), "dolly-in")).collect()
}

fn installed(n: usize) -> PlaybackMachine {
    let mut m = PlaybackMachine::new();
    let req = m.begin_show("voyage").unwrap();
    m.complete_show(req.id, Ok(defs(n))).unwrap();
    m
}

#[test]
fn starts_idle_with_default_flags() {
    let m = PlaybackMachine::new();
    let s = m.state();
    assert!(s.is_idle());
    assert_eq!(s.active(), None);
    assert!(!s.playing());
    assert!(s.autoplay());
    assert!(s.narration_enabled());
    assert_eq!(s.quality(), Quality::Medium);
    assert!(!s.loading());
}

#[test]
fn blank_topics_are_ignored() {
    let mut m = PlaybackMachine::new();
    assert!(m.begin_show("").is_none());
    assert!(m.begin_show("   \t").is_none());
    assert!(!m.state().loading());
}

#[test]
fn install_activates_scene_zero_and_plays() {
    let mut m = PlaybackMachine::new();
    let req = m.begin_show("  voyage ").unwrap();
    assert_eq!(req.topic, "voyage");
    assert!(m.state().loading());

    let Completion::Installed(act) = m.complete_show(req.id, Ok(defs(3))).unwrap() else {
        panic!("expected install");
    };
    assert_eq!(act.index, 0);
    assert_eq!(act.scene.title, "s0");
    let s = m.state();
    assert!(!s.loading());
    assert!(s.playing());
    assert_eq!(s.active(), Some(0));
    assert_eq!(s.len(), 3);
    assert_eq!(s.sequence_id(), SequenceId(1));
}

#[test]
fn next_wraps_around() {
    let mut m = installed(3);
    for n in 1..=10usize {
        let act = m.next().unwrap();
        assert_eq!(act.index, n % 3);
        assert_eq!(m.state().active(), Some(n % 3));
    }
}

#[test]
fn previous_wraps_backwards() {
    let mut m = installed(4);
    let seen: Vec<usize> = (0..5).map(|_| m.previous().unwrap().index).collect();
    assert_eq!(seen, vec![3, 2, 1, 0, 3]);
}

#[test]
fn single_scene_next_reactivates_same_scene() {
    let mut m = installed(1);
    assert_eq!(m.next().unwrap().index, 0);
    assert_eq!(m.previous().unwrap().index, 0);
}

#[test]
fn go_to_rejects_out_of_range() {
    let mut m = installed(2);
    assert!(m.go_to(2).is_none());
    assert!(m.go_to(usize::MAX).is_none());
    assert_eq!(m.state().active(), Some(0));
    assert_eq!(m.go_to(1).unwrap().index, 1);
    assert_eq!(m.go_to(1).unwrap().index, 1);
}

#[test]
fn navigation_on_idle_machine_is_noop() {
    let mut m = PlaybackMachine::new();
    assert!(m.next().is_none());
    assert!(m.previous().is_none());
    assert!(m.go_to(0).is_none());
}

#[test]
fn failed_restart_keeps_current_show() {
    let mut m = installed(3);
    m.next();
    let req = m.begin_show("other").unwrap();
    let err = m
        .complete_show(req.id, Err(VignetteError::validation("timeout")))
        .unwrap_err();
    assert!(err.is_provider_failure());
    assert!(!m.state().loading());
    assert_eq!(m.state().active(), Some(1));
    assert_eq!(m.state().len(), 3);
    assert_eq!(m.state().sequence_id(), SequenceId(1));
}

#[test]
fn unknown_style_rejects_the_whole_batch() {
    let mut m = installed(2);
    let req = m.begin_show("bad").unwrap();
    let batch = vec![def("ok", "handheld"), def("bad", "warp-speed")];
    let err = m.complete_show(req.id, Ok(batch)).unwrap_err();
    assert!(err.is_provider_failure());
    assert_eq!(m.state().len(), 2);
    assert_eq!(m.state().active(), Some(0));
}

#[test]
fn empty_result_is_a_provider_failure() {
    let mut m = PlaybackMachine::new();
    let req = m.begin_show("nothing").unwrap();
    let err = m.complete_show(req.id, Ok(vec![])).unwrap_err();
    assert!(err.is_provider_failure());
    assert!(m.state().is_idle());
}

#[test]
fn last_request_wins() {
    let mut m = PlaybackMachine::new();
    let first = m.begin_show("first").unwrap();
    let second = m.begin_show("second").unwrap();

    let c = m.complete_show(second.id, Ok(defs(2))).unwrap();
    assert!(matches!(c, Completion::Installed(_)));
    let c = m.complete_show(first.id, Ok(defs(5))).unwrap();
    assert!(matches!(c, Completion::Superseded));
    assert_eq!(m.state().len(), 2);
}

#[test]
fn stale_result_keeps_loading_until_latest_arrives() {
    let mut m = PlaybackMachine::new();
    let first = m.begin_show("first").unwrap();
    let second = m.begin_show("second").unwrap();
    m.complete_show(first.id, Ok(defs(5))).unwrap();
    assert!(m.state().loading());
    assert!(m.state().is_idle());
    m.complete_show(second.id, Ok(defs(1))).unwrap();
    assert!(!m.state().loading());
}

#[test]
fn toggle_and_flags_do_not_move_active() {
    let mut m = installed(3);
    m.next();
    assert!(!m.toggle_play());
    m.set_autoplay(false);
    m.set_narration_enabled(false);
    m.set_quality(Quality::High);
    m.set_language("de-DE");
    let s = m.state();
    assert_eq!(s.active(), Some(1));
    assert!(!s.playing());
    assert!(!s.autoplay());
    assert!(!s.narration_enabled());
    assert_eq!(s.quality(), Quality::High);
    assert_eq!(s.language(), "de-DE");
    assert!(m.toggle_play());
}

#[test]
fn schedule_key_tracks_runnable_inputs() {
    let mut m = installed(2);
    let k1 = m.schedule_key();
    assert!(k1.runnable);
    m.next();
    assert_eq!(m.schedule_key(), k1);
    m.set_quality(Quality::Low);
    assert_eq!(m.schedule_key(), k1);
    m.toggle_play();
    let k2 = m.schedule_key();
    assert_ne!(k2, k1);
    assert!(!k2.runnable);
    m.toggle_play();
    m.set_language("ja-JP");
    assert_ne!(m.schedule_key(), k1);
}

#[test]
fn quality_ordinals_round_trip() {
    for q in [Quality::Low, Quality::Medium, Quality::High] {
        assert_eq!(Quality::try_from(q.level()).unwrap(), q);
    }
    assert!(Quality::try_from(3).is_err());
    assert!(Quality::High.render_settings().light_intensity > Quality::Low.render_settings().light_intensity);
    let q: Quality = serde_json::from_str("2").unwrap();
    assert_eq!(q, Quality::High);
    assert!(serde_json::from_str::<Quality>("7").is_err());
}

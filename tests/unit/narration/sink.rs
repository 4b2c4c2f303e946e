use super::*;

#[test]
fn tracing_narrator_keeps_only_latest_utterance() {
    let mut n = TracingNarrator::new();
    assert!(n.current().is_none());
    n.speak("first", "en-US");
    n.speak("second", "en-US");
    assert_eq!(n.current(), Some("second"));
    n.cancel();
    assert!(n.current().is_none());
    n.cancel();
    assert!(n.current().is_none());
}

#[test]
fn silent_narrator_is_object_safe() {
    let mut sinks: Vec<Box<dyn NarrationSink>> =
        vec![Box::new(SilentNarrator), Box::new(TracingNarrator::new())];
    for s in &mut sinks {
        s.speak("x", "fr-FR");
        s.cancel();
    }
}

use super::*;

fn key(sequence: u64, playing: bool, autoplay: bool) -> ScheduleKey {
    ScheduleKey {
        sequence: SequenceId(sequence),
        playing,
        autoplay,
        language: "en-US".to_owned(),
        runnable: playing && autoplay && sequence > 0,
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn fires_once_per_period_after_arming() {
    let mut s = AutoplayScheduler::new(ms(100));
    assert!(s.sync(&key(1, true, true), ms(0)));
    assert!(!s.poll(ms(99)));
    assert!(s.poll(ms(100)));
    assert!(!s.poll(ms(150)));
    assert!(s.poll(ms(200)));
    assert_eq!(s.deadline(), Some(ms(300)));
}

#[test]
fn unchanged_key_does_not_rearm() {
    let mut s = AutoplayScheduler::new(ms(100));
    s.sync(&key(1, true, true), ms(0));
    assert!(!s.sync(&key(1, true, true), ms(60)));
    assert_eq!(s.deadline(), Some(ms(100)));
}

#[test]
fn changed_key_restarts_a_full_period() {
    let mut s = AutoplayScheduler::new(ms(100));
    s.sync(&key(1, true, true), ms(0));
    assert!(s.sync(&key(1, true, false), ms(70)));
    assert!(!s.is_armed());
    assert!(!s.poll(ms(1000)));

    assert!(s.sync(&key(1, true, true), ms(1000)));
    assert_eq!(s.deadline(), Some(ms(1100)));
    assert!(!s.poll(ms(1099)));
    assert!(s.poll(ms(1100)));
}

#[test]
fn new_sequence_identity_rearms_even_with_same_flags() {
    let mut s = AutoplayScheduler::new(ms(100));
    s.sync(&key(1, true, true), ms(0));
    assert!(s.sync(&key(2, true, true), ms(90)));
    assert_eq!(s.deadline(), Some(ms(190)));
}

#[test]
fn late_poll_does_not_burst() {
    let mut s = AutoplayScheduler::new(ms(100));
    s.sync(&key(1, true, true), ms(0));
    assert!(s.poll(ms(550)));
    assert!(!s.poll(ms(551)));
    assert_eq!(s.deadline(), Some(ms(650)));
}

#[test]
fn disarm_cancels_and_forgets() {
    let mut s = AutoplayScheduler::default();
    assert_eq!(s.period(), ms(6800));
    s.sync(&key(1, true, true), ms(0));
    s.disarm();
    assert!(!s.is_armed());
    assert!(!s.poll(ms(10_000)));
    assert!(s.sync(&key(1, true, true), ms(10_000)));
}

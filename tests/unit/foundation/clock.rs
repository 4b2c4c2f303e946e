use super::*;

#[test]
fn manual_clock_handles_share_time() {
    let a = ManualClock::new();
    let b = a.clone();
    a.advance_ms(250);
    assert_eq!(b.now(), Duration::from_millis(250));
}

#[test]
fn manual_clock_accumulates_advances() {
    let c = ManualClock::new();
    assert_eq!(c.now(), Duration::ZERO);
    c.advance(Duration::from_micros(1500));
    c.advance_ms(2);
    assert_eq!(c.now(), Duration::from_micros(3500));
}

#[test]
fn monotonic_clock_never_goes_backwards() {
    let c = MonotonicClock::new();
    let t0 = c.now();
    let t1 = c.now();
    assert!(t1 >= t0);
}

use super::*;
use crate::camera::trajectory::TrajectoryParams;
use crate::foundation::core::Vec3;

fn clock() -> FrameClock {
    FrameClock::new(CameraTrajectory::new(TrajectoryParams::default()), 42)
}

#[test]
fn first_tick_is_sampled_at_zero() {
    let mut c = clock();
    let (idx, t, pose) = c.advance(Some(CameraStyle::OrbitSlow), 1.0 / 60.0).unwrap();
    assert_eq!(idx, FrameIndex(0));
    assert_eq!(t, 0.0);
    assert_eq!(pose.position, Vec3::new(0.0, 2.5, 6.0));
    assert_eq!(c.tick_index(), FrameIndex(1));
    assert!((c.elapsed_secs() - 1.0 / 60.0).abs() < 1e-12);
}

#[test]
fn elapsed_is_monotonic_and_continuous_across_styles() {
    let mut c = clock();
    let mut last = -1.0;
    for i in 0..120 {
        let style = if i < 60 {
            CameraStyle::DollyIn
        } else {
            CameraStyle::CraneUp
        };
        let (_, t, _) = c.advance(Some(style), 0.5).unwrap();
        assert!(t > last);
        last = t;
    }
    assert_eq!(c.elapsed_secs(), 60.0);
}

#[test]
fn empty_stage_holds_pose() {
    let mut c = clock();
    let before = c.pose();
    let (_, _, pose) = c.advance(None, 0.1).unwrap();
    assert_eq!(pose, before);
}

#[test]
fn bad_delta_is_an_evaluation_error() {
    let mut c = clock();
    assert!(c.advance(Some(CameraStyle::LockedOff), f64::NAN).is_err());
    assert!(c.advance(Some(CameraStyle::LockedOff), -0.1).is_err());
    assert_eq!(c.tick_index(), FrameIndex(0));
}

#[test]
fn same_seed_replays_handheld() {
    let mut a = clock();
    let mut b = clock();
    for _ in 0..30 {
        let pa = a.advance(Some(CameraStyle::Handheld), 1.0 / 60.0).unwrap().2;
        let pb = b.advance(Some(CameraStyle::Handheld), 1.0 / 60.0).unwrap().2;
        assert_eq!(pa, pb);
    }
}

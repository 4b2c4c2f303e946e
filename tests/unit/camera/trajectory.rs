use super::*;

fn traj() -> CameraTrajectory {
    CameraTrajectory::new(TrajectoryParams::default())
}

#[test]
fn orbit_at_time_zero_is_exact() {
    let mut rng = Rng64::new(0);
    let pose = traj().step(
        CameraStyle::OrbitSlow,
        0.0,
        &CameraPose::default(),
        &mut rng,
    );
    assert_eq!(pose.position, Vec3::new(0.0, 2.5, 6.0));
    assert_eq!(pose.look_at, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(pose.roll, 0.0);
}

#[test]
fn orbit_ignores_previous_pose() {
    let mut rng = Rng64::new(0);
    let far = CameraPose::looking_at(Vec3::splat(100.0), Vec3::ZERO);
    let a = traj().step(CameraStyle::OrbitSlow, 3.0, &far, &mut rng);
    let b = traj().step(CameraStyle::OrbitSlow, 3.0, &CameraPose::default(), &mut rng);
    assert_eq!(a, b);
    assert!((a.position.length_squared() - 2.5 * 2.5 - 36.0).abs() < 1e-9);
}

#[test]
fn dolly_converges_without_overshoot() {
    let t = traj();
    let mut rng = Rng64::new(0);
    let mut pose = CameraPose::looking_at(Vec3::new(0.0, 1.5, 10.0), Vec3::ZERO);
    // Hold time still so the target is fixed at z = 4.4.
    let target = t.dolly_target(0.0);
    assert!((target.z - 4.4).abs() < 1e-12);
    let mut last_gap = pose.position.z - target.z;
    for _ in 0..300 {
        pose = t.step(CameraStyle::DollyIn, 0.0, &pose, &mut rng);
        let gap = pose.position.z - target.z;
        assert!(gap > 0.0);
        assert!(gap < last_gap);
        last_gap = gap;
    }
}

#[test]
fn push_pull_shares_the_dolly_path() {
    let t = traj();
    let mut rng = Rng64::new(0);
    let start = CameraPose::default();
    let a = t.step(CameraStyle::DollyIn, 2.0, &start, &mut rng);
    let b = t.step(CameraStyle::PushPull, 2.0, &start, &mut rng);
    assert_eq!(a, b);
}

#[test]
fn crane_target_follows_formula() {
    let t = traj();
    let target = t.crane_target(10.0);
    assert!((target.x - 0.6 * (3.0f64).sin()).abs() < 1e-12);
    assert!((target.y - (2.0 + (1.5f64).sin())).abs() < 1e-12);
    assert_eq!(target.z, 5.0);
}

#[test]
fn locked_off_converges_faster_than_dolly() {
    let t = traj();
    let mut rng = Rng64::new(0);
    let start = CameraPose::looking_at(Vec3::new(0.0, 1.6, 15.0), Vec3::new(0.0, 1.0, 0.0));
    let locked = t.step(CameraStyle::LockedOff, 0.0, &start, &mut rng);
    assert!((locked.position.z - (15.0 - 10.0 * 0.08)).abs() < 1e-12);

    let mut pose = start;
    for _ in 0..400 {
        pose = t.step(CameraStyle::LockedOff, 0.0, &pose, &mut rng);
    }
    assert!((pose.position - Vec3::new(0.0, 1.6, 5.0)).length() < 1e-6);
}

#[test]
fn handheld_is_reproducible_from_seed() {
    let t = traj();
    let run = |seed| {
        let mut rng = Rng64::new(seed);
        let mut pose = CameraPose::default();
        for i in 0..50 {
            pose = t.step(CameraStyle::Handheld, i as f64 / 60.0, &pose, &mut rng);
        }
        pose
    };
    assert_eq!(run(9), run(9));
    assert_ne!(run(9), run(10));
}

#[test]
fn handheld_steps_are_small() {
    let t = traj();
    let mut rng = Rng64::new(3);
    let start = CameraPose::default();
    let next = t.step(CameraStyle::Handheld, 0.0, &start, &mut rng);
    let d = next.position - start.position;
    for c in [d.x, d.y, d.z] {
        assert!(c.abs() < 0.01);
    }
    assert!(next.roll.abs() < 0.002);
    assert_eq!(next.look_at, start.look_at);
}

#[test]
fn params_validation_rejects_bad_smoothing() {
    let mut p = TrajectoryParams::default();
    assert!(p.validate().is_ok());
    p.follow_smoothing = 0.0;
    assert!(p.validate().is_err());
    p.follow_smoothing = 1.5;
    assert!(p.validate().is_err());
    p = TrajectoryParams {
        orbit_radius: -1.0,
        ..TrajectoryParams::default()
    };
    assert!(p.validate().is_err());
}

#[test]
fn partial_params_json_fills_defaults() {
    let p: TrajectoryParams = serde_json::from_str(r#"{ "orbit_radius": 8.0 }"#).unwrap();
    assert_eq!(p.orbit_radius, 8.0);
    assert_eq!(p.follow_smoothing, 0.02);
}

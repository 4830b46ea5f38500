use std::path::Path;

use simulator::{build_headless_sim_app, load_config, LatestSnapshot};

fn sample_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("simulator.toml")
}

#[test]
fn bundled_config_loads_and_compiles() {
    let cfg = load_config(&sample_path()).expect("bundled config parses");
    assert_eq!(cfg.max_ticks, Some(400));
    assert_eq!(cfg.settings.max_history, 300);
    let script = cfg.compiled_script().expect("bundled script parses");
    assert_eq!(script.len(), 4);
    assert!(script.windows(2).all(|w| w[0].0 <= w[1].0));
}

#[test]
fn bundled_run_turns_left_after_the_straight_leg() {
    let cfg = load_config(&sample_path()).expect("bundled config parses");
    let mut app = build_headless_sim_app(cfg).expect("app builds");

    for _ in 0..100 {
        app.update();
    }
    let straight = app.world().resource::<LatestSnapshot>().0.clone().expect("ticked");
    assert!(straight.yaw_deg.abs() < 1e-4, "yaw drifted on the straight leg: {}", straight.yaw_deg);
    assert!(straight.position.x > 0.0);

    for _ in 0..100 {
        app.update();
    }
    let turning = app.world().resource::<LatestSnapshot>().0.clone().expect("ticked");
    assert!(turning.yaw_deg < -1.0, "yaw={}", turning.yaw_deg);
    assert_eq!(turning.trail.len(), 200);
}

//! Property tests for the conversion engine.
//!
//! These exercise the public API end to end: sensitivity round trips between
//! games, FOV pivot consistency, domain rejection, and the yaw search
//! converging on a hidden yaw constant under truthful feedback.

use aimcal_engine::fov::{
    four_by_three_from_horizontal, horizontal_from_four_by_three, horizontal_from_vertical,
    vertical_from_horizontal,
};
use aimcal_engine::{
    convert_sensitivity, counts_per_360, AspectRatio, CalibrationPhase, EngineError, Feedback,
    FovKind, FovTriple, Scale, TurnRate, YawCalibrator,
};

const DPIS: [u32; 3] = [400, 800, 1600];
const CM360S: [f64; 3] = [10.0, 30.0, 60.0];
const YAWS: [f64; 3] = [0.0066, 0.022, 0.15];

fn relative_error(a: f64, b: f64) -> f64 {
    ((a - b) / b).abs()
}

// ── Sensitivity conversion ──

#[test]
fn sensitivity_round_trip_between_games() {
    for dpi in DPIS {
        for cm360 in CM360S {
            let rate = TurnRate::new(dpi, cm360).unwrap();
            for yaw_a in YAWS {
                for yaw_b in YAWS {
                    let sens_a = rate.sensitivity_for(Scale::Yaw(yaw_a)).unwrap();
                    let sens_b =
                        convert_sensitivity(dpi, sens_a, Scale::Yaw(yaw_a), dpi, Scale::Yaw(yaw_b))
                            .unwrap();
                    let back =
                        convert_sensitivity(dpi, sens_b, Scale::Yaw(yaw_b), dpi, Scale::Yaw(yaw_a))
                            .unwrap();
                    assert!(
                        relative_error(back, sens_a) < 1e-9,
                        "dpi={dpi} cm360={cm360} {yaw_a}->{yaw_b}: {sens_a} vs {back}"
                    );
                }
            }
        }
    }
}

#[test]
fn sensitivity_round_trip_through_cm360() {
    for dpi in DPIS {
        for cm360 in CM360S {
            for yaw in YAWS {
                let sens = convert_sensitivity(dpi, cm360, Scale::Cm360, dpi, Scale::Yaw(yaw)).unwrap();
                let back = convert_sensitivity(dpi, sens, Scale::Yaw(yaw), dpi, Scale::Cm360).unwrap();
                assert!(relative_error(back, cm360) < 1e-9);
            }
        }
    }
}

#[test]
fn concrete_cm360_scenario() {
    let counts = counts_per_360(800, 30.0).unwrap();
    assert!((counts - 9448.82).abs() < 0.01);

    let sens = convert_sensitivity(800, 30.0, Scale::Cm360, 800, Scale::Yaw(0.022)).unwrap();
    assert!((sens - 1.731).abs() < 1e-3);

    let cm360 = convert_sensitivity(800, sens, Scale::Yaw(0.022), 800, Scale::Cm360).unwrap();
    assert!((cm360 - 30.0).abs() < 1e-6);
}

#[test]
fn zero_sensitivity_is_rejected() {
    let err = convert_sensitivity(800, 0.0, Scale::Yaw(0.022), 800, Scale::Cm360).unwrap_err();
    assert!(matches!(err, EngineError::InvalidParameter(_)));
}

// ── FOV conversion ──

fn sample_fovs() -> impl Iterator<Item = f64> {
    (0..=355).map(|i| 1.25 + i as f64 * 0.5)
}

fn sample_aspects() -> impl Iterator<Item = AspectRatio> {
    (0..=27).map(|i| AspectRatio::new(0.31 + i as f64 * 0.1).unwrap())
}

#[test]
fn fov_vertical_pivot_consistency() {
    for ar in sample_aspects() {
        for h in sample_fovs() {
            let v = vertical_from_horizontal(h, ar).unwrap();
            let back = horizontal_from_vertical(v, ar).unwrap();
            assert!((back - h).abs() < 1e-9, "h={h} ar={ar:?} back={back}");
        }
    }
}

#[test]
fn fov_four_by_three_pivot_consistency() {
    for ar in sample_aspects() {
        for h in sample_fovs() {
            let f = four_by_three_from_horizontal(h, ar).unwrap();
            let back = horizontal_from_four_by_three(f, ar).unwrap();
            assert!((back - h).abs() < 1e-9, "h={h} ar={ar:?} back={back}");
        }
    }
}

#[test]
fn fov_triple_fields_agree_with_each_other() {
    let ar = AspectRatio::from_resolution(2560, 1080).unwrap();
    let from_h = FovTriple::from_edit(FovKind::Horizontal, 110.0, ar).unwrap();
    let from_v = FovTriple::from_edit(FovKind::Vertical, from_h.vertical, ar).unwrap();
    let from_f = FovTriple::from_edit(FovKind::FourByThree, from_h.four_by_three, ar).unwrap();
    for triple in [from_v, from_f] {
        assert!((triple.horizontal - 110.0).abs() < 1e-9);
        assert!((triple.vertical - from_h.vertical).abs() < 1e-9);
        assert!((triple.four_by_three - from_h.four_by_three).abs() < 1e-9);
    }
}

#[test]
fn fov_half_angle_of_ninety_is_rejected() {
    let ar = AspectRatio::new(0.5625).unwrap();
    assert!(matches!(
        vertical_from_horizontal(180.0, ar),
        Err(EngineError::OutOfRange(_))
    ));
    assert!(matches!(
        horizontal_from_vertical(180.0, ar),
        Err(EngineError::OutOfRange(_))
    ));
    assert!(matches!(
        horizontal_from_four_by_three(270.0, ar),
        Err(EngineError::OutOfRange(_))
    ));
    assert!(matches!(
        FovTriple::from_edit(FovKind::Vertical, 180.0, ar),
        Err(EngineError::OutOfRange(_))
    ));
}

#[test]
fn non_positive_aspect_is_out_of_range() {
    assert!(matches!(AspectRatio::new(0.0), Err(EngineError::OutOfRange(_))));
    assert!(matches!(AspectRatio::new(-1.0), Err(EngineError::OutOfRange(_))));
}

// ── Yaw calibration ──

/// Judge a test turn the way an honest user would: the game turns
/// `360 * true_yaw / candidate` degrees.
fn truthful(candidate: f64, true_yaw: f64) -> Feedback {
    if candidate > true_yaw {
        Feedback::Under
    } else {
        Feedback::Over
    }
}

fn run_search(true_yaw: f64, sens: f64, measurement_error: f64) {
    let mut cal = YawCalibrator::new();
    cal.start(sens).unwrap();
    let measured_counts = 360.0 / (sens * true_yaw) * measurement_error;
    cal.observe_turn(measured_counts, sens).unwrap();

    let mut previous_width: Option<f64> = None;
    for _ in 0..30 {
        let search = cal.search().unwrap();
        let candidate = search.estimate().unwrap();
        cal.feedback(truthful(candidate, true_yaw)).unwrap().unwrap();

        let search = cal.search().unwrap();
        let lower = search.lower_limit();
        assert!(lower <= true_yaw, "lower limit passed the true yaw");
        if let Some(upper) = search.upper_limit() {
            assert!(lower <= upper);
            assert!(true_yaw <= upper, "upper limit passed the true yaw");
            let width = upper - lower;
            if let Some(prev) = previous_width {
                assert!((width - prev / 2.0).abs() <= 1e-15, "{width} vs {prev}");
            }
            previous_width = Some(width);
        }
    }

    assert_eq!(cal.phase(), CalibrationPhase::Refining);
    let estimate = cal.search().unwrap().estimate().unwrap();
    assert!(
        (estimate - true_yaw).abs() < 1e-4,
        "estimate {estimate} vs true yaw {true_yaw}"
    );
}

#[test]
fn yaw_search_converges_from_low_estimate() {
    for yaw in YAWS {
        run_search(yaw, 1.0, 1.07);
    }
}

#[test]
fn yaw_search_converges_from_high_estimate() {
    for yaw in YAWS {
        run_search(yaw, 2.5, 0.9);
    }
}

#[test]
fn yaw_search_converges_from_far_off_measurement() {
    run_search(0.022, 1.0, 40.0);
    run_search(0.022, 1.0, 0.05);
}

#[test]
fn idle_feedback_is_silent() {
    let mut cal = YawCalibrator::new();
    assert_eq!(cal.feedback(Feedback::Over).unwrap(), None);
    assert_eq!(cal.feedback(Feedback::Under).unwrap(), None);
    assert!(cal.search().is_none());
}

#[test]
fn calibrated_yaw_converts_like_a_stored_game() {
    let mut cal = YawCalibrator::new();
    cal.start(1.0).unwrap();
    cal.observe_turn(360.0 / 0.022, 1.0).unwrap();
    cal.feedback(Feedback::Over).unwrap();
    cal.feedback(Feedback::Under).unwrap();
    let profile = cal.save("Measured").unwrap();

    let sens = convert_sensitivity(800, 30.0, Scale::Cm360, 800, profile.scale).unwrap();
    let back = convert_sensitivity(800, sens, profile.scale, 800, Scale::Cm360).unwrap();
    assert!((back - 30.0).abs() < 1e-9);
}

use line_descent::{
    evaluate, loss::LossFn, loss::SquaredError, step, FitErr, LineParams, PointSet, Regressor,
    StepConfig,
};
use tokio_test::{assert_err, assert_ok};

fn points(pairs: &[(f64, f64)]) -> PointSet {
    pairs.iter().copied().collect()
}

#[test]
fn exact_line_keeps_slope_sign_and_does_not_get_worse() {
    let line = points(&[(-2.0, 7.0), (0.0, 3.0), (1.0, 1.0), (4.0, -5.0)]);
    let on_line = LineParams::new(-2.0, 3.0);

    for lr in [0.001, 0.01, 0.05] {
        let next = assert_ok!(step(&line, on_line, StepConfig::new(lr)));

        assert!(next.slope < 0.0);
        assert!(SquaredError.loss(&line, next) <= SquaredError.loss(&line, on_line));
    }

    let stats = evaluate(&line, on_line);
    assert!((stats.r_squared - 1.0).abs() < 1e-12);
}

#[test]
fn gradient_descent_recovers_y_equals_2x_plus_1() {
    let line = points(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]);
    let regressor = assert_ok!(Regressor::new(StepConfig::new(0.01)));

    let mut params = LineParams::new(0.0, 0.0);
    let mut losses = Vec::with_capacity(200);
    for _ in 0..200 {
        params = assert_ok!(regressor.step(&line, params));
        losses.push(regressor.loss(&line, params));
    }

    assert!(losses.windows(2).all(|w| w[1] <= w[0]));
    assert!((params.slope - 2.0).abs() < 0.05, "slope = {}", params.slope);
    assert!(
        (params.intercept - 1.0).abs() < 0.1,
        "intercept = {}",
        params.intercept
    );

    let stats = evaluate(&line, params);
    assert!(stats.r_squared > 0.99);
}

#[test]
fn noisy_linear_points_do_not_diverge() {
    let noisy = points(&[
        (0.0, 0.1),
        (1.0, 1.05),
        (2.0, 1.98),
        (3.0, 3.02),
        (4.0, 3.95),
    ]);
    let regressor = assert_ok!(Regressor::new(StepConfig::new(0.005)));

    let mut params = LineParams::default();
    let mut prev = regressor.loss(&noisy, params);
    for _ in 0..50 {
        params = assert_ok!(regressor.step(&noisy, params));
        let loss = regressor.loss(&noisy, params);
        assert!(loss <= prev);
        prev = loss;
    }
}

#[test]
fn damping_slows_only_the_damped_parameter() {
    let line = points(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]);
    let start = LineParams::default();

    let plain = assert_ok!(step(&line, start, StepConfig::new(0.01)));
    let damped = assert_ok!(step(
        &line,
        start,
        StepConfig::new(0.01).with_damping(1.0, 0.5)
    ));

    assert_eq!(plain.intercept, damped.intercept);
    assert!((damped.slope - plain.slope / 2.0).abs() < 1e-12);
}

#[test]
fn step_rejects_empty_points_and_bad_rates() {
    let err = assert_err!(step(
        &PointSet::default(),
        LineParams::default(),
        StepConfig::new(0.1)
    ));
    assert!(matches!(err, FitErr::InvalidInput(_)));

    let line = points(&[(0.0, 1.0)]);
    let err = assert_err!(step(&line, LineParams::default(), StepConfig::new(0.0)));
    assert!(matches!(err, FitErr::InvalidConfig { .. }));
}

#[test]
fn perfect_fit_statistics() {
    let stats = evaluate(
        &points(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]),
        LineParams::new(1.0, 0.0),
    );

    assert_eq!(stats.r_squared, 1.0);
    assert_eq!(stats.significance_ratio, f64::INFINITY);
}

#[test]
fn flat_points_evaluate_to_zero_r_squared() {
    let stats = evaluate(
        &points(&[(0.0, 2.0), (5.0, 2.0), (9.0, 2.0)]),
        LineParams::new(0.3, 1.0),
    );

    assert_eq!(stats.r_squared, 0.0);
    assert!(stats.significance_ratio.is_finite());
}

#[test]
fn flat_points_with_an_inexact_mean_still_evaluate_to_zero() {
    let stats = evaluate(
        &points(&[(0.0, 0.1), (1.0, 0.1), (2.0, 0.1)]),
        LineParams::new(0.3, 1.0),
    );

    assert_eq!(stats.r_squared, 0.0);
    assert!((stats.significance_ratio + 1.0).abs() < 1e-9);
}

use apsis::state_vector::StateVector;

/// Assert that two state vectors agree within a relative tolerance, position
/// and velocity compared by vector norm against the expected magnitudes.
pub fn assert_state_close(actual: &StateVector, expected: &StateVector, max_relative: f64) {
    assert_eq!(actual.frame, expected.frame, "frame tags differ");

    let dr = (actual.position - expected.position).norm();
    let dv = (actual.velocity - expected.velocity).norm();

    assert!(
        dr <= max_relative * expected.position.norm(),
        "position differs by {dr} km (expected |r| = {} km)",
        expected.position.norm()
    );
    assert!(
        dv <= max_relative * expected.velocity.norm(),
        "velocity differs by {dv} km/s (expected |v| = {} km/s)",
        expected.velocity.norm()
    );
}

//! Sigmoid activation and its derivative.

/// Sigmoid: 1 / (1 + exp(-x)), clamped into the open interval (0, 1).
///
/// The clamp keeps saturated units away from exactly 0.0 or 1.0, so the
/// cross-entropy logarithms stay finite for any finite input.
pub fn sigmoid(x: f64) -> f64 {
    let s = 1.0 / (1.0 + (-x).exp());
    s.clamp(f64::EPSILON, 1.0 - f64::EPSILON)
}

/// Derivative of the sigmoid expressed in terms of its output: a * (1 - a).
///
/// `a` must be an already-sigmoided value, not the raw weighted sum.
pub fn sigmoid_derivative(a: f64) -> f64 {
    a * (1.0 - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_midpoint() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_is_monotonic() {
        assert!(sigmoid(-1.0) < sigmoid(0.0));
        assert!(sigmoid(0.0) < sigmoid(1.0));
    }

    #[test]
    fn sigmoid_stays_in_open_interval() {
        for x in [-1e6, -800.0, -40.0, 0.0, 40.0, 800.0, 1e6] {
            let s = sigmoid(x);
            assert!(s > 0.0 && s < 1.0, "sigmoid({}) = {}", x, s);
            assert!(s.is_finite());
        }
    }

    #[test]
    fn derivative_matches_closed_form() {
        for x in [-3.0, -0.5, 0.0, 0.5, 3.0] {
            let a = sigmoid(x);
            let h = 1e-6;
            let numeric = (sigmoid(x + h) - sigmoid(x - h)) / (2.0 * h);
            assert!((sigmoid_derivative(a) - numeric).abs() < 1e-6);
        }
    }
}

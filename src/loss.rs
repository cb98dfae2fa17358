//! Cross-entropy cost between predicted and expected one-hot vectors.
use anyhow::{anyhow, Result};

/// Binary cross-entropy applied per output unit and summed:
/// `-e*ln(p) - (1-e)*ln(1-p)` over all units.
///
/// Predictions are clamped into `[eps, 1-eps]` before the logarithms, so a
/// saturated activation yields a large finite cost instead of infinity.
pub fn cross_entropy(pred: &[f64], expected: &[f64]) -> Result<f64> {
    if pred.len() != expected.len() {
        return Err(anyhow!(
            "Prediction/expected size mismatch: {} vs {}",
            pred.len(),
            expected.len()
        ));
    }
    let eps = 1e-12;
    let mut cost = 0.0;
    for (&p, &e) in pred.iter().zip(expected) {
        let p = p.clamp(eps, 1.0 - eps);
        cost += -e * p.ln() - (1.0 - e) * (1.0 - p).ln();
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_prediction_has_near_zero_cost() {
        let cost = cross_entropy(&[1.0 - 1e-12, 1e-12], &[1.0, 0.0]).unwrap();
        assert!(cost < 1e-9);
    }

    #[test]
    fn uniform_prediction_costs_ln2_per_unit() {
        let cost = cross_entropy(&[0.5, 0.5], &[1.0, 0.0]).unwrap();
        assert!((cost - 2.0 * std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn saturated_prediction_stays_finite() {
        let cost = cross_entropy(&[0.0, 1.0], &[1.0, 0.0]).unwrap();
        assert!(cost.is_finite());
        assert!(cost > 10.0);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        assert!(cross_entropy(&[0.5], &[1.0, 0.0]).is_err());
    }
}

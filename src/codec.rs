//! Conversion between scalar class labels and one-hot output vectors.
use anyhow::{anyhow, Result};

/// One-hot encode a class label over `num_classes` output units.
///
/// Fails if `label` is outside `[0, num_classes)`; an out-of-range label
/// aborts the training run that hit it.
pub fn one_hot(label: usize, num_classes: usize) -> Result<Vec<f64>> {
    if label >= num_classes {
        return Err(anyhow!(
            "Label {} out of range for {} classes",
            label,
            num_classes
        ));
    }
    let mut v = vec![0.0; num_classes];
    v[label] = 1.0;
    Ok(v)
}

/// Decode an output-layer activation vector to a class: index of the
/// maximum activation, ties broken by lowest index.
pub fn argmax(outputs: &[f64]) -> usize {
    outputs
        .iter()
        .enumerate()
        .fold(0usize, |max_i, (i, &v)| if v > outputs[max_i] { i } else { max_i })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_labels() {
        for label in 0..7 {
            let v = one_hot(label, 7).unwrap();
            assert_eq!(v.len(), 7);
            assert_eq!(argmax(&v), label);
            assert!((v.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn out_of_range_label_is_an_error() {
        assert!(one_hot(3, 3).is_err());
        assert!(one_hot(10, 3).is_err());
    }

    #[test]
    fn argmax_breaks_ties_by_lowest_index() {
        assert_eq!(argmax(&[0.5, 0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.1, 0.9, 0.9]), 1);
        assert_eq!(argmax(&[0.2, 0.1, 0.8]), 2);
    }
}

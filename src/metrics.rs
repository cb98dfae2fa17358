//! Metrics for evaluating a trained network on labeled data.
use crate::network::NeuralNetwork;
use anyhow::{anyhow, Result};

/// Accuracy: fraction of instances whose predicted class equals the label.
pub fn accuracy(net: &mut NeuralNetwork, inputs: &[Vec<f64>], labels: &[usize]) -> Result<f64> {
    if inputs.len() != labels.len() {
        return Err(anyhow!(
            "Inputs/labels length mismatch: {} vs {}",
            inputs.len(),
            labels.len()
        ));
    }
    if inputs.is_empty() {
        return Err(anyhow!("Cannot evaluate on an empty dataset"));
    }
    let mut correct = 0;
    for (input, &label) in inputs.iter().zip(labels) {
        if net.predict(input)? == label {
            correct += 1;
        }
    }
    Ok(correct as f64 / inputs.len() as f64)
}

/// Confusion matrix indexed `[true_class][predicted_class]`.
pub fn confusion_matrix(
    net: &mut NeuralNetwork,
    inputs: &[Vec<f64>],
    labels: &[usize],
) -> Result<Vec<Vec<usize>>> {
    if inputs.len() != labels.len() {
        return Err(anyhow!(
            "Inputs/labels length mismatch: {} vs {}",
            inputs.len(),
            labels.len()
        ));
    }
    let num_classes = net.n_output();
    let mut cm = vec![vec![0; num_classes]; num_classes];
    for (input, &label) in inputs.iter().zip(labels) {
        if label >= num_classes {
            return Err(anyhow!("Label {} out of range for {} classes", label, num_classes));
        }
        let pred = net.predict(input)?;
        cm[label][pred] += 1;
    }
    Ok(cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_rejects_mismatched_lengths() {
        let mut net = NeuralNetwork::new(2, 2, 2, 1).unwrap();
        assert!(accuracy(&mut net, &[vec![0.0, 0.0]], &[0, 1]).is_err());
        assert!(accuracy(&mut net, &[], &[]).is_err());
    }

    #[test]
    fn confusion_matrix_counts_every_instance() {
        let mut net = NeuralNetwork::new(2, 2, 2, 1).unwrap();
        let inputs = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = vec![0, 1, 1];
        let cm = confusion_matrix(&mut net, &inputs, &labels).unwrap();
        let total: usize = cm.iter().flatten().sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn confusion_matrix_rejects_out_of_range_label() {
        let mut net = NeuralNetwork::new(2, 2, 2, 1).unwrap();
        assert!(confusion_matrix(&mut net, &[vec![0.0, 0.0]], &[5]).is_err());
    }
}

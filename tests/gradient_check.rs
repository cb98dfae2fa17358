//! Finite-difference check of the accumulated gradients.
//!
//! The delta rule `(a - y) * a * (1 - a)` at the output layer is the exact
//! gradient of the quadratic surrogate `0.5 * sum((a - y)^2)`, so that is
//! the function differentiated numerically here (the reported cross-entropy
//! would absorb the sigmoid-derivative factor and not match).
use shallownet::NeuralNetwork;

fn quadratic_cost(net: &mut NeuralNetwork, input: &[f64], expected: &[f64]) -> f64 {
    let output = net.forward(input).unwrap();
    output
        .iter()
        .zip(expected)
        .map(|(&a, &y)| 0.5 * (a - y) * (a - y))
        .sum()
}

#[test]
fn accumulated_gradients_match_finite_differences() {
    let mut net = NeuralNetwork::new(2, 2, 2, 3).unwrap();
    let input = [0.3, 0.7];
    let expected = [1.0, 0.0];
    let h = 1e-5;
    let tolerance = 1e-6;

    net.zero_gradients();
    net.forward(&input).unwrap();
    net.backward(&expected).unwrap();
    let hidden_grad = net.hidden_grad.clone();
    let output_grad = net.output_grad.clone();

    for row in 0..net.hidden_weights.len() {
        for col in 0..net.hidden_weights[row].len() {
            let orig = net.hidden_weights[row][col];
            net.hidden_weights[row][col] = orig + h;
            let plus = quadratic_cost(&mut net, &input, &expected);
            net.hidden_weights[row][col] = orig - h;
            let minus = quadratic_cost(&mut net, &input, &expected);
            net.hidden_weights[row][col] = orig;
            let numeric = (plus - minus) / (2.0 * h);
            assert!(
                (numeric - hidden_grad[row][col]).abs() < tolerance,
                "hidden[{}][{}]: analytic {} vs numeric {}",
                row,
                col,
                hidden_grad[row][col],
                numeric
            );
        }
    }
    for row in 0..net.output_weights.len() {
        for col in 0..net.output_weights[row].len() {
            let orig = net.output_weights[row][col];
            net.output_weights[row][col] = orig + h;
            let plus = quadratic_cost(&mut net, &input, &expected);
            net.output_weights[row][col] = orig - h;
            let minus = quadratic_cost(&mut net, &input, &expected);
            net.output_weights[row][col] = orig;
            let numeric = (plus - minus) / (2.0 * h);
            assert!(
                (numeric - output_grad[row][col]).abs() < tolerance,
                "output[{}][{}]: analytic {} vs numeric {}",
                row,
                col,
                output_grad[row][col],
                numeric
            );
        }
    }
}

#[test]
fn deltas_are_returned_and_cached() {
    let mut net = NeuralNetwork::new(2, 3, 2, 8).unwrap();
    net.zero_gradients();
    net.forward(&[0.1, 0.9]).unwrap();
    let deltas = net.backward(&[0.0, 1.0]).unwrap();
    assert_eq!(deltas.hidden.len(), 3);
    assert_eq!(deltas.output.len(), 2);
    assert_eq!(deltas.hidden, net.hidden_delta);
    assert_eq!(deltas.output, net.output_delta);
}

//! Single-hidden-layer network: state, forward/backward passes, weight
//! updates, prediction, and persistence.
use crate::activations::{sigmoid, sigmoid_derivative};
use crate::codec::argmax;
use crate::metrics::accuracy;
use anyhow::{anyhow, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};

/// Matrix type
pub type Matrix = Vec<Vec<f64>>;

/// Magnitude bound for initial weights.
const INIT_BOUND: f64 = 0.001;

/// Feed-forward network with one hidden layer, trained by backpropagation.
///
/// Each weight matrix carries an extra trailing column holding the bias
/// weight for its unit: `hidden_weights` is `[n_hidden][n_input + 1]` and
/// `output_weights` is `[n_output][n_hidden + 1]`. Layer sizes are fixed at
/// construction and the matrices are never resized.
#[derive(Debug)]
pub struct NeuralNetwork {
    n_input: usize,
    n_hidden: usize,
    n_output: usize,
    /// Input-to-hidden weights, bias in the last column of each row.
    pub hidden_weights: Matrix,
    /// Hidden-to-output weights, bias in the last column of each row.
    pub output_weights: Matrix,
    /// Activations cached by the most recent forward pass.
    pub input_activation: Vec<f64>,
    pub hidden_activation: Vec<f64>,
    pub output_activation: Vec<f64>,
    /// Per-neuron error signals from the most recent backward pass.
    pub hidden_delta: Vec<f64>,
    pub output_delta: Vec<f64>,
    /// Gradient accumulators, shaped like the weight matrices. Zeroed at
    /// batch start, summed per instance, averaged before the update.
    pub hidden_grad: Matrix,
    pub output_grad: Matrix,
}

/// Per-neuron deltas produced by one backward pass.
#[derive(Debug, Clone)]
pub struct Deltas {
    pub hidden: Vec<f64>,
    pub output: Vec<f64>,
}

impl NeuralNetwork {
    /// Create a network with the given layer sizes.
    ///
    /// Weights are drawn uniformly from `[-0.001, 0.001]` using a PRNG owned
    /// by this call and seeded with `seed`, so equal seeds give identical
    /// networks. Fails if any layer size is zero.
    pub fn new(n_input: usize, n_hidden: usize, n_output: usize, seed: u64) -> Result<Self> {
        if n_input == 0 || n_hidden == 0 || n_output == 0 {
            return Err(anyhow!(
                "Layer sizes must be positive, got {}-{}-{}",
                n_input,
                n_hidden,
                n_output
            ));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut random_matrix = |rows: usize, cols: usize| -> Matrix {
            (0..rows)
                .map(|_| (0..cols).map(|_| rng.gen_range(-INIT_BOUND..INIT_BOUND)).collect())
                .collect()
        };
        let hidden_weights = random_matrix(n_hidden, n_input + 1);
        let output_weights = random_matrix(n_output, n_hidden + 1);
        Ok(Self {
            n_input,
            n_hidden,
            n_output,
            hidden_weights,
            output_weights,
            input_activation: vec![0.0; n_input],
            hidden_activation: vec![0.0; n_hidden],
            output_activation: vec![0.0; n_output],
            hidden_delta: vec![0.0; n_hidden],
            output_delta: vec![0.0; n_output],
            hidden_grad: vec![vec![0.0; n_input + 1]; n_hidden],
            output_grad: vec![vec![0.0; n_hidden + 1]; n_output],
        })
    }

    pub fn n_input(&self) -> usize {
        self.n_input
    }

    pub fn n_hidden(&self) -> usize {
        self.n_hidden
    }

    pub fn n_output(&self) -> usize {
        self.n_output
    }

    /// Forward pass: weighted sum plus bias through each layer, sigmoid at
    /// every unit. Returns the output activations and caches all three
    /// activation buffers for the following backward pass.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.n_input {
            return Err(anyhow!(
                "Input size mismatch: expected {}, got {}",
                self.n_input,
                input.len()
            ));
        }
        self.input_activation.copy_from_slice(input);

        for (j, row) in self.hidden_weights.iter().enumerate() {
            let mut z = row[self.n_input]; // bias weight
            for (i, &x) in self.input_activation.iter().enumerate() {
                z += x * row[i];
            }
            self.hidden_activation[j] = sigmoid(z);
        }
        for (k, row) in self.output_weights.iter().enumerate() {
            let mut z = row[self.n_hidden]; // bias weight
            for (j, &h) in self.hidden_activation.iter().enumerate() {
                z += h * row[j];
            }
            self.output_activation[k] = sigmoid(z);
        }
        Ok(self.output_activation.clone())
    }

    /// Backward pass against the expected one-hot vector.
    ///
    /// Computes per-neuron deltas from the activations cached by the
    /// immediately preceding [`forward`](Self::forward) call and adds this
    /// instance's weight gradients into the accumulators. Accumulation is
    /// additive: the training loop zeroes the accumulators at batch start.
    pub fn backward(&mut self, expected: &[f64]) -> Result<Deltas> {
        if expected.len() != self.n_output {
            return Err(anyhow!(
                "Expected-vector size mismatch: expected {}, got {}",
                self.n_output,
                expected.len()
            ));
        }
        // Output layer: delta, then bias and weight accumulators.
        for k in 0..self.n_output {
            let a = self.output_activation[k];
            let delta = (a - expected[k]) * sigmoid_derivative(a);
            self.output_delta[k] = delta;
            self.output_grad[k][self.n_hidden] += delta;
            for j in 0..self.n_hidden {
                self.output_grad[k][j] += delta * self.hidden_activation[j];
            }
        }
        // Hidden layer: back-propagate through the output weights.
        for j in 0..self.n_hidden {
            let mut error = 0.0;
            for k in 0..self.n_output {
                error += self.output_delta[k] * self.output_weights[k][j];
            }
            let delta = error * sigmoid_derivative(self.hidden_activation[j]);
            self.hidden_delta[j] = delta;
            self.hidden_grad[j][self.n_input] += delta;
            for i in 0..self.n_input {
                self.hidden_grad[j][i] += delta * self.input_activation[i];
            }
        }
        Ok(Deltas {
            hidden: self.hidden_delta.clone(),
            output: self.output_delta.clone(),
        })
    }

    /// Reset both gradient accumulators to zero (start of a batch).
    pub fn zero_gradients(&mut self) {
        for row in self.hidden_grad.iter_mut().chain(self.output_grad.iter_mut()) {
            for g in row.iter_mut() {
                *g = 0.0;
            }
        }
    }

    /// Divide both accumulators elementwise by the batch size.
    pub fn average_gradients(&mut self, batch_size: usize) {
        let n = batch_size as f64;
        for row in self.hidden_grad.iter_mut().chain(self.output_grad.iter_mut()) {
            for g in row.iter_mut() {
                *g /= n;
            }
        }
    }

    /// Apply the averaged gradients: `w -= l_rate * grad` for every weight
    /// including the bias columns. Plain gradient descent, no momentum.
    pub fn update_weights(&mut self, l_rate: f64) {
        for (row, grads) in self.hidden_weights.iter_mut().zip(&self.hidden_grad) {
            for (w, &g) in row.iter_mut().zip(grads) {
                *w -= l_rate * g;
            }
        }
        for (row, grads) in self.output_weights.iter_mut().zip(&self.output_grad) {
            for (w, &g) in row.iter_mut().zip(grads) {
                *w -= l_rate * g;
            }
        }
    }

    /// Predict the class of a single input: forward pass plus argmax decode.
    pub fn predict(&mut self, input: &[f64]) -> Result<usize> {
        let output = self.forward(input)?;
        Ok(argmax(&output))
    }

    /// Fraction of instances whose predicted class equals the label.
    pub fn evaluate(&mut self, inputs: &[Vec<f64>], labels: &[usize]) -> Result<f64> {
        accuracy(self, inputs, labels)
    }

    /// Save weights to a gzipped JSON file.
    pub fn save(&self, path: &str) -> Result<()> {
        let dto = NetworkDto::from_network(self);
        let json = serde_json::to_vec(&dto)?;
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut enc = GzEncoder::new(file, Compression::default());
        enc.write_all(&json)?;
        enc.finish()?;
        Ok(())
    }

    /// Load a network from a gzipped JSON file written by [`save`](Self::save).
    pub fn load(path: &str) -> Result<Self> {
        let file = File::open(path)?;
        let mut dec = GzDecoder::new(file);
        let mut buf = Vec::new();
        dec.read_to_end(&mut buf)?;
        let dto: NetworkDto = serde_json::from_slice(&buf)?;
        dto.into_network()
    }
}

impl fmt::Display for NeuralNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NeuralNetwork: [{}, {}, {}]",
            self.n_input, self.n_hidden, self.n_output
        )
    }
}

// ============ Persistence DTOs ============

#[derive(Debug, Serialize, Deserialize)]
struct NetworkDto {
    n_input: usize,
    n_hidden: usize,
    n_output: usize,
    hidden_weights: Matrix, // [n_hidden][n_input + 1]
    output_weights: Matrix, // [n_output][n_hidden + 1]
}

impl NetworkDto {
    fn from_network(net: &NeuralNetwork) -> Self {
        fn sanitize_matrix(m: &Matrix) -> Matrix {
            m.iter()
                .map(|row| row.iter().map(|&x| if x.is_finite() { x } else { 0.0 }).collect())
                .collect()
        }
        Self {
            n_input: net.n_input,
            n_hidden: net.n_hidden,
            n_output: net.n_output,
            hidden_weights: sanitize_matrix(&net.hidden_weights),
            output_weights: sanitize_matrix(&net.output_weights),
        }
    }

    fn into_network(self) -> Result<NeuralNetwork> {
        let hidden_ok = self.hidden_weights.len() == self.n_hidden
            && self.hidden_weights.iter().all(|r| r.len() == self.n_input + 1);
        let output_ok = self.output_weights.len() == self.n_output
            && self.output_weights.iter().all(|r| r.len() == self.n_hidden + 1);
        if !hidden_ok || !output_ok {
            return Err(anyhow!("Stored weight matrices do not match stored layer sizes"));
        }
        let mut net = NeuralNetwork::new(self.n_input, self.n_hidden, self.n_output, 0)?;
        net.hidden_weights = self.hidden_weights;
        net.output_weights = self.output_weights;
        Ok(net)
    }
}

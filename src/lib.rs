//! A from-scratch single-hidden-layer classifier trained by backpropagation:
//! batch, mini-batch, or stochastic gradient descent over one-hot targets.
//!
//! - Two dense weight matrices with bias folded into the last column
//! - Sigmoid activations, summed binary cross-entropy loss
//! - Epoch/batch training loop with pluggable per-epoch loss sinks
//! - Seeded, per-instance weight initialization for reproducible runs
//! - Gzipped-JSON model persistence and a numeric CSV loader

pub mod activations;
pub mod codec;
pub mod datasets;
pub mod loss;
pub mod metrics;
pub mod network;
pub mod train;
pub mod utils;

pub use activations::{sigmoid, sigmoid_derivative};
pub use codec::{argmax, one_hot};
pub use datasets::{and_gate, load_csv, or_gate, xor};
pub use loss::cross_entropy;
pub use metrics::{accuracy, confusion_matrix};
pub use network::{Deltas, Matrix, NeuralNetwork};
pub use train::{train, FileSink, LossReport, LossSink, MemorySink, TrailingPolicy, TrainOptions};
pub use utils::{print_loss_table, print_model_summary};

//! Training loop: epochs over batches over instances, with per-epoch loss
//! records emitted to a caller-supplied sink.
use crate::codec::one_hot;
use crate::loss::cross_entropy;
use crate::network::NeuralNetwork;
use anyhow::{anyhow, Result};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Which loss value is recorded per epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossReport {
    /// Mean loss of the final batch only. This replicates the original
    /// behavior; it is not an epoch-wide average.
    #[default]
    LastBatch,
    /// Mean over all batch losses in the epoch.
    EpochMean,
}

/// What to do when `batch_size` does not evenly divide the instance count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingPolicy {
    /// Treat a non-dividing batch size as a configuration error.
    #[default]
    Reject,
    /// Silently skip the trailing remainder instances each epoch, matching
    /// the original integer-truncating batch count.
    Drop,
}

/// Training hyperparameters.
///
/// Batch size selects the gradient-descent flavor: 1 is stochastic, the
/// full instance count is standard batch descent, anything between is
/// mini-batch.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub loss_report: LossReport,
    pub trailing: TrailingPolicy,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_size: 1,
            learning_rate: 0.1,
            loss_report: LossReport::default(),
            trailing: TrailingPolicy::default(),
        }
    }
}

/// Destination for per-epoch loss records.
pub trait LossSink {
    fn record(&mut self, epoch: usize, loss: f64) -> Result<()>;
}

/// Appends one `<epoch>,<loss>` line per record to a file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<std::fs::File>,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|e| anyhow!("Failed to open loss file {}: {}", path.as_ref().display(), e))?;
        Ok(Self {
            path: path.as_ref().to_owned(),
            writer: BufWriter::new(file),
        })
    }
}

impl LossSink for FileSink {
    fn record(&mut self, epoch: usize, loss: f64) -> Result<()> {
        writeln!(self.writer, "{},{}", epoch, loss)
            .map_err(|e| anyhow!("Failed to log loss to {}: {}", self.path.display(), e))
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Collects loss records in memory; useful for tests and demos.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<(usize, f64)>,
}

impl LossSink for MemorySink {
    fn record(&mut self, epoch: usize, loss: f64) -> Result<()> {
        self.records.push((epoch, loss));
        Ok(())
    }
}

/// Train `net` on `inputs`/`labels` for the configured number of epochs.
///
/// Per epoch, instances are consumed in dataset order, batch by batch: the
/// gradient accumulators are zeroed at each batch start, every instance in
/// the batch runs forward → label encode → cost → backward, then the
/// accumulators are averaged over the batch and the weights updated once.
/// One loss record per epoch goes to `sink`, selected by
/// [`TrainOptions::loss_report`].
pub fn train(
    net: &mut NeuralNetwork,
    inputs: &[Vec<f64>],
    labels: &[usize],
    options: &TrainOptions,
    sink: &mut dyn LossSink,
) -> Result<()> {
    if inputs.len() != labels.len() {
        return Err(anyhow!(
            "Inputs/labels length mismatch: {} vs {}",
            inputs.len(),
            labels.len()
        ));
    }
    if inputs.is_empty() {
        return Err(anyhow!("Dataset is empty"));
    }
    if options.batch_size == 0 || options.batch_size > inputs.len() {
        return Err(anyhow!(
            "Batch size {} invalid for {} instances",
            options.batch_size,
            inputs.len()
        ));
    }
    if !(options.learning_rate.is_finite() && options.learning_rate > 0.0) {
        return Err(anyhow!("Learning rate must be positive and finite"));
    }
    if options.trailing == TrailingPolicy::Reject && inputs.len() % options.batch_size != 0 {
        return Err(anyhow!(
            "Batch size {} does not divide {} instances; trailing instances would be dropped",
            options.batch_size,
            inputs.len()
        ));
    }
    let n_batches = inputs.len() / options.batch_size;

    for epoch in 0..options.epochs {
        let mut instance = 0;
        let mut last_batch_loss = 0.0;
        let mut epoch_loss_sum = 0.0;
        for _ in 0..n_batches {
            net.zero_gradients();
            let mut batch_loss = 0.0;
            for _ in 0..options.batch_size {
                let output = net.forward(&inputs[instance])?;
                let expected = one_hot(labels[instance], net.n_output())?;
                batch_loss += cross_entropy(&output, &expected)?;
                net.backward(&expected)?;
                instance += 1;
            }
            net.average_gradients(options.batch_size);
            net.update_weights(options.learning_rate);
            batch_loss /= options.batch_size as f64;
            last_batch_loss = batch_loss;
            epoch_loss_sum += batch_loss;
        }
        let epoch_loss = match options.loss_report {
            LossReport::LastBatch => last_batch_loss,
            LossReport::EpochMean => epoch_loss_sum / n_batches as f64,
        };
        sink.record(epoch, epoch_loss)?;
    }
    Ok(())
}

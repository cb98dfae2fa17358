//! Dataset loading and small synthetic datasets.
use anyhow::{anyhow, Result};
use csv::ReaderBuilder;
use std::fs::File;

/// Parallel feature vectors and scalar class labels.
pub type Dataset = (Vec<Vec<f64>>, Vec<usize>);

/// Load a numeric CSV: every column but the last is a feature, the last
/// column is a non-negative integer class label.
pub fn load_csv(filename: &str, has_headers: bool) -> Result<Dataset> {
    let file = File::open(filename).map_err(|e| anyhow!("Failed to open {}: {}", filename, e))?;
    let mut rdr = ReaderBuilder::new().has_headers(has_headers).from_reader(file);
    let mut inputs = Vec::new();
    let mut labels = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| anyhow!("CSV parse error: {}", e))?;
        if record.len() < 2 {
            return Err(anyhow!("Record {} has fewer than two columns", line));
        }
        let features: Vec<f64> = record
            .iter()
            .take(record.len() - 1)
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| anyhow!("Bad feature {:?} in record {}: {}", s, line, e))
            })
            .collect::<Result<_>>()?;
        let label_field = &record[record.len() - 1];
        let label: usize = label_field
            .trim()
            .parse()
            .map_err(|e| anyhow!("Bad label {:?} in record {}: {}", label_field, line, e))?;
        inputs.push(features);
        labels.push(label);
    }
    if inputs.is_empty() {
        return Err(anyhow!("No data loaded from {}", filename));
    }
    Ok((inputs, labels))
}

fn gate_inputs() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ]
}

/// Four-instance OR gate, classes 0/1. Linearly separable.
pub fn or_gate() -> Dataset {
    (gate_inputs(), vec![0, 1, 1, 1])
}

/// Four-instance AND gate, classes 0/1. Linearly separable.
pub fn and_gate() -> Dataset {
    (gate_inputs(), vec![0, 0, 0, 1])
}

/// Four-instance XOR, classes 0/1. Not linearly separable.
pub fn xor() -> Dataset {
    (gate_inputs(), vec![0, 1, 1, 0])
}

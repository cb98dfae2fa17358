//! Printing helpers for summaries of models and training runs.
use crate::network::NeuralNetwork;

/// Print model summary
pub fn print_model_summary(net: &NeuralNetwork) {
    println!("Model Summary:\n{}", net);
}

/// Print a simple table of per-epoch losses
pub fn print_loss_table(records: &[(usize, f64)], title: &str) {
    println!("\n{} Summary Table:", title);
    println!("+----------------+----------+");
    println!("| Epochs         | Avg Loss |");
    println!("+----------------+----------+");
    if !records.is_empty() {
        let avg = records.iter().map(|&(_, l)| l).sum::<f64>() / records.len() as f64;
        println!("| {:>14} | {:>8.6} |", records.len(), avg);
    }
    println!("+----------------+----------+");
}

// demos/src/main.rs
use anyhow::Result;
use shallownet::{
    or_gate, print_loss_table, print_model_summary, train, MemorySink, NeuralNetwork,
    TrainOptions,
};

fn main() -> Result<()> {
    println!("=== OR Gate ===");
    let (inputs, labels) = or_gate();
    let mut net = NeuralNetwork::new(2, 3, 2, 42)?;
    print_model_summary(&net);

    let options = TrainOptions {
        epochs: 5000,
        batch_size: 4,
        learning_rate: 0.5,
        ..TrainOptions::default()
    };
    let mut sink = MemorySink::default();
    train(&mut net, &inputs, &labels, &options, &mut sink)?;
    print_loss_table(&sink.records, "Training Loss");

    let acc = net.evaluate(&inputs, &labels)?;
    println!("OR Accuracy: {:.2}%", acc * 100.0);
    for (input, &label) in inputs.iter().zip(&labels) {
        let pred = net.predict(input)?;
        println!("  {:?} -> predicted {} (expected {})", input, pred, label);
    }

    // Demo: save and load model
    net.save("models/or_gate.json.gz")?;
    let mut reloaded = NeuralNetwork::load("models/or_gate.json.gz")?;
    let acc_loaded = reloaded.evaluate(&inputs, &labels)?;
    println!("OR Accuracy (reloaded): {:.2}%", acc_loaded * 100.0);

    Ok(())
}

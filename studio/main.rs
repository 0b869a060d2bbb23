/// ferrite-digits Studio
///
/// Terminal front end for the digit classifier:
///   1. loads the MNIST training set (IDX files under `data/`)
///   2. loads the saved model snapshot, or trains a fresh model and saves it
///   3. runs the menu loop: browse training samples, classify a PGM file, or
///      draw a digit in the browser canvas
///
/// Run with:
///   cargo run --bin studio --release
/// Set `RUST_LOG=debug` for request-level logging.

mod canvas;
mod handlers;
mod render;
mod routes;
mod util;

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::sync::mpsc;
use std::thread;

use log::{error, info, warn};

use ferrite_digits::data::{load_grayscale_28, load_idx_pair};
use ferrite_digits::{
    predict, train_loop, Dataset, EpochStats, Error, Model, TrainConfig, INPUT_SIZE, OUTPUT_SIZE,
};

use render::{ascii_image, prediction_report, GREEN, RED, RESET};

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

const TRAIN_IMAGES: &str = "data/train-images-idx3-ubyte";
const TRAIN_LABELS: &str = "data/train-labels-idx1-ubyte";
const MODEL_PATH: &str = "data/mnist_mlp_best.bin";
const HISTORY_PATH: &str = "data/mnist_mlp_history.json";
const PGM_PATH: &str = "data/MNIST_TEST.pgm";
const CANVAS_ADDR: &str = "127.0.0.1:7878";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> ferrite_digits::Result<()> {
    let dataset = load_idx_pair(TRAIN_IMAGES, TRAIN_LABELS, OUTPUT_SIZE).map_err(|e| {
        error!("MNIST missing or unreadable ({} / {})", TRAIN_IMAGES, TRAIN_LABELS);
        e
    })?;
    if dataset.sample_len() != INPUT_SIZE {
        return Err(Error::ShapeMismatch {
            expected: INPUT_SIZE,
            got: dataset.sample_len(),
        });
    }
    info!("loaded {} training samples", dataset.len());

    let model = load_or_train(&dataset)?;
    menu_loop(&model, &dataset)
}

// ---------------------------------------------------------------------------
// Model lifecycle
// ---------------------------------------------------------------------------

fn load_or_train(dataset: &Dataset) -> ferrite_digits::Result<Model> {
    match Model::load_optional(MODEL_PATH) {
        Ok(Some(model)) => {
            println!("{}MLP model loaded!{}", GREEN, RESET);
            return Ok(model);
        }
        Ok(None) => println!("No existing model found, starting training..."),
        Err(e) => warn!("ignoring snapshot {}: {}; retraining", MODEL_PATH, e),
    }

    let mut model = Model::new();
    let (tx, rx) = mpsc::channel::<EpochStats>();
    let config = TrainConfig {
        progress_tx: Some(tx),
        ..TrainConfig::default()
    };

    let (result, history) = thread::scope(|s| {
        let printer = s.spawn(move || {
            let mut history = Vec::new();
            for stats in rx {
                println!(
                    "Epoch {:>3}/{} : Precision {:.2}%  loss {:.4}  lr {:.5}  ({} ms)",
                    stats.epoch,
                    stats.total_epochs,
                    stats.train_accuracy * 100.0,
                    stats.train_loss,
                    stats.learning_rate,
                    stats.elapsed_ms
                );
                history.push(stats);
            }
            history
        });

        let result = train_loop(&mut model, dataset, &config);
        // Dropping the config closes the channel so the printer finishes.
        drop(config);
        let history = printer.join().unwrap_or_else(|_| {
            warn!("progress printer panicked; history not recorded");
            Vec::new()
        });
        (result, history)
    });
    let final_loss = result?;
    info!("training finished, final loss {:.4}", final_loss);

    model.save(MODEL_PATH)?;
    info!("model saved to {}", MODEL_PATH);
    if let Err(e) = save_history(&history) {
        warn!("could not write {}: {}", HISTORY_PATH, e);
    }
    Ok(model)
}

fn save_history(history: &[EpochStats]) -> io::Result<()> {
    let writer = BufWriter::new(File::create(HISTORY_PATH)?);
    serde_json::to_writer_pretty(writer, history)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Menu loop
// ---------------------------------------------------------------------------

fn menu_loop(model: &Model, dataset: &Dataset) -> ferrite_digits::Result<()> {
    let stdin = io::stdin();
    let last_index = dataset.len().saturating_sub(1);

    loop {
        print!("\n[0-{}]=MNIST | -3=Draw | -2=PGM | -1=Quit : ", last_index);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let Ok(choice) = line.trim().parse::<i64>() else {
            break;
        };

        match choice {
            -1 => break,
            -2 => classify_pgm(model),
            -3 => draw_and_classify(model),
            idx if idx >= 0 => browse(model, dataset, idx as usize),
            _ => continue,
        }
    }
    Ok(())
}

fn browse(model: &Model, dataset: &Dataset, idx: usize) {
    let (Some(pixels), Some(label)) = (dataset.image(idx), dataset.label(idx)) else {
        return;
    };

    println!("\nImage :");
    print!("{}", ascii_image(pixels));

    match predict(model, pixels) {
        Ok(prediction) => {
            print!("{}", render::confidence_graph(&prediction.probabilities));
            if prediction.class == label as usize {
                println!("\n{}SUCCESS (Real: {}){}", GREEN, label, RESET);
            } else {
                println!("\n{}FAILURE (Real: {}){}", RED, label, RESET);
            }
        }
        Err(e) => error!("sample {}: {}", idx, e),
    }
}

fn classify_pgm(model: &Model) {
    let pixels = match load_grayscale_28(PGM_PATH) {
        Ok(pixels) => pixels,
        Err(e) => {
            error!("cannot use {}: {}", PGM_PATH, e);
            return;
        }
    };

    println!("\nImage loaded ({}) :", PGM_PATH);
    print!("{}", ascii_image(&pixels));
    match predict(model, &pixels) {
        Ok(prediction) => print!("{}", prediction_report(&prediction, "FINAL RESULT")),
        Err(e) => error!("{}: {}", PGM_PATH, e),
    }
}

fn draw_and_classify(model: &Model) {
    println!("\n--- DRAW MODE ---");
    println!("Open http://{} in a browser", CANVAS_ADDR);
    println!("Left click = draw | Right click = erase | + / - = brush size");
    println!("C = clear | ENTER = predict | ESC = cancel\n");

    match handlers::draw::serve_until_commit(CANVAS_ADDR, model) {
        Ok(Some(outcome)) => {
            print!("{}", ascii_image(&outcome.pixels));
            print!("{}", prediction_report(&outcome.prediction, "DRAW RESULT"));
        }
        Ok(None) => println!("Drawing cancelled."),
        Err(e) => error!("canvas server: {}", e),
    }
}

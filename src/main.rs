// Small smoke run: evaluates both softmax kernels on one random minibatch
// and reports how far apart they land. All logic lives in the library.
use std::process::ExitCode;
use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{error, info};

use softmax_loss::{logging, LossError, LossKernel, Matrix, SoftmaxConfig};

const SAMPLES: usize = 500;
const FEATURES: usize = 128;
const CLASSES: usize = 10;
const REG: f64 = 5e-6;
const SEED: u64 = 231;

fn run() -> Result<(), LossError> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let w = Matrix::randn(FEATURES, CLASSES, 1e-4, &mut rng);
    let x = Matrix::randn(SAMPLES, FEATURES, 1.0, &mut rng);
    let y: Vec<usize> = (0..SAMPLES).map(|_| rng.gen_range(0..CLASSES)).collect();

    let mut results = Vec::new();
    for kernel in [LossKernel::Naive, LossKernel::Vectorized] {
        let config = SoftmaxConfig::new(REG, kernel);
        let t_start = Instant::now();
        let (loss, grad) = config.evaluate(&w, &x, &y)?;
        let elapsed_ms = t_start.elapsed().as_secs_f64() * 1e3;
        info!(?kernel, loss, elapsed_ms, "evaluated");
        results.push((loss, grad));
    }

    let (naive_loss, naive_grad) = &results[0];
    let (vec_loss, vec_grad) = &results[1];
    info!(
        loss_difference = (naive_loss - vec_loss).abs(),
        gradient_difference = naive_grad.max_abs_diff(vec_grad),
        // Near-uniform initial scores should give a loss close to ln(C).
        expected_loss = (CLASSES as f64).ln(),
        "kernel comparison"
    );
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init() {
        eprintln!("{err}");
    }
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "softmax loss evaluation failed");
            ExitCode::FAILURE
        }
    }
}

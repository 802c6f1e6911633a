//! Training orchestration.
//!
//! One linear pipeline: generate data, build loaders, train for a fixed
//! number of epochs, record per-epoch train/test loss. There is no stopping
//! criterion beyond the epoch count and no NaN recovery; a non-finite loss
//! simply propagates into the history.

use crate::data::{generate_mixture_of_gaussians, BatchLoader};
use crate::diff::{flow_backward, FlowGrads};
use crate::flow::Flow1d;
use crate::optim::adam::AdamF64;
use crate::optim::loss::{nll_loss, nll_loss_and_grad};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hyperparameters for one experiment. Defaults are the baseline run:
/// 50 epochs, lr 5e-3, 5 components, batch size 128,
/// 10000 train / 1000 test samples.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub lr: f64,
    pub n_components: usize,
    pub batch_size: usize,
    pub n_train: usize,
    pub n_test: usize,
    /// `None` draws from entropy; `Some` makes the whole run reproducible.
    pub seed: Option<u64>,
    /// Log every N epochs to stderr; 0 silences progress output.
    pub log_interval: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 50,
            lr: 5e-3,
            n_components: 5,
            batch_size: 128,
            n_train: 10_000,
            n_test: 1_000,
            seed: None,
            log_interval: 10,
        }
    }
}

/// Trained flow plus the per-epoch loss history, in epoch order.
pub struct TrainOutputs {
    pub flow: Flow1d,
    pub train_losses: Vec<f64>,
    pub test_losses: Vec<f64>,
}

/// Adam state for the three flow parameter vectors.
pub struct FlowOptimizer {
    mu: AdamF64,
    sigma: AdamF64,
    weight: AdamF64,
}

impl FlowOptimizer {
    pub fn new(lr: f64) -> Self {
        Self {
            mu: AdamF64::new(lr, 0.9, 0.999, 1e-8),
            sigma: AdamF64::new(lr, 0.9, 0.999, 1e-8),
            weight: AdamF64::new(lr, 0.9, 0.999, 1e-8),
        }
    }

    pub fn step(&mut self, flow: &mut Flow1d, grads: &FlowGrads) {
        self.mu.step(&mut flow.mu, &grads.mu);
        self.sigma.step(&mut flow.sigma, &grads.sigma);
        self.weight.step(&mut flow.weight, &grads.weight);
    }
}

/// One full shuffled pass over the training loader, updating the flow in
/// place after every batch.
pub fn train_one_epoch<R: Rng>(
    flow: &mut Flow1d,
    loader: &BatchLoader,
    opt: &mut FlowOptimizer,
    rng: &mut R,
) {
    for batch in loader.shuffled_epoch(rng) {
        let (z, dz_by_dx) = flow.forward(&batch);
        let (_loss, d_z, d_dzdx) = nll_loss_and_grad(&z, &dz_by_dx);
        let grads = flow_backward(flow, &batch, &d_z, &d_dzdx);
        opt.step(flow, &grads);
    }
}

/// Mean loss over a loader, weighted by batch length.
///
/// The final batch of an epoch may be short, so per-batch losses are scaled
/// by their batch size and the sum is divided by the total sample count.
/// This equals evaluating the whole set as one batch, up to float rounding.
pub fn eval_loss(flow: &Flow1d, loader: &BatchLoader) -> f64 {
    let mut total = 0.0;
    for batch in loader.batches() {
        let (z, dz_by_dx) = flow.forward(batch);
        total += nll_loss(&z, &dz_by_dx) * batch.len() as f64;
    }
    total / loader.len() as f64
}

/// Run the full experiment described by `cfg`: generate the mixture data,
/// train for the configured number of epochs, and evaluate train and test
/// loss after each epoch.
pub fn run_experiment(cfg: &TrainConfig) -> anyhow::Result<TrainOutputs> {
    if cfg.n_components == 0 {
        return Err(anyhow::anyhow!("n_components must be positive"));
    }

    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let train_data = generate_mixture_of_gaussians(cfg.n_train, &mut rng);
    let test_data = generate_mixture_of_gaussians(cfg.n_test, &mut rng);
    if train_data.is_empty() || test_data.is_empty() {
        return Err(anyhow::anyhow!(
            "dataset sizes too small: n_train={} n_test={} (need at least 5 each)",
            cfg.n_train,
            cfg.n_test
        ));
    }

    let train_loader = BatchLoader::new(train_data, cfg.batch_size)?;
    let test_loader = BatchLoader::new(test_data, cfg.batch_size)?;

    let mut flow = Flow1d::new(cfg.n_components, &mut rng);
    let mut opt = FlowOptimizer::new(cfg.lr);

    let mut train_losses = Vec::with_capacity(cfg.epochs);
    let mut test_losses = Vec::with_capacity(cfg.epochs);

    for epoch in 0..cfg.epochs {
        train_one_epoch(&mut flow, &train_loader, &mut opt, &mut rng);
        let train_loss = eval_loss(&flow, &train_loader);
        let test_loss = eval_loss(&flow, &test_loader);
        train_losses.push(train_loss);
        test_losses.push(test_loss);

        if cfg.log_interval > 0 && (epoch % cfg.log_interval == 0 || epoch + 1 == cfg.epochs) {
            eprintln!("epoch {epoch:3}  train={train_loss:.6}  test={test_loss:.6}");
        }
    }

    Ok(TrainOutputs {
        flow,
        train_losses,
        test_losses,
    })
}

//! flow1d-train: fit the mixture-CDF flow to the synthetic mixture
//!
//! Usage:
//!   flow1d-train [--epochs 50] [--lr 5e-3] [--components 5]
//!                [--batch-size 128] [--n-train 10000] [--n-test 1000]
//!                [--seed 0] [--out runs/my_run]
//!
//! Writes losses.csv, transform.csv and run_metadata.txt into a timestamped
//! run directory (or --out).

use anyhow::{anyhow, Context};
use flow1d_rs::{report, run_experiment, TrainConfig};
use std::path::PathBuf;
use std::str::FromStr;

/// Create a timestamped run directory under `runs/`.
fn create_run_directory() -> std::io::Result<PathBuf> {
    use time::OffsetDateTime;

    // UTC to avoid platform-specific timezone handling.
    let now = OffsetDateTime::now_utc();
    let dir_name = format!(
        "runs/{:04}{:02}{:02}_{:02}{:02}",
        now.year(),
        now.month() as u8,
        now.day(),
        now.hour(),
        now.minute()
    );

    let mut path = PathBuf::from(&dir_name);

    // Handle collisions
    let mut counter = 1;
    while path.exists() {
        path = PathBuf::from(format!("{}.{}", dir_name, counter));
        counter += 1;
    }

    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// Save run metadata to a text file.
fn save_run_metadata(
    out_dir: &std::path::Path,
    args: &[String],
    cfg: &TrainConfig,
) -> std::io::Result<()> {
    use std::io::Write;
    use std::time::SystemTime;

    let metadata_path = out_dir.join("run_metadata.txt");
    let mut file = std::fs::File::create(metadata_path)?;

    writeln!(file, "=== Training Run Metadata ===")?;
    writeln!(file)?;
    writeln!(file, "Command:")?;
    let binary_name = std::env::current_exe()
        .ok()
        .and_then(|p| p.file_name().map(|s| s.to_string_lossy().to_string()))
        .unwrap_or_else(|| "flow1d-train".to_string());
    writeln!(file, "{} {}", binary_name, args[1..].join(" "))?;
    writeln!(file)?;

    writeln!(file, "Started: {:?}", SystemTime::now())?;
    writeln!(file)?;

    match cfg.seed {
        Some(seed) => writeln!(file, "Seed: {}", seed)?,
        None => writeln!(file, "Seed: (entropy)")?,
    }
    writeln!(
        file,
        "Config: epochs={} lr={} components={} batch_size={} n_train={} n_test={}",
        cfg.epochs, cfg.lr, cfg.n_components, cfg.batch_size, cfg.n_train, cfg.n_test
    )?;
    writeln!(file)?;

    writeln!(file, "System:")?;
    writeln!(file, "  Platform: {}", std::env::consts::OS)?;
    writeln!(file, "  Architecture: {}", std::env::consts::ARCH)?;
    writeln!(file, "  Package version: {}", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}

fn parse_flag<T: FromStr>(value: Option<String>, flag: &str) -> anyhow::Result<T> {
    let v = value.ok_or_else(|| anyhow!("missing value for {flag}"))?;
    v.parse()
        .map_err(|_| anyhow!("invalid value for {flag}: {v}"))
}

fn print_usage() {
    println!("flow1d-train: fit a 1D mixture-CDF normalizing flow");
    println!();
    println!("Options:");
    println!("  --epochs N       training epochs (default 50)");
    println!("  --lr X           Adam learning rate (default 5e-3)");
    println!("  --components N   mixture components in the flow (default 5)");
    println!("  --batch-size N   batch size (default 128)");
    println!("  --n-train N      training samples (default 10000)");
    println!("  --n-test N       test samples (default 1000)");
    println!("  --seed N         RNG seed (default: entropy)");
    println!("  --out DIR        output directory (default: runs/<timestamp>)");
    println!("  --help           show this help");
}

fn run() -> anyhow::Result<()> {
    println!("flow1d-train v{}", flow1d_rs::VERSION);

    let argv: Vec<String> = std::env::args().collect();
    let mut cfg = TrainConfig::default();
    let mut out_dir: Option<PathBuf> = None;

    // Minimal CLI parsing (no external deps).
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--epochs" => cfg.epochs = parse_flag(args.next(), "--epochs")?,
            "--lr" => cfg.lr = parse_flag(args.next(), "--lr")?,
            "--components" => cfg.n_components = parse_flag(args.next(), "--components")?,
            "--batch-size" => cfg.batch_size = parse_flag(args.next(), "--batch-size")?,
            "--n-train" => cfg.n_train = parse_flag(args.next(), "--n-train")?,
            "--n-test" => cfg.n_test = parse_flag(args.next(), "--n-test")?,
            "--seed" => cfg.seed = Some(parse_flag(args.next(), "--seed")?),
            "--out" => out_dir = Some(parse_flag(args.next(), "--out")?),
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => return Err(anyhow!("unknown flag: {other} (try --help)")),
        }
    }

    let out = match out_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
            dir
        }
        None => create_run_directory().context("creating run directory")?,
    };

    save_run_metadata(&out, &argv, &cfg).context("writing run metadata")?;

    let outputs = run_experiment(&cfg)?;

    report::write_loss_history(&out.join("losses.csv"), &outputs.train_losses, &outputs.test_losses)
        .context("writing loss history")?;
    // Sample the learned curves where the mixture has its mass.
    report::write_transform_curve(&out.join("transform.csv"), &outputs.flow, -3.0, 3.0, 1000)
        .context("writing transform curve")?;

    if let (Some(train), Some(test)) = (outputs.train_losses.last(), outputs.test_losses.last()) {
        println!("final: train={train:.6} test={test:.6}");
    }
    println!("artifacts written to {}", out.display());

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

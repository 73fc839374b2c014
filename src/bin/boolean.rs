//! binfhe-demo: Boolean gate walkthrough for the binfhe engine
//!
//! Generates keys for a chosen parameter set, evaluates every binary gate
//! over its full truth table against the clear values, times the
//! bootstrapped gate, and demonstrates sign extraction on a Z_p plaintext.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use binfhe::{BinFheContext, BinGate, BootstrapMethod, GaussianSampler, OutputMode, ParamSet};

const ALL_GATES: [BinGate; 6] = [
    BinGate::And,
    BinGate::Or,
    BinGate::Nand,
    BinGate::Nor,
    BinGate::Xor,
    BinGate::Xnor,
];

const INPUT_PAIRS: [(bool, bool); 4] =
    [(false, false), (false, true), (true, false), (true, true)];

#[derive(Parser)]
#[command(name = "binfhe-demo")]
#[command(about = "Boolean FHE gate walkthrough")]
#[command(version)]
struct Args {
    /// Parameter set: toy, medium, std128, std128-opt, std128-ap,
    /// std128-ap-opt, std128q, std128q-opt, std192, std192-opt, std192q,
    /// std192q-opt, std256, std256-opt, std256q, std256q-opt,
    /// signed-mod-test
    #[arg(long, default_value = "std128")]
    param_set: String,

    /// Blind rotation method (ginx or ap)
    #[arg(long, default_value = "ginx")]
    method: String,

    /// Random seed for deterministic key generation (optional)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the evaluation key to this file (bincode)
    #[arg(long)]
    key_out: Option<PathBuf>,
}

fn parse_param_set(name: &str) -> Result<ParamSet> {
    Ok(match name {
        "toy" => ParamSet::Toy,
        "medium" => ParamSet::Medium,
        "std128-ap" => ParamSet::Std128Ap,
        "std128-ap-opt" => ParamSet::Std128ApOpt,
        "std128" => ParamSet::Std128,
        "std128-opt" => ParamSet::Std128Opt,
        "std192" => ParamSet::Std192,
        "std192-opt" => ParamSet::Std192Opt,
        "std256" => ParamSet::Std256,
        "std256-opt" => ParamSet::Std256Opt,
        "std128q" => ParamSet::Std128Q,
        "std128q-opt" => ParamSet::Std128QOpt,
        "std192q" => ParamSet::Std192Q,
        "std192q-opt" => ParamSet::Std192QOpt,
        "std256q" => ParamSet::Std256Q,
        "std256q-opt" => ParamSet::Std256QOpt,
        "signed-mod-test" => ParamSet::SignedModTest,
        _ => return Err(eyre::eyre!("Unknown parameter set: {}", name)),
    })
}

fn parse_method(name: &str) -> Result<BootstrapMethod> {
    match name {
        "ginx" => Ok(BootstrapMethod::Ginx),
        "ap" => Ok(BootstrapMethod::Ap),
        _ => Err(eyre::eyre!("Unknown method: {}. Must be ginx or ap", name)),
    }
}

fn gate_in_clear(gate: BinGate, b1: bool, b2: bool) -> bool {
    match gate {
        BinGate::And => b1 && b2,
        BinGate::Or => b1 || b2,
        BinGate::Nand => !(b1 && b2),
        BinGate::Nor => !(b1 || b2),
        BinGate::Xor => b1 ^ b2,
        BinGate::Xnor => !(b1 ^ b2),
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let set = parse_param_set(&args.param_set)?;
    let method = parse_method(&args.method)?;
    let mut ctx = BinFheContext::with_param_set(set, method)?;
    let params = ctx.params().clone();

    info!("binfhe gate walkthrough");
    info!(
        "Parameter set: {} ({:?}), n = {}, N = {}, q = {}, Q = {}",
        args.param_set, params.method, params.n, params.ring_dim, params.q, params.big_q
    );

    let seed = args.seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos() as u64
    });
    let mut sampler = GaussianSampler::with_seed(params.sigma, seed);

    info!("Generating secret key...");
    let sk = ctx.key_gen(&mut sampler);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Generating evaluation key...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let keygen_start = Instant::now();
    ctx.bt_key_gen(&sk, &mut sampler);
    let keygen_time = keygen_start.elapsed();
    pb.finish_with_message("Evaluation key ready");
    info!("Evaluation key time: {:.2?}", keygen_time);

    info!("Evaluating all gates over their truth tables...");
    let total = (ALL_GATES.len() * INPUT_PAIRS.len()) as u64;
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let mut correct = 0usize;
    let mut gate_time = Duration::ZERO;
    for gate in ALL_GATES {
        for (b1, b2) in INPUT_PAIRS {
            let ct1 = ctx.encrypt(&sk, b1, OutputMode::Fresh, &mut sampler)?;
            let ct2 = ctx.encrypt(&sk, b2, OutputMode::Fresh, &mut sampler)?;

            let start = Instant::now();
            let out = ctx.eval_bin_gate(gate, &ct1, &ct2)?;
            gate_time += start.elapsed();

            let got = ctx.decrypt(&sk, &out);
            let want = gate_in_clear(gate, b1, b2);
            if got == want {
                correct += 1;
            } else {
                warn!("{}({}, {}) decrypted to {}", gate, b1, b2, got);
            }
            pb.inc(1);
        }
    }
    pb.finish_with_message("Done");
    let avg_gate = gate_time / total as u32;
    info!("Gates correct: {}/{}", correct, total);
    info!("Average gate latency: {:.2?}", avg_gate);

    // NOT is a key-free phase negation
    let ct = ctx.encrypt(&sk, true, OutputMode::Fresh, &mut sampler)?;
    let negated = ctx.eval_not(&ct);
    info!("NOT(true) = {}", ctx.decrypt(&sk, &negated));

    info!("Sign extraction over Z_8 (MSB of the plaintext)...");
    for m in [2u64, 5] {
        let ct = ctx.encrypt_mod(&sk, m, 8, &mut sampler)?;
        let msb = ctx.eval_sign(&ct, 8)?;
        info!("msb({}) = {}", m, ctx.decrypt(&sk, &msb));
    }

    let mut key_size = None;
    if let (Some(path), Some(ek)) = (&args.key_out, ctx.eval_key()) {
        let file = File::create(path)
            .with_context(|| format!("Failed to create key file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, ek)
            .with_context(|| "Failed to serialize evaluation key")?;
        writer.flush()?;

        let size = fs::metadata(path)?.len();
        info!(
            "Evaluation key saved to {}: {:.2} MB",
            path.display(),
            size as f64 / (1024.0 * 1024.0)
        );
        key_size = Some(size);
    }

    println!();
    println!("=== Walkthrough Complete ===");
    println!("Parameter set: {} ({:?})", args.param_set, params.method);
    println!("Gates correct: {}/{}", correct, total);
    println!("Evaluation key time: {:.2?}", keygen_time);
    println!("Average gate latency: {:.2?}", avg_gate);
    if let Some(size) = key_size {
        println!(
            "Evaluation key size: {:.2} MB",
            size as f64 / (1024.0 * 1024.0)
        );
    }

    Ok(())
}

//! VECSET CLI
//!
//! Smoke test exercising vectors and vector sets.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use vecset::{Norm, Set, SetConfig, SharedLogger, StreamLogger, TracingLogger, Vector};

/// VECSET CLI - Vector and Set Smoke Test
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Write diagnostic records to this file instead of stdout
    #[arg(short, long)]
    log_file: Option<PathBuf>,

    /// Append to the log file instead of truncating it
    #[arg(long, default_value_t = false)]
    append: bool,

    /// Norm used for set comparisons (l1, l2, chebyshev)
    #[arg(short, long, default_value = "l2")]
    norm: Norm,

    /// Tolerance used for set comparisons
    #[arg(short, long, default_value_t = 1e-3)]
    tolerance: f64,

    /// Prefix diagnostic records with timestamps
    #[arg(long, default_value_t = false)]
    timestamps: bool,

    /// Route diagnostic records through tracing instead of a stream
    #[arg(long, default_value_t = false, conflicts_with = "log_file")]
    tracing: bool,
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vecset=info".parse()?))
        .init();

    let args = Args::parse();

    let logger: SharedLogger = if args.tracing {
        Arc::new(TracingLogger)
    } else {
        let sink = match &args.log_file {
            Some(path) => StreamLogger::open(path, !args.append),
            None => StreamLogger::stdout(),
        };
        Arc::new(sink.with_timestamps(args.timestamps))
    };

    info!(norm = %args.norm, tolerance = args.tolerance, "Starting smoke test");

    vector_scenario(&logger)?;
    set_scenario(&logger, args.norm, args.tolerance)?;

    println!("\nTest is finished");
    Ok(())
}

fn vector_scenario(logger: &SharedLogger) -> anyhow::Result<()> {
    let mut vec1 = Vector::new_with_logger(&[1.0, 2.0, 3.0], logger.clone())?;
    let mut vec2 = Vector::new_with_logger(&[-1.0, -2.0, -3.0], logger.clone())?;

    println!("vec1: {}", vec1);
    println!("vec2: {}", vec2);

    println!("\nvec1 - vec2 = {}", Vector::subtract(&vec1, &vec2)?);
    println!("(vec1, vec2) = {}", Vector::dot(&vec1, &vec2));
    println!("\n||vec1||_1 = {}", vec1.norm(Norm::L1));
    println!("||vec2||_inf = {}", vec2.norm(Norm::Chebyshev));

    println!("\nSetting coord 1 in vec2 to 16");
    vec2.set(1, 16.0)?;
    println!("Setting coord 5 in vec1 to 0");
    if let Err(e) = vec1.set(5, 0.0) {
        println!("Rejected: {}", e);
    }

    println!("vec1: {}", vec1);
    println!("vec2: {}", vec2);

    println!("\nvec1 memory allocated: {} bytes", vec1.size_allocated());
    println!("Copying vec2 to vec1");
    Vector::copy_instance(&mut vec1, &vec2)?;
    println!("vec1: {}", vec1);
    println!("vec2: {}", vec2);

    let data = [f64::INFINITY, 2.0, 3.0];
    println!(
        "\nTrying to construct a vector using array {{ {}, {}, {} }}",
        data[0], data[1], data[2]
    );
    match Vector::new_with_logger(&data, logger.clone()) {
        Ok(v) => println!("Vector::new() returned {}", v),
        Err(e) => println!("Vector::new() failed: {}", e),
    }

    Ok(())
}

fn set_scenario(logger: &SharedLogger, norm: Norm, tolerance: f64) -> anyhow::Result<()> {
    let mut set = Set::with_config(SetConfig::default(), logger.clone());

    println!("\nInserting {{1, 2, 3}}, {{1, 2, 3.0000001}} and {{5, 5, 5}} ({}, tol {})", norm, tolerance);
    for values in [[1.0, 2.0, 3.0], [1.0, 2.0, 3.0000001], [5.0, 5.0, 5.0]] {
        let v = Vector::new_with_logger(&values, logger.clone())?;
        set.insert(&v, norm, tolerance)?;
        println!("  size after inserting {}: {}", v, set.len());
    }

    let pattern = Vector::new_with_logger(&[5.0, 5.0, 5.0001], logger.clone())?;
    match set.find_first(&pattern, norm, tolerance) {
        Ok(found) => println!("findFirst({}) = {}", pattern, found),
        Err(e) => println!("findFirst({}) failed: {}", pattern, e),
    }

    let mut other = Set::with_config(SetConfig::default(), logger.clone());
    for values in [[5.0, 5.0, 5.0], [7.0, 8.0, 9.0]] {
        other.insert(&Vector::new(&values)?, norm, tolerance)?;
    }
    println!("\nset:   {}", render(&set));
    println!("other: {}", render(&other));
    println!("union:        {}", render(&Set::union(&set, &other, norm, tolerance)?));
    println!("intersection: {}", render(&Set::intersection(&set, &other, norm, tolerance)?));
    println!("difference:   {}", render(&Set::difference(&set, &other, norm, tolerance)?));
    println!(
        "symmetric:    {}",
        render(&Set::symmetric_difference(&set, &other, norm, tolerance)?)
    );
    println!("set == other: {}", Set::equals(&set, &other, norm, tolerance));

    match set.remove_first(&pattern, norm, tolerance) {
        Ok(()) => println!("\nAfter removing {}: size {}", pattern, set.len()),
        Err(e) => println!("\nremove({}) failed: {}", pattern, e),
    }
    // Unchecked builds index without bounds checks
    if vecset::config::checks_enabled() {
        if let Err(e) = set.remove(7) {
            println!("remove(7) rejected: {}", e);
        }
    }

    Ok(())
}

fn render(set: &Set) -> String {
    let items: Vec<String> = set
        .iter()
        .map(|e| {
            let coords: Vec<String> = e.iter().map(|c| c.to_string()).collect();
            format!("[{}]", coords.join(", "))
        })
        .collect();
    format!("{{{}}}", items.join(", "))
}

use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cargo::{step, OnFailure};
use crate::TARGET;

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking DiCo builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    step(
        "Firmware (STM32H7, hardware)",
        "cargo",
        &["check", "-p", "firmware", "--target", TARGET, "--features", "hardware"],
        OnFailure::Fail,
    )?;

    // Wire format and HAL crates must stay no_std.
    for krate in ["protocol", "platform"] {
        step(
            &format!("{krate} (no_std)"),
            "cargo",
            &["check", "-p", krate, "--target", TARGET, "--no-default-features"],
            OnFailure::Fail,
        )?;
    }

    step("Host driver + CLI", "cargo", &["check", "-p", "host", "--all-targets"], OnFailure::Fail)?;

    step(
        "Clippy",
        "cargo",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;

    step("Formatting", "cargo", &["fmt", "--all", "--check"], OnFailure::Warn)?;

    println!(
        "{}",
        format!("✓ All checks completed in {:.2}s", total_start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();

    Ok(())
}

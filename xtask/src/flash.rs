use anyhow::Result;
use colored::Colorize;

use crate::cargo::{step, OnFailure};
use crate::{CHIP, TARGET};

pub fn run(release: bool) -> Result<()> {
    let profile = if release { "release" } else { "debug" };

    println!();
    println!("{}", format!("🔨 Building firmware ({profile})...").cyan().bold());
    println!();

    let mut build = vec!["build", "-p", "firmware", "--target", TARGET, "--features", "hardware"];
    if release {
        build.push("--release");
    }
    step("Firmware build", "cargo", &build, OnFailure::Fail)?;

    let binary = format!("target/{TARGET}/{profile}/firmware");
    show_binary_size(&binary);

    println!("{}", "📡 Flashing to STM32H7...".cyan().bold());
    step(
        "Flash",
        "probe-rs",
        &["download", "--chip", CHIP, "--probe-index", "0", &binary],
        OnFailure::Fail,
    )?;
    step("Reset", "probe-rs", &["reset", "--chip", CHIP], OnFailure::Warn)?;

    println!("{}", "DiCo firmware is running; host link on the ST-LINK VCP at 57600 baud.".bold());
    println!(
        "   {}",
        format!("Use 'probe-rs attach --chip {CHIP} {binary}' to view RTT logs").dimmed()
    );
    println!();

    Ok(())
}

fn show_binary_size(binary: &str) {
    // rust-size is optional tooling (cargo-binutils); skip quietly without it.
    if let Ok(out) = std::process::Command::new("rust-size").args([binary, "-A"]).output() {
        if out.status.success() {
            println!("{}", "📊 Binary size:".cyan());
            for line in String::from_utf8_lossy(&out.stdout).lines() {
                println!("   {}", line.dimmed());
            }
            println!();
        }
    }
}

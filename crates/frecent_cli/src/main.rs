//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `frecent_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Probe the full open path (pragmas + migrations) against an
    // in-memory store, independently of any real on-disk state.
    if let Err(err) = frecent_core::open_store_in_memory() {
        eprintln!("frecent_core store probe failed: {err}");
        return ExitCode::FAILURE;
    }

    println!("frecent_core version={}", frecent_core::core_version());
    println!(
        "frecent_core schema_version={}",
        frecent_core::db::migrations::latest_version()
    );
    ExitCode::SUCCESS
}

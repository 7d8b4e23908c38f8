// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! PCB Stackup Application
//!
//! Draws PCB stackup cross-sections interactively, or writes them straight to
//! an image file from the command line.

use anyhow::{bail, Context};
use pcb_stackup::utils::LEGACY_EXPORT_FILE_NAME;
use pcb_stackup::{
    export_diagram, get_default_config, render_legacy_stackup, run_app, Diagram,
    DiagramExporter, RenderOptions, StackupRenderer, DEFAULT_EXPORT_FILE_NAME,
};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        None => run_gui_app(),
        Some("--help" | "-h") => {
            print_help();
            Ok(())
        }
        Some("--version" | "-v") => {
            print_version();
            Ok(())
        }
        Some("--legacy") => {
            let output = output_path(&args[1..], LEGACY_EXPORT_FILE_NAME)?;
            run_legacy(output)
        }
        Some("--export") => {
            let Some(thicknesses) = args.get(1) else {
                print_usage();
                bail!("--export requires a comma-separated thickness list");
            };
            let output = output_path(&args[2..], DEFAULT_EXPORT_FILE_NAME)?;
            run_export(thicknesses, output)
        }
        Some(other) => {
            print_usage();
            bail!("Unknown argument: {other}");
        }
    }
}

fn output_path<'a>(rest: &'a [String], default: &'a str) -> anyhow::Result<&'a str> {
    match rest {
        [] => Ok(default),
        [path] => Ok(path.as_str()),
        _ => {
            print_usage();
            bail!("Too many arguments");
        }
    }
}

fn run_gui_app() -> anyhow::Result<()> {
    println!("Starting PCB Stackup...");
    setup_signal_handlers();

    let config = get_default_config();
    run_app(config).map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}

fn run_legacy(output: &str) -> anyhow::Result<()> {
    let diagram = render_legacy_stackup().context("Failed to render preset stackup")?;
    print_stackup_info(&diagram);
    write_output(&diagram, output)
}

fn run_export(thicknesses: &str, output: &str) -> anyhow::Result<()> {
    let diagram = StackupRenderer::new(RenderOptions::interactive())
        .render(thicknesses)
        .context("Invalid thickness list")?;
    print_stackup_info(&diagram);
    write_output(&diagram, output)
}

fn write_output(diagram: &Diagram, output: &str) -> anyhow::Result<()> {
    let exporter = DiagramExporter::new();
    let size = export_diagram(diagram, Path::new(output), &exporter)
        .with_context(|| format!("Failed to write {output}"))?;

    println!(
        "Wrote {output} ({})",
        pcb_stackup::utils::format_file_size(size)
    );
    Ok(())
}

fn print_stackup_info(diagram: &Diagram) {
    let summary = &diagram.summary;

    println!("Stackup Information:");
    println!("  Total layers: {}", summary.total_layers);
    println!("  Copper layers: {}", summary.copper_layers);
    println!("  Insulator layers: {}", summary.insulator_layers);
    println!("  Total thickness: {:.4}", summary.total_thickness);
    println!(
        "  Figure size: {:.1} x {:.1} in",
        diagram.figure.width_in, diagram.figure.height_in
    );
    if let Some(title) = &diagram.title {
        println!("  Title: {title}");
    }
    println!();
}

fn print_help() {
    println!("{}", pcb_stackup::get_library_info());
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS]", env!("CARGO_PKG_NAME"));
    println!();
    println!("OPTIONS:");
    println!("    --export <THICKNESSES> [OUTPUT]  Render a comma-separated thickness list");
    println!("                                     (default output: {DEFAULT_EXPORT_FILE_NAME})");
    println!("    --legacy [OUTPUT]                Render the built-in mil preset");
    println!("                                     (default output: {LEGACY_EXPORT_FILE_NAME})");
    println!("    -h, --help                       Print this help message");
    println!("    -v, --version                    Print version information");
    println!();
    println!("DESCRIPTION:");
    println!("    Draws the vertical cross-section of a PCB stackup. Layers are listed");
    println!("    bottom first and alternate insulator (green) and copper (orange).");
    println!("    Output ending in .svg is written as SVG, anything else as a 300 DPI PNG.");
    println!();
    println!("CONTROLS:");
    println!("    • Enter: Recalculate");
    println!("    • Mouse wheel: Zoom in/out");
    println!("    • Drag: Pan view");
    println!("    • Ctrl+R: Fit view");
    println!();
    println!("EXAMPLES:");
    println!(
        "    {}                                 # Start GUI application",
        env!("CARGO_PKG_NAME")
    );
    println!(
        "    {} --export 0.01,0.035,1.5 out.png # Write a PNG",
        env!("CARGO_PKG_NAME")
    );
    println!(
        "    {} --legacy                        # Write the preset stackup",
        env!("CARGO_PKG_NAME")
    );
}

fn print_version() {
    println!("{} v{}", pcb_stackup::NAME, pcb_stackup::VERSION);
    println!("{}", pcb_stackup::DESCRIPTION);
    println!();
    println!("Build information:");
    println!(
        "  Profile: {}",
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        }
    );
}

fn print_usage() {
    eprintln!(
        "Usage: {} [--export <THICKNESSES> [OUTPUT] | --legacy [OUTPUT]]",
        env!("CARGO_PKG_NAME")
    );
    eprintln!(
        "Try '{} --help' for more information.",
        env!("CARGO_PKG_NAME")
    );
}

// Handle Ctrl+C gracefully
fn setup_signal_handlers() {
    if let Err(e) = ctrlc::set_handler(move || {
        println!("\nReceived Ctrl+C, shutting down gracefully...");
        std::process::exit(0);
    }) {
        log::warn!("Could not install Ctrl+C handler: {e}");
    }
}

//! Generator entrypoint: turn a note corpus into `graph.json`.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
	use clap::Parser;
	use log::error;
	use note_graph::pipeline::{self, GenerateArgs};

	pipeline::init_tracing();
	let args = GenerateArgs::parse();

	match pipeline::run(&args) {
		Ok(_) => std::process::ExitCode::SUCCESS,
		Err(e) => {
			error!("generation failed: {e}");
			std::process::ExitCode::FAILURE
		}
	}
}

// The generator reads the filesystem; the wasm build only ships the viewer.
#[cfg(target_arch = "wasm32")]
fn main() {}

use shotdoc::{BuildRequest, GeneratorBuilder, PipelineError};
use std::env;
use std::fs;

/// Builds a PDF from a JSON build request.
fn main() -> Result<(), PipelineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("shotdoc=info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Builds a paginated PDF from generated content and screenshots.");
        eprintln!();
        eprintln!("Usage: {} <path/to/request.json> <path/to/output.pdf> [path/to/layout.json]", args[0]);
        std::process::exit(1);
    }

    let request_path = &args[1];
    let output_path = &args[2];

    log::info!("Loading request from {}", request_path);
    let request = BuildRequest::from_json(&fs::read_to_string(request_path)?)?;

    let mut builder = GeneratorBuilder::new();
    if let Some(config_path) = args.get(3) {
        builder = builder.with_config_file(config_path)?;
    }
    let result = builder.build()?.generate_to_file(&request, output_path)?;

    println!("{}", serde_json::to_string_pretty(&result.summary())?);
    Ok(())
}

use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::Parser;
use terrain_compiler::{compile_terrain, CompileError, GeneratorConfig};
use tracing::{error, info, Level};

/// Stamps the terrain catalogue into the host template.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct GenArgs {
    /// Generator configuration (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Terrain catalogue, overrides `data_file_path`
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Host file holding the template region, overrides `template_file_path`
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Generated file, overrides `output_file_path`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log every stamped record
    #[arg(short, long)]
    verbose: bool,
}

impl GenArgs {
    fn into_config(self) -> Result<GeneratorConfig, CompileError> {
        let Some(config_path) = self.config else {
            let (Some(data), Some(template), Some(output)) = (self.data, self.template, self.output)
            else {
                return Err(CompileError::Config(
                    "--data, --template and --output are required without --config".to_string(),
                ));
            };
            return Ok(GeneratorConfig::new(data, template, output));
        };

        let mut config = GeneratorConfig::from_file(config_path)?;
        if let Some(data) = self.data {
            config.data_file_path = data;
        }
        if let Some(template) = self.template {
            config.template_file_path = template;
        }
        if let Some(output) = self.output {
            config.output_file_path = output;
        }

        Ok(config)
    }
}

fn setup_tracing(verbose: bool) {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber)
        .map_err(|_err| eprintln!("Unable to set global default subscriber"));
}

fn run(args: GenArgs) -> Result<(), Box<dyn Error>> {
    let config = args.into_config()?;
    let classes = compile_terrain(&config)?;
    info!("generated {classes} terrain classes");

    Ok(())
}

fn main() -> ExitCode {
    let args = GenArgs::parse();
    setup_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

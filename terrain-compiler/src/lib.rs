use tracing::info;

pub mod config;
pub mod error;
pub mod record_extract;
pub mod substitution;
pub mod template_stamp;

pub use config::{GeneratorConfig, Sentinels};
pub use error::{CompileError, Result};
pub use record_extract::load_records;
pub use template_stamp::{stamp, write_output, HostTemplate};

/// Loads the terrain catalogue, stamps every record into the host template
/// and writes the generated file. Returns the number of classes written.
pub fn compile_terrain(config: &GeneratorConfig) -> Result<usize> {
    config.validate()?;

    let records = load_records(&config.data_file_path)?;
    let host = HostTemplate::load(&config.template_file_path, &config.sentinels)?;

    let generated = stamp(&host, &records, &config.terminator);
    write_output(&config.output_file_path, &generated)?;

    info!(
        output = %config.output_file_path.display(),
        classes = records.len(),
        bytes = generated.len(),
        "wrote generated terrain"
    );

    Ok(records.len())
}

use core::fmt::{Debug, Display};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};

use tracing::info;
use unconference_allocation_config::{get_config, ConfigError};
use unconference_allocation_optimizer::model::AllocationInput;
use unconference_allocation_optimizer::{generate_assignments_with, AllocationError};
use unconference_allocation_telemetry::setup_logging;

#[derive(thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("allocation failed: {0}")]
    Allocation(#[from] AllocationError),
}

impl Debug for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

pub fn main() -> Result<(), CliError> {
    setup_logging();
    let config = get_config()?;

    info!("reading {}", config.input.display());
    let input: AllocationInput =
        serde_json::from_reader(BufReader::new(File::open(&config.input)?))?;

    let result = generate_assignments_with(&input, &config.scheduler)?;

    let mut writer: Box<dyn std::io::Write> = match &config.output {
        Some(path) => {
            info!("writing {}", path.display());
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    serde_json::to_writer_pretty(&mut writer, &result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

use anyhow::{Context, Result};
use huffpack::CodecConfig;

use crate::cli::ConfigCommand;

pub fn config(command: ConfigCommand, effective: &CodecConfig) -> Result<()> {
    match command {
        ConfigCommand::Init { output_path } => {
            CodecConfig::default()
                .save(&output_path)
                .with_context(|| format!("failed to write {}", output_path.display()))?;
            eprintln!("wrote default configuration to {}", output_path.display());
        }
        ConfigCommand::Show => println!("{}", effective.to_json()?),
    }
    Ok(())
}

use anyhow::{Context, Result};
use huffpack::Codec;

use crate::cli::DecodeArgs;

pub fn decode(args: DecodeArgs, codec: &Codec) -> Result<()> {
    let report = match &args.output {
        Some(output) => codec.decode_to(&args.input, output),
        None => codec.decode(&args.input),
    }
    .with_context(|| format!("failed to decode {}", args.input.display()))?;

    println!(
        "Decoded {} -> {} ({} bytes) in {:.0?}",
        report.input_path.display(),
        report.output_path.display(),
        report.output_bytes,
        report.elapsed
    );
    Ok(())
}

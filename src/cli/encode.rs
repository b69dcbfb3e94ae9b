use anyhow::{Context, Result};
use huffpack::{Codec, EncodeReport};

use crate::cli::EncodeArgs;

pub fn encode(args: EncodeArgs, codec: &Codec) -> Result<()> {
    let report = match &args.output {
        Some(output) => codec.encode_to(&args.input, output),
        None => codec.encode(&args.input),
    }
    .with_context(|| format!("failed to encode {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

pub fn render_report(report: &EncodeReport) -> String {
    format!(
        "Encoded {} -> {} in {:.0?}\n\nInput bytes:\t\t{}\nOutput bytes:\t\t{}\nHeader bytes:\t\t{}\n\nCompression ratio:\t{:.2}%\n",
        report.input_path.display(),
        report.output_path.display(),
        report.elapsed,
        report.input_bytes,
        report.output_bytes,
        report.header_bytes,
        report.ratio(),
    )
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use super::*;

    #[test]
    fn report_lines() {
        let report = EncodeReport {
            input_path: PathBuf::from("a.txt"),
            output_path: PathBuf::from("a.txt.huff"),
            input_bytes: 4,
            output_bytes: 1,
            header_bytes: 11,
            bit_count: 4,
            distinct_symbols: 2,
            elapsed: Duration::ZERO,
        };
        let text = render_report(&report);
        assert!(text.contains("Input bytes:\t\t4\n"));
        assert!(text.contains("Output bytes:\t\t1\n"));
        assert!(text.contains("Compression ratio:\t75.00%"));
    }
}

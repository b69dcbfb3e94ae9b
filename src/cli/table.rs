use anyhow::{Context, Result};
use huffpack::{
    Codec,
    huffman::{CodeTable, FrequencyTable},
};

use crate::cli::TableArgs;

pub fn table(args: TableArgs, codec: &Codec) -> Result<()> {
    let (frequencies, codes) = codec
        .code_table(&args.input)
        .with_context(|| format!("failed to analyse {}", args.input.display()))?;
    print!("{}", render_table(&frequencies, &codes));
    Ok(())
}

pub fn render_table(frequencies: &FrequencyTable, codes: &CodeTable) -> String {
    let mut out = String::new();
    out.push_str("---------CODE TABLE---------\n----------------------------\nCHAR  FREQ      CODE\n----------------------------\n");
    for (symbol, code) in codes.iter() {
        let label = if symbol.is_ascii_graphic() {
            format!("{}", symbol as char)
        } else {
            format!("0x{:02x}", symbol)
        };
        out.push_str(&format!("{:<4}  {:<8}  {}\n", label, frequencies.get(symbol), code));
    }
    out.push_str("----------------------------\n");
    out
}

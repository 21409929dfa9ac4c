use anyhow::{Context, Result};
use huffpack::{if_not_tracing, if_tracing};

if_tracing! {
    use voxell_timer::time_fn;
}

use crate::cli::{EncodeArgs, read_input, write_output};

pub fn encode(args: EncodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let input_data = read_input(input_path, 1)?;
    let compressed_data;
    if_tracing! {{
        let (compressed, comp_dur) = time_fn(|| huffpack::compress(&input_data));
        compressed_data = compressed.with_context(|| format!("failed to compress {}", input_path.display()))?;
        tracing::info!(
            event = "encode_complete",
            input = %input_path.display(),
            output = %output_path.display(),
            elapsed_us = %comp_dur.as_micros(),
            original_len = input_data.len(),
            compressed_len = compressed_data.len(),
            "encode finished"
        );
    }};
    if_not_tracing! {{
        compressed_data =
            huffpack::compress(&input_data).with_context(|| format!("failed to compress {}", input_path.display()))?;
    }};

    write_output(output_path, &compressed_data, args.force)
}

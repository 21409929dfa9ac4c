use anyhow::{Context, Result};
use huffpack::algorithms::container::MIN_CONTAINER_LEN;
use huffpack::{if_not_tracing, if_tracing};

if_tracing! {
    use voxell_timer::time_fn;
}

use crate::cli::{DecodeArgs, read_input, write_output};

pub fn decode(args: DecodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let compressed_data = read_input(input_path, MIN_CONTAINER_LEN)?;
    let decompressed_data;
    if_tracing! {{
        let (decompressed, decomp_dur) = time_fn(|| huffpack::decompress(&compressed_data));
        decompressed_data =
            decompressed.with_context(|| format!("failed to decompress {}", input_path.display()))?;
        tracing::info!(
            event = "decode_complete",
            input = %input_path.display(),
            output = %output_path.display(),
            elapsed_us = %decomp_dur.as_micros(),
            decompressed_len = decompressed_data.len(),
            "decode finished"
        );
    }};
    if_not_tracing! {{
        decompressed_data = huffpack::decompress(&compressed_data)
            .with_context(|| format!("failed to decompress {}", input_path.display()))?;
    }};

    write_output(output_path, &decompressed_data, args.force)
}

use anyhow::{Context, Result};
use huffpack::algorithms::container::MIN_CONTAINER_LEN;

use crate::cli::{InspectArgs, read_input};

pub fn inspect(args: InspectArgs) -> Result<()> {
    let data = read_input(&args.input, MIN_CONTAINER_LEN)?;
    let info = huffpack::inspect(&data).with_context(|| format!("failed to inspect {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("file:            {}", args.input.display());
    println!("original length: {} bytes", info.original_len);
    println!("container:       {} bytes ({:.1}% of original)", info.container_len, info.ratio() * 100.0);
    println!("tree:            {} bytes, {} leaves, height {}", info.tree_bytes, info.leaf_count, info.tree_height);
    if info.degenerate {
        println!("payload:         none (single symbol)");
    } else {
        println!("payload:         {} bytes", info.payload_bytes);
    }
    Ok(())
}

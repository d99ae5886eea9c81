//! `slpa handcode`: pose a hand from a handshape code.

use std::path::Path;

use anyhow::{bail, Context, Result};
use slpa_handcode::{pose, read_interchange, write_interchange, HandCode, RenderRequest, Side};

use super::OutputFormat;

const DEFAULT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Resolve `input` as a directory holding `handCode.txt`, a code file, or a
/// literal code, in that order.
fn load_code(input: &str) -> Result<HandCode> {
    let path = Path::new(input);
    if path.is_dir() {
        return read_interchange(path)
            .with_context(|| format!("reading handshape code from {}", path.display()));
    }
    if path.is_file() {
        let blob = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return HandCode::parse(&blob).with_context(|| format!("parsing {}", path.display()));
    }
    Ok(HandCode::parse(input)?)
}

pub(crate) fn render(
    input: &str,
    hand: &str,
    color: Option<&[f32]>,
    request: bool,
    write_dir: Option<&Path>,
    format: OutputFormat,
) -> Result<String> {
    let side: Side = hand.parse()?;
    let code = load_code(input)?;

    if let Some(dir) = write_dir {
        let path = write_interchange(dir, &code)?;
        eprintln!("Wrote {}", path.display());
    }

    if request {
        let color = match color {
            None => DEFAULT_COLOR,
            Some([r, g, b]) => [*r, *g, *b],
            Some(other) => bail!("--color takes 3 channels, got {}", other.len()),
        };
        return Ok(RenderRequest::new(&code, side, color)?.to_json()? + "\n");
    }

    let hand_pose = pose(&code, side)?;
    Ok(match format {
        OutputFormat::Text => format!("Code: {code}\nHand: {side}\n{hand_pose}"),
        OutputFormat::Json => serde_json::to_string_pretty(&hand_pose)? + "\n",
    })
}

pub fn run(
    input: &str,
    hand: &str,
    color: Option<&[f32]>,
    request: bool,
    write_dir: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    print!("{}", render(input, hand, color, request, write_dir, format)?);
    Ok(())
}

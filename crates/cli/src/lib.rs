use anyhow::Result;
use sift_core::pipeline::{parse_addr_range, parse_hex, SiftOptions};

/// Raw flag values recovered from argv, either by clap directly or by the
/// stray-token rescan in [`fold_stray_tokens`].
#[derive(Debug, Clone, Default)]
pub struct FlagValues {
    pub addr_range: Option<String>,
    pub min_size: Option<String>,
    pub max_size: Option<String>,
    pub segment: Option<String>,
    pub enforce_align: bool,
    pub no_overlap: bool,
    pub batch_size: Option<String>,
    pub no_dump_all: bool,
}

/// Recover known flags from tokens the parser set aside.
///
/// Once the trailing catch-all starts capturing, clap hands every later
/// token over verbatim, including documented flags. This rescan walks those
/// tokens with the same consume-and-advance scan that defines the flag
/// surface: a value flag takes the next token (and is skipped when none
/// follows), a switch flag takes none, anything unrecognized is skipped.
/// Recovered values overwrite earlier ones, keeping last-occurrence-wins
/// consistent with clap.
pub fn fold_stray_tokens(flags: &mut FlagValues, tokens: &[String]) {
    let mut idx = 0;
    while idx < tokens.len() {
        let token = tokens[idx].as_str();
        match token {
            "--addr-range" | "--min-size" | "--max-size" | "--segment" | "--batch-size"
                if idx + 1 < tokens.len() =>
            {
                let value = Some(tokens[idx + 1].clone());
                match token {
                    "--addr-range" => flags.addr_range = value,
                    "--min-size" => flags.min_size = value,
                    "--max-size" => flags.max_size = value,
                    "--segment" => flags.segment = value,
                    _ => flags.batch_size = value,
                }
                idx += 2;
            }
            "--enforce-align" => {
                flags.enforce_align = true;
                idx += 1;
            }
            "--no-overlap" => {
                flags.no_overlap = true;
                idx += 1;
            }
            "--no-dump-all" => {
                flags.no_dump_all = true;
                idx += 1;
            }
            _ => idx += 1,
        }
    }
}

/// Parse a batch size leniently: `0x` prefix means hex, otherwise decimal.
///
/// The one flag where a malformed value is tolerated: a bad batch size
/// means "no batch size configured", it never aborts the run.
pub fn parse_batch_size_lenient(text: &str) -> Option<usize> {
    let trimmed = text.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(digits) => usize::from_str_radix(digits, 16),
        None => trimmed.parse::<usize>(),
    };
    parsed.ok()
}

/// Assemble pipeline options from raw flag values.
///
/// `--addr-range`, `--min-size`, and `--max-size` abort on malformed values;
/// `--batch-size` falls back to unset.
pub fn assemble_options(flags: &FlagValues) -> Result<SiftOptions> {
    let mut opts = SiftOptions::default();

    if let Some(raw) = &flags.addr_range {
        opts.addr_range = Some(parse_addr_range(raw)?);
    }
    if let Some(raw) = &flags.min_size {
        opts.min_size = parse_hex(raw)?;
    }
    if let Some(raw) = &flags.max_size {
        opts.max_size = Some(parse_hex(raw)?);
    }
    opts.segment = flags.segment.clone();
    opts.enforce_align = flags.enforce_align;
    opts.no_overlap = flags.no_overlap;
    opts.batch_size = flags.batch_size.as_deref().and_then(parse_batch_size_lenient);
    opts.dump_all = !flags.no_dump_all;

    Ok(opts)
}

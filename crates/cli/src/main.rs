use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use funcsift::{assemble_options, fold_stray_tokens, FlagValues};

/// Function-boundary sifter CLI.
///
/// Extracts candidate function boundaries from a disassembler's HTML export,
/// cross-references them against a recompiler's switch-table diagnostics,
/// and writes a `functions = [...]` list of the ones needing manual
/// attention. All substantive logic lives in `sift-core`.
#[derive(Parser, Debug)]
#[command(
    name = "funcsift",
    version,
    about = "Flags functions a binary recompiler could not handle automatically",
    long_about = None
)]
struct Cli {
    /// Disassembler HTML export to scan for function anchors.
    disasm_html: PathBuf,

    /// Recompiler log to scan for unresolved switch constructs.
    recomp_log: PathBuf,

    /// Output path for the generated function list.
    output: PathBuf,

    /// Keep only anchors with addresses in LOW-HIGH (hex, both inclusive).
    #[arg(long, value_name = "LOW-HIGH")]
    addr_range: Option<String>,

    /// Drop ranges smaller than this (hex, e.g. 0x20).
    #[arg(long, value_name = "0xNN")]
    min_size: Option<String>,

    /// Drop ranges larger than this (hex).
    #[arg(long, value_name = "0xNN")]
    max_size: Option<String>,

    /// Keep only anchors inside the named section (e.g. ".text").
    #[arg(long, value_name = "NAME")]
    segment: Option<String>,

    /// Keep only ranges whose start address is 16-byte aligned.
    #[arg(long)]
    enforce_align: bool,

    /// Drop ranges that overlap an earlier kept range.
    #[arg(long)]
    no_overlap: bool,

    /// Truncate the final output to N entries, smallest functions first.
    /// A malformed value is ignored rather than aborting the run.
    #[arg(long, value_name = "N")]
    batch_size: Option<String>,

    /// Do not dump every range when the log yields no switch addresses.
    #[arg(long)]
    no_dump_all: bool,

    /// Tokens set aside after a stray argument; known flags among them are
    /// recovered by a rescan, the rest are ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut flags = FlagValues {
        addr_range: cli.addr_range,
        min_size: cli.min_size,
        max_size: cli.max_size,
        segment: cli.segment,
        enforce_align: cli.enforce_align,
        no_overlap: cli.no_overlap,
        batch_size: cli.batch_size,
        no_dump_all: cli.no_dump_all,
    };
    // Known flags after a stray token land in `ignored`; recover them.
    fold_stray_tokens(&mut flags, &cli.ignored);
    let opts = assemble_options(&flags)?;

    sift_core::pipeline::run_files(&cli.disasm_html, &cli.recomp_log, &cli.output, &opts)?;

    Ok(())
}

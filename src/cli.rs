//! The `convert` command's argument model, shared between the `convert`
//! binary and any future contract tests that want to construct a
//! [`ConvertArgs`] directly instead of parsing `argv`.

use clap::Parser;

/// Convert text from one inventory to another through the transduction
/// engine.
#[derive(Debug, Parser)]
#[command(name = "convert", about = "Convert text between G2P inventories")]
pub struct ConvertArgs {
    /// Input inventory name (e.g. "fra").
    pub in_lang: String,
    /// Output inventory name (e.g. "eng-ipa").
    pub out_lang: String,
    /// Text to convert.
    pub text: String,

    /// Tokenize input before conversion (default).
    #[arg(long = "tok", overrides_with = "no_tok")]
    pub tok: bool,
    /// Disable tokenization; convert the whole input as one token.
    #[arg(long = "no-tok", overrides_with = "tok")]
    pub no_tok: bool,

    /// Inventory to use for tokenization, if different from `in_lang`.
    #[arg(long)]
    pub tok_lang: Option<String>,

    /// Validate the produced output against the final mapping's output
    /// inventory.
    #[arg(long)]
    pub check: bool,

    /// Emit a per-rule application trace to stderr.
    #[arg(long)]
    pub debugger: bool,

    /// Emit the alignment in human-readable form instead of just the
    /// converted text.
    #[arg(long = "pretty-edges")]
    pub pretty_edges: bool,

    /// Path to a local mapping config to inject into the registry ahead
    /// of lookup. Accepted for CLI compatibility, but the loader itself
    /// (reading mapping files off disk) is not part of this crate.
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
}

impl ConvertArgs {
    /// Whether tokenization should run before conversion: `--tok` is the
    /// default; `--no-tok` overrides it.
    pub fn should_tokenize(&self) -> bool {
        !self.no_tok
    }
}

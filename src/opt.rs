use std::path::PathBuf;
use structopt::{clap, clap::arg_enum, StructOpt};

#[derive(Debug, StructOpt)]
#[structopt(name = "boolparser")]
#[structopt(long_version(option_env!("LONG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))))]
#[structopt(setting(clap::AppSettings::ColoredHelp))]
pub struct Opt {
    #[structopt(long = "log-level", possible_values(&LogLevel::variants()), case_insensitive = true)]
    pub log_level: Option<LogLevel>,
    /// Expression to process; may be given more than once
    #[structopt(long = "expr", short = "e", number_of_values = 1)]
    pub exprs: Vec<String>,
    /// File with one expression per line (.gz supported, - for stdin)
    #[structopt(long = "input", short = "i")]
    pub input: Option<PathBuf>,
    #[structopt(long = "comment", default_value = "#")]
    pub comment: char,
    #[structopt(long = "format", short = "f", possible_values(&OutputFormat::variants()), case_insensitive = true)]
    pub out_format: Option<OutputFormat>,
    /// Variable assignment for EVAL, e.g. "A=1,B=0"
    #[structopt(long = "assign", short = "a")]
    pub assign: Option<String>,
    /// Only tabulate the whole expression, not every subexpression
    #[structopt(long = "root-only")]
    pub root_only: bool,
    #[structopt(long = "max-vars", default_value = "16")]
    pub max_vars: usize,
}

arg_enum! {
    #[derive(Debug)]
    pub enum LogLevel {
        DEBUG,
        INFO,
        WARN,
        ERROR,
    }
}

arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum OutputFormat {
        TABLE,
        TSV,
        RENDER,
        VARS,
        EVAL,
    }
}

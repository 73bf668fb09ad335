#[macro_use]
extern crate log;

use std::{env::set_var, error::Error};
use structopt::StructOpt;

mod opt;
mod reader;
mod utils;

use crate::opt::{LogLevel, Opt, OutputFormat};
use boolparser::{parse, Expr, ExprError, TruthTableBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    match &opt.log_level {
        Some(log_level) => match log_level {
            LogLevel::DEBUG => set_var("RUST_LOG", "debug"),
            LogLevel::INFO => set_var("RUST_LOG", "info"),
            LogLevel::WARN => set_var("RUST_LOG", "warn"),
            LogLevel::ERROR => set_var("RUST_LOG", "error"),
        },
        None => set_var("RUST_LOG", "warn"),
    };

    pretty_env_logger::init_timed();
    debug!("{:?}", opt);

    let mut exprs = opt.exprs.clone();
    if let Some(input) = &opt.input {
        let bufreader = reader::read_with_gz(input)?;
        exprs.extend(
            reader::ExprReader::new(bufreader)
                .with_comment(opt.comment)
                .finish()?,
        );
    }

    if exprs.is_empty() {
        return Err(Box::new(ExprError::input(
            "no expression given, use --expr or --input",
        )));
    }

    let outformat = opt.out_format.unwrap_or(OutputFormat::TABLE);
    let assignments = match &opt.assign {
        Some(s) => utils::parse_assignments(s)?,
        None => vec![],
    };

    let failed = run(&exprs, &opt, outformat, &assignments);
    if failed > 0 {
        return Err(Box::new(ExprError::input(format!(
            "{} of {} expressions failed",
            failed,
            exprs.len()
        ))));
    }

    Ok(())
}

/// Print the output for every expression, reporting failures on stderr.
/// Returns the number of expressions that failed.
fn run(
    exprs: &[String],
    opt: &Opt,
    outformat: OutputFormat,
    assignments: &[(String, bool)],
) -> usize {
    let mut failed = 0;

    for (i, text) in exprs.iter().enumerate() {
        if i > 0 && outformat == OutputFormat::TABLE {
            println!();
        }

        let result = parse(text).and_then(|expr| process(expr, opt, outformat, assignments));
        match result {
            Ok(output) => println!("{}", output),
            Err(err) => {
                info!("failed on {:?}", text);
                eprintln!("{}: {}", text, err);
                failed += 1;
            }
        }
    }

    failed
}

fn process(
    mut expr: Expr,
    opt: &Opt,
    outformat: OutputFormat,
    assignments: &[(String, bool)],
) -> Result<String, ExprError> {
    let output = match outformat {
        OutputFormat::RENDER => expr.render(),
        OutputFormat::VARS => expr.get_vars().join(" "),
        OutputFormat::EVAL => {
            for (label, value) in assignments {
                if !expr.assign(label, *value) {
                    warn!("{} does not occur in {}", label, expr.render());
                }
            }
            let value = if expr.evaluate()? { "1" } else { "0" };
            value.to_string()
        }
        OutputFormat::TABLE | OutputFormat::TSV => {
            let rendered = expr.render();
            let mut builder = TruthTableBuilder::new(&mut expr).with_max_vars(opt.max_vars);
            if opt.root_only {
                builder = builder.with_root_only();
            }
            let table = builder.finish()?;

            if outformat == OutputFormat::TSV {
                table.to_tsv()
            } else {
                format!("{}\n\n{}", rendered, table)
            }
        }
    };

    Ok(output)
}

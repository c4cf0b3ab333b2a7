//! The `quasi` command line tool, which reads templates without a symbol
//! table and prints them.
mod args;

use std::process::ExitCode;

use args::{QuasiOptions, SubCmd};
use clap::Parser as ClapParser;
use itertools::Itertools;
use log::error;
use quasi::{error::QuoteResult, settings::QuoteSettings, Quote};
use quasi_trees::Symbols;
use quasi_utils::logging::QuasiLogger;

/// Stands for a hole in templates given on the command line.
const HOLE_MARKER: char = '$';

pub static CONSOLE_LOGGER: QuasiLogger = QuasiLogger::new();

fn execute(mode: &SubCmd, settings: QuoteSettings) -> QuoteResult<()> {
    let symbols = Symbols::new();
    let quote = Quote::with_settings(&symbols, settings);

    match mode {
        SubCmd::Parse { template, compile } => {
            let parts = template.split(HOLE_MARKER).collect_vec();
            let template = quote.pattern(&parts)?;
            println!("{template}");

            if *compile {
                println!("{:#?}", quote.compile(&template, &[])?);
            }
        }
        SubCmd::Type { template } => {
            let template = quote.parse_type(&[template.as_str()], &[])?;
            println!("{}", quote.resolve(&template)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let opts = QuasiOptions::parse();
    let settings = QuoteSettings::from(&opts);

    if CONSOLE_LOGGER.install(settings.debug).is_err() {
        eprintln!("couldn't initiate logger");
    }

    match execute(&opts.mode, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

//! Quasi command line arguments.
use clap::{Parser as ClapParser, Subcommand};
use quasi::settings::QuoteSettings;

/// QuasiOptions is a structural representation of what arguments the `quasi`
/// tool can take when running.
#[derive(ClapParser)]
#[clap(
    name = "quasi",
    version,
    author = "The Quasi authors",
    about = "Read quasiquoted templates and print what they denote"
)]
#[clap(disable_colored_help = true)]
pub(crate) struct QuasiOptions {
    /// Print the debug logs of every stage
    #[clap(short, long, global = true)]
    pub(crate) debug: bool,

    /// Compile unknown names to fresh variables instead of reporting them
    #[clap(long, global = true)]
    pub(crate) allow_free_names: bool,

    /// Tool mode
    #[clap(subcommand)]
    pub(crate) mode: SubCmd,
}

impl From<&QuasiOptions> for QuoteSettings {
    fn from(options: &QuasiOptions) -> Self {
        QuoteSettings::new().allow_free_names(options.allow_free_names).debug(options.debug)
    }
}

#[derive(Subcommand, Clone)]
pub(crate) enum SubCmd {
    /// Read an expression template and print it. Every `$` in the template
    /// is a hole.
    Parse {
        template: String,

        /// Also compile the template and print the host expression
        #[clap(short, long)]
        compile: bool,
    },

    /// Read a type template and print the host type it resolves to
    Type { template: String },
}

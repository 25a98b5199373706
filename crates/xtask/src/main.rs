use clap::Parser;
use provider_azapi::logging;
use snafu::{ResultExt, Snafu};
use tracing::level_filters::LevelFilter;

mod convert;
mod crd;

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to initialize logging"))]
    InitializeLogging { source: logging::Error },

    #[snafu(display("failed to generate CRDs"))]
    Crd { source: crd::Error },

    #[snafu(display("failed to convert object"))]
    Convert { source: convert::Error },
}

/// Development tasks of the azapi provider.
#[derive(Debug, Parser)]
enum Command {
    /// Writes the merged multi-version CRDs of all kinds.
    Crd(crd::CrdArguments),

    /// Converts one object into another API version and prints it as YAML.
    Convert(convert::ConvertArguments),
}

#[snafu::report]
fn main() -> Result<(), Error> {
    logging::initialize_logging("AZAPI_PROVIDER_LOG", LevelFilter::INFO)
        .context(InitializeLoggingSnafu)?;

    match Command::parse() {
        Command::Crd(arguments) => crd::generate(&arguments).context(CrdSnafu),
        Command::Convert(arguments) => convert::run(&arguments).context(ConvertSnafu),
    }
}

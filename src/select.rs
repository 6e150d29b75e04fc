use crate::config::Config;
use crate::error::SelpgError;
use crate::processor::{process, PageStats};
use crate::sink::OutputSink;

/// Page the configured input into the configured sink.
///
/// The input is opened before the print command is started, so a bad input
/// file never spawns a printer. The sink is closed before the page range is
/// checked against the input, so pages that did exist are fully delivered
/// even when the range is reported as out of bounds.
pub fn run(config: &Config) -> Result<PageStats, SelpgError> {
    let input = config.input.open()?;
    let mut sink = OutputSink::open(config.print_destination.as_ref())?;

    let stats = process(input, &mut sink, &config.range, config.mode)?;
    sink.close()?;

    stats.check(&config.range)?;
    Ok(stats)
}

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use xax_lib::scan_with;
use xax_lib::util::format_bytes_approx;

use crate::CliError;
use crate::cli_types::TrackArgs;
use crate::progress::SectorProgress;
use crate::report;

/// Run the scan command.
pub(crate) fn run_scan(track: &TrackArgs, quiet: bool, verbose: bool) -> Result<(), CliError> {
    let input = track.input();
    log::info!(
        "Scanning {}",
        input
            .display_name()
            .if_supports_color(Stderr, |t| t.cyan()),
    );

    let progress = SectorProgress::new(input.size_hint(), quiet || verbose || track.json);
    let reader = input.open()?;
    let result = scan_with(reader, &track.demux_options(), |index, sector| {
        log::debug!("{:6} {}", index, sector);
        progress.sector(index);
    });
    progress.finish();
    let summary = result?;

    if track.json {
        return report::print_json(&summary);
    }

    crate::log_blank();
    report::log_streams(&summary.streams);
    crate::log_blank();
    report::log_counts(&summary.counts);
    log::info!(
        "{} of payload in {} streams",
        format_bytes_approx(summary.total_bytes()).if_supports_color(Stderr, |t| t.bold()),
        summary.streams.len(),
    );
    Ok(())
}

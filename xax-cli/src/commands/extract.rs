use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use xax_lib::util::format_bytes_approx;
use xax_lib::{ExtractOptions, WriteMode, extract_with};

use crate::CliError;
use crate::cli_types::TrackArgs;
use crate::progress::SectorProgress;
use crate::report;

/// Run the extract command.
pub(crate) fn run_extract(
    track: &TrackArgs,
    directory: Option<PathBuf>,
    write_mode: WriteMode,
    quiet: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let target = directory.unwrap_or_else(|| PathBuf::from("."));
    let input = track.input();

    log::info!(
        "Extracting {} into {}",
        input
            .display_name()
            .if_supports_color(Stderr, |t| t.cyan()),
        target.display().if_supports_color(Stderr, |t| t.cyan()),
    );
    if write_mode == WriteMode::Append {
        log::info!(
            "{}",
            "Appending to existing stream files".if_supports_color(Stderr, |t| t.dimmed()),
        );
    }

    let options = ExtractOptions::new()
        .demux(track.demux_options())
        .write_mode(write_mode);

    let progress = SectorProgress::new(input.size_hint(), quiet || verbose || track.json);
    let reader = input.open()?;
    let result = extract_with(reader, &target, &options, |index, sector| {
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
        "Wrote {} to {} streams",
        format_bytes_approx(summary.total_bytes()).if_supports_color(Stderr, |t| t.bold()),
        summary.streams.len(),
    );
    Ok(())
}

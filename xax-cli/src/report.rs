//! Run summaries: colored log lines or JSON on stdout.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use serde::Serialize;

use xax_lib::util::format_bytes_approx;
use xax_lib::{DemuxCounts, StreamSummary, StreamType};

use crate::CliError;

/// Write `value` as pretty JSON to standard output.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}

fn colored_key(stream: &StreamSummary) -> String {
    let key = stream.key.as_str();
    match stream.stream_type {
        StreamType::Video => key.if_supports_color(Stderr, |t| t.magenta()).to_string(),
        StreamType::Audio => key.if_supports_color(Stderr, |t| t.green()).to_string(),
        StreamType::Data => key.if_supports_color(Stderr, |t| t.cyan()).to_string(),
        StreamType::Untyped => key.if_supports_color(Stderr, |t| t.dimmed()).to_string(),
    }
}

/// Log one line per stream.
pub(crate) fn log_streams(streams: &[StreamSummary]) {
    if streams.is_empty() {
        log::info!(
            "{}",
            "No streams found".if_supports_color(Stderr, |t| t.dimmed())
        );
        return;
    }

    log::info!("{}", "Streams:".if_supports_color(Stderr, |t| t.bold()));
    for stream in streams {
        let location = stream
            .path
            .as_ref()
            .map(|p| format!("  {}", p.display()))
            .unwrap_or_default();
        log::info!(
            "  {}  {:>7} sectors  {:>9}{}",
            colored_key(stream),
            stream.stats.sectors,
            format_bytes_approx(stream.stats.bytes),
            location,
        );
    }
}

/// Log the sector counters, mentioning skips only when they happened.
pub(crate) fn log_counts(counts: &DemuxCounts) {
    log::info!(
        "{} sectors read: {} Mode1, {} Form1, {} Form2, {} Mode2, {} empty",
        counts.sectors_read.if_supports_color(Stderr, |t| t.bold()),
        counts.mode1,
        counts.mode2_form1,
        counts.mode2_form2,
        counts.mode2_plain,
        counts.empty,
    );
    if counts.filler_skipped > 0 {
        log::info!("Skipped {} filler sectors", counts.filler_skipped);
    }
    if counts.unknown_skipped > 0 {
        log::warn!(
            "Skipped {} sectors with an unrecognized mode",
            counts.unknown_skipped
        );
    }
    if counts.subheader_mismatches > 0 {
        log::warn!(
            "{} sectors had disagreeing sub-header copies",
            counts.subheader_mismatches
        );
    }
}

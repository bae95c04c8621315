//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use xax_lib::{DemuxOptions, InputSource, SubheaderPolicy, UnknownModePolicy, WriteMode};

#[derive(Parser)]
#[command(name = "xax")]
#[command(about = "Extract CD-ROM XA streams from raw data tracks", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging and list every sector
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to treat sectors whose two sub-header copies disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SubheaderArg {
    /// Treat the sector as formless Mode 2 (2336-byte payload, untyped)
    Plain,
    /// Decode the first copy and warn
    FirstCopy,
    /// Abort the run
    Strict,
}

impl From<SubheaderArg> for SubheaderPolicy {
    fn from(arg: SubheaderArg) -> Self {
        match arg {
            SubheaderArg::Plain => SubheaderPolicy::Plain,
            SubheaderArg::FirstCopy => SubheaderPolicy::FirstCopy,
            SubheaderArg::Strict => SubheaderPolicy::Strict,
        }
    }
}

/// Common arguments for commands that read a track.
#[derive(Args, Clone)]
pub(crate) struct TrackArgs {
    /// Raw track image (e.g. *.cdr); standard input when absent or "-"
    #[arg(short, long)]
    pub input_file: Option<PathBuf>,

    /// Reject sectors that don't start with the CD sync pattern
    #[arg(long)]
    pub verify_sync: bool,

    /// Handling of sectors whose sub-header copies disagree
    #[arg(long, value_enum, default_value_t = SubheaderArg::Plain)]
    pub subheader: SubheaderArg,

    /// Skip sectors with an unrecognized mode byte instead of aborting
    #[arg(long)]
    pub skip_unknown: bool,

    /// Drop filler sectors (Mode 0 and bare Form 2 padding)
    #[arg(long)]
    pub skip_filler: bool,

    /// Print the summary as JSON on standard output
    #[arg(long)]
    pub json: bool,
}

impl TrackArgs {
    pub fn input(&self) -> InputSource {
        InputSource::from_arg(self.input_file.as_deref())
    }

    pub fn demux_options(&self) -> DemuxOptions {
        let unknown_mode = if self.skip_unknown {
            UnknownModePolicy::Skip
        } else {
            UnknownModePolicy::Abort
        };
        DemuxOptions::new()
            .verify_sync(self.verify_sync)
            .subheader(self.subheader.into())
            .unknown_mode(unknown_mode)
            .skip_filler(self.skip_filler)
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Extract every stream of a track into type/file/channel files
    Extract {
        #[command(flatten)]
        track: TrackArgs,

        /// Target directory (defaults to the current directory)
        #[arg(short, long)]
        directory: Option<PathBuf>,

        /// Append to existing stream files instead of replacing them
        #[arg(long)]
        append: bool,
    },

    /// List the streams of a track without writing anything
    Scan {
        #[command(flatten)]
        track: TrackArgs,
    },
}

pub(crate) fn write_mode(append: bool) -> WriteMode {
    if append {
        WriteMode::Append
    } else {
        WriteMode::Truncate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn extract_defaults() {
        let cli = Cli::try_parse_from(["xax", "extract"]).unwrap();
        let Commands::Extract {
            track,
            directory,
            append,
        } = cli.command
        else {
            panic!("expected extract");
        };
        assert_eq!(track.input(), InputSource::Stdin);
        assert_eq!(track.demux_options(), DemuxOptions::default());
        assert!(directory.is_none());
        assert_eq!(write_mode(append), WriteMode::Truncate);
    }

    #[test]
    fn policy_flags_map_to_options() {
        let cli = Cli::try_parse_from([
            "xax",
            "scan",
            "-i",
            "track.cdr",
            "--subheader",
            "first-copy",
            "--skip-unknown",
            "--skip-filler",
            "--verify-sync",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Scan { track } = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(
            track.input(),
            InputSource::File(PathBuf::from("track.cdr"))
        );
        assert_eq!(
            track.demux_options(),
            DemuxOptions::new()
                .verify_sync(true)
                .subheader(SubheaderPolicy::FirstCopy)
                .unknown_mode(UnknownModePolicy::Skip)
                .skip_filler(true)
        );
    }

    #[test]
    fn dash_reads_stdin() {
        let cli =
            Cli::try_parse_from(["xax", "extract", "-i", "-", "-d", "out", "--append"]).unwrap();
        let Commands::Extract {
            track,
            directory,
            append,
        } = cli.command
        else {
            panic!("expected extract");
        };
        assert_eq!(track.input(), InputSource::Stdin);
        assert_eq!(directory, Some(PathBuf::from("out")));
        assert_eq!(write_mode(append), WriteMode::Append);
    }
}

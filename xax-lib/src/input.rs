//! Input source selection: a track image file or standard input.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

/// Where the raw track is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputSource {
    #[default]
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `None` and `-` select standard input; anything else is a file path.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => Self::File(path.to_path_buf()),
            _ => Self::Stdin,
        }
    }

    /// Open the source for sequential reading.
    pub fn open(&self) -> Result<Box<dyn Read>, ExtractError> {
        match self {
            Self::Stdin => Ok(Box::new(io::stdin().lock())),
            Self::File(path) => {
                let file = File::open(path).map_err(|source| ExtractError::OpenInput {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }

    /// Size in bytes when the source is a regular file.
    pub fn size_hint(&self) -> Option<u64> {
        match self {
            Self::Stdin => None,
            Self::File(path) => path.metadata().ok().map(|m| m.len()),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_and_missing_select_stdin() {
        assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
        assert_eq!(InputSource::from_arg(Some(Path::new("-"))), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Some(Path::new("track.cdr"))),
            InputSource::File(PathBuf::from("track.cdr"))
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let source = InputSource::File(PathBuf::from("/nonexistent/track.cdr"));
        match source.open() {
            Err(ExtractError::OpenInput { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/track.cdr"));
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("expected an error"),
        }
        assert_eq!(source.size_hint(), None);
    }
}

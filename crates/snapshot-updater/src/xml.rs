//! Parsed XML documents.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("XML document has unclosed elements")]
    Unclosed,

    #[error("XML document must have exactly one root element, found {0}")]
    RootCount(usize),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A well-formed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    source: String,
}

impl XmlDocument {
    pub fn parse(source: impl Into<String>) -> Result<Self, XmlError> {
        let source = source.into();
        check_well_formed(&source)?;
        Ok(Self { source })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, XmlError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| XmlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(source)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl FromStr for XmlDocument {
    type Err = XmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn check_well_formed(source: &str) -> Result<(), XmlError> {
    let mut reader = Reader::from_str(source);
    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Empty(_)) if depth == 0 => roots += 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(XmlError::Syntax {
                    position: reader.buffer_position() as u64,
                    message: err.to_string(),
                })
            }
        }
    }
    if depth != 0 {
        return Err(XmlError::Unclosed);
    }
    if roots != 1 {
        return Err(XmlError::RootCount(roots));
    }
    Ok(())
}

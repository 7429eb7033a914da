/*
** This file is a part of Xmlstream (streaming XML writer and reader)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlstream is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::error::Error;
use std::fmt::Display;

/// Error returned from [XmlReader::read()](super::XmlReader::read).
///
/// The read is abandoned at the first error, there is no way to resume
/// it. Callbacks made before the error are not undone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReadError {
    /// Source is not well-formed XML.
    ///
    /// Position is the byte offset in the source where the problem
    /// was noticed.
    BadXml {
        position: u64,
        description: String,
    },

    /// Source could not be read.
    ///
    /// Only the description is kept, since `std::io::Error` is not `Clone`.
    Io(String),
}

impl ReadError {
    pub(super) fn bad_xml(position: u64, description: impl Display) -> ReadError {
        ReadError::BadXml {
            position,
            description: description.to_string(),
        }
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::BadXml {
                position,
                description,
            } => write!(
                f,
                "XML source is not well-formed at byte {}: {}",
                position, description
            ),
            ReadError::Io(msg) => write!(f, "cannot read XML source: {}", msg),
        }
    }
}

impl Error for ReadError {}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        ReadError::Io(err.to_string())
    }
}

pub(super) mod description {
    pub(in super::super) const DOC_NO_CONTENT: &str = "Document has no root tag";
    pub(in super::super) const DOC_OPEN_TAGS: &str = "Document has unclosed tags";
    pub(in super::super) const DOC_SECOND_ROOT: &str = "Document has more than one root tag";
    pub(in super::super) const TEXT_OUTSIDE_ROOT: &str = "Character data outside of the root tag";
}

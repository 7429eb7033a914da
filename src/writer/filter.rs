/*
** This file is a part of Xmlstream (streaming XML writer and reader)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlstream is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::io::Write;

use crate::entities;

/// Tells structural bytes from the payload bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ByteKind {
    /// Tag delimiters, names, quotes, and the XML declaration.
    Markup,
    /// Attribute values and character data given by the caller.
    Content,
}

/// Layer between the [XmlWriter](super::XmlWriter) and its sink.
///
/// Every write of the writer goes through the filter together with its
/// [ByteKind], so the filter can transform the content without touching
/// the markup.
pub trait ContentFilter {
    fn write(&mut self, sink: &mut dyn Write, kind: ByteKind, bytes: &[u8]) -> std::io::Result<()>;
}

/// Writes everything as it is.
///
/// Content is not escaped, it is the caller's job to make sure values
/// do not contain markup characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Verbatim;

impl ContentFilter for Verbatim {
    fn write(&mut self, sink: &mut dyn Write, _: ByteKind, bytes: &[u8]) -> std::io::Result<()> {
        sink.write_all(bytes)
    }
}

/// Replaces the markup characters in the content with predefined entities.
#[derive(Clone, Copy, Debug, Default)]
pub struct Escape;

impl ContentFilter for Escape {
    fn write(&mut self, sink: &mut dyn Write, kind: ByteKind, bytes: &[u8]) -> std::io::Result<()> {
        match kind {
            ByteKind::Markup => sink.write_all(bytes),
            ByteKind::Content => entities::escape(bytes, sink),
        }
    }
}

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

use crate::AttributeMap;
use crate::ContentFilter;
use crate::XmlHandler;
use crate::XmlWriter;

/// Handler which writes the reader callbacks back as XML.
///
/// Handler callbacks cannot fail, so the first error from the sink is
/// kept and all later callbacks are ignored. Check it with
/// [finish()](WriterHandler::finish).
///
/// The reader gives the text with references already replaced, so the
/// writer should normally have the [Escape](crate::Escape) filter.
///
/// # Examples
///
/// ```
/// use xmlstream::{Escape, WriterHandler, XmlReader, XmlWriter};
///
/// let mut out = Vec::new();
/// {
///     let mut writer = XmlWriter::with_filter(&mut out, Escape);
///     let mut reader = XmlReader::new(WriterHandler::new(&mut writer));
///     reader.read("b", "<a><b x='1'>&lt;t&gt;</b></a>".as_bytes())?;
///     reader.into_handler().finish()?;
/// }
/// assert_eq!(out, b"<b x=\"1\">&lt;t&gt;</b>");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct WriterHandler<'w, W: Write, F: ContentFilter> {
    writer: &'w mut XmlWriter<W, F>,
    error: Option<std::io::Error>,
}

impl<'w, W: Write, F: ContentFilter> WriterHandler<'w, W, F> {
    pub fn new(writer: &'w mut XmlWriter<W, F>) -> WriterHandler<'w, W, F> {
        WriterHandler {
            writer,
            error: None,
        }
    }

    /// Closes the open tags and returns the first error, if any.
    pub fn finish(self) -> std::io::Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => self.writer.finish(),
        }
    }

    fn run<Op>(&mut self, op: Op)
    where
        Op: FnOnce(&mut XmlWriter<W, F>) -> std::io::Result<()>,
    {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = op(&mut *self.writer) {
            log::warn!("cannot write XML: {}", err);
            self.error = Some(err);
        }
    }
}

impl<W: Write, F: ContentFilter> XmlHandler for WriterHandler<'_, W, F> {
    fn start_tag(&mut self, name: &str, attributes: &AttributeMap) {
        self.run(|writer| {
            writer.open_tag(name)?;
            for (name, value) in attributes {
                writer.attribute(name)?;
                writer.value(value)?;
            }
            Ok(())
        });
    }

    fn end_tag(&mut self, name: &str) {
        self.run(|writer| writer.close_tag_named(name));
    }

    fn tag_data(&mut self, _name: &str, value: &str) {
        self.run(|writer| writer.text(value));
    }
}

/*
** This file is a part of Xmlstream (streaming XML writer and reader)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlstream is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;

use crate::AttrValue;
use crate::TagName;

use super::error::ReadError;
use super::error::description;

/// Receiver of the low level parse events.
///
/// [XmlReader](super::XmlReader) implements this, so it can be driven by the
/// [Tokenizer] or by any other XML parser.
pub trait TokenSink {
    /// A start tag, attributes are given in document order.
    fn tag_start(&mut self, name: &str, attributes: &[(TagName, AttrValue)]);

    fn tag_end(&mut self, name: &str);

    /// A piece of character data. A single text block can be sent in
    /// any number of pieces.
    fn char_data(&mut self, bytes: &[u8]);

    /// Tells the event source that no more events are wanted.
    fn is_done(&self) -> bool {
        false
    }
}

/// Turns the XML byte stream into [TokenSink] events.
///
/// Empty element tags are sent as a start and an end event. Content
/// outside of the single document element is an error. References to
/// the predefined entities and characters are replaced in the attribute
/// values and in the character data. Comments, processing instructions, and
/// the document type declaration are skipped.
pub struct Tokenizer<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    attributes: Vec<(TagName, AttrValue)>,
    depth: usize,
    seen_content: bool,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(source: R) -> Tokenizer<R> {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = true;
        config.check_end_names = true;
        Tokenizer {
            reader,
            buf: Vec::new(),
            attributes: Vec::new(),
            depth: 0,
            seen_content: false,
        }
    }

    /// Byte offset of the parsed input.
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    /// Sends events to the sink until the input ends or the sink is done.
    pub fn run(&mut self, sink: &mut impl TokenSink) -> Result<(), ReadError> {
        while !sink.is_done() && self.step(sink)? {}
        Ok(())
    }

    /// Parses the next XML construct and sends its event, if any.
    ///
    /// Returns false when the input is finished.
    pub fn step(&mut self, sink: &mut impl TokenSink) -> Result<bool, ReadError> {
        self.buf.clear();
        let event = match self.reader.read_event_into(&mut self.buf) {
            Ok(event) => event,
            Err(quick_xml::Error::Io(err)) => return Err(ReadError::Io(err.to_string())),
            Err(err) => {
                return Err(ReadError::bad_xml(
                    self.reader.error_position() as u64,
                    err,
                ));
            }
        };
        let position = self.reader.buffer_position() as u64;

        match event {
            Event::Start(tag) => {
                if self.depth == 0 && self.seen_content {
                    return Err(ReadError::bad_xml(position, description::DOC_SECOND_ROOT));
                }
                let name = start_tag(&self.reader, &mut self.attributes, &tag, position)?;
                self.depth += 1;
                self.seen_content = true;
                sink.tag_start(&name, &self.attributes);
            }
            Event::End(tag) => {
                let qname = tag.name();
                let name = self
                    .reader
                    .decoder()
                    .decode(qname.as_ref())
                    .map_err(|err| ReadError::bad_xml(position, err))?;
                self.depth = self.depth.saturating_sub(1);
                sink.tag_end(&name);
            }
            Event::Text(text) => {
                let text = text
                    .decode()
                    .map_err(|err| ReadError::bad_xml(position, err))?;
                if self.depth == 0 {
                    if !is_blank(&text) {
                        return Err(ReadError::bad_xml(position, description::TEXT_OUTSIDE_ROOT));
                    }
                    return Ok(true);
                }
                sink.char_data(text.as_bytes());
            }
            Event::CData(cdata) => {
                if self.depth == 0 {
                    return Err(ReadError::bad_xml(position, description::TEXT_OUTSIDE_ROOT));
                }
                let text = self
                    .reader
                    .decoder()
                    .decode(&cdata)
                    .map_err(|err| ReadError::bad_xml(position, err))?;
                sink.char_data(text.as_bytes());
            }
            Event::GeneralRef(reference) => {
                if self.depth == 0 {
                    return Err(ReadError::bad_xml(position, description::TEXT_OUTSIDE_ROOT));
                }
                let name = reference
                    .decode()
                    .map_err(|err| ReadError::bad_xml(position, err))?;
                let entity = format!("&{};", name);
                let resolved = unescape(&entity)
                    .map_err(|err| ReadError::bad_xml(position, err))?;
                sink.char_data(resolved.as_bytes());
            }
            Event::Eof => {
                if self.depth > 0 {
                    return Err(ReadError::bad_xml(position, description::DOC_OPEN_TAGS));
                }
                if !self.seen_content {
                    return Err(ReadError::bad_xml(position, description::DOC_NO_CONTENT));
                }
                return Ok(false);
            }
            _ => (),
        }
        Ok(true)
    }
}

// XML whitespace is space, tab, carriage return and line feed only.
fn is_blank(text: &str) -> bool {
    text.bytes().all(|c| matches!(c, b' ' | b'\t' | b'\r' | b'\n'))
}

// Decodes the tag name and fills the attribute list.
fn start_tag<R>(
    reader: &Reader<R>,
    attributes: &mut Vec<(TagName, AttrValue)>,
    tag: &BytesStart,
    position: u64,
) -> Result<TagName, ReadError> {
    let decoder = reader.decoder();
    let name = decoder
        .decode(tag.name().as_ref())
        .map_err(|err| ReadError::bad_xml(position, err))?
        .into_owned();
    attributes.clear();
    for attr in tag.attributes() {
        let attr = attr.map_err(|err| ReadError::bad_xml(position, err))?;
        let key = decoder
            .decode(attr.key.as_ref())
            .map_err(|err| ReadError::bad_xml(position, err))?
            .into_owned();
        let raw = decoder
            .decode(&attr.value)
            .map_err(|err| ReadError::bad_xml(position, err))?;
        let value = unescape(&raw)
            .map_err(|err| ReadError::bad_xml(position, err))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(name)
}

/*
** This file is a part of Xmlstream (streaming XML writer and reader)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlstream is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod action;
mod error;
mod tokenizer;

use std::io::BufReader;
use std::io::Read;

pub use action::Action;
pub use action::ActionLog;
pub use error::ReadError;
pub use tokenizer::TokenSink;
pub use tokenizer::Tokenizer;

use crate::AttrValue;
use crate::AttributeMap;
use crate::TagName;
use crate::TagValue;

/// Size of the blocks read from the source.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Receiver of the callbacks from the [XmlReader].
///
/// All methods do nothing by default, so a handler only needs to implement
/// the ones it is interested in. Same interface is used for the live
/// callbacks and for replaying the recorded ones.
pub trait XmlHandler {
    fn start_tag(&mut self, _name: &str, _attributes: &AttributeMap) {}

    fn end_tag(&mut self, _name: &str) {}

    /// Character data of the tag.
    ///
    /// Text pieces between two structural events are joined, and leading
    /// and trailing whitespace is removed. Blocks with only whitespace are
    /// not reported.
    fn tag_data(&mut self, _name: &str, _value: &str) {}
}

impl<H: XmlHandler + ?Sized> XmlHandler for &mut H {
    fn start_tag(&mut self, name: &str, attributes: &AttributeMap) {
        (**self).start_tag(name, attributes)
    }

    fn end_tag(&mut self, name: &str) {
        (**self).end_tag(name)
    }

    fn tag_data(&mut self, name: &str, value: &str) {
        (**self).tag_data(name, value)
    }
}

/// Streaming XML reader scoped to a single element.
///
/// The reader passes a source through the [Tokenizer] and makes the
/// [XmlHandler] callbacks only for the first element with the given root
/// tag name and its contents. Anything around that element is skipped,
/// and reading stops as soon as the element is closed, so a single record
/// can be taken out of a larger document or stream.
///
/// Callbacks can also be recorded and replayed later to another handler
/// without parsing the source again.
///
/// # Examples
///
/// ```
/// use xmlstream::{AttributeMap, XmlHandler, XmlReader};
///
/// #[derive(Default)]
/// struct Titles {
///     titles: Vec<String>,
/// }
///
/// impl XmlHandler for Titles {
///     fn tag_data(&mut self, name: &str, value: &str) {
///         if name == "title" {
///             self.titles.push(value.to_string());
///         }
///     }
/// }
///
/// let xml = "<feed><meta><title>skipped</title></meta>\
///            <entry><title> First </title></entry>\
///            <entry><title>Second</title></entry></feed>";
///
/// let mut reader = XmlReader::new(Titles::default());
/// reader.read("entry", xml.as_bytes())?;
/// assert_eq!(reader.handler().titles, vec!["First"]);
/// # Ok::<(), xmlstream::ReadError>(())
/// ```
pub struct XmlReader<H: XmlHandler> {
    handler: H,
    buffer_size: usize,
    root_tag: TagName,
    open_tags: Vec<TagName>,
    root_depth: Option<usize>,
    completed: bool,
    value: TagValue,
    is_recording: bool,
    records: ActionLog,
}

impl<H: XmlHandler> XmlReader<H> {
    pub fn new(handler: H) -> XmlReader<H> {
        XmlReader {
            handler,
            buffer_size: DEFAULT_BUFFER_SIZE,
            root_tag: TagName::new(),
            open_tags: Vec::new(),
            root_depth: None,
            completed: false,
            value: TagValue::new(),
            is_recording: false,
            records: ActionLog::new(),
        }
    }

    /// Sets the size of the blocks read from the source.
    pub fn with_buffer_size(mut self, size: usize) -> XmlReader<H> {
        self.buffer_size = size.max(1);
        self
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Reads the first element named `root_tag` from the source.
    ///
    /// Returns when the element is closed or the source is finished. Not
    /// finding the element is not an error, but a source which is not
    /// well-formed XML up to that point is.
    pub fn read<R: Read>(&mut self, root_tag: &str, source: R) -> Result<(), ReadError> {
        self.begin(root_tag);
        let mut tokenizer = Tokenizer::new(BufReader::with_capacity(self.buffer_size, source));
        let result = tokenizer.run(self);
        match &result {
            Ok(()) if !self.completed => {
                log::debug!("root tag <{}> not found in the source", root_tag);
            }
            Ok(()) => (),
            Err(err) => {
                log::debug!("reading <{}> failed: {}", root_tag, err);
                self.value.clear();
            }
        }
        result
    }

    /// Prepares for a new document sent as [TokenSink] events.
    ///
    /// [read()](XmlReader::read) calls this itself, it is only needed when
    /// the events come from another source.
    pub fn begin(&mut self, root_tag: &str) {
        self.root_tag = root_tag.to_string();
        self.open_tags.clear();
        self.root_depth = None;
        self.completed = false;
        self.value.clear();
    }

    /// Number of tags open at the current point of the document.
    pub fn current_depth(&self) -> usize {
        self.open_tags.len()
    }

    /// Depth of the root tag, if it has been seen.
    pub fn root_depth(&self) -> Option<usize> {
        self.root_depth
    }

    /// Tells if the root tag has been closed.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Starts recording the callbacks made to the handler.
    ///
    /// Previously recorded callbacks are discarded.
    pub fn start_recording(&mut self) {
        log::debug!("recording started");
        self.is_recording = true;
        self.records.clear();
    }

    /// Stops recording and replays the recorded callbacks to the handler.
    ///
    /// Nothing is replayed if recording was not started.
    pub fn stop_recording<O: XmlHandler + ?Sized>(&mut self, other: &mut O) {
        let records = std::mem::take(&mut self.records);
        log::debug!("recording stopped, replaying {} actions", records.len());
        self.is_recording = false;
        records.replay(other);
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Callbacks recorded so far.
    pub fn recorded(&self) -> &[Action] {
        self.records.as_slice()
    }

    fn in_root(&self) -> bool {
        !self.completed
            && self
                .root_depth
                .is_some_and(|depth| depth <= self.open_tags.len())
    }

    fn flush_value(&mut self) {
        let Some(text) = self.value.take_trimmed() else {
            return;
        };
        let Some(name) = self.open_tags.last() else {
            return;
        };
        log::trace!("tag data <{}> {} bytes", name, text.len());
        if self.is_recording {
            self.records.tag_data(name, &text);
        }
        self.handler.tag_data(name, &text);
    }
}

impl<H: XmlHandler> TokenSink for XmlReader<H> {
    fn tag_start(&mut self, name: &str, attributes: &[(TagName, AttrValue)]) {
        self.flush_value();
        self.open_tags.push(name.to_string());
        let depth = self.open_tags.len();
        if self.root_depth.is_none() && name == self.root_tag {
            log::debug!("root tag <{}> found at depth {}", name, depth);
            self.root_depth = Some(depth);
        }
        if self.root_depth.is_some() && !self.completed {
            let attributes = AttributeMap::from_pairs(attributes);
            log::trace!("start tag <{}> with {} attributes", name, attributes.len());
            if self.is_recording {
                self.records.start_tag(name, &attributes);
            }
            self.handler.start_tag(name, &attributes);
        }
    }

    fn tag_end(&mut self, name: &str) {
        self.flush_value();
        let depth = self.open_tags.len();
        if !self.completed {
            if let Some(root_depth) = self.root_depth {
                if root_depth <= depth {
                    log::trace!("end tag <{}>", name);
                    self.handler.end_tag(name);
                    if self.is_recording {
                        self.records.end_tag(name);
                    }
                }
                self.completed = root_depth == depth;
                if self.completed {
                    log::debug!("root tag <{}> completed", name);
                }
            }
        }
        self.open_tags.pop();
    }

    fn char_data(&mut self, bytes: &[u8]) {
        if self.in_root() {
            self.value.append(bytes);
        }
    }

    fn is_done(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests;

/*
** This file is a part of Xmlstream (streaming XML writer and reader)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlstream is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod filter;

use std::fmt::Display;
use std::io::Write;

pub use filter::ByteKind;
pub use filter::ContentFilter;
pub use filter::Escape;
pub use filter::Verbatim;

use crate::TagName;

/// Version written into the XML declaration.
pub const XML_VERSION: &str = "1.0";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Between tags, writes go out as character data.
    None,
    /// Start tag is written up to its name, the `>` is not written yet.
    TagOpen,
    /// Start tag name is being collected from value writes.
    TagNamePending,
    /// Attribute name and the opening quote are written.
    AttributeOpen,
}

/// Incremental XML writer.
///
/// This struct translates a sequence of discrete operations into an XML
/// byte stream written to the sink as it goes. The whole document is never
/// kept in memory, only the names of the currently open tags.
///
/// The writer never fails because of the order of the calls. Operations
/// which make no sense at the time, like an attribute outside of any tag,
/// are ignored. Open tags are closed when the writer is finished or dropped,
/// so the output is well-formed at every point the writer stops.
///
/// Attribute values and text are given with the value writes
/// [value()](XmlWriter::value) and [raw()](XmlWriter::raw), and they are
/// written verbatim unless an escaping [ContentFilter] is installed.
///
/// # Examples
///
/// ```
/// use xmlstream::XmlWriter;
///
/// let mut out = Vec::new();
/// {
///     let mut writer = XmlWriter::new(&mut out);
///     writer.prolog()?;
///     writer.open_tag("doc")?;
///     writer.attribute("id")?;
///     writer.value(42)?;
///     writer.open_tag("empty")?;
///     writer.close_tag()?;
///     writer.text("hello")?;
///     // doc is closed when the writer goes out of scope
/// }
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "<?xml version=\"1.0\"?>\n<doc id=\"42\"><empty/>hello</doc>"
/// );
/// # Ok::<(), std::io::Error>(())
/// ```
///
/// Tag names can be built from runtime data:
/// ```
/// # use xmlstream::XmlWriter;
/// let mut out = Vec::new();
/// {
///     let mut writer = XmlWriter::new(&mut out);
///     writer.open_pending_tag()?;
///     writer.value("item")?;
///     writer.value(7)?;
///     writer.attribute("x")?;
///     writer.value("1")?;
/// }
/// assert_eq!(out, b"<item7 x=\"1\"/>");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct XmlWriter<W: Write, F: ContentFilter = Verbatim> {
    sink: W,
    filter: F,
    state: State,
    tags: Vec<TagName>,
    pending_name: Vec<u8>,
    encoding: Option<String>,
    prolog_written: bool,
    markup_written: bool,
}

impl<W: Write> XmlWriter<W> {
    /// Creates a writer which writes values verbatim.
    pub fn new(sink: W) -> XmlWriter<W> {
        XmlWriter::with_filter(sink, Verbatim)
    }

    /// Creates a writer which names the encoding in the XML declaration.
    ///
    /// The name is only written, no conversion is made on the output.
    pub fn with_encoding(sink: W, encoding: &str) -> XmlWriter<W> {
        let mut writer = XmlWriter::new(sink);
        writer.set_encoding(encoding);
        writer
    }
}

impl<W: Write, F: ContentFilter> XmlWriter<W, F> {
    /// Creates a writer which passes every write through the given filter.
    pub fn with_filter(sink: W, filter: F) -> XmlWriter<W, F> {
        XmlWriter {
            sink,
            filter,
            state: State::None,
            tags: Vec::new(),
            pending_name: Vec::new(),
            encoding: None,
            prolog_written: false,
            markup_written: false,
        }
    }

    /// Sets the encoding name for the XML declaration. Empty name removes it.
    pub fn set_encoding(&mut self, encoding: &str) {
        self.encoding = if encoding.is_empty() {
            None
        } else {
            Some(encoding.to_string())
        };
    }

    /// Number of open tags.
    pub fn depth(&self) -> usize {
        self.tags.iter().filter(|name| !name.is_empty()).count()
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    fn emit(&mut self, kind: ByteKind, bytes: &[u8]) -> std::io::Result<()> {
        self.filter.write(&mut self.sink, kind, bytes)
    }

    fn markup(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.markup_written = true;
        self.emit(ByteKind::Markup, bytes)
    }

    /// Writes the XML declaration.
    ///
    /// Only the first call on a writer has an effect, and only if nothing
    /// else has been written yet.
    pub fn prolog(&mut self) -> std::io::Result<()> {
        if self.prolog_written || self.markup_written || self.state != State::None {
            return Ok(());
        }
        self.markup(b"<?xml version=\"")?;
        self.markup(XML_VERSION.as_bytes())?;
        if let Some(encoding) = self.encoding.clone() {
            self.markup(b"\" encoding=\"")?;
            self.markup(encoding.as_bytes())?;
        }
        self.markup(b"\"?>\n")?;
        self.prolog_written = true;
        Ok(())
    }

    /// Starts a new tag with the given name.
    ///
    /// An unfinished start tag is completed first. Giving an empty name
    /// is same as calling [open_pending_tag()](XmlWriter::open_pending_tag).
    pub fn open_tag(&mut self, name: &str) -> std::io::Result<()> {
        if name.is_empty() {
            return self.open_pending_tag();
        }
        self.finish_opening(false)?;
        self.markup(b"<")?;
        self.markup(name.as_bytes())?;
        self.tags.push(name.to_string());
        self.state = State::TagOpen;
        Ok(())
    }

    /// Starts a new tag whose name is given by the following value writes.
    ///
    /// The name is complete at the next attribute, text, tag, or close call.
    /// If no value is written until then, the tag is dropped.
    pub fn open_pending_tag(&mut self) -> std::io::Result<()> {
        self.finish_opening(false)?;
        self.pending_name.clear();
        self.state = State::TagNamePending;
        Ok(())
    }

    /// Starts an attribute on the current start tag.
    ///
    /// Value of the attribute is given by the following value writes.
    /// Ignored if there is no unfinished start tag.
    pub fn attribute(&mut self, name: &str) -> std::io::Result<()> {
        self.settle_pending_name()?;
        match self.state {
            State::None => return Ok(()),
            State::AttributeOpen => self.markup(b"\"")?,
            State::TagOpen | State::TagNamePending => (),
        }
        self.markup(b" ")?;
        self.markup(name.as_bytes())?;
        self.markup(b"=\"")?;
        self.state = State::AttributeOpen;
        Ok(())
    }

    /// Switches to character data.
    ///
    /// An unfinished start tag is completed as a tag with content, so it
    /// will not be self-closed later, even if no text is written.
    pub fn char_data(&mut self) -> std::io::Result<()> {
        self.settle_pending_name()?;
        self.finish_opening(false)
    }

    /// Switches to character data and writes the value.
    pub fn text<T: Display>(&mut self, value: T) -> std::io::Result<()> {
        self.char_data()?;
        self.value(value)
    }

    /// Writes a value formatted with its [Display] implementation.
    pub fn value<T: Display>(&mut self, value: T) -> std::io::Result<()> {
        self.raw(value.to_string().as_bytes())
    }

    /// Writes bytes as they are.
    ///
    /// Depending on the state, these become a part of the pending tag name,
    /// an attribute value, or character data.
    pub fn raw(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        if self.state == State::TagNamePending {
            self.pending_name.extend_from_slice(bytes);
            return Ok(());
        }
        self.emit(ByteKind::Content, bytes)
    }

    /// Closes the innermost open tag.
    pub fn close_tag(&mut self) -> std::io::Result<()> {
        self.close_tags(None)
    }

    /// Closes open tags up to and including the innermost one with the
    /// given name.
    ///
    /// If no open tag has that name, all open tags are closed.
    pub fn close_tag_named(&mut self, name: &str) -> std::io::Result<()> {
        self.close_tags(Some(name))
    }

    /// Closes all open tags and flushes the sink.
    ///
    /// Dropping the writer does the same but has to ignore the errors.
    pub fn finish(&mut self) -> std::io::Result<()> {
        self.settle_pending_name()?;
        while !self.tags.is_empty() {
            self.close_tags(None)?;
        }
        self.sink.flush()
    }

    fn close_tags(&mut self, name: Option<&str>) -> std::io::Result<()> {
        self.settle_pending_name()?;
        while let Some(top) = self.tags.pop() {
            if top.is_empty() {
                // dropped pending tag, nothing to close
            } else if self.state == State::None {
                self.markup(b"</")?;
                self.markup(top.as_bytes())?;
                self.markup(b">")?;
            } else {
                self.finish_opening(true)?;
            }
            if name.is_none_or(|name| name == top) {
                break;
            }
        }
        Ok(())
    }

    // Turns a collected tag name into a written start tag. A tag left
    // without a name stays on the stack as an empty placeholder, so the
    // close call meant for it does not close its parent.
    fn settle_pending_name(&mut self) -> std::io::Result<()> {
        if self.state != State::TagNamePending {
            return Ok(());
        }
        let name = String::from_utf8_lossy(&self.pending_name).into_owned();
        self.pending_name.clear();
        if name.is_empty() {
            self.tags.push(name);
            self.state = State::None;
            return Ok(());
        }
        self.markup(b"<")?;
        self.markup(name.as_bytes())?;
        self.tags.push(name);
        self.state = State::TagOpen;
        Ok(())
    }

    // Writes the end of an unfinished start tag.
    fn finish_opening(&mut self, self_closed: bool) -> std::io::Result<()> {
        self.settle_pending_name()?;
        match self.state {
            State::None => return Ok(()),
            State::AttributeOpen => self.markup(b"\"")?,
            State::TagOpen | State::TagNamePending => (),
        }
        self.state = State::None;
        if self_closed {
            self.markup(b"/>")
        } else {
            self.markup(b">")
        }
    }
}

impl<W: Write, F: ContentFilter> Drop for XmlWriter<W, F> {
    fn drop(&mut self) {
        if let Err(err) = self.finish() {
            log::warn!("cannot close {} open tags: {}", self.depth(), err);
        }
    }
}

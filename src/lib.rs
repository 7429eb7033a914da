/*
** This file is a part of Xmlstream (streaming XML writer and reader)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlstream is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod echo;
mod entities;
mod reader;
mod values;
mod writer;

pub use values::AttrValue;
pub use values::AttributeMap;
pub use values::Attributes;
pub use values::TagName;
pub use values::TagValue;

pub use writer::ByteKind;
pub use writer::ContentFilter;
pub use writer::Escape;
pub use writer::Verbatim;
pub use writer::XML_VERSION;
pub use writer::XmlWriter;

pub use reader::Action;
pub use reader::ActionLog;
pub use reader::DEFAULT_BUFFER_SIZE;
pub use reader::ReadError;
pub use reader::TokenSink;
pub use reader::Tokenizer;
pub use reader::XmlHandler;
pub use reader::XmlReader;

pub use echo::WriterHandler;

/*
** This file is a part of Xmlstream (streaming XML writer and reader)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlstream is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub mod predefined {
    pub const LT: &[u8] = b"&lt;";
    pub const GT: &[u8] = b"&gt;";
    pub const AMP: &[u8] = b"&amp;";
    pub const APOS: &[u8] = b"&apos;";
    pub const QUOT: &[u8] = b"&quot;";
}

fn replacement(c: u8) -> Option<&'static [u8]> {
    match c {
        b'<' => Some(predefined::LT),
        b'>' => Some(predefined::GT),
        b'&' => Some(predefined::AMP),
        b'\'' => Some(predefined::APOS),
        b'"' => Some(predefined::QUOT),
        _ => None,
    }
}

/// Writes the bytes into the sink with the predefined entities escaped.
///
/// Runs of bytes which need no escaping are written in one call.
pub fn escape(bytes: &[u8], sink: &mut dyn std::io::Write) -> std::io::Result<()> {
    let mut back = 0;
    for (pos, c) in bytes.iter().enumerate() {
        if let Some(entity) = replacement(*c) {
            if back < pos {
                sink.write_all(&bytes[back..pos])?;
            }
            sink.write_all(entity)?;
            back = pos + 1;
        }
    }
    if back < bytes.len() {
        sink.write_all(&bytes[back..])?;
    }
    Ok(())
}

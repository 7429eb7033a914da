/*
** This file is a part of Xmlstream (streaming XML writer and reader)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlstream is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Name of a tag or an attribute.
pub type TagName = String;

/// Value of an attribute.
pub type AttrValue = String;

/// Attributes of a single start tag.
///
/// The map is built fresh for every start tag from the name/value pairs
/// in document order. If a name appears more than once, the last value
/// wins. Iteration is in name order, which is not the document order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AttributeMap {
    map: BTreeMap<TagName, AttrValue>,
}

impl AttributeMap {
    pub fn new() -> AttributeMap {
        AttributeMap {
            map: BTreeMap::new(),
        }
    }

    /// Builds the map from name/value pairs.
    pub fn from_pairs<N, V>(pairs: &[(N, V)]) -> AttributeMap
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .iter()
            .map(|(name, value)| (name.as_ref(), value.as_ref()))
            .collect()
    }

    /// Sets an attribute, returning the previous value if any.
    pub fn insert(&mut self, name: &str, value: &str) -> Option<AttrValue> {
        self.map.insert(name.to_string(), value.to_string())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> Attributes<'_> {
        Attributes {
            inner: self.map.iter(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Iterator over the `(name, value)` pairs of an [AttributeMap].
pub struct Attributes<'a> {
    inner: btree_map::Iter<'a, TagName, AttrValue>,
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Attributes<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Accumulates the character data of an element.
///
/// Character data may arrive in many pieces. They are appended here
/// until a structural event takes the whole block out.
#[derive(Debug, Default)]
pub struct TagValue {
    buffer: Vec<u8>,
}

impl TagValue {
    pub fn new() -> TagValue {
        TagValue { buffer: Vec::new() }
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Takes the collected text out with surrounding whitespace removed.
    ///
    /// Whitespace is the ASCII set including the vertical tab. Returns None
    /// if nothing but whitespace was collected. The buffer is empty
    /// afterwards in both cases.
    pub fn take_trimmed(&mut self) -> Option<String> {
        let result = match self.buffer.iter().position(|c| !is_space(*c)) {
            Some(start) => {
                let end = self
                    .buffer
                    .iter()
                    .rposition(|c| !is_space(*c))
                    .map_or(start, |end| end + 1);
                Some(String::from_utf8_lossy(&self.buffer[start..end]).into_owned())
            }
            None => None,
        };
        self.buffer.clear();
        result
    }
}

fn is_space(c: u8) -> bool {
    c.is_ascii_whitespace() || c == 0x0b
}

/*
** This file is a part of Xmlstream (streaming XML writer and reader)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlstream is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;

fn start(name: &str, attributes: &[(&str, &str)]) -> Action {
    Action::TagStart {
        name: name.to_string(),
        attributes: AttributeMap::from_pairs(attributes),
    }
}

fn data(name: &str, value: &str) -> Action {
    Action::TagData {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn end(name: &str) -> Action {
    Action::TagEnd {
        name: name.to_string(),
    }
}

fn pairs(attributes: &[(&str, &str)]) -> Vec<(TagName, AttrValue)> {
    attributes
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn check(root: &str, xml: &str, expected: &[Action]) {
    let mut reader = XmlReader::new(ActionLog::new());
    assert_eq!(reader.read(root, xml.as_bytes()), Ok(()));
    assert_eq!(reader.handler().as_slice(), expected);

    // now try with the smallest read blocks
    let mut reader = XmlReader::new(ActionLog::new()).with_buffer_size(1);
    assert_eq!(reader.read(root, xml.as_bytes()), Ok(()));
    assert_eq!(reader.handler().as_slice(), expected);
}

fn check_bad(root: &str, xml: &str) -> ActionLog {
    let mut reader = XmlReader::new(ActionLog::new());
    let result = reader.read(root, xml.as_bytes());
    assert!(
        matches!(result, Err(ReadError::BadXml { .. })),
        "{:?} for {:?}",
        result,
        xml
    );
    reader.into_handler()
}

#[test]
fn root_skip() {
    check(
        "target",
        "<wrap><skip/><target>X</target><after/></wrap>",
        &[start("target", &[]), data("target", "X"), end("target")],
    );

    check(
        "target",
        "<?xml version='1.0'?><!-- lead --><wrap a='1'>pre<skip>no</skip>\
         <target/>post</wrap>",
        &[start("target", &[]), end("target")],
    );

    check("zzz", "<a><b>text</b></a>", &[]);
    check("zzz", " \n<a>1</a>\r\n\t", &[]);
}

#[test]
fn nested_content() {
    check(
        "x",
        "<r><x a=\"1\" b='2'>t1<y>t2</y>  tail </x></r>",
        &[
            start("x", &[("a", "1"), ("b", "2")]),
            data("x", "t1"),
            start("y", &[]),
            data("y", "t2"),
            end("y"),
            data("x", "tail"),
            end("x"),
        ],
    );

    check(
        "a",
        "<a><a>in</a></a>",
        &[
            start("a", &[]),
            start("a", &[]),
            data("a", "in"),
            end("a"),
            end("a"),
        ],
    );

    check(
        "ns:rec",
        "<ns:doc xmlns:ns='urn:x'><ns:rec>v</ns:rec></ns:doc>",
        &[start("ns:rec", &[]), data("ns:rec", "v"), end("ns:rec")],
    );
}

#[test]
fn first_record_only() {
    check(
        "rec",
        "<doc><rec id=\"1\">one</rec><rec id=\"2\">two</rec></doc>",
        &[start("rec", &[("id", "1")]), data("rec", "one"), end("rec")],
    );

    // nothing after the record is parsed
    check(
        "rec",
        "<rec>1</rec> trailing <<< junk",
        &[start("rec", &[]), data("rec", "1"), end("rec")],
    );

    check("a", "<a/></b>", &[start("a", &[]), end("a")]);
}

#[test]
fn whitespace() {
    check(
        "a",
        "<a>\n  <b>  </b>\n\t<c> \r\n x  y \n</c></a>",
        &[
            start("a", &[]),
            start("b", &[]),
            end("b"),
            start("c", &[]),
            data("c", "x  y"),
            end("c"),
            end("a"),
        ],
    );
}

#[test]
fn references() {
    check(
        "a",
        "<a>ab&amp;cd&#33; &lt;x&gt;</a>",
        &[start("a", &[]), data("a", "ab&cd! <x>"), end("a")],
    );

    check(
        "a",
        "<a q=\"x&amp;y\" n='&#65;' r=\"&lt;&gt;&quot;\"/>",
        &[
            start("a", &[("q", "x&y"), ("n", "A"), ("r", "<>\"")]),
            end("a"),
        ],
    );

    check(
        "a",
        "<a><![CDATA[<raw> & ]]>tail</a>",
        &[start("a", &[]), data("a", "<raw> & tail"), end("a")],
    );
}

#[test]
fn bad_xml() {
    check_bad("a", "<a><b></a>");
    check_bad("a", "<a></b>");
    check_bad("a", "<a>");
    check_bad("zzz", "<a><b/>");
    check_bad("a", "");
    check_bad("a", "  \n ");
    check_bad("a", "<a>&bogus;</a>");

    // content outside of the document element
    check_bad("b", "junk<a>x</a>");
    check_bad("b", "<x/>text<b>z</b>");
    check_bad("b", "&amp;<b/>");
    check_bad("zzz", "<a>1</a> tail");
    let log = check_bad("b", "<a/><b>y</b>");
    assert!(log.is_empty());

    let log = check_bad("r", "<r><a>1</a><b></r>");
    assert_eq!(
        log.as_slice(),
        &[
            start("r", &[]),
            start("a", &[]),
            data("a", "1"),
            end("a"),
            start("b", &[]),
        ]
    );
}

#[test]
fn char_data_coalescing() {
    let mut reader = XmlReader::new(ActionLog::new());
    reader.begin("a");
    reader.tag_start("a", &[]);
    reader.char_data(b"ab");
    reader.char_data(b"cd");
    reader.tag_end("a");
    assert_eq!(
        reader.handler().as_slice(),
        &[start("a", &[]), data("a", "abcd"), end("a")]
    );

    let mut reader = XmlReader::new(ActionLog::new());
    reader.begin("a");
    reader.tag_start("a", &[]);
    reader.char_data(b"  one ");
    reader.char_data(b" two  ");
    reader.tag_start("b", &[]);
    reader.char_data(b"\n");
    reader.tag_end("b");
    assert_eq!(
        reader.handler().as_slice(),
        &[start("a", &[]), data("a", "one  two"), start("b", &[]), end("b")]
    );
}

#[test]
fn depth_tracking() {
    let mut reader = XmlReader::new(ActionLog::new());
    reader.begin("r");
    assert_eq!(reader.current_depth(), 0);
    assert_eq!(reader.root_depth(), None);

    reader.tag_start("w", &pairs(&[("k", "v")]));
    reader.char_data(b"outside");
    reader.tag_start("s", &[]);
    reader.tag_end("s");
    assert_eq!(reader.current_depth(), 1);
    assert_eq!(reader.root_depth(), None);

    reader.tag_start("r", &pairs(&[("k", "1"), ("k", "2")]));
    assert_eq!(reader.current_depth(), 2);
    assert_eq!(reader.root_depth(), Some(2));
    reader.tag_start("r", &[]);
    assert_eq!(reader.root_depth(), Some(2));
    reader.tag_end("r");
    assert!(!reader.is_completed());
    reader.tag_end("r");
    assert!(reader.is_completed());
    assert_eq!(reader.current_depth(), 1);

    // everything after the root is ignored
    reader.tag_start("late", &[]);
    reader.char_data(b"late");
    reader.tag_end("late");
    reader.tag_end("w");
    assert!(reader.is_completed());
    assert_eq!(reader.current_depth(), 0);

    assert_eq!(
        reader.handler().as_slice(),
        &[start("r", &[("k", "2")]), start("r", &[]), end("r"), end("r")]
    );
}

#[test]
fn recording() {
    let xml = "<doc><item k=\"v\">one<sub>two</sub></item><tail/></doc>";

    let mut reader = XmlReader::new(ActionLog::new());
    reader.start_recording();
    assert!(reader.is_recording());
    reader.read("doc", xml.as_bytes()).unwrap();
    assert_eq!(reader.recorded(), reader.handler().as_slice());
    assert_eq!(reader.recorded().len(), 10);

    let mut replayed = ActionLog::new();
    reader.stop_recording(&mut replayed);
    assert!(!reader.is_recording());
    assert!(reader.recorded().is_empty());

    let mut direct = XmlReader::new(ActionLog::new());
    direct.read("doc", xml.as_bytes()).unwrap();
    assert_eq!(replayed, *direct.handler());
    assert_eq!(replayed, *reader.handler());
}

#[test]
fn recording_not_started() {
    let mut reader = XmlReader::new(ActionLog::new());
    reader.read("a", "<a>x</a>".as_bytes()).unwrap();
    let mut other = ActionLog::new();
    reader.stop_recording(&mut other);
    assert!(other.is_empty());
    assert_eq!(reader.handler().len(), 3);
}

#[test]
fn recording_part() {
    let mut reader = XmlReader::new(ActionLog::new());
    reader.begin("r");
    reader.tag_start("r", &[]);
    reader.char_data(b" early ");
    reader.start_recording();
    reader.tag_start("x", &pairs(&[("k", "v")]));
    reader.char_data(b"ab");
    reader.char_data(b"cd");
    reader.tag_end("x");

    let mut other = ActionLog::new();
    reader.stop_recording(&mut other);
    reader.tag_start("y", &[]);
    reader.tag_end("y");
    reader.tag_end("r");

    assert_eq!(
        other.as_slice(),
        &[
            data("r", "early"),
            start("x", &[("k", "v")]),
            data("x", "abcd"),
            end("x"),
        ]
    );
    assert_eq!(reader.handler().len(), 8);
    assert!(reader.recorded().is_empty());
}

#[test]
fn reader_reuse() {
    let mut log = ActionLog::new();
    {
        let mut reader = XmlReader::new(&mut log).with_buffer_size(0);
        reader.read("b", "<a>x</a>".as_bytes()).unwrap();
        assert!(!reader.is_completed());
        assert_eq!(reader.root_depth(), None);

        reader.read("b", "<b>y</b>".as_bytes()).unwrap();
        assert!(reader.is_completed());
        assert_eq!(reader.root_depth(), Some(1));
    }
    assert_eq!(
        log.as_slice(),
        &[start("b", &[]), data("b", "y"), end("b")]
    );
}

#[test]
fn tokenizer_events() {
    let mut log = ActionLog::new();
    let mut tokenizer = Tokenizer::new("<a x='1'><b/>t</a>".as_bytes());
    let mut reader = XmlReader::new(&mut log);
    reader.begin("a");
    assert_eq!(tokenizer.step(&mut reader), Ok(true));
    assert_eq!(reader.current_depth(), 1);
    tokenizer.run(&mut reader).unwrap();
    assert!(reader.is_completed());
    assert_eq!(tokenizer.position(), 18);
    drop(reader);
    assert_eq!(
        log.as_slice(),
        &[
            start("a", &[("x", "1")]),
            start("b", &[]),
            end("b"),
            data("a", "t"),
            end("a"),
        ]
    );
}

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
use std::env;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::process::ExitCode;

use xmlstream::AttributeMap;
use xmlstream::ContentFilter;
use xmlstream::DEFAULT_BUFFER_SIZE;
use xmlstream::Escape;
use xmlstream::ReadError;
use xmlstream::Verbatim;
use xmlstream::WriterHandler;
use xmlstream::XmlHandler;
use xmlstream::XmlReader;
use xmlstream::XmlWriter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("xmlcut (xmlstream) v{}", VERSION);
}

fn print_usage() {
    println!(
        concat!(
            "Usage: xmlcut -r <NAME> [OPTIONS] [FILE.xml...]\n",
            "This tool prints the first element with the given name from XML documents.\n",
            "Options:\n",
            "  -r, --root <NAME>    Name of the element to cut out\n",
            "  -p, --prolog         Print an XML declaration before each element\n",
            "  -e, --encoding <ENC> Encoding name for the XML declaration\n",
            "  -x, --raw            Write the text without escaping markup characters\n",
            "  -s, --stat           Element statistics\n",
            "  -b, --buffer <SIZE>  File read buffer size in bytes (default: {})\n",
            "  -h, --help           Display this help message and exit\n",
            "  -v, --version        Display the version and exit"
        ),
        DEFAULT_BUFFER_SIZE
    );
}

#[derive(Default)]
struct Stats {
    nr_tags: usize,
    nr_attributes: usize,
    nr_cdata_size: usize,
    level: usize,
    max_depth: usize,
    tag_map: BTreeMap<String, usize>,
}

impl Stats {
    fn report(&mut self, file: &str) {
        eprintln!(
            "{}: tags: {}, attributes: {}, max depth: {}, character data: {} bytes",
            file, self.nr_tags, self.nr_attributes, self.max_depth, self.nr_cdata_size
        );
        for (tag, count) in self.tag_map.iter() {
            eprintln!("  {}: {}", tag, count);
        }
        *self = Stats::default();
    }
}

impl XmlHandler for Stats {
    fn start_tag(&mut self, name: &str, attributes: &AttributeMap) {
        self.nr_tags += 1;
        self.nr_attributes += attributes.len();
        self.level += 1;
        self.max_depth = self.max_depth.max(self.level);
        *self.tag_map.entry(name.to_string()).or_insert(0) += 1;
    }

    fn end_tag(&mut self, _name: &str) {
        self.level = self.level.saturating_sub(1);
    }

    fn tag_data(&mut self, _name: &str, value: &str) {
        self.nr_cdata_size += value.len();
    }
}

enum CutError {
    Io(std::io::Error),
    Read(ReadError),
}

impl From<std::io::Error> for CutError {
    fn from(err: std::io::Error) -> Self {
        CutError::Io(err)
    }
}

impl From<ReadError> for CutError {
    fn from(err: ReadError) -> Self {
        CutError::Read(err)
    }
}

struct Options {
    root: String,
    prolog: bool,
    encoding: Option<String>,
    raw: bool,
    stats: bool,
    buffer_size: usize,
}

impl Options {
    fn new() -> Self {
        Options {
            root: String::new(),
            prolog: false,
            encoding: None,
            raw: false,
            stats: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

struct Cutter {
    options: Options,
    stats: Stats,
}

impl Cutter {
    fn new(options: Options) -> Self {
        Cutter {
            options,
            stats: Stats::default(),
        }
    }

    fn cut_with<F: ContentFilter>(
        &mut self,
        source: Box<dyn Read>,
        out: &mut dyn Write,
        filter: F,
    ) -> Result<bool, CutError> {
        let mut writer = XmlWriter::with_filter(&mut *out, filter);
        if let Some(encoding) = &self.options.encoding {
            writer.set_encoding(encoding);
        }
        if self.options.prolog {
            writer.prolog()?;
        }
        let mut reader = XmlReader::new(WriterHandler::new(&mut writer))
            .with_buffer_size(self.options.buffer_size);
        if self.options.stats {
            reader.start_recording();
        }
        reader.read(&self.options.root, source)?;
        let found = reader.is_completed();
        if self.options.stats {
            reader.stop_recording(&mut self.stats);
        }
        reader.into_handler().finish()?;
        drop(writer);
        if found {
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(found)
    }

    fn cut_source(&mut self, file: &str, is_stream: bool) -> Result<bool, CutError> {
        let source: Box<dyn Read> = if is_stream {
            Box::new(stdin())
        } else {
            Box::new(File::open(file)?)
        };
        self.cut(source, &mut stdout().lock())
    }

    fn cut(&mut self, source: Box<dyn Read>, out: &mut dyn Write) -> Result<bool, CutError> {
        if self.options.raw {
            self.cut_with(source, out, Verbatim)
        } else {
            self.cut_with(source, out, Escape)
        }
    }

    fn cut_file(&mut self, file: &str, is_stream: bool) -> bool {
        match self.cut_source(file, is_stream) {
            Ok(found) => {
                if !found {
                    eprintln!("No <{}> element in '{}'", self.options.root, file);
                }
                if self.options.stats {
                    self.stats.report(file);
                }
                found
            }
            Err(CutError::Io(e)) => {
                eprintln!("Error reading file '{}': {}", file, e);
                false
            }
            Err(CutError::Read(e)) => {
                eprintln!("Error in file '{}': {}", file, e);
                false
            }
        }
    }
}

fn main() -> ExitCode {
    let mut args = env::args();

    let mut files = Vec::new();
    let mut root = None;
    let mut options = Options::new();

    // Skip the first argument (program name)
    args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-r" | "--root" => {
                if let Some(name) = args.next() {
                    root = Some(name);
                } else {
                    eprintln!("Missing root element name");
                    return ExitCode::FAILURE;
                }
            }
            "-p" | "--prolog" => {
                options.prolog = true;
            }
            "-e" | "--encoding" => {
                if let Some(encoding) = args.next() {
                    options.encoding = Some(encoding);
                } else {
                    eprintln!("Missing encoding name");
                    return ExitCode::FAILURE;
                }
            }
            "-x" | "--raw" => {
                options.raw = true;
            }
            "-s" | "--stat" => {
                options.stats = true;
            }
            "-b" | "--buffer" => {
                if let Some(size) = args.next() {
                    if let Ok(size) = size.parse::<usize>() {
                        options.buffer_size = size;
                    } else {
                        eprintln!("Invalid buffer size");
                        return ExitCode::FAILURE;
                    }
                } else {
                    eprintln!("Missing buffer size");
                    return ExitCode::FAILURE;
                }
            }
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            _ => {
                files.push(arg);
            }
        }
    }

    match root {
        Some(name) if !name.is_empty() => options.root = name,
        _ => {
            eprintln!("Root element name is required, see --help");
            return ExitCode::FAILURE;
        }
    }

    let mut cutter = Cutter::new(options);
    if files.is_empty() {
        if !cutter.cut_file("stdin", true) {
            return ExitCode::FAILURE;
        }
    } else {
        for file in files {
            if !cutter.cut_file(&file, false) {
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut(options: Options, xml: &'static str) -> String {
        let mut cutter = Cutter::new(options);
        let mut out = Vec::new();
        assert!(matches!(cutter.cut(Box::new(xml.as_bytes()), &mut out), Ok(true)));
        String::from_utf8(out).unwrap()
    }

    fn options(root: &str) -> Options {
        let mut options = Options::new();
        options.root = root.to_string();
        options
    }

    #[test]
    fn escaped_by_default() {
        let xml = "<doc><a k='&quot;&amp;'>&lt;x&gt; &amp; y</a></doc>";
        assert_eq!(
            cut(options("a"), xml),
            "<a k=\"&quot;&amp;\">&lt;x&gt; &amp; y</a>\n"
        );

        let mut raw = options("a");
        raw.raw = true;
        assert_eq!(cut(raw, xml), "<a k=\"\"&\"><x> & y</a>\n");
    }

    #[test]
    fn prolog_and_stats() {
        let mut with_prolog = options("b");
        with_prolog.prolog = true;
        with_prolog.encoding = Some("UTF-8".to_string());
        with_prolog.stats = true;
        let mut cutter = Cutter::new(with_prolog);
        let mut out = Vec::new();
        let xml = "<a><b x='1'><c/><c>t</c></b></a>";
        assert!(matches!(cutter.cut(Box::new(xml.as_bytes()), &mut out), Ok(true)));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<b x=\"1\"><c/><c>t</c></b>\n"
        );
        assert_eq!(cutter.stats.nr_tags, 3);
        assert_eq!(cutter.stats.nr_attributes, 1);
        assert_eq!(cutter.stats.max_depth, 2);
        assert_eq!(cutter.stats.nr_cdata_size, 1);
    }
}

// This is a part of rust-encoding.
// Copyright (c) 2014-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::str;

use encoding_custom::{ErrorPolicy, Registry, StreamReader, StreamWriter};
use getopts::Options;

const CHUNK_CHARS: usize = 4096;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let mut opts = Options::new();
    opts.optopt("f", "from-code", "set input encoding (default: utf-8)", "NAME");
    opts.optopt("t", "to-code", "set output encoding (default: utf-8)", "NAME");
    opts.optopt("e", "error-policy",
                "set error policy (one of strict, ignore, replace)", "POLICY");
    opts.optflag("c", "", "same as `--error-policy=ignore`");
    opts.optopt("o", "output", "output file", "FILE");
    opts.optflag("h", "help", "print this help menu");

    let matches = opts.parse(&args[1..])?;
    if matches.opt_present("h") {
        println!("{}", opts.usage("Converts between UTF-8 and x-user-defined or replacement."));
        return Ok(());
    }

    let registry = Registry::default();
    let lookup = |name: Option<String>| -> Result<_, String> {
        match name.as_ref().map(|s| &s[..]) {
            Some("utf-8") | None => Ok(None),
            Some(name) => match registry.lookup(name) {
                Some(enc) => Ok(Some(enc)),
                None => Err(format!("unknown encoding {} (known: utf-8, {})",
                                    name, registry.names().join(", "))),
            },
        }
    };
    let inenc = lookup(matches.opt_str("f"))?;
    let outenc = lookup(matches.opt_str("t"))?;

    let mut policy = match matches.opt_str("e") {
        Some(name) => name.parse::<ErrorPolicy>()?,
        None => ErrorPolicy::Strict,
    };
    if matches.opt_present("c") {
        policy = ErrorPolicy::Ignore;
    }

    let input = match matches.free.first().map(|s| &s[..]) {
        Some("-") | None => Box::new(io::stdin()) as Box<dyn Read>,
        Some(f) => Box::new(File::open(f)?) as Box<dyn Read>,
    };
    let output = match matches.opt_str("o").as_ref().map(|s| &s[..]) {
        Some("-") | None => Box::new(io::stdout()) as Box<dyn Write>,
        Some(f) => Box::new(File::create(f)?) as Box<dyn Write>,
    };

    let mut reader: Box<dyn FnMut() -> io::Result<String>> = match inenc {
        Some(enc) => {
            let mut reader = StreamReader::new(input, &*enc, policy);
            Box::new(move || reader.read_text(Some(CHUNK_CHARS)))
        }
        None => {
            // complete UTF-8 sequences are passed on, a split one waits for the next chunk
            let mut input = BufReader::new(input);
            let mut carry = Vec::new();
            Box::new(move || loop {
                let nread = {
                    let chunk = input.fill_buf()?;
                    carry.extend_from_slice(chunk);
                    chunk.len()
                };
                input.consume(nread);
                let valid = match str::from_utf8(&carry) {
                    Ok(_) => carry.len(),
                    Err(e) if nread > 0 && e.error_len().is_none() => e.valid_up_to(),
                    Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
                };
                let text = String::from_utf8(carry.drain(..valid).collect())
                                  .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                if !text.is_empty() || nread == 0 {
                    return Ok(text);
                }
            })
        }
    };

    match outenc {
        Some(enc) => {
            let mut writer = StreamWriter::new(output, &*enc, policy);
            loop {
                let text = reader()?;
                if text.is_empty() { break; }
                writer.write_text(&text)?;
            }
            writer.finish()?;
        }
        None => {
            let mut output = output;
            loop {
                let text = reader()?;
                if text.is_empty() { break; }
                output.write_all(text.as_bytes())?;
            }
            output.flush()?;
        }
    }
    Ok(())
}

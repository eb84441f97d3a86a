//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod config;
mod error;

use std::io::Read;

use bytes::Bytes;
use clap::{App, Arg};
use config::{Config, LoggingFmtStyle};
use error::Error;
use holo_isis_hello::field::Field;
use holo_isis_hello::packet::pdu::dissect_pdu;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::prelude::*;

// Output format of the decoded packets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(config: &config::Logging) -> Result<(), Error> {
    let directive = config
        .stderr
        .filter
        .parse::<Directive>()
        .map_err(|_| Error::InvalidLogFilter(config.stderr.filter.clone()))?;

    // Enable logging to stderr, leaving stdout for the decoded packets.
    let stderr = config.stderr.enabled.then(|| {
        let log_level_filter = LevelFilter::from_level(tracing::Level::TRACE);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(config.stderr.fmt.show_source)
            .with_line_number(config.stderr.fmt.show_source)
            .with_ansi(config.stderr.fmt.colors);
        let layer = match config.stderr.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        };
        layer.with_filter(log_level_filter)
    });

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr)
        .init();

    Ok(())
}

// Reads the input PDUs.
//
// Binary input holds a single PDU. Hex input holds one PDU per non-empty
// line, with bytes optionally separated by spaces, commas or colons, and
// optionally prefixed by "0x".
fn read_input(filename: Option<&str>, hex: bool) -> Result<Vec<Bytes>, Error> {
    let mut data = vec![];
    match filename {
        Some(filename) => {
            data = std::fs::read(filename)?;
        }
        None => {
            std::io::stdin().read_to_end(&mut data)?;
        }
    }

    if !hex {
        return Ok(vec![Bytes::from(data)]);
    }

    String::from_utf8_lossy(&data)
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            decode_hex(line).map_err(|error| Error::InvalidHex(idx + 1, error))
        })
        .collect()
}

// Decodes one line of hex text.
fn decode_hex(line: &str) -> Result<Bytes, hex::FromHexError> {
    let digits = line
        .split(|c: char| c.is_whitespace() || c == ',' || c == ':')
        .map(|token| token.trim_start_matches("0x"))
        .collect::<String>();
    hex::decode(digits).map(Bytes::from)
}

fn print_pdu(pdu: &Field, format: OutputFormat) -> Result<(), Error> {
    match format {
        OutputFormat::Text => print!("{}", pdu.render()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(pdu)?),
    }
    Ok(())
}

fn run() -> Result<(), Error> {
    // Parse command-line parameters.
    let matches = App::new("IS-IS Hello dump")
        .about("Decode IS-IS Hello PDUs into a field tree")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("file")
                .help("Specify an alternative configuration file."),
        )
        .arg(
            Arg::with_name("format")
                .long("format")
                .value_name("format")
                .possible_values(&["text", "json"])
                .default_value("text")
                .help("Output format."),
        )
        .arg(
            Arg::with_name("hex")
                .long("hex")
                .help("Read hex text, one PDU per line, instead of binary data."),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Input file path (defaults to stdin)")
                .index(1),
        )
        .get_matches();
    let format = match matches.value_of("format") {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    // Read configuration file.
    let config_file = matches.value_of("config");
    let config = Config::load(config_file)?;

    // Initialize tracing.
    init_tracing(&config.logging)?;

    // Decode and print the input PDUs.
    let input = read_input(matches.value_of("INPUT"), matches.is_present("hex"))?;
    for buf in input {
        let pdu = dissect_pdu(&buf, &config.dissector);
        print_pdu(&pdu, format)?;
    }

    Ok(())
}

// ===== main =====

fn main() {
    if let Err(error) = run() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

// ===== unit tests =====

//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

// Dump tool errors.
#[derive(Debug)]
pub enum Error {
    ConfigParse(String, toml::de::Error),
    InvalidLogFilter(String),
    InputRead(std::io::Error),
    InvalidHex(usize, hex::FromHexError),
    OutputEncode(serde_json::Error),
}

// ===== impl Error =====

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ConfigParse(path, error) => {
                write!(f, "failed to parse configuration file {}: {}", path, error)
            }
            Error::InvalidLogFilter(filter) => {
                write!(f, "invalid log filter: {}", filter)
            }
            Error::InputRead(error) => {
                write!(f, "failed to read input: {}", error)
            }
            Error::InvalidHex(line, error) => {
                write!(f, "invalid hex data at line {}: {}", line, error)
            }
            Error::OutputEncode(error) => {
                write!(f, "failed to encode output: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigParse(_, error) => Some(error),
            Error::InputRead(error) => Some(error),
            Error::InvalidHex(_, error) => Some(error),
            Error::OutputEncode(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::InputRead(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::OutputEncode(error)
    }
}

//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use tracing::{Level, debug, debug_span, enabled, trace};

use crate::field::Field;
use crate::packet::HelloVariant;
use crate::packet::error::DecodeError;

// IS-IS Hello dissector debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    // Hello decoding
    HelloDecodeStart(HelloVariant, usize),
    HelloDecodingDisabled(HelloVariant),
    HelloDecodeFinish(HelloVariant, &'a Field),
    // CLVs
    ClvUnknown(&'static str, u8, u8),
    // Errors
    MalformedRecord(usize, &'a DecodeError),
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub(crate) fn log(&self) {
        match self {
            Debug::HelloDecodeStart(variant, length) => {
                debug_span!("hello", %variant).in_scope(|| {
                    debug!(%length, "{}", self);
                })
            }
            Debug::HelloDecodingDisabled(variant) => {
                debug_span!("hello", %variant).in_scope(|| {
                    debug!("{}", self);
                })
            }
            Debug::HelloDecodeFinish(variant, field) => {
                debug_span!("hello", %variant).in_scope(|| {
                    let malformed =
                        field.iter().filter(|field| field.is_malformed()).count();
                    debug!(%malformed, "{}", self);
                    // The whole tree is only serialized when tracing it.
                    if enabled!(Level::TRACE)
                        && let Ok(data) = serde_json::to_string(field)
                    {
                        trace!(%data, "{}", self);
                    }
                })
            }
            Debug::ClvUnknown(registry, clv_type, clv_len) => {
                debug!(%registry, %clv_type, %clv_len, "{}", self);
            }
            Debug::MalformedRecord(offset, error) => {
                debug!(%offset, %error, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::HelloDecodeStart(..) => {
                write!(f, "decoding hello")
            }
            Debug::HelloDecodingDisabled(..) => {
                write!(f, "hello decoding disabled, passing data through")
            }
            Debug::HelloDecodeFinish(..) => {
                write!(f, "hello decoded")
            }
            Debug::ClvUnknown(..) => {
                write!(f, "unknown CLV")
            }
            Debug::MalformedRecord(..) => {
                write!(f, "malformed packet")
            }
        }
    }
}

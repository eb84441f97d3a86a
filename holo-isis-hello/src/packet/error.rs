//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use serde::{Deserialize, Serialize};

use crate::packet::consts::PduType;

// Type aliases.
pub type DecodeResult<T> = Result<T, DecodeError>;

// IS-IS Hello decoding errors.
//
// None of these abort the decoding as a whole. Each one ends up as a terminal
// record in the field tree, at the point where it was detected.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum DecodeError {
    // Buffer access
    Truncated { offset: usize, length: usize },
    // Common header
    InvalidIrdpDiscriminator(u8),
    InvalidHeaderLength(u8),
    InvalidVersion(u8),
    InvalidIdLength(u8),
    UnknownPduType(u8),
    UnsupportedPduType(PduType),
    // Hello header
    HeaderExceedsPduLength { header_len: u16, pdu_len: u16 },
    // CLV region
    ClvLengthExceedsRegion { clv_type: u8, length: u8, remaining: usize },
    ClvTrailingByte,
    // CLVs
    InvalidClvLength(u8),
    AreaAddrNoPayload,
    AreaAddrTooShort { length: u8, remaining: usize },
    ShortIsNeighbor(u8),
    ShortIpv4InterfaceAddr(u8),
    ShortIpv6InterfaceAddr(u8),
    MissingAuthType,
    InvalidMultiTopologyLength(u8),
    InvalidPtpAdjLength(u8),
}

// Broad classes of decoding errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeErrorKind {
    // A read went past the end of the available data.
    Truncated,
    // A declared length doesn't agree with the data or with the rules of the
    // field that carries it.
    InconsistentLength,
    // A fixed field holds a value that can't be interpreted.
    InvalidValue,
}

// ===== impl DecodeError =====

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::Truncated { .. } => DecodeErrorKind::Truncated,
            DecodeError::InvalidIrdpDiscriminator(..)
            | DecodeError::InvalidVersion(..)
            | DecodeError::InvalidIdLength(..)
            | DecodeError::UnknownPduType(..)
            | DecodeError::UnsupportedPduType(..) => {
                DecodeErrorKind::InvalidValue
            }
            DecodeError::InvalidHeaderLength(..)
            | DecodeError::HeaderExceedsPduLength { .. }
            | DecodeError::ClvLengthExceedsRegion { .. }
            | DecodeError::ClvTrailingByte
            | DecodeError::InvalidClvLength(..)
            | DecodeError::AreaAddrNoPayload
            | DecodeError::AreaAddrTooShort { .. }
            | DecodeError::ShortIsNeighbor(..)
            | DecodeError::ShortIpv4InterfaceAddr(..)
            | DecodeError::ShortIpv6InterfaceAddr(..)
            | DecodeError::MissingAuthType
            | DecodeError::InvalidMultiTopologyLength(..)
            | DecodeError::InvalidPtpAdjLength(..) => {
                DecodeErrorKind::InconsistentLength
            }
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Truncated { offset, length } => {
                write!(
                    f,
                    "truncated packet: {} byte(s) at offset {} exceed the available data",
                    length, offset
                )
            }
            DecodeError::InvalidIrdpDiscriminator(discriminator) => {
                write!(f, "invalid IDRP discriminator: {}", discriminator)
            }
            DecodeError::InvalidHeaderLength(hdr_len) => {
                write!(f, "invalid header length: {}", hdr_len)
            }
            DecodeError::InvalidVersion(version) => {
                write!(f, "invalid version: {}", version)
            }
            DecodeError::InvalidIdLength(id_len) => {
                write!(f, "invalid ID length: {}", id_len)
            }
            DecodeError::UnknownPduType(pdu_type) => {
                write!(f, "unknown PDU type: {}", pdu_type)
            }
            DecodeError::UnsupportedPduType(pdu_type) => {
                write!(f, "unsupported PDU type: {}", pdu_type)
            }
            DecodeError::HeaderExceedsPduLength {
                header_len,
                pdu_len,
            } => {
                write!(
                    f,
                    "header length exceeds declared PDU length ({} vs {})",
                    header_len, pdu_len
                )
            }
            DecodeError::ClvLengthExceedsRegion {
                clv_type,
                length,
                remaining,
            } => {
                write!(
                    f,
                    "malformed CLV, length exceeds region (type {}, length {}, {} byte(s) left)",
                    clv_type, length, remaining
                )
            }
            DecodeError::ClvTrailingByte => {
                write!(f, "malformed CLV, dangling trailing byte")
            }
            DecodeError::InvalidClvLength(clv_len) => {
                write!(f, "invalid CLV length: {}", clv_len)
            }
            DecodeError::AreaAddrNoPayload => {
                write!(f, "short address (no length for payload)")
            }
            DecodeError::AreaAddrTooShort { length, remaining } => {
                write!(
                    f,
                    "short address, packet says {}, we have {} left",
                    length, remaining
                )
            }
            DecodeError::ShortIsNeighbor(clv_len) => {
                write!(f, "short is neighbor ({} vs 6)", clv_len)
            }
            DecodeError::ShortIpv4InterfaceAddr(clv_len) => {
                write!(f, "short IPv4 interface address ({} vs 4)", clv_len)
            }
            DecodeError::ShortIpv6InterfaceAddr(clv_len) => {
                write!(f, "short IPv6 interface address ({} vs 16)", clv_len)
            }
            DecodeError::MissingAuthType => {
                write!(f, "missing authentication type")
            }
            DecodeError::InvalidMultiTopologyLength(clv_len) => {
                write!(f, "malformed MT-ID ({} vs multiple of 2)", clv_len)
            }
            DecodeError::InvalidPtpAdjLength(clv_len) => {
                write!(f, "malformed TLV ({} vs 1,5,11,15)", clv_len)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

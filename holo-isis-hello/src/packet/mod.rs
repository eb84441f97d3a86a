//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

pub mod clv;
pub mod consts;
pub mod cursor;
pub mod data;
pub mod error;
pub mod hello;
pub mod pdu;
pub mod registry;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::debug::Debug;
use crate::field::Field;
use crate::packet::consts::PduType;
use crate::packet::cursor::ByteCursor;
use crate::packet::error::{DecodeError, DecodeResult};

// IS-IS Hello PDU variant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum HelloVariant {
    Level1,
    Level2,
    PointToPoint,
}

// Represents an IS-IS Area Address.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct AreaAddr(SmallVec<[u8; 13]>);

// Represents an IS-IS System ID.
//
// The ID length is a per-domain parameter, so the number of bytes isn't fixed.
// A trailing odd byte, as found in LAN IDs, is the pseudonode ID.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct SystemId(SmallVec<[u8; 8]>);

// ===== impl HelloVariant =====

impl HelloVariant {
    // Length of the fields that precede the Hello-specific header.
    pub const COMMON_HEADER_LEN: u16 = 8;

    pub const fn from_pdu_type(pdu_type: PduType) -> Option<Self> {
        match pdu_type {
            PduType::HelloLanL1 => Some(HelloVariant::Level1),
            PduType::HelloLanL2 => Some(HelloVariant::Level2),
            PduType::HelloP2P => Some(HelloVariant::PointToPoint),
            _ => None,
        }
    }

    // Returns the length of the fixed header, common header included, for
    // the given ID length.
    pub const fn header_length(&self, id_len: u8) -> u16 {
        let id_len = id_len as u16;
        // Circuit type, source ID, holding time and PDU length.
        let len = Self::COMMON_HEADER_LEN + 1 + id_len + 2 + 2;
        match self {
            // Local circuit ID.
            HelloVariant::PointToPoint => len + 1,
            // Priority and LAN ID.
            HelloVariant::Level1 | HelloVariant::Level2 => len + 1 + id_len + 1,
        }
    }
}

impl std::fmt::Display for HelloVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HelloVariant::Level1 => write!(f, "L1 LAN Hello"),
            HelloVariant::Level2 => write!(f, "L2 LAN Hello"),
            HelloVariant::PointToPoint => write!(f, "P2P Hello"),
        }
    }
}

// ===== impl AreaAddr =====

impl AreaAddr {
    pub const MAX_LEN: u8 = 13;
}

impl AsRef<[u8]> for AreaAddr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for AreaAddr {
    fn from(bytes: &[u8]) -> AreaAddr {
        AreaAddr(SmallVec::from_slice(bytes))
    }
}

impl std::fmt::Display for AreaAddr {
    // The AFI comes first, followed by the remaining bytes in groups of two.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some((afi, rest)) = self.0.split_first() else {
            return Ok(());
        };
        write!(f, "{:02x}", afi)?;
        for group in rest.chunks(2) {
            f.write_str(".")?;
            for byte in group {
                write!(f, "{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

// ===== impl SystemId =====

impl SystemId {
    pub(crate) fn decode(
        cursor: &ByteCursor<'_>,
        offset: usize,
        len: usize,
    ) -> DecodeResult<Self> {
        let bytes = cursor.read_bytes(offset, len)?;
        Ok(SystemId(SmallVec::from_slice(bytes)))
    }
}

impl AsRef<[u8]> for SystemId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for SystemId {
    fn from(bytes: &[u8]) -> SystemId {
        SystemId(SmallVec::from_slice(bytes))
    }
}

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, group) in self.0.chunks(2).enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            for byte in group {
                write!(f, "{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

// ===== helper functions =====

// Creates and logs a malformed-packet record.
pub(crate) fn malformed_record(
    offset: usize,
    length: usize,
    error: DecodeError,
) -> Field {
    Debug::MalformedRecord(offset, &error).log();
    Field::malformed(offset, length, error)
}

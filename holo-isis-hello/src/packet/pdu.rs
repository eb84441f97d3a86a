//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use bytes::Bytes;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::HelloConfig;
use crate::field::Field;
use crate::packet::consts::{
    IDRP_DISCRIMINATOR, MAX_ID_LEN, PduType, SYSTEM_ID_LEN, VERSION,
    VERSION_PROTO_EXT,
};
use crate::packet::cursor::ByteCursor;
use crate::packet::error::{DecodeError, DecodeResult};
use crate::packet::{HelloVariant, data, hello, malformed_record};

// IS-IS common PDU header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Header {
    pub header_len: u8,
    // ID length as found on the wire, where zero stands for the default.
    pub id_len: u8,
    pub pdu_type: PduType,
    pub reserved: u8,
    pub max_area_addrs: u8,
}

// ===== impl Header =====

impl Header {
    pub const LEN: u8 = 8;

    // Decodes the IS-IS common PDU header starting at the given offset.
    pub fn decode(cursor: &ByteCursor<'_>, offset: usize) -> DecodeResult<Self> {
        // Parse IDRP discriminator.
        let idrp_discr = cursor.read_u8(offset)?;
        if idrp_discr != IDRP_DISCRIMINATOR {
            return Err(DecodeError::InvalidIrdpDiscriminator(idrp_discr));
        }

        // Parse length of fixed header.
        let header_len = cursor.read_u8(offset + 1)?;

        // Parse version/protocol ID extension.
        let version_proto_ext = cursor.read_u8(offset + 2)?;
        if version_proto_ext != VERSION_PROTO_EXT {
            return Err(DecodeError::InvalidVersion(version_proto_ext));
        }

        // Parse ID length.
        let id_len = cursor.read_u8(offset + 3)?;
        if id_len > MAX_ID_LEN {
            return Err(DecodeError::InvalidIdLength(id_len));
        }

        // Parse PDU type.
        let pdu_type = cursor.read_u8(offset + 4)?;
        let pdu_type = match PduType::from_u8(pdu_type) {
            Some(pdu_type) => pdu_type,
            None => return Err(DecodeError::UnknownPduType(pdu_type)),
        };

        // Additional sanity checks.
        if let Some(variant) = HelloVariant::from_pdu_type(pdu_type) {
            let expected = variant.header_length(Self::effective_id_len(id_len));
            if header_len as u16 != expected {
                return Err(DecodeError::InvalidHeaderLength(header_len));
            }
        }

        // Parse version.
        let version = cursor.read_u8(offset + 5)?;
        if version != VERSION {
            return Err(DecodeError::InvalidVersion(version));
        }

        // Parse reserved field.
        let reserved = cursor.read_u8(offset + 6)?;

        // Parse maximum area addresses.
        let max_area_addrs = cursor.read_u8(offset + 7)?;

        Ok(Header {
            header_len,
            id_len,
            pdu_type,
            reserved,
            max_area_addrs,
        })
    }

    // Returns the ID length in use, resolving the zero default.
    pub const fn system_id_len(&self) -> u8 {
        Self::effective_id_len(self.id_len)
    }

    // Builds the field nodes of the header, starting at the given offset.
    pub fn fields(&self, offset: usize) -> Vec<Field> {
        vec![
            Field::hex(
                "Intradomain Routing Protocol Discriminator",
                offset,
                1,
                IDRP_DISCRIMINATOR,
            ),
            Field::uint("PDU Header Length", offset + 1, 1, self.header_len),
            Field::uint(
                "Version/Protocol ID Extension",
                offset + 2,
                1,
                VERSION_PROTO_EXT,
            ),
            Field::uint("System ID Length", offset + 3, 1, self.id_len),
            Field::text(
                "PDU Type",
                offset + 4,
                1,
                format!("{} ({})", self.pdu_type, self.pdu_type as u8),
            ),
            Field::uint("Version", offset + 5, 1, VERSION),
            Field::uint("Reserved", offset + 6, 1, self.reserved),
            Field::uint(
                "Maximum Area Addresses",
                offset + 7,
                1,
                self.max_area_addrs,
            ),
        ]
    }

    const fn effective_id_len(id_len: u8) -> u8 {
        match id_len {
            0 => SYSTEM_ID_LEN,
            _ => id_len,
        }
    }
}

// ===== global functions =====

// Decodes a whole IS-IS PDU, common header included.
//
// Hello PDUs are handed over to the Hello decoder. Other PDU types aren't
// decoded and are reported as opaque data.
pub fn dissect_pdu(buf: &Bytes, config: &HelloConfig) -> Field {
    let cursor = ByteCursor::new(buf);
    let mut fields = vec![];

    match Header::decode(&cursor, 0) {
        Ok(hdr) => {
            fields.extend(hdr.fields(0));
            let offset = Header::LEN as usize;
            match HelloVariant::from_pdu_type(hdr.pdu_type) {
                Some(variant) => {
                    fields.push(hello::dissect_hello(
                        buf,
                        offset,
                        variant,
                        hdr.header_len as u16,
                        hdr.system_id_len(),
                        config,
                    ));
                }
                None => {
                    let error = DecodeError::UnsupportedPduType(hdr.pdu_type);
                    fields.push(malformed_record(offset, 0, error));
                    fields.push(data::dissect_data(&cursor, offset));
                }
            }
        }
        Err(error) => {
            fields.push(malformed_record(0, buf.len(), error));
        }
    }

    Field::container("ISIS", 0, buf.len(), fields)
}

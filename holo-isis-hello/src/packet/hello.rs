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

use crate::config::HelloConfig;
use crate::debug::Debug;
use crate::field::{Annotation, Field};
use crate::packet::consts::{
    CIRCUIT_TYPE_MASK, CIRCUIT_TYPE_RESERVED_MASK, CircuitType, PRIORITY_MASK,
    PRIORITY_RESERVED_MASK, SYSTEM_ID_LEN,
};
use crate::packet::cursor::ByteCursor;
use crate::packet::error::{DecodeError, DecodeResult};
use crate::packet::registry::ClvRegistry;
use crate::packet::{HelloVariant, SystemId, clv, data, malformed_record};

pub const HELLO_LABEL: &str = "ISIS HELLO";

// Decodes an IS-IS Hello message.
//
// `offset` points right after the common PDU header, and `header_len` is the
// length of the fixed header (common header included) as announced by it.
// The CLV region spans from the end of the Hello header up to the declared
// PDU length, and never starts before the header fields that were read. An ID length of zero stands for the default of six.
//
// The returned node always covers everything from `offset` to the end of the
// buffer. Decoding problems end up as malformed-packet records in the tree.
pub fn dissect_hello(
    buf: &Bytes,
    offset: usize,
    variant: HelloVariant,
    header_len: u16,
    id_len: u8,
    config: &HelloConfig,
) -> Field {
    let cursor = ByteCursor::new(buf);

    if !config.enabled {
        Debug::HelloDecodingDisabled(variant).log();
        return data::dissect_data(&cursor, offset);
    }

    let id_len = match id_len {
        0 => SYSTEM_ID_LEN,
        _ => id_len,
    };
    Debug::HelloDecodeStart(variant, cursor.remaining(offset)).log();

    let mut fields = vec![];
    if let Err(error) =
        decode_hello(&cursor, offset, variant, header_len, id_len, &mut fields)
    {
        let err_offset = fields
            .last()
            .map(|field| field.offset + field.length)
            .unwrap_or(offset);
        let length = cursor.remaining(err_offset);
        fields.push(malformed_record(err_offset, length, error));
    }

    let hello =
        Field::container(HELLO_LABEL, offset, cursor.remaining(offset), fields);
    Debug::HelloDecodeFinish(variant, &hello).log();
    hello
}

fn decode_hello(
    cursor: &ByteCursor<'_>,
    offset: usize,
    variant: HelloVariant,
    header_len: u16,
    id_len: u8,
    fields: &mut Vec<Field>,
) -> DecodeResult<()> {
    let (clv_offset, pdu_len) =
        decode_header(cursor, offset, variant, id_len, fields)?;

    // The CLV region can't start before the end of the header fields that
    // were actually read.
    let consumed =
        HelloVariant::COMMON_HEADER_LEN + (clv_offset - offset) as u16;
    let header_len = std::cmp::max(header_len, consumed);
    if pdu_len < header_len {
        return Err(DecodeError::HeaderExceedsPduLength {
            header_len,
            pdu_len,
        });
    }
    let offset = clv_offset;

    // Clamp the CLV region to the captured data. What's missing is reported
    // after the CLVs that could be decoded.
    let region_len = (pdu_len - header_len) as usize;
    let available = cursor.remaining(offset);
    let (region_len, missing) = match region_len.checked_sub(available) {
        Some(missing) if missing > 0 => (available, missing),
        _ => (region_len, 0),
    };

    let registry = ClvRegistry::for_variant(variant);
    fields.extend(clv::dissect_clvs(
        cursor, offset, region_len, registry, id_len,
    ));

    if missing > 0 {
        let error = DecodeError::Truncated {
            offset: offset + region_len,
            length: missing,
        };
        fields.push(malformed_record(offset + region_len, 0, error));
    }

    Ok(())
}

// Decodes the Hello header fields, returning the offset of the CLV region
// and the declared PDU length.
fn decode_header(
    cursor: &ByteCursor<'_>,
    mut offset: usize,
    variant: HelloVariant,
    id_len: u8,
    fields: &mut Vec<Field>,
) -> DecodeResult<(usize, u16)> {
    let id_len = id_len as usize;

    // Circuit type.
    let octet = cursor.read_u8(offset)?;
    let circuit_type = CircuitType::from_u8(octet & CIRCUIT_TYPE_MASK)
        .unwrap_or(CircuitType::Reserved);
    let mut field =
        Field::text("Circuit type", offset, 1, circuit_type.to_string());
    let reserved = octet & CIRCUIT_TYPE_RESERVED_MASK;
    if reserved != 0 {
        field = field.with_annotation(Annotation::ReservedBitsNonzero {
            mask: CIRCUIT_TYPE_RESERVED_MASK as u16,
            value: reserved as u16,
        });
    }
    fields.push(field);
    offset += 1;

    // Source ID.
    let source = SystemId::decode(cursor, offset, id_len)?;
    fields.push(Field::text(
        "SystemID{ Sender of PDU }",
        offset,
        id_len,
        source.to_string(),
    ));
    offset += id_len;

    // Holding time.
    let holding_time = cursor.read_u16_be(offset)?;
    fields.push(Field::uint("Holding timer", offset, 2, holding_time));
    offset += 2;

    // PDU length.
    let pdu_len = cursor.read_u16_be(offset)?;
    fields.push(Field::uint("PDU length", offset, 2, pdu_len));
    offset += 2;

    match variant {
        HelloVariant::PointToPoint => {
            // Local circuit ID.
            let circuit_id = cursor.read_u8(offset)?;
            fields.push(Field::uint("Local circuit ID", offset, 1, circuit_id));
            offset += 1;
        }
        HelloVariant::Level1 | HelloVariant::Level2 => {
            // Priority.
            let octet = cursor.read_u8(offset)?;
            let mut field =
                Field::uint("Priority", offset, 1, octet & PRIORITY_MASK);
            let reserved = octet & PRIORITY_RESERVED_MASK;
            if reserved != 0 {
                field =
                    field.with_annotation(Annotation::ReservedBitsNonzero {
                        mask: PRIORITY_RESERVED_MASK as u16,
                        value: reserved as u16,
                    });
            }
            fields.push(field);
            offset += 1;

            // LAN ID.
            let lan_id = SystemId::decode(cursor, offset, id_len + 1)?;
            fields.push(Field::text(
                "SystemID{ Designated IS }",
                offset,
                id_len + 1,
                lan_id.to_string(),
            ));
            offset += id_len + 1;
        }
    }

    Ok((offset, pdu_len))
}

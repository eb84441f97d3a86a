//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bitflags::bitflags;
use num_traits::FromPrimitive;

use crate::debug::Debug;
use crate::field::{Annotation, Field, FieldValue};
use crate::packet::consts::{AdjacencyState, AuthenticationType, MtId, Nlpid};
use crate::packet::cursor::ByteCursor;
use crate::packet::error::{DecodeError, DecodeResult};
use crate::packet::registry::ClvRegistry;
use crate::packet::{AreaAddr, SystemId, malformed_record};

pub const CLV_HDR_SIZE: usize = 2;

pub const IS_NEIGHBOR_ENTRY_SIZE: usize = 6;

pub const MT_ENTRY_SIZE: usize = 2;
pub const MT_ID_MASK: u16 = 0x0fff;
pub const MT_RESERVED_MASK: u16 = 0x1000;

pub const PTP_ADJ_LENGTHS: [usize; 4] = [1, 5, 11, 15];
pub const PTP_ADJ_NBR_ID_LEN: usize = 6;

// Multi-Topology flags.
bitflags! {
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct MtFlags: u16 {
        const OL = 0x8000;
        const ATT = 0x4000;
        const UNASSIGNED = 0x2000;
    }
}

// Interface address families.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AddressFamily {
    Ipv4,
    Ipv6,
}

// ===== CLV dispatcher =====

// Walks the sequence of CLVs found in `[offset, offset + region_len)`.
//
// Each CLV becomes one node, decoded according to the given registry. Codes
// missing from the registry are kept as opaque data. A CLV whose declared
// length overruns the region ends the walk with a malformed-packet record.
pub fn dissect_clvs(
    cursor: &ByteCursor<'_>,
    offset: usize,
    region_len: usize,
    registry: &ClvRegistry,
    id_len: u8,
) -> Vec<Field> {
    let mut fields = vec![];

    let region = match cursor.region(offset, region_len) {
        Ok(region) => region,
        Err(error) => {
            let length = cursor.remaining(offset);
            fields.push(malformed_record(offset, length, error));
            return fields;
        }
    };

    let mut offset = offset;
    let mut remaining = region_len;
    while remaining >= CLV_HDR_SIZE {
        match dissect_clv(&region, offset, registry, id_len) {
            Ok(field) => {
                offset += field.length;
                remaining -= field.length;
                fields.push(field);
            }
            Err(error) => {
                fields.push(malformed_record(offset, remaining, error));
                return fields;
            }
        }
    }

    // A lone byte can't hold a CLV header.
    if remaining == 1 {
        fields.push(malformed_record(offset, 1, DecodeError::ClvTrailingByte));
    }

    fields
}

fn dissect_clv(
    region: &ByteCursor<'_>,
    offset: usize,
    registry: &ClvRegistry,
    id_len: u8,
) -> DecodeResult<Field> {
    let clv_type = region.read_u8(offset)?;
    let clv_len = region.read_u8(offset + 1)?;
    let value_offset = offset + CLV_HDR_SIZE;
    let value_len = clv_len as usize;

    let available = region.remaining(value_offset);
    if value_len > available {
        return Err(DecodeError::ClvLengthExceedsRegion {
            clv_type,
            length: clv_len,
            remaining: available,
        });
    }
    let value = region.region(value_offset, value_len)?;

    let field = match registry.lookup(clv_type) {
        Some(entry) => {
            let children = entry.kind.decode(&value, id_len);
            Field::container(
                format!("{} ({})", entry.label, clv_len),
                offset,
                CLV_HDR_SIZE + value_len,
                children,
            )
        }
        None => {
            Debug::ClvUnknown(registry.name, clv_type, clv_len).log();
            let data = value.slice(value_offset, value_len)?;
            Field::new(
                format!("Unknown CLV type {}, length {}", clv_type, clv_len),
                offset,
                CLV_HDR_SIZE + value_len,
                FieldValue::Raw(data),
            )
        }
    };

    Ok(field)
}

// ===== CLV decoders =====

// Area Addresses: a sequence of length-prefixed addresses.
pub(crate) fn decode_area_addrs(cursor: &ByteCursor<'_>) -> Vec<Field> {
    decode_with(cursor, |cursor, fields| {
        if cursor.is_empty() {
            return Err(DecodeError::InvalidClvLength(0));
        }

        let mut offset = cursor.start();
        while offset < cursor.end() {
            let addr_len = cursor.read_u8(offset)?;
            let remaining = cursor.remaining(offset + 1);
            if remaining == 0 {
                return Err(DecodeError::AreaAddrNoPayload);
            }
            if addr_len as usize > remaining {
                return Err(DecodeError::AreaAddrTooShort {
                    length: addr_len,
                    remaining,
                });
            }

            let bytes = cursor.read_bytes(offset + 1, addr_len as usize)?;
            let addr = match addr_len {
                0 => "<empty>".to_owned(),
                _ => AreaAddr::from(bytes).to_string(),
            };
            let length = 1 + addr_len as usize;
            let mut field = Field::text("Area address", offset, length, addr);
            if addr_len == 0 || addr_len > AreaAddr::MAX_LEN {
                field = field.with_annotation(Annotation::LengthOutOfRange {
                    length: addr_len,
                    min: 1,
                    max: AreaAddr::MAX_LEN,
                });
            }
            fields.push(field);
            offset += length;
        }

        Ok(())
    })
}

// IS Neighbors: a sequence of 6-byte MAC addresses.
pub(crate) fn decode_is_neighbors(cursor: &ByteCursor<'_>) -> Vec<Field> {
    decode_with(cursor, |cursor, fields| {
        let clv_len = cursor.len();
        if clv_len == 0 || clv_len % IS_NEIGHBOR_ENTRY_SIZE != 0 {
            return Err(DecodeError::ShortIsNeighbor(clv_len as u8));
        }

        for offset in
            (cursor.start()..cursor.end()).step_by(IS_NEIGHBOR_ENTRY_SIZE)
        {
            let neighbor =
                SystemId::decode(cursor, offset, IS_NEIGHBOR_ENTRY_SIZE)?;
            fields.push(Field::text(
                "IS Neighbor",
                offset,
                IS_NEIGHBOR_ENTRY_SIZE,
                neighbor.to_string(),
            ));
        }

        Ok(())
    })
}

// Padding carries no information.
pub(crate) fn decode_padding(_cursor: &ByteCursor<'_>) -> Vec<Field> {
    vec![]
}

// Protocols Supported: one NLPID per byte.
pub(crate) fn decode_protocols_supported(cursor: &ByteCursor<'_>) -> Vec<Field> {
    decode_with(cursor, |cursor, fields| {
        for offset in cursor.start()..cursor.end() {
            let nlpid = cursor.read_u8(offset)?;
            let name = match Nlpid::from_u8(nlpid) {
                Some(proto) => format!("{} (0x{:02x})", proto, nlpid),
                None => format!("Unknown (0x{:02x})", nlpid),
            };
            fields.push(Field::text("NLPID", offset, 1, name));
        }

        Ok(())
    })
}

pub(crate) fn decode_ipv4_addrs(cursor: &ByteCursor<'_>) -> Vec<Field> {
    decode_interface_addrs(cursor, AddressFamily::Ipv4)
}

pub(crate) fn decode_ipv6_addrs(cursor: &ByteCursor<'_>) -> Vec<Field> {
    decode_interface_addrs(cursor, AddressFamily::Ipv6)
}

fn decode_interface_addrs(
    cursor: &ByteCursor<'_>,
    af: AddressFamily,
) -> Vec<Field> {
    decode_with(cursor, |cursor, fields| {
        let addr_len = af.addr_len();
        let clv_len = cursor.len();
        if clv_len == 0 || clv_len % addr_len != 0 {
            return Err(af.short_addr_error(clv_len as u8));
        }

        for offset in (cursor.start()..cursor.end()).step_by(addr_len) {
            let addr: IpAddr = match af {
                AddressFamily::Ipv4 => {
                    Ipv4Addr::from(cursor.read_u32_be(offset)?).into()
                }
                AddressFamily::Ipv6 => {
                    Ipv6Addr::from(cursor.read_u128_be(offset)?).into()
                }
            };
            fields.push(Field::text(
                af.label(),
                offset,
                addr_len,
                addr.to_string(),
            ));
        }

        Ok(())
    })
}

// Authentication: a type octet followed by the authentication value, which
// is passed through without verification.
pub(crate) fn decode_authentication(cursor: &ByteCursor<'_>) -> Vec<Field> {
    decode_with(cursor, |cursor, fields| {
        if cursor.is_empty() {
            return Err(DecodeError::MissingAuthType);
        }

        let offset = cursor.start();
        let auth_type = cursor.read_u8(offset)?;
        let name = match AuthenticationType::from_u8(auth_type) {
            Some(auth_type) => auth_type.to_string(),
            None => format!("unknown ({})", auth_type),
        };
        fields.push(Field::text("Authentication type", offset, 1, name));

        let value_len = cursor.remaining(offset + 1);
        let value = cursor.slice(offset + 1, value_len)?;
        fields.push(Field::raw(
            format!("Authentication data (length {})", value_len),
            offset + 1,
            value,
        ));

        Ok(())
    })
}

// Multi-Topology: a sequence of 16-bit entries, each one made of 3 flag bits,
// 1 reserved bit and a 12-bit MT ID.
pub(crate) fn decode_multi_topology(cursor: &ByteCursor<'_>) -> Vec<Field> {
    decode_with(cursor, |cursor, fields| {
        let clv_len = cursor.len();
        if clv_len % MT_ENTRY_SIZE != 0 {
            return Err(DecodeError::InvalidMultiTopologyLength(clv_len as u8));
        }

        for offset in (cursor.start()..cursor.end()).step_by(MT_ENTRY_SIZE) {
            let entry = cursor.read_u16_be(offset)?;
            let flags = MtFlags::from_bits_truncate(entry);
            let mt_id = entry & MT_ID_MASK;
            let reserved = entry & MT_RESERVED_MASK;

            let mut text = match MtId::from_u16(mt_id) {
                Some(mt) => format!("{} Topology (0x{:03x})", mt, mt_id),
                None if MtId::EXPERIMENTAL_RANGE.contains(&mt_id) => {
                    format!(
                        "Development, Experimental and Proprietary Topology (0x{:03x})",
                        mt_id
                    )
                }
                None => format!(
                    "Reserved for IETF Consensus Topology (0x{:03x})",
                    mt_id
                ),
            };
            if flags.contains(MtFlags::OL) {
                text.push_str(", overload bit set");
            }
            if flags.contains(MtFlags::ATT) {
                text.push_str(", ATT bit set");
            }
            if flags.contains(MtFlags::UNASSIGNED) {
                text.push_str(", unassigned flag set");
            }

            let mut field = Field::text("Multi Topology", offset, 2, text);
            if reserved != 0 {
                field = field.with_annotation(Annotation::ReservedBitsNonzero {
                    mask: MT_RESERVED_MASK,
                    value: reserved,
                });
            }
            fields.push(field);
        }

        Ok(())
    })
}

// Point-to-Point Three-Way Adjacency.
//
// The value comes in four shapes: the adjacency state alone, followed by
// the extended local circuit ID, then the neighbor system ID, and finally
// the neighbor extended local circuit ID. The neighbor system ID is always
// six bytes long, whatever the ID length of the PDU.
pub(crate) fn decode_ptp_adjacency(cursor: &ByteCursor<'_>) -> Vec<Field> {
    decode_with(cursor, |cursor, fields| {
        let clv_len = cursor.len();
        if !PTP_ADJ_LENGTHS.contains(&clv_len) {
            return Err(DecodeError::InvalidPtpAdjLength(clv_len as u8));
        }

        let mut offset = cursor.start();
        let state = cursor.read_u8(offset)?;
        let field = match AdjacencyState::from_u8(state) {
            Some(state) => {
                Field::text("Adjacency State", offset, 1, state.to_string())
            }
            None => Field::text(
                "Adjacency State",
                offset,
                1,
                format!("Unknown ({})", state),
            )
            .with_annotation(Annotation::IllegalValue(state as u32)),
        };
        fields.push(field);
        offset += 1;
        if clv_len == 1 {
            return Ok(());
        }

        let circuit_id = cursor.read_u32_be(offset)?;
        fields.push(Field::hex(
            "Extended Local circuit ID",
            offset,
            4,
            circuit_id,
        ));
        offset += 4;
        if clv_len == 5 {
            return Ok(());
        }

        let neighbor = SystemId::decode(cursor, offset, PTP_ADJ_NBR_ID_LEN)?;
        fields.push(Field::text(
            "Neighbor SystemID",
            offset,
            PTP_ADJ_NBR_ID_LEN,
            neighbor.to_string(),
        ));
        offset += PTP_ADJ_NBR_ID_LEN;
        if clv_len == 11 {
            return Ok(());
        }

        let nbr_circuit_id = cursor.read_u32_be(offset)?;
        fields.push(Field::hex(
            "Neighbor Extended Local circuit ID",
            offset,
            4,
            nbr_circuit_id,
        ));

        Ok(())
    })
}

// Runs a CLV value decoder, turning its error into a terminal malformed
// record placed right after the last field it managed to decode.
fn decode_with<F>(cursor: &ByteCursor<'_>, decode: F) -> Vec<Field>
where
    F: FnOnce(&ByteCursor<'_>, &mut Vec<Field>) -> DecodeResult<()>,
{
    let mut fields = vec![];
    if let Err(error) = decode(cursor, &mut fields) {
        let offset = fields
            .last()
            .map(|field| field.offset + field.length)
            .unwrap_or(cursor.start());
        let length = cursor.remaining(offset);
        fields.push(malformed_record(offset, length, error));
    }
    fields
}

// ===== impl AddressFamily =====

impl AddressFamily {
    const fn addr_len(&self) -> usize {
        match self {
            AddressFamily::Ipv4 => 4,
            AddressFamily::Ipv6 => 16,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            AddressFamily::Ipv4 => "IPv4 interface address",
            AddressFamily::Ipv6 => "IPv6 interface address",
        }
    }

    const fn short_addr_error(&self, clv_len: u8) -> DecodeError {
        match self {
            AddressFamily::Ipv4 => DecodeError::ShortIpv4InterfaceAddr(clv_len),
            AddressFamily::Ipv6 => DecodeError::ShortIpv6InterfaceAddr(clv_len),
        }
    }
}

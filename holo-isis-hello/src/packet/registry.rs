//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::packet::HelloVariant;
use crate::packet::clv;
use crate::packet::consts::ClvType;
use crate::packet::cursor::ByteCursor;

// CLV kinds understood by the Hello dissector.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum ClvKind {
    AreaAddresses,
    IsNeighbors,
    Padding,
    ProtocolsSupported,
    Ipv4InterfaceAddrs,
    Ipv6InterfaceAddrs,
    Authentication,
    MultiTopology,
    PtpAdjacencyState,
}

// Entry of a CLV registry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClvRegistryEntry {
    pub code: u8,
    pub label: &'static str,
    pub kind: ClvKind,
}

// Ordered table of the CLVs accepted by one Hello variant.
#[derive(Debug)]
pub struct ClvRegistry {
    pub name: &'static str,
    entries: &'static [ClvRegistryEntry],
}

// CLVs shared by the Level-1 and Level-2 LAN Hellos.
const LAN_HELLO_ENTRIES: &[ClvRegistryEntry] = &[
    ClvRegistryEntry::new(
        ClvType::AreaAddresses,
        "Area address(es)",
        ClvKind::AreaAddresses,
    ),
    ClvRegistryEntry::new(
        ClvType::Neighbors,
        "IS Neighbor(s)",
        ClvKind::IsNeighbors,
    ),
    ClvRegistryEntry::new(ClvType::Padding, "Padding", ClvKind::Padding),
    ClvRegistryEntry::new(
        ClvType::ProtocolsSupported,
        "Protocols Supported",
        ClvKind::ProtocolsSupported,
    ),
    ClvRegistryEntry::new(
        ClvType::Ipv4Addresses,
        "IP Interface address(es)",
        ClvKind::Ipv4InterfaceAddrs,
    ),
    ClvRegistryEntry::new(
        ClvType::Ipv6Addresses,
        "IPv6 Interface address(es)",
        ClvKind::Ipv6InterfaceAddrs,
    ),
    ClvRegistryEntry::new(
        ClvType::AuthenticationNonStd,
        "Authentication(non spec)",
        ClvKind::Authentication,
    ),
    ClvRegistryEntry::new(
        ClvType::Authentication,
        "Authentication",
        ClvKind::Authentication,
    ),
    ClvRegistryEntry::new(
        ClvType::MultiTopology,
        "Multi Topology",
        ClvKind::MultiTopology,
    ),
];

// The P2P Hello has no IS Neighbors CLV, and carries the adjacency state.
const P2P_HELLO_ENTRIES: &[ClvRegistryEntry] = &[
    ClvRegistryEntry::new(
        ClvType::AreaAddresses,
        "Area address(es)",
        ClvKind::AreaAddresses,
    ),
    ClvRegistryEntry::new(ClvType::Padding, "Padding", ClvKind::Padding),
    ClvRegistryEntry::new(
        ClvType::ProtocolsSupported,
        "Protocols Supported",
        ClvKind::ProtocolsSupported,
    ),
    ClvRegistryEntry::new(
        ClvType::Ipv4Addresses,
        "IP Interface address(es)",
        ClvKind::Ipv4InterfaceAddrs,
    ),
    ClvRegistryEntry::new(
        ClvType::Ipv6Addresses,
        "IPv6 Interface address(es)",
        ClvKind::Ipv6InterfaceAddrs,
    ),
    ClvRegistryEntry::new(
        ClvType::AuthenticationNonStd,
        "Authentication(non spec)",
        ClvKind::Authentication,
    ),
    ClvRegistryEntry::new(
        ClvType::Authentication,
        "Authentication",
        ClvKind::Authentication,
    ),
    ClvRegistryEntry::new(
        ClvType::ThreeWayAdj,
        "point-to-point Adjacency State",
        ClvKind::PtpAdjacencyState,
    ),
    ClvRegistryEntry::new(
        ClvType::MultiTopology,
        "Multi Topology",
        ClvKind::MultiTopology,
    ),
];

pub static L1_HELLO_CLVS: ClvRegistry = ClvRegistry {
    name: "L1 LAN Hello",
    entries: LAN_HELLO_ENTRIES,
};

pub static L2_HELLO_CLVS: ClvRegistry = ClvRegistry {
    name: "L2 LAN Hello",
    entries: LAN_HELLO_ENTRIES,
};

pub static P2P_HELLO_CLVS: ClvRegistry = ClvRegistry {
    name: "P2P Hello",
    entries: P2P_HELLO_ENTRIES,
};

// ===== impl ClvKind =====

impl ClvKind {
    // Decodes the value of a CLV of this kind.
    //
    // The cursor covers exactly the CLV value bytes. None of the Hello CLVs
    // depend on the ID length.
    pub fn decode(&self, cursor: &ByteCursor<'_>, _id_len: u8) -> Vec<Field> {
        match self {
            ClvKind::AreaAddresses => clv::decode_area_addrs(cursor),
            ClvKind::IsNeighbors => clv::decode_is_neighbors(cursor),
            ClvKind::Padding => clv::decode_padding(cursor),
            ClvKind::ProtocolsSupported => {
                clv::decode_protocols_supported(cursor)
            }
            ClvKind::Ipv4InterfaceAddrs => clv::decode_ipv4_addrs(cursor),
            ClvKind::Ipv6InterfaceAddrs => clv::decode_ipv6_addrs(cursor),
            ClvKind::Authentication => clv::decode_authentication(cursor),
            ClvKind::MultiTopology => clv::decode_multi_topology(cursor),
            ClvKind::PtpAdjacencyState => clv::decode_ptp_adjacency(cursor),
        }
    }
}

// ===== impl ClvRegistryEntry =====

impl ClvRegistryEntry {
    const fn new(
        clv_type: ClvType,
        label: &'static str,
        kind: ClvKind,
    ) -> Self {
        ClvRegistryEntry {
            code: clv_type as u8,
            label,
            kind,
        }
    }
}

// ===== impl ClvRegistry =====

impl ClvRegistry {
    // Returns the registry for the given Hello variant.
    pub fn for_variant(variant: HelloVariant) -> &'static ClvRegistry {
        match variant {
            HelloVariant::Level1 => &L1_HELLO_CLVS,
            HelloVariant::Level2 => &L2_HELLO_CLVS,
            HelloVariant::PointToPoint => &P2P_HELLO_CLVS,
        }
    }

    // Returns the first entry registered for the given CLV code.
    pub fn lookup(&self, code: u8) -> Option<&'static ClvRegistryEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    pub fn entries(&self) -> &'static [ClvRegistryEntry] {
        self.entries
    }
}

//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

pub const IDRP_DISCRIMINATOR: u8 = 0x83;
pub const VERSION_PROTO_EXT: u8 = 1;
pub const VERSION: u8 = 1;
pub const SYSTEM_ID_LEN: u8 = 6;
pub const MAX_ID_LEN: u8 = 8;

pub const CIRCUIT_TYPE_MASK: u8 = 0x03;
pub const CIRCUIT_TYPE_RESERVED_MASK: u8 = 0xfc;
// The LAN priority is 7 bits wide (ISO 10589), the high bit is reserved.
pub const PRIORITY_MASK: u8 = 0x7f;
pub const PRIORITY_RESERVED_MASK: u8 = 0x80;

// IS-IS PDU types.
//
// IANA registry:
// https://www.iana.org/assignments/isis-pdu/isis-pdu.xhtml#pdu
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(FromPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum PduType {
    HelloLanL1 = 15,
    HelloLanL2 = 16,
    HelloP2P = 17,
    LspL1 = 18,
    LspL2 = 20,
    CsnpL1 = 24,
    CsnpL2 = 25,
    PsnpL1 = 26,
    PsnpL2 = 27,
}

// IS-IS CLV codes that may appear in Hello PDUs.
//
// IANA registry:
// https://www.iana.org/assignments/isis-tlv-codepoints/isis-tlv-codepoints.xhtml#tlv-codepoints
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(FromPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum ClvType {
    AreaAddresses = 1,
    Neighbors = 6,
    Padding = 8,
    Authentication = 10,
    ProtocolsSupported = 129,
    Ipv4Addresses = 132,
    // Pre-standard code point used by early implementations before the
    // Authentication CLV was assigned type 10.
    AuthenticationNonStd = 133,
    MultiTopology = 229,
    Ipv6Addresses = 232,
    ThreeWayAdj = 240,
}

// Circuit type carried in the low two bits of the first Hello octet.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(FromPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum CircuitType {
    Reserved = 0,
    Level1Only = 1,
    Level2Only = 2,
    Level1And2 = 3,
}

// IS-IS Authentication Type Codes.
//
// IANA registry:
// https://www.iana.org/assignments/isis-tlv-codepoints/isis-tlv-codepoints.xhtml#isis-tlv-codepoints-10
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(FromPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum AuthenticationType {
    ClearText = 1,
    Cryptographic = 3,
    HmacMd5 = 54,
}

// Network Layer Protocol Identifiers (NLPIDs).
//
// IANA Registry:
// https://www.iana.org/assignments/nlpids/nlpids.xhtml
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(FromPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum Nlpid {
    Clnp = 0x81,
    EsIs = 0x82,
    IsIs = 0x83,
    Ipv6 = 0x8E,
    Ipv4 = 0xCC,
    Ppp = 0xCF,
}

// IS-IS Multi-Topology ID Values.
//
// IANA registry:
// https://www.iana.org/assignments/isis-mt-parameters/isis-mt-parameters.xhtml
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(FromPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum MtId {
    Standard = 0,
    InBandMgmt = 1,
    Ipv6Unicast = 2,
    Ipv4Multicast = 3,
    Ipv6Multicast = 4,
    Ipv6InBandMgmt = 5,
}

// Point-to-Point Three-Way Adjacency states.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(FromPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum AdjacencyState {
    Up = 0,
    Initializing = 1,
    Down = 2,
}

// ===== impl PduType =====

impl std::fmt::Display for PduType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PduType::HelloLanL1 => write!(f, "L1 HELLO"),
            PduType::HelloLanL2 => write!(f, "L2 HELLO"),
            PduType::HelloP2P => write!(f, "P2P HELLO"),
            PduType::LspL1 => write!(f, "L1 LSP"),
            PduType::LspL2 => write!(f, "L2 LSP"),
            PduType::CsnpL1 => write!(f, "L1 CSNP"),
            PduType::CsnpL2 => write!(f, "L2 CSNP"),
            PduType::PsnpL1 => write!(f, "L1 PSNP"),
            PduType::PsnpL2 => write!(f, "L2 PSNP"),
        }
    }
}

// ===== impl CircuitType =====

impl std::fmt::Display for CircuitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitType::Reserved => write!(f, "Reserved 0 (discard PDU)"),
            CircuitType::Level1Only => write!(f, "Level 1 only"),
            CircuitType::Level2Only => write!(f, "Level 2 only"),
            CircuitType::Level1And2 => write!(f, "Level 1 and 2"),
        }
    }
}

// ===== impl AuthenticationType =====

impl std::fmt::Display for AuthenticationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthenticationType::ClearText => write!(f, "clear text"),
            AuthenticationType::Cryptographic => write!(f, "cryptographic"),
            AuthenticationType::HmacMd5 => write!(f, "hmac-md5"),
        }
    }
}

// ===== impl Nlpid =====

impl std::fmt::Display for Nlpid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nlpid::Clnp => write!(f, "CLNP"),
            Nlpid::EsIs => write!(f, "ES-IS"),
            Nlpid::IsIs => write!(f, "IS-IS"),
            Nlpid::Ipv6 => write!(f, "IPv6"),
            Nlpid::Ipv4 => write!(f, "IPv4"),
            Nlpid::Ppp => write!(f, "PPP"),
        }
    }
}

// ===== impl MtId =====

impl MtId {
    // Upper range of MT IDs set aside for development, experimental and
    // proprietary use.
    pub const EXPERIMENTAL_RANGE: std::ops::RangeInclusive<u16> = 3996..=4095;
}

impl std::fmt::Display for MtId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtId::Standard => write!(f, "IPv4 unicast"),
            MtId::InBandMgmt => write!(f, "IPv4 in-band management"),
            MtId::Ipv6Unicast => write!(f, "IPv6 unicast"),
            MtId::Ipv4Multicast => write!(f, "IPv4 multicast"),
            MtId::Ipv6Multicast => write!(f, "IPv6 multicast"),
            MtId::Ipv6InBandMgmt => write!(f, "IPv6 in-band management"),
        }
    }
}

// ===== impl AdjacencyState =====

impl std::fmt::Display for AdjacencyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjacencyState::Up => write!(f, "Up"),
            AdjacencyState::Initializing => write!(f, "Initializing"),
            AdjacencyState::Down => write!(f, "Down"),
        }
    }
}

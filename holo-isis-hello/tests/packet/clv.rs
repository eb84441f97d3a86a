//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use const_addrs::{ip4, ip6};
use holo_isis_hello::field::{Annotation, FieldValue};
use holo_isis_hello::packet::error::DecodeError;
use holo_isis_hello::packet::registry::{
    ClvKind, ClvRegistry, L1_HELLO_CLVS, L2_HELLO_CLVS, P2P_HELLO_CLVS,
};
use holo_isis_hello::packet::HelloVariant;

use super::{lines, test_decode_clvs, test_decode_clvs_id_len};
use crate::assert_eq_hex;

//
// Registries.
//

#[test]
fn test_registry_lookup() {
    let entry = L1_HELLO_CLVS.lookup(6).unwrap();
    assert_eq!(entry.label, "IS Neighbor(s)");
    assert_eq!(entry.kind, ClvKind::IsNeighbors);

    let entry = P2P_HELLO_CLVS.lookup(240).unwrap();
    assert_eq!(entry.label, "point-to-point Adjacency State");
    assert_eq!(entry.kind, ClvKind::PtpAdjacencyState);

    assert!(L1_HELLO_CLVS.lookup(240).is_none());
    assert!(L2_HELLO_CLVS.lookup(240).is_none());
    assert!(P2P_HELLO_CLVS.lookup(6).is_none());
    assert!(P2P_HELLO_CLVS.lookup(22).is_none());

    assert_eq!(
        L1_HELLO_CLVS.lookup(10).unwrap().kind,
        L1_HELLO_CLVS.lookup(133).unwrap().kind
    );
}

#[test]
fn test_registry_for_variant() {
    let registry = ClvRegistry::for_variant(HelloVariant::Level1);
    assert_eq!(registry.name, "L1 LAN Hello");
    let registry = ClvRegistry::for_variant(HelloVariant::Level2);
    assert_eq!(registry.name, "L2 LAN Hello");
    assert_eq!(L1_HELLO_CLVS.entries(), L2_HELLO_CLVS.entries());

    let registry = ClvRegistry::for_variant(HelloVariant::PointToPoint);
    assert_eq!(registry.name, "P2P Hello");
    let codes = registry
        .entries()
        .iter()
        .map(|entry| entry.code)
        .collect::<Vec<_>>();
    assert_eq!(codes, vec![1, 8, 129, 132, 232, 133, 10, 240, 229]);
}

//
// Dispatcher.
//

#[test]
fn test_dispatch_empty_region() {
    assert!(test_decode_clvs(&[], &L1_HELLO_CLVS).is_empty());
}

#[test]
fn test_dispatch_unknown_clv() {
    let fields = test_decode_clvs(
        &[0x16, 0x02, 0xab, 0xcd, 0x08, 0x01, 0x00],
        &L1_HELLO_CLVS,
    );
    assert_eq!(
        lines(&fields),
        vec![
            "Unknown CLV type 22, length 2: abcd (2 byte(s))",
            "Padding (1)",
        ]
    );
    assert_eq!(fields[0].range(), 0..4);
    let data = fields[0].value.as_raw().unwrap();
    assert_eq_hex!(&[0xab_u8, 0xcd], &data[..]);
}

#[test]
fn test_dispatch_registry_mismatch() {
    // Adjacency state CLV on a LAN Hello.
    let fields = test_decode_clvs(&[0xf0, 0x01, 0x00], &L1_HELLO_CLVS);
    assert_eq!(lines(&fields), vec!["Unknown CLV type 240, length 1: 00 (1 byte(s))"]);

    // IS Neighbors CLV on a P2P Hello.
    let fields = test_decode_clvs(
        &[0x06, 0x06, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
        &P2P_HELLO_CLVS,
    );
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].label, "Unknown CLV type 6, length 6");
}

#[test]
fn test_dispatch_length_overrun() {
    let fields = test_decode_clvs(
        &[0x08, 0x00, 0x01, 0x05, 0x03, 0x49, 0x08, 0x00],
        &L1_HELLO_CLVS,
    );
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].to_string(), "Padding (0)");
    assert_eq!(
        fields[1].error(),
        Some(&DecodeError::ClvLengthExceedsRegion {
            clv_type: 1,
            length: 5,
            remaining: 4,
        })
    );
    assert_eq!(fields[1].range(), 2..8);
}

#[test]
fn test_dispatch_length_boundary() {
    // A value that ends exactly at the region end is fine.
    let fields = test_decode_clvs(&[0x08, 0x03, 0x00, 0x00, 0x00], &L1_HELLO_CLVS);
    assert_eq!(lines(&fields), vec!["Padding (3)"]);
    assert!(fields[0].children().is_empty());

    // One byte more is not.
    let fields = test_decode_clvs(&[0x08, 0x04, 0x00, 0x00, 0x00], &L1_HELLO_CLVS);
    assert_eq!(fields.len(), 1);
    assert!(fields[0].is_malformed());
}

#[test]
fn test_dispatch_trailing_byte() {
    let fields = test_decode_clvs(&[0x08, 0x00, 0x08], &L1_HELLO_CLVS);
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[1].error(), Some(&DecodeError::ClvTrailingByte));
    assert_eq!(fields[1].range(), 2..3);
}

#[test]
fn test_dispatch_tiles_region() {
    // Pseudo-random regions: the top-level records must always tile the
    // region, malformed records included.
    let mut state: u32 = 0x1234_5678;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    let codes = [1, 6, 8, 10, 129, 132, 133, 229, 232, 240, 22];

    for _ in 0..500 {
        let len = (next() % 64) as usize;
        let bytes = (0..len)
            .map(|idx| match idx % 3 {
                0 => codes[next() as usize % codes.len()],
                _ => (next() % 24) as u8,
            })
            .collect::<Vec<u8>>();

        for registry in [&L1_HELLO_CLVS, &P2P_HELLO_CLVS] {
            let fields = test_decode_clvs(&bytes, registry);
            let mut offset = 0;
            for field in &fields {
                assert_eq!(field.offset, offset);
                offset += field.length;
            }
            assert_eq!(offset, bytes.len());
        }
    }
}

//
// Area Addresses.
//

#[test]
fn test_area_addrs() {
    let fields = test_decode_clvs(
        &[
            0x01, 0x0a, 0x03, 0x49, 0x00, 0x01, 0x05, 0x49, 0x00, 0x02, 0x00,
            0x03,
        ],
        &L1_HELLO_CLVS,
    );
    assert_eq!(fields[0].label, "Area address(es) (10)");
    assert_eq!(
        lines(fields[0].children()),
        vec!["Area address: 49.0001", "Area address: 49.0002.0003"]
    );
    assert_eq!(fields[0].children()[1].range(), 6..12);
}

#[test]
fn test_area_addrs_short() {
    let fields =
        test_decode_clvs(&[0x01, 0x03, 0x05, 0x49, 0x00], &L1_HELLO_CLVS);
    let children = fields[0].children();
    assert_eq!(children.len(), 1);
    assert_eq!(
        children[0].to_string(),
        "Malformed: short address, packet says 5, we have 2 left"
    );
    assert_eq!(children[0].range(), 2..5);
}

#[test]
fn test_area_addrs_dangling_length() {
    let fields = test_decode_clvs(
        &[0x01, 0x05, 0x03, 0x49, 0x00, 0x01, 0x02],
        &P2P_HELLO_CLVS,
    );
    let children = fields[0].children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].to_string(), "Area address: 49.0001");
    assert_eq!(children[1].error(), Some(&DecodeError::AreaAddrNoPayload));
    assert_eq!(children[1].range(), 6..7);
}

#[test]
fn test_area_addrs_length_out_of_range() {
    let mut bytes = vec![0x01, 0x0f, 0x0e];
    bytes.extend([0x49; 14]);
    let fields = test_decode_clvs(&bytes[..17], &L1_HELLO_CLVS);
    let children = fields[0].children();
    assert_eq!(children.len(), 1);
    assert!(!children[0].is_malformed());
    assert_eq!(children[0].range(), 2..17);
    assert_eq!(
        children[0].annotations,
        vec![Annotation::LengthOutOfRange {
            length: 14,
            min: 1,
            max: 13,
        }]
    );
    assert_eq!(
        children[0].to_string(),
        "Area address: 49.4949.4949.4949.4949.4949.4949.49 \
         [length 14 out of range [1-13]]"
    );
}

#[test]
fn test_area_addrs_zero_length() {
    let fields = test_decode_clvs(
        &[0x01, 0x05, 0x00, 0x03, 0x49, 0x00, 0x01],
        &L1_HELLO_CLVS,
    );
    assert_eq!(
        lines(fields[0].children()),
        vec![
            "Area address: <empty> [length 0 out of range [1-13]]",
            "Area address: 49.0001",
        ]
    );
    assert_eq!(fields[0].children()[0].range(), 2..3);
    assert_eq!(fields[0].children()[1].range(), 3..7);
}

//
// IS Neighbors.
//

#[test]
fn test_is_neighbors() {
    let fields = test_decode_clvs(
        &[
            0x06, 0x0c, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa, 0xbb, 0xbb, 0xbb,
            0xbb, 0xbb, 0xbb,
        ],
        &L1_HELLO_CLVS,
    );
    assert_eq!(fields.len(), 1);
    assert_eq!(
        lines(fields[0].children()),
        vec!["IS Neighbor: aaaa.aaaa.aaaa", "IS Neighbor: bbbb.bbbb.bbbb"]
    );
}

#[test]
fn test_is_neighbors_short() {
    let fields = test_decode_clvs(
        &[0x06, 0x07, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa, 0xbb],
        &L2_HELLO_CLVS,
    );
    let children = fields[0].children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].error(), Some(&DecodeError::ShortIsNeighbor(7)));
    assert_eq!(
        children[0].to_string(),
        "Malformed: short is neighbor (7 vs 6)"
    );
    assert_eq!(fields[0].find_all("IS Neighbor").count(), 0);
}

#[test]
fn test_is_neighbors_empty() {
    let fields = test_decode_clvs(&[0x06, 0x00], &L1_HELLO_CLVS);
    let children = fields[0].children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].error(), Some(&DecodeError::ShortIsNeighbor(0)));
}

//
// Protocols Supported.
//

#[test]
fn test_protocols_supported() {
    let fields =
        test_decode_clvs(&[0x81, 0x03, 0xcc, 0x8e, 0x42], &P2P_HELLO_CLVS);
    assert_eq!(
        lines(fields[0].children()),
        vec![
            "NLPID: IPv4 (0xcc)",
            "NLPID: IPv6 (0x8e)",
            "NLPID: Unknown (0x42)",
        ]
    );
}

//
// Interface addresses.
//

#[test]
fn test_ipv4_addrs() {
    let fields = test_decode_clvs(
        &[0x84, 0x08, 0x0a, 0x00, 0x01, 0x01, 0xc0, 0xa8, 0x00, 0x01],
        &L1_HELLO_CLVS,
    );
    assert_eq!(fields[0].label, "IP Interface address(es) (8)");
    let addrs = fields[0]
        .children()
        .iter()
        .map(|field| field.value.as_text().unwrap().clone())
        .collect::<Vec<_>>();
    assert_eq!(
        addrs,
        vec![
            ip4!("10.0.1.1").to_string(),
            ip4!("192.168.0.1").to_string()
        ]
    );
}

#[test]
fn test_ipv4_addrs_short() {
    let fields =
        test_decode_clvs(&[0x84, 0x03, 0x0a, 0x00, 0x01], &L1_HELLO_CLVS);
    let children = fields[0].children();
    assert_eq!(children.len(), 1);
    assert_eq!(
        children[0].to_string(),
        "Malformed: short IPv4 interface address (3 vs 4)"
    );
}

#[test]
fn test_ipv6_addrs() {
    let addr = ip6!("fe80::1");
    let mut bytes = vec![0xe8, 0x10];
    bytes.extend(addr.octets());
    let fields = test_decode_clvs(&bytes, &P2P_HELLO_CLVS);
    assert_eq!(fields[0].label, "IPv6 Interface address(es) (16)");
    assert_eq!(
        fields[0].children()[0].value,
        FieldValue::Text(addr.to_string())
    );

    // Value cut short by the end of the region.
    let fields = test_decode_clvs(&bytes[..10], &P2P_HELLO_CLVS);
    assert_eq!(fields.len(), 1);
    assert!(fields[0].is_malformed());
}

//
// Authentication.
//

#[test]
fn test_authentication() {
    let fields = test_decode_clvs(
        &[0x0a, 0x05, 0x01, 0x48, 0x4f, 0x4c, 0x4f],
        &L1_HELLO_CLVS,
    );
    assert_eq!(fields[0].label, "Authentication (5)");
    let children = fields[0].children();
    assert_eq!(children[0].to_string(), "Authentication type: clear text");
    assert_eq!(children[1].label, "Authentication data (length 4)");
    assert_eq!(children[1].range(), 3..7);
    let data = children[1].value.as_raw().unwrap();
    assert_eq_hex!(b"HOLO", &data[..]);
}

#[test]
fn test_authentication_non_std() {
    let fields = test_decode_clvs(
        &[0x85, 0x03, 0x36, 0x01, 0x02],
        &P2P_HELLO_CLVS,
    );
    assert_eq!(fields[0].label, "Authentication(non spec) (3)");
    assert_eq!(
        lines(fields[0].children()),
        vec![
            "Authentication type: hmac-md5",
            "Authentication data (length 2): 0102 (2 byte(s))",
        ]
    );
}

#[test]
fn test_authentication_unknown_type() {
    let fields = test_decode_clvs(&[0x0a, 0x01, 0x63], &L1_HELLO_CLVS);
    assert_eq!(
        lines(fields[0].children()),
        vec![
            "Authentication type: unknown (99)",
            "Authentication data (length 0): <empty>",
        ]
    );
}

#[test]
fn test_authentication_missing_type() {
    let fields = test_decode_clvs(&[0x0a, 0x00], &L1_HELLO_CLVS);
    let children = fields[0].children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].error(), Some(&DecodeError::MissingAuthType));
}

//
// Multi Topology.
//

#[test]
fn test_multi_topology() {
    let fields = test_decode_clvs(
        &[0xe5, 0x06, 0x40, 0x00, 0x0f, 0xa0, 0x00, 0x09],
        &L1_HELLO_CLVS,
    );
    assert_eq!(
        lines(fields[0].children()),
        vec![
            "Multi Topology: IPv4 unicast Topology (0x000), ATT bit set",
            "Multi Topology: Development, Experimental and Proprietary Topology (0xfa0)",
            "Multi Topology: Reserved for IETF Consensus Topology (0x009)",
        ]
    );
}

#[test]
fn test_multi_topology_reserved_bit() {
    let fields = test_decode_clvs(&[0xe5, 0x02, 0x10, 0x02], &P2P_HELLO_CLVS);
    let entry = &fields[0].children()[0];
    assert_eq!(
        entry.value,
        FieldValue::Text("IPv6 unicast Topology (0x002)".to_owned())
    );
    assert_eq!(
        entry.annotations,
        vec![Annotation::ReservedBitsNonzero {
            mask: 0x1000,
            value: 0x1000,
        }]
    );
}

#[test]
fn test_multi_topology_odd_length() {
    let fields =
        test_decode_clvs(&[0xe5, 0x03, 0x00, 0x02, 0x00], &L1_HELLO_CLVS);
    let children = fields[0].children();
    assert_eq!(children.len(), 1);
    assert_eq!(
        children[0].to_string(),
        "Malformed: malformed MT-ID (3 vs multiple of 2)"
    );
}

//
// Point-to-Point Adjacency State.
//

#[test]
fn test_ptp_adjacency_state_only() {
    let fields = test_decode_clvs(&[0xf0, 0x01, 0x00], &P2P_HELLO_CLVS);
    assert_eq!(fields[0].label, "point-to-point Adjacency State (1)");
    assert_eq!(lines(fields[0].children()), vec!["Adjacency State: Up"]);
}

#[test]
fn test_ptp_adjacency_shapes() {
    let value = [
        0x01, 0x00, 0x00, 0xab, 0xcd, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, 0x00,
        0x00, 0x00, 0x02,
    ];
    for (len, count) in [(1, 1), (5, 2), (11, 3), (15, 4)] {
        let mut bytes = vec![0xf0, len as u8];
        bytes.extend(&value[..len]);
        let fields = test_decode_clvs(&bytes, &P2P_HELLO_CLVS);
        assert_eq!(fields[0].children().len(), count);
        assert!(!fields[0].iter().any(|field| field.is_malformed()));
    }

    let mut bytes = vec![0xf0, 0x0f];
    bytes.extend(value);
    let fields = test_decode_clvs(&bytes, &P2P_HELLO_CLVS);
    assert_eq!(
        lines(fields[0].children()),
        vec![
            "Adjacency State: Initializing",
            "Extended Local circuit ID: 0x0000abcd",
            "Neighbor SystemID: 0000.0000.0007",
            "Neighbor Extended Local circuit ID: 0x00000002",
        ]
    );
}

#[test]
fn test_ptp_adjacency_invalid_length() {
    let fields =
        test_decode_clvs(&[0xf0, 0x03, 0x00, 0x00, 0x00], &P2P_HELLO_CLVS);
    let children = fields[0].children();
    assert_eq!(children.len(), 1);
    assert_eq!(
        children[0].error(),
        Some(&DecodeError::InvalidPtpAdjLength(3))
    );
    assert_eq!(
        children[0].to_string(),
        "Malformed: malformed TLV (3 vs 1,5,11,15)"
    );
}

#[test]
fn test_ptp_adjacency_long_id_len() {
    // The neighbor system ID keeps its six bytes with 8-byte system IDs.
    let value = [
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x09, 0x00,
        0x00, 0x00, 0x03,
    ];
    for (len, count) in [(11, 3), (15, 4)] {
        let mut bytes = vec![0xf0, len as u8];
        bytes.extend(&value[..len]);
        let fields = test_decode_clvs_id_len(&bytes, &P2P_HELLO_CLVS, 8);
        let children = fields[0].children();
        assert_eq!(children.len(), count);
        assert_eq!(
            children[2].to_string(),
            "Neighbor SystemID: 0000.0000.0009"
        );
        assert_eq!(children[2].range(), 7..13);
    }

    let mut bytes = vec![0xf0, 0x0d];
    bytes.extend([0x00; 13]);
    let fields = test_decode_clvs_id_len(&bytes, &P2P_HELLO_CLVS, 8);
    assert_eq!(
        lines(fields[0].children()),
        vec!["Malformed: malformed TLV (13 vs 1,5,11,15)"]
    );
}

#[test]
fn test_ptp_adjacency_illegal_state() {
    let fields = test_decode_clvs(&[0xf0, 0x01, 0x07], &P2P_HELLO_CLVS);
    let state = &fields[0].children()[0];
    assert!(!state.is_malformed());
    assert_eq!(state.annotations, vec![Annotation::IllegalValue(7)]);
    assert_eq!(
        state.to_string(),
        "Adjacency State: Unknown (7) [illegal value 7]"
    );
}

//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//
#![no_main]

use bytes::Bytes;
use holo_isis_hello::packet::clv::dissect_clvs;
use holo_isis_hello::packet::consts::SYSTEM_ID_LEN;
use holo_isis_hello::packet::cursor::ByteCursor;
use holo_isis_hello::packet::registry::{L1_HELLO_CLVS, P2P_HELLO_CLVS};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    let cursor = ByteCursor::new(&bytes);
    for registry in [&L1_HELLO_CLVS, &P2P_HELLO_CLVS] {
        let _ = dissect_clvs(&cursor, 0, bytes.len(), registry, SYSTEM_ID_LEN);
    }
});

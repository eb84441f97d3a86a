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
use holo_isis_hello::config::HelloConfig;
use holo_isis_hello::packet::pdu::dissect_pdu;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    let _ = dissect_pdu(&bytes, &HelloConfig::default());
});

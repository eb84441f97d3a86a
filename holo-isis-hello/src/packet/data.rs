//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use crate::field::Field;
use crate::packet::cursor::ByteCursor;
use crate::packet::malformed_record;

// Reports everything from `offset` to the end of the cursor as opaque data.
pub fn dissect_data(cursor: &ByteCursor<'_>, offset: usize) -> Field {
    let length = cursor.remaining(offset);
    match cursor.slice(offset, length) {
        Ok(data) => Field::raw("Data", offset, data),
        Err(error) => malformed_record(offset, length, error),
    }
}

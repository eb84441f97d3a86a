//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use serde::{Deserialize, Serialize};

// IS-IS Hello dissector configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelloConfig {
    // When disabled, Hello PDUs are reported as opaque data.
    pub enabled: bool,
}

// ===== impl HelloConfig =====

impl Default for HelloConfig {
    fn default() -> HelloConfig {
        HelloConfig { enabled: true }
    }
}

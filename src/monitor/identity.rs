// SPDX-License-Identifier: GPL-3.0-only
//! Duplicate-monitor identity
//!
//! Monitors attached through DisplayPort MST can show up twice in
//! `ddcutil detect`, once per link, with identical EDID blocks. Detection
//! compares the EDID serial pair of every candidate block against the ones
//! already accepted and drops repeats.

use crate::parse::Node;

/// EDID-derived identity of one physical monitor.
///
/// Some monitors populate only one of the two serial fields, so both take
/// part in the comparison and an empty field never matches anything. Two
/// blocks that both lack serial data are treated as distinct monitors.
#[derive(Debug)]
pub struct MonitorId {
    serial_number: String,
    binary_serial_number: String,
}

impl MonitorId {
    /// Extract the identity from one `Display N` block. Absent EDID fields
    /// become empty strings rather than errors.
    pub fn from_display_block(node: &Node) -> Self {
        Self {
            serial_number: edid_value_or_empty(node, "Serial number"),
            binary_serial_number: edid_value_or_empty(node, "Binary serial number"),
        }
    }
}

impl PartialEq for MonitorId {
    fn eq(&self, other: &Self) -> bool {
        if self.serial_number.is_empty()
            || other.serial_number.is_empty()
            || self.serial_number != other.serial_number
        {
            return false;
        }
        if self.binary_serial_number.is_empty()
            || other.binary_serial_number.is_empty()
            || self.binary_serial_number != other.binary_serial_number
        {
            return false;
        }
        true
    }
}

fn edid_value_or_empty(node: &Node, field: &str) -> String {
    node.child("EDID synopsis")
        .and_then(|edid| edid.child(field))
        .map(|child| child.value.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_id(serial: &str, binary: &str) -> MonitorId {
        MonitorId {
            serial_number: serial.to_owned(),
            binary_serial_number: binary.to_owned(),
        }
    }

    #[test]
    fn test_identical_serial_pairs_are_equal() {
        assert_eq!(create_id("SN1", "BN1"), create_id("SN1", "BN1"));
    }

    #[test]
    fn test_differing_serials_are_unequal() {
        assert_ne!(create_id("SN1", "BN1"), create_id("SN2", "BN1"));
        assert_ne!(create_id("SN1", "BN1"), create_id("SN1", "BN2"));
    }

    #[test]
    fn test_missing_data_never_matches() {
        // Monitors without serial data must not collapse into one another.
        assert_ne!(create_id("", ""), create_id("", ""));
        assert_ne!(create_id("SN1", ""), create_id("SN1", ""));
        assert_ne!(create_id("", "BN1"), create_id("", "BN1"));
        assert_ne!(create_id("SN1", "BN1"), create_id("SN1", ""));
    }

    #[test]
    fn test_extraction_defaults_to_empty() {
        let root = Node::parse(["Display 1", "   I2C bus: /dev/i2c-7"]);
        let id = MonitorId::from_display_block(&root.children[0]);
        assert!(id.serial_number.is_empty());
        assert!(id.binary_serial_number.is_empty());
    }
}

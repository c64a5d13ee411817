//! Canned activity-message catalog.

/// Messages the activity generator picks from, uniformly at random.
pub const ACTIVITY_MESSAGES: [&str; 6] = [
    "Device FVM-001 completed transaction",
    "Maintenance scheduled for GTE-234",
    "New user registered",
    "Payment processor updated",
    "Network connectivity restored",
    "Fare adjustment processed",
];

/// Device-code prefixes used for synthetic event attribution.
pub const DEVICE_PREFIXES: [&str; 3] = ["FVM", "RDR", "GTE"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entries_non_empty() {
        assert!(ACTIVITY_MESSAGES.iter().all(|m| !m.is_empty()));
        assert!(DEVICE_PREFIXES.iter().all(|p| p.len() == 3));
    }
}

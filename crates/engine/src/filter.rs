//! Device filter projection.

use std::collections::HashMap;

use catalog::{population, CityId, Device};

/// Filter key the device table understands.
pub const DEVICE_TYPE_FILTER: &str = "deviceType";

/// Project the visible device list from the static sample population.
///
/// Pure: the result depends only on the arguments. The type filter is a
/// case-insensitive substring match against the device type ("all" or an
/// absent key disables it); the search term matches device id, type, or
/// location. Both predicates must hold; source order is preserved.
pub fn filtered_devices(
    city: CityId,
    filters: &HashMap<String, String>,
    search_term: &str,
) -> Vec<&'static Device> {
    let type_filter = filters
        .get(DEVICE_TYPE_FILTER)
        .map(|value| value.to_lowercase())
        .filter(|value| !value.is_empty() && value != "all");
    let search = search_term.to_lowercase();

    population::sample_devices(city)
        .iter()
        .filter(|device| match &type_filter {
            Some(wanted) => device
                .device_type
                .as_str()
                .to_lowercase()
                .contains(wanted.as_str()),
            None => true,
        })
        .filter(|device| {
            if search.is_empty() {
                return true;
            }
            device.device.to_lowercase().contains(&search)
                || device.device_type.as_str().to_lowercase().contains(&search)
                || device.location.to_lowercase().contains(&search)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_filter(value: &str) -> HashMap<String, String> {
        HashMap::from([(DEVICE_TYPE_FILTER.to_string(), value.to_string())])
    }

    fn ids(devices: &[&Device]) -> Vec<&'static str> {
        devices.iter().map(|d| d.device).collect()
    }

    #[test]
    fn test_no_filters_returns_whole_population() {
        let devices = filtered_devices(CityId::Boston, &HashMap::new(), "");
        assert_eq!(devices.len(), 6);
        assert_eq!(devices[0].device, "FVM-001");
    }

    #[test]
    fn test_type_filter_reader() {
        let devices = filtered_devices(CityId::Boston, &type_filter("reader"), "");
        assert_eq!(ids(&devices), vec!["RDR-156", "RDR-234"]);
    }

    #[test]
    fn test_type_filter_all_disables_filtering() {
        let devices = filtered_devices(CityId::Boston, &type_filter("all"), "");
        assert_eq!(devices.len(), 6);
    }

    #[test]
    fn test_type_filter_is_case_insensitive() {
        let devices = filtered_devices(CityId::Boston, &type_filter("GATE"), "");
        assert_eq!(ids(&devices), vec!["GTE-289"]);
    }

    #[test]
    fn test_search_matches_location() {
        let devices = filtered_devices(CityId::Boston, &HashMap::new(), "airport");
        assert_eq!(ids(&devices), vec!["FVM-043", "FVM-089"]);
    }

    #[test]
    fn test_search_matches_device_id() {
        let devices = filtered_devices(CityId::Boston, &HashMap::new(), "rdr-156");
        assert_eq!(ids(&devices), vec!["RDR-156"]);
    }

    #[test]
    fn test_search_matches_type() {
        let devices = filtered_devices(CityId::Philadelphia, &HashMap::new(), "gate");
        assert_eq!(ids(&devices), vec!["GTE-445"]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let devices = filtered_devices(CityId::Boston, &type_filter("fvm"), "downtown");
        assert_eq!(ids(&devices), vec!["FVM-001"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let devices = filtered_devices(CityId::Philadelphia, &HashMap::new(), "harbor");
        assert!(devices.is_empty());
    }

    #[test]
    fn test_projection_has_no_hidden_state() {
        let filters = type_filter("reader");
        let first = ids(&filtered_devices(CityId::Boston, &filters, ""));
        let second = ids(&filtered_devices(CityId::Boston, &filters, ""));
        assert_eq!(first, second);
    }
}

//! Static device inventory summaries per city.
//!
//! Fleet-wide counts by device class. These are contract-level figures
//! refreshed out of band, not live telemetry.

use serde::Serialize;

use crate::cities::CityId;

/// Counts for one device class at a site.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DeviceClassInventory {
    pub total: u32,
    pub operational: u32,
    pub critical: u32,
    pub warning: u32,
}

/// Inventory summary for a whole site.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CityInventory {
    pub readers: DeviceClassInventory,
    pub fvms: DeviceClassInventory,
    pub gates: DeviceClassInventory,
}

/// Static inventory summary for a city.
pub fn inventory(city: CityId) -> &'static CityInventory {
    match city {
        CityId::Boston => &BOSTON_INVENTORY,
        CityId::Philadelphia => &PHILADELPHIA_INVENTORY,
    }
}

static BOSTON_INVENTORY: CityInventory = CityInventory {
    readers: DeviceClassInventory {
        total: 450,
        operational: 425,
        critical: 8,
        warning: 17,
    },
    fvms: DeviceClassInventory {
        total: 298,
        operational: 285,
        critical: 3,
        warning: 10,
    },
    gates: DeviceClassInventory {
        total: 499,
        operational: 464,
        critical: 1,
        warning: 34,
    },
};

static PHILADELPHIA_INVENTORY: CityInventory = CityInventory {
    readers: DeviceClassInventory {
        total: 320,
        operational: 305,
        critical: 5,
        warning: 10,
    },
    fvms: DeviceClassInventory {
        total: 185,
        operational: 178,
        critical: 2,
        warning: 5,
    },
    gates: DeviceClassInventory {
        total: 387,
        operational: 362,
        critical: 3,
        warning: 22,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_boston() {
        let inv = inventory(CityId::Boston);
        assert_eq!(inv.readers.total, 450);
        assert_eq!(inv.fvms.operational, 285);
        assert_eq!(inv.gates.warning, 34);
    }

    #[test]
    fn test_inventory_philadelphia() {
        let inv = inventory(CityId::Philadelphia);
        assert_eq!(inv.readers.total, 320);
        assert_eq!(inv.gates.critical, 3);
    }

    #[test]
    fn test_inventory_counts_consistent() {
        for city in CityId::ALL {
            let inv = inventory(city);
            for class in [inv.readers, inv.fvms, inv.gates] {
                assert!(class.operational <= class.total);
                assert!(class.critical + class.warning <= class.total);
            }
        }
    }
}

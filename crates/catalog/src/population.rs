//! Sample device population for predictive monitoring.
//!
//! A fixed set of devices per city with precomputed health and failure
//! predictions. Immutable reference data; the engine filters it but never
//! mutates it.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::cities::CityId;

/// Device hardware class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceType {
    #[serde(rename = "FVM")]
    Fvm,
    Reader,
    Gate,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fvm => "FVM",
            Self::Reader => "Reader",
            Self::Gate => "Gate",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Labeled health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Good,
    Warning,
    Critical,
    Unknown,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relative utilization band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UsageLevel {
    High,
    Medium,
    Low,
}

/// One device in the sample population.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device: &'static str,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// Days until the predicted failure.
    pub predicted_failure: u32,
    /// Prediction confidence, percent.
    pub confidence: u8,
    /// Health score, percent.
    pub health: u8,
    pub status: DeviceStatus,
    pub location: &'static str,
    pub usage: UsageLevel,
}

const BOSTON_DEVICES: [Device; 6] = [
    Device {
        device: "FVM-001",
        device_type: DeviceType::Fvm,
        predicted_failure: 3,
        confidence: 89,
        health: 65,
        status: DeviceStatus::Critical,
        location: "Downtown",
        usage: UsageLevel::High,
    },
    Device {
        device: "FVM-043",
        device_type: DeviceType::Fvm,
        predicted_failure: 7,
        confidence: 76,
        health: 78,
        status: DeviceStatus::Warning,
        location: "Airport",
        usage: UsageLevel::Medium,
    },
    Device {
        device: "RDR-156",
        device_type: DeviceType::Reader,
        predicted_failure: 5,
        confidence: 82,
        health: 71,
        status: DeviceStatus::Critical,
        location: "Suburban",
        usage: UsageLevel::Low,
    },
    Device {
        device: "GTE-289",
        device_type: DeviceType::Gate,
        predicted_failure: 12,
        confidence: 91,
        health: 85,
        status: DeviceStatus::Good,
        location: "Downtown",
        usage: UsageLevel::High,
    },
    Device {
        device: "FVM-089",
        device_type: DeviceType::Fvm,
        predicted_failure: 15,
        confidence: 68,
        health: 88,
        status: DeviceStatus::Good,
        location: "Airport",
        usage: UsageLevel::Medium,
    },
    Device {
        device: "RDR-234",
        device_type: DeviceType::Reader,
        predicted_failure: 4,
        confidence: 94,
        health: 62,
        status: DeviceStatus::Critical,
        location: "Downtown",
        usage: UsageLevel::High,
    },
];

const PHILADELPHIA_DEVICES: [Device; 4] = [
    Device {
        device: "FVM-201",
        device_type: DeviceType::Fvm,
        predicted_failure: 6,
        confidence: 85,
        health: 72,
        status: DeviceStatus::Warning,
        location: "Downtown",
        usage: UsageLevel::Medium,
    },
    Device {
        device: "RDR-301",
        device_type: DeviceType::Reader,
        predicted_failure: 2,
        confidence: 92,
        health: 58,
        status: DeviceStatus::Critical,
        location: "Airport",
        usage: UsageLevel::High,
    },
    Device {
        device: "GTE-445",
        device_type: DeviceType::Gate,
        predicted_failure: 9,
        confidence: 78,
        health: 81,
        status: DeviceStatus::Good,
        location: "Suburban",
        usage: UsageLevel::Low,
    },
    Device {
        device: "FVM-187",
        device_type: DeviceType::Fvm,
        predicted_failure: 11,
        confidence: 73,
        health: 86,
        status: DeviceStatus::Good,
        location: "Downtown",
        usage: UsageLevel::Medium,
    },
];

lazy_static! {
    /// Index of every sample device by id, across all cities.
    static ref DEVICE_INDEX: HashMap<&'static str, &'static Device> = {
        let mut index = HashMap::new();
        for device in BOSTON_DEVICES.iter().chain(PHILADELPHIA_DEVICES.iter()) {
            index.insert(device.device, device);
        }
        index
    };
}

/// Sample device population for a city, in table order.
pub fn sample_devices(city: CityId) -> &'static [Device] {
    match city {
        CityId::Boston => &BOSTON_DEVICES,
        CityId::Philadelphia => &PHILADELPHIA_DEVICES,
    }
}

/// Look up a sample device by id, across all cities.
pub fn find_device(device_id: &str) -> Option<&'static Device> {
    DEVICE_INDEX.get(device_id).copied()
}

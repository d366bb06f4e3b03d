use super::{Ack, Envelope};
use crate::model::ChargerStatus;

record! {
    /// Charger attached to a system.
    pub struct EvChargerConfig {
        pub evcharger_sn: String = "evchargerSn",
        pub evcharger_model: String = "evchargerModel",
    }
}

record! {
    pub struct EvChargerCurrents {
        /// Household current limit
        pub currentsetting: f64 = "currentsetting",
    }
}

record! {
    pub struct EvChargerStatus {
        /// Raw status code, see [`EvChargerStatus::status`]
        pub evcharger_status: i64 = "evchargerStatus",
    }
}

impl EvChargerStatus {
    /// `None` for codes this crate does not know about.
    pub fn status(&self) -> Option<ChargerStatus> {
        num::FromPrimitive::from_i64(self.evcharger_status)
    }
}

pub type EvChargerConfigList = Envelope<Vec<EvChargerConfig>>;
pub type EvChargerCurrentsBySn = Envelope<EvChargerCurrents>;
pub type EvChargerStatusBySn = Envelope<Vec<EvChargerStatus>>;
pub type ControlEvCharger = Envelope<Option<Ack>>;

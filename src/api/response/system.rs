use super::{Ack, Envelope};

record! {
    /// System bound to the developer account.
    pub struct EssSystem {
        /// kWh
        pub battery_capacity: f64 = "cbat" | "cobat",
        pub ems_status: String = "emsStatus",
        /// Battery model
        pub mbat: String = "mbat",
        /// Inverter model
        pub minv: String = "minv",
        /// Inverter nominal power
        pub poinv: f64 = "poinv",
        /// PV nominal power
        pub popv: f64 = "popv",
        /// Remaining battery capacity
        pub surplus_cobat: f64 = "surplusCobat",
        pub sys_sn: String = "sysSn",
        /// Battery available percentage
        pub us_capacity: f64 = "usCapacity",
    }
}

pub type EssList = Envelope<Vec<EssSystem>>;
pub type VerificationCode = Envelope<Option<Ack>>;
pub type BindSn = Envelope<Option<Ack>>;
pub type UnBindSn = Envelope<Option<Ack>>;

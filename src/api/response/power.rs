use super::Envelope;
use chrono::NaiveDateTime;

type Watt = f64;

record! {
    /// Per-string PV power
    pub struct PpvDetail {
        pub ppv1: Watt = "ppv1",
        pub ppv2: Watt = "ppv2",
        pub ppv3: Watt = "ppv3",
        pub ppv4: Watt = "ppv4",
        pub pmeter_dc: Watt = "pmeterDc",
    }
}

record! {
    /// Per-phase grid meter power
    pub struct PgridDetail {
        pub pmeter_l1: Watt = "pmeterL1",
        pub pmeter_l2: Watt = "pmeterL2",
        pub pmeter_l3: Watt = "pmeterL3",
    }
}

record! {
    /// Per-charger power
    pub struct PevDetail {
        pub ev1_power: Watt = "ev1Power",
        pub ev2_power: Watt = "ev2Power",
        pub ev3_power: Watt = "ev3Power",
        pub ev4_power: Watt = "ev4Power",
    }
}

record! {
    /// Real-time power snapshot of one system.
    pub struct LastPower {
        /// Total PV power
        pub ppv: Watt = "ppv",
        pub ppv_detail: PpvDetail = "ppvDetail",
        pub pload: Watt = "pload",
        /// Battery state of charge, percent
        pub soc: f64 = "soc",
        /// Positive when importing from the grid, negative when feeding in
        pub pgrid: Watt = "pgrid",
        pub pgrid_detail: PgridDetail = "pgridDetail",
        pub pbat: Watt = "pbat",
        pub preal_l1: Watt = "prealL1",
        pub preal_l2: Watt = "prealL2",
        pub preal_l3: Watt = "prealL3",
        /// Total power of all chargers
        pub pev: Watt = "pev",
        pub pev_detail: PevDetail = "pevDetail",
    }
}

record! {
    /// One sample of the daily power series.
    pub struct PowerSample {
        pub battery_soc: f64 = "cbat" | "cobat",
        pub feed_in: Watt = "feedIn",
        pub grid_charge: Watt = "gridCharge",
        pub load: Watt = "load",
        pub pcharging_pile: Watt = "pchargingPile",
        pub ppv: Watt = "ppv",
        pub sys_sn: String = "sysSn",
        pub upload_time: NaiveDateTime = "uploadTime",
    }
}

pub type LastPowerData = Envelope<LastPower>;
pub type OneDayPowerBySn = Envelope<Vec<PowerSample>>;

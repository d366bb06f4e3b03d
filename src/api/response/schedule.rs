use super::Envelope;
use crate::model::TimeWindow;
use chrono::NaiveTime;

record! {
    /// Battery charging schedule.
    pub struct ChargeConfig {
        /// Charging stops at this SOC, percent
        pub bat_high_cap: f64 = "batHighCap",
        /// 1 when charging from the grid is enabled
        pub grid_charge: i64 = "gridCharge",
        pub time_chae1: NaiveTime = "timeChae1",
        pub time_chae2: NaiveTime = "timeChae2",
        pub time_chaf1: NaiveTime = "timeChaf1",
        pub time_chaf2: NaiveTime = "timeChaf2",
    }
}

impl ChargeConfig {
    pub fn period1(&self) -> TimeWindow {
        TimeWindow::new(self.time_chaf1, self.time_chae1)
    }

    pub fn period2(&self) -> TimeWindow {
        TimeWindow::new(self.time_chaf2, self.time_chae2)
    }
}

record! {
    /// Battery discharging schedule.
    pub struct DischargeConfig {
        /// Discharging stops at this SOC, percent
        pub bat_use_cap: f64 = "batUseCap",
        /// 1 when discharge is limited to the configured periods
        pub ctr_dis: i64 = "ctrDis",
        pub time_dise1: NaiveTime = "timeDise1",
        pub time_dise2: NaiveTime = "timeDise2",
        pub time_disf1: NaiveTime = "timeDisf1",
        pub time_disf2: NaiveTime = "timeDisf2",
    }
}

impl DischargeConfig {
    pub fn period1(&self) -> TimeWindow {
        TimeWindow::new(self.time_disf1, self.time_dise1)
    }

    pub fn period2(&self) -> TimeWindow {
        TimeWindow::new(self.time_disf2, self.time_dise2)
    }
}

pub type ChargeConfigInfo = Envelope<ChargeConfig>;
pub type DisChargeConfigInfo = Envelope<DischargeConfig>;

use super::Envelope;
use chrono::NaiveDate;

type KWh = f64;

record! {
    /// System summary as shown on the vendor's dashboard.
    pub struct SumData {
        pub epv_today: KWh = "epvtoday",
        pub epv_total: KWh = "epvtotal",
        pub eload: KWh = "eload",
        /// Fed into the grid today
        pub eoutput: KWh = "eoutput",
        /// Consumed from the grid today
        pub einput: KWh = "einput",
        pub echarge: KWh = "echarge",
        pub edischarge: KWh = "edischarge",
        pub today_income: f64 = "todayIncome",
        pub total_income: f64 = "totalIncome",
        /// Percent
        pub eself_consumption: f64 = "eselfConsumption",
        /// Percent
        pub eself_sufficiency: f64 = "eselfSufficiency",
        pub tree_num: f64 = "treeNum",
        /// kg of CO2 avoided
        pub carbon_num: f64 = "carbonNum",
        /// Currency of the income fields
        pub money_type: String = "moneyType",
    }
}

record! {
    /// Energy totals of a single day.
    pub struct DateEnergy {
        pub e_charge: KWh = "eCharge",
        pub e_charging_pile: KWh = "eChargingPile",
        pub e_discharge: KWh = "eDischarge",
        pub e_grid_charge: KWh = "eGridCharge",
        pub e_input: KWh = "eInput",
        pub e_output: KWh = "eOutput",
        pub epv: KWh = "epv",
        pub sys_sn: String = "sysSn",
        pub the_date: NaiveDate = "theDate",
    }
}

pub type SumDataForCustomer = Envelope<SumData>;
pub type OneDateEnergyBySn = Envelope<DateEnergy>;

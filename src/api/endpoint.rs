pub type Endpoint = str;

pub const EV_CHARGER_CONFIG_LIST: &Endpoint = "/getEvChargerConfigList";
pub const EV_CHARGER_CURRENTS: &Endpoint = "/getEvChargerCurrentsBySn";
pub const SET_EV_CHARGER_CURRENTS: &Endpoint = "/setEvChargerCurrentsBySn";
pub const EV_CHARGER_STATUS: &Endpoint = "/getEvChargerStatusBySn";
pub const REMOTE_CONTROL_EV_CHARGER: &Endpoint = "/remoteControlEvCharger";
pub const SUM_DATA: &Endpoint = "/getSumDataForCustomer";
pub const LAST_POWER_DATA: &Endpoint = "/getLastPowerData";
pub const ONE_DAY_POWER: &Endpoint = "/getOneDayPowerBySn";
pub const ONE_DATE_ENERGY: &Endpoint = "/getOneDateEnergyBySn";
pub const CHARGE_CONFIG: &Endpoint = "/getChargeConfigInfo";
pub const UPDATE_CHARGE_CONFIG: &Endpoint = "/updateChargeConfigInfo";
pub const DISCHARGE_CONFIG: &Endpoint = "/getDisChargeConfigInfo";
pub const UPDATE_DISCHARGE_CONFIG: &Endpoint = "/updateDisChargeConfigInfo";
pub const VERIFICATION_CODE: &Endpoint = "/getVerificationCode";
pub const BIND_SN: &Endpoint = "/bindSn";
pub const UNBIND_SN: &Endpoint = "/unBindSn";
pub const ESS_LIST: &Endpoint = "/getEssList";

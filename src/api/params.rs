//! Caller input checks and the wire bodies built from them. Everything here runs before a
//! request is signed, so a rejected argument never reaches the network.

use super::error::ParameterError;
use crate::model::{ChargeSettings, ControlMode, DischargeSettings, TimeWindow};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

/// Schedule times must sit on this grid, in minutes.
const SCHEDULE_STEP: u32 = 15;

/// Serial numbers and codes: trimmed, non-empty, single token.
pub fn identifier(parameter: &'static str, value: &str) -> Result<String, ParameterError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        Err(ParameterError::new(parameter, value, "must not be empty"))
    } else if trimmed.chars().any(char::is_whitespace) {
        Err(ParameterError::new(
            parameter,
            value,
            "must not contain whitespace",
        ))
    } else {
        Ok(trimmed.to_owned())
    }
}

pub fn current_setting(value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::new(
            "currentsetting",
            value,
            "must be a positive number",
        ))
    }
}

pub fn percent(parameter: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ParameterError::new(
            parameter,
            value,
            "must be between 0 and 100",
        ))
    }
}

pub fn schedule_time(parameter: &'static str, time: NaiveTime) -> Result<String, ParameterError> {
    if time.second() != 0 || time.nanosecond() != 0 || time.minute() % SCHEDULE_STEP != 0 {
        Err(ParameterError::new(
            parameter,
            time,
            "must be a whole quarter hour (00:00 to 23:45)",
        ))
    } else {
        Ok(time.format("%H:%M").to_string())
    }
}

pub fn query_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn flag(enabled: bool) -> u8 {
    if enabled {
        1
    } else {
        0
    }
}

fn window(
    window: &TimeWindow,
    start: &'static str,
    end: &'static str,
) -> Result<(String, String), ParameterError> {
    Ok((schedule_time(start, window.start)?, schedule_time(end, window.end)?))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SysSnRequest {
    pub sys_sn: String,
}

impl SysSnRequest {
    pub fn new(sys_sn: &str) -> Result<Self, ParameterError> {
        Ok(SysSnRequest {
            sys_sn: identifier("sysSn", sys_sn)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCurrentRequest {
    pub sys_sn: String,
    pub currentsetting: f64,
}

impl SetCurrentRequest {
    pub fn new(sys_sn: &str, currentsetting: f64) -> Result<Self, ParameterError> {
        Ok(SetCurrentRequest {
            sys_sn: identifier("sysSn", sys_sn)?,
            currentsetting: current_setting(currentsetting)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteControlRequest {
    pub sys_sn: String,
    pub evcharger_sn: String,
    pub control_mode: u8,
}

impl RemoteControlRequest {
    pub fn new(
        sys_sn: &str,
        evcharger_sn: &str,
        control_mode: ControlMode,
    ) -> Result<Self, ParameterError> {
        Ok(RemoteControlRequest {
            sys_sn: identifier("sysSn", sys_sn)?,
            evcharger_sn: identifier("evchargerSn", evcharger_sn)?,
            control_mode: control_mode as u8,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeConfigRequest {
    pub sys_sn: String,
    pub bat_high_cap: f64,
    pub grid_charge: u8,
    pub time_chaf1: String,
    pub time_chae1: String,
    pub time_chaf2: String,
    pub time_chae2: String,
}

impl ChargeConfigRequest {
    pub fn new(sys_sn: &str, settings: &ChargeSettings) -> Result<Self, ParameterError> {
        let (time_chaf1, time_chae1) = window(&settings.period1, "timeChaf1", "timeChae1")?;
        let (time_chaf2, time_chae2) = window(&settings.period2, "timeChaf2", "timeChae2")?;

        Ok(ChargeConfigRequest {
            sys_sn: identifier("sysSn", sys_sn)?,
            bat_high_cap: percent("batHighCap", settings.bat_high_cap)?,
            grid_charge: flag(settings.grid_charge),
            time_chaf1,
            time_chae1,
            time_chaf2,
            time_chae2,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DischargeConfigRequest {
    pub sys_sn: String,
    pub bat_use_cap: f64,
    pub ctr_dis: u8,
    pub time_disf1: String,
    pub time_dise1: String,
    pub time_disf2: String,
    pub time_dise2: String,
}

impl DischargeConfigRequest {
    pub fn new(sys_sn: &str, settings: &DischargeSettings) -> Result<Self, ParameterError> {
        let (time_disf1, time_dise1) = window(&settings.period1, "timeDisf1", "timeDise1")?;
        let (time_disf2, time_dise2) = window(&settings.period2, "timeDisf2", "timeDise2")?;

        Ok(DischargeConfigRequest {
            sys_sn: identifier("sysSn", sys_sn)?,
            bat_use_cap: percent("batUseCap", settings.bat_use_cap)?,
            ctr_dis: flag(settings.ctr_dis),
            time_disf1,
            time_dise1,
            time_disf2,
            time_dise2,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindRequest {
    pub sys_sn: String,
    pub code: String,
}

impl BindRequest {
    pub fn new(sys_sn: &str, code: &str) -> Result<Self, ParameterError> {
        Ok(BindRequest {
            sys_sn: identifier("sysSn", sys_sn)?,
            code: identifier("code", code)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn charge_settings() -> ChargeSettings {
        ChargeSettings {
            bat_high_cap: 95.0,
            grid_charge: true,
            period1: TimeWindow::new(hm(14, 0), hm(16, 45)),
            period2: TimeWindow::new(hm(0, 0), hm(0, 0)),
        }
    }

    #[test]
    fn identifiers() {
        assert_eq!("AL2002321010043", identifier("sysSn", " AL2002321010043 ").unwrap());

        let err = identifier("sysSn", "   ").unwrap_err();
        assert_eq!("sysSn", err.parameter);
        assert!(identifier("sysSn", "AL20 02").is_err());
    }

    #[test]
    fn current_must_be_positive() {
        assert_eq!(16.0, current_setting(16.0).unwrap());
        assert!(current_setting(0.0).is_err());
        assert!(current_setting(-6.0).is_err());
        assert!(current_setting(f64::NAN).is_err());
    }

    #[test]
    fn percent_range() {
        assert!(percent("batHighCap", 0.0).is_ok());
        assert!(percent("batHighCap", 100.0).is_ok());
        let err = percent("batHighCap", 100.5).unwrap_err();
        assert_eq!("batHighCap", err.parameter);
        assert_eq!("100.5", err.value);
    }

    #[test]
    fn schedule_times_on_quarter_hours() {
        assert_eq!("23:45", schedule_time("timeChae1", hm(23, 45)).unwrap());
        assert_eq!("00:15", schedule_time("timeChae1", hm(0, 15)).unwrap());
        assert!(schedule_time("timeChae1", hm(10, 10)).is_err());
        assert!(schedule_time("timeChae1", NaiveTime::from_hms_opt(10, 15, 30).unwrap()).is_err());
    }

    #[test]
    fn charge_config_wire_body() {
        let request = ChargeConfigRequest::new("SN1", &charge_settings()).unwrap();
        assert_eq!(
            json!({
                "sysSn": "SN1",
                "batHighCap": 95.0,
                "gridCharge": 1,
                "timeChaf1": "14:00",
                "timeChae1": "16:45",
                "timeChaf2": "00:00",
                "timeChae2": "00:00",
            }),
            serde_json::to_value(&request).unwrap()
        );
    }

    #[test]
    fn charge_config_rejects_off_grid_time() {
        let mut settings = charge_settings();
        settings.period2.end = hm(7, 20);

        let err = ChargeConfigRequest::new("SN1", &settings).unwrap_err();
        assert_eq!("timeChae2", err.parameter);
    }

    #[test]
    fn discharge_config_wire_body() {
        let settings = DischargeSettings {
            bat_use_cap: 10.0,
            ctr_dis: false,
            period1: TimeWindow::new(hm(0, 0), hm(0, 0)),
            period2: TimeWindow::new(hm(5, 0), hm(6, 0)),
        };
        let request = DischargeConfigRequest::new("SN1", &settings).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(json!(0), body["ctrDis"]);
        assert_eq!(json!("05:00"), body["timeDisf2"]);
        assert_eq!(json!("06:00"), body["timeDise2"]);
        assert_eq!(json!(10.0), body["batUseCap"]);
    }

    #[test]
    fn remote_control_wire_body() {
        let request = RemoteControlRequest::new("SN1", "EV1", ControlMode::Start).unwrap();
        assert_eq!(
            json!({"sysSn": "SN1", "evchargerSn": "EV1", "controlMode": 1}),
            serde_json::to_value(&request).unwrap()
        );
        assert!(RemoteControlRequest::new("SN1", "", ControlMode::Stop).is_err());
    }

    #[test]
    fn query_date_format() {
        assert_eq!(
            "2023-02-05",
            query_date(NaiveDate::from_ymd_opt(2023, 2, 5).unwrap())
        );
    }
}

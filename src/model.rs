use crate::api::error::ParameterError;
use chrono::NaiveTime;
use num_derive::FromPrimitive;
use serde::Deserialize;
use std::convert::TryFrom;
use std::fmt;

type Percent = f64;

/// Application secret issued by the vendor. Its value is only ever read to compute a request
/// signature; `Debug` and `Display` never show it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AppSecret(String);

impl AppSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        AppSecret(secret.into())
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret(<redacted>)")
    }
}

impl fmt::Display for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Application id and secret every request is signed with.
#[derive(Debug, Clone)]
pub struct Credentials {
    app_id: String,
    app_secret: AppSecret,
}

impl Credentials {
    /// Both values end up in an ASCII hash input, so anything else is refused here rather than
    /// at signing time.
    pub fn new(app_id: impl Into<String>, app_secret: AppSecret) -> Result<Self, ParameterError> {
        let app_id = app_id.into();

        if app_id.is_empty() || !app_id.is_ascii() {
            return Err(ParameterError::new(
                "appId",
                &app_id,
                "must be non-empty ASCII",
            ));
        }
        if app_secret.0.is_empty() || !app_secret.0.is_ascii() {
            return Err(ParameterError::new(
                "appSecret",
                &app_secret,
                "must be non-empty ASCII",
            ));
        }

        Ok(Credentials { app_id, app_secret })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub(crate) fn app_secret(&self) -> &AppSecret {
        &self.app_secret
    }
}

/// Remote command for an EV charger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
pub enum ControlMode {
    Stop = 0,
    Start = 1,
}

impl TryFrom<i64> for ControlMode {
    type Error = ParameterError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        num::FromPrimitive::from_i64(value).ok_or_else(|| {
            ParameterError::new(
                "controlMode",
                value,
                "expected 0 (stop charging) or 1 (start charging)",
            )
        })
    }
}

/// Charger state as reported by `getEvChargerStatusBySn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
pub enum ChargerStatus {
    /// Not plugged in
    Available = 1,
    /// Plugged in, not activated
    Preparing = 2,
    Charging = 3,
    /// Started, but the charger has no power available
    SuspendedEvse = 4,
    /// Power available, waiting for the vehicle
    SuspendedEv = 5,
    Finishing = 6,
    Faulted = 9,
}

/// One battery charge or discharge period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        TimeWindow { start, end }
    }
}

/// Settings written by `updateChargeConfigInfo`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSettings {
    /// Charging stops at this SOC
    pub bat_high_cap: Percent,
    /// Allow charging the battery from the grid
    pub grid_charge: bool,
    pub period1: TimeWindow,
    pub period2: TimeWindow,
}

/// Settings written by `updateDisChargeConfigInfo`.
#[derive(Debug, Clone, PartialEq)]
pub struct DischargeSettings {
    /// Discharging stops at this SOC
    pub bat_use_cap: Percent,
    /// Restrict battery discharge to the configured periods
    pub ctr_dis: bool,
    pub period1: TimeWindow,
    pub period2: TimeWindow,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn credentials_reject_non_ascii() {
        let err = Credentials::new("appid-ü", AppSecret::new("secret")).unwrap_err();
        assert_eq!("appId", err.parameter);

        let err = Credentials::new("appid", AppSecret::new("sécret-value")).unwrap_err();
        assert_eq!("appSecret", err.parameter);
        assert!(!err.to_string().contains("sécret-value"));
        assert_eq!("<redacted>", err.value);
    }

    #[test]
    fn credentials_reject_empty() {
        assert!(Credentials::new("", AppSecret::new("secret")).is_err());
        assert!(Credentials::new("appid", AppSecret::new("")).is_err());
    }

    #[test]
    fn secret_never_formatted() {
        let credentials = Credentials::new("appid", AppSecret::new("topsecret")).unwrap();
        assert!(!format!("{:?}", credentials).contains("topsecret"));
        assert!(!format!("{}", credentials.app_secret()).contains("topsecret"));
    }

    #[test]
    fn secret_deserializes_from_plain_string() {
        let secret: AppSecret = serde_json::from_str("\"topsecret\"").unwrap();
        assert_eq!("topsecret", secret.expose());
    }

    #[test]
    fn control_mode_from_raw() {
        assert_eq!(Ok(ControlMode::Stop), ControlMode::try_from(0i64));
        assert_eq!(Ok(ControlMode::Start), ControlMode::try_from(1i64));
        let err = ControlMode::try_from(2i64).unwrap_err();
        assert_eq!("controlMode", err.parameter);
        assert_eq!("2", err.value);
    }
}

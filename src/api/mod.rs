pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod params;
pub mod response;
pub mod sign;

use crate::model::{ChargeSettings, ControlMode, Credentials, DischargeSettings};
use chrono::NaiveDate;
pub use error::{Error, ParameterError, RequestError, SchemaValidationError};
use params::{
    BindRequest, ChargeConfigRequest, DischargeConfigRequest, RemoteControlRequest,
    SetCurrentRequest, SysSnRequest,
};
use reqwest::RequestBuilder;
use response::Record;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

pub const API_URL: &str = "https://openapi.alphaess.com/api";

/// Client for the AlphaESS open API. Holds nothing but configuration; every call signs its
/// own request and uses its own connection.
#[derive(Debug, Clone)]
pub struct AlphaEssApi {
    api_url: String,
    credentials: Credentials,
}

pub fn api(api_url: String, credentials: Credentials) -> AlphaEssApi {
    AlphaEssApi::with_base_url(api_url, credentials)
}

/// Client used for exactly one call. Idle connections are not pooled, so the connection goes
/// away with the client.
fn connection() -> Result<reqwest::Client, RequestError> {
    reqwest::ClientBuilder::new()
        .pool_max_idle_per_host(0)
        .build()
        .map_err(RequestError::Transport)
}

impl AlphaEssApi {
    pub fn new(credentials: Credentials) -> Self {
        AlphaEssApi::with_base_url(API_URL, credentials)
    }

    pub fn with_base_url(api_url: impl Into<String>, credentials: Credentials) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_owned();
        AlphaEssApi {
            api_url,
            credentials,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, endpoint: &endpoint::Endpoint) -> String {
        format!("{}{}", self.api_url, endpoint)
    }

    async fn get(
        &self,
        endpoint: &endpoint::Endpoint,
        query: &[(&str, String)],
    ) -> Result<Value, RequestError> {
        let url = self.url(endpoint);
        log::debug!("Sending GET request to {} with {:?}", url, query);

        let request = connection()?.get(url).query(query);
        self.dispatch(request).await
    }

    async fn post<B: Serialize + Debug>(
        &self,
        endpoint: &endpoint::Endpoint,
        body: &B,
    ) -> Result<Value, RequestError> {
        let url = self.url(endpoint);
        log::debug!("Sending POST request to {} with {:?}", url, body);

        let request = connection()?.post(url).json(body);
        self.dispatch(request).await
    }

    /// Sign, send, read the whole body and evaluate the envelope.
    async fn dispatch(&self, request: RequestBuilder) -> Result<Value, RequestError> {
        let response = sign::build_headers(&self.credentials)
            .apply(request)
            .send()
            .await
            .map_err(RequestError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(RequestError::Transport)?;

        envelope::evaluate(status, &body)
    }

    async fn fetch<T: Record>(
        &self,
        endpoint: &endpoint::Endpoint,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let value = self.get(endpoint, query).await?;
        Ok(T::from_value(value)?)
    }

    async fn submit<T: Record, B: Serialize + Debug>(
        &self,
        endpoint: &endpoint::Endpoint,
        body: &B,
    ) -> Result<T, Error> {
        let value = self.post(endpoint, body).await?;
        Ok(T::from_value(value)?)
    }

    /// Chargers installed at `sys_sn` with their models.
    pub async fn get_ev_charger_config_list(
        &self,
        sys_sn: &str,
    ) -> Result<response::EvChargerConfigList, Error> {
        let sys_sn = params::identifier("sysSn", sys_sn)?;
        self.fetch(endpoint::EV_CHARGER_CONFIG_LIST, &[("sysSn", sys_sn)])
            .await
    }

    /// Household current limit for the chargers of `sys_sn`.
    pub async fn get_ev_charger_currents_by_sn(
        &self,
        sys_sn: &str,
    ) -> Result<response::EvChargerCurrentsBySn, Error> {
        let sys_sn = params::identifier("sysSn", sys_sn)?;
        self.fetch(endpoint::EV_CHARGER_CURRENTS, &[("sysSn", sys_sn)])
            .await
    }

    pub async fn set_ev_charger_currents_by_sn(
        &self,
        sys_sn: &str,
        currentsetting: f64,
    ) -> Result<response::EvChargerCurrentsBySn, Error> {
        let body = SetCurrentRequest::new(sys_sn, currentsetting)?;
        self.submit(endpoint::SET_EV_CHARGER_CURRENTS, &body).await
    }

    pub async fn get_ev_charger_status_by_sn(
        &self,
        sys_sn: &str,
        evcharger_sn: &str,
    ) -> Result<response::EvChargerStatusBySn, Error> {
        let query = [
            ("sysSn", params::identifier("sysSn", sys_sn)?),
            ("evchargerSn", params::identifier("evchargerSn", evcharger_sn)?),
        ];
        self.fetch(endpoint::EV_CHARGER_STATUS, &query).await
    }

    /// Start or stop charging on one charger.
    pub async fn remote_control_ev_charger(
        &self,
        sys_sn: &str,
        evcharger_sn: &str,
        control_mode: ControlMode,
    ) -> Result<response::ControlEvCharger, Error> {
        let body = RemoteControlRequest::new(sys_sn, evcharger_sn, control_mode)?;
        self.submit(endpoint::REMOTE_CONTROL_EV_CHARGER, &body)
            .await
    }

    pub async fn get_sum_data_for_customer(
        &self,
        sys_sn: &str,
    ) -> Result<response::SumDataForCustomer, Error> {
        let sys_sn = params::identifier("sysSn", sys_sn)?;
        self.fetch(endpoint::SUM_DATA, &[("sysSn", sys_sn)]).await
    }

    /// Real-time power readings.
    pub async fn get_last_power_data(
        &self,
        sys_sn: &str,
    ) -> Result<response::LastPowerData, Error> {
        let sys_sn = params::identifier("sysSn", sys_sn)?;
        self.fetch(endpoint::LAST_POWER_DATA, &[("sysSn", sys_sn)])
            .await
    }

    /// Power series of one day.
    pub async fn get_one_day_power_by_sn(
        &self,
        sys_sn: &str,
        query_date: NaiveDate,
    ) -> Result<response::OneDayPowerBySn, Error> {
        let query = [
            ("sysSn", params::identifier("sysSn", sys_sn)?),
            ("queryDate", params::query_date(query_date)),
        ];
        self.fetch(endpoint::ONE_DAY_POWER, &query).await
    }

    /// Energy totals of one day.
    pub async fn get_one_date_energy_by_sn(
        &self,
        sys_sn: &str,
        query_date: NaiveDate,
    ) -> Result<response::OneDateEnergyBySn, Error> {
        let query = [
            ("sysSn", params::identifier("sysSn", sys_sn)?),
            ("queryDate", params::query_date(query_date)),
        ];
        self.fetch(endpoint::ONE_DATE_ENERGY, &query).await
    }

    pub async fn get_charge_config_info(
        &self,
        sys_sn: &str,
    ) -> Result<response::ChargeConfigInfo, Error> {
        let sys_sn = params::identifier("sysSn", sys_sn)?;
        self.fetch(endpoint::CHARGE_CONFIG, &[("sysSn", sys_sn)])
            .await
    }

    /// The vendor accepts one update per 24 hours.
    pub async fn update_charge_config_info(
        &self,
        sys_sn: &str,
        settings: &ChargeSettings,
    ) -> Result<response::ChargeConfigInfo, Error> {
        let body = ChargeConfigRequest::new(sys_sn, settings)?;
        self.submit(endpoint::UPDATE_CHARGE_CONFIG, &body).await
    }

    pub async fn get_dis_charge_config_info(
        &self,
        sys_sn: &str,
    ) -> Result<response::DisChargeConfigInfo, Error> {
        let sys_sn = params::identifier("sysSn", sys_sn)?;
        self.fetch(endpoint::DISCHARGE_CONFIG, &[("sysSn", sys_sn)])
            .await
    }

    /// The vendor accepts one update per 24 hours.
    pub async fn update_dis_charge_config_info(
        &self,
        sys_sn: &str,
        settings: &DischargeSettings,
    ) -> Result<response::DisChargeConfigInfo, Error> {
        let body = DischargeConfigRequest::new(sys_sn, settings)?;
        self.submit(endpoint::UPDATE_DISCHARGE_CONFIG, &body)
            .await
    }

    /// Ask the vendor to send a verification code for binding `sys_sn`.
    pub async fn get_verification_code(
        &self,
        sys_sn: &str,
        check_code: &str,
    ) -> Result<response::VerificationCode, Error> {
        let query = [
            ("sysSn", params::identifier("sysSn", sys_sn)?),
            ("checkCode", params::identifier("checkCode", check_code)?),
        ];
        self.fetch(endpoint::VERIFICATION_CODE, &query).await
    }

    /// Bind a system to this developer account using the verification code.
    pub async fn bind_sn(&self, sys_sn: &str, code: &str) -> Result<response::BindSn, Error> {
        let body = BindRequest::new(sys_sn, code)?;
        self.submit(endpoint::BIND_SN, &body).await
    }

    pub async fn un_bind_sn(&self, sys_sn: &str) -> Result<response::UnBindSn, Error> {
        let body = SysSnRequest::new(sys_sn)?;
        self.submit(endpoint::UNBIND_SN, &body).await
    }

    /// Systems bound to this developer account.
    pub async fn get_ess_list(&self) -> Result<response::EssList, Error> {
        self.fetch(endpoint::ESS_LIST, &[]).await
    }
}

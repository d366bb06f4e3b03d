//! Client for the AlphaESS open API: telemetry and control of AlphaESS storage systems and
//! their EV chargers.
//!
//! Every call signs its own request, checks both the HTTP status and the vendor status code of
//! the response, and decodes the payload into a validated record.
//!
//! ```no_run
//! use alphaess_rs::{AlphaEssApi, AppSecret, Credentials};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new("alphaef7900ee81dbbce9", AppSecret::new("secret"))?;
//! let api = AlphaEssApi::new(credentials);
//!
//! for system in api.get_ess_list().await?.data {
//!     let power = api.get_last_power_data(&system.sys_sn).await?;
//!     println!("{}: {} W from PV", system.sys_sn, power.data.ppv);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod model;

pub use api::{
    api, AlphaEssApi, Error, ParameterError, RequestError, SchemaValidationError, API_URL,
};
pub use model::{AppSecret, Credentials};

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;
#[macro_use]
extern crate rocket;

use alphaess_rs::api::{self, AlphaEssApi, API_URL};
use alphaess_rs::model::{AppSecret, Credentials};
use config::Config;
use rocket::State;

mod metrics;

#[derive(Clone, serde::Deserialize)]
pub struct AlphaEssConfig {
    api_url: String,
    app_id: String,
    app_secret: AppSecret,
}

/// Structure containing state for API handlers.
pub struct StateData {
    api: AlphaEssApi,
}

/// Settings come from `ALPHAESS_*` environment variables.
pub fn read_settings() -> Result<AlphaEssConfig, config::ConfigError> {
    let mut settings = Config::default();
    settings
        .set_default("api_url", API_URL)?
        .merge(config::Environment::with_prefix("ALPHAESS"))?;

    settings.try_into()
}

#[get("/metrics")]
async fn metrics_route(state: &State<StateData>) -> Result<String, api::Error> {
    metrics::collect(&state.api).await?;
    Ok(metrics::read())
}

#[get("/dump-systems")]
async fn dump_systems_route(state: &State<StateData>) -> Result<String, api::Error> {
    let systems = state.api.get_ess_list().await?;
    Ok(format!("{:#?}", systems.data))
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = read_settings()?;
    let credentials = Credentials::new(settings.app_id, settings.app_secret)?;
    let state = StateData {
        api: api::api(settings.api_url, credentials),
    };

    rocket::build()
        .manage(state)
        .mount("/", routes![metrics_route, dump_systems_route])
        .launch()
        .await?;

    Ok(())
}

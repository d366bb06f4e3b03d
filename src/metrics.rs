use alphaess_rs::api::response::{LastPower, SumData};
use alphaess_rs::api::{AlphaEssApi, Error};
use prometheus::{Encoder, GaugeVec, TextEncoder};

lazy_static! {
    static ref PV_POWER_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("pv_power", "total PV power (in W)"),
        &["sys_sn"],
    )
    .unwrap();
    static ref LOAD_POWER_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("load_power", "household load (in W)"),
        &["sys_sn"],
    )
    .unwrap();
    static ref GRID_POWER_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "grid_power",
            "grid power per phase, positive when importing (in W)",
        ),
        &["sys_sn", "phase"],
    )
    .unwrap();
    static ref BATTERY_POWER_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("battery_power", "battery power (in W)"),
        &["sys_sn"],
    )
    .unwrap();
    static ref BATTERY_SOC_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("battery_soc", "battery state of charge (in %)"),
        &["sys_sn"],
    )
    .unwrap();
    static ref BATTERY_CAPACITY_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("battery_capacity", "installed battery capacity (in kWh)"),
        &["sys_sn"],
    )
    .unwrap();
    static ref EV_POWER_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("ev_power", "total EV charger power (in W)"),
        &["sys_sn"],
    )
    .unwrap();
    static ref DAY_ENERGY_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "day_energy",
            "energy of the current day by flow (in kWh)",
        ),
        &["sys_sn", "flow"],
    )
    .unwrap();
}

/// Feed real-time power readings of `sys_sn` to Prometheus metrics.
fn process_last_power(sys_sn: &str, power: &LastPower) {
    PV_POWER_GAUGE.with_label_values(&[sys_sn]).set(power.ppv);
    LOAD_POWER_GAUGE.with_label_values(&[sys_sn]).set(power.pload);
    BATTERY_POWER_GAUGE
        .with_label_values(&[sys_sn])
        .set(power.pbat);
    BATTERY_SOC_GAUGE.with_label_values(&[sys_sn]).set(power.soc);
    EV_POWER_GAUGE.with_label_values(&[sys_sn]).set(power.pev);

    let detail = &power.pgrid_detail;
    for &(phase, value) in [
        ("L1", detail.pmeter_l1),
        ("L2", detail.pmeter_l2),
        ("L3", detail.pmeter_l3),
    ]
    .iter()
    {
        GRID_POWER_GAUGE
            .with_label_values(&[sys_sn, phase])
            .set(value);
    }
}

fn process_summary(sys_sn: &str, summary: &SumData) {
    for &(flow, value) in [
        ("pv", summary.epv_today),
        ("load", summary.eload),
        ("feed_in", summary.eoutput),
        ("grid_consumption", summary.einput),
        ("charge", summary.echarge),
        ("discharge", summary.edischarge),
    ]
    .iter()
    {
        DAY_ENERGY_GAUGE
            .with_label_values(&[sys_sn, flow])
            .set(value);
    }
}

/// Collect all supported metrics for every system bound to the account. Only a failure to list
/// the systems fails the scrape; per-system failures are logged and skipped.
pub async fn collect(api: &AlphaEssApi) -> Result<(), Error> {
    let systems = api.get_ess_list().await?;

    for system in systems.data {
        let sys_sn = system.sys_sn.as_str();
        BATTERY_CAPACITY_GAUGE
            .with_label_values(&[sys_sn])
            .set(system.battery_capacity);

        match api.get_last_power_data(sys_sn).await {
            Ok(power) => process_last_power(sys_sn, &power.data),
            Err(e) => log::error!("No power data returned for system {}: {}", sys_sn, e),
        }

        match api.get_sum_data_for_customer(sys_sn).await {
            Ok(summary) => process_summary(sys_sn, &summary.data),
            Err(e) => log::error!("No summary returned for system {}: {}", sys_sn, e),
        }
    }

    Ok(())
}

/// Read metrics from Prometheus exporter registry.
pub fn read() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        log::error!("Unable to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod test {
    use super::*;
    use alphaess_rs::model::{AppSecret, Credentials};
    use serde_json::{json, Value};
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn read_resource(filename: &str) -> Value {
        let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        d.push(format!("resources/test/{}", filename));
        serde_json::from_str(&fs::read_to_string(d.as_path()).unwrap()).unwrap()
    }

    /// Answers GET requests by path until no client connects for a while.
    async fn serve(route: fn(&str) -> Value) -> AlphaEssApi {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api", listener.local_addr().unwrap());

        tokio::spawn(async move {
            let wait = Duration::from_secs(2);
            while let Ok(Ok((mut socket, _))) =
                tokio::time::timeout(wait, listener.accept()).await
            {
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&chunk[..n]);
                }

                let head = String::from_utf8_lossy(&head).into_owned();
                let target = head.split_whitespace().nth(1).unwrap_or_default();
                let body = route(target).to_string();
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });

        let credentials = Credentials::new("appid", AppSecret::new("secret")).unwrap();
        AlphaEssApi::with_base_url(url, credentials)
    }

    fn two_systems(target: &str) -> Value {
        if target.starts_with("/api/getEssList") {
            let mut list = read_resource("getEssList.json");
            list["data"][0]["sysSn"] = json!("METRICS-SN-A");
            list["data"][1]["sysSn"] = json!("METRICS-SN-B");
            list
        } else if target.starts_with("/api/getLastPowerData") {
            read_resource("getLastPowerData.json")
        } else if target == "/api/getSumDataForCustomer?sysSn=METRICS-SN-A" {
            json!({"code": 6002, "msg": "The SN is not bound to the user", "data": null})
        } else {
            read_resource("getSumDataForCustomer.json")
        }
    }

    #[tokio::test]
    async fn failing_system_does_not_fail_scrape() {
        let api = serve(two_systems).await;

        collect(&api).await.unwrap();

        let pv = |sys_sn: &str| DAY_ENERGY_GAUGE.with_label_values(&[sys_sn, "pv"]).get();
        assert_eq!(8.6, pv("METRICS-SN-B"));
        assert_eq!(0.0, pv("METRICS-SN-A"));
        assert_eq!(
            15.2,
            BATTERY_CAPACITY_GAUGE
                .with_label_values(&["METRICS-SN-B"])
                .get()
        );
        assert_eq!(
            1462.0,
            PV_POWER_GAUGE.with_label_values(&["METRICS-SN-A"]).get()
        );
        assert!(read().contains("METRICS-SN-B"));
    }
}

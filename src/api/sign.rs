use crate::model::Credentials;
use reqwest::RequestBuilder;
use sha2::{Digest, Sha512};

pub const APP_ID: &str = "appId";
pub const TIMESTAMP: &str = "timeStamp";
pub const SIGN: &str = "sign";

/// Headers authenticating a single request. Built right before sending, because the vendor
/// checks the embedded timestamp against the time of arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub app_id: String,
    pub timestamp: String,
    pub sign: String,
}

impl SignedHeaders {
    pub fn apply(self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(APP_ID, self.app_id)
            .header(TIMESTAMP, self.timestamp)
            .header(SIGN, self.sign)
    }
}

/// Hex encoded SHA-512 of `app_id || app_secret || timestamp`.
pub fn sign(app_id: &str, app_secret: &str, timestamp: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(app_id.as_bytes());
    hasher.update(app_secret.as_bytes());
    hasher.update(timestamp.as_bytes());
    hex::encode(hasher.finalize())
}

/// Signed headers for the current unix time.
pub fn build_headers(credentials: &Credentials) -> SignedHeaders {
    build_headers_at(credentials, chrono::Utc::now().timestamp())
}

pub fn build_headers_at(credentials: &Credentials, unix_seconds: i64) -> SignedHeaders {
    let timestamp = unix_seconds.to_string();
    let sign = sign(
        credentials.app_id(),
        credentials.app_secret().expose(),
        &timestamp,
    );

    SignedHeaders {
        app_id: credentials.app_id().to_owned(),
        timestamp,
        sign,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::AppSecret;

    /* values published in the vendor's API documentation */
    const APP_ID: &str = "alphaef7900ee81dbbce9";
    const APP_SECRET: &str = "c2d2ef6c047c49678e2c332fb2d74c3c";
    const TIMESTAMP: &str = "1676353875";
    const SIGNATURE: &str = "0f023c2287b8f6b21b0994947465f8e9de0e1542567b1735bdc6c427336b9b64\
                             06285cd94f9215c3e9af958df37fb11c2c9fe792713d8afbdb8c463359a1add8";

    fn credentials() -> Credentials {
        Credentials::new(APP_ID, AppSecret::new(APP_SECRET)).unwrap()
    }

    #[test]
    fn known_answer() {
        assert_eq!(SIGNATURE, sign(APP_ID, APP_SECRET, TIMESTAMP));
    }

    #[test]
    fn headers_for_fixed_time() {
        let headers = build_headers_at(&credentials(), 1676353875);
        assert_eq!(
            SignedHeaders {
                app_id: APP_ID.to_owned(),
                timestamp: TIMESTAMP.to_owned(),
                sign: SIGNATURE.to_owned(),
            },
            headers
        );
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            sign(APP_ID, APP_SECRET, TIMESTAMP),
            sign(APP_ID, APP_SECRET, TIMESTAMP)
        );
    }

    #[test]
    fn any_input_byte_changes_digest() {
        assert_ne!(SIGNATURE, sign("alphaef7900ee81dbbce8", APP_SECRET, TIMESTAMP));
        assert_ne!(SIGNATURE, sign(APP_ID, "d2d2ef6c047c49678e2c332fb2d74c3c", TIMESTAMP));
        assert_ne!(SIGNATURE, sign(APP_ID, APP_SECRET, "1676353876"));
    }

    #[test]
    fn current_time_headers() {
        let before = chrono::Utc::now().timestamp();
        let headers = build_headers(&credentials());
        let after = chrono::Utc::now().timestamp();

        let timestamp: i64 = headers.timestamp.parse().unwrap();
        assert!(before <= timestamp && timestamp <= after);
        assert_eq!(sign(APP_ID, APP_SECRET, &headers.timestamp), headers.sign);
        assert_eq!(128, headers.sign.len());
        assert!(!format!("{:?}", headers).contains(APP_SECRET));
    }
}

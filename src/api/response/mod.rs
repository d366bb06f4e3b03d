/// Declares a response record: a struct with one field per declared wire name plus an `extra`
/// bag for everything the vendor sends on top. `field: Type = "wireName" | "oldWireName"` binds
/// a field to an ordered list of wire names.
macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident: $ty:ty = $wire:literal $(| $alias:literal)*,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
            /// Wire fields not declared by this record.
            pub extra: serde_json::Map<String, serde_json::Value>,
        }

        impl $crate::api::response::Record for $name {
            #[allow(unused_mut)]
            fn decode(
                mut reader: $crate::api::response::FieldReader,
            ) -> Result<Self, $crate::api::error::SchemaValidationError> {
                Ok($name {
                    $($field: reader.take(&[$wire $(, $alias)*])?,)*
                    extra: reader.finish(stringify!($name)),
                })
            }
        }

        impl $crate::api::response::FromWire for $name {
            fn from_wire(
                value: serde_json::Value,
                path: &str,
            ) -> Result<Self, $crate::api::error::SchemaValidationError> {
                $crate::api::response::FieldReader::new(path, value)
                    .and_then(<$name as $crate::api::response::Record>::decode)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                $crate::api::response::deserialize_record(deserializer)
            }
        }
    };
}

mod energy;
mod ev_charger;
mod field;
mod power;
mod schedule;
mod system;

pub use energy::{DateEnergy, OneDateEnergyBySn, SumData, SumDataForCustomer};
pub use ev_charger::{
    ControlEvCharger, EvChargerConfig, EvChargerConfigList, EvChargerCurrents,
    EvChargerCurrentsBySn, EvChargerStatus, EvChargerStatusBySn,
};
pub use field::{FieldReader, FromWire, Record};
pub use power::{
    LastPower, LastPowerData, OneDayPowerBySn, PevDetail, PgridDetail, PowerSample, PpvDetail,
};
pub use schedule::{ChargeConfig, ChargeConfigInfo, DisChargeConfigInfo, DischargeConfig};
pub use system::{BindSn, EssList, EssSystem, UnBindSn, VerificationCode};

use crate::api::error::SchemaValidationError;
use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Decode any record through `serde`, so `serde_json::from_value` and friends apply the same
/// alias and extra-field rules as the API client.
pub(crate) fn deserialize_record<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Record,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    T::from_value(value).map_err(de::Error::custom)
}

/// Outer shape shared by every response: vendor status, message and the operation's payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    /// Vendor status code, 200 on success
    pub code: i64,
    /// Vendor message, sent as `info` or `msg` depending on the endpoint
    pub info: String,
    pub data: T,
    pub extra: Map<String, Value>,
}

impl<T: FromWire> Record for Envelope<T> {
    fn decode(mut reader: FieldReader) -> Result<Self, SchemaValidationError> {
        Ok(Envelope {
            code: reader.take(&["code"])?,
            info: reader.take(&["info", "msg"])?,
            data: reader.take(&["data"])?,
            extra: reader.finish("Envelope"),
        })
    }
}

impl<'de, T: FromWire> Deserialize<'de> for Envelope<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_record(deserializer)
    }
}

record! {
    /// Payload of operations that only acknowledge a command.
    pub struct Ack {}
}

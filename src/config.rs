use std::sync::LazyLock;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use jiff::civil::Date;
use serde::Deserialize;

use crate::schedule::SlotVariant;
use crate::status::Schema;

static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    let config = Figment::new()
        .merge(Toml::file("pickup.toml"))
        .merge(Env::prefixed("PICKUP_"))
        .extract::<Config>();
    match config {
        Ok(config) => config,
        Err(err) => {
            panic!("CONFIG ERROR: {err}");
        }
    }
});

#[derive(Deserialize)]
pub struct Config {
    /// JSON file the schedule round-trips through.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Start date for the first week when the schedule is empty.
    #[serde(default = "default_start_date")]
    pub start_date: Date,
    #[serde(default = "default_schema")]
    pub schema: Schema,
    #[serde(default = "default_slots")]
    pub slots: SlotVariant,
}

fn default_data_file() -> String {
    "schedule.json".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_start_date() -> Date {
    Date::constant(2025, 5, 12)
}

fn default_schema() -> Schema {
    Schema::SixCode
}

fn default_slots() -> SlotVariant {
    SlotVariant::Pair
}

pub fn get_config() -> &'static Config {
    &*CONFIG
}

use chrono::NaiveTime;
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub store_base_url: String,
    pub store_api_key: String,

    // Remote table names
    pub people_table: String,
    pub attendance_table: String,
    pub scans_table: String,

    // Local hardware
    pub reader_device: String,
    pub buzzer_gpio: Option<u32>,

    // Time handling: local zone as a fixed offset, default UTC+7
    pub utc_offset_secs: i32,
    pub arrival_cutoff: NaiveTime,
    pub departure_open: NaiveTime,

    pub debounce_secs: u64,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            store_base_url: env::var("STORE_BASE_URL").expect("STORE_BASE_URL must be set"),
            store_api_key: env::var("STORE_API_KEY").expect("STORE_API_KEY must be set"),

            people_table: env::var("PEOPLE_TABLE").unwrap_or_else(|_| "people".to_string()),
            attendance_table: env::var("ATTENDANCE_TABLE")
                .unwrap_or_else(|_| "attendance".to_string()),
            scans_table: env::var("SCANS_TABLE").unwrap_or_else(|_| "rfid_scans".to_string()),

            reader_device: env::var("READER_DEVICE").unwrap_or_else(|_| "/dev/rfid0".to_string()),
            buzzer_gpio: env::var("BUZZER_GPIO")
                .ok()
                .map(|v| v.parse().expect("BUZZER_GPIO must be a GPIO number")),

            utc_offset_secs: env::var("UTC_OFFSET_SECS")
                .unwrap_or_else(|_| "25200".to_string())
                .parse()
                .unwrap(),
            arrival_cutoff: parse_time_var("ARRIVAL_CUTOFF", "07:15:00"),
            departure_open: parse_time_var("DEPARTURE_OPEN", "13:00:00"),

            debounce_secs: env::var("DEBOUNCE_SECS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap(),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap(),
        }
    }
}

fn parse_time_var(name: &str, default: &str) -> NaiveTime {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    NaiveTime::parse_from_str(&raw, "%H:%M:%S")
        .unwrap_or_else(|_| panic!("{} must be HH:MM:SS, got {:?}", name, raw))
}

use std::time::Duration;

pub const INTERNATIONAL_HOST: &str = "apius.faceplusplus.com";
pub const MAINLAND_CHINA_HOST: &str = "apicn.faceplusplus.com";
pub const API_VERSION_PATH: &str = "v2";

/// Group label used when the caller does not override it per call.
pub const DEFAULT_GROUP_LABEL: &str = "group_0";

pub const POLL_MIN_INTERVAL: Duration = Duration::from_millis(200);
pub const POLL_MAX_INTERVAL: Duration = Duration::from_secs(2);
pub const POLL_DEADLINE: Duration = Duration::from_secs(120);
pub const POLL_BACKOFF_FACTOR: u32 = 2;

/// The remote reports identify confidences in percent.
pub const CONFIDENCE_PERCENT_SCALE: f64 = 100.0;

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// File name sent with raw byte buffers, which carry no name of their own.
pub const BYTES_PART_NAME: &str = "image.jpg";

//! AmneziaWG server profile types and extraction.
//!
//! The server's `wg0.conf` is read as opaque text and mined with independent
//! pattern searches; every field is optional and missing ones fall back to
//! the defaults below at emission time.

mod extract;
mod profile;

pub use extract::{extract_profile, next_client_ip};
pub use profile::{ObfuscationParams, ServerProfile};

/// Path of the server configuration file inside the container.
pub const SERVER_CONFIG_PATH: &str = "/opt/amnezia/awg/wg0.conf";

/// AmneziaWG configuration directory inside the container.
pub const AWG_CONFIG_DIR: &str = "/opt/amnezia/awg";

/// Settings-file keys for the nine obfuscation parameters, in emission order.
pub const PARAM_ENV_KEYS: [&str; 9] = [
    "JC", "JMIN", "JMAX", "S1", "S2", "H1", "H2", "H3", "H4",
];

/// Fallback values applied when extraction produced no value.
pub mod defaults {
    /// Listen port.
    pub const PORT: &str = "443";
    /// Client network in CIDR form.
    pub const CLIENT_NETWORK: &str = "10.8.1.0/24";
    /// First address handed out to clients.
    pub const CLIENT_IP_START: &str = "10.8.1.2";

    pub const JC: &str = "2";
    pub const JMIN: &str = "10";
    pub const JMAX: &str = "50";
    pub const S1: &str = "105";
    pub const S2: &str = "72";
    pub const H1: &str = "1632458931";
    pub const H2: &str = "1121810837";
    pub const H3: &str = "697439987";
    pub const H4: &str = "1960185003";
}

//! Rendering of the consolidated settings file.

use super::{DATABASE_PATH, DNS_SERVERS, LOG_FILE, LOG_LEVEL};
use crate::awg::{AWG_CONFIG_DIR, ServerProfile, defaults};

/// Everything that goes into the settings file: the extracted server
/// profile plus the operator's answers.
#[derive(Debug, Clone)]
pub struct EnvSettings {
    pub bot_token: String,
    pub admin_id: String,
    pub users: String,
    pub server_ip: String,
    pub container: String,
    pub profile: ServerProfile,
}

impl EnvSettings {
    /// Renders the complete settings file text.
    ///
    /// The layout is fixed: one `KEY=value` line per key, grouped under
    /// comment headers, defaults substituted for whatever the profile does
    /// not carry, empty values for absent key material.
    #[must_use]
    pub fn render(&self) -> String {
        let profile = &self.profile;
        let params = &profile.params;

        format!(
            "# Telegram Bot Configuration
BOT_TOKEN={bot_token}

# Admin Configuration
ADMIN_ID={admin_id}

# Allowed Users (comma-separated Telegram IDs)
USERS={users}

# AmneziaWG Configuration
AWG_CONTAINER={container}
AWG_CONFIG_PATH={config_dir}
PORT={port}
SERVER_ENDPOINT={server_ip}:{port}
SERVER_PUBLIC_KEY={public_key}
PRESHARED_KEY={preshared_key}

# Network Configuration
CLIENT_NETWORK={client_network}
CLIENT_IP_START={client_ip_start}

# AmneziaWG Parameters
JC={jc}
JMIN={jmin}
JMAX={jmax}
S1={s1}
S2={s2}
H1={h1}
H2={h2}
H3={h3}
H4={h4}

# DNS Servers
DNS_SERVERS={dns_servers}

# Database
DATABASE_PATH={database_path}

# Logging
LOG_LEVEL={log_level}
LOG_FILE={log_file}
",
            bot_token = self.bot_token,
            admin_id = self.admin_id,
            users = self.users,
            container = self.container,
            config_dir = AWG_CONFIG_DIR,
            server_ip = self.server_ip,
            port = profile.listen_port.as_deref().unwrap_or(defaults::PORT),
            public_key = profile.public_key.as_deref().unwrap_or(""),
            preshared_key = profile.preshared_key.as_deref().unwrap_or(""),
            client_network = profile
                .client_network
                .as_deref()
                .unwrap_or(defaults::CLIENT_NETWORK),
            client_ip_start = profile
                .client_ip_start
                .as_deref()
                .unwrap_or(defaults::CLIENT_IP_START),
            jc = params.jc.as_deref().unwrap_or(defaults::JC),
            jmin = params.jmin.as_deref().unwrap_or(defaults::JMIN),
            jmax = params.jmax.as_deref().unwrap_or(defaults::JMAX),
            s1 = params.s1.as_deref().unwrap_or(defaults::S1),
            s2 = params.s2.as_deref().unwrap_or(defaults::S2),
            h1 = params.h1.as_deref().unwrap_or(defaults::H1),
            h2 = params.h2.as_deref().unwrap_or(defaults::H2),
            h3 = params.h3.as_deref().unwrap_or(defaults::H3),
            h4 = params.h4.as_deref().unwrap_or(defaults::H4),
            dns_servers = DNS_SERVERS,
            database_path = DATABASE_PATH,
            log_level = LOG_LEVEL,
            log_file = LOG_FILE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awg::ObfuscationParams;

    fn full_profile() -> ServerProfile {
        ServerProfile {
            public_key: Some("pubkey_derived_value=".to_owned()),
            private_key: Some("privkey_value=".to_owned()),
            preshared_key: Some("psk_value=".to_owned()),
            listen_port: Some("51820".to_owned()),
            client_network: Some("10.8.0.1/24".to_owned()),
            client_ip_start: Some("10.8.0.6".to_owned()),
            params: ObfuscationParams {
                jc: Some("4".to_owned()),
                jmin: Some("8".to_owned()),
                jmax: Some("70".to_owned()),
                s1: Some("100".to_owned()),
                s2: Some("90".to_owned()),
                h1: Some("1111111111".to_owned()),
                h2: Some("1222222222".to_owned()),
                h3: Some("1333333333".to_owned()),
                h4: Some("1444444444".to_owned()),
            },
        }
    }

    fn settings_with(profile: ServerProfile) -> EnvSettings {
        EnvSettings {
            bot_token: "123456:test-token".to_owned(),
            admin_id: "123456789".to_owned(),
            users: "123456789,987654321".to_owned(),
            server_ip: "203.0.113.7".to_owned(),
            container: "amnezia-awg".to_owned(),
            profile,
        }
    }

    #[test]
    fn test_render_full_profile_golden() {
        let rendered = settings_with(full_profile()).render();

        let expected = "# Telegram Bot Configuration
BOT_TOKEN=123456:test-token

# Admin Configuration
ADMIN_ID=123456789

# Allowed Users (comma-separated Telegram IDs)
USERS=123456789,987654321

# AmneziaWG Configuration
AWG_CONTAINER=amnezia-awg
AWG_CONFIG_PATH=/opt/amnezia/awg
PORT=51820
SERVER_ENDPOINT=203.0.113.7:51820
SERVER_PUBLIC_KEY=pubkey_derived_value=
PRESHARED_KEY=psk_value=

# Network Configuration
CLIENT_NETWORK=10.8.0.1/24
CLIENT_IP_START=10.8.0.6

# AmneziaWG Parameters
JC=4
JMIN=8
JMAX=70
S1=100
S2=90
H1=1111111111
H2=1222222222
H3=1333333333
H4=1444444444

# DNS Servers
DNS_SERVERS=1.1.1.1,1.0.0.1

# Database
DATABASE_PATH=data/database.db

# Logging
LOG_LEVEL=INFO
LOG_FILE=logs/bot.log
";

        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_profile_applies_defaults() {
        let rendered = settings_with(ServerProfile::default()).render();

        assert!(rendered.contains("PORT=443\n"));
        assert!(rendered.contains("SERVER_ENDPOINT=203.0.113.7:443\n"));
        assert!(rendered.contains("SERVER_PUBLIC_KEY=\n"));
        assert!(rendered.contains("PRESHARED_KEY=\n"));
        assert!(rendered.contains("CLIENT_NETWORK=10.8.1.0/24\n"));
        assert!(rendered.contains("CLIENT_IP_START=10.8.1.2\n"));
        assert!(rendered.contains("JC=2\n"));
        assert!(rendered.contains("JMIN=10\n"));
        assert!(rendered.contains("JMAX=50\n"));
        assert!(rendered.contains("S1=105\n"));
        assert!(rendered.contains("S2=72\n"));
        assert!(rendered.contains("H1=1632458931\n"));
        assert!(rendered.contains("H2=1121810837\n"));
        assert!(rendered.contains("H3=697439987\n"));
        assert!(rendered.contains("H4=1960185003\n"));
    }

    #[test]
    fn test_render_static_values_always_present() {
        let rendered = settings_with(ServerProfile::default()).render();

        assert!(rendered.contains("DNS_SERVERS=1.1.1.1,1.0.0.1\n"));
        assert!(rendered.contains("DATABASE_PATH=data/database.db\n"));
        assert!(rendered.contains("LOG_LEVEL=INFO\n"));
        assert!(rendered.contains("LOG_FILE=logs/bot.log\n"));
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_render_uses_container_in_effect() {
        let mut settings = settings_with(ServerProfile::default());
        settings.container = "my-awg".to_owned();

        assert!(settings.render().contains("AWG_CONTAINER=my-awg\n"));
    }

    #[test]
    fn test_render_from_extracted_text() {
        let text = "\
PrivateKey = abc123
ListenPort = 51820
Address = 10.8.0.1/24
AllowedIPs = 10.8.0.5/32
";
        let rendered = settings_with(crate::awg::extract_profile(text)).render();

        assert!(rendered.contains("PORT=51820\n"));
        assert!(rendered.contains("SERVER_ENDPOINT=203.0.113.7:51820\n"));
        assert!(rendered.contains("CLIENT_NETWORK=10.8.0.1/24\n"));
        assert!(rendered.contains("CLIENT_IP_START=10.8.0.6\n"));
    }

    #[test]
    fn test_render_section_order() {
        let rendered = settings_with(full_profile()).render();

        let headers = [
            "# Telegram Bot Configuration",
            "# Admin Configuration",
            "# Allowed Users (comma-separated Telegram IDs)",
            "# AmneziaWG Configuration",
            "# Network Configuration",
            "# AmneziaWG Parameters",
            "# DNS Servers",
            "# Database",
            "# Logging",
        ];

        let mut last = 0;
        for header in headers {
            let pos = rendered.find(header).unwrap();
            assert!(pos >= last, "{header} out of order");
            last = pos;
        }
    }
}

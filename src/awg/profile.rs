//! Extracted server profile data.

/// The nine AmneziaWG obfuscation parameters, kept as opaque digit strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObfuscationParams {
    pub jc: Option<String>,
    pub jmin: Option<String>,
    pub jmax: Option<String>,
    pub s1: Option<String>,
    pub s2: Option<String>,
    pub h1: Option<String>,
    pub h2: Option<String>,
    pub h3: Option<String>,
    pub h4: Option<String>,
}

/// Parameters mined from the server's `wg0.conf`.
///
/// Every field is optional: a field the text does not contain stays `None`
/// and the emission layer substitutes its default.
#[derive(Debug, Clone, Default)]
pub struct ServerProfile {
    /// Server public key. Always derived from [`private_key`] via a live
    /// `wg pubkey` call; a `PublicKey` line in the text is never trusted.
    ///
    /// [`private_key`]: ServerProfile::private_key
    pub public_key: Option<String>,

    /// Server private key as written in the interface section.
    pub private_key: Option<String>,

    /// Pre-shared key, opaque.
    pub preshared_key: Option<String>,

    /// Listen port, kept as text.
    pub listen_port: Option<String>,

    /// Client network in CIDR form, verbatim (host bits preserved).
    pub client_network: Option<String>,

    /// Next unassigned client address, derived from the network and the
    /// `/32` peer entries.
    pub client_ip_start: Option<String>,

    /// Obfuscation tunables.
    pub params: ObfuscationParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_empty() {
        let profile = ServerProfile::default();
        assert!(profile.public_key.is_none());
        assert!(profile.private_key.is_none());
        assert!(profile.client_network.is_none());
        assert_eq!(profile.params, ObfuscationParams::default());
    }
}

//! Pattern extraction over the server configuration text.
//!
//! The text is never parsed as INI; each field is an independent unanchored
//! search, so section order, duplicate sections and unknown lines are all
//! irrelevant. The first match wins.

use std::sync::LazyLock;

use regex::Regex;

use super::{ObfuscationParams, ServerProfile};

static PRIVATE_KEY: LazyLock<Regex> = LazyLock::new(|| compile(r"PrivateKey\s*=\s*(\S+)"));
static PRESHARED_KEY: LazyLock<Regex> = LazyLock::new(|| compile(r"PresharedKey\s*=\s*(\S+)"));
static LISTEN_PORT: LazyLock<Regex> = LazyLock::new(|| compile(r"ListenPort\s*=\s*(\d+)"));
static ADDRESS: LazyLock<Regex> = LazyLock::new(|| compile(r"Address\s*=\s*([0-9.]+/\d+)"));
static PEER_HOST: LazyLock<Regex> = LazyLock::new(|| compile(r"AllowedIPs\s*=\s*([0-9.]+)/32"));

static JC: LazyLock<Regex> = LazyLock::new(|| tunable("Jc"));
static JMIN: LazyLock<Regex> = LazyLock::new(|| tunable("Jmin"));
static JMAX: LazyLock<Regex> = LazyLock::new(|| tunable("Jmax"));
static S1: LazyLock<Regex> = LazyLock::new(|| tunable("S1"));
static S2: LazyLock<Regex> = LazyLock::new(|| tunable("S2"));
static H1: LazyLock<Regex> = LazyLock::new(|| tunable("H1"));
static H2: LazyLock<Regex> = LazyLock::new(|| tunable("H2"));
static H3: LazyLock<Regex> = LazyLock::new(|| tunable("H3"));
static H4: LazyLock<Regex> = LazyLock::new(|| tunable("H4"));

/// Mines a server profile out of raw `wg0.conf` text.
///
/// Whatever the text does not contain stays `None`. The public key is left
/// unset here; it is derived from the private key by a live `wg pubkey`
/// call, never read off the text.
#[must_use]
pub fn extract_profile(text: &str) -> ServerProfile {
    let client_network = capture(&ADDRESS, text);
    let client_ip_start = client_network
        .as_deref()
        .and_then(|network| next_client_ip(network, text));

    ServerProfile {
        public_key: None,
        private_key: capture(&PRIVATE_KEY, text),
        preshared_key: capture(&PRESHARED_KEY, text),
        listen_port: capture(&LISTEN_PORT, text),
        client_network,
        client_ip_start,
        params: ObfuscationParams {
            jc: capture(&JC, text),
            jmin: capture(&JMIN, text),
            jmax: capture(&JMAX, text),
            s1: capture(&S1, text),
            s2: capture(&S2, text),
            h1: capture(&H1, text),
            h2: capture(&H2, text),
            h3: capture(&H3, text),
            h4: capture(&H4, text),
        },
    }
}

/// Derives the next unassigned client address from the network address and
/// the `/32` peer entries in `text`.
///
/// With peer entries present the answer is one past the highest last octet
/// seen among them, even when that lands below the host-based fallback.
/// Without peers it is `max(2, host_octet + 1)`. Last octets are taken as
/// written without range checks, so the arithmetic runs in `u64`. A network
/// whose address part is not a dotted quad yields `None`, as does a next
/// octet too large for `u64`.
#[must_use]
pub fn next_client_ip(network: &str, text: &str) -> Option<String> {
    let base = network.split('/').next()?;
    let octets: Vec<&str> = base.split('.').collect();
    if octets.len() != 4 {
        return None;
    }
    let host: u64 = octets[3].parse().ok()?;

    let next = match peer_last_octets(text).into_iter().max() {
        Some(max_used) => max_used.checked_add(1)?,
        None => u64::max(2, host.checked_add(1)?),
    };

    Some(format!("{}.{}.{}.{next}", octets[0], octets[1], octets[2]))
}

/// Returns the first capture group of `re` in `text`, if any.
fn capture(re: &Regex, text: &str) -> Option<String> {
    Some(re.captures(text)?.get(1)?.as_str().to_owned())
}

/// Compiles a constant pattern. A malformed one is a programmer error and
/// panics at first use.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("bad pattern {pattern:?}: {e}"))
}

/// Pattern for a named numeric tunable (`Name = 123`).
fn tunable(name: &str) -> Regex {
    compile(&format!(r"{name}\s*=\s*(\d+)"))
}

/// Collects the last octets of every `/32` peer allow-list entry. Entries
/// whose captured address does not end in a parseable octet are skipped.
fn peer_last_octets(text: &str) -> Vec<u64> {
    PEER_HOST
        .captures_iter(text)
        .filter_map(|caps| {
            let ip = caps.get(1)?.as_str();
            ip.rsplit('.').next()?.parse().ok()
        })
        .collect()
}

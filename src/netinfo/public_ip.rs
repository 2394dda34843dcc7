//! Public IP discovery via external echo services.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::docker::CommandRunner;

/// IP-echo services queried through `curl -s`, in order.
pub const IP_ECHO_SERVICES: [&str; 3] = ["ifconfig.me", "icanhazip.com", "ipinfo.io/ip"];

static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$")
        .unwrap_or_else(|e| panic!("bad address pattern: {e}"))
});

/// Queries the echo services in order and returns the first plausible
/// answer, or `None` when every service fails.
///
/// A service counts as failed on non-zero exit, timeout, or output that is
/// not a dotted quad; the next one is tried without any retry.
pub async fn discover_public_ip(runner: &CommandRunner) -> Option<String> {
    discover_with(runner, "curl", &["-s"], &IP_ECHO_SERVICES).await
}

/// Runs `program base_args.. target` for each target in order and keeps the
/// first answer shaped like an address.
async fn discover_with(
    runner: &CommandRunner,
    program: &str,
    base_args: &[&str],
    targets: &[&str],
) -> Option<String> {
    for &target in targets {
        let mut args = base_args.to_vec();
        args.push(target);

        match runner.run(program, &args).await {
            Ok(ip) if is_dotted_quad(&ip) => {
                debug!("{} answered: {}", target, ip);
                return Some(ip);
            }
            Ok(other) => {
                debug!("{} answered with a non-address: {:?}", target, other);
            }
            Err(e) => {
                debug!("{} lookup failed: {}", target, e);
            }
        }
    }

    warn!("All IP echo services failed");
    None
}

/// Checks the digit-count shape of an IPv4 dotted quad.
///
/// Octet ranges are not validated: `999.1.1.1` passes, `1234.1.1.1` does
/// not.
#[must_use]
pub fn is_dotted_quad(s: &str) -> bool {
    DOTTED_QUAD.is_match(s)
}

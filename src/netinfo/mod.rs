//! Host network discovery.

mod public_ip;

pub use public_ip::{IP_ECHO_SERVICES, discover_public_ip, is_dotted_quad};

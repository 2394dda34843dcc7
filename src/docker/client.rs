//! Docker CLI wrapper for the AmneziaWG container.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{CommandError, CommandRunner};
use crate::awg::SERVER_CONFIG_PATH;

/// Errors that can occur during Docker operations.
#[derive(Debug, Error)]
pub enum DockerError {
    #[error("Docker is not installed or not reachable: {0}")]
    Unavailable(#[source] CommandError),

    #[error("container `{name}` not found or not running")]
    ContainerNotRunning { name: String },

    #[error("failed to read `{path}` from container `{container}`: {source}")]
    ReadConfig {
        container: String,
        path: &'static str,
        #[source]
        source: CommandError,
    },

    #[error("failed to derive the server public key in container `{container}`: {source}")]
    DeriveKey {
        container: String,
        #[source]
        source: CommandError,
    },
}

/// High-level access to the AmneziaWG container via the Docker CLI.
#[derive(Debug, Clone)]
pub struct DockerClient {
    runner: CommandRunner,
    container: String,
}

impl DockerClient {
    /// Creates a client for the given container name.
    #[must_use]
    pub fn new(runner: CommandRunner, container: String) -> Self {
        Self { runner, container }
    }

    /// Returns the container name this client talks to.
    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.container
    }

    /// Checks that the Docker CLI is callable and returns its version line.
    ///
    /// # Errors
    ///
    /// Returns [`DockerError::Unavailable`] if `docker --version` fails.
    pub async fn version(&self) -> Result<String, DockerError> {
        self.runner
            .run("docker", &["--version"])
            .await
            .map_err(DockerError::Unavailable)
    }

    /// Checks that the container is running and returns the matching name.
    ///
    /// A `docker ps` that fails or lists nothing both mean the container is
    /// not usable, so they map to the same error.
    ///
    /// # Errors
    ///
    /// Returns [`DockerError::ContainerNotRunning`] if the container is not
    /// listed among running containers.
    pub async fn container_running(&self) -> Result<String, DockerError> {
        let filter = format!("name={}", self.container);
        let result = self
            .runner
            .run("docker", &["ps", "--filter", &filter, "--format", "{{.Names}}"])
            .await;

        match result {
            Ok(names) if !names.is_empty() => {
                debug!("Container listing matched: {}", names);
                Ok(names)
            }
            Ok(_) => Err(DockerError::ContainerNotRunning {
                name: self.container.clone(),
            }),
            Err(e) => {
                warn!("Container listing failed: {}", e);
                Err(DockerError::ContainerNotRunning {
                    name: self.container.clone(),
                })
            }
        }
    }

    /// Reads the server configuration file from inside the container.
    ///
    /// # Errors
    ///
    /// Returns [`DockerError::ReadConfig`] if the file cannot be read.
    pub async fn read_server_config(&self) -> Result<String, DockerError> {
        info!("Reading {} from container {}", SERVER_CONFIG_PATH, self.container);

        self.runner
            .run("docker", &["exec", &self.container, "cat", SERVER_CONFIG_PATH])
            .await
            .map_err(|source| DockerError::ReadConfig {
                container: self.container.clone(),
                path: SERVER_CONFIG_PATH,
                source,
            })
    }

    /// Derives the public key from a private key via `wg pubkey` inside the
    /// container. The private key is piped on stdin and never appears in a
    /// command line.
    ///
    /// # Errors
    ///
    /// Returns [`DockerError::DeriveKey`] if the derivation fails.
    pub async fn derive_public_key(&self, private_key: &str) -> Result<String, DockerError> {
        debug!("Deriving server public key in container {}", self.container);

        self.runner
            .run_with_stdin(
                "docker",
                &["exec", "-i", &self.container, "wg", "pubkey"],
                private_key,
            )
            .await
            .map_err(|source| DockerError::DeriveKey {
                container: self.container.clone(),
                source,
            })
    }
}

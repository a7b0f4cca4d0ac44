//! Bootstrap and run driver
//!
//! Wires a validated [`ReplayConfig`] into a running replay: checks the log
//! file, starts the broker connection in the background, reads the log and
//! hands it to the scheduler. The first publish is what waits for the
//! initial connection; nothing here does.

use std::path::Path;

use tracing::{error, info};

use crate::config::ReplayConfig;
use crate::connection::ConnectionGate;
use crate::error::{ReplayError, Result};
use crate::replay::{Publisher, ReplayScheduler, ReplayStats};
use crate::transport::{BrokerTransport, MqttTransport};

/// Process name shown in the splash line
pub const PROCESS_NAME: &str = "Device telemetry simulator";

/// Check that the log file exists and can be opened for reading
pub fn check_log_file(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| ReplayError::input(path, e))?;
    if !metadata.is_file() {
        return Err(ReplayError::input(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    std::fs::File::open(path).map_err(|e| ReplayError::input(path, e))?;
    Ok(())
}

/// Replay already-loaded log contents through a publisher
pub async fn replay_contents<T: BrokerTransport>(
    contents: &str,
    publisher: &Publisher<T>,
    speed: f64,
) -> Result<ReplayStats> {
    let mut scheduler = ReplayScheduler::new(publisher)?.with_speed(speed);
    scheduler.run(contents.split('\n')).await
}

/// Run a complete replay against the configured MQTT broker
pub async fn run(config: ReplayConfig) -> Result<ReplayStats> {
    info!("{} - v{}", PROCESS_NAME, env!("CARGO_PKG_VERSION"));

    check_log_file(&config.log_file)?;

    let gate = ConnectionGate::new(config.connection_poll);
    let transport = MqttTransport::connect(&config.broker, gate.clone());
    let publisher = Publisher::new(gate, transport);

    let result = replay_file(&config, &publisher).await;

    if let Err(e) = publisher.transport().close().await {
        error!(error = %e, "Failed to close MQTT connection");
    }

    result
}

async fn replay_file<T: BrokerTransport>(
    config: &ReplayConfig,
    publisher: &Publisher<T>,
) -> Result<ReplayStats> {
    let contents = tokio::fs::read_to_string(&config.log_file)
        .await
        .map_err(|e| ReplayError::input(&config.log_file, e))?;

    info!(
        "Processing log file: {} ({} entries)",
        config.log_file.display(),
        contents.split('\n').count()
    );

    replay_contents(&contents, publisher, config.speed).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_check_log_file_ok() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hello").unwrap();
        assert!(check_log_file(file.path()).is_ok());
    }

    #[test]
    fn test_check_log_file_missing() {
        let dir = tempdir().unwrap();
        let err = check_log_file(&dir.path().join("absent.log")).unwrap_err();
        assert!(matches!(err, ReplayError::Input { .. }));
    }

    #[test]
    fn test_check_log_file_directory() {
        let dir = tempdir().unwrap();
        let err = check_log_file(dir.path()).unwrap_err();
        assert!(matches!(err, ReplayError::Input { .. }));
    }
}

//! # Scan stream client
//!
//! This module provides the subscriber side of the range sensor's scan stream. The socket is
//! conflating: only the most recent sweep is ever held by the socket, older sweeps are dropped
//! unread. Combined with the obstacle monitor's overwrite-in-place slot this gives
//! most-recent-wins semantics with no queueing of stale readings.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    eqpt::scan::LaserScan,
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
};

use crate::params::GuideExecParams;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Maximum time a receive will block before returning empty handed.
///
/// This bounds how long the obstacle monitor thread goes between checks of its stop flag.
const RECV_TIMEOUT_MS: i32 = 100;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A source of scan sweeps.
///
/// [`ScanClient`] is the transport implementation; the trait exists so the obstacle monitor can
/// be exercised against a scripted source in tests.
pub trait ScanSource {
    /// Get the next sweep from the source, or `None` if no sweep arrived within the source's
    /// receive timeout.
    fn recv_scan(&mut self) -> Result<Option<LaserScan>, ScanClientError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct ScanClient {
    scan_socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum ScanClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not recieve from the scan stream: {0}")]
    RecvError(zmq::Error),

    #[error("Could not deserialize the scan message: {0}")]
    DeserializeError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ScanClient {
    /// Create a new instance of the scan stream client.
    ///
    /// The sensor may not be up yet when the executable starts, so the connection is not waited
    /// on: until the first sweep arrives the monitor simply reports its "unknown/far" sentinel.
    pub fn new(ctx: &zmq::Context, params: &GuideExecParams) -> Result<Self, ScanClientError> {
        let scan_socket_options = SocketOptions {
            block_on_first_connect: false,
            conflate: true,
            subscribe_all: true,
            recv_timeout: RECV_TIMEOUT_MS,
            ..Default::default()
        };

        let scan_socket = MonitoredSocket::new(
            ctx,
            zmq::SUB,
            scan_socket_options,
            &params.scan_endpoint,
        )
        .map_err(ScanClientError::SocketError)?;

        Ok(Self { scan_socket })
    }
}

impl ScanSource for ScanClient {
    fn recv_scan(&mut self) -> Result<Option<LaserScan>, ScanClientError> {
        match self.scan_socket.recv_msg(0) {
            Ok(msg) => serde_json::from_str(msg.as_str().unwrap_or(""))
                .map(Some)
                .map_err(ScanClientError::DeserializeError),
            // Timeout elapsed with no message, not an error
            Err(zmq::Error::EAGAIN) => Ok(None),
            Err(e) => Err(ScanClientError::RecvError(e)),
        }
    }
}

//! # Velocity demand publisher
//!
//! This module provides the publisher side of the velocity demand stream consumed by the robot
//! base. One demand is published per decision cycle; the base is expected to hold the last
//! demand it saw.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    eqpt::vel::VelCmd,
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
};
use log::trace;

use crate::params::GuideExecParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct VelPub {
    vel_socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum VelPubError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send the demand: {0}")]
    SendError(zmq::Error),

    #[error("Could not serialize the demand: {0}")]
    SerializationError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl VelPub {
    /// Create a new instance of the velocity demand publisher.
    pub fn new(ctx: &zmq::Context, params: &GuideExecParams) -> Result<Self, VelPubError> {
        // Publishers bind and don't wait for subscribers
        let vel_socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            send_timeout: 10,
            ..Default::default()
        };

        let vel_socket =
            MonitoredSocket::new(ctx, zmq::PUB, vel_socket_options, &params.vel_endpoint)
                .map_err(VelPubError::SocketError)?;

        Ok(Self { vel_socket })
    }

    /// Publish a velocity demand to the base.
    pub fn publish(&mut self, cmd: &VelCmd) -> Result<(), VelPubError> {
        let cmd_str = serde_json::to_string(cmd).map_err(VelPubError::SerializationError)?;

        self.vel_socket
            .send(&cmd_str, 0)
            .map_err(VelPubError::SendError)?;

        trace!(
            "VelCmd published: linear_x = {:.2} m/s, angular_z = {:.2} rad/s",
            cmd.linear_x_ms,
            cmd.angular_z_rads
        );

        Ok(())
    }
}

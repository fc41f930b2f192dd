//! # Navigation service client
//!
//! This module provides networking abstractions to connect to the navigation service. The
//! service runs a simple request/reply protocol: goals are submitted, their state polled, and
//! the active goal canceled, each as a single request answered by a single response.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    eqpt::nav::{NavGoal, NavGoalState, NavRequest, NavResponse},
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
};

use crate::params::GuideExecParams;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Operations the autonomous navigator needs from the navigation service.
///
/// [`NavClient`] is the transport implementation; the trait exists so goal pursuit can be
/// exercised against a stub service in tests.
pub trait NavEndpoint {
    /// Submit a goal to the service.
    fn send_goal(&mut self, goal: &NavGoal) -> Result<NavResponse, NavClientError>;

    /// Query the state of the active goal.
    fn goal_state(&mut self) -> Result<NavGoalState, NavClientError>;

    /// Cancel the active goal, if any.
    fn cancel_goal(&mut self) -> Result<(), NavClientError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct NavClient {
    nav_socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum NavClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("The client is not connected to the navigation service")]
    NotConnected,

    #[error("Could not send the request to the service: {0}")]
    SendError(zmq::Error),

    #[error("Could not recieve a response from the service: {0}")]
    RecvError(zmq::Error),

    #[error("Could not serialize the request: {0}")]
    SerializationError(serde_json::Error),

    #[error("Could not deserialize the response from the service: {0}")]
    DeserializeError(serde_json::Error),

    #[error("Unexpected response from the service: {0:?}")]
    UnexpectedResponse(NavResponse),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavClient {
    /// Create a new instance of the navigation service client.
    pub fn new(ctx: &zmq::Context, params: &GuideExecParams) -> Result<Self, NavClientError> {
        // Create the socket options
        let nav_socket_options = SocketOptions {
            connect_timeout: 1000,
            linger: 1,
            recv_timeout: 1000,
            send_timeout: 10,
            req_correlate: true,
            req_relaxed: true,
            ..Default::default()
        };

        // Create the socket
        let nav_socket =
            MonitoredSocket::new(ctx, zmq::REQ, nav_socket_options, &params.nav_endpoint)
                .map_err(NavClientError::SocketError)?;

        // Create self
        Ok(Self { nav_socket })
    }

    /// Perform one request/response exchange with the service.
    fn request(&mut self, request: &NavRequest) -> Result<NavResponse, NavClientError> {
        // If not connected return now
        if !self.nav_socket.connected() {
            return Err(NavClientError::NotConnected);
        }

        // Serialize the request
        let request_str =
            serde_json::to_string(request).map_err(NavClientError::SerializationError)?;

        // Send the request to the service
        self.nav_socket
            .send(&request_str, 0)
            .map_err(NavClientError::SendError)?;

        // Recieve response back from the service
        let msg = self
            .nav_socket
            .recv_msg(0)
            .map_err(NavClientError::RecvError)?;

        serde_json::from_str(msg.as_str().unwrap_or(""))
            .map_err(NavClientError::DeserializeError)
    }
}

impl NavEndpoint for NavClient {
    fn send_goal(&mut self, goal: &NavGoal) -> Result<NavResponse, NavClientError> {
        self.request(&NavRequest::Goto(goal.clone()))
    }

    fn goal_state(&mut self) -> Result<NavGoalState, NavClientError> {
        match self.request(&NavRequest::GetState)? {
            NavResponse::State(state) => Ok(state),
            r => Err(NavClientError::UnexpectedResponse(r)),
        }
    }

    fn cancel_goal(&mut self) -> Result<(), NavClientError> {
        match self.request(&NavRequest::Cancel)? {
            NavResponse::CancelOk => Ok(()),
            r => Err(NavClientError::UnexpectedResponse(r)),
        }
    }
}

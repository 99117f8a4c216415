//! # Call Control Point
//!
//! The Telephone Bearer Service (TBS) lets a Bluetooth LE device ask a phone
//! to place and end calls. Requests are written to the Call Control Point
//! characteristic and the phone answers each of them with a three octet
//! Call Control Point Notification. The central type is
//! [`control_point::CallControlPoint`], which tracks the call the phone last
//! reported on and issues Originate and Terminate requests.
//!
//! The frame layouts on their own are available as
//! [`control_point::decode`], [`control_point::encode_originate`] and
//! [`control_point::encode_terminate`].
//!
//! # Host integration
//!
//! Nothing here talks to a radio. The host provides a [`transport::Transport`]
//! for the active link, a [`transport::NotificationSink`] for user-visible
//! alerts, a [`transport::HostSignal`] to wake its own task, and a
//! [`gatt::GattRegistry`] to add the service to its attribute table. Tokio
//! unbounded channels can serve as the sink and the signal.
//!
//! Only one call is tracked at a time: holding, joining and listing calls are
//! not supported.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate thiserror;

pub use config::Config;
pub use handle::*;

pub mod control_point;
pub mod gatt;
pub mod status;
pub mod transport;

mod config;
mod handle;
mod util;

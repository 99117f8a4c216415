use std::convert::TryFrom;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;

use crate::config::Config;
use crate::control_point::code::{ControlPointOpcode, RequestedOpcode, ResultCode};
use crate::control_point::notification::{decode, CallControlPointNotification};
use crate::control_point::request::{Request, ToBuf};
use crate::control_point::{Error, Result};
use crate::gatt::{GattRegistry, ServiceDefinition};
use crate::handle::AttributeHandle;
use crate::status::Status;
use crate::transport::{Alert, AlertCategory, HostEvent, HostSignal, NotificationSink, Transport};

/// The call the peer last reported on. Only one is remembered; every valid
/// notification replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedCall {
    /// The opcode the notification referred to, which is not necessarily the
    /// request this side sent last.
    pub opcode: RequestedOpcode,
    pub call_index: u8,
    pub result_code: ResultCode,
}

impl From<CallControlPointNotification> for TrackedCall {
    fn from(val: CallControlPointNotification) -> Self {
        TrackedCall {
            opcode: val.requested_opcode,
            call_index: val.call_index,
            result_code: val.result_code,
        }
    }
}

/// Running totals, reset only when the [`CallControlPoint`] is created. They
/// wrap around instead of saturating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Every access to the service, including frames that were ignored.
    pub service_request_count: u16,
    pub calls_initiated: u16,
    pub calls_successful: u16,
    pub terminations_initiated: u16,
    pub terminations_successful: u16,
    /// Size of the last Originate frame the transport accepted.
    pub last_octets_sent: u16,
}

fn bump(counter: &mut u16) {
    *counter = counter.wrapping_add(1);
}

#[derive(Debug, Default)]
struct State {
    control_point: Option<AttributeHandle>,
    tracked_call: Option<TrackedCall>,
    counters: Counters,
}

/// Client side of the Telephone Bearer Service Call Control Point.
///
/// Inbound notifications arrive through [`on_attribute_access`] (or
/// [`on_notification_received`] when the host has already matched the
/// attribute), typically from the stack's callback context, while
/// [`originate_call`] and [`terminate_originated_call`] are driven by the
/// application. Both paths may run on different threads.
///
/// [`on_attribute_access`]: CallControlPoint::on_attribute_access
/// [`on_notification_received`]: CallControlPoint::on_notification_received
/// [`originate_call`]: CallControlPoint::originate_call
/// [`terminate_originated_call`]: CallControlPoint::terminate_originated_call
pub struct CallControlPoint {
    config: Config,
    state: Mutex<State>,
    transport: Arc<dyn Transport>,
    notifications: Arc<dyn NotificationSink>,
    host: Arc<dyn HostSignal>,
}

impl CallControlPoint {
    pub fn new(
        config: Config,
        transport: Arc<dyn Transport>,
        notifications: Arc<dyn NotificationSink>,
        host: Arc<dyn HostSignal>,
    ) -> Self {
        CallControlPoint {
            config,
            state: Mutex::new(State::default()),
            transport,
            notifications,
            host,
        }
    }

    // the state is plain data, so a panic elsewhere cannot leave it torn
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds the Telephone Bearer Service to the host's attribute table and
    /// remembers the value handle of the Call Control Point.
    pub fn register(&self, registry: &dyn GattRegistry) -> Result<AttributeHandle> {
        let handle = registry.register(&ServiceDefinition::telephone_bearer())?;
        self.lock().control_point = Some(handle);

        log::info!("telephone bearer service registered, control point at {}", handle);
        Ok(handle)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().control_point.is_some()
    }

    pub fn control_point_handle(&self) -> Option<AttributeHandle> {
        self.lock().control_point
    }

    pub fn counters(&self) -> Counters {
        self.lock().counters
    }

    pub fn tracked_call(&self) -> Option<TrackedCall> {
        self.lock().tracked_call
    }

    pub fn status(&self) -> Status {
        let state = self.lock();
        Status::new(state.control_point.is_some(), state.counters)
    }

    /// Entry point for every read or write the host stack routes to this
    /// service. The access is counted, and frames written to the Call Control
    /// Point are handled as notifications.
    pub fn on_attribute_access(&self, attribute: AttributeHandle, raw: &[u8]) {
        let control_point = {
            let mut state = self.lock();
            bump(&mut state.counters.service_request_count);
            state.control_point
        };

        if control_point != Some(attribute) {
            log::debug!("ignoring access to attribute {}", attribute);
            return;
        }

        self.handle_notification(raw);
    }

    /// Handles a frame written to the Call Control Point. Frames that are not
    /// Call Control Point Notifications are dropped; they only show up in
    /// [`Counters::service_request_count`].
    pub fn on_notification_received(&self, raw: &[u8]) {
        bump(&mut self.lock().counters.service_request_count);
        self.handle_notification(raw);
    }

    fn handle_notification(&self, raw: &[u8]) {
        let notification = match decode(raw) {
            Ok(notification) => notification,
            Err(err) => {
                log::debug!("{}", err);
                return;
            }
        };

        // TODO: keep a call index -> state map once Bearer List Current Calls
        // is subscribed, instead of overwriting the one slot
        self.lock().tracked_call = Some(notification.into());
        log::info!("{}", notification);

        // one alert per decoded notification, whatever its result code
        self.notifications.push(Alert::new(
            &notification.to_string(),
            AlertCategory::SimpleAlert,
        ));
        self.host.notify(HostEvent::NewNotification);
    }

    /// Asks the peer to place a call to `uri`.
    ///
    /// Success only means the request was queued; whether the call went
    /// through is reported later by a notification.
    pub fn originate_call(&self, uri: &str) -> Result<()> {
        bump(&mut self.lock().counters.calls_initiated);

        let request = Request::Originate {
            uri: uri.to_owned(),
            encoding: self.config.uri_encoding,
        };
        let frame = self.encode(&request)?;
        let len = frame.len();

        self.send(frame)?;

        let mut state = self.lock();
        state.counters.last_octets_sent = u16::try_from(len).unwrap_or(u16::MAX);
        bump(&mut state.counters.calls_successful);
        log::info!("originate request for {} sent ({} octets)", uri, len);
        Ok(())
    }

    /// Hangs up the tracked call, provided this side originated it. Does
    /// nothing when no call is tracked.
    pub fn terminate_originated_call(&self) -> Result<()> {
        let call_index = {
            let mut state = self.lock();
            let call = match state.tracked_call {
                Some(call) => call,
                None => return Ok(()),
            };

            if call.opcode != ControlPointOpcode::Originate {
                log::error!("cannot terminate non-originated call (opcode={})", call.opcode);
                return Err(Error::NotOriginated {
                    opcode: call.opcode,
                });
            }

            bump(&mut state.counters.terminations_initiated);
            call.call_index
        };

        let frame = self.encode(&Request::terminate(call_index))?;
        self.send(frame)?;

        bump(&mut self.lock().counters.terminations_successful);
        log::info!("terminate request for call {} sent", call_index);
        Ok(())
    }

    fn encode(&self, request: &Request) -> Result<Bytes> {
        let len = request.encoded_len();
        let mut buf = match self.transport.allocate(len) {
            Some(buf) => buf,
            None => {
                log::error!("failed allocating {} octets for {:?}", len, request.opcode());
                return Err(Error::EncodingFailed { len });
            }
        };

        request.to_buf(&mut buf);
        Ok(buf.freeze())
    }

    fn send(&self, payload: Bytes) -> Result<()> {
        let attribute = match self.control_point_handle() {
            Some(attribute) => attribute,
            None => {
                log::error!("telephone bearer service is not registered");
                return Err(Error::TransportUnavailable);
            }
        };

        let connection = match self.transport.connection_handle() {
            Some(connection) if connection.is_valid() => connection,
            _ => {
                log::error!("failed obtaining a connection handle");
                return Err(Error::TransportUnavailable);
            }
        };

        self.transport
            .send(connection, attribute, payload)
            .map_err(|err| {
                log::error!("failed notifying {} on {}: {}", attribute, connection, err);
                Error::from(err)
            })
    }
}

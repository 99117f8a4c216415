//! Capabilities the call control point borrows from the surrounding
//! application: a link to the peer, a place to post alerts, and a way to wake
//! the host task.

use bytes::{Bytes, BytesMut};
use tokio::sync::mpsc;

use crate::handle::{AttributeHandle, ConnectionHandle};

/// Longest alert text that fits the notification display.
pub const MAX_ALERT_LEN: usize = 29;

pub type AlertMessage = heapless::String<MAX_ALERT_LEN>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("send failed with status {}", status)]
pub struct SendError {
    pub status: i32,
}

impl SendError {
    pub fn new(status: i32) -> Self {
        SendError { status }
    }
}

pub trait Transport: Send + Sync {
    /// The link requests go out on, if there is one.
    fn connection_handle(&self) -> Option<ConnectionHandle>;

    /// Hands out a buffer able to hold `len` octets, or `None` when the
    /// transport's buffer pool is exhausted.
    fn allocate(&self, len: usize) -> Option<BytesMut> {
        Some(BytesMut::with_capacity(len))
    }

    /// Queues `payload` as a notification of `attribute`. Returns as soon as
    /// the frame is queued, not when it is delivered.
    fn send(
        &self,
        connection: ConnectionHandle,
        attribute: AttributeHandle,
        payload: Bytes,
    ) -> Result<(), SendError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AlertCategory {
    SimpleAlert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: AlertMessage,
    pub category: AlertCategory,
}

impl Alert {
    /// Builds an alert from `text`, cutting it at [`MAX_ALERT_LEN`]
    /// characters.
    pub fn new(text: &str, category: AlertCategory) -> Self {
        let mut message = AlertMessage::new();
        for c in text.chars() {
            if message.push(c).is_err() {
                break;
            }
        }

        Alert { message, category }
    }
}

pub trait NotificationSink: Send + Sync {
    fn push(&self, alert: Alert);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// An alert is waiting in the notification sink.
    NewNotification,
}

pub trait HostSignal: Send + Sync {
    fn notify(&self, event: HostEvent);
}

impl NotificationSink for mpsc::UnboundedSender<Alert> {
    fn push(&self, alert: Alert) {
        if self.send(alert).is_err() {
            log::debug!("alert dropped; receiver is gone");
        }
    }
}

impl HostSignal for mpsc::UnboundedSender<HostEvent> {
    fn notify(&self, event: HostEvent) {
        if self.send(event).is_err() {
            log::debug!("{:?} dropped; host task is gone", event);
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use super::*;
    use crate::gatt::{GattRegistry, RegistrationError, ServiceDefinition};

    pub struct NullSink;

    impl NotificationSink for NullSink {
        fn push(&self, _alert: Alert) {}
    }

    pub struct NullHost;

    impl HostSignal for NullHost {
        fn notify(&self, _event: HostEvent) {}
    }

    /// Registers every service at the same value handle.
    pub struct StaticRegistry(pub AttributeHandle);

    impl GattRegistry for StaticRegistry {
        fn register(
            &self,
            _service: &ServiceDefinition,
        ) -> Result<AttributeHandle, RegistrationError> {
            Ok(self.0)
        }
    }

    /// Accepts every frame and keeps it for inspection.
    pub struct RecordingTransport {
        handle: Option<u16>,
        sent: Mutex<Vec<Bytes>>,
    }

    impl RecordingTransport {
        pub fn with_handle(handle: Option<u16>) -> Self {
            RecordingTransport {
                handle,
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn connected() -> Self {
            Self::with_handle(Some(1))
        }

        pub fn sent(&self) -> Vec<Bytes> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn connection_handle(&self) -> Option<ConnectionHandle> {
            self.handle.map(ConnectionHandle::new)
        }

        fn send(
            &self,
            _connection: ConnectionHandle,
            _attribute: AttributeHandle,
            payload: Bytes,
        ) -> Result<(), SendError> {
            self.sent.lock().unwrap().push(payload);
            Ok(())
        }
    }
}

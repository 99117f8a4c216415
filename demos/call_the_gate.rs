//! Dials a fixed number over a loopback link that plays the phone's side,
//! prints the counters, and hangs up again.
//!
//! ```text
//! cargo run --example call-the-gate -- --uri tel:608069355
//! ```

extern crate telephone_bearer;

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use clap::Parser;
use tokio::sync::mpsc;

use telephone_bearer::control_point::{CallControlPoint, ControlPointOpcode, ControlPointResultCode};
use telephone_bearer::gatt::{GattRegistry, RegistrationError, ServiceDefinition, CALL_CONTROL_POINT};
use telephone_bearer::transport::{Alert, HostEvent, SendError, Transport};
use telephone_bearer::{AttributeHandle, Config, ConnectionHandle};

#[derive(Parser, Debug)]
#[clap(about = "Originate and terminate a call through the TBS call control point")]
struct Args {
    /// URI to originate a call to.
    #[clap(long, default_value = "tel:608069355")]
    uri: String,

    /// Send the URI as four octets per character.
    #[clap(long)]
    legacy_uri: bool,

    /// Pretend there is no connection to the phone.
    #[clap(long)]
    disconnected: bool,
}

struct Table;

impl GattRegistry for Table {
    fn register(&self, service: &ServiceDefinition) -> Result<AttributeHandle, RegistrationError> {
        let control_point = service
            .characteristics
            .iter()
            .find(|characteristic| characteristic.uuid == CALL_CONTROL_POINT)
            .ok_or(RegistrationError::MissingHandle {
                uuid: CALL_CONTROL_POINT,
            })?;
        println!(
            "service {:?}: characteristic {:?} {:?}",
            service.uuid, control_point.uuid, control_point.properties
        );

        Ok(AttributeHandle::new(0x0017))
    }
}

/// Answers every request the way a phone accepting it would.
struct Loopback {
    connected: bool,
    next_call_index: AtomicU8,
    phone: mpsc::UnboundedSender<Bytes>,
}

impl Transport for Loopback {
    fn connection_handle(&self) -> Option<ConnectionHandle> {
        if self.connected {
            Some(ConnectionHandle::new(0x0001))
        } else {
            None
        }
    }

    fn send(
        &self,
        connection: ConnectionHandle,
        attribute: AttributeHandle,
        payload: Bytes,
    ) -> Result<(), SendError> {
        println!("{} {} <- {:02x?}", connection, attribute, &payload[..]);

        let call_index = if payload[0] == ControlPointOpcode::Originate as u8 {
            self.next_call_index.fetch_add(1, Ordering::Relaxed)
        } else {
            payload[1]
        };
        let reply = Bytes::from(vec![
            payload[0],
            call_index,
            ControlPointResultCode::Success as u8,
        ]);

        self.phone.send(reply).map_err(|_| SendError::new(-1))
    }
}

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = if args.legacy_uri {
        Config::legacy()
    } else {
        Config::default()
    };

    let (alert_tx, mut alert_rx) = mpsc::unbounded_channel::<Alert>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<HostEvent>();
    let (phone_tx, mut phone_rx) = mpsc::unbounded_channel::<Bytes>();

    let host = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                HostEvent::NewNotification => {
                    while let Ok(alert) = alert_rx.try_recv() {
                        println!("alert: {}", alert.message);
                    }
                }
            }
        }
    });

    let ccp = CallControlPoint::new(
        config,
        Arc::new(Loopback {
            connected: !args.disconnected,
            next_call_index: AtomicU8::new(1),
            phone: phone_tx,
        }),
        Arc::new(alert_tx),
        Arc::new(event_tx),
    );
    let control_point = ccp.register(&Table)?;

    println!(
        "Originate URI ({:?}):\n{}",
        ccp.config().uri_encoding,
        args.uri
    );
    let outcome = ccp.originate_call(&args.uri);
    if let Err(err) = &outcome {
        log::warn!("{}", err);
    }

    while let Ok(frame) = phone_rx.try_recv() {
        ccp.on_attribute_access(control_point, &frame);
    }
    tokio::task::yield_now().await;

    println!("-------------------");
    println!("{}", ccp.status().with_outcome(&outcome));
    println!("-------------------");

    ccp.terminate_originated_call()?;
    while let Ok(frame) = phone_rx.try_recv() {
        ccp.on_attribute_access(control_point, &frame);
    }

    println!("{}", ccp.status());

    drop(ccp);
    host.await?;

    Ok(())
}

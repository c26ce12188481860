//! ZeroMQ adapter for the platform boundary.
//!
//! The platform's wire-level client API is out of scope for this
//! workspace (spec §1); this adapter owns only the request/response and
//! event-push bridge, not the platform's actual message schema. A single
//! DEALER socket is confined to a dedicated OS thread (`zmq::Socket` is
//! not `Send`); messages are correlated by a UUID frame, matching the
//! pending-request/oneshot bridge pattern used for the HTTP façade's
//! event-bus IPC.

use crate::error::PlatformError;
use dashmap::DashMap;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use uuid::Uuid;

enum Pending {
    /// A single in-flight request awaiting exactly one reply.
    Once(oneshot::Sender<Vec<u8>>),
    /// A long-lived subscription; every frame under this id is forwarded
    /// until the receiver is dropped.
    Stream(mpsc::UnboundedSender<Vec<u8>>),
}

type PendingMap = Arc<DashMap<String, Pending>>;

/// A request/response and event-push bridge to the platform's validator
/// endpoint over a DEALER socket. Cloning shares the same background
/// worker thread.
#[derive(Clone)]
pub struct ValidatorClient {
    outbound: std_mpsc::Sender<(String, Vec<u8>)>,
    pending: PendingMap,
}

impl ValidatorClient {
    /// Connect to `validator_url` (e.g. `tcp://localhost:4004`) and spawn
    /// the background worker thread that owns the socket.
    pub fn connect(validator_url: &str) -> Result<Self, PlatformError> {
        let ctx = zmq::Context::new();
        let socket = ctx
            .socket(zmq::DEALER)
            .map_err(|e| PlatformError::Connection(e.to_string()))?;
        socket
            .connect(validator_url)
            .map_err(|e| PlatformError::Connection(e.to_string()))?;
        socket
            .set_rcvtimeo(50)
            .map_err(|e| PlatformError::Connection(e.to_string()))?;

        let (outbound_tx, outbound_rx) = std_mpsc::channel::<(String, Vec<u8>)>();
        let pending: PendingMap = Arc::new(DashMap::new());

        let worker_pending = Arc::clone(&pending);
        std::thread::spawn(move || worker_loop(socket, outbound_rx, worker_pending));

        Ok(Self { outbound: outbound_tx, pending })
    }

    /// Send `payload` and await the single correlated response, or time out.
    pub async fn request(&self, payload: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, PlatformError> {
        let correlation_id = Uuid::new_v4().to_string();
        let (tx, rx) = oneshot::channel();
        self.pending.insert(correlation_id.clone(), Pending::Once(tx));

        if self.send_frame(correlation_id.clone(), payload).is_err() {
            self.pending.remove(&correlation_id);
            return Err(PlatformError::Connection("validator worker thread gone".into()));
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(_)) => Err(PlatformError::Connection("response channel dropped".into())),
            Err(_) => {
                self.pending.remove(&correlation_id);
                Err(PlatformError::Rpc(format!("timed out after {timeout:?}")))
            }
        }
    }

    /// Send a one-time `subscribe_payload` and register a persistent
    /// channel that receives every subsequent event frame carrying the
    /// returned subscription id (spec §4.5: a long-lived subscription
    /// established once at startup, never resumed from a cursor).
    pub fn subscribe(&self, subscribe_payload: Vec<u8>) -> Result<mpsc::UnboundedReceiver<Vec<u8>>, PlatformError> {
        let subscription_id = Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::unbounded_channel();
        self.pending.insert(subscription_id.clone(), Pending::Stream(tx));

        self.send_frame(subscription_id, subscribe_payload)
            .map_err(|_| PlatformError::Connection("validator worker thread gone".into()))?;

        Ok(rx)
    }

    /// Send `payload` without waiting for a correlated reply (spec §4.3: a
    /// transaction-outcome acknowledgement is fire-and-forget).
    pub fn notify(&self, payload: Vec<u8>) -> Result<(), PlatformError> {
        let correlation_id = Uuid::new_v4().to_string();
        self.send_frame(correlation_id, payload)
            .map_err(|_| PlatformError::Connection("validator worker thread gone".into()))
    }

    fn send_frame(&self, correlation_id: String, payload: Vec<u8>) -> Result<(), std_mpsc::SendError<(String, Vec<u8>)>> {
        self.outbound.send((correlation_id, payload))
    }
}

fn worker_loop(socket: zmq::Socket, outbound: std_mpsc::Receiver<(String, Vec<u8>)>, pending: PendingMap) {
    loop {
        while let Ok((correlation_id, payload)) = outbound.try_recv() {
            if let Err(e) = socket.send_multipart([correlation_id.as_bytes(), &payload], 0) {
                warn!(error = %e, "failed to send request to validator");
            }
        }

        match socket.recv_multipart(0) {
            Ok(frames) if frames.len() == 2 => {
                let correlation_id = String::from_utf8_lossy(&frames[0]).to_string();
                match pending.get(&correlation_id).map(|e| matches!(*e, Pending::Stream(_))) {
                    Some(true) => {
                        if let Some(entry) = pending.get(&correlation_id) {
                            if let Pending::Stream(tx) = entry.value() {
                                if tx.send(frames[1].clone()).is_err() {
                                    drop(entry);
                                    pending.remove(&correlation_id);
                                }
                            }
                        }
                    }
                    Some(false) => {
                        if let Some((_, Pending::Once(tx))) = pending.remove(&correlation_id) {
                            let _ = tx.send(frames[1].clone());
                        }
                    }
                    None => debug!(correlation_id, "response for unknown or expired request"),
                }
            }
            Ok(_) => warn!("malformed validator response frame"),
            Err(zmq::Error::EAGAIN) => {}
            Err(e) => warn!(error = %e, "validator socket recv error"),
        }
    }
}

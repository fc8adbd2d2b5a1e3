// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Closable FIFO transports linking pipeline stages.
//!
//! A transport is a bounded `async_channel` split into an [`Output`] (the write
//! side, owned by the producing stage) and an [`Input`] (the read side). There
//! is no explicit close call: a transport closes when its last `Output` handle
//! is dropped, and a reader then drains whatever is buffered before seeing
//! `None`. Ownership therefore enforces that only the producer closes, and
//! that it closes once.

use std::fmt;

/// Create a transport holding at most `capacity` buffered items.
///
/// Bounded channels cannot be rendezvous channels, so a capacity of zero is
/// raised to one; that is as close to a synchronous hand-off as it gets.
pub fn transport<E>(capacity: usize) -> (Output<E>, Input<E>) {
    let (sender, receiver) = async_channel::bounded(capacity.max(1));
    (Output { sender }, Input { receiver })
}

/// Read side of a transport.
///
/// Inside the crate an `Input` can be shared by several consumers (see
/// [`Parallel`](crate::engine::Parallel)); each buffered item is handed to
/// exactly one of them, whichever gets to the queue first.
pub struct Input<E> {
    receiver: async_channel::Receiver<E>,
}

impl<E> Input<E> {
    /// Next item, or `None` once the transport is closed and drained.
    pub async fn recv(&self) -> Option<E> {
        self.receiver.recv().await.ok()
    }

    /// An item that is already buffered, without waiting for one.
    pub fn try_recv(&self) -> Option<E> {
        self.receiver.try_recv().ok()
    }

    pub(crate) fn share(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
        }
    }
}

impl<E> fmt::Debug for Input<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("consumers", &self.receiver.receiver_count())
            .field("buffered", &self.receiver.len())
            .finish()
    }
}

/// Write side of a transport. Dropping the last handle closes the transport.
pub struct Output<E> {
    sender: async_channel::Sender<E>,
}

impl<E> Output<E> {
    /// Send one item, waiting while the transport is full.
    ///
    /// Fails only when every reader has gone away; the item is handed back.
    pub async fn send(&self, item: E) -> Result<(), TransportClosed<E>> {
        self.sender
            .send(item)
            .await
            .map_err(|async_channel::SendError(item)| TransportClosed(item))
    }

    /// Send from outside the async runtime, parking the calling thread while
    /// the transport is full.
    pub fn send_blocking(&self, item: E) -> Result<(), TransportClosed<E>> {
        self.sender
            .send_blocking(item)
            .map_err(|async_channel::SendError(item)| TransportClosed(item))
    }

    /// Close this handle. Equivalent to dropping it.
    pub fn close(self) {}

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    pub(crate) fn share(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> fmt::Debug for Output<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("capacity", &self.sender.capacity())
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

/// The reading side of a transport is gone; carries the undelivered item.
pub struct TransportClosed<E>(pub E);

impl<E> TransportClosed<E> {
    pub fn into_inner(self) -> E {
        self.0
    }
}

impl<E> fmt::Debug for TransportClosed<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TransportClosed(..)")
    }
}

impl<E> fmt::Display for TransportClosed<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("transport closed by its reader")
    }
}

impl<E> std::error::Error for TransportClosed<E> {}

//! Typed event iteration over contract logs.
//!
//! An [`EventIterator`] drains a buffer of historical logs first and then,
//! when it was opened with a live subscription, waits for new logs. Logs are
//! decoded lazily into the event type as they are handed out.

use std::{collections::VecDeque, marker::PhantomData};

use alloy::{
    primitives::Address,
    providers::Provider,
    rpc::types::{Filter, FilterBlockOption, Log, TransactionReceipt},
    sol_types::SolEvent,
};
use futures::{Stream, StreamExt as _, stream::BoxStream};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

/// Block range for event queries. The contract address and event signature
/// are filled in by [`EventFilter::to_filter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
}

impl EventFilter {
    pub fn from_block(from_block: u64) -> Self {
        EventFilter {
            from_block: Some(from_block),
            to_block: None,
        }
    }

    pub fn range(from_block: u64, to_block: u64) -> Self {
        EventFilter {
            from_block: Some(from_block),
            to_block: Some(to_block),
        }
    }

    pub fn to_filter<E: SolEvent>(&self, address: Address) -> Filter {
        let mut filter = Filter::new()
            .address(address)
            .event_signature(E::SIGNATURE_HASH)
            .from_block(self.from_block.unwrap_or(0));
        if let Some(to_block) = self.to_block {
            filter = filter.to_block(to_block);
        }
        filter
    }
}

pub struct EventIterator<E> {
    buffered: VecDeque<Log>,
    live: Option<BoxStream<'static, Log>>,
    // (block, log index) of the newest backlog entry; live logs at or before
    // it were already yielded from the buffer.
    last_buffered: Option<(u64, u64)>,
    failure: Option<String>,
    _event: PhantomData<fn() -> E>,
}

impl<E: SolEvent> EventIterator<E> {
    /// An iterator over a fixed set of logs.
    pub fn from_logs(logs: impl IntoIterator<Item = Log>) -> Self {
        let buffered: VecDeque<Log> = logs.into_iter().collect();
        EventIterator {
            last_buffered: buffered.iter().filter_map(log_position).max(),
            buffered,
            live: None,
            failure: None,
            _event: PhantomData,
        }
    }

    /// An iterator that yields `backlog` and then follows `live`.
    pub fn with_live(
        backlog: impl IntoIterator<Item = Log>,
        live: impl Stream<Item = Log> + Send + 'static,
    ) -> Self {
        let mut iter = Self::from_logs(backlog);
        iter.live = Some(live.boxed());
        iter
    }

    /// Advances to the next event.
    ///
    /// Returns `None` once the backlog is drained and there is no live
    /// stream, after [`close`](Self::close), or after a decode failure. A
    /// failure is returned exactly once.
    pub async fn next(&mut self) -> Option<eyre::Result<Log<E>>> {
        if self.failure.is_some() {
            return None;
        }

        let raw = match self.buffered.pop_front() {
            Some(log) => log,
            None => loop {
                let live = self.live.as_mut()?;
                match live.next().await {
                    Some(log) if already_yielded(self.last_buffered, &log) => continue,
                    Some(log) => break log,
                    None => {
                        debug!(event = E::SIGNATURE, "log subscription ended");
                        self.live = None;
                        return None;
                    }
                }
            },
        };

        match raw.log_decode::<E>() {
            Ok(decoded) => Some(Ok(decoded)),
            Err(e) => {
                let report =
                    eyre::Report::new(e).wrap_err(format!("failed to decode {}", E::SIGNATURE));
                warn!(event = E::SIGNATURE, error = %report, "stopping event iterator");
                self.failure = Some(format!("{report:#}"));
                self.live = None;
                Some(Err(report))
            }
        }
    }

    /// The decode failure that terminated the iterator, if any.
    pub fn error(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Number of backlog logs not yet handed out.
    pub fn buffered(&self) -> usize {
        self.buffered.len()
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Stops following the live subscription. Buffered logs are still
    /// yielded.
    pub fn close(&mut self) {
        self.live = None;
    }

    /// Collects every remaining event. Only terminates for iterators without
    /// a live stream.
    pub async fn collect_all(mut self) -> eyre::Result<Vec<Log<E>>> {
        let mut out = Vec::with_capacity(self.buffered.len());
        while let Some(event) = self.next().await {
            out.push(event?);
        }
        Ok(out)
    }

    pub fn into_stream(self) -> impl Stream<Item = eyre::Result<Log<E>>> {
        futures::stream::unfold(self, |mut iter| async move {
            iter.next().await.map(|item| (item, iter))
        })
    }
}

impl<E: SolEvent + Send + 'static> EventIterator<E> {
    /// Pushes decoded events into `sink` from a background task.
    ///
    /// The task stops when the sink is dropped, the stream ends, or a log
    /// fails to decode; the failure is reported by
    /// [`EventSubscription::wait`].
    pub fn forward(mut self, sink: mpsc::Sender<Log<E>>) -> EventSubscription {
        let handle = tokio::spawn(async move {
            while let Some(event) = self.next().await {
                if sink.send(event?).await.is_err() {
                    debug!(event = E::SIGNATURE, "event sink closed");
                    break;
                }
            }
            Ok(())
        });
        EventSubscription {
            handle: Some(handle),
        }
    }
}

fn log_position(log: &Log) -> Option<(u64, u64)> {
    Some((log.block_number?, log.log_index?))
}

fn already_yielded(last_buffered: Option<(u64, u64)>, log: &Log) -> bool {
    match (last_buffered, log_position(log)) {
        (Some(last), Some(pos)) => pos <= last,
        _ => false,
    }
}

/// Handle to a task started by [`EventIterator::forward`]. Dropping it stops
/// the task.
pub struct EventSubscription {
    handle: Option<JoinHandle<eyre::Result<()>>>,
}

impl EventSubscription {
    pub fn unsubscribe(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Waits for the forwarding task and returns its outcome. An
    /// unsubscribed task counts as a clean exit.
    pub async fn wait(mut self) -> eyre::Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Historical events matching `filter`.
pub async fn filter_events<E: SolEvent, P: Provider>(
    provider: &P,
    filter: &Filter,
) -> eyre::Result<EventIterator<E>> {
    let logs = provider.get_logs(filter).await?;
    debug!(event = E::SIGNATURE, count = logs.len(), "fetched historical logs");
    Ok(EventIterator::from_logs(logs))
}

/// Events matching `filter` from its starting block onwards, following new
/// blocks until closed. Requires a pubsub transport.
pub async fn watch_events<E: SolEvent, P: Provider>(
    provider: &P,
    filter: &Filter,
) -> eyre::Result<EventIterator<E>> {
    // Subscribe before reading the backlog so nothing lands in between.
    let mut live_filter = filter.clone();
    live_filter.block_option = FilterBlockOption::Range {
        from_block: None,
        to_block: None,
    };
    let sub = provider.subscribe_logs(&live_filter).await?;
    let backlog = provider.get_logs(filter).await?;
    debug!(event = E::SIGNATURE, backlog = backlog.len(), "watching logs");

    Ok(EventIterator::with_live(backlog, sub.into_stream()))
}

/// Decodes a single raw log.
pub fn parse_event<E: SolEvent>(log: &Log) -> eyre::Result<Log<E>> {
    Ok(log.log_decode::<E>()?)
}

/// All `E` events emitted in a transaction.
pub fn events_in_receipt<E: SolEvent>(receipt: &TransactionReceipt) -> eyre::Result<Vec<Log<E>>> {
    receipt
        .inner
        .logs()
        .iter()
        .filter(|log| log.topic0() == Some(&E::SIGNATURE_HASH))
        .map(parse_event::<E>)
        .collect()
}

/// The first `E` event emitted in a transaction.
pub fn first_event_in_receipt<E: SolEvent>(receipt: &TransactionReceipt) -> eyre::Result<Log<E>> {
    events_in_receipt::<E>(receipt)?
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("No {} event found", E::SIGNATURE))
}

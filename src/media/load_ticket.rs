//! Load tickets: which load of an element is the live one

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How watching a loaded source ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drain {
    Finished,
    Superseded,
}

/// Identifies one `load()` call. Issuing a new ticket retires every older one.
#[derive(Clone, Debug)]
pub struct LoadTicket {
    id: u64,
    counter: Arc<AtomicU64>,
}

impl LoadTicket {
    pub fn issue(counter: &Arc<AtomicU64>) -> Self {
        let id = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Self { id, counter: counter.clone() }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.id
    }

    /// Polls `is_empty` until the source drains or a newer load retires this ticket.
    pub async fn wait_for_drain(&self, poll: Duration, is_empty: impl Fn() -> bool) -> Drain {
        let mut interval = tokio::time::interval(poll);
        loop {
            interval.tick().await;
            if !self.is_current() {
                return Drain::Superseded;
            }
            if is_empty() {
                return Drain::Finished;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    const POLL: Duration = Duration::from_millis(250);

    #[test]
    fn newer_ticket_retires_older_one() {
        let counter = Arc::new(AtomicU64::new(0));
        let first = LoadTicket::issue(&counter);
        assert!(first.is_current());

        let second = LoadTicket::issue(&counter);
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(second.id(), first.id() + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drain_is_reported_once_source_empties() {
        let counter = Arc::new(AtomicU64::new(0));
        let ticket = LoadTicket::issue(&counter);
        let empty = Arc::new(AtomicBool::new(false));

        let flag = empty.clone();
        let watcher = tokio::spawn(async move {
            ticket.wait_for_drain(POLL, move || flag.load(Ordering::SeqCst)).await
        });

        tokio::time::sleep(POLL * 4).await;
        assert!(!watcher.is_finished());

        empty.store(true, Ordering::SeqCst);
        assert_eq!(watcher.await.unwrap(), Drain::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_load_stops_the_watch_without_draining() {
        let counter = Arc::new(AtomicU64::new(0));
        let ticket = LoadTicket::issue(&counter);

        let watcher = tokio::spawn(async move { ticket.wait_for_drain(POLL, || false).await });
        tokio::time::sleep(POLL * 2).await;
        LoadTicket::issue(&counter);

        assert_eq!(watcher.await.unwrap(), Drain::Superseded);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_ticket_wins_over_an_empty_source() {
        let counter = Arc::new(AtomicU64::new(0));
        let stale = LoadTicket::issue(&counter);
        LoadTicket::issue(&counter);

        assert_eq!(stale.wait_for_drain(POLL, || true).await, Drain::Superseded);
    }
}

use tokio::sync::watch;

/// A handle on a published value.
///
/// The first call to [`Subscription::next`] yields the latest value right away,
/// later calls wait for the next publish. Intermediate values published between
/// two reads are coalesced: a slow subscriber only sees the most recent one.
/// Dropping the handle unsubscribes.
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
    primed: bool,
}

impl<T: Clone> Subscription<T> {
    pub(crate) fn new(rx: watch::Receiver<T>) -> Self {
        Self { rx, primed: false }
    }

    /// Snapshot of the latest value without consuming a notification
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Next value, or `None` once the publisher has been dropped
    pub async fn next(&mut self) -> Option<T> {
        if !self.primed {
            self.primed = true;
            return Some(self.rx.borrow_and_update().clone());
        }
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Whether a value was published since the last [`Subscription::next`]
    pub fn has_changed(&self) -> bool {
        !self.primed || self.rx.has_changed().unwrap_or(false)
    }
}

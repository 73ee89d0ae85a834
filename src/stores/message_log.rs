use crate::stores::subscription::Subscription;
use tokio::sync::watch;

/// Messages kept before the oldest start being dropped
pub const MAX_MESSAGES: usize = 100;

/// Append-only list of user-visible status messages, bounded to the
/// newest [`MAX_MESSAGES`]
pub struct MessageLog {
    messages: watch::Sender<Vec<String>>,
}

impl MessageLog {
    pub fn new() -> Self {
        let (messages, _) = watch::channel(Vec::new());
        Self { messages }
    }

    pub fn add(&self, message: impl Into<String>) {
        let message = message.into();
        self.messages.send_modify(|messages| {
            if messages.len() == MAX_MESSAGES {
                messages.remove(0);
            }
            messages.push(message);
        });
    }

    pub fn clear(&self) {
        self.messages.send_replace(Vec::new());
    }

    /// Snapshot of every message in insertion order
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.borrow().is_empty()
    }

    pub fn subscribe(&self) -> Subscription<Vec<String>> {
        Subscription::new(self.messages.subscribe())
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

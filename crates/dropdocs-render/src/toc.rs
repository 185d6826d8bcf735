//! Table of contents and the channel it is published on.
//!
//! The content body and the "On this page" sidebar are siblings in the page
//! layout, so the renderer publishes section entries to a [`TocChannel`] and the
//! sidebar reads them from a subscriber.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use dropdocs_schema::DocumentationPage;

/// Heading level of section entries.
pub const SECTION_LEVEL: u8 = 2;

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    /// Anchor ID
    pub id: String,
    /// Heading text
    pub title: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// One entry per section, in section order.
pub fn table_of_contents(page: &DocumentationPage) -> Vec<TocItem> {
    page.sections
        .iter()
        .map(|section| TocItem {
            id: section.id.clone(),
            title: section.title.clone(),
            level: SECTION_LEVEL,
        })
        .collect()
}

/// Receiving side of a [`TocChannel`].
pub type TocSubscriber = watch::Receiver<Vec<TocItem>>;

/// Shared holder for the current page's table of contents.
#[derive(Debug, Clone)]
pub struct TocChannel {
    sender: Arc<watch::Sender<Vec<TocItem>>>,
}

impl TocChannel {
    /// Create a channel holding an empty table of contents.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Vec::new());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Replace the table of contents. Subscribers are only notified when the
    /// entries differ from the current ones; returns whether they did.
    pub fn publish(&self, items: Vec<TocItem>) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == items {
                false
            } else {
                *current = items;
                true
            }
        })
    }

    /// Publish an empty table of contents.
    pub fn clear(&self) -> bool {
        self.publish(Vec::new())
    }

    /// Snapshot of the current entries.
    pub fn current(&self) -> Vec<TocItem> {
        self.sender.borrow().clone()
    }

    /// Subscribe to changes.
    pub fn subscribe(&self) -> TocSubscriber {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for TocChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: &str) -> TocItem {
        TocItem {
            id: id.to_string(),
            title: id.to_uppercase(),
            level: SECTION_LEVEL,
        }
    }

    #[test]
    fn publish_replaces_wholesale() {
        let channel = TocChannel::new();

        channel.publish(vec![item("a"), item("b")]);
        channel.publish(vec![item("c")]);

        assert_eq!(channel.current(), vec![item("c")]);
    }

    #[test]
    fn identical_publish_does_not_notify() {
        let channel = TocChannel::new();
        let mut rx = channel.subscribe();

        assert!(channel.publish(vec![item("a")]));
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        assert!(!channel.publish(vec![item("a")]));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn clear_empties_the_channel() {
        let channel = TocChannel::new();
        channel.publish(vec![item("a")]);

        assert!(channel.clear());
        assert!(channel.current().is_empty());
        assert!(!channel.clear());
    }

    #[test]
    fn clones_share_state() {
        let channel = TocChannel::new();
        let sidebar = channel.clone();
        let rx = sidebar.subscribe();

        channel.publish(vec![item("a")]);

        assert_eq!(*rx.borrow(), vec![item("a")]);
        assert_eq!(sidebar.subscriber_count(), 1);
    }
}

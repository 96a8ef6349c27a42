// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Outward notifications for user-facing actions that do not change the buffer.
//!
//! Delivery is synchronous and in subscription order. Nothing is queued for
//! subscribers that register later.

use crate::SubscriberId;
use serde::Serialize;
use slotmap::SlotMap;
use std::fmt;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Notification {
    Save,
    ChordSuccess,
}

impl Notification {
    pub fn name(&self) -> &'static str {
        match self {
            Notification::Save => "Save",
            Notification::ChordSuccess => "Chord Success",
        }
    }

    /// Human-readable label, as shown in the event log
    pub fn label(&self) -> &'static str {
        match self {
            Notification::Save => "Action: Save",
            Notification::ChordSuccess => "Action: Chord Success",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

enum Subscriber {
    Callback(Box<dyn FnMut(&Notification)>),
    Channel(UnboundedSender<Notification>),
}

#[derive(Default)]
pub struct Notifier {
    subscribers: SlotMap<SubscriberId, Subscriber>,
    /// Subscription order; slot order is not stable across removals
    order: Vec<SubscriberId>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&Notification) + 'static) -> SubscriberId {
        self.insert(Subscriber::Callback(Box::new(callback)))
    }

    /// Subscribe with a channel. Dropping the receiver unsubscribes on the next emit.
    pub fn subscribe_channel(&mut self) -> (SubscriberId, UnboundedReceiver<Notification>) {
        let (tx, rx) = unbounded_channel();
        (self.insert(Subscriber::Channel(tx)), rx)
    }

    fn insert(&mut self, subscriber: Subscriber) -> SubscriberId {
        let id = self.subscribers.insert(subscriber);
        self.order.push(id);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.order.retain(|existing| *existing != id);
        self.subscribers.remove(id).is_some()
    }

    pub fn emit(&mut self, notification: Notification) {
        debug!(%notification, subscribers = self.order.len(), "emit");
        let mut closed = Vec::new();
        for id in &self.order {
            match self.subscribers.get_mut(*id) {
                Some(Subscriber::Callback(callback)) => callback(&notification),
                Some(Subscriber::Channel(tx)) => {
                    if tx.send(notification).is_err() {
                        closed.push(*id);
                    }
                }
                None => {}
            }
        }
        for id in closed {
            self.unsubscribe(id);
        }
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_without_subscribers() {
        let mut notifier = Notifier::new();
        notifier.emit(Notification::Save);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let mut notifier = Notifier::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = notifier.subscribe({
            let seen = seen.clone();
            move |n| seen.borrow_mut().push(format!("first:{}", n.name()))
        });
        notifier.subscribe({
            let seen = seen.clone();
            move |n| seen.borrow_mut().push(format!("second:{}", n.name()))
        });

        // Re-subscribing after a removal must land at the end, even if a slot is reused.
        notifier.unsubscribe(first);
        notifier.subscribe({
            let seen = seen.clone();
            move |n| seen.borrow_mut().push(format!("third:{}", n.name()))
        });

        notifier.emit(Notification::ChordSuccess);
        assert_eq!(
            *seen.borrow(),
            vec!["second:Chord Success", "third:Chord Success"]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut notifier = Notifier::new();
        let count = Rc::new(RefCell::new(0));
        let id = notifier.subscribe({
            let count = count.clone();
            move |_| *count.borrow_mut() += 1
        });

        notifier.emit(Notification::Save);
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.emit(Notification::Save);

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_channel_subscriber() {
        let mut notifier = Notifier::new();
        let (_, mut rx) = notifier.subscribe_channel();
        notifier.emit(Notification::Save);
        notifier.emit(Notification::ChordSuccess);

        assert_eq!(rx.try_recv().unwrap(), Notification::Save);
        assert_eq!(rx.try_recv().unwrap(), Notification::ChordSuccess);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_is_pruned() {
        let mut notifier = Notifier::new();
        let (_, rx) = notifier.subscribe_channel();
        drop(rx);
        notifier.emit(Notification::Save);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Notification::Save.label(), "Action: Save");
        assert_eq!(Notification::ChordSuccess.label(), "Action: Chord Success");
        assert_eq!(Notification::ChordSuccess.to_string(), "Chord Success");
    }
}

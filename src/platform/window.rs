use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use tracing::trace;

/// Identifies one resize listener on a [`WindowEvents`] source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type EventQueue = Rc<RefCell<VecDeque<Instant>>>;

#[derive(Debug)]
struct ResizeListener {
    id: ListenerId,
    queue: EventQueue,
}

/// Window-level resize event source shared by every mounted container.
///
/// Single-threaded: dispatch queues the event timestamp on each subscriber,
/// and subscribers drain their queue when the host polls them.
#[derive(Debug, Default)]
pub struct WindowEvents {
    next_listener_id: u32,
    resize_listeners: Vec<ResizeListener>,
}

/// Receiving end of a resize subscription.
#[derive(Debug)]
pub struct ResizeSubscription {
    id: ListenerId,
    queue: EventQueue,
}

impl ResizeSubscription {
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Takes every event delivered since the last drain, oldest first.
    pub fn drain(&self) -> Vec<Instant> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

impl WindowEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_resize(&mut self) -> ResizeSubscription {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id = self.next_listener_id.wrapping_add(1);
        let queue = EventQueue::default();
        self.resize_listeners.push(ResizeListener {
            id,
            queue: Rc::clone(&queue),
        });
        ResizeSubscription { id, queue }
    }

    /// Returns `false` if the subscription was already removed.
    pub fn unsubscribe(&mut self, subscription: &ResizeSubscription) -> bool {
        match self
            .resize_listeners
            .iter()
            .position(|listener| listener.id == subscription.id)
        {
            Some(index) => {
                self.resize_listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Delivers a resize event; returns how many listeners received it.
    pub fn dispatch_resize(&self, at: Instant) -> usize {
        for listener in &self.resize_listeners {
            listener.queue.borrow_mut().push_back(at);
        }
        trace!(listeners = self.resize_listeners.len(), "dispatched resize event");
        self.resize_listeners.len()
    }

    #[must_use]
    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }
}

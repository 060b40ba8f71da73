//! Selection change observers
//!
//! Observers are registered on a [`SelectionListeners`] registry and get a
//! [`ListenerHandle`] back. Detaching through the handle removes only that
//! observer, so independent callers never clobber each other.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback = Box<dyn FnMut(usize)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry {
    id: ListenerId,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    entries: Vec<Entry>,
    next_id: u64,
    // Set while callbacks run; entries are moved out during notification.
    notifying: bool,
    // Ids of the moved-out entries.
    running: Vec<ListenerId>,
    detached_while_notifying: Vec<ListenerId>,
    cleared_while_notifying: bool,
}

impl Registry {
    fn insert(&mut self, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, callback });
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() != before {
            return true;
        }
        if self.is_running(id) {
            self.detached_while_notifying.push(id);
            return true;
        }
        false
    }

    /// Whether `id` belongs to an entry moved out by the current
    /// notification and still live.
    fn is_running(&self, id: ListenerId) -> bool {
        self.notifying
            && !self.cleared_while_notifying
            && self.running.contains(&id)
            && !self.detached_while_notifying.contains(&id)
    }

    fn clear(&mut self) {
        self.entries.clear();
        if self.notifying {
            self.cleared_while_notifying = true;
        }
    }
}

/// Registry of selection change observers.
///
/// Single-threaded: callbacks run on the thread that owns the control and
/// may register or detach observers while being notified.
#[derive(Default)]
pub struct SelectionListeners {
    inner: Rc<RefCell<Registry>>,
}

impl SelectionListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer next to the existing ones.
    pub fn subscribe<F>(&self, listener: F) -> ListenerHandle
    where
        F: FnMut(usize) + 'static,
    {
        let id = self.inner.borrow_mut().insert(Box::new(listener));
        ListenerHandle {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Single-slot replacement: drops every observer, then registers
    /// `listener` if one is given.
    pub fn replace<F>(&self, listener: Option<F>) -> Option<ListenerHandle>
    where
        F: FnMut(usize) + 'static,
    {
        self.clear();
        listener.map(|listener| self.subscribe(listener))
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every observer with `index`, in registration order.
    pub fn notify(&self, index: usize) {
        let mut running = {
            let mut registry = self.inner.borrow_mut();
            if registry.notifying {
                // Re-entrant notification from inside a callback is dropped.
                return;
            }
            registry.notifying = true;
            let entries = std::mem::take(&mut registry.entries);
            registry.running = entries.iter().map(|entry| entry.id).collect();
            entries
        };

        for entry in running.iter_mut() {
            (entry.callback)(index);
        }

        let mut registry = self.inner.borrow_mut();
        registry.notifying = false;
        registry.running.clear();
        let detached = std::mem::take(&mut registry.detached_while_notifying);
        if std::mem::take(&mut registry.cleared_while_notifying) {
            return;
        }
        running.retain(|entry| !detached.contains(&entry.id));
        // Observers added during notification go after the existing ones.
        running.append(&mut registry.entries);
        registry.entries = running;
    }
}

impl fmt::Debug for SelectionListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionListeners")
            .field("len", &self.len())
            .finish()
    }
}

/// Handle returned by a registration. Dropping it keeps the observer.
#[derive(Debug, Clone)]
pub struct ListenerHandle {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl ListenerHandle {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the observer. Returns `false` when it was already gone.
    pub fn detach(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removed = registry.borrow_mut().remove(self.id);
        removed
    }

    pub fn is_attached(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let registry = registry.borrow();
        let attached = registry.entries.iter().any(|entry| entry.id == self.id)
            || registry.is_running(self.id);
        attached
    }
}

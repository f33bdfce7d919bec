//! Shared wizard state.
//!
//! One `WizardState` holds the answers for one questionnaire session. Clones
//! share the same session, so each step can keep its own handle. The store is
//! single-threaded: every write and every notification runs on the caller's
//! thread and finishes before the call returns.
//!
//! ## Notification
//!
//! After each `set_data` / `reset` every listener runs once, in subscription
//! order. A pass works on a snapshot of the listener list:
//!
//! - a listener unsubscribed mid-pass is skipped if it has not run yet;
//! - a listener subscribed mid-pass first runs on the next notification;
//! - a write made from inside a listener is applied at once, but its
//!   notification is queued and delivered as one extra pass after the current
//!   one completes. Listeners are never re-entered.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::answers::{AnswersPatch, WizardAnswers};
use crate::error::EngineError;

type Listener = Rc<RefCell<Box<dyn FnMut()>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    callback: Listener,
}

#[derive(Default)]
struct StoreInner {
    data: RefCell<WizardAnswers>,
    listeners: RefCell<Vec<Registration>>,
    next_id: Cell<u64>,
    notifying: Cell<bool>,
    pending: Cell<bool>,
}

impl StoreInner {
    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|r| r.id == id)
    }

    fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|r| r.id == id) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Clears the notifying flag even if a listener panics.
struct NotifyGuard<'a>(&'a Cell<bool>);

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[derive(Clone, Default)]
pub struct WizardState {
    inner: Rc<StoreInner>,
}

impl fmt::Debug for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardState")
            .field("data", &*self.inner.data.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl WizardState {
    /// A fresh session holding the default answers.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(answers: WizardAnswers) -> Self {
        let state = Self::new();
        *state.inner.data.borrow_mut() = answers;
        state
    }

    /// Snapshot of the current answers.
    pub fn get_data(&self) -> WizardAnswers {
        self.inner.data.borrow().clone()
    }

    /// Read the current answers without cloning them.
    ///
    /// The closure must not write to this store.
    pub fn with_data<R>(&self, f: impl FnOnce(&WizardAnswers) -> R) -> R {
        f(&self.inner.data.borrow())
    }

    /// Merge `patch` into the answers and notify every listener.
    ///
    /// No validation: out-of-range percentages are stored as given.
    pub fn set_data(&self, patch: impl Into<AnswersPatch>) {
        let patch = patch.into();
        self.inner.data.borrow_mut().apply(&patch);
        log::trace!("wizard state merged {:?}", patch);
        self.notify();
    }

    /// Like `set_data`, but refuses the whole patch if any percentage is
    /// above 100. Nothing is merged or notified on error.
    pub fn try_set_data(&self, patch: impl Into<AnswersPatch>) -> Result<(), EngineError> {
        let patch = patch.into();
        patch.validate()?;
        self.set_data(patch);
        Ok(())
    }

    /// Restore the default answers and notify every listener.
    pub fn reset(&self) {
        *self.inner.data.borrow_mut() = WizardAnswers::default();
        log::debug!("wizard state reset to defaults");
        self.notify();
    }

    /// Register `listener`; it runs after every completed write.
    pub fn subscribe(&self, listener: impl FnMut() + 'static) -> Subscription {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push(Registration {
            id,
            callback: Rc::new(RefCell::new(Box::new(listener))),
        });
        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self) {
        let inner = &self.inner;
        if inner.notifying.get() {
            inner.pending.set(true);
            return;
        }

        inner.notifying.set(true);
        let _guard = NotifyGuard(&inner.notifying);

        loop {
            inner.pending.set(false);
            let snapshot: Vec<(ListenerId, Listener)> = inner
                .listeners
                .borrow()
                .iter()
                .map(|r| (r.id, Rc::clone(&r.callback)))
                .collect();

            for (id, callback) in snapshot {
                if !inner.is_registered(id) {
                    continue;
                }
                (callback.borrow_mut())();
            }

            if !inner.pending.get() {
                break;
            }
            log::trace!("delivering queued wizard state notification");
        }
    }
}

/// Handle returned by [`WizardState::subscribe`].
///
/// Dropping the handle keeps the listener registered; call `unsubscribe`.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: ListenerId,
    store: Weak<StoreInner>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove exactly this listener. Returns false if it was already gone.
    pub fn unsubscribe(&self) -> bool {
        match self.store.upgrade() {
            Some(inner) => inner.remove(self.id),
            None => false,
        }
    }
}

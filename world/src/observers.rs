//! Position-change notification fan-out.

use std::fmt;

/// Callback invoked after every successful player-position change.
pub trait PositionObserver {
    /// Reacts to the player having moved.
    fn update(&mut self);
}

impl<F> PositionObserver for F
where
    F: FnMut(),
{
    fn update(&mut self) {
        self()
    }
}

/// Handle returned on subscription, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn PositionObserver>)>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn PositionObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self) {
        for (_, observer) in &mut self.entries {
            observer.update();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("next_id", &self.next_id)
            .field("observers", &self.entries.len())
            .finish()
    }
}

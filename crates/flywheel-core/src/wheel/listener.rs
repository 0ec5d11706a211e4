//! Listener registration and ordered dispatch.

/// Handle returned by listener registration, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Scroll-burst lifecycle notification. `Started` fires once when a
/// gesture or animation sets the wheel in motion; `Finished` fires once
/// when it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Started,
    Finished,
}

type ChangedFn = Box<dyn FnMut(usize, usize)>;
type ScrollFn = Box<dyn FnMut(ScrollPhase)>;

/// Insertion-ordered callback collections for the two notification
/// channels. Dispatch walks a snapshot of the registered ids, so a
/// listener removed between batches never sees a stale call.
pub(crate) struct ListenerBus {
    changed: Vec<(ListenerId, ChangedFn)>,
    scroll: Vec<(ListenerId, ScrollFn)>,
    next_id: u64,
}

impl ListenerBus {
    pub fn new() -> Self {
        Self {
            changed: Vec::new(),
            scroll: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    pub fn add_changed(&mut self, listener: ChangedFn) -> ListenerId {
        let id = self.next_id();
        self.changed.push((id, listener));
        id
    }

    pub fn add_scroll(&mut self, listener: ScrollFn) -> ListenerId {
        let id = self.next_id();
        self.scroll.push((id, listener));
        id
    }

    /// Remove a listener from whichever channel holds it. Returns
    /// whether anything was removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.changed.len() + self.scroll.len();
        self.changed.retain(|(lid, _)| *lid != id);
        self.scroll.retain(|(lid, _)| *lid != id);
        before != self.changed.len() + self.scroll.len()
    }

    pub fn notify_changed(&mut self, old: usize, new: usize) {
        let ids: Vec<ListenerId> = self.changed.iter().map(|(id, _)| *id).collect();
        for id in ids {
            if let Some((_, listener)) = self.changed.iter_mut().find(|(lid, _)| *lid == id) {
                listener(old, new);
            }
        }
    }

    pub fn notify_scroll(&mut self, phase: ScrollPhase) {
        let ids: Vec<ListenerId> = self.scroll.iter().map(|(id, _)| *id).collect();
        for id in ids {
            if let Some((_, listener)) = self.scroll.iter_mut().find(|(lid, _)| *lid == id) {
                listener(phase);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_changed_listeners_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = ListenerBus::new();

        let log_a = Rc::clone(&log);
        bus.add_changed(Box::new(move |old, new| {
            log_a.borrow_mut().push(format!("a:{}->{}", old, new));
        }));
        let log_b = Rc::clone(&log);
        bus.add_changed(Box::new(move |old, new| {
            log_b.borrow_mut().push(format!("b:{}->{}", old, new));
        }));

        bus.notify_changed(3, 4);
        assert_eq!(*log.borrow(), vec!["a:3->4", "b:3->4"]);
    }

    #[test]
    fn test_removed_listener_stops_firing() {
        let calls = Rc::new(RefCell::new(0));
        let mut bus = ListenerBus::new();

        let calls_inner = Rc::clone(&calls);
        let id = bus.add_scroll(Box::new(move |_| {
            *calls_inner.borrow_mut() += 1;
        }));

        bus.notify_scroll(ScrollPhase::Started);
        assert!(bus.remove(id));
        bus.notify_scroll(ScrollPhase::Finished);

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_false() {
        let mut bus = ListenerBus::new();
        let id = bus.add_changed(Box::new(|_, _| {}));
        assert!(bus.remove(id));
        assert!(!bus.remove(id));
    }

    #[test]
    fn test_channels_are_independent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = ListenerBus::new();

        let log_changed = Rc::clone(&log);
        bus.add_changed(Box::new(move |_, new| {
            log_changed.borrow_mut().push(format!("changed:{}", new));
        }));
        let log_scroll = Rc::clone(&log);
        bus.add_scroll(Box::new(move |phase| {
            log_scroll.borrow_mut().push(format!("{:?}", phase));
        }));

        bus.notify_scroll(ScrollPhase::Started);
        bus.notify_changed(0, 1);
        bus.notify_scroll(ScrollPhase::Finished);

        assert_eq!(*log.borrow(), vec!["Started", "changed:1", "Finished"]);
    }
}

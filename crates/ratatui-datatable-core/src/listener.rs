use crate::column::ColumnId;
use std::fmt;

/// Handle returned by [`ColumnOrderListeners::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type ColumnOrderListener = Box<dyn FnMut(&[ColumnId])>;

/// Subscribers notified after an accepted column reorder.
///
/// Dispatch order is registration order. Listeners run synchronously inside the mutation that
/// triggered them.
#[derive(Default)]
pub struct ColumnOrderListeners {
    next_id: u64,
    entries: Vec<(ListenerId, ColumnOrderListener)>,
}

impl fmt::Debug for ColumnOrderListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnOrderListeners")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl ColumnOrderListeners {
    pub fn subscribe(&mut self, listener: impl FnMut(&[ColumnId]) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, order: &[ColumnId]) {
        for (_, listener) in &mut self.entries {
            listener(order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_in_registration_order_until_unsubscribed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = ColumnOrderListeners::default();

        let first = {
            let log = log.clone();
            listeners.subscribe(move |order| {
                log.borrow_mut().push(format!("first:{}", order.len()))
            })
        };
        {
            let log = log.clone();
            listeners.subscribe(move |order| log.borrow_mut().push(format!("second:{}", order[0])));
        }

        let order = [ColumnId::from("b"), ColumnId::from("a")];
        listeners.notify(&order);
        assert!(listeners.unsubscribe(first));
        assert!(!listeners.unsubscribe(first));
        listeners.notify(&order);

        assert_eq!(*log.borrow(), vec!["first:2", "second:b", "second:b"]);
    }
}

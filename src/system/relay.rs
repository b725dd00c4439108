use std::{cell::RefCell, rc::Rc};

/// A single-slot mailbox for handing a day key from one screen to another
/// without either holding a reference to the other. The slot holds at most
/// one pending key: producing again before the consumer polls overwrites the
/// old value, and consuming clears the slot in the same operation, so a key
/// is observed at most once.
///
/// The key is an opaque string here. The screens agree on `%Y-%m-%d`, but
/// the relay neither parses nor validates what passes through it.
///
/// The relay is constructed once in `main` and cloned into the components
/// that produce or consume requests. Delivery is best-effort: nothing is
/// persisted, and an unconsumed request is simply dropped when the process
/// exits.
#[derive(Debug, Default, Clone)]
pub struct ViewRelay {
    pending: Rc<RefCell<Option<String>>>,
}

impl ViewRelay {
    /// Asks whichever screen next polls the relay to show the entry list for
    /// the given day. Replaces any request that hasn't been consumed yet.
    pub fn request_day_list(&self, date_key: impl Into<String>) {
        *self.pending.borrow_mut() = Some(date_key.into());
    }

    /// Takes the pending day key, leaving the slot empty. Returns `None`
    /// when no request is pending, which is the normal case.
    pub fn take_day_list_request(&self) -> Option<String> {
        self.pending.borrow_mut().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_returns_the_produced_key() {
        let relay = ViewRelay::default();
        relay.request_day_list("2024-06-01");

        assert_eq!(relay.take_day_list_request().as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn consume_clears_the_slot() {
        let relay = ViewRelay::default();
        relay.request_day_list("2024-06-01");

        assert_eq!(relay.take_day_list_request().as_deref(), Some("2024-06-01"));
        assert_eq!(relay.take_day_list_request(), None);
    }

    #[test]
    fn consume_without_producing_returns_none() {
        let relay = ViewRelay::default();

        assert_eq!(relay.take_day_list_request(), None);
    }

    #[test]
    fn second_produce_overwrites_the_first() {
        let relay = ViewRelay::default();
        relay.request_day_list("2024-06-01");
        relay.request_day_list("2024-06-02");

        assert_eq!(relay.take_day_list_request().as_deref(), Some("2024-06-02"));
        assert_eq!(relay.take_day_list_request(), None);
    }

    #[test]
    fn clones_share_the_slot() {
        let producer = ViewRelay::default();
        let consumer = producer.clone();
        producer.request_day_list("2024-06-15");

        assert_eq!(consumer.take_day_list_request().as_deref(), Some("2024-06-15"));
        assert_eq!(producer.take_day_list_request(), None);
    }

    #[test]
    fn keys_pass_through_uninterpreted() {
        let relay = ViewRelay::default();
        relay.request_day_list("not a date at all");

        assert_eq!(
            relay.take_day_list_request().as_deref(),
            Some("not a date at all")
        );
    }
}

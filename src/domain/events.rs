use crate::domain::directory::{Company, IndicatorSelection};
use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
    fn timestamp(&self) -> u64 {
        use crate::domain::logging::get_time_provider;
        get_time_provider().current_timestamp()
    }
}

/// Selection changes coming from the directory or the search box.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    CompanySelected(Company),
    IndicatorSelected(IndicatorSelection),
    CompanyCleared,
    IndicatorCleared,
}

impl DomainEvent for SelectionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SelectionEvent::CompanySelected(_) => "CompanySelected",
            SelectionEvent::IndicatorSelected(_) => "IndicatorSelected",
            SelectionEvent::CompanyCleared => "CompanyCleared",
            SelectionEvent::IndicatorCleared => "IndicatorCleared",
        }
    }
}

/// Event dispatcher for publishing events
pub trait EventDispatcher {
    fn publish(&self, event: SelectionEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&SelectionEvent)>;

/// In-memory pub/sub for selection events.
///
/// Handlers run in registration order. The handler list is snapshotted
/// before dispatch, so a handler may subscribe, unsubscribe or publish
/// without invalidating the ongoing delivery.
#[derive(Default)]
pub struct SelectionBus {
    handlers: RefCell<Vec<(SubscriptionId, Handler)>>,
    next_id: Cell<u64>,
}

impl SelectionBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&SelectionEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Returns false when the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl EventDispatcher for SelectionBus {
    fn publish(&self, event: SelectionEvent) {
        let snapshot: Vec<Handler> =
            self.handlers.borrow().iter().map(|(_, handler)| Rc::clone(handler)).collect();
        for handler in snapshot {
            handler(&event);
        }
    }
}

impl Debug for SelectionBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

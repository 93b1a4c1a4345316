// crates/pattern-catalog-core/tests/support/fixtures.rs
// ============================================================================
// Module: Test Fixtures
// Description: Minimal pattern implementations for core integration tests.
// ============================================================================
//! ## Overview
//! Small correct and deliberately broken implementations used to exercise the
//! registry, verifier, and runner without the built-in pattern catalog.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    dead_code,
    reason = "Test-only fixtures."
)]

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use pattern_catalog_core::Contract;
use pattern_catalog_core::ContractBook;
use pattern_catalog_core::Factory;
use pattern_catalog_core::FactoryError;
use pattern_catalog_core::PatternCategory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::BoxedComponent;
use pattern_catalog_core::capabilities::Component;
use pattern_catalog_core::capabilities::DecoratorPattern;
use pattern_catalog_core::capabilities::InstanceKey;
use pattern_catalog_core::capabilities::IteratorPattern;
use pattern_catalog_core::capabilities::Layer;
use pattern_catalog_core::capabilities::ObjectPoolPattern;
use pattern_catalog_core::capabilities::Observer;
use pattern_catalog_core::capabilities::ObserverPattern;
use pattern_catalog_core::capabilities::PooledObject;
use pattern_catalog_core::capabilities::ReleaseOutcome;
use pattern_catalog_core::capabilities::SingletonPattern;
use pattern_catalog_core::capabilities::SubscriptionId;
use pattern_catalog_core::capabilities::Update;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ========================================================================
// Iterator
// ========================================================================

/// Iterator over a fixed list of values.
pub struct ListCursor {
    /// Items to yield.
    pub items: Vec<Value>,
    /// Next position.
    pub position: usize,
    /// Keeps reporting `has_next` after the end when set.
    pub sticky_has_next: bool,
}

impl ListCursor {
    /// Creates a cursor at the first item.
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            position: 0,
            sticky_has_next: false,
        }
    }
}

impl Scriptable for ListCursor {
    fn invoke(&mut self, operation: &str, _args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "next" => self.next_item(),
            "has_next" => Ok(json!(self.has_next())),
            "explode" => panic!("cursor exploded"),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl IteratorPattern for ListCursor {
    fn total(&self) -> usize {
        self.items.len()
    }

    fn has_next(&self) -> bool {
        self.sticky_has_next || self.position < self.items.len()
    }

    fn next_item(&mut self) -> Result<Value, PatternError> {
        let item = self.items.get(self.position).cloned().ok_or(PatternError::ExhaustedIterator)?;
        self.position += 1;
        Ok(item)
    }
}

/// Factory yielding a cursor over `[1, 2, 3]`.
pub fn three_items() -> Factory {
    Factory::new(|| Ok(PatternInstance::iterator(ListCursor::new(vec![json!(1), json!(2), json!(3)]))))
}

// ========================================================================
// Singleton
// ========================================================================

/// Handle to a shared record list.
pub struct SharedRecords {
    /// Shared state.
    pub shared: Arc<Mutex<Vec<String>>>,
}

impl Scriptable for SharedRecords {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "record" => {
                let entry = args::string(operation, args, 0)?.to_string();
                self.record(&entry);
                Ok(Value::Null)
            }
            "records" => Ok(json!(self.records())),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl SingletonPattern for SharedRecords {
    fn instance_key(&self) -> InstanceKey {
        InstanceKey(Arc::as_ptr(&self.shared) as usize)
    }

    fn record(&mut self, entry: &str) {
        self.shared.lock().unwrap().push(entry.to_string());
    }

    fn records(&self) -> Vec<String> {
        self.shared.lock().unwrap().clone()
    }

    fn retract(&mut self, entry: &str) -> bool {
        let mut records = self.shared.lock().unwrap();
        match records.iter().rposition(|record| record == entry) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Factory whose handles share one record list.
pub fn shared_singleton() -> Factory {
    let shared = Arc::new(Mutex::new(Vec::new()));
    Factory::new(move || {
        Ok(PatternInstance::singleton(SharedRecords {
            shared: Arc::clone(&shared),
        }))
    })
}

/// Broken factory returning a fresh object on every call.
pub fn fresh_singleton() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::singleton(SharedRecords {
            shared: Arc::new(Mutex::new(Vec::new())),
        }))
    })
}

// ========================================================================
// Observer
// ========================================================================

/// Subject broadcasting to boxed observers.
pub struct Broadcaster {
    /// Subscribers in subscription order.
    pub observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
    /// Next subscription id.
    pub next_id: u64,
    /// Delivers to subscribers in reverse order when set.
    pub reversed: bool,
}

impl Broadcaster {
    /// Creates a subject with no subscribers.
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
            reversed: false,
        }
    }
}

impl Scriptable for Broadcaster {
    fn invoke(&mut self, operation: &str, _args: &[Value]) -> Result<Value, PatternError> {
        Err(PatternError::unknown_operation(operation))
    }
}

impl ObserverPattern for Broadcaster {
    fn subscribe(&mut self, observer: Box<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn notify(&mut self, update: &Update) -> usize {
        if self.reversed {
            for (_, observer) in self.observers.iter_mut().rev() {
                observer.update(update);
            }
        } else {
            for (_, observer) in &mut self.observers {
                observer.update(update);
            }
        }
        self.observers.len()
    }
}

// ========================================================================
// Object Pool
// ========================================================================

/// Bounded pool of numbered objects.
pub struct NumberedPool {
    /// Idle objects.
    pub idle: Vec<PooledObject>,
    /// Maximum idle size.
    pub max: usize,
    /// Objects constructed so far.
    pub created: u64,
    /// Retains every release when set, ignoring `max`.
    pub unbounded: bool,
    /// Identifiers currently checked out.
    pub checked_out: BTreeSet<u64>,
    /// Accepts releases of objects that are not checked out when set.
    pub trusting: bool,
}

impl NumberedPool {
    /// Creates an empty pool.
    pub fn new(max: usize) -> Self {
        Self {
            idle: Vec::new(),
            max,
            created: 0,
            unbounded: false,
            checked_out: BTreeSet::new(),
            trusting: false,
        }
    }
}

impl Scriptable for NumberedPool {
    fn invoke(&mut self, operation: &str, _args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "acquire" => Ok(json!(self.acquire().id)),
            "available" => Ok(json!(self.available())),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl ObjectPoolPattern for NumberedPool {
    fn max_size(&self) -> usize {
        self.max
    }

    fn acquire(&mut self) -> PooledObject {
        let object = self.idle.pop().unwrap_or_else(|| {
            self.created += 1;
            PooledObject {
                id: self.created,
            }
        });
        self.checked_out.insert(object.id);
        object
    }

    fn release(&mut self, object: PooledObject) -> ReleaseOutcome {
        if !self.checked_out.remove(&object.id) && !self.trusting {
            return ReleaseOutcome::Rejected;
        }
        if self.unbounded || self.idle.len() < self.max {
            self.idle.push(object);
            ReleaseOutcome::Retained
        } else {
            ReleaseOutcome::Discarded
        }
    }

    fn available(&self) -> usize {
        self.idle.len()
    }

    fn created(&self) -> u64 {
        self.created
    }
}

// ========================================================================
// Decorator
// ========================================================================

/// Component holding a fixed price.
pub struct Price(pub u64);

impl Component for Price {
    fn evaluate(&self) -> Value {
        json!(self.0)
    }
}

/// Price plus a fixed amount.
pub struct Surcharged {
    /// Wrapped component.
    pub inner: BoxedComponent,
    /// Amount added to the inner price.
    pub amount: u64,
}

impl Component for Surcharged {
    fn evaluate(&self) -> Value {
        json!(self.inner.evaluate().as_u64().unwrap_or_default() + self.amount)
    }
}

/// Price with tax and surcharge layers.
pub struct PriceStack {
    /// Charges more the first time the surcharge layer is applied when set.
    pub stateful: bool,
    /// Surcharge applications so far.
    pub applied: Arc<AtomicUsize>,
}

impl PriceStack {
    /// Creates a stack; `stateful` breaks regrouping.
    pub fn new(stateful: bool) -> Self {
        Self {
            stateful,
            applied: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Scriptable for PriceStack {
    fn invoke(&mut self, operation: &str, _args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "price" => {
                let layers = self.layers();
                Ok(layers.iter().fold(self.base(), |component, layer| layer.apply(component)).evaluate())
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl DecoratorPattern for PriceStack {
    fn base(&self) -> BoxedComponent {
        Box::new(Price(10))
    }

    fn layers(&self) -> Vec<Layer> {
        let stateful = self.stateful;
        let applied = Arc::clone(&self.applied);
        vec![
            Layer::new("tax", |inner| Box::new(Surcharged { inner, amount: 2 })),
            Layer::new("surcharge", move |inner| {
                let first = applied.fetch_add(1, Ordering::SeqCst) == 0;
                let amount = if stateful && first { 10 } else { 1 };
                Box::new(Surcharged { inner, amount })
            }),
        ]
    }
}

/// Factory yielding a price stack.
pub fn price_stack(stateful: bool) -> Factory {
    Factory::new(move || Ok(PatternInstance::decorator(PriceStack::new(stateful))))
}

// ========================================================================
// Helpers
// ========================================================================

/// Standard contract for `category`.
pub fn contract(category: PatternCategory) -> Arc<Contract> {
    ContractBook::standard().get(category)
}

/// Factory that always fails.
pub fn failing_factory() -> Factory {
    Factory::new(|| Err(FactoryError::new("backing resource unavailable")))
}

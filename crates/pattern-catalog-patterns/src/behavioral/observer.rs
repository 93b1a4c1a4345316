// crates/pattern-catalog-patterns/src/behavioral/observer.rs
// ============================================================================
// Module: Observer Built-ins
// Description: Stock market and weather station subjects.
// Purpose: Broadcast updates to subscribers in subscription order.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! A [`Subject`] keeps its subscribers in a `Vec`, so notification order is
//! subscription order. Scripted runs subscribe labelled recording observers
//! that share one [`ObservationLog`] owned by the subject. `notify(topic,
//! value)` returns the deliveries it made; the whole log is read back with the
//! `observations` operation. `set_price` and `set_temperature` publish on the
//! subject's own feed and return the delivery count.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::Observation;
use pattern_catalog_core::capabilities::ObservationLog;
use pattern_catalog_core::capabilities::Observer;
use pattern_catalog_core::capabilities::ObserverPattern;
use pattern_catalog_core::capabilities::SubscriptionId;
use pattern_catalog_core::capabilities::Update;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Subject
// ============================================================================

/// What a subject publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Feed {
    /// Stock prices keyed by ticker symbol.
    StockPrices,
    /// Temperature readings.
    Temperature,
}

/// Subject broadcasting updates to its subscribers.
pub struct Subject {
    /// Published feed.
    feed: Feed,
    /// Subscribers in subscription order.
    subscribers: Vec<(SubscriptionId, Box<dyn Observer>)>,
    /// Next subscription identifier.
    next_id: u64,
    /// Log shared by scripted subscribers.
    log: ObservationLog,
}

impl Subject {
    /// Creates a subject with no subscribers.
    fn new(feed: Feed) -> Self {
        Self {
            feed,
            subscribers: Vec::new(),
            next_id: 0,
            log: ObservationLog::new(),
        }
    }

    /// Builds the update published by a scripted operation.
    fn scripted_update(&self, operation: &str, args: &[Value]) -> Result<Update, PatternError> {
        match (self.feed, operation) {
            (Feed::StockPrices, "set_price") => {
                let symbol = args::string(operation, args, 0)?;
                let price = args::value(operation, args, 1)?;
                if !price.is_number() {
                    return Err(PatternError::invalid_argument(operation, "price must be a number"));
                }
                Ok(Update::new(symbol, price.clone()))
            }
            (Feed::Temperature, "set_temperature") => {
                let reading = args::value(operation, args, 0)?;
                if !reading.is_number() {
                    return Err(PatternError::invalid_argument(
                        operation,
                        "temperature must be a number",
                    ));
                }
                Ok(Update::new("temperature", reading.clone()))
            }
            _ => Err(PatternError::unknown_operation(operation)),
        }
    }
}

/// Scripted view of one delivery.
fn observation_json(entry: &Observation) -> Value {
    json!({
        "observer": entry.observer,
        "topic": entry.update.topic,
        "value": entry.update.value,
    })
}

impl Scriptable for Subject {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "subscribe" => {
                let label = args::string(operation, args, 0)?;
                let observer = self.log.observer(label);
                let id = self.subscribe(Box::new(observer));
                Ok(json!(id.0))
            }
            "unsubscribe" => {
                let id = SubscriptionId(args::unsigned(operation, args, 0)?);
                Ok(json!(self.unsubscribe(id)))
            }
            "observations" => Ok(Value::Array(self.log.entries().iter().map(observation_json).collect())),
            "subscribers" => Ok(json!(self.subscribers.len())),
            "notify" => {
                let topic = args::string(operation, args, 0)?;
                let value = args::value(operation, args, 1)?.clone();
                let seen = self.log.len();
                self.notify(&Update::new(topic, value));
                Ok(Value::Array(self.log.entries().iter().skip(seen).map(observation_json).collect()))
            }
            _ => {
                let update = self.scripted_update(operation, args)?;
                Ok(json!(self.notify(&update)))
            }
        }
    }
}

impl ObserverPattern for Subject {
    fn subscribe(&mut self, observer: Box<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, observer));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(subscription, _)| *subscription != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, update: &Update) -> usize {
        for (_, observer) in &mut self.subscribers {
            observer.update(update);
        }
        self.subscribers.len()
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Stock market publishing prices via `notify` or `set_price(symbol, price)`.
#[must_use]
pub fn stock_market() -> Factory {
    Factory::new(|| Ok(PatternInstance::observer(Subject::new(Feed::StockPrices))))
}

/// Weather station publishing readings via `notify` or `set_temperature(celsius)`.
#[must_use]
pub fn weather_station() -> Factory {
    Factory::new(|| Ok(PatternInstance::observer(Subject::new(Feed::Temperature))))
}

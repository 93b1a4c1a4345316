// crates/pattern-catalog-core/src/capabilities/behavioral.rs
// ============================================================================
// Module: Behavioral Capabilities
// Description: Capability traits for communication and control-flow patterns.
// Purpose: Name the operations contracts rely on for behavioral entries.
// Dependencies: crate::{error, instance}, serde, serde_json
// ============================================================================

//! ## Overview
//! Command, Iterator, Mediator, Observer, State, Strategy, and Visitor
//! capabilities, plus the recording observer used by contracts and scripted
//! subjects to capture deliveries as data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::PatternError;
use crate::instance::Scriptable;

// ============================================================================
// SECTION: Observer Types
// ============================================================================

/// Update broadcast by a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Topic of the update (`AAPL`, `temperature`, ...).
    pub topic: String,
    /// Update payload.
    pub value: Value,
}

impl Update {
    /// Creates an update.
    pub fn new(topic: impl Into<String>, value: Value) -> Self {
        Self {
            topic: topic.into(),
            value,
        }
    }
}

/// Receiver of subject updates.
pub trait Observer: Send {
    /// Handles one update.
    fn update(&mut self, update: &Update);
}

/// Subscription handle returned by [`ObserverPattern::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// One update as received by a named observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Observer label.
    pub observer: String,
    /// Update received.
    pub update: Update,
}

/// Shared, ordered log of observations across several observers.
#[derive(Debug, Clone, Default)]
pub struct ObservationLog {
    /// Observations in delivery order.
    entries: Arc<Mutex<Vec<Observation>>>,
}

impl ObservationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an observer that appends to this log under `label`.
    pub fn observer(&self, label: impl Into<String>) -> RecordingObserver {
        RecordingObserver {
            label: label.into(),
            log: self.clone(),
        }
    }

    /// Returns every observation in delivery order.
    #[must_use]
    pub fn entries(&self) -> Vec<Observation> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns observations recorded by one observer.
    #[must_use]
    pub fn entries_for(&self, label: &str) -> Vec<Observation> {
        self.entries().into_iter().filter(|entry| entry.observer == label).collect()
    }

    /// Number of recorded observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends one observation.
    fn push(&self, observation: Observation) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(observation);
    }
}

/// Observer stub that records every update it receives.
#[derive(Debug, Clone)]
pub struct RecordingObserver {
    /// Label attached to recorded observations.
    label: String,
    /// Destination log.
    log: ObservationLog,
}

impl RecordingObserver {
    /// Observer label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Observer for RecordingObserver {
    fn update(&mut self, update: &Update) {
        self.log.push(Observation {
            observer: self.label.clone(),
            update: update.clone(),
        });
    }
}

// ============================================================================
// SECTION: Mediator Types
// ============================================================================

/// Message delivered by a mediator to one colleague.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Colleague receiving the message.
    pub recipient: String,
    /// Colleague that sent the message.
    pub sender: String,
    /// Message body.
    pub message: String,
}

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Command capability: executes and undoes named requests against a receiver.
pub trait CommandPattern: Scriptable {
    /// Commands the invoker can execute.
    fn commands(&self) -> Vec<String>;

    /// Observable receiver state.
    fn receiver_state(&self) -> Value;

    /// Executes a command and returns its result.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown commands.
    fn execute(&mut self, command: &str) -> Result<Value, PatternError>;

    /// Undoes the most recent command, returning its name.
    ///
    /// Returns `Ok(None)` when the history is empty.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the command cannot be reverted.
    fn undo(&mut self) -> Result<Option<String>, PatternError>;

    /// Executed commands still on the history, oldest first.
    fn history(&self) -> Vec<String>;
}

/// Iterator capability with explicit exhaustion.
pub trait IteratorPattern: Scriptable {
    /// Number of elements in the underlying collection.
    fn total(&self) -> usize;

    /// Returns true while elements remain.
    fn has_next(&self) -> bool;

    /// Produces the next element.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::ExhaustedIterator`] after the last element.
    fn next_item(&mut self) -> Result<Value, PatternError>;
}

/// Mediator capability: routes messages between colleagues.
pub trait MediatorPattern: Scriptable {
    /// Adds a colleague.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] when the colleague already joined.
    fn join(&mut self, colleague: &str) -> Result<(), PatternError>;

    /// Registered colleagues in join order.
    fn colleagues(&self) -> Vec<String>;

    /// Sends a message from `sender` and returns the resulting deliveries.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] when `sender` is not a colleague.
    fn send(&mut self, sender: &str, message: &str) -> Result<Vec<Delivery>, PatternError>;
}

/// Observer capability for the subject side.
pub trait ObserverPattern: Scriptable {
    /// Subscribes an observer; updates are delivered in subscription order.
    fn subscribe(&mut self, observer: Box<dyn Observer>) -> SubscriptionId;

    /// Removes a subscription. Returns false when it was not present.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Delivers an update to every subscriber, returning the delivery count.
    fn notify(&mut self, update: &Update) -> usize;
}

/// State capability: event handling selected by the current state.
pub trait StatePattern: Scriptable {
    /// Every state the context can be in.
    fn states(&self) -> Vec<String>;

    /// Events the context accepts.
    fn events(&self) -> Vec<String>;

    /// Current state name.
    fn current(&self) -> String;

    /// Handles an event and returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown events.
    fn handle(&mut self, event: &str) -> Result<String, PatternError>;
}

/// Strategy capability: a context delegating to a selectable algorithm.
pub trait StrategyPattern: Scriptable {
    /// Strategies the context can select.
    fn strategies(&self) -> Vec<String>;

    /// Selects a strategy.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown strategies.
    fn select(&mut self, strategy: &str) -> Result<(), PatternError>;

    /// Runs the selected strategy over `input`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidArgument`] when `input` has the wrong shape.
    fn execute(&self, input: &Value) -> Result<Value, PatternError>;

    /// Representative input accepted by every strategy.
    fn sample_input(&self) -> Value;
}

/// Visitor capability: applies named visitors over an element structure.
pub trait VisitorPattern: Scriptable {
    /// Number of elements visited.
    fn element_count(&self) -> usize;

    /// Visitors that can be applied.
    fn visitors(&self) -> Vec<String>;

    /// Applies `visitor` to every element, one result per element.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown visitors.
    fn visit_all(&self, visitor: &str) -> Result<Vec<Value>, PatternError>;
}

// crates/pattern-catalog-patterns/src/behavioral/mediator.rs
// ============================================================================
// Module: Mediator Built-ins
// Description: Chat room and air traffic control hubs.
// Purpose: Route messages between colleagues that never reference each other.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Colleagues are names registered with a [`Hub`]. Every message goes through
//! the hub, which fans it out to every other colleague and keeps each
//! colleague's inbox. The control tower additionally grants landing only to
//! registered aircraft.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::Delivery;
use pattern_catalog_core::capabilities::MediatorPattern;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Hub
// ============================================================================

/// Kind of hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HubKind {
    /// Users chatting in one room.
    ChatRoom,
    /// Aircraft coordinated by a control tower.
    ControlTower,
}

/// Mediator relaying messages between registered colleagues.
#[derive(Debug, Clone)]
pub struct Hub {
    /// Hub kind.
    kind: HubKind,
    /// Colleagues in join order.
    colleagues: Vec<String>,
    /// Messages received by each colleague.
    inboxes: BTreeMap<String, Vec<Delivery>>,
}

impl Hub {
    /// Creates a hub with no colleagues.
    const fn new(kind: HubKind) -> Self {
        Self {
            kind,
            colleagues: Vec::new(),
            inboxes: BTreeMap::new(),
        }
    }

    /// Tower response to a landing request.
    fn request_landing(&self, aircraft: &str) -> String {
        if self.colleagues.iter().any(|colleague| colleague == aircraft) {
            format!("Landing granted for {aircraft}")
        } else {
            format!("Landing denied for {aircraft}")
        }
    }
}

/// JSON view of a delivery.
fn delivery_value(delivery: &Delivery) -> Value {
    json!({
        "recipient": delivery.recipient,
        "sender": delivery.sender,
        "message": delivery.message,
    })
}

impl Scriptable for Hub {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "join" => {
                self.join(args::string(operation, args, 0)?)?;
                Ok(json!(self.colleagues()))
            }
            "send" => {
                let sender = args::string(operation, args, 0)?;
                let message = args::string(operation, args, 1)?;
                let deliveries = self.send(sender, message)?;
                Ok(Value::Array(deliveries.iter().map(delivery_value).collect()))
            }
            "inbox" => {
                let colleague = args::string(operation, args, 0)?;
                let inbox = self.inboxes.get(colleague).ok_or_else(|| {
                    PatternError::invalid_argument(operation, format!("{colleague} has not joined"))
                })?;
                Ok(Value::Array(inbox.iter().map(delivery_value).collect()))
            }
            "colleagues" => Ok(json!(self.colleagues())),
            "request_landing" if self.kind == HubKind::ControlTower => {
                Ok(json!(self.request_landing(args::string(operation, args, 0)?)))
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl MediatorPattern for Hub {
    fn join(&mut self, colleague: &str) -> Result<(), PatternError> {
        if self.inboxes.contains_key(colleague) {
            return Err(PatternError::rejected(format!("{colleague} already joined")));
        }
        self.colleagues.push(colleague.to_string());
        self.inboxes.insert(colleague.to_string(), Vec::new());
        Ok(())
    }

    fn colleagues(&self) -> Vec<String> {
        self.colleagues.clone()
    }

    fn send(&mut self, sender: &str, message: &str) -> Result<Vec<Delivery>, PatternError> {
        if !self.inboxes.contains_key(sender) {
            return Err(PatternError::rejected(format!("{sender} is not registered with the mediator")));
        }
        let deliveries: Vec<Delivery> = self
            .colleagues
            .iter()
            .filter(|colleague| colleague.as_str() != sender)
            .map(|recipient| Delivery {
                recipient: recipient.clone(),
                sender: sender.to_string(),
                message: message.to_string(),
            })
            .collect();
        for delivery in &deliveries {
            if let Some(inbox) = self.inboxes.get_mut(&delivery.recipient) {
                inbox.push(delivery.clone());
            }
        }
        Ok(deliveries)
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Chat room relaying each message to every other user.
#[must_use]
pub fn chat_room() -> Factory {
    Factory::new(|| Ok(PatternInstance::mediator(Hub::new(HubKind::ChatRoom))))
}

/// Control tower relaying radio traffic and granting landings.
#[must_use]
pub fn air_traffic_control() -> Factory {
    Factory::new(|| Ok(PatternInstance::mediator(Hub::new(HubKind::ControlTower))))
}

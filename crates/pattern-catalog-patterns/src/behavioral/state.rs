// crates/pattern-catalog-patterns/src/behavioral/state.rs
// ============================================================================
// Module: State Built-ins
// Description: Traffic light and fan speed state machines.
// Purpose: Select event handling by the current state.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Each machine's states form a closed enum; the transition function is a
//! `match` over (state, event). Events a state ignores (decreasing an idle
//! fan) leave the state unchanged; events no state knows are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::StatePattern;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

use crate::owned;

// ============================================================================
// SECTION: Machine
// ============================================================================

/// Closed set of states with a transition function.
pub trait MachineState: Copy + Send + 'static {
    /// Every state, in declaration order.
    const ALL: &'static [Self];
    /// Events the machine accepts.
    const EVENTS: &'static [&'static str];

    /// State name.
    fn name(self) -> &'static str;

    /// Next state for a known event.
    fn on(self, event: &str) -> Self;
}

/// Context delegating events to its current state.
#[derive(Debug, Clone, Copy)]
pub struct Machine<S> {
    /// Current state.
    current: S,
}

impl<S: MachineState> Scriptable for Machine<S> {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "current" => Ok(json!(self.current())),
            "states" => Ok(json!(self.states())),
            "handle" => Ok(json!(self.handle(args::string(operation, args, 0)?)?)),
            event if S::EVENTS.contains(&event) => Ok(json!(self.handle(event)?)),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl<S: MachineState> StatePattern for Machine<S> {
    fn states(&self) -> Vec<String> {
        S::ALL.iter().map(|state| state.name().to_string()).collect()
    }

    fn events(&self) -> Vec<String> {
        owned(S::EVENTS)
    }

    fn current(&self) -> String {
        self.current.name().to_string()
    }

    fn handle(&mut self, event: &str) -> Result<String, PatternError> {
        if !S::EVENTS.contains(&event) {
            return Err(PatternError::rejected(format!("unknown event: {event}")));
        }
        self.current = self.current.on(event);
        Ok(self.current())
    }
}

// ============================================================================
// SECTION: Traffic Light
// ============================================================================

/// Traffic light colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Stop.
    Red,
    /// Go.
    Green,
    /// Prepare to stop.
    Yellow,
}

impl MachineState for Signal {
    const ALL: &'static [Self] = &[Self::Red, Self::Green, Self::Yellow];
    const EVENTS: &'static [&'static str] = &["change"];

    fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
        }
    }

    fn on(self, _event: &str) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Yellow,
            Self::Yellow => Self::Red,
        }
    }
}

// ============================================================================
// SECTION: Fan
// ============================================================================

/// Fan speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    /// Not spinning.
    Off,
    /// Lowest speed.
    Low,
    /// Middle speed.
    Medium,
    /// Highest speed.
    High,
}

impl MachineState for Speed {
    const ALL: &'static [Self] = &[Self::Off, Self::Low, Self::Medium, Self::High];
    const EVENTS: &'static [&'static str] = &["increase", "decrease"];

    fn name(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    fn on(self, event: &str) -> Self {
        match (self, event) {
            (Self::Off, "increase") | (Self::Medium, "decrease") => Self::Low,
            (Self::Low, "increase") | (Self::High, "decrease") => Self::Medium,
            (Self::Medium | Self::High, "increase") => Self::High,
            (Self::Off | Self::Low, _) => Self::Off,
            (Self::Medium, _) => Self::Medium,
            (Self::High, _) => Self::High,
        }
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Traffic light starting at red; `change` cycles red, green, yellow.
#[must_use]
pub fn traffic_light() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::state(Machine {
            current: Signal::Red,
        }))
    })
}

/// Fan starting off; `increase` and `decrease` saturate at high and off.
#[must_use]
pub fn fan() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::state(Machine {
            current: Speed::Off,
        }))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

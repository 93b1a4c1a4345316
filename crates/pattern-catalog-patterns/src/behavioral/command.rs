// crates/pattern-catalog-patterns/src/behavioral/command.rs
// ============================================================================
// Module: Command Built-ins
// Description: Light switch and drawing canvas invokers with undo.
// Purpose: Execute named requests against a receiver and revert them.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! An [`Invoker`] records each executed command together with a snapshot of
//! the receiver taken before execution. Undo restores that snapshot, so
//! every command is reversible without a hand-written inverse.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::CommandPattern;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

use crate::owned;

// ============================================================================
// SECTION: Receiver
// ============================================================================

/// Object commands act upon.
pub trait Receiver: Clone + Send + 'static {
    /// Commands the receiver understands.
    const COMMANDS: &'static [&'static str];

    /// Applies a command known to be in [`Self::COMMANDS`].
    fn apply(&mut self, command: &str) -> Value;

    /// Observable state.
    fn state(&self) -> Value;
}

// ============================================================================
// SECTION: Invoker
// ============================================================================

/// Invoker holding a receiver and an undo history.
#[derive(Debug, Clone)]
pub struct Invoker<R> {
    /// Receiver commands act on.
    receiver: R,
    /// Executed commands with the receiver as it was before each one.
    history: Vec<(String, R)>,
}

impl<R: Receiver> Invoker<R> {
    /// Creates an invoker with an empty history.
    const fn new(receiver: R) -> Self {
        Self {
            receiver,
            history: Vec::new(),
        }
    }
}

impl<R: Receiver> Scriptable for Invoker<R> {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "execute" => self.execute(args::string(operation, args, 0)?),
            "undo" => Ok(json!(self.undo()?)),
            "history" => Ok(json!(self.history())),
            "state" => Ok(self.receiver_state()),
            "commands" => Ok(json!(self.commands())),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl<R: Receiver> CommandPattern for Invoker<R> {
    fn commands(&self) -> Vec<String> {
        owned(R::COMMANDS)
    }

    fn receiver_state(&self) -> Value {
        self.receiver.state()
    }

    fn execute(&mut self, command: &str) -> Result<Value, PatternError> {
        if !R::COMMANDS.contains(&command) {
            return Err(PatternError::rejected(format!("unknown command: {command}")));
        }
        let before = self.receiver.clone();
        let output = self.receiver.apply(command);
        self.history.push((command.to_string(), before));
        Ok(output)
    }

    fn undo(&mut self) -> Result<Option<String>, PatternError> {
        Ok(self.history.pop().map(|(command, before)| {
            self.receiver = before;
            command
        }))
    }

    fn history(&self) -> Vec<String> {
        self.history.iter().map(|(command, _)| command.clone()).collect()
    }
}

// ============================================================================
// SECTION: Light
// ============================================================================

/// Light toggled by on and off commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Light {
    /// True while the light is on.
    on: bool,
}

impl Receiver for Light {
    const COMMANDS: &'static [&'static str] = &["on", "off"];

    fn apply(&mut self, command: &str) -> Value {
        self.on = command == "on";
        json!(if self.on { "Light is ON" } else { "Light is OFF" })
    }

    fn state(&self) -> Value {
        json!({ "on": self.on })
    }
}

// ============================================================================
// SECTION: Drawing
// ============================================================================

/// Canvas collecting drawn shapes.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    /// Shapes drawn so far, oldest first.
    shapes: Vec<String>,
}

impl Receiver for Canvas {
    const COMMANDS: &'static [&'static str] = &["draw-circle", "draw-rectangle"];

    fn apply(&mut self, command: &str) -> Value {
        let offset = self.shapes.len() * 10;
        let shape = command.trim_start_matches("draw-");
        let drawn = format!("{shape} at ({offset}, {offset})");
        self.shapes.push(drawn.clone());
        json!(format!("Drawing {drawn}"))
    }

    fn state(&self) -> Value {
        json!({ "shapes": self.shapes })
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Remote control switching a light.
#[must_use]
pub fn light_switch() -> Factory {
    Factory::new(|| Ok(PatternInstance::command(Invoker::new(Light::default()))))
}

/// Drawing application with undoable shape commands.
#[must_use]
pub fn drawing() -> Factory {
    Factory::new(|| Ok(PatternInstance::command(Invoker::new(Canvas::default()))))
}

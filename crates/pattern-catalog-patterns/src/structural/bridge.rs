// crates/pattern-catalog-patterns/src/structural/bridge.rs
// ============================================================================
// Module: Bridge Built-ins
// Description: Remote controls over devices and shapes over renderers.
// Purpose: Vary abstractions and implementations independently.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! A [`Bridge`] holds a table of abstractions written only against the
//! implementation type `I`, plus the named implementations. Any abstraction
//! runs over any implementation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::BridgePattern;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Bridge
// ============================================================================

/// Abstraction operating on an implementation.
type Abstraction<I> = (&'static str, fn(&mut I) -> Value);

/// Abstractions bridged to named implementations.
pub struct Bridge<I: 'static> {
    /// Abstraction table.
    abstractions: &'static [Abstraction<I>],
    /// Implementations by name.
    implementations: Vec<(&'static str, I)>,
}

impl<I: Send + 'static> Scriptable for Bridge<I> {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "abstractions" => Ok(json!(self.abstractions())),
            "implementations" => Ok(json!(self.implementations())),
            "operate" => {
                let abstraction = args::string(operation, args, 0)?;
                let implementation = args::string(operation, args, 1)?;
                self.operate(abstraction, implementation)
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl<I: Send + 'static> BridgePattern for Bridge<I> {
    fn abstractions(&self) -> Vec<String> {
        self.abstractions.iter().map(|(name, _)| (*name).to_string()).collect()
    }

    fn implementations(&self) -> Vec<String> {
        self.implementations.iter().map(|(name, _)| (*name).to_string()).collect()
    }

    fn operate(&mut self, abstraction: &str, implementation: &str) -> Result<Value, PatternError> {
        let (_, run) = self
            .abstractions
            .iter()
            .find(|(name, _)| *name == abstraction)
            .ok_or_else(|| PatternError::rejected(format!("unknown abstraction: {abstraction}")))?;
        let (_, target) = self
            .implementations
            .iter_mut()
            .find(|(name, _)| *name == implementation)
            .ok_or_else(|| PatternError::rejected(format!("unknown implementation: {implementation}")))?;
        Ok(run(target))
    }
}

// ============================================================================
// SECTION: Remote Controls
// ============================================================================

/// Device a remote can drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Display name.
    label: &'static str,
    /// Power state.
    on: bool,
    /// Volume from 0 to 100.
    volume: u8,
}

impl Device {
    /// Creates a powered-off device at volume 10.
    const fn new(label: &'static str) -> Self {
        Self {
            label,
            on: false,
            volume: 10,
        }
    }

    /// Flips power and reports the new state.
    fn toggle_power(&mut self) -> String {
        self.on = !self.on;
        format!("{} is {}", self.label, if self.on { "ON" } else { "OFF" })
    }

    /// Sets the volume and reports it.
    fn set_volume(&mut self, volume: u8) -> String {
        self.volume = volume.min(100);
        format!("{} volume set to {}", self.label, self.volume)
    }
}

/// Basic remote: power only.
fn basic_remote(device: &mut Device) -> Value {
    json!([device.toggle_power()])
}

/// Advanced remote: power plus mute.
fn advanced_remote(device: &mut Device) -> Value {
    json!([device.toggle_power(), device.set_volume(0)])
}

/// Remote control abstractions.
const REMOTES: &[Abstraction<Device>] = &[("remote", basic_remote), ("advanced-remote", advanced_remote)];

// ============================================================================
// SECTION: Shape Drawing
// ============================================================================

/// Drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// Vector output.
    Svg,
    /// Raster canvas output.
    Canvas,
}

impl Renderer {
    /// Backend label.
    const fn label(self) -> &'static str {
        match self {
            Self::Svg => "SVG",
            Self::Canvas => "Canvas",
        }
    }

    /// Draws a circle.
    fn circle(self, x: u32, y: u32, radius: u32) -> String {
        format!("Drawing {} circle at ({x},{y}) with radius {radius}", self.label())
    }

    /// Draws a square.
    fn square(self, x: u32, y: u32, side: u32) -> String {
        format!("Drawing {} square at ({x},{y}) with side {side}", self.label())
    }
}

/// Circle at (10,10) with radius 5.
fn circle_shape(renderer: &mut Renderer) -> Value {
    json!(renderer.circle(10, 10, 5))
}

/// Square at (0,0) with side 4.
fn square_shape(renderer: &mut Renderer) -> Value {
    json!(renderer.square(0, 0, 4))
}

/// Shape abstractions.
const SHAPES: &[Abstraction<Renderer>] = &[("circle", circle_shape), ("square", square_shape)];

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Remotes over a TV and a radio.
#[must_use]
pub fn remote_control() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::bridge(Bridge {
            abstractions: REMOTES,
            implementations: vec![("tv", Device::new("TV")), ("radio", Device::new("Radio"))],
        }))
    })
}

/// Shapes over SVG and canvas renderers.
#[must_use]
pub fn shape_drawing() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::bridge(Bridge {
            abstractions: SHAPES,
            implementations: vec![("svg", Renderer::Svg), ("canvas", Renderer::Canvas)],
        }))
    })
}

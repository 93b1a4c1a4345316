// crates/pattern-catalog-core/src/contracts/behavioral.rs
// ============================================================================
// Module: Behavioral Contracts
// Description: Checks for Observer, Command, State, Strategy, Visitor,
//              Mediator, and Iterator entries.
// Purpose: Encode behavioral invariants as independent, ordered checks.
// Dependencies: crate::{capabilities, contract, error, instance}, serde_json
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use super::capability;
use super::names;
use crate::capabilities::CommandPattern;
use crate::capabilities::IteratorPattern;
use crate::capabilities::MediatorPattern;
use crate::capabilities::ObservationLog;
use crate::capabilities::ObserverPattern;
use crate::capabilities::StatePattern;
use crate::capabilities::StrategyPattern;
use crate::capabilities::Update;
use crate::capabilities::VisitorPattern;
use crate::category::PatternCategory;
use crate::contract::CheckFailure;
use crate::contract::Contract;
use crate::contract::require;
use crate::error::PatternError;
use crate::instance::PatternInstance;

// ============================================================================
// SECTION: Accessors
// ============================================================================

/// Observer capability of `instance`.
fn as_observer(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn ObserverPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Observer, PatternInstance::as_observer_mut)
}

/// Command capability of `instance`.
fn as_command(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn CommandPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Command, PatternInstance::as_command_mut)
}

/// State capability of `instance`.
fn as_state(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn StatePattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::State, PatternInstance::as_state_mut)
}

/// Strategy capability of `instance`.
fn as_strategy(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn StrategyPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Strategy, PatternInstance::as_strategy_mut)
}

/// Visitor capability of `instance`.
fn as_visitor(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn VisitorPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Visitor, PatternInstance::as_visitor_mut)
}

/// Mediator capability of `instance`.
fn as_mediator(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn MediatorPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Mediator, PatternInstance::as_mediator_mut)
}

/// Iterator capability of `instance`.
fn as_iterator(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn IteratorPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Iterator, PatternInstance::as_iterator_mut)
}

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Observer contract.
pub(super) fn observer() -> Contract {
    Contract::new(PatternCategory::Observer)
        .check("notify delivers once to every subscriber in subscription order", |context| {
            let subject = as_observer(context.instance()?)?;
            let log = ObservationLog::new();
            let labels = ["first", "second", "third"];
            for label in labels {
                subject.subscribe(Box::new(log.observer(label)));
            }
            let update = Update::new("contract", json!(1));
            let delivered = subject.notify(&update);
            require(delivered == labels.len(), || {
                format!("notify reported {delivered} deliveries, expected {}", labels.len())
            })?;
            let received: Vec<String> = log.entries().into_iter().map(|entry| entry.observer).collect();
            require(received == labels, || {
                format!("observers received in order {}", names(&received))
            })?;
            require(log.entries().iter().all(|entry| entry.update == update), || {
                "an observer received a different update".to_string()
            })
        })
        .check("unsubscribed observers receive nothing", |context| {
            let subject = as_observer(context.instance()?)?;
            let log = ObservationLog::new();
            let first = subject.subscribe(Box::new(log.observer("first")));
            subject.subscribe(Box::new(log.observer("second")));
            require(subject.unsubscribe(first), || "unsubscribe reported no subscription".to_string())?;
            require(!subject.unsubscribe(first), || {
                "a second unsubscribe reported a subscription".to_string()
            })?;
            subject.notify(&Update::new("contract", json!(2)));
            let received: Vec<String> = log.entries().into_iter().map(|entry| entry.observer).collect();
            require(received == ["second"], || {
                format!("expected only second to be notified, got {}", names(&received))
            })
        })
}

// ============================================================================
// SECTION: Command
// ============================================================================

/// Command name that no invoker supports.
const UNKNOWN_COMMAND: &str = "__unknown__";

/// Command contract.
pub(super) fn command() -> Contract {
    Contract::new(PatternCategory::Command)
        .check("undo restores the receiver state", |context| {
            let invoker = as_command(context.instance()?)?;
            let commands = invoker.commands();
            require(!commands.is_empty(), || "invoker advertises no commands".to_string())?;
            for command in &commands {
                let before = invoker.receiver_state();
                invoker.execute(command)?;
                let undone = invoker.undo()?;
                require(undone.as_deref() == Some(command.as_str()), || {
                    format!("undo after {command} reverted {}", undone.as_deref().unwrap_or("nothing"))
                })?;
                let after = invoker.receiver_state();
                require(after == before, || {
                    format!("undo after {command} left state {after}, expected {before}")
                })?;
            }
            Ok(())
        })
        .check("history records executed commands in order", |context| {
            let invoker = as_command(context.instance()?)?;
            let mut expected = invoker.history();
            for command in invoker.commands() {
                invoker.execute(&command)?;
                expected.push(command);
            }
            let history = invoker.history();
            require(history == expected, || {
                format!("history is {}, expected {}", names(&history), names(&expected))
            })
        })
        .check("unknown commands are rejected without side effects", |context| {
            let invoker = as_command(context.instance()?)?;
            let history = invoker.history();
            let state = invoker.receiver_state();
            require(invoker.execute(UNKNOWN_COMMAND).is_err(), || {
                "invoker accepted an unknown command".to_string()
            })?;
            require(invoker.history() == history && invoker.receiver_state() == state, || {
                "rejected command changed the invoker".to_string()
            })
        })
}

// ============================================================================
// SECTION: State
// ============================================================================

/// Rounds of the full event list fed to state contexts.
const STATE_ROUNDS: usize = 2;

/// State contract.
pub(super) fn state() -> Contract {
    Contract::new(PatternCategory::State)
        .check("the current state is always a declared state", |context| {
            let machine = as_state(context.instance()?)?;
            let states = machine.states();
            let initial = machine.current();
            require(states.contains(&initial), || {
                format!("initial state {initial} is not one of {}", names(&states))
            })?;
            for _ in 0..STATE_ROUNDS {
                for event in machine.events() {
                    let next = machine.handle(&event)?;
                    require(states.contains(&next), || {
                        format!("event {event} moved to undeclared state {next}")
                    })?;
                    let current = machine.current();
                    require(current == next, || {
                        format!("event {event} returned {next} but the context is in {current}")
                    })?;
                }
            }
            Ok(())
        })
        .check("transitions are deterministic", |context| {
            let mut twin = context.fresh()?;
            let twin = as_state(&mut twin)?;
            let machine = as_state(context.instance()?)?;
            for _ in 0..STATE_ROUNDS {
                for event in machine.events() {
                    let lhs = machine.handle(&event)?;
                    let rhs = twin.handle(&event)?;
                    require(lhs == rhs, || {
                        format!("event {event} led to {lhs} and {rhs} from identical histories")
                    })?;
                }
            }
            Ok(())
        })
        .check("unknown events are rejected", |context| {
            let machine = as_state(context.instance()?)?;
            let before = machine.current();
            require(machine.handle("__unknown__").is_err(), || {
                "context accepted an unknown event".to_string()
            })?;
            require(machine.current() == before, || "rejected event changed state".to_string())
        })
}

// ============================================================================
// SECTION: Strategy
// ============================================================================

/// Strategy contract.
pub(super) fn strategy() -> Contract {
    Contract::new(PatternCategory::Strategy)
        .check("every strategy runs on the sample input", |context| {
            let strategist = as_strategy(context.instance()?)?;
            let strategies = strategist.strategies();
            require(!strategies.is_empty(), || "context advertises no strategies".to_string())?;
            let input = strategist.sample_input();
            for strategy in &strategies {
                strategist.select(strategy)?;
                strategist.execute(&input)?;
            }
            Ok(())
        })
        .check("unknown strategies are rejected", |context| {
            let strategist = as_strategy(context.instance()?)?;
            require(strategist.select("__unknown__").is_err(), || {
                "context selected an unknown strategy".to_string()
            })
        })
        .check("strategies are deterministic", |context| {
            let strategist = as_strategy(context.instance()?)?;
            let input = strategist.sample_input();
            for strategy in strategist.strategies() {
                strategist.select(&strategy)?;
                let first = strategist.execute(&input)?;
                let second = strategist.execute(&input)?;
                require(first == second, || {
                    format!("strategy {strategy} returned {first} then {second}")
                })?;
            }
            Ok(())
        })
}

// ============================================================================
// SECTION: Visitor
// ============================================================================

/// Visitor contract.
pub(super) fn visitor() -> Contract {
    Contract::new(PatternCategory::Visitor)
        .check("each visitor yields one result per element", |context| {
            let structure = as_visitor(context.instance()?)?;
            let visitors = structure.visitors();
            require(!visitors.is_empty(), || "structure advertises no visitors".to_string())?;
            let expected = structure.element_count();
            for visitor in &visitors {
                let results = structure.visit_all(visitor)?;
                require(results.len() == expected, || {
                    format!("visitor {visitor} produced {} results for {expected} elements", results.len())
                })?;
            }
            Ok(())
        })
        .check("unknown visitors are rejected", |context| {
            let structure = as_visitor(context.instance()?)?;
            require(structure.visit_all("__unknown__").is_err(), || {
                "structure accepted an unknown visitor".to_string()
            })
        })
}

// ============================================================================
// SECTION: Mediator
// ============================================================================

/// Colleagues joined by the mediator checks.
const COLLEAGUES: [&str; 3] = ["contract-alpha", "contract-beta", "contract-gamma"];

/// Mediator contract.
pub(super) fn mediator() -> Contract {
    Contract::new(PatternCategory::Mediator)
        .check("messages reach every other colleague exactly once", |context| {
            let hub = as_mediator(context.instance()?)?;
            for colleague in COLLEAGUES {
                hub.join(colleague)?;
            }
            let sender = COLLEAGUES[0];
            let deliveries = hub.send(sender, "hello")?;
            let mut expected: Vec<String> =
                hub.colleagues().into_iter().filter(|colleague| colleague != sender).collect();
            expected.sort();
            let mut recipients: Vec<String> =
                deliveries.iter().map(|delivery| delivery.recipient.clone()).collect();
            recipients.sort();
            require(recipients == expected, || {
                format!("message reached {}, expected {}", names(&recipients), names(&expected))
            })?;
            require(deliveries.iter().all(|delivery| delivery.sender == sender), || {
                "a delivery names the wrong sender".to_string()
            })
        })
        .check("messages from non-colleagues are rejected", |context| {
            let hub = as_mediator(context.instance()?)?;
            require(hub.send("__stranger__", "hello").is_err(), || {
                "mediator relayed a message from a non-colleague".to_string()
            })
        })
}

// ============================================================================
// SECTION: Iterator
// ============================================================================

/// Iterator contract.
pub(super) fn iterator() -> Contract {
    Contract::new(PatternCategory::Iterator)
        .check("has_next holds for exactly the declared number of elements", |context| {
            let cursor = as_iterator(context.instance()?)?;
            let total = cursor.total();
            for index in 0..total {
                require(cursor.has_next(), || {
                    format!("has_next was false after {index} of {total} elements")
                })?;
                cursor.next_item()?;
            }
            require(!cursor.has_next(), || format!("has_next still true after {total} elements"))
        })
        .check("next after exhaustion fails with an exhausted-iterator error", |context| {
            let cursor = as_iterator(context.instance()?)?;
            for _ in 0..cursor.total() {
                cursor.next_item()?;
            }
            for attempt in 1..=2 {
                let outcome = cursor.next_item();
                require(matches!(outcome, Err(PatternError::ExhaustedIterator)), || {
                    format!("call {attempt} past the end did not report exhaustion")
                })?;
            }
            Ok(())
        })
}

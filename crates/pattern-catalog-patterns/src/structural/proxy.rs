// crates/pattern-catalog-patterns/src/structural/proxy.rs
// ============================================================================
// Module: Proxy Built-ins
// Description: Virtual image proxy and protected bank account proxy.
// Purpose: Control access to a real subject created on first use.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! [`LazyProxy`] owns an optional real subject and a creation counter. The
//! subject is built the first time a request needs it and reused afterwards.
//! Protection rules live in the subject-specific operations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::ProxyPattern;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Subjects
// ============================================================================

/// Real subject behind a proxy.
pub trait Subject: Send + 'static {
    /// Builds the expensive subject.
    fn create() -> Self;

    /// Default request served by the subject.
    fn request(&mut self) -> Value;

    /// Subject-specific operation.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for unknown or refused operations.
    fn call(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError>;
}

/// Image loaded from disk.
#[derive(Debug, Clone)]
pub struct Image {
    /// File name.
    filename: &'static str,
    /// Number of times the image was displayed.
    displays: u64,
}

impl Subject for Image {
    fn create() -> Self {
        Self {
            filename: "photo.jpg",
            displays: 0,
        }
    }

    fn request(&mut self) -> Value {
        self.displays += 1;
        json!(format!("Displaying {}", self.filename))
    }

    fn call(&mut self, operation: &str, _args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "display" => Ok(self.request()),
            "displays" => Ok(json!(self.displays)),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

/// Largest single withdrawal the proxy lets through.
const WITHDRAWAL_LIMIT: u64 = 1000;

/// Bank account guarded by a withdrawal limit.
#[derive(Debug, Clone)]
pub struct Account {
    /// Current balance.
    balance: u64,
}

impl Subject for Account {
    fn create() -> Self {
        Self {
            balance: 2000,
        }
    }

    fn request(&mut self) -> Value {
        json!(self.balance)
    }

    fn call(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "balance" => Ok(self.request()),
            "withdraw" => {
                let amount = args::unsigned(operation, args, 0)?;
                if amount > WITHDRAWAL_LIMIT {
                    return Err(PatternError::rejected(format!(
                        "withdrawal of {amount} exceeds the limit of {WITHDRAWAL_LIMIT}"
                    )));
                }
                self.balance = self.balance.checked_sub(amount).ok_or_else(|| {
                    PatternError::rejected(format!("insufficient funds for {amount}"))
                })?;
                Ok(json!(self.balance))
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

// ============================================================================
// SECTION: Proxy
// ============================================================================

/// Proxy creating its subject on first use.
#[derive(Debug, Clone)]
pub struct LazyProxy<S> {
    /// Real subject, once created.
    subject: Option<S>,
    /// Number of subject constructions.
    creations: u32,
}

impl<S: Subject> LazyProxy<S> {
    /// Creates a proxy with no subject.
    const fn new() -> Self {
        Self {
            subject: None,
            creations: 0,
        }
    }

    /// Real subject, created when missing.
    fn subject(&mut self) -> &mut S {
        if self.subject.is_none() {
            self.creations += 1;
        }
        self.subject.get_or_insert_with(S::create)
    }
}

impl<S: Subject> Scriptable for LazyProxy<S> {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "request" => self.request(),
            "created" => Ok(json!(self.subject_created())),
            "creations" => Ok(json!(self.creations)),
            other => self.subject().call(other, args),
        }
    }
}

impl<S: Subject> ProxyPattern for LazyProxy<S> {
    fn subject_created(&self) -> bool {
        self.subject.is_some()
    }

    fn creations(&self) -> u32 {
        self.creations
    }

    fn request(&mut self) -> Result<Value, PatternError> {
        Ok(self.subject().request())
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Virtual proxy loading an image on first display.
#[must_use]
pub fn image_loading() -> Factory {
    Factory::new(|| Ok(PatternInstance::proxy(LazyProxy::<Image>::new())))
}

/// Protection proxy over a bank account.
#[must_use]
pub fn bank_account() -> Factory {
    Factory::new(|| Ok(PatternInstance::proxy(LazyProxy::<Account>::new())))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use pattern_catalog_core::Scriptable;
    use serde_json::json;

    use super::Account;
    use super::LazyProxy;

    #[test]
    fn withdrawals_over_the_limit_are_refused() {
        let mut proxy = LazyProxy::<Account>::new();
        assert!(proxy.invoke("withdraw", &[json!(1500)]).is_err(), "limit should apply");
        assert_eq!(proxy.invoke("withdraw", &[json!(500)]).ok(), Some(json!(1500)));
        assert_eq!(proxy.invoke("creations", &[]).ok(), Some(json!(1)));
    }
}

//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions over a machine's context. They gate
//! whether a transition is taken and carry a name so every evaluation can
//! be traced.

use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Named pure predicate that determines if a transition can execute.
///
/// The predicate reads the context only; the single side effect of
/// [`Guard::check`] is a `trace`-level log line with the outcome.
///
/// # Example
///
/// ```rust
/// use chimera::core::Guard;
///
/// struct Battery {
///     charge: u8,
/// }
///
/// let charged = Guard::new("charged", |b: &Battery| b.charge > 50);
///
/// assert!(charged.check(&Battery { charge: 80 }));
/// assert!(!charged.check(&Battery { charge: 10 }));
/// assert_eq!(charged.name(), "charged");
/// ```
pub struct Guard<C> {
    name: &'static str,
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(name: &'static str, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            name,
            predicate: Arc::new(predicate),
        }
    }

    /// The name used when logging evaluations.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate the guard against a context.
    pub fn check(&self, context: &C) -> bool {
        let passed = (self.predicate)(context);
        trace!(guard = self.name, passed, "guard evaluated");
        passed
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}

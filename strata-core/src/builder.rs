//! Builder utilities for configuring Strata runs.
//!
//! Exposes the run options and the validation applied before constructing
//! [`Strata`] instances.

use crate::{Result, error::StrataError, source::OrderCheck, strata::Strata};

/// Configures and constructs [`Strata`] instances.
///
/// # Examples
/// ```
/// use strata_core::{OrderCheck, StrataBuilder};
///
/// let strata = StrataBuilder::new()
///     .with_membership(true)
///     .with_order_check(OrderCheck::Full)
///     .build()
///     .expect("builder configuration is valid");
/// assert!(strata.membership());
/// assert_eq!(strata.order_check(), OrderCheck::Full);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StrataBuilder {
    membership: bool,
    order_check: OrderCheck,
}

impl StrataBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use strata_core::{OrderCheck, StrataBuilder};
    ///
    /// let builder = StrataBuilder::new();
    /// assert!(!builder.membership());
    /// assert_eq!(builder.order_check(), OrderCheck::Prefix(100));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables per-step membership snapshots.
    ///
    /// Enabling membership also enables the early exit once every node
    /// shares one component.
    #[must_use]
    pub const fn with_membership(mut self, enabled: bool) -> Self {
        self.membership = enabled;
        self
    }

    /// Returns whether membership snapshots are enabled.
    #[must_use]
    pub const fn membership(&self) -> bool {
        self.membership
    }

    /// Sets how much of the input is checked for descending weight order.
    ///
    /// # Examples
    /// ```
    /// use strata_core::{OrderCheck, StrataBuilder};
    ///
    /// let builder = StrataBuilder::new().with_order_check(OrderCheck::Trust);
    /// assert_eq!(builder.order_check(), OrderCheck::Trust);
    /// ```
    #[must_use]
    pub const fn with_order_check(mut self, check: OrderCheck) -> Self {
        self.order_check = check;
        self
    }

    /// Returns the configured ordering check.
    #[must_use]
    pub const fn order_check(&self) -> OrderCheck {
        self.order_check
    }

    /// Validates the configuration and constructs a [`Strata`] instance.
    ///
    /// # Errors
    /// Returns [`StrataError::InvalidOrderCheckWindow`] when a prefix check
    /// would inspect no edges.
    ///
    /// # Examples
    /// ```
    /// use strata_core::{OrderCheck, StrataBuilder, StrataError};
    ///
    /// let err = StrataBuilder::new()
    ///     .with_order_check(OrderCheck::Prefix(0))
    ///     .build()
    ///     .expect_err("an empty prefix window is rejected");
    /// assert!(matches!(err, StrataError::InvalidOrderCheckWindow { got: 0 }));
    /// ```
    pub fn build(self) -> Result<Strata> {
        if let OrderCheck::Prefix(0) = self.order_check {
            return Err(StrataError::InvalidOrderCheckWindow { got: 0 });
        }
        Ok(Strata::new(self.membership, self.order_check))
    }
}

//! Construction and growth settings for [`BlockSequence`].
//!
//! Both types derive `serde` traits with field defaults, so a host application
//! can keep them in its own configuration files and only spell out the values
//! it wants to change.
//!
//! [`BlockSequence`]: crate::generic::block_sequence::BlockSequence

use serde::{Deserialize, Serialize};

use crate::error::{Result, SequenceError};

/// Capacity used by [`SequenceConfig::default`] and `BlockSequence::new`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Multiplier applied to the capacity on every automatic growth.
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.5;

/// How the capacity of a sequence grows once it is exhausted.
///
/// The next capacity is `max(current + min_increment, floor(current * factor))`,
/// so small sequences still make progress when the multiplier rounds down.
///
/// # Examples
///
/// ```rust
/// use saturn_sequence::config::GrowthPolicy;
///
/// let policy = GrowthPolicy::default();
/// assert_eq!(policy.next_capacity(10), 15);
/// assert_eq!(policy.next_capacity(1), 2);
/// assert_eq!(policy.next_capacity(0), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthPolicy {
    pub factor: f64,
    pub min_increment: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            factor: DEFAULT_GROWTH_FACTOR,
            min_increment: 1,
        }
    }
}

impl GrowthPolicy {
    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidGrowthPolicy`] if `factor` is not a
    /// finite number `>= 1.0` or `min_increment` is zero.
    pub fn new(factor: f64, min_increment: usize) -> Result<Self> {
        let policy = Self {
            factor,
            min_increment,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Checks that the policy always strictly increases the capacity.
    pub fn validate(&self) -> Result<()> {
        if !self.factor.is_finite() || self.factor < 1.0 {
            return Err(SequenceError::InvalidGrowthPolicy {
                reason: format!("factor must be a finite number >= 1.0, got {}", self.factor),
            });
        }
        if self.min_increment == 0 {
            return Err(SequenceError::InvalidGrowthPolicy {
                reason: "min_increment must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the capacity that should follow `current`.
    pub fn next_capacity(&self, current: usize) -> usize {
        let scaled = (current as f64 * self.factor) as usize;
        scaled.max(current.saturating_add(self.min_increment))
    }
}

/// Settings for building an empty [`BlockSequence`].
///
/// [`BlockSequence`]: crate::generic::block_sequence::BlockSequence
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub initial_capacity: usize,
    pub growth: GrowthPolicy,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth: GrowthPolicy::default(),
        }
    }
}

impl SequenceConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.growth.validate()
    }
}

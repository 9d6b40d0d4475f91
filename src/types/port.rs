//! Port types with validation.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` is the inclusive interval a scan walks for every target.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
}

/// An inclusive range of ports.
///
/// A range whose start lies above its end is empty rather than invalid:
/// iterating it yields nothing and a scan over it probes zero ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range.
    pub const fn new(start: Port, end: Port) -> Self {
        Self { start, end }
    }

    /// Build a range from raw bounds, rejecting port 0.
    pub fn from_bounds(start: u16, end: u16) -> Result<Self, PortError> {
        Ok(Self::new(Port::try_from(start)?, Port::try_from(end)?))
    }

    /// Create a range containing a single port.
    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        if self.start.0 > self.end.0 {
            0
        } else {
            (self.end.0 - self.start.0) as usize + 1
        }
    }

    /// Check if the range contains no ports.
    pub const fn is_empty(&self) -> bool {
        self.start.0 > self.end.0
    }

    /// Iterate over all ports in this range.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        // Both bounds are non-zero, so every yielded value is a valid port.
        (self.start.0..=self.end.0).map(Port)
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self::new(Port(1), Port(1024))
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(80).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_port_range_len() {
        let range = PortRange::from_bounds(1, 100).unwrap();
        assert_eq!(range.len(), 100);
        assert_eq!(range.iter().count(), 100);

        let full = PortRange::from_bounds(1, 65535).unwrap();
        assert_eq!(full.len(), 65535);
        assert_eq!(full.iter().last(), Port::new(65535));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = PortRange::from_bounds(100, 50).unwrap();
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert_eq!(range.iter().count(), 0);
    }

    #[test]
    fn test_single_port_range() {
        let range = PortRange::single(Port::new(7).unwrap());
        assert_eq!(range.len(), 1);
        assert_eq!(range.to_string(), "7");
    }

    #[test]
    fn test_zero_bound_rejected() {
        assert!(matches!(
            PortRange::from_bounds(0, 10),
            Err(PortError::OutOfRange(0))
        ));
    }

    #[test]
    fn test_default_range() {
        assert_eq!(PortRange::default().to_string(), "1-1024");
    }
}

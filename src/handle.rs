use std::fmt::{Display, Formatter};

/// Handle of an active link, as handed out by the host stack.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ConnectionHandle(pub(crate) u16);

impl ConnectionHandle {
    pub const fn new(raw: u16) -> ConnectionHandle {
        ConnectionHandle(raw)
    }

    /// The sentinel the host stack uses for "no connection".
    pub const fn none() -> ConnectionHandle {
        ConnectionHandle(0xFFFF)
    }

    /// Some stacks report `0` instead of the sentinel while disconnected, so
    /// both are refused.
    pub fn is_valid(self) -> bool {
        self.0 != 0 && self != ConnectionHandle::none()
    }
}

impl From<u16> for ConnectionHandle {
    fn from(raw: u16) -> Self {
        ConnectionHandle(raw)
    }
}

impl From<ConnectionHandle> for u16 {
    fn from(val: ConnectionHandle) -> Self {
        val.0
    }
}

impl Display for ConnectionHandle {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "conn#{}", self.0)
    }
}

/// Handle of a characteristic value in the local attribute table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct AttributeHandle(pub(crate) u16);

impl AttributeHandle {
    pub const fn new(raw: u16) -> AttributeHandle {
        AttributeHandle(raw)
    }
}

impl From<u16> for AttributeHandle {
    fn from(raw: u16) -> Self {
        AttributeHandle(raw)
    }
}

impl From<AttributeHandle> for u16 {
    fn from(val: AttributeHandle) -> Self {
        val.0
    }
}

impl Display for AttributeHandle {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "0x{:04x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn connection_handle_validity() {
        assert!(ConnectionHandle::new(1).is_valid());
        assert!(ConnectionHandle::new(0x0040).is_valid());
        assert!(!ConnectionHandle::new(0).is_valid());
        assert!(!ConnectionHandle::none().is_valid());
        assert!(!ConnectionHandle::from(0xFFFF).is_valid());
    }

    #[test]
    pub fn attribute_handle_display() {
        assert_eq!(AttributeHandle::new(0x2a).to_string(), "0x002a");
        assert_eq!(u16::from(AttributeHandle::from(7)), 7);
    }
}

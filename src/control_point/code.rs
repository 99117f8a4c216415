use std::fmt::{Display, Formatter};

use num_traits::{FromPrimitive, ToPrimitive};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum ControlPointOpcode {
    Accept = 0x00,
    Terminate = 0x01,
    LocalHold = 0x02,
    LocalRetrieve = 0x03,
    Originate = 0x04,
    Join = 0x05,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum ControlPointResultCode {
    Success = 0x00,
    OpcodeNotSupported = 0x01,
    OperationNotPossible = 0x02,
    InvalidCallIndex = 0x03,
    StateMismatch = 0x04,
    LackOfResources = 0x05,
    InvalidOutgoingUri = 0x06,
}

/// A single-octet code as read off the wire. Values a conformant peer would
/// never send are kept as `Unknown` so the frame can still be tracked and
/// shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code<T> {
    Known(T),
    Unknown(u8),
}

pub type RequestedOpcode = Code<ControlPointOpcode>;
pub type ResultCode = Code<ControlPointResultCode>;

impl<T: FromPrimitive> Code<T> {
    pub fn from_u8(raw: u8) -> Self {
        match T::from_u8(raw) {
            Some(known) => Code::Known(known),
            None => Code::Unknown(raw),
        }
    }
}

impl<T: ToPrimitive + Copy> Code<T> {
    pub fn raw(&self) -> u8 {
        match self {
            // every known variant is declared with a u8 discriminant
            Code::Known(known) => known.to_u8().unwrap_or_default(),
            Code::Unknown(raw) => *raw,
        }
    }
}

impl<T> Code<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Code::Known(known) => Some(known),
            Code::Unknown(_) => None,
        }
    }
}

impl<T: PartialEq> PartialEq<T> for Code<T> {
    fn eq(&self, other: &T) -> bool {
        matches!(self, Code::Known(known) if known == other)
    }
}

impl<T> From<T> for Code<T> {
    fn from(known: T) -> Self {
        Code::Known(known)
    }
}

impl<T: ToPrimitive + Copy> Display for Code<T> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn known_opcode() {
        let op = RequestedOpcode::from_u8(0x04);
        assert_eq!(op, Code::Known(ControlPointOpcode::Originate));
        assert!(op == ControlPointOpcode::Originate);
        assert_eq!(op.raw(), 0x04);
    }

    #[test]
    pub fn unknown_codes_keep_raw_value() {
        let op = RequestedOpcode::from_u8(0x7f);
        assert_eq!(op, Code::Unknown(0x7f));
        assert!(op != ControlPointOpcode::Originate);
        assert_eq!(op.raw(), 0x7f);
        assert!(op.known().is_none());

        let rc = ResultCode::from_u8(0x07);
        assert_eq!(rc, Code::Unknown(0x07));
        assert_eq!(rc.to_string(), "7");
    }

    #[test]
    pub fn result_codes() {
        assert_eq!(
            ResultCode::from_u8(0x06),
            Code::Known(ControlPointResultCode::InvalidOutgoingUri)
        );
        assert_eq!(ResultCode::from(ControlPointResultCode::StateMismatch).raw(), 0x04);
    }
}

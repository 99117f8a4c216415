//! Description of the Telephone Bearer Service as it is exposed to the host's
//! attribute table. Building the table itself is left to the host stack, which
//! plugs in through [`GattRegistry`].

use std::fmt::Debug;

use enumflags2::{bitflags, BitFlags};

use crate::handle::AttributeHandle;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uuid16(pub u16);

impl From<u16> for Uuid16 {
    fn from(u: u16) -> Self {
        Self(u)
    }
}

impl From<Uuid16> for u16 {
    fn from(u: Uuid16) -> Self {
        u.0
    }
}

impl Debug for Uuid16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

pub const TELEPHONE_BEARER_SERVICE: Uuid16 = Uuid16(0x184B);
pub const CALL_CONTROL_POINT: Uuid16 = Uuid16(0x2BBE);

#[bitflags]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CharacteristicProperty {
    Broadcast = 1 << 0,
    Read = 1 << 1,
    WriteWithoutResponse = 1 << 2,
    Write = 1 << 3,
    Notify = 1 << 4,
    Indicate = 1 << 5,
    AuthenticatedSignedWrites = 1 << 6,
    ExtendedProperties = 1 << 7,
}

pub type CharacteristicProperties = BitFlags<CharacteristicProperty>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicDefinition {
    pub uuid: Uuid16,
    pub properties: CharacteristicProperties,
}

/// A primary service and its characteristics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    pub uuid: Uuid16,
    pub characteristics: Vec<CharacteristicDefinition>,
}

impl ServiceDefinition {
    /// The service with its one Call Control Point characteristic, writable
    /// with and without response and notifiable.
    pub fn telephone_bearer() -> Self {
        ServiceDefinition {
            uuid: TELEPHONE_BEARER_SERVICE,
            characteristics: vec![CharacteristicDefinition {
                uuid: CALL_CONTROL_POINT,
                properties: CharacteristicProperty::Write
                    | CharacteristicProperty::WriteWithoutResponse
                    | CharacteristicProperty::Notify,
            }],
        }
    }
}

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("The attribute table rejected service {:?}: status {}.", uuid, status)]
    Rejected { uuid: Uuid16, status: i32 },
    #[error("No value handle was assigned to characteristic {:?}.", uuid)]
    MissingHandle { uuid: Uuid16 },
}

/// The host's attribute table. Registering a service returns the value handle
/// assigned to the Call Control Point characteristic.
pub trait GattRegistry {
    fn register(
        &self,
        service: &ServiceDefinition,
    ) -> Result<AttributeHandle, RegistrationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn telephone_bearer_definition() {
        let service = ServiceDefinition::telephone_bearer();
        assert_eq!(service.uuid, Uuid16(0x184B));
        assert_eq!(service.characteristics.len(), 1);

        let control_point = &service.characteristics[0];
        assert_eq!(control_point.uuid, Uuid16(0x2BBE));
        assert_eq!(control_point.properties.bits(), 0b0001_1100);
        assert!(!control_point.properties.contains(CharacteristicProperty::Read));
    }

    #[test]
    pub fn uuid16_debug() {
        assert_eq!(format!("{:?}", CALL_CONTROL_POINT), "2bbe");
    }
}

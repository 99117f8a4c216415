use std::fmt::{Display, Formatter};

use bytes::Buf;

use crate::control_point::code::{RequestedOpcode, ResultCode};
use crate::control_point::{Error, Result};
use crate::util::BufExt;

/// Size of a Call Control Point Notification:
///
/// ```text
/// +----------------------------+----------------------+-----------------------+
/// | Requested Opcode (1 octet) | Call Index (1 octet) | Result Code (1 octet) |
/// +----------------------------+----------------------+-----------------------+
/// ```
pub const NOTIFICATION_SIZE: usize = 3;

/// The outcome the peer reports for an opcode it was asked to carry out on a
/// given call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallControlPointNotification {
    pub requested_opcode: RequestedOpcode,
    pub call_index: u8,
    pub result_code: ResultCode,
}

impl CallControlPointNotification {
    /// Frames that are not exactly [`NOTIFICATION_SIZE`] octets long are
    /// rejected with [`Error::MalformedFrame`].
    pub fn parse<T: Buf>(mut buf: T) -> Result<Self> {
        let len = buf.remaining();
        if len != NOTIFICATION_SIZE {
            return Err(Error::MalformedFrame { len });
        }

        Ok(CallControlPointNotification {
            requested_opcode: buf.get_code(),
            call_index: buf.get_u8(),
            result_code: buf.get_code(),
        })
    }
}

pub fn decode(frame: &[u8]) -> Result<CallControlPointNotification> {
    CallControlPointNotification::parse(frame)
}

impl Display for CallControlPointNotification {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "CCPN = oc: {}, ci: {}, rc: {}",
            self.requested_opcode, self.call_index, self.result_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_point::code::{Code, ControlPointOpcode, ControlPointResultCode};

    #[test]
    pub fn decode_originate_success() {
        let ccpn = decode(&[0x04, 0x01, 0x00]).unwrap();
        assert_eq!(ccpn.requested_opcode, Code::Known(ControlPointOpcode::Originate));
        assert_eq!(ccpn.call_index, 1);
        assert_eq!(ccpn.result_code, Code::Known(ControlPointResultCode::Success));
        assert_eq!(ccpn.to_string(), "CCPN = oc: 4, ci: 1, rc: 0");
    }

    #[test]
    pub fn decode_rejects_other_lengths() {
        for frame in [&[][..], &[0x01][..], &[0x01, 0x02][..], &[0x04, 0x01, 0x00, 0x00][..]] {
            match decode(frame) {
                Err(Error::MalformedFrame { len }) => assert_eq!(len, frame.len()),
                other => panic!("expected a malformed frame, got {:?}", other),
            }
        }
    }

    #[test]
    pub fn decode_preserves_unknown_codes() {
        let ccpn = decode(&[0xAB, 0x09, 0xFE]).unwrap();
        assert_eq!(ccpn.requested_opcode, Code::Unknown(0xAB));
        assert_eq!(ccpn.call_index, 9);
        assert_eq!(ccpn.result_code, Code::Unknown(0xFE));
        assert_eq!(ccpn.to_string(), "CCPN = oc: 171, ci: 9, rc: 254");
    }
}

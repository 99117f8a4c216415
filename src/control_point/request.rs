use bytes::{BufMut, Bytes, BytesMut};

use crate::control_point::code::{Code, ControlPointOpcode};
use crate::util::BufMutExt;

pub trait ToBuf {
    fn to_buf<B: BufMut>(&self, buf: &mut B);
}

/// How the URI of an Originate request is laid out after the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriEncoding {
    /// UTF-8, as the Telephone Bearer Service requires.
    Utf8,
    /// Four little-endian octets per code point. Only peers that were built
    /// against the old fixed-width behavior expect this.
    LegacyUtf32,
}

impl Default for UriEncoding {
    fn default() -> Self {
        UriEncoding::Utf8
    }
}

impl UriEncoding {
    pub fn encoded_len(self, uri: &str) -> usize {
        match self {
            UriEncoding::Utf8 => uri.len(),
            UriEncoding::LegacyUtf32 => uri.chars().count() * 4,
        }
    }
}

/// A request written to the peer's Call Control Point.
///
/// Only the two requests a single-call client issues are modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Place an outgoing call to `uri`, e.g. `tel:608069355`. The URI is sent
    /// as-is; its scheme is not checked.
    Originate { uri: String, encoding: UriEncoding },
    Terminate { call_index: u8 },
}

impl Request {
    pub fn originate(uri: impl Into<String>) -> Self {
        Request::Originate {
            uri: uri.into(),
            encoding: UriEncoding::default(),
        }
    }

    pub fn terminate(call_index: u8) -> Self {
        Request::Terminate { call_index }
    }

    pub fn opcode(&self) -> ControlPointOpcode {
        match self {
            Request::Originate { .. } => ControlPointOpcode::Originate,
            Request::Terminate { .. } => ControlPointOpcode::Terminate,
        }
    }

    /// Number of octets [`ToBuf::to_buf`] writes for this request.
    pub fn encoded_len(&self) -> usize {
        match self {
            Request::Originate { uri, encoding } => 1 + encoding.encoded_len(uri),
            Request::Terminate { .. } => 2,
        }
    }
}

impl ToBuf for Request {
    fn to_buf<B: BufMut>(&self, buf: &mut B) {
        buf.put_code(Code::Known(self.opcode()));

        match self {
            // no length prefix, the URI runs to the end of the payload
            Request::Originate { uri, encoding } => match encoding {
                UriEncoding::Utf8 => buf.put_slice(uri.as_bytes()),
                UriEncoding::LegacyUtf32 => {
                    for c in uri.chars() {
                        buf.put_u32_le(c as u32);
                    }
                }
            },
            Request::Terminate { call_index } => buf.put_u8(*call_index),
        }
    }
}

impl From<Request> for Bytes {
    fn from(val: Request) -> Self {
        let mut buf = BytesMut::with_capacity(val.encoded_len());
        val.to_buf(&mut buf);
        buf.freeze()
    }
}

pub fn encode_originate(uri: &str) -> Bytes {
    Request::originate(uri).into()
}

pub fn encode_terminate(call_index: u8) -> Bytes {
    Request::terminate(call_index).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn originate_utf8() {
        let frame = encode_originate("tel:608069355");
        assert_eq!(frame[0], 0x04);
        assert_eq!(&frame[1..], b"tel:608069355");
        assert_eq!(frame.len(), 14);
    }

    #[test]
    pub fn originate_multibyte_uri() {
        let frame = encode_originate("sip:zoë@example.org");
        assert_eq!(&frame[1..], "sip:zoë@example.org".as_bytes());
        assert_eq!(frame.len(), Request::originate("sip:zoë@example.org").encoded_len());
    }

    #[test]
    pub fn originate_legacy_utf32() {
        let request = Request::Originate {
            uri: "tel:1".to_owned(),
            encoding: UriEncoding::LegacyUtf32,
        };
        assert_eq!(request.encoded_len(), 21);

        let frame: Bytes = request.into();
        assert_eq!(
            &frame[..],
            &[
                0x04, b't', 0, 0, 0, b'e', 0, 0, 0, b'l', 0, 0, 0, b':', 0, 0, 0, b'1', 0, 0, 0
            ][..]
        );
    }

    #[test]
    pub fn terminate() {
        assert_eq!(&encode_terminate(0x01)[..], &[0x01, 0x01][..]);
        assert_eq!(&encode_terminate(0xFF)[..], &[0x01, 0xFF][..]);
    }
}

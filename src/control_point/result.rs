use crate::control_point::code::RequestedOpcode;
use crate::gatt::RegistrationError;
use crate::transport::SendError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Call control point frame of {} bytes ignored; expected 3.", len)]
    MalformedFrame { len: usize },
    #[error("No active connection to send the request over.")]
    TransportUnavailable,
    #[error("Could not allocate a {} byte buffer for the request.", len)]
    EncodingFailed { len: usize },
    #[error("The transport refused the request: {}.", source)]
    SendFailed {
        #[source]
        source: SendError,
    },
    #[error("Tracked call was not originated here (opcode {}).", opcode)]
    NotOriginated { opcode: RequestedOpcode },
    #[error("Registering the telephone bearer service failed: {}.", source)]
    Registration {
        #[source]
        source: RegistrationError,
    },
}

impl Error {
    /// Numeric form of the error for compact displays: the transport's own
    /// status for refused sends, `1` for everything else.
    pub fn status(&self) -> i32 {
        match self {
            Error::SendFailed { source } => source.status,
            _ => 1,
        }
    }
}

impl From<SendError> for Error {
    fn from(err: SendError) -> Self {
        Error::SendFailed { source: err }
    }
}

impl From<RegistrationError> for Error {
    fn from(err: RegistrationError) -> Self {
        Error::Registration { source: err }
    }
}

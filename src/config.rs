use crate::control_point::UriEncoding;

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Layout of the URI in outgoing Originate requests.
    pub uri_encoding: UriEncoding,
}

impl Config {
    /// Configuration for peers that expect the old four-octet URI layout.
    pub fn legacy() -> Self {
        Config {
            uri_encoding: UriEncoding::LegacyUtf32,
        }
    }
}

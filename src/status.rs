use std::fmt::{Display, Formatter};

use crate::control_point::{Counters, Result};

/// Snapshot of the call control point for an on-screen summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub initialized: bool,
    pub counters: Counters,
    /// Outcome of the last request, `0` for success.
    pub result: i32,
}

impl Status {
    pub fn new(initialized: bool, counters: Counters) -> Self {
        Status {
            initialized,
            counters,
            result: 0,
        }
    }

    pub fn with_outcome(mut self, outcome: &Result<()>) -> Self {
        self.result = match outcome {
            Ok(()) => 0,
            Err(err) => err.status(),
        };
        self
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let c = &self.counters;
        writeln!(
            f,
            "Init/Req: {:02} / {:02}",
            self.initialized as u8, c.service_request_count
        )?;
        writeln!(f, "Res/Octs: {:02} / {:02}", self.result, c.last_octets_sent)?;
        writeln!(
            f,
            "Call I/S: {:02} / {:02}",
            c.calls_initiated, c.calls_successful
        )?;
        write!(
            f,
            "Term I/S: {:02} / {:02}",
            c.terminations_initiated, c.terminations_successful
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_point::Error;
    use crate::transport::SendError;

    #[test]
    pub fn status_lines() {
        let counters = Counters {
            service_request_count: 3,
            calls_initiated: 1,
            calls_successful: 1,
            last_octets_sent: 14,
            ..Counters::default()
        };
        let status = Status::new(true, counters);

        assert_eq!(
            status.to_string(),
            "Init/Req: 01 / 03\nRes/Octs: 00 / 14\nCall I/S: 01 / 01\nTerm I/S: 00 / 00"
        );
    }

    #[test]
    pub fn outcome_codes() {
        let status = Status::new(false, Counters::default());
        assert_eq!(status.with_outcome(&Ok(())).result, 0);
        assert_eq!(
            status
                .with_outcome(&Err(Error::from(SendError::new(6))))
                .result,
            6
        );
        assert_eq!(
            status.with_outcome(&Err(Error::TransportUnavailable)).result,
            1
        );
    }
}

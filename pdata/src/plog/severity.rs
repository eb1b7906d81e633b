use std::fmt;

/// Severity of a log record, as the OTLP `SeverityNumber` enum value.
///
/// Unknown numbers are kept as they are; they have no name and display as "".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeverityNumber(pub i32);

impl SeverityNumber {
    pub const UNSPECIFIED: SeverityNumber = SeverityNumber(0);
    pub const TRACE: SeverityNumber = SeverityNumber(1);
    pub const TRACE2: SeverityNumber = SeverityNumber(2);
    pub const TRACE3: SeverityNumber = SeverityNumber(3);
    pub const TRACE4: SeverityNumber = SeverityNumber(4);
    pub const DEBUG: SeverityNumber = SeverityNumber(5);
    pub const DEBUG2: SeverityNumber = SeverityNumber(6);
    pub const DEBUG3: SeverityNumber = SeverityNumber(7);
    pub const DEBUG4: SeverityNumber = SeverityNumber(8);
    pub const INFO: SeverityNumber = SeverityNumber(9);
    pub const INFO2: SeverityNumber = SeverityNumber(10);
    pub const INFO3: SeverityNumber = SeverityNumber(11);
    pub const INFO4: SeverityNumber = SeverityNumber(12);
    pub const WARN: SeverityNumber = SeverityNumber(13);
    pub const WARN2: SeverityNumber = SeverityNumber(14);
    pub const WARN3: SeverityNumber = SeverityNumber(15);
    pub const WARN4: SeverityNumber = SeverityNumber(16);
    pub const ERROR: SeverityNumber = SeverityNumber(17);
    pub const ERROR2: SeverityNumber = SeverityNumber(18);
    pub const ERROR3: SeverityNumber = SeverityNumber(19);
    pub const ERROR4: SeverityNumber = SeverityNumber(20);
    pub const FATAL: SeverityNumber = SeverityNumber(21);
    pub const FATAL2: SeverityNumber = SeverityNumber(22);
    pub const FATAL3: SeverityNumber = SeverityNumber(23);
    pub const FATAL4: SeverityNumber = SeverityNumber(24);

    pub fn as_str(self) -> &'static str {
        const NAMES: [&str; 25] = [
            "Unspecified", "Trace", "Trace2", "Trace3", "Trace4", "Debug", "Debug2", "Debug3",
            "Debug4", "Info", "Info2", "Info3", "Info4", "Warn", "Warn2", "Warn3", "Warn4", "Error",
            "Error2", "Error3", "Error4", "Fatal", "Fatal2", "Fatal3", "Fatal4",
        ];
        usize::try_from(self.0)
            .ok()
            .and_then(|i| NAMES.get(i))
            .copied()
            .unwrap_or("")
    }
}

impl fmt::Display for SeverityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plog::LogRecord;

    #[test]
    fn names() {
        assert_eq!("Unspecified", SeverityNumber::UNSPECIFIED.to_string());
        assert_eq!("Trace", SeverityNumber::TRACE.as_str());
        assert_eq!("Debug4", SeverityNumber::DEBUG4.as_str());
        assert_eq!("Info", SeverityNumber::INFO.as_str());
        assert_eq!("Warn3", SeverityNumber::WARN3.as_str());
        assert_eq!("Error2", SeverityNumber::ERROR2.as_str());
        assert_eq!("Fatal4", SeverityNumber::FATAL4.as_str());
        assert_eq!("", SeverityNumber(100).as_str());
        assert_eq!("", SeverityNumber(-1).to_string());
    }

    #[test]
    fn log_record_stores_the_enum_number() {
        let mut lr = LogRecord::new();
        assert_eq!(SeverityNumber::UNSPECIFIED, lr.severity_number());
        lr.set_severity_number(SeverityNumber::WARN);
        assert_eq!(13, lr.orig().severity_number);
        lr.set_severity_number(SeverityNumber(100));
        assert_eq!(SeverityNumber(100), lr.severity_number());
    }
}

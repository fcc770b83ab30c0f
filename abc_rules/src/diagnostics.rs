// Leveled diagnostic messages for a single computation.
//
// Messages are gated by the verbosity of the request and forwarded to the `log`
// facade. A capturing sink also keeps them in memory, which is how callers (and
// tests) inspect what a computation reported.

use std::cell::RefCell;
use std::fmt;

use log::{debug, error, info, trace, warn};

/// Severities, from the least to the most important.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Severity {
    Debug2,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// The least important severity that is still shown at this verbosity.
    /// `None` means that nothing is shown.
    pub fn threshold(verbosity: u8) -> Option<Severity> {
        match verbosity {
            0 => None,
            1 => Some(Severity::Info),
            2 => Some(Severity::Debug),
            _ => Some(Severity::Debug2),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Severity::Debug2 => "DEBUG2",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug)]
pub struct Diagnostics {
    threshold: Option<Severity>,
    captured: Option<RefCell<Vec<(Severity, String)>>>,
}

impl Diagnostics {
    pub fn new(verbosity: u8) -> Diagnostics {
        Diagnostics {
            threshold: Severity::threshold(verbosity),
            captured: None,
        }
    }

    /// A sink that also records the emitted messages.
    pub fn capturing(verbosity: u8) -> Diagnostics {
        Diagnostics {
            threshold: Severity::threshold(verbosity),
            captured: Some(RefCell::new(Vec::new())),
        }
    }

    pub fn silent() -> Diagnostics {
        Diagnostics::new(0)
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        match self.threshold {
            Some(t) => severity >= t,
            None => false,
        }
    }

    pub fn emit(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if !self.enabled(severity) {
            return;
        }
        match severity {
            Severity::Debug2 => trace!("{}", args),
            Severity::Debug => debug!("{}", args),
            Severity::Info => info!("{}", args),
            Severity::Warning => warn!("{}", args),
            Severity::Error | Severity::Critical => error!("{}", args),
        }
        if let Some(captured) = self.captured.as_ref() {
            captured.borrow_mut().push((severity, args.to_string()));
        }
    }

    pub fn debug2(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Debug2, args)
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Debug, args)
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Info, args)
    }

    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Warning, args)
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Error, args)
    }

    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Critical, args)
    }

    /// The captured messages, empty when the sink is not capturing.
    pub fn messages(&self) -> Vec<(Severity, String)> {
        match self.captured.as_ref() {
            Some(captured) => captured.borrow().clone(),
            None => Vec::new(),
        }
    }

    /// The captured output as text, one message per line.
    pub fn output(&self) -> String {
        self.messages()
            .iter()
            .map(|(_, m)| m.as_str())
            .collect::<Vec<&str>>()
            .join("\n")
    }
}

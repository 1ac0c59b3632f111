use macroquad::logging::warn;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorType {
    /// A pop would have removed the propagation stack's root entry
    PropagationStackUnderflow,
    /// The three triangle points are colinear or coincide
    DegenerateTriangle,
    /// A triangle test was given something other than three points
    MalformedTriangle,
    UnknownFont,
    /// No image with the given name exists in the given pack
    UnknownImage,
    UnmeasurableText,
}

impl ErrorType {
    /// Whether this kind of error aborts the frame instead of degrading it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ErrorType::PropagationStackUnderflow
                | ErrorType::DegenerateTriangle
                | ErrorType::MalformedTriangle
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Error<'a> {
    pub type_: ErrorType,
    pub text: &'a str,
}

impl core::fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "(type: {:?}) {}", self.type_, self.text)
    }
}

/// Aborts on a broken caller contract.
#[track_caller]
pub fn contract_violation(type_: ErrorType, text: &str) -> ! {
    panic!("quadview error: {}", Error { type_, text })
}

/// Reports each missing asset once per runtime, after that it stays quiet.
#[derive(Debug, Default)]
pub struct Warnings {
    seen: FxHashSet<(ErrorType, String)>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the error if this `(type, key)` pair has not been reported yet.
    /// Returns whether anything was logged.
    pub fn report(&mut self, type_: ErrorType, key: &str, text: &str) -> bool {
        if !self.seen.insert((type_, key.to_owned())) {
            return false;
        }
        warn!("{}", Error { type_, text });
        true
    }

    pub fn has_reported(&self, type_: ErrorType, key: &str) -> bool {
        self.seen.contains(&(type_, key.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_deduplicated_per_key() {
        let mut warnings = Warnings::new();
        assert!(warnings.report(ErrorType::UnknownFont, "Mono", "font Mono is not loaded"));
        assert!(!warnings.report(ErrorType::UnknownFont, "Mono", "font Mono is not loaded"));
        assert!(warnings.report(ErrorType::UnknownFont, "Serif", "font Serif is not loaded"));
        assert!(warnings.report(ErrorType::UnknownImage, "Mono", "image Mono is missing"));
        assert_eq!(warnings.len(), 3);
        assert!(warnings.has_reported(ErrorType::UnknownImage, "Mono"));
    }

    #[test]
    fn fatal_kinds() {
        assert!(ErrorType::PropagationStackUnderflow.is_fatal());
        assert!(!ErrorType::UnknownImage.is_fatal());
    }

    #[test]
    #[should_panic(expected = "PropagationStackUnderflow")]
    fn contract_violation_panics_with_type() {
        contract_violation(ErrorType::PropagationStackUnderflow, "popped the root entry");
    }
}

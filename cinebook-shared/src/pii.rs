use std::fmt;

/// A customer name as it may appear in logs: the initial only, so log lines
/// for one booking can still be told apart without recording who made it.
#[derive(Clone, Copy)]
pub struct MaskedName<'a>(pub &'a str);

impl fmt::Display for MaskedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.trim().chars().next() {
            Some(initial) => write!(f, "{}***", initial.to_uppercase()),
            None => f.write_str("<blank>"),
        }
    }
}

impl fmt::Debug for MaskedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

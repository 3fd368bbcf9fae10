use std::error::Error;
use std::fmt::Write;

/// Render an error followed by its `source()` chain on one line.
pub fn report(err: &(dyn Error + 'static)) -> String {
    let mut s = err.to_string();
    let mut current = err.source();
    while let Some(src) = current {
        let text = src.to_string();
        // hyper and reqwest often repeat the inner message verbatim
        if !s.ends_with(&text) {
            let _ = write!(s, ": {}", text);
        }
        current = src.source();
    }
    s
}

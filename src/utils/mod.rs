//! Shared helpers.

mod selector;

pub use selector::{parse_selector, parse_selector_unsafe};

#[cfg(test)]
mod tests {
    include!("tests.rs");
}

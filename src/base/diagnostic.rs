use std::{
    cell::{Cell, RefCell},
    fmt::Display,
};

use super::Error;

/// Represents a trait responsible for handling diagnostics in the front end.
pub trait Handler<T> {
    /// Receive an error and handles it.
    fn receive(&self, error: T);
}

/// Prints every received diagnostic to stderr and remembers whether it printed anything.
#[derive(Debug, Default)]
pub struct PrintHandler {
    printed: Cell<bool>,
}

impl PrintHandler {
    /// Creates a new [`PrintHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one diagnostic has been printed.
    #[must_use]
    pub fn has_printed(&self) -> bool {
        self.printed.get()
    }
}

impl<T: Display> Handler<T> for PrintHandler {
    fn receive(&self, error: T) {
        eprintln!("{error}");
        self.printed.set(true);
    }
}

/// Collects every received diagnostic without printing it.
#[derive(Debug, Default)]
pub struct SilentHandler {
    received: RefCell<Vec<Error>>,
}

impl SilentHandler {
    /// Creates a new [`SilentHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any diagnostic has been received.
    #[must_use]
    pub fn has_received(&self) -> bool {
        !self.received.borrow().is_empty()
    }

    /// Takes all diagnostics received so far.
    #[must_use]
    pub fn take(&self) -> Vec<Error> {
        self.received.take()
    }
}

impl<T: Into<Error>> Handler<T> for SilentHandler {
    fn receive(&self, error: T) {
        self.received.borrow_mut().push(error.into());
    }
}

/// Discards every received diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidHandler;

impl<T> Handler<T> for VoidHandler {
    fn receive(&self, _error: T) {}
}

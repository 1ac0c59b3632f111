use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared dirty flag. Raised by bindings, consumed by the runtime before rebuilding.
#[derive(Debug, Clone, Default)]
pub struct UpdateSignal {
    requested: Rc<Cell<bool>>,
}

impl UpdateSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }

    /// Returns the flag and lowers it.
    pub fn take(&self) -> bool {
        self.requested.replace(false)
    }
}

/// A mutable value the view tree reads at build time.
///
/// Setting a different value raises the attached [`UpdateSignal`].
pub struct Binding<T> {
    value: Rc<RefCell<T>>,
    signal: UpdateSignal,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            signal: self.signal.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.value.borrow()).finish()
    }
}

impl<T: Clone + PartialEq> Binding<T> {
    pub fn new(value: T, signal: &UpdateSignal) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            signal: signal.clone(),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Stores `value`, requesting an update only if it differs from the current one.
    pub fn set(&self, value: T) {
        let changed = *self.value.borrow() != value;
        if changed {
            *self.value.borrow_mut() = value;
            self.signal.request();
        }
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.value.borrow());
        self.set(next);
    }

    /// A modifier argument that follows this binding.
    pub fn value(&self) -> Value<T> {
        Value::Bound(self.clone())
    }
}

/// A modifier argument: fixed, or read from a binding every build.
#[derive(Clone)]
pub enum Value<T> {
    Constant(T),
    Bound(Binding<T>),
}

impl<T: Clone + PartialEq> Value<T> {
    pub fn get(&self) -> T {
        match self {
            Value::Constant(value) => value.clone(),
            Value::Bound(binding) => binding.get(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Value::Bound(binding) => binding.fmt(f),
        }
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Value::Constant(value)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_only_signals_on_change() {
        let signal = UpdateSignal::new();
        let counter = Binding::new(1, &signal);

        counter.set(1);
        assert!(!signal.is_requested());

        counter.set(2);
        assert!(signal.take());
        assert!(!signal.is_requested());
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn values_read_through_bindings() {
        let signal = UpdateSignal::new();
        let label = Binding::new(String::from("a"), &signal);
        let value = label.value();
        label.update(|current| format!("{current}b"));
        assert_eq!(value.get(), "ab");
        assert_eq!(Value::from(3).get(), 3);
    }
}

use std::{any::Any, cell::RefCell, fmt, rc::Rc};

/// Error type returned by [`Value::set`].
///
/// Value objects hand back whatever their underlying parser produced; the
/// engine attaches the flag name on top.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The runtime value of a single declared flag.
///
/// The engine calls [`Value::set`] once per occurrence of the flag on the
/// command line, left to right, so the last occurrence wins. `Debug` is the
/// usage-oriented rendering of the current value.
pub trait Value: Any + fmt::Debug {
    /// Parses `raw` and stores the result.
    ///
    /// On failure the stored value must be left untouched.
    fn set(&mut self, raw: &str) -> Result<(), BoxError>;

    /// Whether `set` has succeeded at least once.
    fn is_set(&self) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// A [`Value`] that knows the semantic type it produces.
pub trait TypedValue: Value {
    type Output: fmt::Debug;

    /// Short name of the value kind, used in diagnostics.
    const KIND: &'static str = "value";

    /// Returns the current value.
    ///
    /// # Panics
    ///
    /// Panics if the destination cell was never initialized.
    fn get(&self) -> Self::Output;
}

/// Storage cell for a parsed flag value.
///
/// A `Destination` has exactly one writer, the value object it is moved
/// into. Any number of read-only [`Handle`]s can be taken before that to
/// observe the latest successfully parsed value.
pub struct Destination<T> {
    cell: Rc<RefCell<Option<T>>>,
}

impl<T> Destination<T> {
    /// Creates an uninitialized cell.
    pub fn new() -> Destination<T> {
        Destination { cell: Rc::new(RefCell::new(None)) }
    }

    pub fn handle(&self) -> Handle<T> {
        Handle { cell: Rc::clone(&self.cell) }
    }

    pub fn put(&mut self, value: T) {
        *self.cell.borrow_mut() = Some(value);
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.borrow().is_some()
    }

    /// # Panics
    ///
    /// Panics if nothing was ever stored in the cell.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        read(&self.cell)
    }
}

impl<T> Default for Destination<T> {
    fn default() -> Destination<T> {
        Destination::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Destination<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Destination").field(&self.cell.borrow()).finish()
    }
}

/// Read-only view of a [`Destination`].
pub struct Handle<T> {
    cell: Rc<RefCell<Option<T>>>,
}

impl<T> Handle<T> {
    pub fn is_initialized(&self) -> bool {
        self.cell.borrow().is_some()
    }

    /// # Panics
    ///
    /// Panics if the flag owning the cell was never declared.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        read(&self.cell)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Handle<T> {
        Handle { cell: Rc::clone(&self.cell) }
    }
}

impl<T: fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.cell.borrow()).finish()
    }
}

fn read<T: Clone>(cell: &RefCell<Option<T>>) -> T {
    match &*cell.borrow() {
        Some(value) => value.clone(),
        None => panic!("flag destination read before it was initialized"),
    }
}

//! Owner references and keyed callbacks.
//!
//! Tables and columns never own the page that hosts them. A column points at
//! its table through a [`TableId`], and the host page is only known through
//! the [`TableOwner`] passed to `wakeup`. When the host persists its state it
//! calls `sleep()`, which drops every keyed closure (closures capture page
//! state and cannot be persisted); `wakeup(owner)` resolves them again by key.
//! Closures without a key own everything they capture and are kept as-is.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use htmlgrid_markup::Attributes;

use crate::error::TableError;

/// Non-owning identity of a table, held by the columns it owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableId(u64);

impl TableId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TableId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Computes extra `<tr>` attributes from a row item and its visual index.
pub type RowParamsFn<R> = Rc<dyn Fn(&R, usize) -> Attributes>;

/// Computes the content of a single cell.
pub type CellFn<R> = Rc<dyn Fn(&R) -> Result<String, TableError>>;

/// The page or form hosting a table.
pub trait TableOwner<R> {
    fn owner_id(&self) -> &str;

    fn row_params_callback(&self, _key: &str) -> Option<RowParamsFn<R>> {
        None
    }

    fn cell_callback(&self, _key: &str) -> Option<CellFn<R>> {
        None
    }
}

/// A closure that may be detached on sleep and resolved again on wakeup.
pub struct KeyedCallback<F: ?Sized> {
    key: Option<String>,
    func: Option<Rc<F>>,
}

impl<F: ?Sized> KeyedCallback<F> {
    /// An anonymous callback. It survives sleep unchanged.
    pub fn new(func: Rc<F>) -> Self {
        Self {
            key: None,
            func: Some(func),
        }
    }

    /// A callback registered on the owner under `key`.
    pub fn keyed(key: impl Into<String>, func: Rc<F>) -> Self {
        Self {
            key: Some(key.into()),
            func: Some(func),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn get(&self) -> Option<&Rc<F>> {
        self.func.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.func.is_some()
    }

    pub fn sleep(&mut self) {
        if self.key.is_some() {
            self.func = None;
        }
    }

    /// Re-resolves a detached keyed callback with `resolve`.
    pub fn wakeup(
        &mut self,
        owner_id: &str,
        resolve: impl FnOnce(&str) -> Option<Rc<F>>,
    ) -> Result<(), TableError> {
        if self.func.is_some() {
            return Ok(());
        }
        let Some(key) = self.key.as_deref() else {
            return Ok(());
        };
        match resolve(key) {
            Some(func) => {
                self.func = Some(func);
                Ok(())
            }
            None => Err(TableError::UnresolvedCallback {
                key: key.to_string(),
                owner: owner_id.to_string(),
            }),
        }
    }
}

impl<F: ?Sized> Clone for KeyedCallback<F> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            func: self.func.clone(),
        }
    }
}

impl<F: ?Sized> fmt::Debug for KeyedCallback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCallback")
            .field("key", &self.key)
            .field("attached", &self.func.is_some())
            .finish()
    }
}

pub type RowParamsCallback<R> = KeyedCallback<dyn Fn(&R, usize) -> Attributes>;

/// A ready-made [`TableOwner`] backed by name → closure maps.
///
/// ```rust
/// use htmlgrid::{CallbackRegistry, TableOwner};
/// use htmlgrid_markup::Attributes;
///
/// let owner: CallbackRegistry<u32> = CallbackRegistry::new("orders_form")
///     .with_row_params("by_value", |n: &u32, _| Attributes::new().with("data-n", n.to_string()));
/// assert!(owner.row_params_callback("by_value").is_some());
/// assert!(owner.row_params_callback("missing").is_none());
/// ```
pub struct CallbackRegistry<R> {
    id: String,
    row_params: HashMap<String, RowParamsFn<R>>,
    cells: HashMap<String, CellFn<R>>,
}

impl<R> CallbackRegistry<R> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            row_params: HashMap::new(),
            cells: HashMap::new(),
        }
    }

    pub fn with_row_params(
        mut self,
        key: impl Into<String>,
        func: impl Fn(&R, usize) -> Attributes + 'static,
    ) -> Self {
        self.row_params.insert(key.into(), Rc::new(func));
        self
    }

    pub fn with_cell(
        mut self,
        key: impl Into<String>,
        func: impl Fn(&R) -> Result<String, TableError> + 'static,
    ) -> Self {
        self.cells.insert(key.into(), Rc::new(func));
        self
    }
}

impl<R> TableOwner<R> for CallbackRegistry<R> {
    fn owner_id(&self) -> &str {
        &self.id
    }

    fn row_params_callback(&self, key: &str) -> Option<RowParamsFn<R>> {
        self.row_params.get(key).cloned()
    }

    fn cell_callback(&self, key: &str) -> Option<CellFn<R>> {
        self.cells.get(key).cloned()
    }
}

impl<R> fmt::Debug for CallbackRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("id", &self.id)
            .field("row_params", &self.row_params.keys().collect::<Vec<_>>())
            .field("cells", &self.cells.keys().collect::<Vec<_>>())
            .finish()
    }
}

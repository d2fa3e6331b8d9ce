use std::fmt;
use std::rc::Rc;

use super::{column_builders, CellContext, Column, ColumnCore};
use crate::error::TableError;
use crate::owner::{KeyedCallback, TableOwner};

/// A column whose cell text is computed by a closure.
///
/// Anonymous closures are kept across sleep/wakeup. A closure registered with
/// [`keyed`](CallableColumn::keyed) is dropped on sleep and looked up again on
/// the owner by key, so it may capture page state freely.
pub struct CallableColumn<R> {
    core: ColumnCore,
    callback: KeyedCallback<dyn Fn(&R) -> Result<String, TableError>>,
}

impl<R> CallableColumn<R> {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&R) -> Result<String, TableError> + 'static,
    ) -> Self {
        let func: Rc<dyn Fn(&R) -> Result<String, TableError>> = Rc::new(func);
        CallableColumn {
            core: ColumnCore::new(name),
            callback: KeyedCallback::new(func),
        }
    }

    /// A closure the owner can resolve again under `key` after sleep.
    pub fn keyed(
        name: impl Into<String>,
        key: impl Into<String>,
        func: impl Fn(&R) -> Result<String, TableError> + 'static,
    ) -> Self {
        let func: Rc<dyn Fn(&R) -> Result<String, TableError>> = Rc::new(func);
        CallableColumn {
            core: ColumnCore::new(name),
            callback: KeyedCallback::keyed(key, func),
        }
    }

    pub fn callback_key(&self) -> Option<&str> {
        self.callback.key()
    }

    column_builders!();
}

impl<R> fmt::Debug for CallableColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableColumn")
            .field("core", &self.core)
            .field("callback", &self.callback)
            .finish()
    }
}

impl<R> Column<R> for CallableColumn<R> {
    fn core(&self) -> &ColumnCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ColumnCore {
        &mut self.core
    }

    fn fetch_cell_value(&self, item: &R, _ctx: &CellContext) -> Result<String, TableError> {
        match self.callback.get() {
            Some(func) => func(item),
            None => Err(TableError::cell(
                self.core.name(),
                format!(
                    "callback '{}' is detached",
                    self.callback.key().unwrap_or_default()
                ),
            )),
        }
    }

    fn sleep(&mut self) {
        self.callback.sleep();
    }

    fn wakeup(&mut self, owner: &dyn TableOwner<R>) -> Result<(), TableError> {
        self.callback
            .wakeup(owner.owner_id(), |key| owner.cell_callback(key))
    }
}

//! Traversal of the category forest.
//!
//! Each category stores only its parent. Queries walk parent links upwards
//! and child queries downwards; siblings always come back ordered by name.
//! Walks keep track of visited ids so that corrupted parent links surface as
//! [`Error::TreeCycle`] rather than an endless loop.

use std::collections::HashSet;

use butane::db::ConnectionMethods;
use butane::prelude::*;
use butane::query::{BoolExpr, Expr};
use butane::SqlVal;

use crate::models::{refers_to, Category};
use crate::{Error, Result};

/// Categories without a parent, ordered by name.
pub fn roots(conn: &impl ConnectionMethods) -> Result<Vec<Category>> {
    let roots = Category::query()
        .filter(BoolExpr::Eq("parent", Expr::Val(SqlVal::Null)))
        .order_asc("name")
        .load(conn)?;
    Ok(roots)
}

impl Category {
    /// Direct children, ordered by name.
    pub fn children(&self, conn: &impl ConnectionMethods) -> Result<Vec<Category>> {
        let children = Category::query()
            .filter(refers_to("parent", self.saved_id()?))
            .order_asc("name")
            .load(conn)?;
        Ok(children)
    }

    pub fn parent(&self, conn: &impl ConnectionMethods) -> Result<Option<Category>> {
        match self.parent_id() {
            Some(id) => Ok(Some(Category::get(conn, id)?)),
            None => Ok(None),
        }
    }

    /// Ancestors from the root down to the direct parent.
    pub fn ancestors(&self, conn: &impl ConnectionMethods) -> Result<Vec<Category>> {
        let mut seen: HashSet<i64> = (*self.id).into_iter().collect();
        let mut chain = Vec::new();
        let mut next = self.parent_id();
        while let Some(id) = next {
            if !seen.insert(id) {
                return Err(Error::TreeCycle(id));
            }
            let parent = Category::get(conn, id)?;
            next = parent.parent_id();
            chain.push(parent);
        }
        chain.reverse();
        Ok(chain)
    }

    /// Depth below the roots; roots are at level 0.
    pub fn level(&self, conn: &impl ConnectionMethods) -> Result<usize> {
        Ok(self.ancestors(conn)?.len())
    }

    pub fn is_leaf(&self, conn: &impl ConnectionMethods) -> Result<bool> {
        Ok(self.children(conn)?.is_empty())
    }

    /// All categories below this one in depth-first pre-order, each level
    /// ordered by name.
    pub fn descendants(&self, conn: &impl ConnectionMethods) -> Result<Vec<Category>> {
        let mut seen = HashSet::from([self.saved_id()?]);
        let mut found = Vec::new();
        let mut stack: Vec<Category> = self.children(conn)?.into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            let id = node.saved_id()?;
            if !seen.insert(id) {
                return Err(Error::TreeCycle(id));
            }
            stack.extend(node.children(conn)?.into_iter().rev());
            found.push(node);
        }
        Ok(found)
    }

    /// Re-parent this category (`None` makes it a root) and save it.
    ///
    /// Moving a category below itself or one of its descendants fails with
    /// [`Error::InvalidMove`] and leaves both memory and storage unchanged.
    /// The check follows the stored parent links of `new_parent`, not the
    /// copy passed in. Pass a transaction as `conn` to keep the check and
    /// the save atomic.
    pub fn move_to(
        &mut self,
        conn: &impl ConnectionMethods,
        new_parent: Option<&Category>,
    ) -> Result<()> {
        match new_parent {
            Some(parent) => {
                let parent_id = parent.saved_id()?;
                if let Some(id) = *self.id {
                    let below_self = parent_id == id
                        || Category::get(conn, parent_id)?
                            .ancestors(conn)?
                            .iter()
                            .any(|ancestor| *ancestor.id == Some(id));
                    if below_self {
                        return Err(Error::InvalidMove {
                            category: self.name.clone(),
                            parent: parent.name.clone(),
                        });
                    }
                }
                log::debug!("moving category {:?} under {}", *self.id, parent_id);
                self.parent = Some(parent.into());
            }
            None => {
                log::debug!("moving category {:?} to the roots", *self.id);
                self.parent = None;
            }
        }
        self.save(conn)?;
        Ok(())
    }
}

#![forbid(unsafe_code)]

//! Category filter store.
//!
//! Holds a fixed item list, the set of declared categories, and the active
//! filter. The visible subset is derived on demand: a single pass over the
//! items in insertion order, never touching the source list.
//!
//! # Invariants
//!
//! 1. The active filter is [`ALL`] or one of the declared category ids.
//! 2. `set_filter` with anything else is rejected and leaves the filter as it was.
//! 3. Items whose category was never declared are only visible under [`ALL`].
//!
//! # Example
//!
//! ```
//! use folio_widgets::category_filter::{Categorized, CategoryFilter};
//!
//! struct Item(u32, &'static str);
//!
//! impl Categorized for Item {
//!     fn category(&self) -> &str {
//!         self.1
//!     }
//! }
//!
//! let mut filter = CategoryFilter::new(
//!     "All",
//!     [("ml", "ML & AI"), ("web", "Web Apps")],
//!     vec![Item(1, "ml"), Item(2, "web"), Item(3, "ml")],
//! );
//! filter.set_filter("ml").unwrap();
//! let ids: Vec<u32> = filter.visible_items().map(|i| i.0).collect();
//! assert_eq!(ids, vec![1, 3]);
//! ```

use std::fmt;

use serde::Serialize;

/// The wildcard filter id.
pub const ALL: &str = "all";

/// Anything that belongs to exactly one category.
pub trait Categorized {
    /// Category id of this item.
    fn category(&self) -> &str;
}

/// A declared category: the id items carry and the label its button shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Stable id, matched against [`Categorized::category`].
    pub id: String,
    /// Human-readable label.
    pub label: String,
}

/// One filter button as the view layer renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// Filter id (`all` or a category id).
    pub id: String,
    /// Button label.
    pub label: String,
    /// Items the filter would show.
    pub count: usize,
    /// Whether this is the active filter.
    pub active: bool,
}

/// Rejected filter change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The tag is neither `all` nor a declared category.
    UnknownTag(String),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTag(tag) => write!(f, "unknown filter tag: {tag:?}"),
        }
    }
}

impl std::error::Error for FilterError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Active {
    All,
    Category(usize),
}

/// Filterable item list with one active category.
#[derive(Debug, Clone)]
pub struct CategoryFilter<T> {
    all_label: String,
    categories: Vec<Category>,
    items: Vec<T>,
    active: Active,
}

impl<T: Categorized> CategoryFilter<T> {
    /// Create a store showing everything.
    ///
    /// `categories` are `(id, label)` pairs in button order. A repeated id,
    /// or the reserved id `all`, is dropped.
    pub fn new<I, S, L>(all_label: impl Into<String>, categories: I, items: Vec<T>) -> Self
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: Into<String>,
    {
        let mut declared: Vec<Category> = Vec::new();
        for (id, label) in categories {
            let id = id.into();
            if id == ALL || declared.iter().any(|c| c.id == id) {
                tracing::warn!(category = %id, "ignoring duplicate or reserved category id");
                continue;
            }
            declared.push(Category {
                id,
                label: label.into(),
            });
        }
        Self {
            all_label: all_label.into(),
            categories: declared,
            items,
            active: Active::All,
        }
    }

    /// Activate a filter.
    ///
    /// Returns `Ok(true)` if the active filter changed, `Ok(false)` if it was
    /// already active. Unknown tags are rejected without touching state.
    pub fn set_filter(&mut self, tag: &str) -> Result<bool, FilterError> {
        let next = self.resolve(tag)?;
        let changed = next != self.active;
        self.active = next;
        if changed {
            tracing::debug!(filter = tag, visible = self.count(tag), "filter changed");
        }
        Ok(changed)
    }

    /// Go back to showing everything.
    pub fn reset(&mut self) {
        self.active = Active::All;
    }

    /// Items passing the active filter, in insertion order.
    pub fn visible_items(&self) -> impl Iterator<Item = &T> + '_ {
        let wanted = match self.active {
            Active::All => None,
            Active::Category(idx) => Some(self.categories[idx].id.as_str()),
        };
        self.items
            .iter()
            .filter(move |item| wanted.is_none_or(|id| item.category() == id))
    }

    /// Number of items a filter would show, or 0 for an unknown tag.
    #[must_use]
    pub fn count(&self, tag: &str) -> usize {
        match self.resolve(tag) {
            Ok(Active::All) => self.items.len(),
            Ok(Active::Category(idx)) => {
                let id = self.categories[idx].id.as_str();
                self.items.iter().filter(|i| i.category() == id).count()
            }
            Err(_) => 0,
        }
    }

    /// Filter buttons, `all` first, then categories in declaration order.
    #[must_use]
    pub fn options(&self) -> Vec<FilterOption> {
        let mut options = Vec::with_capacity(self.categories.len() + 1);
        options.push(FilterOption {
            id: ALL.to_string(),
            label: self.all_label.clone(),
            count: self.items.len(),
            active: self.active == Active::All,
        });
        for (idx, category) in self.categories.iter().enumerate() {
            options.push(FilterOption {
                id: category.id.clone(),
                label: category.label.clone(),
                count: self
                    .items
                    .iter()
                    .filter(|i| i.category() == category.id)
                    .count(),
                active: self.active == Active::Category(idx),
            });
        }
        options
    }

    fn resolve(&self, tag: &str) -> Result<Active, FilterError> {
        if tag == ALL {
            return Ok(Active::All);
        }
        self.categories
            .iter()
            .position(|c| c.id == tag)
            .map(Active::Category)
            .ok_or_else(|| FilterError::UnknownTag(tag.to_string()))
    }
}

impl<T> CategoryFilter<T> {
    /// Id of the active filter.
    #[must_use]
    pub fn active(&self) -> &str {
        match self.active {
            Active::All => ALL,
            Active::Category(idx) => &self.categories[idx].id,
        }
    }

    /// Whether `tag` is the active filter.
    #[must_use]
    pub fn is_active(&self, tag: &str) -> bool {
        self.active() == tag
    }

    /// Every item, unfiltered.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Declared categories in button order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

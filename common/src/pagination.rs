//! Abstractions for pagination.

use std::{
    cmp::Ordering, collections::HashMap, num::NonZeroUsize,
    ops::RangeInclusive, sync::Arc,
};

/// Number of a page, starting from `1`.
pub type Number = usize;

/// Cache of the pages sliced from a list of `T`s.
///
/// A page is materialized only once: repeated requests of the same page
/// return the very same [`Arc`] until the cache is invalidated. Invalidation
/// is all-or-nothing: there is no eviction of individual pages.
#[derive(Clone, Debug)]
pub struct Cache<T> {
    /// List being paginated.
    items: Arc<[T]>,

    /// Maximum number of items on a single page.
    size: NonZeroUsize,

    /// Already materialized pages.
    pages: HashMap<Number, Arc<[T]>>,

    /// Currently selected page (not clamped).
    current: Number,
}

impl<T> Cache<T> {
    /// Creates a new empty [`Cache`] with the provided page `size`.
    #[must_use]
    pub fn new(size: NonZeroUsize) -> Self {
        Self {
            items: Arc::from([]),
            size,
            pages: HashMap::new(),
            current: 1,
        }
    }

    /// Replaces the paginated list with the provided one and
    /// [invalidates](Cache::invalidate) this [`Cache`].
    pub fn reset(&mut self, items: impl Into<Arc<[T]>>) {
        self.items = items.into();
        self.invalidate();
    }

    /// Drops all the materialized pages and selects the first page.
    pub fn invalidate(&mut self) {
        self.pages.clear();
        self.current = 1;
    }

    /// Returns the list being paginated.
    #[must_use]
    pub fn items(&self) -> &Arc<[T]> {
        &self.items
    }

    /// Returns the maximum number of items on a single page.
    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        self.size
    }

    /// Returns the total number of items in the paginated list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Indicates whether the paginated list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total number of pages.
    ///
    /// There is always at least one (possibly empty) page.
    #[must_use]
    pub fn total_pages(&self) -> Number {
        self.len().div_ceil(self.size.get()).max(1)
    }

    /// Clamps the provided page `number` into `[1, total_pages]` range.
    #[must_use]
    pub fn clamp(&self, number: Number) -> Number {
        number.clamp(1, self.total_pages())
    }

    /// Returns the currently selected page number.
    #[must_use]
    pub fn current_page(&self) -> Number {
        self.clamp(self.current)
    }

    /// Selects the page with the provided `number`, returning the actually
    /// selected (clamped) one.
    pub fn select(&mut self, number: Number) -> Number {
        self.current = self.clamp(number);
        self.current
    }

    /// Selects the page next to the current one.
    pub fn next(&mut self) -> Number {
        self.select(self.current_page().saturating_add(1))
    }

    /// Selects the page previous to the current one.
    pub fn prev(&mut self) -> Number {
        self.select(self.current_page().saturating_sub(1))
    }

    /// Indicates whether the page with the provided `number` is already
    /// materialized.
    #[must_use]
    pub fn is_cached(&self, number: Number) -> bool {
        self.pages.contains_key(&self.clamp(number))
    }

    /// Returns the page with the provided (clamped) `number`, materializing
    /// it if it's not cached yet.
    pub fn page(&mut self, number: Number) -> Arc<[T]>
    where
        T: Clone,
    {
        let number = self.clamp(number);
        let (items, size) = (&self.items, self.size.get());
        Arc::clone(self.pages.entry(number).or_insert_with(|| {
            let start = (number - 1).saturating_mul(size).min(items.len());
            let end = start.saturating_add(size).min(items.len());
            Arc::from(&items[start..end])
        }))
    }

    /// Returns the currently selected page.
    pub fn current(&mut self) -> Arc<[T]>
    where
        T: Clone,
    {
        self.page(self.current_page())
    }

    /// Returns the [`Span`] of items on the page with the provided (clamped)
    /// `number`.
    #[must_use]
    pub fn span(&self, number: Number) -> Span {
        let number = self.clamp(number);
        let start = (number - 1).saturating_mul(self.size.get());
        Span {
            from: if start < self.len() { start + 1 } else { 0 },
            to: number.saturating_mul(self.size.get()).min(self.len()),
            total: self.len(),
        }
    }
}

/// Human-readable position of a page's items in the whole list.
///
/// Positions are `1`-based, so an empty page has `from` equal to `0`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
    /// Position of the first item on the page.
    pub from: usize,

    /// Position of the last item on the page.
    pub to: usize,

    /// Total number of items in the list.
    pub total: usize,
}

/// Returns the window of page numbers to offer for navigation around the
/// `current` one.
///
/// The window contains at most `width` numbers, starting two pages before
/// the `current` one.
#[must_use]
pub fn window(
    current: Number,
    total: Number,
    width: NonZeroUsize,
) -> RangeInclusive<Number> {
    let start = current.saturating_sub(2).max(1);
    let end = total.min(start + width.get() - 1);
    start..=end
}

/// Order of a sorting.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    #[default]
    Ascending,

    /// Descending order.
    Descending,
}

impl Order {
    /// Returns the opposite [`Order`].
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Applies this [`Order`] to the provided ascending [`Ordering`].
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

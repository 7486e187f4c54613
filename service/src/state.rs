//! Shared state of the administrator's workspace.

use std::{num::NonZeroUsize, sync::Arc};

use common::{pagination, unit, DateTimeOf};
use tokio::sync::{watch, Mutex, OnceCell, RwLock};

use crate::{
    domain::{Settings, User},
    read::user::list::{self, Filter, Generation, Snapshot, Sort},
};

/// Number of page numbers offered for navigation at once.
const WINDOW_WIDTH: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(w) => w,
    None => unreachable!(),
};

/// Shared mutable state of the workspace.
#[derive(Debug)]
pub struct State {
    /// [`Table`] view of the [`User`]s.
    pub(crate) table: Mutex<Table>,

    /// [`Status`] of fetching the [`User`]s.
    pub(crate) status: Mutex<Status>,

    /// Current [`Lifetime`] of the [`Table`] view.
    pub(crate) lifetime: Mutex<Lifetime>,

    /// [`Settings`], loaded lazily on the first access.
    pub(crate) settings: OnceCell<RwLock<Settings>>,
}

impl State {
    /// Creates a new [`State`] paginating its [`Table`] by the provided
    /// `page_size`.
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            table: Mutex::new(Table::new(page_size)),
            status: Mutex::default(),
            lifetime: Mutex::default(),
            settings: OnceCell::new(),
        }
    }
}

/// Table view of the [`User`]s: filtered, sorted and paginated.
#[derive(Debug)]
pub struct Table {
    /// [`Filter`] applied to the [`User`]s.
    filter: Filter,

    /// [`Sort`] applied to the filtered [`User`]s.
    sort: Sort,

    /// Pages of the filtered and sorted [`User`]s.
    cache: pagination::Cache<User>,

    /// [`Generation`] of the collection the `cache` is computed from.
    ///
    /// [`None`] means the `cache` is stale.
    computed_from: Option<Generation>,
}

impl Table {
    /// Creates a new empty [`Table`] with the provided `page_size`.
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            filter: Filter::default(),
            sort: Sort::default(),
            cache: pagination::Cache::new(page_size),
            computed_from: None,
        }
    }

    /// Returns the current [`Filter`] of this [`Table`].
    #[must_use]
    pub const fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Returns the current [`Sort`] of this [`Table`].
    #[must_use]
    pub const fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Sets the [`Filter`], returning the first page to the view.
    pub fn set_filter(&mut self, filter: Filter) {
        if self.filter != filter {
            self.filter = filter;
            self.computed_from = None;
        }
    }

    /// Sets the [`Sort`], returning the first page to the view.
    pub fn set_sort(&mut self, sort: Sort) {
        if self.sort != sort {
            self.sort = sort;
            self.computed_from = None;
        }
    }

    /// Restores the initial [`Filter`], [`Sort`] and page of this [`Table`].
    pub fn reset(&mut self) {
        self.filter = Filter::default();
        self.sort = Sort::default();
        self.computed_from = None;
        self.cache.invalidate();
    }

    /// Recomputes the filtered and sorted list from the provided
    /// [`Snapshot`], unless it's computed from the same [`Generation`]
    /// already.
    pub fn sync(&mut self, snapshot: &Snapshot) {
        if self.computed_from == Some(snapshot.generation) {
            return;
        }
        let users = list::filter(&snapshot.users, &self.filter);
        self.cache.reset(list::sort(users, &self.sort));
        self.computed_from = Some(snapshot.generation);
    }

    /// Returns the [`pagination::Cache`] of this [`Table`].
    ///
    /// Must be [`sync`]ed before to reflect the actual [`User`]s.
    ///
    /// [`sync`]: Table::sync
    pub fn pages(&mut self) -> &mut pagination::Cache<User> {
        &mut self.cache
    }

    /// Returns the currently selected [`list::Page`].
    ///
    /// Must be [`sync`]ed before to reflect the actual [`User`]s.
    ///
    /// [`sync`]: Table::sync
    pub fn current(&mut self) -> list::Page {
        let number = self.cache.current_page();
        let total_pages = self.cache.total_pages();
        list::Page {
            number,
            total_pages,
            size: self.cache.page_size().get(),
            span: self.cache.span(number),
            window: pagination::window(number, total_pages, WINDOW_WIDTH),
            users: self.cache.page(number),
        }
    }
}

/// Status of fetching [`User`]s from the remote source.
#[derive(Clone, Debug, Default)]
pub struct Status {
    /// Indicator whether a fetch is in progress.
    pub loading: bool,

    /// Message of the last fetch error, if it has failed.
    pub error: Option<String>,

    /// [`DateTime`] of the last successful fetch.
    ///
    /// [`DateTime`]: common::DateTime
    pub fetched_at: Option<FetchDateTime>,
}

/// [`DateTime`] of a successful fetch.
///
/// [`DateTime`]: common::DateTime
pub type FetchDateTime = DateTimeOf<(Status, unit::Fetch)>;

/// Lifetime of a view consuming asynchronously fetched results.
///
/// Results arriving after the [`Lifetime`] has [ended](Lifetime::end) are
/// discarded.
#[derive(Clone, Debug)]
pub struct Lifetime(Arc<watch::Sender<bool>>);

impl Lifetime {
    /// Starts a new [`Lifetime`].
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(watch::channel(false).0))
    }

    /// Ends this [`Lifetime`], waking up everyone awaiting its
    /// [end](Lifetime::ended).
    pub fn end(&self) {
        _ = self.0.send_replace(true);
    }

    /// Indicates whether this [`Lifetime`] has ended.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once this [`Lifetime`] ends.
    pub async fn ended(&self) {
        let mut rx = self.0.subscribe();
        // `Sender` is held by `self`, so the channel cannot be closed here.
        _ = rx.wait_for(|ended| *ended).await.map(drop);
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

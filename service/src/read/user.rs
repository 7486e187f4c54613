//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

pub mod list {
    //! [`User`]s list definitions.
    //!
    //! The list is derived from the whole [`User`]s collection by a pipeline
    //! of [`filter()`] and [`sort()`] stages, and then sliced into [`Page`]s.

    use std::{
        cmp::Ordering, collections::HashSet, ops::RangeInclusive, sync::Arc,
    };

    use common::{
        define_kind,
        pagination::{self, Order, Span},
    };
    use derive_more::{Display, From, Into};

    use crate::domain::{user, User};

    /// Filter of the [`User`]s list.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// Text to search for in the [`user::Name`], [`user::Email`] and
        /// [`user::Phone`] of a [`User`].
        ///
        /// Empty text matches everything.
        pub search: String,

        /// [`CompanyFilter`] to apply.
        pub company: CompanyFilter,
    }

    impl Filter {
        /// Indicates whether the provided [`User`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, user: &User) -> bool {
            if !self.company.matches(&user.company) {
                return false;
            }

            let query = self.search.trim().to_lowercase();
            if query.is_empty() {
                return true;
            }
            [
                user.name.as_ref(),
                user.email.as_ref(),
                user.phone.as_ref(),
            ]
            .into_iter()
            .any(|field: &str| field.to_lowercase().contains(&query))
        }
    }

    /// Filter of [`User`]s by their [`user::Company`].
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub enum CompanyFilter {
        /// Any [`user::Company`] matches.
        #[default]
        All,

        /// Only the exactly equal [`user::Company`] matches.
        Exact(user::Company),
    }

    impl CompanyFilter {
        /// Name of the [`CompanyFilter::All`] sentinel value.
        pub const ALL: &'static str = "All";

        /// Indicates whether the provided [`user::Company`] passes this
        /// [`CompanyFilter`].
        #[must_use]
        pub fn matches(&self, company: &user::Company) -> bool {
            match self {
                Self::All => true,
                Self::Exact(expected) => expected == company,
            }
        }
    }

    impl From<String> for CompanyFilter {
        fn from(value: String) -> Self {
            if value == Self::ALL {
                Self::All
            } else {
                Self::Exact(value.into())
            }
        }
    }

    impl AsRef<str> for CompanyFilter {
        fn as_ref(&self) -> &str {
            match self {
                Self::All => Self::ALL,
                Self::Exact(company) => company.as_ref(),
            }
        }
    }

    define_kind! {
        #[doc = "Field the [`User`]s list may be sorted by."]
        enum SortKey {
            #[doc = "Sorting by [`user::Name`]."]
            Name = 1,

            #[doc = "Sorting by [`user::Email`]."]
            Email = 2,
        }
    }

    impl SortKey {
        /// Returns the value of this [`SortKey`] in the provided [`User`].
        #[must_use]
        pub fn value(self, user: &User) -> &str {
            match self {
                Self::Name => user.name.as_ref(),
                Self::Email => user.email.as_ref(),
            }
        }
    }

    /// Sorting of the [`User`]s list.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Sort {
        /// [`SortKey`] to sort by.
        ///
        /// [`None`] keeps the original order.
        pub key: Option<SortKey>,

        /// [`Order`] to sort in.
        pub order: Order,
    }

    impl Sort {
        /// Toggles sorting by the provided [`SortKey`]: sorting by the same
        /// [`SortKey`] flips the [`Order`], while a new [`SortKey`] always
        /// starts in [`Order::Ascending`].
        #[must_use]
        pub fn toggled(self, key: SortKey) -> Self {
            if self.key == Some(key) {
                Self {
                    key: Some(key),
                    order: self.order.reversed(),
                }
            } else {
                Self {
                    key: Some(key),
                    order: Order::Ascending,
                }
            }
        }

        /// Compares the provided [`User`]s according to this [`Sort`].
        #[must_use]
        pub fn compare(&self, a: &User, b: &User) -> Ordering {
            self.key.map_or(Ordering::Equal, |key| {
                self.order.apply(
                    key.value(a)
                        .to_lowercase()
                        .cmp(&key.value(b).to_lowercase()),
                )
            })
        }
    }

    /// Returns the [`User`]s passing the provided [`Filter`], in their
    /// original order.
    #[must_use]
    pub fn filter(users: &[User], filter: &Filter) -> Vec<User> {
        users.iter().filter(|u| filter.matches(u)).cloned().collect()
    }

    /// Sorts the provided [`User`]s according to the provided [`Sort`].
    ///
    /// Sorting is stable: [`User`]s with equal keys keep their relative
    /// order.
    #[must_use]
    pub fn sort(mut users: Vec<User>, sort: &Sort) -> Vec<User> {
        if sort.key.is_some() {
            users.sort_by(|a, b| sort.compare(a, b));
        }
        users
    }

    /// Returns all the distinct non-empty [`user::Company`]s of the provided
    /// [`User`]s, in order of their first appearance.
    #[must_use]
    pub fn companies(users: &[User]) -> Vec<user::Company> {
        let mut seen = HashSet::new();
        users
            .iter()
            .map(|u| &u.company)
            .filter(|c| !c.as_ref().is_empty() && seen.insert(*c))
            .cloned()
            .collect()
    }

    /// Generation of the whole [`User`]s collection.
    ///
    /// Changes every time the collection is modified in any way, so it
    /// identifies the collection contents.
    #[derive(
        Clone, Copy, Debug, Default, Display, Eq, From, Hash, Into, PartialEq,
    )]
    pub struct Generation(u64);

    impl Generation {
        /// Returns the [`Generation`] following this one.
        #[must_use]
        pub const fn next(self) -> Self {
            Self(self.0.wrapping_add(1))
        }
    }

    /// Snapshot of the whole [`User`]s collection.
    #[derive(Clone, Debug)]
    pub struct Snapshot {
        /// [`User`]s in their original order.
        pub users: Arc<[User]>,

        /// [`Generation`] of the collection this [`Snapshot`] is taken from.
        pub generation: Generation,
    }

    impl Default for Snapshot {
        fn default() -> Self {
            Self {
                users: Vec::new().into(),
                generation: Generation::default(),
            }
        }
    }

    /// Page of the [`User`]s list.
    #[derive(Clone, Debug)]
    pub struct Page {
        /// Number of this [`Page`], starting from `1`.
        pub number: pagination::Number,

        /// Total number of [`Page`]s in the list.
        pub total_pages: pagination::Number,

        /// Maximum number of [`User`]s on a [`Page`].
        pub size: usize,

        /// Position of this [`Page`]'s [`User`]s in the list.
        pub span: Span,

        /// Numbers of the neighbour [`Page`]s to offer for navigation.
        pub window: RangeInclusive<pagination::Number>,

        /// [`User`]s on this [`Page`].
        pub users: Arc<[User]>,
    }

    #[cfg(test)]
    mod spec {
        use common::pagination::Order;

        use crate::domain::{user, User};

        use super::{
            companies, filter, sort, CompanyFilter, Filter, Sort, SortKey,
        };

        fn user(id: i32, name: &str, email: &str, company: &str) -> User {
            User {
                id: id.into(),
                name: name.into(),
                email: email.into(),
                phone: format!("555-01{id:02}").into(),
                company: company.into(),
                website: user::Website::default(),
                address: user::Address::default(),
            }
        }

        fn users() -> Vec<User> {
            vec![
                user(1, "Bob Smith", "bob@acme.io", "Acme"),
                user(2, "alice", "alice@zed.io", "Zed"),
                user(3, "Carol", "carol@acme.io", "Acme"),
                user(4, "bob smith", "another@bob.io", ""),
                user(5, "Dave", "dave@zed.io", "Zed"),
            ]
        }

        fn ids(users: &[User]) -> Vec<i32> {
            users.iter().map(|u| u.id.into()).collect()
        }

        #[test]
        fn empty_filter_keeps_everything() {
            let users = users();

            assert_eq!(filter(&users, &Filter::default()), users);
        }

        #[test]
        fn filters_by_exact_company() {
            let found = filter(
                &users(),
                &Filter {
                    search: String::new(),
                    company: CompanyFilter::from("Acme".to_owned()),
                },
            );

            assert_eq!(ids(&found), [1, 3]);
            assert!(found.iter().all(|u| u.company.as_ref() == "Acme"));

            let found = filter(
                &users(),
                &Filter {
                    search: String::new(),
                    company: CompanyFilter::from("acme".to_owned()),
                },
            );
            assert!(found.is_empty());
        }

        #[test]
        fn searches_case_insensitively() {
            let found = filter(
                &users(),
                &Filter {
                    search: "BOB".to_owned(),
                    company: CompanyFilter::All,
                },
            );

            assert_eq!(ids(&found), [1, 4]);
        }

        #[test]
        fn searches_in_email_and_phone() {
            let by_email = Filter {
                search: "ZED.IO".to_owned(),
                company: CompanyFilter::All,
            };
            let by_phone = Filter {
                search: " 555-0103 ".to_owned(),
                company: CompanyFilter::All,
            };

            assert_eq!(ids(&filter(&users(), &by_email)), [2, 5]);
            assert_eq!(ids(&filter(&users(), &by_phone)), [3]);
        }

        #[test]
        fn combines_search_and_company() {
            let found = filter(
                &users(),
                &Filter {
                    search: "bob".to_owned(),
                    company: CompanyFilter::from("Acme".to_owned()),
                },
            );

            assert_eq!(ids(&found), [1]);
        }

        #[test]
        fn parses_all_sentinel() {
            assert_eq!(
                CompanyFilter::from("All".to_owned()),
                CompanyFilter::All,
            );
            assert_eq!(CompanyFilter::All.as_ref(), "All");
            assert_eq!(
                CompanyFilter::from("Zed".to_owned()).as_ref(),
                "Zed",
            );
        }

        #[test]
        fn unsorted_passes_through() {
            let users = users();

            assert_eq!(sort(users.clone(), &Sort::default()), users);
        }

        #[test]
        fn sorts_case_insensitively() {
            let sorted = sort(
                users(),
                &Sort {
                    key: Some(SortKey::Name),
                    order: Order::Ascending,
                },
            );

            assert_eq!(ids(&sorted), [2, 1, 4, 3, 5]);
        }

        #[test]
        fn sort_is_stable_and_reversible() {
            let asc = sort(
                users(),
                &Sort {
                    key: Some(SortKey::Name),
                    order: Order::Ascending,
                },
            );
            let desc = sort(
                asc.clone(),
                &Sort {
                    key: Some(SortKey::Name),
                    order: Order::Descending,
                },
            );

            // "Bob Smith" (1) and "bob smith" (4) are equal keys, so they
            // keep their relative order in both directions.
            assert_eq!(ids(&asc), [2, 1, 4, 3, 5]);
            assert_eq!(ids(&desc), [5, 3, 1, 4, 2]);
        }

        #[test]
        fn sorts_by_email() {
            let sorted = sort(
                users(),
                &Sort {
                    key: Some(SortKey::Email),
                    order: Order::Descending,
                },
            );

            assert_eq!(ids(&sorted), [5, 3, 1, 4, 2]);
        }

        #[test]
        fn toggles_sort() {
            let sort = Sort::default().toggled(SortKey::Name);
            assert_eq!(sort.key, Some(SortKey::Name));
            assert_eq!(sort.order, Order::Ascending);

            let sort = sort.toggled(SortKey::Name);
            assert_eq!(sort.order, Order::Descending);

            let sort = sort.toggled(SortKey::Email);
            assert_eq!(sort.key, Some(SortKey::Email));
            assert_eq!(sort.order, Order::Ascending);
        }

        #[test]
        fn lists_distinct_companies() {
            let companies = companies(&users());

            assert_eq!(
                companies.iter().map(AsRef::as_ref).collect::<Vec<&str>>(),
                ["Acme", "Zed"],
            );
        }
    }
}

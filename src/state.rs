//! Display states for the data-backed views.
//!
//! Each view starts out `Loading` and moves to exactly one terminal state
//! through an explicit transition. The enums make "error and data at the
//! same time" unrepresentable.

/// State of a view that loads a single resource.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Loaded(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    /// Transition out of `Loading` with the outcome of the fetch.
    /// Terminal states ignore later results.
    pub fn resolve<E>(self, result: Result<T, E>, describe: impl FnOnce(E) -> String) -> Self {
        match self {
            ViewState::Loading => match result {
                Ok(data) => ViewState::Loaded(data),
                Err(err) => ViewState::Error(describe(err)),
            },
            settled => settled,
        }
    }
}

/// State of the article detail view, which additionally distinguishes a
/// bad route identifier and an empty but successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    Loading,
    InvalidId,
    Error(String),
    NotFound,
    Loaded(T),
}

impl<T> DetailState<T> {
    /// `Ok(None)` is a successful fetch without a usable record.
    pub fn resolve<E>(
        self,
        result: Result<Option<T>, E>,
        describe: impl FnOnce(E) -> String,
    ) -> Self {
        match self {
            DetailState::Loading => match result {
                Ok(Some(data)) => DetailState::Loaded(data),
                Ok(None) => DetailState::NotFound,
                Err(err) => DetailState::Error(describe(err)),
            },
            settled => settled,
        }
    }
}

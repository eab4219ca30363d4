use serde::Serialize;

/// Loading/error flags shared by both stores.
///
/// `loading` is true while the owning store has an operation in flight.
/// A store runs at most one operation at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestState {
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestState {
    /// Start an attempt: mark loading and clear the previous error.
    /// Returns `false` without touching anything if one is already running.
    pub(crate) fn try_begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    /// End an attempt, whatever its outcome
    pub(crate) fn finish(&mut self) {
        self.loading = false;
    }

    pub(crate) fn fail(&mut self, banner: String) {
        self.error = Some(banner);
    }
}

/// What a list view may show. Exactly one state applies at a time and an
/// empty `Ready` list is a valid, settled result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum DisplayState<T> {
    Loading,
    Error(String),
    Ready(Vec<T>),
}

impl<T: Clone> DisplayState<T> {
    pub fn from_parts(request: &RequestState, items: &[T]) -> Self {
        if request.loading {
            DisplayState::Loading
        } else if let Some(ref error) = request.error {
            DisplayState::Error(error.clone())
        } else {
            DisplayState::Ready(items.to_vec())
        }
    }
}

impl<T> DisplayState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DisplayState::Error(message) => Some(message),
            _ => None,
        }
    }
}

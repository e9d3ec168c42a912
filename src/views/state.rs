//! Display state shared by every screen

/// What a screen currently shows
///
/// Exactly one variant holds at a time. `Empty` means the data arrived and
/// nothing matched; it is never used while data is still on its way.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// No snapshot has arrived yet
    Loading,
    /// The last attempt failed; `stale` keeps whatever was shown before
    Failed { message: String, stale: Option<T> },
    /// Data arrived and nothing matched
    Empty,
    Ready(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> ViewState<T> {
    /// `Ready` for a non-empty result, `Empty` otherwise
    pub fn from_option(data: Option<T>) -> Self {
        match data {
            Some(data) => Self::Ready(data),
            None => Self::Empty,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Data to show: the ready value, or the stale value of a failure
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            Self::Failed { stale, .. } => stale.as_ref(),
            Self::Loading | Self::Empty => None,
        }
    }

    /// Failure message, if failed
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Move into `Failed`, keeping any data currently displayed
    pub fn fail(self, message: impl Into<String>) -> Self {
        let stale = match self {
            Self::Ready(data) => Some(data),
            Self::Failed { stale, .. } => stale,
            Self::Loading | Self::Empty => None,
        };
        Self::Failed {
            message: message.into(),
            stale,
        }
    }

    /// Derive another state; `f` returning `None` means nothing matched
    pub fn derive<U>(&self, f: impl Fn(&T) -> Option<U>) -> ViewState<U> {
        match self {
            Self::Loading => ViewState::Loading,
            Self::Empty => ViewState::Empty,
            Self::Ready(data) => ViewState::from_option(f(data)),
            Self::Failed { message, stale } => ViewState::Failed {
                message: message.clone(),
                stale: stale.as_ref().and_then(f),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_states() -> Vec<ViewState<u32>> {
        vec![
            ViewState::Loading,
            ViewState::Failed {
                message: "boom".into(),
                stale: Some(1),
            },
            ViewState::Empty,
            ViewState::Ready(2),
        ]
    }

    #[test]
    fn test_states_are_mutually_exclusive() {
        for state in all_states() {
            let flags = [
                state.is_loading(),
                state.is_failed(),
                state.is_empty(),
                state.is_ready(),
            ];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{:?}", state);
        }
    }

    #[test]
    fn test_fail_keeps_displayed_data() {
        let failed = ViewState::Ready(5).fail("network down");
        assert_eq!(failed.data(), Some(&5));
        assert_eq!(failed.message(), Some("network down"));

        let failed_again = failed.fail("still down");
        assert_eq!(failed_again.data(), Some(&5));
        assert_eq!(failed_again.message(), Some("still down"));

        let from_loading: ViewState<u32> = ViewState::Loading.fail("nope");
        assert_eq!(from_loading.data(), None);
    }

    #[test]
    fn test_derive() {
        let ready = ViewState::Ready(vec![1, 2, 3]);
        assert_eq!(ready.derive(|v| Some(v.len())), ViewState::Ready(3));
        assert_eq!(
            ready.derive(|_| None::<usize>),
            ViewState::Empty
        );

        let failed = ViewState::Ready(vec![1]).fail("x");
        assert_eq!(
            failed.derive(|v| Some(v.len())),
            ViewState::Failed {
                message: "x".into(),
                stale: Some(1)
            }
        );

        let loading: ViewState<Vec<u32>> = ViewState::Loading;
        assert!(loading.derive(|v| Some(v.len())).is_loading());
    }
}

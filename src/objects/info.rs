use std::any::Any;
use std::fmt;

type ReleaseFn = Box<dyn FnOnce(Box<dyn Any>)>;

/// Caller-defined tag attached to a [`Body`](super::Body).
///
/// Holds any `'static` value plus an optional release hook. The hook runs
/// exactly once, when the owning body is destroyed, and receives the value
/// back by ownership.
pub struct BodyInfo {
    payload: Box<dyn Any>,
    on_release: Option<ReleaseFn>,
}

impl BodyInfo {
    /// Wraps a value with no release hook.
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            payload: Box::new(value),
            on_release: None,
        }
    }

    /// Wraps a value and registers `release` to receive it on destruction.
    pub fn with_release<T, F>(value: T, release: F) -> Self
    where
        T: Any,
        F: FnOnce(T) + 'static,
    {
        Self {
            payload: Box::new(value),
            on_release: Some(Box::new(move |payload: Box<dyn Any>| {
                if let Ok(value) = payload.downcast::<T>() {
                    release(*value);
                }
            })),
        }
    }

    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload.downcast_mut::<T>()
    }

    /// Consumes the tag, handing the payload to the release hook if present.
    pub fn release(self) {
        if let Some(release) = self.on_release {
            release(self.payload);
        }
    }
}

impl fmt::Debug for BodyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyInfo")
            .field("has_release_hook", &self.on_release.is_some())
            .finish_non_exhaustive()
    }
}

//! Display seams written by the handler

/// The two display regions an analysis is rendered into.
///
/// Methods take `&self` so one view can be shared by concurrent handler
/// invocations; implementations provide their own interior mutability.
pub trait ResultView: Send + Sync {
    fn set_suggestion(&self, text: &str);

    fn set_rating(&self, text: &str);
}

/// Blocking, user-facing notification (the empty-input alert).
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

impl<T: ResultView + ?Sized> ResultView for std::sync::Arc<T> {
    fn set_suggestion(&self, text: &str) {
        (**self).set_suggestion(text)
    }

    fn set_rating(&self, text: &str) {
        (**self).set_rating(text)
    }
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

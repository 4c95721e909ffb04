use std::cell::Cell;
use std::rc::Rc;
use web_sys::{AbortController, AbortSignal};
use yew::prelude::*;

/// Cancellation handle shared by every request a view starts.
///
/// Cancelling aborts in-flight fetches through the attached `AbortSignal`
/// and tells completions to drop their results instead of touching state
/// of a view that is gone.
#[derive(Clone, Default)]
pub struct RequestScope {
    cancelled: Rc<Cell<bool>>,
    controller: Option<AbortController>,
}

impl RequestScope {
    pub fn new() -> Self {
        let controller = AbortController::new()
            .map_err(|e| log::warn!("AbortController unavailable: {:?}", e))
            .ok();
        Self {
            cancelled: Rc::default(),
            controller,
        }
    }

    /// A scope without an abort signal; only the cancelled flag is tracked.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn signal(&self) -> Option<AbortSignal> {
        self.controller.as_ref().map(AbortController::signal)
    }

    pub fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl PartialEq for RequestScope {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

/// Scope tied to the calling component; cancelled when it unmounts.
#[hook]
pub fn use_request_scope() -> RequestScope {
    let scope = use_memo((), |_| RequestScope::new());

    {
        let scope = scope.clone();
        use_effect_with((), move |_| move || scope.cancel());
    }

    (*scope).clone()
}

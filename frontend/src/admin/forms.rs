//! Shared submission flow for every admin form.
//!
//! A form moves `Idle -> Submitting -> Success | Failure -> Idle`. Validation
//! runs before `Submitting`; a rejected form never reaches the client.
//! Success resets the fields, failure keeps them for a retry. Whatever
//! notification the outcome produced is dismissed after
//! [`NOTIFICATION_WINDOW`], unless a newer one replaced it in the meantime.

use crate::admin::api::{ApiContext, CatalogApi};
use crate::admin::errors::ApiError;
use crate::cancel::RequestScope;
use crate::utils::set_timeout;
use async_trait::async_trait;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use yew::prelude::*;

pub const NOTIFICATION_WINDOW: Duration = Duration::from_secs(4);

static NEXT_NOTIFICATION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notification {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            id: NEXT_NOTIFICATION_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Failure, message)
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Success,
    Failure,
}

/// Field values of one form and how to submit them.
#[async_trait(?Send)]
pub trait FormFields: Clone + PartialEq + Default + 'static {
    /// Validated payload handed to the client.
    type Request: 'static;
    /// What a successful call yields to the page.
    type Output: 'static;

    fn validate(&self) -> Result<Self::Request, String>;

    async fn send(
        &self,
        api: &dyn CatalogApi,
        request: &Self::Request,
        token: Option<&str>,
        scope: &RequestScope,
    ) -> Result<Self::Output, ApiError>;

    fn success_message(&self, request: &Self::Request) -> String;

    /// Values after a successful submission.
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Values after the user asks to clear the form.
    fn clear(&mut self) {
        self.reset();
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionForm<F> {
    pub fields: F,
    pub phase: Phase,
    pub notification: Option<Notification>,
}

pub enum FormAction<F> {
    Edit(Box<dyn FnOnce(&mut F)>),
    Clear,
    Begin,
    /// Validation failed; nothing was sent.
    Rejected(Notification),
    Finish(Notification),
    Dismiss(u64),
}

impl<F: FormFields> SubmissionForm<F> {
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn apply(&mut self, action: FormAction<F>) {
        match action {
            FormAction::Edit(edit) => edit(&mut self.fields),
            FormAction::Clear => self.fields.clear(),
            FormAction::Begin => {
                if !self.is_submitting() {
                    self.phase = Phase::Submitting;
                    self.notification = None;
                }
            }
            FormAction::Rejected(notification) => {
                if !self.is_submitting() {
                    self.phase = Phase::Idle;
                    self.notification = Some(notification);
                }
            }
            FormAction::Finish(notification) => {
                if !self.is_submitting() {
                    log::debug!("Dropping completion for a form that is not submitting");
                    return;
                }
                if notification.is_success() {
                    self.fields.reset();
                    self.phase = Phase::Success;
                } else {
                    self.phase = Phase::Failure;
                }
                self.notification = Some(notification);
            }
            FormAction::Dismiss(id) => {
                if self.notification.as_ref().is_some_and(|n| n.id == id) {
                    self.notification = None;
                    if !self.is_submitting() {
                        self.phase = Phase::Idle;
                    }
                }
            }
        }
    }
}

impl<F: FormFields> Reducible for SubmissionForm<F> {
    type Action = FormAction<F>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

pub struct Completion<T> {
    pub notification: Notification,
    pub output: Option<T>,
}

pub fn prepare<F: FormFields>(fields: &F) -> Result<F::Request, Notification> {
    fields.validate().map_err(Notification::failure)
}

pub async fn complete<F: FormFields>(
    fields: &F,
    request: &F::Request,
    api: &dyn CatalogApi,
    token: Option<&str>,
    scope: &RequestScope,
) -> Completion<F::Output> {
    match fields.send(api, request, token, scope).await {
        Ok(output) => Completion {
            notification: Notification::success(fields.success_message(request)),
            output: Some(output),
        },
        Err(e) => Completion {
            notification: Notification::failure(e.to_string()),
            output: None,
        },
    }
}

/// Validate and send in one go. `Err` means the client was never called.
pub async fn run_submission<F: FormFields>(
    fields: &F,
    api: &dyn CatalogApi,
    token: Option<&str>,
    scope: &RequestScope,
) -> Result<Completion<F::Output>, Notification> {
    let request = prepare(fields)?;
    Ok(complete(fields, &request, api, token, scope).await)
}

pub type FormHandle<F> = UseReducerHandle<SubmissionForm<F>>;

#[hook]
pub fn use_submission_form<F: FormFields>() -> FormHandle<F> {
    use_reducer(SubmissionForm::<F>::default)
}

/// Applies an edit to the current field values.
pub fn edit<F: FormFields>(form: &FormHandle<F>, f: impl FnOnce(&mut F) + 'static) {
    form.dispatch(FormAction::Edit(Box::new(f)));
}

/// Runs the whole flow for `form` on the browser event loop.
pub fn submit_form<F: FormFields>(
    form: FormHandle<F>,
    api: ApiContext,
    token: Option<String>,
    scope: RequestScope,
    on_success: Callback<F::Output>,
) {
    if form.is_submitting() {
        return;
    }

    let fields = form.fields.clone();
    let request = match prepare(&fields) {
        Ok(request) => request,
        Err(notification) => {
            let id = notification.id;
            form.dispatch(FormAction::Rejected(notification));
            schedule_dismiss(form, scope, id);
            return;
        }
    };

    form.dispatch(FormAction::Begin);
    wasm_bindgen_futures::spawn_local(async move {
        let completion = complete(&fields, &request, api.0.as_ref(), token.as_deref(), &scope).await;
        if scope.is_cancelled() {
            log::debug!("View closed before the response arrived");
            return;
        }

        let id = completion.notification.id;
        form.dispatch(FormAction::Finish(completion.notification));
        if let Some(output) = completion.output {
            on_success.emit(output);
        }
        schedule_dismiss(form, scope, id);
    });
}

fn schedule_dismiss<F: FormFields>(form: FormHandle<F>, scope: RequestScope, id: u64) {
    set_timeout(NOTIFICATION_WINDOW, move || {
        if !scope.is_cancelled() {
            form.dispatch(FormAction::Dismiss(id));
        }
    });
}

/// Page-level notification for actions that are not a form (loading lists,
/// deleting entries).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoticeBoard {
    pub current: Option<Notification>,
}

pub enum NoticeAction {
    Show(Notification),
    Dismiss(u64),
}

impl Reducible for NoticeBoard {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            NoticeAction::Show(notification) => Rc::new(Self {
                current: Some(notification),
            }),
            NoticeAction::Dismiss(id) if self.current.as_ref().is_some_and(|n| n.id == id) => {
                Rc::new(Self { current: None })
            }
            NoticeAction::Dismiss(_) => self,
        }
    }
}

/// The more recent of two notifications, for pages with more than one source.
pub fn newest(a: Option<Notification>, b: Option<Notification>) -> Option<Notification> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a.id >= b.id { a } else { b }),
        (a, b) => a.or(b),
    }
}

pub fn notify(board: &UseReducerHandle<NoticeBoard>, scope: &RequestScope, notification: Notification) {
    let id = notification.id;
    board.dispatch(NoticeAction::Show(notification));

    let board = board.clone();
    let scope = scope.clone();
    set_timeout(NOTIFICATION_WINDOW, move || {
        if !scope.is_cancelled() {
            board.dispatch(NoticeAction::Dismiss(id));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Note {
        text: String,
    }

    #[async_trait(?Send)]
    impl FormFields for Note {
        type Request = String;
        type Output = ();

        fn validate(&self) -> Result<String, String> {
            if self.text.trim().is_empty() {
                Err("Text is required".to_string())
            } else {
                Ok(self.text.clone())
            }
        }

        async fn send(
            &self,
            api: &dyn CatalogApi,
            _request: &String,
            _token: Option<&str>,
            scope: &RequestScope,
        ) -> Result<(), ApiError> {
            api.list_movies(scope).await.map(|_| ())
        }

        fn success_message(&self, request: &String) -> String {
            format!("Saved {request}")
        }
    }

    fn form(text: &str) -> SubmissionForm<Note> {
        SubmissionForm {
            fields: Note {
                text: text.to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn notification_window_is_four_seconds() {
        assert_eq!(NOTIFICATION_WINDOW, Duration::from_secs(4));
    }

    #[test]
    fn notification_ids_are_unique() {
        let a = Notification::success("a");
        let b = Notification::failure("b");
        assert_ne!(a.id, b.id);
        assert!(a.is_success());
        assert!(!b.is_success());
    }

    #[test]
    fn success_resets_fields_and_failure_keeps_them() {
        let mut ok = form("hello");
        ok.apply(FormAction::Begin);
        assert_eq!(ok.phase, Phase::Submitting);
        ok.apply(FormAction::Finish(Notification::success("done")));
        assert_eq!(ok.phase, Phase::Success);
        assert_eq!(ok.fields, Note::default());

        let mut failed = form("hello");
        failed.apply(FormAction::Begin);
        failed.apply(FormAction::Finish(Notification::failure("nope")));
        assert_eq!(failed.phase, Phase::Failure);
        assert_eq!(failed.fields.text, "hello");
    }

    #[test]
    fn only_the_current_notification_is_dismissed() {
        let mut f = form("x");
        f.apply(FormAction::Begin);
        let first = Notification::success("first");
        let first_id = first.id;
        f.apply(FormAction::Finish(first));

        f.apply(FormAction::Begin);
        let second = Notification::failure("second");
        let second_id = second.id;
        f.apply(FormAction::Finish(second));

        f.apply(FormAction::Dismiss(first_id));
        assert_eq!(f.notification.as_ref().map(|n| n.id), Some(second_id));
        assert_eq!(f.phase, Phase::Failure);

        f.apply(FormAction::Dismiss(second_id));
        assert_eq!(f.notification, None);
        assert_eq!(f.phase, Phase::Idle);
    }

    #[test]
    fn second_begin_while_submitting_is_ignored() {
        let mut f = form("x");
        f.apply(FormAction::Begin);
        f.apply(FormAction::Rejected(Notification::failure("late")));
        f.apply(FormAction::Begin);
        assert_eq!(f.phase, Phase::Submitting);
        assert_eq!(f.notification, None);
    }

    #[test]
    fn completion_without_submission_is_dropped() {
        let mut f = form("keep me");
        f.apply(FormAction::Finish(Notification::success("stray")));
        assert_eq!(f.phase, Phase::Idle);
        assert_eq!(f.fields.text, "keep me");
        assert_eq!(f.notification, None);
    }

    #[test]
    fn reducer_matches_apply() {
        let state = Rc::new(form("a"));
        let next = state.reduce(FormAction::Edit(Box::new(|n: &mut Note| {
            n.text.push('b')
        })));
        assert_eq!(next.fields.text, "ab");
        let cleared = next.reduce(FormAction::Clear);
        assert_eq!(cleared.fields.text, "");
    }

    #[tokio::test]
    async fn rejected_submission_never_calls_the_client() {
        let api = FakeApi::default();
        let outcome = run_submission(&Note::default(), &api, None, &RequestScope::detached()).await;
        let notification = outcome.err().unwrap();
        assert_eq!(notification.message, "Text is required");
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn accepted_submission_calls_once_and_reports() {
        let api = FakeApi::default();
        let note = Note {
            text: "hi".to_string(),
        };
        let completion = run_submission(&note, &api, None, &RequestScope::detached())
            .await
            .ok()
            .unwrap();
        assert_eq!(api.call_count(), 1);
        assert!(completion.notification.is_success());
        assert_eq!(completion.notification.message, "Saved hi");
        assert!(completion.output.is_some());
    }

    #[tokio::test]
    async fn client_errors_become_failure_notifications() {
        let api = FakeApi::failing(ApiError::Network("Server down".to_string()));
        let note = Note {
            text: "hi".to_string(),
        };
        let completion = run_submission(&note, &api, None, &RequestScope::detached())
            .await
            .ok()
            .unwrap();
        assert!(!completion.notification.is_success());
        assert_eq!(completion.notification.message, "Server down");
        assert!(completion.output.is_none());
    }

    #[test]
    fn notice_board_dismisses_only_its_own_notice() {
        let board = Rc::new(NoticeBoard::default());
        let shown = Notification::failure("Failed");
        let id = shown.id;
        let board = board.reduce(NoticeAction::Show(shown));
        let board = board.reduce(NoticeAction::Dismiss(id + 1000));
        assert!(board.current.is_some());
        let board = board.reduce(NoticeAction::Dismiss(id));
        assert!(board.current.is_none());
    }

    #[test]
    fn newest_notification_wins() {
        let form_notice = Notification::success("Added as Movie of the Week successfully!");
        let reload_failure = Notification::failure("Server error while fetching");
        assert_eq!(
            newest(Some(form_notice.clone()), Some(reload_failure.clone())),
            Some(reload_failure.clone())
        );
        assert_eq!(newest(None, Some(form_notice.clone())), Some(form_notice.clone()));
        assert_eq!(newest(Some(form_notice.clone()), None), Some(form_notice));
        assert_eq!(newest(None, None), None);
    }
}

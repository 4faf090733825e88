use reedline::{Prompt, PromptEditMode, PromptHistorySearch};
use std::borrow::Cow;

use phonebook::{ContactCollectionState, ContactStore, Status};

/// Shows the active filter on the left and the outcome of the last
/// request on the right, read from the store on every redraw.
pub(crate) struct PhonebookPrompt {
    store: ContactStore,
}

impl PhonebookPrompt {
    pub(crate) fn new(store: &ContactStore) -> Self {
        Self { store: store.clone() }
    }
}

fn left_text(state: &ContactCollectionState) -> String {
    match state.filter().trim() {
        "" => "phonebook> ".to_string(),
        filter => format!("phonebook[{}]> ", filter),
    }
}

fn right_text(state: &ContactCollectionState) -> String {
    match state.status() {
        Status::Idle | Status::Succeeded => {
            let stats = state.stats();
            match stats.has_active_filter {
                true => format!("{} of {}", stats.shown, stats.total),
                false => format!("{} contacts", stats.total),
            }
        }
        Status::Loading => "loading...".to_string(),
        Status::Failed => format!("failed: {}", state.error().unwrap_or("unknown error")),
    }
}

impl Prompt for PhonebookPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        left_text(&self.store.snapshot()).into()
    }

    fn render_prompt_right(&self) -> Cow<str> {
        right_text(&self.store.snapshot()).into()
    }

    fn render_prompt_indicator(&self, _: PromptEditMode) -> Cow<str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(&self, _: PromptHistorySearch) -> Cow<str> {
        "".into()
    }
}

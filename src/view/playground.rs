use std::sync::Arc;

use crate::gateway::{GatewayError, KeyStore};
use crate::keys::{ApiKeyRecord, KeyType, display_rank, is_inactive, masked_key, to_short_type};
use crate::view::toast::{ToastKind, ToastState};

/// Draft fields while a row is being edited. Discarded on cancel.
#[derive(Debug, Clone)]
pub struct EditDraft {
    pub name: String,
    pub key_type: KeyType,
}

/// Draft fields of the create modal.
#[derive(Debug, Clone)]
pub struct CreateDraft {
    pub name: String,
    pub key_type: KeyType,
}

impl Default for CreateDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            key_type: KeyType::Development,
        }
    }
}

/// One table row: the stored record plus transient view state.
#[derive(Debug, Clone)]
pub struct KeyRow {
    pub record: ApiKeyRecord,
    /// Derived display code: "dev"/"prod"/"test", or "inactive" once the
    /// usage threshold is crossed.
    pub short_type: String,
    pub show_key: bool,
    pub editing: Option<EditDraft>,
}

impl KeyRow {
    fn new(record: ApiKeyRecord) -> Self {
        let short_type = derived_short_type(&record);
        Self {
            record,
            short_type,
            show_key: false,
            editing: None,
        }
    }

    pub fn is_inactive(&self) -> bool {
        is_inactive(&self.record) || self.short_type == "inactive"
    }

    /// The key cell as rendered: full token or its masked form.
    pub fn displayed_key(&self) -> String {
        if self.show_key {
            self.record.key.clone()
        } else {
            masked_key(&self.record.key)
        }
    }
}

fn derived_short_type(record: &ApiKeyRecord) -> String {
    if is_inactive(record) {
        "inactive".to_string()
    } else {
        to_short_type(record.key_type.as_full_word())
    }
}

/// Summary figures shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub total_usage: i64,
    pub active: usize,
}

/// The API key playground's whole interactive state. All mutations go
/// through `&mut self`, so the row list has a single writer; store round
/// trips happen inside the mutating call.
pub struct Playground {
    store: Arc<dyn KeyStore>,
    rows: Vec<KeyRow>,
    create_draft: Option<CreateDraft>,
    pending_delete: Option<String>,
    toast: ToastState,
}

impl Playground {
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self {
            store,
            rows: Vec::new(),
            create_draft: None,
            pending_delete: None,
            toast: ToastState::new(),
        }
    }

    /// Fetch all records from the store. On failure the rows are left
    /// unchanged and an error toast is raised.
    pub async fn load(&mut self) {
        let result = self.store.list().await;
        match result {
            Ok(records) => {
                self.rows = records.into_iter().map(KeyRow::new).collect();
            }
            Err(_) => {
                self.toast.show("Failed to fetch API keys.", ToastKind::Error);
            }
        }
    }

    pub fn rows(&self) -> &[KeyRow] {
        &self.rows
    }

    /// Rows in display order: active newest-first, then inactive
    /// newest-first.
    pub fn sorted_rows(&self) -> Vec<&KeyRow> {
        let mut rows: Vec<&KeyRow> = self.rows.iter().collect();
        rows.sort_by_key(|r| display_rank(r.is_inactive(), r.record.created_at));
        rows
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total: self.rows.len(),
            total_usage: self.rows.iter().map(|r| r.record.usage).sum(),
            active: self.rows.iter().filter(|r| !r.is_inactive()).count(),
        }
    }

    pub fn toast(&self) -> &ToastState {
        &self.toast
    }

    fn row(&self, id: &str) -> Option<&KeyRow> {
        self.rows.iter().find(|r| r.record.id == id)
    }

    fn row_mut(&mut self, id: &str) -> Option<&mut KeyRow> {
        self.rows.iter_mut().find(|r| r.record.id == id)
    }

    // ----- key visibility -----

    pub fn toggle_key_visibility(&mut self, id: &str) {
        if let Some(row) = self.row_mut(id) {
            row.show_key = !row.show_key;
        }
    }

    pub fn displayed_key(&self, id: &str) -> Option<String> {
        self.row(id).map(KeyRow::displayed_key)
    }

    // ----- edit flow -----

    /// Enter edit mode. Inactive rows are read-only and stay in viewing
    /// state.
    pub fn begin_edit(&mut self, id: &str) {
        if let Some(row) = self.row_mut(id) {
            if row.is_inactive() {
                return;
            }
            row.editing = Some(EditDraft {
                name: row.record.name.clone(),
                key_type: row.record.key_type,
            });
        }
    }

    pub fn set_edited_name(&mut self, id: &str, name: impl Into<String>) {
        if let Some(draft) = self.row_mut(id).and_then(|r| r.editing.as_mut()) {
            draft.name = name.into();
        }
    }

    pub fn set_edited_type(&mut self, id: &str, key_type: KeyType) {
        if let Some(draft) = self.row_mut(id).and_then(|r| r.editing.as_mut()) {
            draft.key_type = key_type;
        }
    }

    /// Enter pressed: push the draft through the store, then apply it to
    /// the local cache. The row stays in edit mode if the call fails.
    pub async fn commit_edit(&mut self, id: &str) {
        let Some(draft) = self.row(id).and_then(|r| r.editing.clone()) else {
            return;
        };
        let result = self.store.rename(id, &draft.name, draft.key_type).await;
        match result {
            Ok(()) => {
                if let Some(row) = self.row_mut(id) {
                    row.record.name = draft.name;
                    row.record.key_type = draft.key_type;
                    row.short_type = derived_short_type(&row.record);
                    row.editing = None;
                }
                self.toast
                    .show("API Key updated successfully!", ToastKind::Update);
            }
            Err(_) => {
                self.toast.show("Failed to update API key.", ToastKind::Error);
            }
        }
    }

    /// Escape pressed: drop the draft without any store call.
    pub fn cancel_edit(&mut self, id: &str) {
        if let Some(row) = self.row_mut(id) {
            row.editing = None;
        }
        self.toast.show("Edit cancelled.", ToastKind::Update);
    }

    // ----- create flow -----

    pub fn open_create(&mut self) {
        self.create_draft = Some(CreateDraft::default());
    }

    pub fn is_creating(&self) -> bool {
        self.create_draft.is_some()
    }

    pub fn set_new_key_name(&mut self, name: impl Into<String>) {
        if let Some(draft) = self.create_draft.as_mut() {
            draft.name = name.into();
        }
    }

    pub fn set_new_key_type(&mut self, key_type: KeyType) {
        if let Some(draft) = self.create_draft.as_mut() {
            draft.key_type = key_type;
        }
    }

    /// Form submitted: validate locally, then create through the store
    /// and append the new record. The modal stays open on failure.
    pub async fn submit_create(&mut self) {
        let Some(draft) = self.create_draft.clone() else {
            return;
        };
        if draft.name.trim().is_empty() {
            self.toast
                .show("Key Name cannot be empty.", ToastKind::Error);
            return;
        }
        let result = self.store.create(&draft.name, draft.key_type).await;
        match result {
            Ok(record) => {
                self.rows.push(KeyRow::new(record));
                self.create_draft = None;
                self.toast
                    .show("API Key created successfully!", ToastKind::Success);
            }
            Err(GatewayError::Validation { message }) => {
                self.toast.show(message, ToastKind::Error);
            }
            Err(_) => {
                self.toast.show("Failed to create API key.", ToastKind::Error);
            }
        }
    }

    pub fn close_create(&mut self) {
        self.create_draft = None;
    }

    // ----- delete flow -----

    /// Open the confirm dialog. Ignored for inactive rows; no store call
    /// is ever issued for them.
    pub fn request_delete(&mut self, id: &str) {
        if let Some(row) = self.row(id) {
            if !row.is_inactive() {
                self.pending_delete = Some(id.to_string());
            }
        }
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.clone() else {
            return;
        };
        let deletable = self.row(&id).is_some_and(|r| !r.is_inactive());
        if !deletable {
            return;
        }
        let result = self.store.delete(&id).await;
        match result {
            Ok(()) => {
                self.rows.retain(|r| r.record.id != id);
                self.pending_delete = None;
                // the delete toast renders in the red style
                self.toast
                    .show("API Key deleted successfully!", ToastKind::Error);
            }
            Err(_) => {
                self.toast.show("Failed to delete API key.", ToastKind::Error);
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

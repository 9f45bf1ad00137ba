use serde::Serialize;

use crate::domain::entity::Entity;

/// Actions understood by every entity store
#[derive(Debug, Clone, PartialEq)]
pub enum EntityAction<T> {
    FetchStart,
    /// Replaces the whole collection
    FetchSuccess(Vec<T>),
    FetchFailure(String),
    Add(T),
    Update(T),
    Delete(String),
    Select(String),
    ClearSelection,
}

/// Normalized in-memory collection of one entity type
///
/// # Invariants
/// - Insertion order is preserved; `Update` keeps the record's position
/// - `Update`/`Delete` on an unknown id leave the collection untouched
/// - `selected` only ever points at an id that existed when it was selected
///
/// `Add` performs no uniqueness check. With duplicate ids, `Update` replaces
/// the first match and `Delete` removes all of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStore<T> {
    items: Vec<T>,
    selected: Option<String>,
    is_loading: bool,
    error: Option<String>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            is_loading: false,
            error: None,
        }
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action. Never fails.
    pub fn reduce(&mut self, action: EntityAction<T>) {
        match action {
            EntityAction::FetchStart => {
                self.is_loading = true;
                self.error = None;
            }
            EntityAction::FetchSuccess(items) => {
                self.is_loading = false;
                self.error = None;
                self.items = items;
            }
            EntityAction::FetchFailure(message) => {
                self.is_loading = false;
                self.error = Some(message);
            }
            EntityAction::Add(item) => self.items.push(item),
            EntityAction::Update(item) => {
                match self.items.iter().position(|existing| existing.id() == item.id()) {
                    Some(index) => self.items[index] = item,
                    None => tracing::debug!("update of unknown {} {} ignored", T::KIND, item.id()),
                }
            }
            EntityAction::Delete(id) => {
                let before = self.items.len();
                self.items.retain(|item| item.id() != id);
                if self.items.len() == before {
                    tracing::debug!("delete of unknown {} {} ignored", T::KIND, id);
                }
            }
            EntityAction::Select(id) => {
                self.selected = self.get(&id).map(|item| item.id().to_string());
            }
            EntityAction::ClearSelection => self.selected = None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The selected record, if it still exists
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

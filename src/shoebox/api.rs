//! # API Facade
//!
//! The API layer is a **thin facade** over the stores, sessions and query
//! engine. It is the single entry point a view renderer talks to.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Dispatches** to the record store, edit session or query engine
//! - **Owns** the shared backend and the per-domain state
//! - **Returns structured types** (`Result<Record<...>>`, `Vec<Record<...>>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that lives in `store::records`, `query` and the
//!   domain descriptors
//! - **I/O or presentation**: no stdout, no markup, no prompts — the
//!   deletion confirmation gate in particular belongs to the renderer;
//!   `remove_*` is the post-confirmation entry point
//!
//! ## Generic Over BlobStore
//!
//! `Shoebox<B: BlobStore>` is generic over the storage backend:
//! - Production: `Shoebox<FileBackend>`
//! - Testing: `Shoebox<MemBackend>`

use crate::domain::{
    Note, NoteDraft, NoteFields, Product, ProductDraft, ProductFields, Todo, TodoDraft, TodoFields,
};
use crate::error::Result;
use crate::model::{Record, RecordId};
use crate::query::{self, ViewQuery};
use crate::session::EditSession;
use crate::store::records::RecordStore;
use crate::store::BlobStore;
use chrono::{DateTime, Utc};
use std::rc::Rc;

/// The three collections and their edit sessions over one shared backend.
pub struct Shoebox<B: BlobStore> {
    notes: RecordStore<Note, B>,
    products: RecordStore<Product, B>,
    todos: RecordStore<Todo, B>,
    note_session: EditSession<Note>,
    product_session: EditSession<Product>,
    todo_session: EditSession<Todo>,
}

impl<B: BlobStore> Shoebox<B> {
    /// Open all three collections, rehydrating them from the backend.
    pub fn open(backend: B) -> Result<Self> {
        let backend = Rc::new(backend);
        Ok(Self {
            notes: RecordStore::open(Rc::clone(&backend))?,
            products: RecordStore::open(Rc::clone(&backend))?,
            todos: RecordStore::open(Rc::clone(&backend))?,
            note_session: EditSession::new(),
            product_session: EditSession::new(),
            todo_session: EditSession::new(),
        })
    }

    // --- Notes ---

    pub fn list_notes(&self) -> &[Record<NoteFields>] {
        self.notes.list()
    }

    pub fn create_note(&mut self, draft: &NoteDraft) -> Result<Record<NoteFields>> {
        self.notes.create(draft)
    }

    pub fn update_note(&mut self, id: RecordId, draft: &NoteDraft) -> Result<Record<NoteFields>> {
        self.notes.update(id, draft)
    }

    pub fn remove_note(&mut self, id: RecordId) -> Result<()> {
        self.notes.remove(id)
    }

    pub fn toggle_note_pinned(&mut self, id: RecordId) -> Result<bool> {
        self.notes.toggle(id)
    }

    pub fn query_notes(&self, query: &ViewQuery<Note>) -> Vec<Record<NoteFields>> {
        self.query_notes_at(query, Utc::now())
    }

    pub fn query_notes_at(
        &self,
        query: &ViewQuery<Note>,
        now: DateTime<Utc>,
    ) -> Vec<Record<NoteFields>> {
        query::run(self.notes.list(), query, now)
    }

    pub fn note_session(&self) -> &EditSession<Note> {
        &self.note_session
    }

    pub fn begin_note_create(&mut self) {
        self.note_session.begin_create();
    }

    pub fn begin_note_edit(&mut self, id: RecordId) -> Result<NoteDraft> {
        Ok(self.note_session.begin_edit(&self.notes, id)?.clone())
    }

    pub fn commit_note(&mut self, draft: &NoteDraft) -> Result<Record<NoteFields>> {
        self.note_session.commit(&mut self.notes, draft)
    }

    pub fn cancel_note_edit(&mut self) {
        self.note_session.cancel();
    }

    // --- Products ---

    pub fn list_products(&self) -> &[Record<ProductFields>] {
        self.products.list()
    }

    pub fn create_product(&mut self, draft: &ProductDraft) -> Result<Record<ProductFields>> {
        self.products.create(draft)
    }

    pub fn update_product(
        &mut self,
        id: RecordId,
        draft: &ProductDraft,
    ) -> Result<Record<ProductFields>> {
        self.products.update(id, draft)
    }

    pub fn remove_product(&mut self, id: RecordId) -> Result<()> {
        self.products.remove(id)
    }

    pub fn query_products(&self, query: &ViewQuery<Product>) -> Vec<Record<ProductFields>> {
        self.query_products_at(query, Utc::now())
    }

    pub fn query_products_at(
        &self,
        query: &ViewQuery<Product>,
        now: DateTime<Utc>,
    ) -> Vec<Record<ProductFields>> {
        query::run(self.products.list(), query, now)
    }

    pub fn product_session(&self) -> &EditSession<Product> {
        &self.product_session
    }

    pub fn begin_product_create(&mut self) {
        self.product_session.begin_create();
    }

    pub fn begin_product_edit(&mut self, id: RecordId) -> Result<ProductDraft> {
        Ok(self.product_session.begin_edit(&self.products, id)?.clone())
    }

    pub fn commit_product(&mut self, draft: &ProductDraft) -> Result<Record<ProductFields>> {
        self.product_session.commit(&mut self.products, draft)
    }

    pub fn cancel_product_edit(&mut self) {
        self.product_session.cancel();
    }

    // --- To-dos ---

    pub fn list_todos(&self) -> &[Record<TodoFields>] {
        self.todos.list()
    }

    pub fn create_todo(&mut self, draft: &TodoDraft) -> Result<Record<TodoFields>> {
        self.todos.create(draft)
    }

    pub fn update_todo(&mut self, id: RecordId, draft: &TodoDraft) -> Result<Record<TodoFields>> {
        self.todos.update(id, draft)
    }

    pub fn remove_todo(&mut self, id: RecordId) -> Result<()> {
        self.todos.remove(id)
    }

    pub fn toggle_todo_completed(&mut self, id: RecordId) -> Result<bool> {
        self.todos.toggle(id)
    }

    pub fn query_todos(&self, query: &ViewQuery<Todo>) -> Vec<Record<TodoFields>> {
        self.query_todos_at(query, Utc::now())
    }

    /// Query the to-dos at an explicit instant. The scheduled refresh uses
    /// this so a recomputation is a pure function of its tick time.
    pub fn query_todos_at(
        &self,
        query: &ViewQuery<Todo>,
        now: DateTime<Utc>,
    ) -> Vec<Record<TodoFields>> {
        query::run(self.todos.list(), query, now)
    }

    pub fn todo_session(&self) -> &EditSession<Todo> {
        &self.todo_session
    }

    pub fn begin_todo_create(&mut self) {
        self.todo_session.begin_create();
    }

    pub fn begin_todo_edit(&mut self, id: RecordId) -> Result<TodoDraft> {
        Ok(self.todo_session.begin_edit(&self.todos, id)?.clone())
    }

    pub fn commit_todo(&mut self, draft: &TodoDraft) -> Result<Record<TodoFields>> {
        self.todo_session.commit(&mut self.todos, draft)
    }

    pub fn cancel_todo_edit(&mut self) {
        self.todo_session.cancel();
    }
}

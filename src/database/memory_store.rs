//! Store em memória para testes do serviço e dos handlers.

use crate::{
    database::{UpdateOutcome, UsuarioStore},
    models::UsuarioDocument,
    utils::error::AppError,
};
use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Document};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryUsuarioStore {
    docs: Mutex<Vec<Document>>,
    calls: AtomicUsize,
    failing: bool,
}

impl MemoryUsuarioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store em que toda operação falha como se o banco estivesse fora do ar
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    /// Quantas operações chegaram ao store
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn raw(&self, id: ObjectId) -> Option<Document> {
        self.docs
            .lock()
            .await
            .iter()
            .find(|d| d.get_object_id("_id").ok() == Some(id))
            .cloned()
    }

    fn enter(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(AppError::DatabaseError("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UsuarioStore for MemoryUsuarioStore {
    async fn insert_one(&self, usuario: UsuarioDocument) -> Result<ObjectId, AppError> {
        self.enter()?;
        let id = ObjectId::new();
        let mut doc = bson::to_document(&usuario)?;
        doc.insert("_id", id);
        self.docs.lock().await.push(doc);
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Document>, AppError> {
        self.enter()?;
        Ok(self.docs.lock().await.clone())
    }

    async fn find_one(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        self.enter()?;
        Ok(self.raw(id).await)
    }

    async fn update_one(&self, id: ObjectId, set: Document) -> Result<UpdateOutcome, AppError> {
        self.enter()?;
        let mut docs = self.docs.lock().await;
        let Some(doc) = docs.iter_mut().find(|d| d.get_object_id("_id").ok() == Some(id)) else {
            return Ok(UpdateOutcome::default());
        };

        let mut modified = false;
        for (key, value) in set {
            if doc.get(&key) != Some(&value) {
                doc.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateOutcome { matched_count: 1, modified_count: u64::from(modified) })
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError> {
        self.enter()?;
        let mut docs = self.docs.lock().await;
        match docs.iter().position(|d| d.get_object_id("_id").ok() == Some(id)) {
            Some(pos) => {
                docs.remove(pos);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.enter()
    }
}

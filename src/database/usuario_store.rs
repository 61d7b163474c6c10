use crate::{
    database::MongoDB,
    models::UsuarioDocument,
    utils::error::AppError,
};
use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Client, Collection,
};

/// Contadores devolvidos pelo `update_one`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Operações de armazenamento usadas pelo serviço de usuários.
/// Cada método corresponde a uma única operação no banco.
#[async_trait]
pub trait UsuarioStore: Send + Sync {
    async fn insert_one(&self, usuario: UsuarioDocument) -> Result<ObjectId, AppError>;

    /// Todos os documentos, na ordem de iteração do banco
    async fn find_all(&self) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, id: ObjectId) -> Result<Option<Document>, AppError>;

    /// Merge parcial (`$set`): só as chaves de `set` são tocadas
    async fn update_one(&self, id: ObjectId, set: Document) -> Result<UpdateOutcome, AppError>;

    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

/// Filtro por chave primária
fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

pub struct MongoUsuarioStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoUsuarioStore {
    pub fn new(db: &MongoDB, collection_name: &str) -> Self {
        Self {
            client: db.client().clone(),
            collection: db.collection::<Document>(collection_name),
        }
    }
}

#[async_trait]
impl UsuarioStore for MongoUsuarioStore {
    async fn insert_one(&self, usuario: UsuarioDocument) -> Result<ObjectId, AppError> {
        let typed = self.collection.clone_with_type::<UsuarioDocument>();
        let result = typed.insert_one(&usuario).await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError(format!("Unexpected inserted id: {}", result.inserted_id)))
    }

    async fn find_all(&self) -> Result<Vec<Document>, AppError> {
        let mut cursor = self.collection.find(doc! {}).await?;

        let mut docs = Vec::new();
        while let Some(result) = cursor.next().await {
            docs.push(result?);
        }

        Ok(docs)
    }

    async fn find_one(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    async fn update_one(&self, id: ObjectId, set: Document) -> Result<UpdateOutcome, AppError> {
        let result = self
            .collection
            .update_one(id_filter(id), doc! { "$set": set })
            .await?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::usuario_mapper::{build_update_set, to_stored, to_wire};
    use crate::models::UsuarioFields;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongo_store_crud_cycle() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017/".to_string());

        let db = MongoDB::new(&uri, "DressMeDB_test").await.unwrap();
        let store = MongoUsuarioStore::new(&db, "usuarios_test");

        let fields = UsuarioFields { name: "Ana".into(), email: "a@x.com".into(), ..Default::default() };
        let id = store.insert_one(to_stored(&fields, mongodb::bson::DateTime::now())).await.unwrap();

        let found = store.find_one(id).await.unwrap().unwrap();
        assert_eq!(to_wire(&found).name, "Ana");

        let set = build_update_set(&UsuarioFields { name: "Bia".into(), ..Default::default() });
        let outcome = store.update_one(id, set).await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched_count: 1, modified_count: 1 });

        assert_eq!(store.delete_one(id).await.unwrap(), 1);
        assert_eq!(store.delete_one(id).await.unwrap(), 0);
        assert!(store.find_one(id).await.unwrap().is_none());
    }
}

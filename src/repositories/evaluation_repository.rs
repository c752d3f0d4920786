use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, Document},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Evaluation, EvaluationPatch},
};

#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    async fn insert(&self, evaluation: Evaluation) -> AppResult<Evaluation>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Evaluation>>;
    /// Returns one page of evaluations newest-first, plus the total count
    /// for the same filter. `owner = None` means no ownership filter.
    async fn find_by_owner_paged(
        &self,
        owner: Option<&ObjectId>,
        skip: u64,
        limit: i64,
    ) -> AppResult<(Vec<Evaluation>, u64)>;
    /// Applies only the fields present in the patch; returns the updated
    /// record, or `None` if the id no longer matches anything.
    async fn update_fields(
        &self,
        id: &ObjectId,
        patch: &EvaluationPatch,
    ) -> AppResult<Option<Evaluation>>;
    /// Returns whether a record was actually removed.
    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
}

pub struct MongoEvaluationRepository {
    collection: Collection<Evaluation>,
}

impl MongoEvaluationRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("evaluations");
        Self { collection }
    }
}

fn patch_to_set_document(patch: &EvaluationPatch) -> AppResult<Document> {
    let mut set = Document::new();

    if let Some(title) = &patch.title {
        set.insert("title", title.as_str());
    }
    if let Some(description) = &patch.description {
        set.insert("description", description.as_str());
    }
    if let Some(score) = patch.score {
        set.insert("score", score);
    }
    if let Some(status) = &patch.status {
        set.insert("status", to_bson(status)?);
    }
    if let Some(updated_at) = &patch.updated_at {
        set.insert("updated_at", to_bson(updated_at)?);
    }

    Ok(set)
}

#[async_trait]
impl EvaluationRepository for MongoEvaluationRepository {
    async fn insert(&self, evaluation: Evaluation) -> AppResult<Evaluation> {
        self.collection.insert_one(&evaluation).await?;
        Ok(evaluation)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Evaluation>> {
        let evaluation = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(evaluation)
    }

    async fn find_by_owner_paged(
        &self,
        owner: Option<&ObjectId>,
        skip: u64,
        limit: i64,
    ) -> AppResult<(Vec<Evaluation>, u64)> {
        let filter = match owner {
            Some(owner) => doc! { "created_by": owner },
            None => doc! {},
        };

        let total = self.collection.count_documents(filter.clone()).await?;

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(Some(skip))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let items: Vec<Evaluation> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn update_fields(
        &self,
        id: &ObjectId,
        patch: &EvaluationPatch,
    ) -> AppResult<Option<Evaluation>> {
        let set = patch_to_set_document(patch)?;
        if set.is_empty() {
            return self.find_by_id(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .with_options(options)
            .await?;

        Ok(updated)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

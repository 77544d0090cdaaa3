use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{config::Config, db::Database, errors::AppResult, models::domain::Quiz};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_quiz_id(&self, quiz_id: &str) -> AppResult<Option<Quiz>>;
    async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)>;
    async fn list_quizzes_by_creator(
        &self,
        creator: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)>;
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn delete(&self, quiz_id: &str) -> AppResult<bool>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.get_collection(&config.quizzes_collection);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let quiz_id_index = IndexModel::builder()
            .keys(doc! { "quizId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(quiz_id_index).await?;

        // Compound index backing title/subject search and creator lookups.
        let lookup_index = IndexModel::builder()
            .keys(doc! { "title": 1, "subject": 1, "quizId": 1, "creator": 1 })
            .options(
                IndexOptions::builder()
                    .name("quiz_lookup".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(lookup_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_quiz_id(&self, quiz_id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "quizId": quiz_id }).await?;
        Ok(quiz)
    }

    async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        use futures::TryStreamExt;
        use mongodb::options::FindOptions;

        let total = self.collection.count_documents(doc! {}).await? as i64;

        let find_options = FindOptions::builder()
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let items: Vec<Quiz> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn list_quizzes_by_creator(
        &self,
        creator: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        use futures::TryStreamExt;
        use mongodb::options::FindOptions;

        let filter = doc! { "creator": creator };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let items: Vec<Quiz> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection
            .replace_one(doc! { "quizId": &quiz.quiz_id }, &quiz)
            .await?;
        Ok(quiz)
    }

    async fn delete(&self, quiz_id: &str) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "quizId": quiz_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

//! Passage Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CategoryRepositoryPort, PassageRepositoryPort};
use crate::application::queries::{
    CategoryEntry, CategoryListing, GetPassageById, GetPassageBySlug, ListCategory,
    ListFeaturedPassages, PassageSummary,
};
use crate::domain::passage::Passage;

/// GetPassageBySlug Handler
pub struct GetPassageBySlugHandler {
    passage_repo: Arc<dyn PassageRepositoryPort>,
}

impl GetPassageBySlugHandler {
    pub fn new(passage_repo: Arc<dyn PassageRepositoryPort>) -> Self {
        Self { passage_repo }
    }

    pub async fn handle(&self, query: GetPassageBySlug) -> Result<Passage, ApplicationError> {
        let record = self
            .passage_repo
            .find_by_slug(&query.slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Passage", &query.slug))?;

        Ok(Passage::try_from(record)?)
    }
}

/// GetPassageById Handler
pub struct GetPassageByIdHandler {
    passage_repo: Arc<dyn PassageRepositoryPort>,
}

impl GetPassageByIdHandler {
    pub fn new(passage_repo: Arc<dyn PassageRepositoryPort>) -> Self {
        Self { passage_repo }
    }

    pub async fn handle(&self, query: GetPassageById) -> Result<Passage, ApplicationError> {
        let record = self
            .passage_repo
            .find_by_id(query.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Passage", query.id))?;

        Ok(Passage::try_from(record)?)
    }
}

/// ListFeaturedPassages Handler
pub struct ListFeaturedPassagesHandler {
    passage_repo: Arc<dyn PassageRepositoryPort>,
}

impl ListFeaturedPassagesHandler {
    pub fn new(passage_repo: Arc<dyn PassageRepositoryPort>) -> Self {
        Self { passage_repo }
    }

    pub async fn handle(
        &self,
        query: ListFeaturedPassages,
    ) -> Result<Vec<PassageSummary>, ApplicationError> {
        let records = self.passage_repo.find_featured(query.limit).await?;
        Ok(records.into_iter().map(PassageSummary::from).collect())
    }
}

/// ListCategory Handler - 子分类在前，文章在后
pub struct ListCategoryHandler {
    category_repo: Arc<dyn CategoryRepositoryPort>,
    passage_repo: Arc<dyn PassageRepositoryPort>,
}

impl ListCategoryHandler {
    pub fn new(
        category_repo: Arc<dyn CategoryRepositoryPort>,
        passage_repo: Arc<dyn PassageRepositoryPort>,
    ) -> Self {
        Self {
            category_repo,
            passage_repo,
        }
    }

    pub async fn handle(&self, query: ListCategory) -> Result<CategoryListing, ApplicationError> {
        let category = self
            .category_repo
            .find_by_slug(&query.slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Category", &query.slug))?;

        let children = self.category_repo.find_children(category.id).await?;
        let passages = self.passage_repo.find_by_category(category.id).await?;

        let entries = children
            .into_iter()
            .map(CategoryEntry::from)
            .chain(passages.into_iter().map(CategoryEntry::from))
            .collect();

        Ok(CategoryListing {
            id: category.id,
            name: category.name,
            slug: category.slug,
            entries,
        })
    }
}

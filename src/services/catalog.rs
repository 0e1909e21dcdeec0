use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::cafe;
use crate::error::{AppError, AppResult};
use crate::forms::{CafeDraft, SearchCategory};
use crate::utils::text::title_case;

#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(cafe::Model),
    DuplicateName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<cafe::Model>),
    NoResults,
}

/// Café CRUD over an injected connection.
pub struct CatalogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CatalogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<cafe::Model>> {
        let cafes = cafe::Entity::find()
            .order_by_asc(cafe::Column::Id)
            .all(self.db)
            .await?;

        tracing::debug!(count = cafes.len(), "Listed cafes");
        Ok(cafes)
    }

    pub async fn count(&self) -> AppResult<u64> {
        Ok(cafe::Entity::find().count(self.db).await?)
    }

    /// Insert a café unless one with the same name already exists.
    ///
    /// The existence check and the insert are separate statements; the unique
    /// index on `name` rejects whichever racing insert commits second.
    pub async fn create(&self, draft: CafeDraft) -> AppResult<CreateOutcome> {
        let existing = cafe::Entity::find()
            .filter(cafe::Column::Name.eq(draft.name.as_str()))
            .one(self.db)
            .await?;

        if existing.is_some() {
            tracing::warn!(name = %draft.name, "Cafe already exists, not adding");
            return Ok(CreateOutcome::DuplicateName);
        }

        let mut active = cafe::ActiveModel {
            ..Default::default()
        };
        apply_draft(&mut active, draft);

        let created = active.insert(self.db).await?;
        tracing::info!(id = created.id, name = %created.name, "Cafe added");

        Ok(CreateOutcome::Created(created))
    }

    /// Exact-match search on the column behind `category`.
    pub async fn search(&self, category: SearchCategory, query: &str) -> AppResult<SearchOutcome> {
        let value = title_case(query);

        // A title-cased string never equals a stored boolean.
        if category.is_flag() {
            tracing::debug!(category = category.label(), value = %value, "Flag search has no matches");
            return Ok(SearchOutcome::NoResults);
        }

        let cafes = cafe::Entity::find()
            .filter(category.column().eq(value.as_str()))
            .order_by_asc(cafe::Column::Id)
            .all(self.db)
            .await?;

        tracing::debug!(
            category = category.label(),
            value = %value,
            matches = cafes.len(),
            "Searched cafes"
        );

        if cafes.is_empty() {
            Ok(SearchOutcome::NoResults)
        } else {
            Ok(SearchOutcome::Found(cafes))
        }
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<cafe::Model> {
        cafe::Entity::find()
            .filter(cafe::Column::Name.eq(name))
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No cafe named '{}'", name)))
    }

    /// Overwrite every column of the café called `name`.
    ///
    /// The new name is not checked against other rows.
    pub async fn update(&self, name: &str, draft: CafeDraft) -> AppResult<cafe::Model> {
        let existing = self.find_by_name(name).await?;

        let mut active: cafe::ActiveModel = existing.into();
        apply_draft(&mut active, draft);

        let updated = active.update(self.db).await?;
        tracing::info!(id = updated.id, old_name = %name, name = %updated.name, "Cafe updated");

        Ok(updated)
    }

    /// Remove the café called `name`, returning the deleted row.
    pub async fn delete(&self, name: &str) -> AppResult<cafe::Model> {
        let existing = self.find_by_name(name).await?;

        cafe::Entity::delete_by_id(existing.id).exec(self.db).await?;
        tracing::info!(id = existing.id, name = %existing.name, "Cafe deleted");

        Ok(existing)
    }
}

fn apply_draft(active: &mut cafe::ActiveModel, draft: CafeDraft) {
    active.name = Set(draft.name);
    active.map_url = Set(draft.map_url);
    active.img_url = Set(draft.img_url);
    active.location = Set(draft.location);
    active.seats = Set(draft.seats);
    active.has_toilet = Set(draft.has_toilet);
    active.has_wifi = Set(draft.has_wifi);
    active.has_sockets = Set(draft.has_sockets);
    active.can_take_calls = Set(draft.can_take_calls);
    active.coffee_price = Set(Some(draft.coffee_price));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use crate::forms::cafe::sample_form;

    fn draft(name: &str) -> CafeDraft {
        sample_form(name).to_draft()
    }

    async fn created(service: &CatalogService<'_>, name: &str) -> cafe::Model {
        match service.create(draft(name)).await.unwrap() {
            CreateOutcome::Created(model) => model,
            CreateOutcome::DuplicateName => panic!("{name} already existed"),
        }
    }

    #[tokio::test]
    async fn test_create_adds_title_cased_cafe() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);

        let cafe = created(&service, "blue bottle").await;

        assert_eq!(service.count().await.unwrap(), 1);
        assert_eq!(cafe.name, "Blue Bottle");
        assert_eq!(cafe.location, "Soho");
        assert_eq!(cafe.seats, "0-10");
        assert_eq!(cafe.coffee_price.as_deref(), Some("$3"));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);
        created(&service, "blue bottle").await;

        let outcome = service.create(draft("BLUE bottle")).await.unwrap();

        assert_eq!(outcome, CreateOutcome::DuplicateName);
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_returns_every_cafe_in_insert_order() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);
        assert!(service.list().await.unwrap().is_empty());

        created(&service, "blue bottle").await;
        created(&service, "monmouth").await;

        let names: Vec<String> = service.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Blue Bottle", "Monmouth"]);
    }

    #[tokio::test]
    async fn test_search_by_name_finds_one() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);
        created(&service, "blue bottle").await;
        created(&service, "monmouth").await;

        match service.search(SearchCategory::Name, "monmouth").await.unwrap() {
            SearchOutcome::Found(cafes) => {
                assert_eq!(cafes.len(), 1);
                assert_eq!(cafes[0].name, "Monmouth");
            }
            SearchOutcome::NoResults => panic!("expected a match"),
        }

        assert_eq!(
            service.search(SearchCategory::Name, "prufrock").await.unwrap(),
            SearchOutcome::NoResults
        );
    }

    #[tokio::test]
    async fn test_search_by_location_and_seats() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);
        created(&service, "blue bottle").await;
        created(&service, "monmouth").await;

        match service.search(SearchCategory::Location, "SOHO").await.unwrap() {
            SearchOutcome::Found(cafes) => assert_eq!(cafes.len(), 2),
            SearchOutcome::NoResults => panic!("expected matches"),
        }
        match service.search(SearchCategory::Seats, "0-10").await.unwrap() {
            SearchOutcome::Found(cafes) => assert_eq!(cafes.len(), 2),
            SearchOutcome::NoResults => panic!("expected matches"),
        }
    }

    #[tokio::test]
    async fn test_search_on_flags_never_matches() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);
        created(&service, "blue bottle").await;

        for category in [
            SearchCategory::Toilet,
            SearchCategory::WiFi,
            SearchCategory::Sockets,
            SearchCategory::CallerFriendly,
        ] {
            assert_eq!(
                service.search(category, "yes").await.unwrap(),
                SearchOutcome::NoResults
            );
        }
    }

    #[tokio::test]
    async fn test_search_by_coffee_price() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);
        created(&service, "blue bottle").await;
        let mut pricier = draft("monmouth");
        pricier.coffee_price = "$4.50".to_string();
        service.create(pricier).await.unwrap();

        match service.search(SearchCategory::CoffeePrice, "$3").await.unwrap() {
            SearchOutcome::Found(cafes) => {
                assert_eq!(cafes.len(), 1);
                assert_eq!(cafes[0].name, "Blue Bottle");
                assert_eq!(cafes[0].coffee_price.as_deref(), Some("$3"));
            }
            SearchOutcome::NoResults => panic!("expected a match"),
        }

        assert_eq!(
            service.search(SearchCategory::CoffeePrice, "$9").await.unwrap(),
            SearchOutcome::NoResults
        );
    }

    #[tokio::test]
    async fn test_update_overwrites_every_field() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);
        let original = created(&service, "blue bottle").await;

        let mut form = sample_form("prufrock coffee");
        form.location = "leather lane".to_string();
        form.map = "https://maps.example.com/prufrock".to_string();
        form.image = "https://images.example.com/prufrock.jpg".to_string();
        form.seats = "50+".to_string();
        form.price = "£2.80".to_string();

        let updated = service.update("Blue Bottle", form.to_draft()).await.unwrap();
        assert_eq!(updated.id, original.id);

        let cafes = service.list().await.unwrap();
        assert_eq!(cafes.len(), 1);
        let cafe = &cafes[0];
        assert_eq!(cafe.name, "Prufrock Coffee");
        assert_eq!(cafe.location, "Leather Lane");
        assert_eq!(cafe.map_url, "https://maps.example.com/prufrock");
        assert_eq!(cafe.img_url, "https://images.example.com/prufrock.jpg");
        assert_eq!(cafe.seats, "50+");
        assert_eq!(cafe.coffee_price.as_deref(), Some("£2.80"));
        assert!(service.find_by_name("Blue Bottle").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);
        created(&service, "blue bottle").await;
        created(&service, "monmouth").await;

        let removed = service.delete("Monmouth").await.unwrap();

        assert_eq!(removed.name, "Monmouth");
        let names: Vec<String> = service.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Blue Bottle"]);
    }

    #[tokio::test]
    async fn test_missing_cafe_is_not_found() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);

        assert!(matches!(service.find_by_name("Nowhere").await, Err(AppError::NotFound(_))));
        assert!(matches!(
            service.update("Nowhere", draft("nowhere")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete("Nowhere").await, Err(AppError::NotFound(_))));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_fails_in_storage() {
        let db = test_connection().await;
        let service = CatalogService::new(&db);
        created(&service, "blue bottle").await;
        created(&service, "monmouth").await;

        let result = service.update("Monmouth", draft("blue bottle")).await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(service.count().await.unwrap(), 2);
    }
}

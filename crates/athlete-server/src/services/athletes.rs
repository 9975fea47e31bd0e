//! Athlete records service
//!
//! Every operation reads the whole dataset from the store, and mutations
//! write the whole dataset back before returning.

use crate::error::ApiError;
use crate::storage::DatasetStore;
use anyhow::anyhow;
use athlete_types::{empty_plan, Athlete, CreateAthleteRequest, UpdateAthleteRequest};
use std::sync::Arc;
use tracing::info;

pub struct AthleteService {
    store: Arc<dyn DatasetStore>,
}

impl AthleteService {
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Athlete>, ApiError> {
        Ok(self.store.load().await?.athletes)
    }

    pub async fn get(&self, id: &str) -> Result<Athlete, ApiError> {
        self.store
            .load()
            .await?
            .find(id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    pub async fn create(&self, req: CreateAthleteRequest) -> Result<Athlete, ApiError> {
        let name = required_name(req.name)?;

        let mut dataset = self.store.load().await?;
        let id = dataset
            .allocate_id()
            .ok_or_else(|| ApiError::Internal(anyhow!("Athlete id counter exhausted")))?;
        let athlete = Athlete {
            id,
            name,
            plan: req.plan.unwrap_or_else(empty_plan),
        };
        dataset.athletes.push(athlete.clone());
        self.store.save(&dataset).await?;

        info!("Created athlete {} ({})", athlete.id, athlete.name);
        Ok(athlete)
    }

    /// Overwrite only the fields present in `req`
    pub async fn update(&self, id: &str, req: UpdateAthleteRequest) -> Result<Athlete, ApiError> {
        let name = req.name.map(|name| required_name(Some(name))).transpose()?;

        let mut dataset = self.store.load().await?;
        let athlete = dataset.find_mut(id).ok_or(ApiError::NotFound)?;
        if let Some(name) = name {
            athlete.name = name;
        }
        if let Some(plan) = req.plan {
            athlete.plan = plan;
        }
        let updated = athlete.clone();
        self.store.save(&dataset).await?;

        info!("Updated athlete {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<Athlete, ApiError> {
        let mut dataset = self.store.load().await?;
        let removed = dataset.remove(id).ok_or(ApiError::NotFound)?;
        self.store.save(&dataset).await?;

        info!(
            "Deleted athlete {} ({} remaining)",
            id,
            dataset.athletes.len()
        );
        Ok(removed)
    }
}

fn required_name(name: Option<String>) -> Result<String, ApiError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(ApiError::Validation("Name is required".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use athlete_types::Dataset;
    use serde_json::json;

    fn service() -> (AthleteService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (AthleteService::new(store.clone()), store)
    }

    fn create_req(name: &str, plan: Option<serde_json::Value>) -> CreateAthleteRequest {
        CreateAthleteRequest {
            name: Some(name.to_string()),
            plan,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let (athletes, store) = service();

        let a = athletes.create(create_req("A", None)).await.unwrap();
        let b = athletes.create(create_req("B", None)).await.unwrap();

        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
        assert_eq!(a.plan, json!({}));
        assert_eq!(store.load().await.unwrap().next_id, 3);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let (athletes, store) = service();

        for name in [None, Some(String::new()), Some("   ".to_string())] {
            let result = athletes
                .create(CreateAthleteRequest {
                    name,
                    plan: Some(json!({ "x": 1 })),
                })
                .await;
            assert!(matches!(result, Err(ApiError::Validation(_))));
        }

        let dataset = store.load().await.unwrap();
        assert!(dataset.athletes.is_empty());
        assert_eq!(dataset.next_id, 1);
    }

    #[tokio::test]
    async fn test_plan_is_stored_verbatim() {
        let (athletes, _) = service();
        let plan = json!({ "x": 1, "weeks": [{ "day": "mon", "sets": [5, 5, 3] }], "notes": null });

        let created = athletes.create(create_req("A", Some(plan.clone()))).await.unwrap();
        let fetched = athletes.get(&created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.plan, plan);
    }

    #[tokio::test]
    async fn test_update_is_a_partial_merge() {
        let (athletes, _) = service();
        let created = athletes
            .create(create_req("Ana", Some(json!({ "x": 1 }))))
            .await
            .unwrap();

        let updated = athletes
            .update(
                &created.id,
                UpdateAthleteRequest {
                    name: None,
                    plan: Some(json!({ "y": 2 })),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.plan, json!({ "y": 2 }));

        let renamed = athletes
            .update(
                &created.id,
                UpdateAthleteRequest {
                    name: Some("Ana Lima".to_string()),
                    plan: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Ana Lima");
        assert_eq!(renamed.plan, json!({ "y": 2 }));
        assert_eq!(renamed.id, created.id);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name_and_unknown_id() {
        let (athletes, _) = service();
        let created = athletes.create(create_req("A", None)).await.unwrap();

        let blank = athletes
            .update(
                &created.id,
                UpdateAthleteRequest {
                    name: Some(" ".to_string()),
                    plan: None,
                },
            )
            .await;
        assert!(matches!(blank, Err(ApiError::Validation(_))));
        assert_eq!(athletes.get(&created.id).await.unwrap().name, "A");

        let missing = athletes.update("99", UpdateAthleteRequest::default()).await;
        assert!(matches!(missing, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_fails_cleanly_when_ids_are_exhausted() {
        let store = Arc::new(MemoryStore::with_dataset(Dataset {
            athletes: vec![Athlete {
                id: u64::MAX.to_string(),
                name: "Last".to_string(),
                plan: json!({}),
            }],
            next_id: 1,
        }));
        let athletes = AthleteService::new(store.clone());

        let result = athletes.create(create_req("A", None)).await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
        assert_eq!(store.load().await.unwrap().athletes.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_never_reuses_ids() {
        let (athletes, store) = service();
        let a = athletes.create(create_req("A", None)).await.unwrap();
        let b = athletes.create(create_req("B", None)).await.unwrap();

        let removed = athletes.delete(&b.id).await.unwrap();
        assert_eq!(removed, b);
        assert_eq!(athletes.list().await.unwrap(), vec![a]);

        let c = athletes.create(create_req("C", None)).await.unwrap();
        assert_eq!(c.id, "3");
        assert_eq!(store.load().await.unwrap().athletes.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_leaves_dataset_unchanged() {
        let (athletes, store) = service();
        athletes.create(create_req("A", None)).await.unwrap();
        let before = store.load().await.unwrap();

        let result = athletes.delete("42").await;
        assert!(matches!(result, Err(ApiError::NotFound)));
        assert_eq!(store.load().await.unwrap(), before);
    }
}

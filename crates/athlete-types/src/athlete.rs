//! Athlete records and the persisted dataset

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single athlete record.
///
/// `plan` is an arbitrary JSON structure; the server stores and returns it
/// verbatim without looking inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: String,
    pub name: String,
    #[serde(default = "empty_plan")]
    pub plan: Value,
}

/// The whole persisted document: every athlete plus the id counter.
///
/// `next_id` is always strictly greater than any id handed out so far,
/// including ids of athletes that have since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub athletes: Vec<Athlete>,
    #[serde(default = "first_id")]
    pub next_id: u64,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            athletes: Vec::new(),
            next_id: first_id(),
        }
    }
}

impl Dataset {
    pub fn find(&self, id: &str) -> Option<&Athlete> {
        self.athletes.iter().find(|a| a.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Athlete> {
        self.athletes.iter_mut().find(|a| a.id == id)
    }

    /// Take the next id and advance the counter.
    ///
    /// The counter is first raised past any numeric id already present, so a
    /// hand-edited file with a stale `nextId` cannot cause a collision.
    /// Returns `None` once the counter cannot advance any further.
    pub fn allocate_id(&mut self) -> Option<String> {
        let floor = match self
            .athletes
            .iter()
            .filter_map(|a| a.id.parse::<u64>().ok())
            .max()
        {
            Some(max) => max.checked_add(1)?,
            None => first_id(),
        };
        let id = self.next_id.max(floor);
        self.next_id = id.checked_add(1)?;
        Some(id.to_string())
    }

    /// Remove an athlete by id, returning it if it existed
    pub fn remove(&mut self, id: &str) -> Option<Athlete> {
        let index = self.athletes.iter().position(|a| a.id == id)?;
        Some(self.athletes.remove(index))
    }
}

/// Body of `POST /api/athletes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAthleteRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plan: Option<Value>,
}

/// Body of `PUT /api/athletes/:id` - absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAthleteRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plan: Option<Value>,
}

/// Body of `DELETE /api/athletes/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub athlete: Athlete,
}

pub fn empty_plan() -> Value {
    Value::Object(serde_json::Map::new())
}

fn first_id() -> u64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dataset_wire_format() {
        let dataset = Dataset::default();
        let value = serde_json::to_value(&dataset).unwrap();
        assert_eq!(value, json!({ "athletes": [], "nextId": 1 }));
    }

    #[test]
    fn test_allocate_id_never_reuses() {
        let mut dataset = Dataset::default();
        let first = dataset.allocate_id().unwrap();
        dataset.athletes.push(Athlete {
            id: first.clone(),
            name: "A".to_string(),
            plan: empty_plan(),
        });
        assert_eq!(dataset.remove(&first).map(|a| a.id), Some("1".to_string()));

        let second = dataset.allocate_id().unwrap();
        assert_eq!(second, "2");
        assert_eq!(dataset.next_id, 3);
    }

    #[test]
    fn test_allocate_id_skips_past_existing_ids() {
        let mut dataset = Dataset {
            athletes: vec![Athlete {
                id: "10".to_string(),
                name: "A".to_string(),
                plan: empty_plan(),
            }],
            next_id: 3,
        };
        assert_eq!(dataset.allocate_id().as_deref(), Some("11"));
        assert_eq!(dataset.next_id, 12);
    }

    #[test]
    fn test_allocate_id_stops_at_counter_limit() {
        let mut dataset: Dataset = serde_json::from_value(json!({
            "athletes": [{ "id": u64::MAX.to_string(), "name": "A", "plan": {} }],
            "nextId": 1
        }))
        .unwrap();
        assert_eq!(dataset.allocate_id(), None);
        assert_eq!(dataset.next_id, 1);

        let mut dataset = Dataset {
            athletes: Vec::new(),
            next_id: u64::MAX,
        };
        assert_eq!(dataset.allocate_id(), None);
        assert_eq!(dataset.next_id, u64::MAX);
    }

    #[test]
    fn test_missing_plan_defaults_to_empty_object() {
        let athlete: Athlete = serde_json::from_value(json!({ "id": "7", "name": "B" })).unwrap();
        assert_eq!(athlete.plan, json!({}));
    }
}

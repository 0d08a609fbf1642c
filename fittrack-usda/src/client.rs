use async_trait::async_trait;
use serde::Deserialize;

use fittrack_model::food::FoodCandidate;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("nutrition database unreachable")]
    CommunicationError,
    #[error("nutrition database internal error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect nutrition database response")]
    ResponseError,
}

type Result<T> = std::result::Result<T, Error>;

const ENERGY: &str = "Energy";
const PROTEIN: &str = "Protein";
const CARBS: &str = "Carbohydrate, by difference";
const FAT: &str = "Total lipid (fat)";

/// Black-box text search over the FoodData Central nutrition database.
#[mockall::automock]
#[async_trait]
pub trait FoodDataClient: Send + Sync {
    async fn search_foods(&self, query: &str) -> Result<Vec<FoodCandidate>>;
    async fn food_details(&self, fdc_id: i64) -> Result<FoodCandidate>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    fdc_id: i64,
    description: String,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    #[serde(default)]
    nutrient_name: String,
    #[serde(default)]
    value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailResponse {
    fdc_id: i64,
    description: String,
    #[serde(default)]
    food_nutrients: Vec<DetailNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailNutrient {
    nutrient: NutrientInfo,
    #[serde(default)]
    amount: f64,
}

#[derive(Debug, Deserialize)]
struct NutrientInfo {
    name: String,
}

// Foods missing a nutrient report it as 0.
fn candidate_from_search(food: SearchFood) -> FoodCandidate {
    let value = |name: &str| {
        food.food_nutrients
            .iter()
            .find(|n| n.nutrient_name == name)
            .map(|n| n.value)
            .unwrap_or(0.0)
    };
    FoodCandidate {
        fdc_id: food.fdc_id,
        calories: value(ENERGY),
        protein: value(PROTEIN),
        carbs: value(CARBS),
        fat: value(FAT),
        description: food.description,
    }
}

fn candidate_from_detail(food: DetailResponse) -> FoodCandidate {
    let value = |name: &str| {
        food.food_nutrients
            .iter()
            .find(|n| n.nutrient.name == name)
            .map(|n| n.amount)
            .unwrap_or(0.0)
    };
    FoodCandidate {
        fdc_id: food.fdc_id,
        calories: value(ENERGY),
        protein: value(PROTEIN),
        carbs: value(CARBS),
        fat: value(FAT),
        description: food.description,
    }
}

pub struct UsdaClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

pub fn create(base_url: String, api_key: String) -> UsdaClient {
    UsdaClient {
        base_url,
        api_key,
        client: reqwest::Client::new(),
    }
}

#[async_trait]
impl FoodDataClient for UsdaClient {
    async fn search_foods(&self, query: &str) -> Result<Vec<FoodCandidate>> {
        let response: SearchResponse = self
            .client
            .get(format!("{}/foods/search", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("pageSize", "10"),
            ])
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(|resp| {
                if resp.status().is_client_error() {
                    Err(Error::RequestError)
                } else if resp.status().is_server_error() {
                    Err(Error::InternalServerError)
                } else {
                    Ok(resp)
                }
            })?
            .json()
            .await
            .map_err(|_| Error::ResponseError)?;

        Ok(response
            .foods
            .into_iter()
            .map(candidate_from_search)
            .collect())
    }

    async fn food_details(&self, fdc_id: i64) -> Result<FoodCandidate> {
        let response: DetailResponse = self
            .client
            .get(format!("{}/food/{}", self.base_url, fdc_id))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(|resp| {
                if resp.status().is_client_error() {
                    Err(Error::RequestError)
                } else if resp.status().is_server_error() {
                    Err(Error::InternalServerError)
                } else {
                    Ok(resp)
                }
            })?
            .json()
            .await
            .map_err(|_| Error::ResponseError)?;

        Ok(candidate_from_detail(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_foods_map_by_nutrient_name() {
        let payload = r#"{
            "foods": [
                {
                    "fdcId": 173944,
                    "description": "Egg, whole, raw",
                    "foodNutrients": [
                        {"nutrientName": "Energy", "value": 143.0},
                        {"nutrientName": "Protein", "value": 12.56},
                        {"nutrientName": "Carbohydrate, by difference", "value": 0.72},
                        {"nutrientName": "Total lipid (fat)", "value": 9.51},
                        {"nutrientName": "Calcium, Ca", "value": 56.0}
                    ]
                },
                {
                    "fdcId": 999999,
                    "description": "Mystery broth"
                }
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(payload).unwrap();
        let candidates: Vec<_> = response
            .foods
            .into_iter()
            .map(candidate_from_search)
            .collect();

        assert_eq!(
            candidates[0],
            FoodCandidate {
                fdc_id: 173944,
                description: "Egg, whole, raw".to_owned(),
                calories: 143.0,
                protein: 12.56,
                carbs: 0.72,
                fat: 9.51,
            }
        );
        // No nutrient list at all: every field reads as 0.
        assert_eq!(candidates[1].calories, 0.0);
        assert_eq!(candidates[1].protein, 0.0);
    }

    #[test]
    fn detail_foods_map_by_nested_nutrient_name() {
        let payload = r#"{
            "fdcId": 173944,
            "description": "Egg, whole, raw",
            "foodNutrients": [
                {"nutrient": {"name": "Energy"}, "amount": 143.0},
                {"nutrient": {"name": "Protein"}, "amount": 12.56}
            ]
        }"#;

        let response: DetailResponse = serde_json::from_str(payload).unwrap();
        let candidate = candidate_from_detail(response);

        assert_eq!(candidate.calories, 143.0);
        assert_eq!(candidate.protein, 12.56);
        assert_eq!(candidate.carbs, 0.0);
        assert_eq!(candidate.fat, 0.0);
    }
}

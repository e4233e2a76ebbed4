use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub phone_region: String,
    pub knn_k: usize,
    pub regex_match_score: f64,
    pub regex_max_per_intent: f64,
    pub regex_overlapping: bool,
    pub crm_base_path: String,
    pub ner_url: Option<String>,
    pub zero_shot_url: Option<String>,
    pub inference_api_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            phone_region: "IN".to_string(),
            knn_k: 4,
            regex_match_score: 0.5,
            regex_max_per_intent: 2.0,
            regex_overlapping: false,
            crm_base_path: "/crm".to_string(),
            ner_url: None,
            zero_shot_url: None,
            inference_api_token: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: parsed("PORT").unwrap_or(defaults.port),
            phone_region: env::var("PHONE_REGION")
                .map(|v| v.trim().to_uppercase())
                .unwrap_or(defaults.phone_region),
            knn_k: parsed("KNN_K")
                .filter(|k: &usize| *k > 0)
                .unwrap_or(defaults.knn_k),
            regex_match_score: parsed("REGEX_MATCH_SCORE").unwrap_or(defaults.regex_match_score),
            regex_max_per_intent: parsed("REGEX_MAX_PER_INTENT")
                .unwrap_or(defaults.regex_max_per_intent),
            regex_overlapping: parsed("REGEX_OVERLAPPING").unwrap_or(defaults.regex_overlapping),
            crm_base_path: env::var("CRM_BASE_PATH").unwrap_or(defaults.crm_base_path),
            ner_url: non_empty("NER_URL"),
            zero_shot_url: non_empty("ZERO_SHOT_URL"),
            inference_api_token: non_empty("INFERENCE_API_TOKEN"),
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

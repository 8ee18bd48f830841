//! Bodies for the operational endpoints.

use serde::Serialize;

use crate::cache::CacheStats;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Body of `GET /stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub counters: CacheStats,
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(counters: CacheStats) -> Self {
        Self {
            hit_rate: counters.hit_rate(),
            counters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_is_flat() {
        let stats = CacheStats {
            hits: 1,
            misses: 1,
            total_entries: 2,
            ..Default::default()
        };
        let json = serde_json::to_value(StatsResponse::from(stats)).unwrap();

        assert_eq!(json["hits"], 1);
        assert_eq!(json["total_entries"], 2);
        assert_eq!(json["hit_rate"], 0.5);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}

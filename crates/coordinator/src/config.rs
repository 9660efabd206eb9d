//! Coordinator configuration.

/// Tunables for incident dispatch.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Responder search radius in meters.
    pub search_radius_m: f64,
    /// Maximum responders notified per incident.
    pub max_responders: usize,
    /// Hosted audio/TwiML resource played to emergency contacts.
    pub voice_audio_url: String,
    /// Caller id presented on voice calls.
    pub caller_id: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            search_radius_m: 5000.0,
            max_responders: 3,
            voice_audio_url: "http://localhost:9100/emergency-voice.xml".to_string(),
            caller_id: "+00000000000".to_string(),
        }
    }
}

impl CoordinatorConfig {
    /// Create configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Reads `DISPATCH_RADIUS_M`, `DISPATCH_MAX_RESPONDERS`,
    /// `DISPATCH_VOICE_URL`, and `DISPATCH_CALLER_ID`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            search_radius_m: std::env::var("DISPATCH_RADIUS_M")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.search_radius_m),
            max_responders: std::env::var("DISPATCH_MAX_RESPONDERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_responders),
            voice_audio_url: std::env::var("DISPATCH_VOICE_URL")
                .unwrap_or(defaults.voice_audio_url),
            caller_id: std::env::var("DISPATCH_CALLER_ID").unwrap_or(defaults.caller_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.search_radius_m, 5000.0);
        assert_eq!(config.max_responders, 3);
    }
}

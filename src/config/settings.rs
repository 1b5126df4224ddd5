use std::path::PathBuf;

/// Model artifact looked up relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "heart_model.json";
/// Environment variable overriding the model path
pub const MODEL_PATH_ENV: &str = "HEART_RISK_MODEL";

/// Geometry and caption of the form window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
}

impl WindowConfig {
    pub const DEFAULT_WIDTH: i32 = 400;
    pub const DEFAULT_HEIGHT: i32 = 650;
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Heart Disease Risk Predictor".to_string(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub window: WindowConfig,
}

impl AppConfig {
    /// Resolves the model path: first CLI argument, then environment, then default
    ///
    /// # Arguments
    /// * `args` - Command-line arguments after the program name
    /// * `env_model_path` - Value of `HEART_RISK_MODEL`, if set
    ///
    /// # Returns
    /// Configuration with the default window geometry
    pub fn resolve<I>(args: I, env_model_path: Option<String>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let non_blank = |path: &String| !path.trim().is_empty();
        let model_path = args
            .into_iter()
            .next()
            .filter(non_blank)
            .or(env_model_path.filter(non_blank))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        Self {
            model_path,
            window: WindowConfig::default(),
        }
    }

    /// Reads the process arguments and environment
    pub fn from_env() -> Self {
        Self::resolve(std::env::args().skip(1), std::env::var(MODEL_PATH_ENV).ok())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(std::iter::empty(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.model_path, PathBuf::from("heart_model.json"));
        assert_eq!(config.window.title, "Heart Disease Risk Predictor");
        assert_eq!((config.window.width, config.window.height), (400, 650));
    }

    #[test]
    fn environment_overrides_default() {
        let config = AppConfig::resolve(Vec::new(), Some("/opt/models/heart.json".to_string()));
        assert_eq!(config.model_path, PathBuf::from("/opt/models/heart.json"));
    }

    #[test]
    fn argument_wins_over_environment() {
        let config = AppConfig::resolve(
            vec!["local.json".to_string()],
            Some("/opt/models/heart.json".to_string()),
        );
        assert_eq!(config.model_path, PathBuf::from("local.json"));
    }

    #[test]
    fn blank_override_falls_back_to_default() {
        let config = AppConfig::resolve(Vec::new(), Some("  ".to_string()));
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }
}

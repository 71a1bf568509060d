pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid style sheet YAML: {0}")]
    StyleYaml(#[from] serde_yaml::Error),

    #[error("Invalid style sheet JSON: {0}")]
    StyleJson(#[from] serde_json::Error),
}

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fmt;

pub const KEY_REGION: &str = "aws_region";
pub const KEY_ACCESS_KEY: &str = "aws_access_key";
pub const KEY_SECRET_KEY: &str = "aws_secret_key";
pub const KEY_QUEUE_NAME: &str = "aws_queue_name";

/// Connection settings for the SQS handler.
///
/// Every field defaults to the empty string. Empty values are passed through
/// to the AWS client untouched; the service decides whether they are usable.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SqsHandlerConfig {
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub queue_name: String,
}

impl SqsHandlerConfig {
    /// Build the config from the handler's section of the agent configuration.
    #[must_use]
    pub fn from_map(values: &HashMap<String, String>) -> Self {
        let get = |key: &str| values.get(key).cloned().unwrap_or_default();
        Self {
            region: get(KEY_REGION),
            access_key: get(KEY_ACCESS_KEY),
            secret_key: get(KEY_SECRET_KEY),
            queue_name: get(KEY_QUEUE_NAME),
        }
    }

    /// Read `AWS_REGION`, `AWS_ACCESS_KEY`, `AWS_SECRET_KEY` and `AWS_QUEUE_NAME`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            region: env::var("AWS_REGION").unwrap_or_default(),
            access_key: env::var("AWS_ACCESS_KEY").unwrap_or_default(),
            secret_key: env::var("AWS_SECRET_KEY").unwrap_or_default(),
            queue_name: env::var("AWS_QUEUE_NAME").unwrap_or_default(),
        }
    }
}

impl fmt::Debug for SqsHandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqsHandlerConfig")
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("queue_name", &self.queue_name)
            .finish()
    }
}

/// Default value of every configuration key understood by the handler.
#[must_use]
pub fn default_config() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        (KEY_REGION, ""),
        (KEY_ACCESS_KEY, ""),
        (KEY_SECRET_KEY, ""),
        (KEY_QUEUE_NAME, ""),
    ])
}

/// Help text for every configuration key understood by the handler.
#[must_use]
pub fn default_config_help() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        (KEY_REGION, "AWS region hosting the queue, e.g. us-east-1"),
        (KEY_ACCESS_KEY, "AWS access key id"),
        (KEY_SECRET_KEY, "AWS secret access key"),
        (KEY_QUEUE_NAME, "Exact name of the SQS queue receiving metrics"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_map_reads_aws_keys() {
        let values = HashMap::from([
            ("aws_region".to_string(), "eu-west-1".to_string()),
            ("aws_access_key".to_string(), "AKIA".to_string()),
            ("aws_secret_key".to_string(), "s3cr3t".to_string()),
            ("aws_queue_name".to_string(), "metrics-queue".to_string()),
            ("unrelated".to_string(), "ignored".to_string()),
        ]);

        let config = SqsHandlerConfig::from_map(&values);
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.access_key, "AKIA");
        assert_eq!(config.secret_key, "s3cr3t");
        assert_eq!(config.queue_name, "metrics-queue");
    }

    #[test]
    fn test_from_map_defaults_to_empty() {
        let config = SqsHandlerConfig::from_map(&HashMap::new());
        assert_eq!(config, SqsHandlerConfig::default());
        assert!(config.queue_name.is_empty());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = SqsHandlerConfig {
            secret_key: "s3cr3t".to_string(),
            ..SqsHandlerConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_default_config_and_help_cover_same_keys() {
        let defaults = default_config();
        let help = default_config_help();
        assert_eq!(defaults.len(), 4);
        assert!(defaults.values().all(|v| v.is_empty()));
        assert!(defaults.keys().eq(help.keys()));
    }
}

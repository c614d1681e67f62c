use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::config_manager::main::Config;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Read a YAML or JSON configuration file with environment variable substitution
pub fn read_config_value(config_path: &str) -> Result<Value> {
    if !Path::new(config_path).exists() {
        anyhow::bail!("Configuration file not found: {}", config_path);
    }

    let content = load_text_file_with_guess_encoding(config_path)?;
    if content.trim().is_empty() {
        anyhow::bail!("Configuration file is empty: {}", config_path);
    }

    let content = substitute_env_vars(&content)?;

    let path_lower = config_path.to_lowercase();
    let value = if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    Ok(value)
}

/// Replace `${VAR_NAME}` with the environment value; unknown variables are left as written
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}

/// Validate configuration data against the Config model
pub fn validate_config(config_data: &Value) -> Result<Config> {
    let config: Config = serde_json::from_value(config_data.clone())?;
    let translator = &config.translator_config;

    if translator.model_options.is_empty() {
        anyhow::bail!("translator_config.model_options must list at least one model");
    }
    if !(0.0..=1.0).contains(&translator.default_temperature) {
        anyhow::bail!(
            "translator_config.default_temperature must be within [0, 1], got {}",
            translator.default_temperature
        );
    }
    if translator.request_timeout_secs == 0 {
        anyhow::bail!("translator_config.request_timeout_secs must be positive");
    }
    if config.system_config.session_ttl_secs == 0 || config.system_config.session_sweep_secs == 0 {
        anyhow::bail!("system_config.session_ttl_secs and session_sweep_secs must be positive");
    }

    Ok(config)
}

/// Load text file, stripping a UTF-8 BOM and falling back to GBK for non-UTF-8 content
pub fn load_text_file_with_guess_encoding(file_path: &str) -> Result<String> {
    let mut bytes = fs::read(file_path)?;
    if bytes.starts_with(&UTF8_BOM) {
        bytes.drain(0..UTF8_BOM.len());
    }

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => {
            debug!("{} is not valid UTF-8, decoding as GBK", file_path);
            let (cow, _, _) = encoding_rs::GBK.decode(err.as_bytes());
            Ok(cow.into_owned())
        }
    }
}

/// Paths probed for a configuration file, in priority order
pub fn candidate_config_paths() -> Vec<String> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    [
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
        exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
        exe_dir.join("conf.json").to_str().map(|s| s.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Load the first configuration that parses, returning it with the path it came from
pub fn load_first_config(paths: &[String]) -> Option<(Config, String)> {
    for path in paths {
        match Config::load(path) {
            Ok(config) => return Some((config, path.clone())),
            Err(e) => {
                debug!("Failed to load config from {}: {}", path, e);
                continue;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> String {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn loads_yaml_with_defaults_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "conf.yaml",
            b"system_config:\n  port: 9000\ntranslator_config:\n  default_temperature: 0.3\n",
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.system_config.port, 9000);
        assert_eq!(config.system_config.host, "0.0.0.0");
        assert_eq!(config.translator_config.default_temperature, 0.3);
        assert_eq!(config.translator_config.default_model(), "gemini-1.5-flash");
        assert_eq!(config.translator_config.llm_provider, "gemini_llm");
    }

    #[test]
    fn loads_json_with_bom() {
        let dir = TempDir::new().unwrap();
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(br#"{"translator_config": {"model_options": ["gemini-1.5-pro"]}}"#);
        let path = write_file(&dir, "conf.json", &bytes);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.translator_config.default_model(), "gemini-1.5-pro");
    }

    #[test]
    fn substitutes_known_env_vars_only() {
        std::env::set_var("LINGUA_BRIDGE_TEST_URL", "http://proxy.local");
        let out = substitute_env_vars("a: ${LINGUA_BRIDGE_TEST_URL}\nb: ${LINGUA_BRIDGE_UNSET_VAR}")
            .unwrap();
        assert_eq!(out, "a: http://proxy.local\nb: ${LINGUA_BRIDGE_UNSET_VAR}");
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let value = serde_json::json!({ "translator_config": { "default_temperature": 1.5 } });
        assert!(validate_config(&value).is_err());
    }

    #[test]
    fn rejects_zero_session_ttl() {
        let value = serde_json::json!({ "system_config": { "session_ttl_secs": 0 } });
        assert!(validate_config(&value).is_err());
    }

    #[test]
    fn rejects_empty_model_list() {
        let value = serde_json::json!({ "translator_config": { "model_options": [] } });
        assert!(validate_config(&value).is_err());
    }

    #[test]
    fn first_loadable_config_wins() {
        let dir = TempDir::new().unwrap();
        let broken = write_file(&dir, "broken.yaml", b"system_config: [not, a, map]\n");
        let good = write_file(&dir, "good.yaml", b"system_config:\n  port: 7000\n");
        let missing = dir.path().join("missing.yaml").to_str().unwrap().to_string();

        let (config, path) =
            load_first_config(&[missing, broken, good.clone()]).unwrap();
        assert_eq!(path, good);
        assert_eq!(config.system_config.port, 7000);
    }
}

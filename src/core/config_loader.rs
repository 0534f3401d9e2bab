// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::fitting::ltc_fit::FitSettings;
use crate::math::constants::Float;

#[derive(Debug)]
pub enum ConfigLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
}

impl From<std::io::Error> for ConfigLoadError {
    fn from(err: std::io::Error) -> Self {
        ConfigLoadError::Io(err)
    }
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLoadError::Io(err) => write!(f, "failed to read config: {}", err),
            ConfigLoadError::Parse(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigLoadError::MissingField(field) => write!(f, "missing config field: {}", field),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

pub fn load_fit_settings<P: AsRef<Path>>(path: P) -> Result<FitSettings, ConfigLoadError> {
    let path = path.as_ref();
    log::info!("Loading fit settings from: {}.", path.display());
    let xml = fs::read_to_string(path)?;
    parse_fit_settings(&xml)
}

/// Parse a `<fit>` document. Values not present in the document keep their
/// defaults from `FitSettings::default()`.
pub fn parse_fit_settings(xml: &str) -> Result<FitSettings, ConfigLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut settings = FitSettings::default();
    let mut found_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let tag = e.name().as_ref().to_vec();
                let mut key: Option<String> = None;
                let mut value: Option<String> = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"name" => key = Some(attr.unescape_value().unwrap_or_default().to_string()),
                        b"value" => value = Some(attr.unescape_value().unwrap_or_default().to_string()),
                        _ => {}
                    }
                }

                match tag.as_slice() {
                    b"fit" => found_root = true,
                    b"default" => {
                        if let (Some(k), Some(v)) = (key, value) {
                            defaults.insert(k, v);
                        }
                    }
                    b"integer" | b"float" => {
                        let key = key.ok_or(ConfigLoadError::MissingField("name"))?;
                        let raw = value.ok_or(ConfigLoadError::MissingField("value"))?;
                        let value = resolve_value(&raw, &defaults);
                        apply_setting(&mut settings, &key, &value)?;
                    }
                    _ => {}
                }
            }
            Err(e) => {
                return Err(ConfigLoadError::Parse(e.to_string()));
            }
            _ => {}
        }

        buf.clear();
    }

    if !found_root {
        return Err(ConfigLoadError::MissingField("fit"));
    }

    Ok(settings)
}

fn apply_setting(settings: &mut FitSettings, key: &str, value: &str) -> Result<(), ConfigLoadError> {
    match key {
        "mu_res" => settings.mu_res = parse_usize(value)?,
        "alpha_res" => settings.alpha_res = parse_usize(value)?,
        "theta_o_res" => settings.theta_o_res = parse_usize(value)?,
        "phi_o_res" => settings.phi_o_res = parse_usize(value)?,
        "min_value" => settings.min_value = parse_float(value)?,
        "tolerance" => settings.tolerance = parse_float(value)?,
        "max_iters" => settings.max_iters = parse_usize(value)?,
        "delta" => settings.delta = parse_float(value)?,
        "threads" => settings.threads = parse_usize(value)?,
        other => log::warn!("Ignoring unknown fit setting: {}.", other),
    }
    Ok(())
}

/// Replace each `$name` token, `name` being the longest run of identifier
/// characters after the `$`. Unknown names are left as written.
fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('$') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let name = &after[..len];
        match defaults.get(name) {
            Some(v) if !name.is_empty() => out.push_str(v),
            _ => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[len..];
    }
    out.push_str(rest);
    out
}

fn parse_float(value: &str) -> Result<Float, ConfigLoadError> {
    value.parse::<Float>().map_err(|_| ConfigLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_usize(value: &str) -> Result<usize, ConfigLoadError> {
    value.parse::<usize>().map_err(|_| ConfigLoadError::Parse(format!("invalid integer: {}", value)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{parse_fit_settings, resolve_value, ConfigLoadError};
    use crate::fitting::ltc_fit::FitSettings;

    #[test]
    fn test_parse_with_defaults_substitution() {
        let xml = r#"
            <fit>
                <default name="res" value="16"/>
                <integer name="mu_res" value="$res"/>
                <integer name="alpha_res" value="$res"/>
                <integer name="theta_o_res" value="8"/>
                <float name="tolerance" value="1e-6"/>
                <float name="delta" value="0.1"/>
            </fit>
        "#;
        let settings = parse_fit_settings(xml).unwrap();
        assert_eq!(settings.mu_res, 16);
        assert_eq!(settings.alpha_res, 16);
        assert_eq!(settings.theta_o_res, 8);
        assert_eq!(settings.phi_o_res, FitSettings::default().phi_o_res);
        assert_eq!(settings.tolerance, 1e-6);
        assert_eq!(settings.delta, 0.1);
    }

    #[test]
    fn test_default_names_sharing_a_prefix() {
        let xml = r#"
            <fit>
                <default name="res" value="16"/>
                <default name="resolution" value="8"/>
                <integer name="theta_o_res" value="$resolution"/>
                <integer name="phi_o_res" value="$res"/>
            </fit>
        "#;
        for _ in 0..64 {
            let settings = parse_fit_settings(xml).unwrap();
            assert_eq!(settings.theta_o_res, 8);
            assert_eq!(settings.phi_o_res, 16);
        }
    }

    #[test]
    fn test_resolve_value_keeps_unknown_names() {
        let mut defaults = HashMap::new();
        defaults.insert("a".to_string(), "1".to_string());
        assert_eq!(resolve_value("$a.$b$", &defaults), "1.$b$");
        assert_eq!(resolve_value("x$a_y", &defaults), "x$a_y");
        assert_eq!(resolve_value("plain", &defaults), "plain");
    }

    #[test]
    fn test_empty_fit_keeps_defaults() {
        let settings = parse_fit_settings("<fit/>").unwrap();
        assert_eq!(settings, FitSettings::default());
    }

    #[test]
    fn test_malformed_number_is_parse_error() {
        let xml = r#"<fit><integer name="mu_res" value="many"/></fit>"#;
        match parse_fit_settings(xml) {
            Err(ConfigLoadError::Parse(msg)) => assert!(msg.contains("many")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let xml = r#"<scene><integer name="mu_res" value="4"/></scene>"#;
        assert!(matches!(parse_fit_settings(xml), Err(ConfigLoadError::MissingField("fit"))));
    }
}

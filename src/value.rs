//! The settings-object view of a [`SiteConfiguration`]: a flat mapping from
//! setting name to value, as the generator reads it and as it exposes
//! settings to theme templates.

use crate::config::{Error, Result, SiteConfiguration};
use gtmpl_value::Value;
use serde_yaml::{Mapping, Value as Yaml};
use std::collections::HashMap;
use std::convert::TryFrom;

impl SiteConfiguration {
    /// Renders every setting, keyed by setting name. Disabled feeds and unset
    /// pagination appear as `null` rather than being left out, so the mapping
    /// always has the same keys. Enabled feeds appear as their path pattern,
    /// even when switched on with `true`.
    pub fn to_settings(&self) -> Result<Mapping> {
        let mut settings = match serde_yaml::to_value(self).map_err(Error::Serialize)? {
            Yaml::Mapping(settings) => settings,
            other => {
                return Err(Error::Serialize(serde::ser::Error::custom(format!(
                    "settings rendered as {:?} instead of a mapping",
                    other
                ))))
            }
        };
        for (name, pattern) in self.feeds().settings().iter() {
            if let Some(value) = settings.get_mut(&Yaml::String((*name).to_owned())) {
                *value = match pattern {
                    Some(pattern) => Yaml::String((*pattern).to_owned()),
                    None => Yaml::Null,
                };
            }
        }
        Ok(settings)
    }

    /// Looks up a single setting by name. Names are matched without regard to
    /// case, so `sitename` finds `SITENAME`.
    pub fn get(&self, name: &str) -> Result<Option<Yaml>> {
        let key = Yaml::String(name.to_uppercase());
        Ok(self.to_settings()?.get(&key).cloned())
    }
}

impl TryFrom<&SiteConfiguration> for Value {
    type Error = Error;

    /// Converts the settings into a template context object, where each
    /// setting is a field named after it (`{{ .SITENAME }}`).
    fn try_from(config: &SiteConfiguration) -> Result<Value> {
        Ok(mapping_to_value(config.to_settings()?))
    }
}

fn mapping_to_value(mapping: Mapping) -> Value {
    let mut m: HashMap<String, Value> = HashMap::new();
    for (key, value) in mapping {
        if let Yaml::String(key) = key {
            m.insert(key, yaml_to_value(value));
        }
    }
    Value::Object(m)
}

fn yaml_to_value(yaml: Yaml) -> Value {
    match yaml {
        Yaml::Null => Value::Nil,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(n) = n.as_u64() {
                Value::from(n)
            } else if let Some(n) = n.as_i64() {
                Value::from(n)
            } else {
                Value::from(n.as_f64().unwrap_or_default())
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_value).collect()),
        Yaml::Mapping(mapping) => mapping_to_value(mapping),
    }
}

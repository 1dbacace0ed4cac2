use serde::Deserialize;

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (wildcard "*" or explicit list)
    #[serde(default)]
    pub origins: AnyOrList,
    /// Allowed HTTP methods (wildcard "*" or explicit list)
    #[serde(default)]
    pub methods: AnyOrList,
    /// Allowed headers (wildcard "*" or explicit list)
    #[serde(default)]
    pub headers: AnyOrList,
}

/// Either a wildcard "*" or an explicit list of values
#[derive(Debug, Clone)]
pub enum AnyOrList {
    /// Match any value
    Any,
    /// Explicit list
    List(Vec<String>),
}

impl Default for AnyOrList {
    fn default() -> Self {
        Self::Any
    }
}

impl<'de> Deserialize<'de> for AnyOrList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de;

        struct AnyOrListVisitor;

        impl<'de> de::Visitor<'de> for AnyOrListVisitor {
            type Value = AnyOrList;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("\"*\" or array of strings")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value == "*" {
                    Ok(AnyOrList::Any)
                } else {
                    Ok(AnyOrList::List(vec![value.to_owned()]))
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<String>()? {
                    values.push(value);
                }
                Ok(AnyOrList::List(values))
            }
        }

        deserializer.deserialize_any(AnyOrListVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_string_is_any() {
        let config: CorsConfig = toml::from_str(r#"origins = "*""#).unwrap();
        assert!(matches!(config.origins, AnyOrList::Any));
    }

    #[test]
    fn bare_string_is_a_single_element_list() {
        let config: CorsConfig = toml::from_str(r#"origins = "https://app.example.com""#).unwrap();
        match config.origins {
            AnyOrList::List(origins) => assert_eq!(origins, vec!["https://app.example.com"]),
            AnyOrList::Any => panic!("bare string parsed as wildcard"),
        }
    }

    #[test]
    fn array_is_a_list() {
        let config: CorsConfig = toml::from_str(r#"methods = ["GET", "POST"]"#).unwrap();
        match config.methods {
            AnyOrList::List(methods) => assert_eq!(methods, vec!["GET", "POST"]),
            AnyOrList::Any => panic!("array parsed as wildcard"),
        }
    }

    #[test]
    fn omitted_fields_default_to_any() {
        let config: CorsConfig = toml::from_str("").unwrap();
        assert!(matches!(config.headers, AnyOrList::Any));
    }
}

//! Serde adapters for fields that older record files store as `-1` when absent.

pub mod cap {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<i64>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(value.unwrap_or(-1))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        let raw = Option::<i64>::deserialize(d)?;
        Ok(raw.filter(|&v| v != -1))
    }
}

pub mod ratio {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_f64(*v),
            None => s.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let raw = Option::<f64>::deserialize(d)?;
        Ok(raw.filter(|&v| v >= 0.0))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Probe {
        #[serde(default, with = "super::cap")]
        cap: Option<i64>,
        #[serde(default, with = "super::ratio")]
        ratio: Option<f64>,
    }

    #[test]
    fn test_absent_values_write_minus_one() {
        let json = serde_json::to_string(&Probe { cap: None, ratio: None }).unwrap();
        assert_eq!(json, r#"{"cap":-1,"ratio":-1}"#);
    }

    #[test]
    fn test_minus_one_reads_as_absent() {
        let p: Probe = serde_json::from_str(r#"{"cap":-1,"ratio":-1}"#).unwrap();
        assert_eq!(p, Probe { cap: None, ratio: None });
    }

    #[test]
    fn test_present_values_pass_through() {
        let p: Probe = serde_json::from_str(r#"{"cap":37,"ratio":0.75}"#).unwrap();
        assert_eq!(p, Probe { cap: Some(37), ratio: Some(0.75) });
    }

    #[test]
    fn test_missing_fields_default_to_absent() {
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Probe { cap: None, ratio: None });
    }
}

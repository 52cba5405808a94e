use serde_json::Value;

use crate::data::{SkillDictionary, SkillKind};
use crate::error::{Result, TrainingError};
use crate::models::{DataPoint, SkillSeries};

/// Append the trailing period the stored date format expects ("01.01" -> "01.01.").
pub fn normalize_date_label(label: &str) -> String {
    if label.ends_with('.') {
        label.to_string()
    } else {
        format!("{}.", label)
    }
}

/// Turn the parsed `labels` array into date strings.
pub fn date_labels(raw: &[Value]) -> Result<Vec<String>> {
    raw.iter()
        .map(|v| match v {
            Value::String(s) => Ok(normalize_date_label(s)),
            Value::Number(n) => Ok(normalize_date_label(&n.to_string())),
            other => Err(TrainingError::Parse(format!("date label is not a string: {}", other))),
        })
        .collect()
}

fn rating(v: &Value) -> Result<i64> {
    v.as_i64()
        .or_else(|| v.as_f64().map(|f| f.trunc() as i64))
        .ok_or_else(|| TrainingError::Parse(format!("rating is not a number: {}", v)))
}

/// Build a series from one raw dataset object, keeping only label, label_en, hidden and data.
///
/// Values pair with dates by index; a length mismatch truncates to the shorter list.
pub fn assemble_series(raw: &Value, dates: &[String], skills: &SkillDictionary) -> Result<(SkillSeries, SkillKind)> {
    let obj = raw
        .as_object()
        .ok_or_else(|| TrainingError::Parse(format!("dataset is not an object: {}", raw)))?;

    let name = obj
        .get("label")
        .or_else(|| obj.get("name"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| TrainingError::Parse("dataset has no label".to_string()))?;
    let skill = skills.resolve(name)?;

    let hidden = obj.get("hidden").and_then(|v| v.as_bool()).unwrap_or(false);

    let values: &[Value] = match obj.get("data") {
        Some(Value::Array(values)) => values.as_slice(),
        Some(Value::Null) | None => &[],
        Some(other) => {
            return Err(TrainingError::Parse(format!(
                "dataset '{}' data is not an array: {}",
                name, other
            )))
        }
    };
    if values.len() != dates.len() {
        log::warn!(
            "Dataset '{}' has {} values for {} date labels; keeping the first {}",
            skill.label_en,
            values.len(),
            dates.len(),
            values.len().min(dates.len())
        );
    }

    let data = values
        .iter()
        .zip(dates)
        .map(|(v, date)| Ok(DataPoint::new(date.clone(), rating(v)?)))
        .collect::<Result<Vec<_>>>()?;

    let series = SkillSeries::new(skill.label.to_string(), skill.label_en.to_string(), hidden, data);
    Ok((series, skill.kind))
}

/// Assemble every raw dataset, dropping position ratings and hidden series.
pub fn assemble_chart(datasets: &[Value], dates: &[String], skills: &SkillDictionary) -> Result<Vec<SkillSeries>> {
    let mut chart = Vec::with_capacity(datasets.len());
    for raw in datasets {
        let (series, kind) = assemble_series(raw, dates, skills)?;
        if kind == SkillKind::Position {
            log::debug!("Skipping position rating '{}'", series.label_en);
            continue;
        }
        if series.hidden {
            log::debug!("Skipping hidden series '{}'", series.label_en);
            continue;
        }
        chart.push(series);
    }
    Ok(chart)
}

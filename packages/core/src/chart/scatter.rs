//! Scatter plot specification.
//!
//! Circles sized uniformly, colored by a category column, with a tooltip
//! listing every column. Styling is fixed: gold title, legend and axis text
//! on a white 500x500 canvas.

use super::{ChartError, Result};
use crate::models::{Frame, Record};
use crate::utils::{escape_html, escape_script};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";
const SUBTITLE: &str = "Hover on the dots to see more details";

const TEXT_COLOR: &str = "gold";
const GRID_COLOR: &str = "lightgray";
const BACKGROUND: &str = "white";

const POINT_SIZE: u32 = 100;
const WIDTH: u32 = 500;
const HEIGHT: u32 = 500;
const PADDING: u32 = 45;

/// Vega-Lite scatter plot document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterChart {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub data: InlineData,
    pub title: Title,
    pub mark: Mark,
    pub encoding: Encoding,
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub padding: u32,
    pub config: ChartConfig,
}

/// Rows embedded directly in the spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineData {
    pub values: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub text: String,
    pub subtitle: String,
    pub color: String,
    pub font_size: u32,
    pub font_weight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkType,
    pub size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    pub x: FieldDef,
    pub y: FieldDef,
    pub color: FieldDef,
    pub tooltip: Vec<FieldDef>,
}

/// Column reference with its measurement type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: EncodingType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingType {
    Quantitative,
    Nominal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub legend: LegendConfig,
    pub axis: AxisConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendConfig {
    pub title_color: String,
    pub label_color: String,
    pub label_font_size: u32,
    pub title_font_size: u32,
    pub title_font_weight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    pub grid_color: String,
    pub title_color: String,
    pub label_color: String,
    pub title_padding: u32,
}

/// Build a scatter plot of `y` against `x`, colored by `target`
///
/// # Errors
///
/// [`ChartError::UnknownColumn`] if any of the three names is not a column
/// of `frame`.
///
/// # Examples
///
/// ```rust
/// use bandersnatch_core::chart::chart;
/// use bandersnatch_core::models::Frame;
/// use serde_json::json;
///
/// let records = vec![
///     json!({"Health": 30.5, "Energy": 12.0, "Type": "Dragon"}),
///     json!({"Health": 8.25, "Energy": 40.0, "Type": "Fey"}),
/// ]
/// .into_iter()
/// .filter_map(|v| v.as_object().cloned())
/// .collect::<Vec<_>>();
///
/// let spec = chart(&Frame::from_records(&records), "Health", "Energy", "Type").unwrap();
/// assert_eq!(spec.title.text, "Energy by Health for Type");
/// ```
pub fn chart(frame: &Frame, x: &str, y: &str, target: &str) -> Result<ScatterChart> {
    let x = field_def(frame, x)?;
    let y = field_def(frame, y)?;
    let color = field_def(frame, target)?;

    let tooltip = frame
        .columns()
        .iter()
        .map(|column| field_def(frame, column))
        .collect::<Result<Vec<_>>>()?;

    let title = Title {
        text: format!("{} by {} for {}", y.field, x.field, color.field),
        subtitle: SUBTITLE.to_string(),
        color: TEXT_COLOR.to_string(),
        font_size: 20,
        font_weight: "bold".to_string(),
    };

    Ok(ScatterChart {
        schema: VEGA_LITE_SCHEMA.to_string(),
        data: InlineData {
            values: frame.records(),
        },
        title,
        mark: Mark {
            kind: MarkType::Circle,
            size: POINT_SIZE,
        },
        encoding: Encoding {
            x,
            y,
            color,
            tooltip,
        },
        width: WIDTH,
        height: HEIGHT,
        background: BACKGROUND.to_string(),
        padding: PADDING,
        config: ChartConfig {
            legend: LegendConfig {
                title_color: TEXT_COLOR.to_string(),
                label_color: TEXT_COLOR.to_string(),
                label_font_size: 15,
                title_font_size: 15,
                title_font_weight: "bold".to_string(),
            },
            axis: AxisConfig {
                grid_color: GRID_COLOR.to_string(),
                title_color: TEXT_COLOR.to_string(),
                label_color: TEXT_COLOR.to_string(),
                title_padding: 10,
            },
        },
    })
}

impl ScatterChart {
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Standalone HTML page rendering the spec with vega-embed
    pub fn to_html(&self) -> Result<String> {
        let spec = escape_script(&serde_json::to_string(self)?);
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
  <script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
  <script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
</head>
<body>
  <div id="vis"></div>
  <script type="text/javascript">
    vegaEmbed('#vis', {spec}).catch(console.error);
  </script>
</body>
</html>
"#,
            title = escape_html(&self.title.text),
            spec = spec,
        ))
    }
}

fn field_def(frame: &Frame, column: &str) -> Result<FieldDef> {
    let cells = frame
        .column(column)
        .ok_or_else(|| ChartError::UnknownColumn {
            column: column.to_string(),
        })?;

    Ok(FieldDef {
        field: column.to_string(),
        kind: infer_type(&cells),
    })
}

/// Numeric columns are quantitative; anything else, including an all-null
/// column, is nominal.
fn infer_type(cells: &[&Value]) -> EncodingType {
    let mut present = cells.iter().filter(|v| !v.is_null()).peekable();
    if present.peek().is_none() {
        return EncodingType::Nominal;
    }
    if present.all(|v| v.is_number()) {
        EncodingType::Quantitative
    } else {
        EncodingType::Nominal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn monsters() -> Frame {
        let records: Vec<Record> = vec![
            json!({"Name": "Wyrm", "Type": "Dragon", "Health": 120.5, "Energy": 40.0, "Level": 12}),
            json!({"Name": "Pixie", "Type": "Fey", "Health": 9.75, "Energy": 55.25, "Level": 2}),
            json!({"Name": "Lich", "Type": "Undead", "Health": 88.0, "Level": 15}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
        Frame::from_records(&records)
    }

    #[test]
    fn test_title_and_encodings() {
        let spec = chart(&monsters(), "Health", "Energy", "Type").unwrap();

        assert_eq!(spec.title.text, "Energy by Health for Type");
        assert_eq!(spec.title.subtitle, "Hover on the dots to see more details");
        assert_eq!(spec.encoding.x.field, "Health");
        assert_eq!(spec.encoding.x.kind, EncodingType::Quantitative);
        assert_eq!(spec.encoding.y.field, "Energy");
        assert_eq!(spec.encoding.y.kind, EncodingType::Quantitative);
        assert_eq!(spec.encoding.color.field, "Type");
        assert_eq!(spec.encoding.color.kind, EncodingType::Nominal);
    }

    #[test]
    fn test_tooltip_covers_every_column() {
        let frame = monsters();
        let spec = chart(&frame, "Health", "Energy", "Type").unwrap();

        let tooltip: Vec<&str> = spec.encoding.tooltip.iter().map(|f| f.field.as_str()).collect();
        let columns: Vec<&str> = frame.columns().iter().map(String::as_str).collect();
        assert_eq!(tooltip, columns);
    }

    #[test]
    fn test_fixed_styling() {
        let json = chart(&monsters(), "Level", "Health", "Type")
            .unwrap()
            .to_json()
            .unwrap();

        assert_eq!(json["$schema"], VEGA_LITE_SCHEMA);
        assert_eq!(json["mark"], json!({"type": "circle", "size": 100}));
        assert_eq!(json["width"], 500);
        assert_eq!(json["height"], 500);
        assert_eq!(json["background"], "white");
        assert_eq!(json["padding"], 45);
        assert_eq!(json["title"]["color"], "gold");
        assert_eq!(json["title"]["fontSize"], 20);
        assert_eq!(json["config"]["legend"]["labelColor"], "gold");
        assert_eq!(json["config"]["legend"]["titleFontWeight"], "bold");
        assert_eq!(json["config"]["axis"]["gridColor"], "lightgray");
        assert_eq!(json["config"]["axis"]["titlePadding"], 10);
        assert_eq!(json["encoding"]["color"]["type"], "nominal");
    }

    #[test]
    fn test_data_embeds_rows_without_nulls() {
        let spec = chart(&monsters(), "Health", "Energy", "Type").unwrap();
        assert_eq!(spec.data.values.len(), 3);
        assert!(!spec.data.values[2].contains_key("Energy"));
    }

    #[test]
    fn test_unknown_column() {
        let err = chart(&monsters(), "Health", "Mana", "Type").unwrap_err();
        assert!(matches!(err, ChartError::UnknownColumn { ref column } if column == "Mana"));
    }

    #[test]
    fn test_pure_and_non_mutating() {
        let frame = monsters();
        let before = frame.clone();

        let a = chart(&frame, "Health", "Energy", "Type").unwrap();
        let b = chart(&frame, "Health", "Energy", "Type").unwrap();

        assert_eq!(a, b);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_mixed_column_is_nominal() {
        let records: Vec<Record> = vec![json!({"v": 1, "c": "a"}), json!({"v": "two", "c": "b"})]
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect();
        let spec = chart(&Frame::from_records(&records), "v", "v", "c").unwrap();
        assert_eq!(spec.encoding.x.kind, EncodingType::Nominal);
    }

    #[test]
    fn test_html_page_embeds_spec_safely() {
        let records: Vec<Record> = vec![json!({"x": 1, "y": 2, "Name": "</script>"})]
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect();
        let html = chart(&Frame::from_records(&records), "x", "y", "Name")
            .unwrap()
            .to_html()
            .unwrap();

        assert!(html.contains("vegaEmbed('#vis', {"));
        assert!(html.contains("<title>y by x for Name</title>"));
        assert_eq!(html.matches("</script>").count(), 4);
    }

    #[test]
    fn test_spec_round_trips_through_json() {
        let spec = chart(&monsters(), "Health", "Energy", "Type").unwrap();
        let text = spec.to_string_pretty().unwrap();
        let parsed: ScatterChart = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, spec);
    }
}

//! Declarative Chart Specifications
//!
//! Builds Vega-Lite documents from a [`Frame`](crate::models::Frame). Nothing
//! here renders pixels: the output is a JSON spec (or a standalone HTML page
//! that loads vega-embed) for an external renderer.

mod error;
mod scatter;

pub use error::{ChartError, Result};
pub use scatter::{
    chart, AxisConfig, ChartConfig, Encoding, EncodingType, FieldDef, InlineData, LegendConfig,
    Mark, MarkType, ScatterChart, Title,
};

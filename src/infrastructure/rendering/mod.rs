//! Chart mounting in the browser. ECharts is loaded by the host page.

pub mod echarts;

pub use echarts::{EChartsRenderer, MountedChart};

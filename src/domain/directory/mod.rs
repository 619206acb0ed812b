//! Companies and indicators the user can pick from.

pub mod company;
pub mod indicator;

pub use company::{Company, CompanyDirectory, default_companies};
pub use indicator::{
    ChartType, Indicator, IndicatorCatalog, IndicatorCategory, IndicatorGroup,
    IndicatorSelection, default_catalog,
};

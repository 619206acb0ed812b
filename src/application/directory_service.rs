use crate::application::fetcher::DashboardFetcher;
use crate::domain::{
    directory::{Company, CompanyDirectory, IndicatorCatalog, default_catalog, default_companies},
    errors::SelectionError,
    events::{EventDispatcher, SelectionBus, SelectionEvent},
    logging::LogComponent,
};
use std::rc::Rc;

/// Company list, indicator catalog and the selection operations on them.
pub struct DirectoryService {
    companies: CompanyDirectory,
    catalog: IndicatorCatalog,
    bus: Rc<SelectionBus>,
    degraded: bool,
}

impl DirectoryService {
    pub fn new(companies: CompanyDirectory, catalog: IndicatorCatalog, bus: Rc<SelectionBus>) -> Self {
        Self { companies, catalog, bus, degraded: false }
    }

    /// Loads companies and catalog, substituting embedded data on failure.
    pub async fn load<F: DashboardFetcher>(fetcher: &F, bus: Rc<SelectionBus>, search_limit: usize) -> Self {
        let component = LogComponent::Application("Directory");

        let (companies, degraded) = match fetcher.fetch_companies().await {
            Ok(loaded) => {
                crate::log_info!(component.clone(), "loaded {} companies", loaded.len());
                (CompanyDirectory::padded(loaded, default_companies()), false)
            }
            Err(error) => {
                crate::log_warn!(component.clone(), "company list unavailable, using fallback: {}", error);
                (CompanyDirectory::new(default_companies()), true)
            }
        };

        let catalog = match fetcher.fetch_indicator_catalog().await {
            Ok(catalog) if !catalog.is_empty() => catalog,
            Ok(_) => {
                crate::log_warn!(component, "indicator catalog empty, using fallback");
                default_catalog()
            }
            Err(error) => {
                crate::log_warn!(component, "indicator catalog unavailable, using fallback: {}", error);
                default_catalog()
            }
        };

        Self {
            companies: companies.with_search_limit(search_limit),
            catalog,
            bus,
            degraded,
        }
    }

    pub fn search(&self, query: &str) -> Vec<Company> {
        self.companies.search(query)
    }

    pub fn select_company(&self, code: &str) -> Result<(), SelectionError> {
        let company = self
            .companies
            .find(code)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownCompany(code.to_string()))?;
        self.bus.publish(SelectionEvent::CompanySelected(company));
        Ok(())
    }

    pub fn select_indicator(&self, code: &str) -> Result<(), SelectionError> {
        let selection = self
            .catalog
            .find(code)
            .ok_or_else(|| SelectionError::UnknownIndicator(code.to_string()))?;
        self.bus.publish(SelectionEvent::IndicatorSelected(selection));
        Ok(())
    }

    pub fn clear_company(&self) {
        self.bus.publish(SelectionEvent::CompanyCleared);
    }

    pub fn clear_indicator(&self) {
        self.bus.publish(SelectionEvent::IndicatorCleared);
    }

    pub fn companies(&self) -> &CompanyDirectory {
        &self.companies
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    pub fn bus(&self) -> &Rc<SelectionBus> {
        &self.bus
    }

    /// True when the company list came from the embedded fallback.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

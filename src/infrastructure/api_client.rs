use crate::application::fetcher::DashboardFetcher;
use crate::config::DashboardConfig;
use crate::domain::{
    analysis::{AnalysisResult, InterpretationFrame},
    chart::{ChartData, RawDataRow},
    directory::{Company, IndicatorCatalog, IndicatorSelection},
    errors::FetchResult,
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::{
    dto::{CompaniesDto, IndicatorGroupsDto, RawRowsDto},
    http::{GlooHttpClient, HttpUtils},
};
use std::cell::RefCell;
use std::rc::Rc;

/// URL templates of the backend and the static assets.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    period: String,
    spec_path: String,
    definitions_path: String,
}

impl Endpoints {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            period: config.period.clone(),
            spec_path: config.spec_path.clone(),
            definitions_path: config.definitions_path.trim_end_matches('/').to_string(),
        }
    }

    pub fn companies(&self) -> String {
        "/api/companies".to_string()
    }

    pub fn indicators(&self) -> String {
        "/api/indicators".to_string()
    }

    pub fn chart(&self, ts_code: &str, indicator_code: &str) -> String {
        self.with_period(&format!(
            "/api/chart/{}/{}",
            HttpUtils::url_encode(ts_code),
            HttpUtils::url_encode(indicator_code)
        ))
    }

    pub fn analysis(&self, ts_code: &str) -> String {
        self.with_period(&format!("/api/analysis/{}", HttpUtils::url_encode(ts_code)))
    }

    pub fn raw_rows(&self, ts_code: &str, indicator_code: &str) -> String {
        self.with_period(&format!(
            "/api/db/indicator/{}/{}",
            HttpUtils::url_encode(ts_code),
            HttpUtils::url_encode(indicator_code)
        ))
    }

    pub fn spec(&self) -> String {
        self.spec_path.clone()
    }

    pub fn definition(&self, indicator_code: &str) -> String {
        format!("{}/{}.json", self.definitions_path, HttpUtils::url_encode(indicator_code))
    }

    fn with_period(&self, path: &str) -> String {
        HttpUtils::build_url_with_params(path, &[("period", &self.period)])
    }
}

/// `DashboardFetcher` over the REST backend and the static JSON assets.
pub struct ApiClient {
    api: GlooHttpClient,
    assets: GlooHttpClient,
    endpoints: Endpoints,
    spec_cache: RefCell<Option<Rc<IndicatorCatalog>>>,
}

impl ApiClient {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            api: GlooHttpClient::new(&config.api_base),
            assets: GlooHttpClient::default(),
            endpoints: Endpoints::new(config),
            spec_cache: RefCell::new(None),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Static indicator specification, kept after the first successful load.
    pub async fn indicator_spec(&self) -> FetchResult<Rc<IndicatorCatalog>> {
        if let Some(cached) = self.spec_cache.borrow().as_ref() {
            return Ok(Rc::clone(cached));
        }

        let dto: IndicatorGroupsDto = self.assets.get_json(&self.endpoints.spec()).await?;
        let catalog = Rc::new(dto.to_domain_catalog());
        get_logger().info(
            LogComponent::Infrastructure("ApiClient"),
            &format!("📋 indicator specification loaded: {} groups", catalog.groups().len()),
        );
        *self.spec_cache.borrow_mut() = Some(Rc::clone(&catalog));
        Ok(catalog)
    }

    async fn definition_frame(&self, indicator: &IndicatorSelection) -> FetchResult<Option<InterpretationFrame>> {
        let document: serde_json::Value = self.assets.get_json(&self.endpoints.definition(indicator.code())).await?;
        Ok(InterpretationFrame::from_definition_document(
            &document,
            indicator.code(),
            indicator.name(),
        ))
    }
}

impl DashboardFetcher for ApiClient {
    async fn fetch_companies(&self) -> FetchResult<Vec<Company>> {
        let dto: CompaniesDto = self.api.get_json(&self.endpoints.companies()).await?;
        Ok(dto.into_domain())
    }

    async fn fetch_indicator_catalog(&self) -> FetchResult<IndicatorCatalog> {
        let reason = match self.api.get_json::<IndicatorGroupsDto>(&self.endpoints.indicators()).await {
            Ok(dto) => {
                let catalog = dto.to_domain_catalog();
                if !catalog.is_empty() {
                    return Ok(catalog);
                }
                "empty response".to_string()
            }
            Err(error) => error.to_string(),
        };
        get_logger().warn(
            LogComponent::Infrastructure("ApiClient"),
            &format!("indicator API unavailable ({}), trying specification file", reason),
        );
        let catalog = self.indicator_spec().await?;
        Ok(catalog.as_ref().clone())
    }

    async fn fetch_chart_data(&self, company: &Company, indicator: &IndicatorSelection) -> FetchResult<ChartData> {
        self.api
            .get_json(&self.endpoints.chart(&company.code, indicator.code()))
            .await
    }

    async fn fetch_analysis(&self, company: &Company) -> FetchResult<AnalysisResult> {
        self.api.get_json(&self.endpoints.analysis(&company.code)).await
    }

    async fn fetch_interpretation(&self, indicator: &IndicatorSelection) -> InterpretationFrame {
        match self.definition_frame(indicator).await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                get_logger().debug(
                    LogComponent::Infrastructure("ApiClient"),
                    &format!("no definition entry for {}, using fallback", indicator.code()),
                );
                InterpretationFrame::fallback(indicator.code(), indicator.name())
            }
            Err(error) => {
                get_logger().debug(
                    LogComponent::Infrastructure("ApiClient"),
                    &format!("definition for {} unavailable ({}), using fallback", indicator.code(), error),
                );
                InterpretationFrame::fallback(indicator.code(), indicator.name())
            }
        }
    }

    async fn fetch_raw_rows(&self, company: &Company, indicator: &IndicatorSelection) -> FetchResult<Vec<RawDataRow>> {
        let dto: RawRowsDto = self
            .api
            .get_json(&self.endpoints.raw_rows(&company.code, indicator.code()))
            .await?;
        Ok(dto.into_domain())
    }
}

use finance_dashboard_wasm::config::DashboardConfig;
use finance_dashboard_wasm::domain::chart::RawDataRow;
use finance_dashboard_wasm::infrastructure::dto::{IndicatorGroupsDto, RawRowsDto};
use finance_dashboard_wasm::infrastructure::{Endpoints, GlooHttpClient};

#[test]
fn period_and_paths_follow_config() {
    let config = DashboardConfig::default()
        .with_period("past_5_years")
        .with_api_base("http://localhost:8001/");
    let endpoints = Endpoints::new(&config);

    assert_eq!(endpoints.analysis("600519.SH"), "/api/analysis/600519.SH?period=past_5_years");
    assert_eq!(endpoints.indicators(), "/api/indicators");
    assert_eq!(endpoints.spec(), "/data/indicators_specification_with_prefix.json");
    assert_eq!(
        GlooHttpClient::new(&config.api_base).url_for(&endpoints.chart("000858.SZ", "7.52.1")),
        "http://localhost:8001/api/chart/000858.SZ/7.52.1?period=past_5_years"
    );
}

#[test]
fn bare_group_array_builds_a_catalog() {
    let dto: IndicatorGroupsDto = serde_json::from_str(
        r#"[{"group_code":"7.12","group_name":"利润结构健康度","indicators":[
            {"indicator_code":"7.12.1","indicator_name":"三支柱占比","chart_type":"堆叠柱状图","unit":"%"}
        ]}]"#,
    )
    .unwrap();
    let catalog = dto.to_domain_catalog();
    let group = &catalog.groups()[0];
    assert_eq!(group.indicators[0].unit.as_deref(), Some("%"));
    assert_eq!(catalog.find("7.12").unwrap().chart_indicators().len(), 1);
}

#[test]
fn raw_rows_accept_wrapped_and_bare_payloads() {
    let wrapped: RawRowsDto =
        serde_json::from_str(r#"{"data":[{"year":"2023","field":"core_profit","value":25000.0,"unit":"元"}]}"#).unwrap();
    let bare: RawRowsDto = serde_json::from_str(r#"[{"year":2022,"period":"年报","value":"N/A"}]"#).unwrap();

    let wrapped: Vec<RawDataRow> = wrapped.into_domain();
    let bare = bare.into_domain();
    assert_eq!(wrapped[0].display_value(), "2.50 亿");
    assert_eq!(bare[0].year, "2022");
    assert_eq!(bare[0].display_value(), "N/A");
}

#[test]
fn raw_row_cells_include_the_indicator_code() {
    let rows: RawRowsDto = serde_json::from_str(
        r#"[{"year":2023,"period":"年报","indicator_code":"7.11","field":"core_profit","value":500.0,"unit":"元"}]"#,
    )
    .unwrap();
    let rows = rows.into_domain();
    let row = &rows[0];

    assert_eq!(RawDataRow::HEADERS[2], "指标代码");
    assert_eq!(row.cells(), ["2023", "年报", "7.11", "core_profit", "500.00", "元"].map(String::from));
}

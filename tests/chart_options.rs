use finance_dashboard_wasm::application::DisplayModel;
use finance_dashboard_wasm::domain::analysis::{AnalysisResult, InterpretationFrame};
use finance_dashboard_wasm::domain::chart::{
    ChartData, ChartDataPoint, ChartOptionsBuilder, ChartSpec, SeriesStyle,
};
use finance_dashboard_wasm::domain::directory::{ChartType, Company, IndicatorSelection, default_catalog};
use serde_json::json;

fn pillar_point(period: &str, core: f64, other: f64, misc: f64) -> ChartDataPoint {
    ChartDataPoint { period: period.to_string(), ..Default::default() }.with_values(json!({
        "core_profit_ratio": core,
        "other_income_ratio": other,
        "miscellaneous_income_ratio": misc,
    }))
}

#[test]
fn three_pillars_stack_the_ratio_fields() {
    let points = vec![pillar_point("2022", 80.0, 15.0, 5.0), pillar_point("2023", 70.0, 20.0, 40.0)];
    let spec = ChartSpec::new(ChartType::Bar, "利润结构", "7.12");
    let option = ChartOptionsBuilder::new(&points, &spec).build();

    let series = option["series"].as_array().unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0]["name"], json!("核心利润占比"));
    assert_eq!(series[2]["data"], json!([5.0, 40.0]));
    assert!(series.iter().all(|s| s["stack"] == json!("total")));
    assert_eq!(option["yAxis"]["max"], json!(110.0));
}

#[test]
fn bar_titled_three_pillar_uses_pillar_layout() {
    let points = vec![pillar_point("2023", 60.0, 30.0, 10.0)];
    let spec = ChartSpec::new(ChartType::Bar, "三支柱结构", "7.99");
    let option = ChartOptionsBuilder::new(&points, &spec).build();
    assert_eq!(option["series"].as_array().unwrap().len(), 3);
}

#[test]
fn stacked_bar_reads_values_in_key_order() {
    let points = vec![
        ChartDataPoint { period: "2023".into(), ..Default::default() }
            .with_values(json!({ "operating": 120.0, "investing": -40.0, "financing": 10.0 })),
    ];
    let spec = ChartSpec::new(ChartType::StackedBar, "现金流结构", "7.25").with_series(vec![SeriesStyle {
        name: Some("经营活动".into()),
        color: Some("#123456".into()),
    }]);
    let option = ChartOptionsBuilder::new(&points, &spec).build();

    assert_eq!(option["series"].as_array().unwrap().len(), 1);
    assert_eq!(option["series"][0]["name"], json!("经营活动"));
    assert_eq!(option["series"][0]["itemStyle"]["color"], json!("#123456"));
    assert_eq!(option["series"][0]["data"], json!([120.0]));

    let unstyled = ChartSpec::new(ChartType::StackedBar, "现金流结构", "7.25");
    let option = ChartOptionsBuilder::new(&points, &unstyled).build();
    assert_eq!(option["legend"]["data"], json!(["operating", "investing", "financing"]));
}

#[test]
fn line_without_scalars_uses_series_indexed_field() {
    let points = vec![
        ChartDataPoint { period: "2023".into(), ..Default::default() }
            .with_values(json!({ "turnover": 1.23456, "days": 292.0 })),
    ];
    let mut spec = ChartSpec::new(ChartType::Line, "周转", "7.32");
    spec.series_index = 1;
    let option = ChartOptionsBuilder::new(&points, &spec).build();
    assert_eq!(option["series"][0]["name"], json!("days"));
    assert_eq!(option["series"][0]["data"], json!([292.0]));
}

#[test]
fn quadrant_chart_marks_center_and_labels() {
    let points = vec![ChartDataPoint::xy("2022", 20.0, 30.0), ChartDataPoint::xy("2023", 60.0, 70.0)];
    let spec = ChartSpec::new(ChartType::Scatter, "资本结构定位", "7.33.1");
    let option = ChartOptionsBuilder::new(&points, &spec).build();

    assert_eq!(option["xAxis"]["min"], json!(0.0));
    assert_eq!(option["xAxis"]["max"], json!(100.0));
    assert_eq!(option["series"][0]["markLine"]["data"], json!([{ "xAxis": 50.0 }, { "yAxis": 50.0 }]));
    assert_eq!(option["series"][0]["data"][0]["itemStyle"]["color"], json!("#45b7d1"));
    assert_eq!(option["series"][1]["data"][0]["name"], json!("金融负债驱动型"));
    assert!(option["series"][0]["data"][1]["name"].as_str().unwrap().contains("第一象限"));
}

#[test]
fn backend_chart_config_overrides_catalog_metadata() {
    let chart_data: ChartData = serde_json::from_value(json!({
        "success": true,
        "real_data": true,
        "chart_type": "柱状图",
        "chart_config": { "type": "bar", "title": "期间费用率", "unit": "%" },
        "data": [{ "period": "2023", "value": 12.345 }]
    }))
    .unwrap();
    let indicator: IndicatorSelection = default_catalog().find("7.13").unwrap();
    let model = DisplayModel::build(
        Company::new("000858.SZ", "五粮液", None),
        indicator,
        chart_data,
        &AnalysisResult::default(),
        InterpretationFrame::fallback("7.13", "费用控制能力"),
        7,
        "past_10_years",
    );

    assert_eq!(model.charts[0].container_id, "chart-7-0");
    assert_eq!(model.charts[0].title, "期间费用率");
    let option = &model.charts[0].option;
    assert_eq!(option["series"][0]["type"], json!("bar"));
    assert_eq!(option["yAxis"]["name"], json!("数值 (%)"));
    assert!(!model.analysis.available);
}

#[test]
fn stacked_bar_converts_wan_amounts() {
    let points = vec![
        ChartDataPoint { period: "2023".into(), ..Default::default() }
            .with_values(json!({ "operating": 12_000_000.0, "investing": -3_456_789.0 })),
    ];
    let spec = ChartSpec::new(ChartType::StackedBar, "现金流结构", "7.25").with_unit("万元");
    let option = ChartOptionsBuilder::new(&points, &spec).build();

    assert_eq!(option["yAxis"]["name"], json!("数值 (万元)"));
    assert_eq!(option["series"][0]["data"], json!([1200.0]));
    assert_eq!(option["series"][1]["data"], json!([-345.68]));
}

#[test]
fn values_fallback_converts_wan_amounts() {
    let points = vec![
        ChartDataPoint { period: "2023".into(), ..Default::default() }
            .with_values(json!({ "core_profit": 12_345_678.0 })),
    ];
    let spec = ChartSpec::new(ChartType::Line, "核心利润", "7.11");
    let option = ChartOptionsBuilder::new(&points, &spec).build();

    assert_eq!(option["yAxis"]["name"], json!("数值 (万元)"));
    assert_eq!(option["series"][0]["name"], json!("core_profit"));
    assert_eq!(option["series"][0]["data"], json!([1234.57]));
}

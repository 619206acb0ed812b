use finance_dashboard_wasm::domain::analysis::{AnalysisReport, AnalysisResult};
use serde_json::json;

fn result(analysis: serde_json::Value) -> AnalysisResult {
    serde_json::from_value(json!({ "found": true, "analysis": analysis })).unwrap()
}

#[test]
fn alternate_list_keys_are_recognised() {
    let report = AnalysisReport::from_result(&result(json!({
        "overall_assessment": { "score": 72, "level": "良好", "trend": "稳定" },
        "key_findings": ["毛利率领先同业"],
        "weaknesses": ["存货周转放缓", "应收账款上升"],
        "investment_recommendation": "持有"
    })));

    let assessment = report.assessment.as_ref().unwrap();
    assert_eq!(assessment.score.as_deref(), Some("72"));
    assert_eq!(assessment.trend.as_deref(), Some("稳定"));
    assert_eq!(report.strengths, vec!["毛利率领先同业"]);
    assert_eq!(report.risks.len(), 2);
    assert_eq!(report.recommendation.as_deref(), Some("持有"));
    assert!(report.narrative.is_none());
}

#[test]
fn empty_strength_list_falls_through_to_next_key() {
    let report = AnalysisReport::from_result(&result(json!({
        "strength_areas": [],
        "strengths": ["现金流充沛"]
    })));
    assert_eq!(report.strengths, vec!["现金流充沛"]);
    assert!(report.assessment.is_none());
}

#[test]
fn summary_and_recommendations_come_from_the_envelope() {
    let parsed: AnalysisResult = serde_json::from_value(json!({
        "found": true,
        "analysis": {},
        "summary": "整体稳健",
        "recommendations": ["关注估值"]
    }))
    .unwrap();
    let report = AnalysisReport::from_result(&parsed);
    assert!(report.available);
    assert!(report.has_content());
    assert_eq!(report.summary.as_deref(), Some("整体稳健"));
    assert_eq!(report.recommendations, vec!["关注估值"]);
}

#[test]
fn missing_analysis_is_unavailable() {
    let parsed: AnalysisResult = serde_json::from_value(json!({ "found": false })).unwrap();
    assert_eq!(AnalysisReport::from_result(&parsed), AnalysisReport::unavailable());
}

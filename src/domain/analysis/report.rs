use serde::Deserialize;
use serde_json::Value;

/// Payload of the AI-analysis endpoint. Kept loosely typed: the report
/// inside `analysis` changes shape between backend versions.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub analysis: Value,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverallAssessment {
    pub score: Option<String>,
    pub level: Option<String>,
    pub trend: Option<String>,
    pub industry_comparison: Option<String>,
}

impl OverallAssessment {
    pub fn is_empty(&self) -> bool {
        self.score.is_none() && self.level.is_none()
    }
}

/// Display-ready view of an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisReport {
    pub available: bool,
    pub assessment: Option<OverallAssessment>,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub recommendation: Option<String>,
    pub summary: Option<String>,
    pub recommendations: Vec<String>,
    /// Free text when the report is not structured.
    pub narrative: Option<String>,
}

impl AnalysisReport {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn from_result(result: &AnalysisResult) -> Self {
        if !result.found {
            return Self::unavailable();
        }

        let mut report = Self {
            available: true,
            summary: result.summary.clone(),
            recommendations: result.recommendations.clone(),
            ..Self::default()
        };

        let body = result.analysis.get("analysis_report_json").unwrap_or(&result.analysis);
        let parsed;
        let body = match body {
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(value @ Value::Object(_)) => {
                    parsed = value;
                    &parsed
                }
                _ => {
                    report.narrative = Some(text.clone());
                    return report;
                }
            },
            other => other,
        };

        if let Some(overall) = body.get("overall_assessment") {
            let assessment = OverallAssessment {
                score: text_of(overall.get("score")),
                level: text_of(overall.get("level")),
                trend: text_of(overall.get("trend")),
                industry_comparison: text_of(overall.get("industry_comparison")),
            };
            report.assessment = (!assessment.is_empty()).then_some(assessment);
        }
        report.strengths = first_list(body, &["strength_areas", "key_findings", "strengths"]);
        report.risks = first_list(body, &["risk_factors", "weaknesses"]);
        report.recommendation = text_of(body.get("investment_recommendation"));
        if report.summary.is_none() {
            report.summary = text_of(body.get("summary"));
        }
        report
    }

    pub fn has_content(&self) -> bool {
        self.assessment.is_some()
            || !self.strengths.is_empty()
            || !self.risks.is_empty()
            || self.recommendation.is_some()
            || self.summary.is_some()
            || !self.recommendations.is_empty()
            || self.narrative.is_some()
    }
}

fn text_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_list(body: &Value, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .filter_map(|key| body.get(*key)?.as_array())
        .find(|items| !items.is_empty())
        .map(|items| items.iter().filter_map(|item| text_of(Some(item))).collect())
        .unwrap_or_default()
}

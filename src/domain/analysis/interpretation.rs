use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Where an interpretation frame came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretationSource {
    Definition,
    Builtin,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TypicalPattern {
    #[serde(skip)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub characteristics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AnalysisReference {
    #[serde(default)]
    pub analysis_framework: Option<String>,
    #[serde(default, deserialize_with = "keyed_patterns")]
    pub typical_patterns: Vec<TypicalPattern>,
}

/// Narrative, threshold levels and optional analysis framework of an indicator.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Interpretation {
    #[serde(default)]
    pub core_interpretation: Option<String>,
    /// Level to description, in document order.
    #[serde(default, deserialize_with = "ordered_pairs")]
    pub thresholds: Vec<(String, String)>,
    #[serde(default)]
    pub ai_analysis_reference: Option<AnalysisReference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterpretationFrame {
    pub code: String,
    pub name: String,
    pub interpretation: Interpretation,
    pub source: InterpretationSource,
}

/// Entry of a `{definitions}/{code}.json` document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndicatorDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub interpretation: Interpretation,
    #[serde(default)]
    pub charts: Vec<Value>,
    #[serde(default)]
    pub calculation_logic: Option<Value>,
}

impl InterpretationFrame {
    /// Frame from a definition document, if it has an entry for `code`.
    pub fn from_definition_document(document: &Value, code: &str, fallback_name: &str) -> Option<Self> {
        let entry = document.get(code)?;
        let definition = IndicatorDefinition::deserialize(entry).ok()?;
        Some(Self {
            code: code.to_string(),
            name: definition.name.unwrap_or_else(|| fallback_name.to_string()),
            interpretation: definition.interpretation,
            source: InterpretationSource::Definition,
        })
    }

    /// Built-in frame for well-known codes, else a generic one. Never fails.
    pub fn fallback(code: &str, name: &str) -> Self {
        let display_name = if name.is_empty() { format!("指标 {}", code) } else { name.to_string() };
        match builtin_interpretation(code) {
            Some(interpretation) => Self {
                code: code.to_string(),
                name: display_name,
                interpretation,
                source: InterpretationSource::Builtin,
            },
            None => {
                let core = if name.is_empty() {
                    format!("指标 {} 的分析框架", code)
                } else {
                    format!("指标 {} ({})的分析框架", code, name)
                };
                Self {
                    code: code.to_string(),
                    name: display_name,
                    interpretation: Interpretation {
                        core_interpretation: Some(core),
                        thresholds: levels(["优秀", "良好", "警告", "危险"]),
                        ai_analysis_reference: None,
                    },
                    source: InterpretationSource::Generic,
                }
            }
        }
    }
}

fn levels(texts: [&str; 4]) -> Vec<(String, String)> {
    ["excellent", "good", "warning", "critical"]
        .iter()
        .zip(texts)
        .map(|(level, text)| (level.to_string(), text.to_string()))
        .collect()
}

fn framed(core: &str, thresholds: [&str; 4]) -> Interpretation {
    Interpretation {
        core_interpretation: Some(core.to_string()),
        thresholds: levels(thresholds),
        ai_analysis_reference: None,
    }
}

fn pattern(key: &str, name: &str, characteristics: &[&str]) -> TypicalPattern {
    TypicalPattern {
        key: key.to_string(),
        name: name.to_string(),
        characteristics: characteristics.iter().map(|c| c.to_string()).collect(),
    }
}

fn builtin_interpretation(code: &str) -> Option<Interpretation> {
    let interpretation = match code {
        "7.11" => framed(
            "核心利润反映公司主营业务盈利能力，排除投资收益、政府补助等非经常性项目影响。",
            [
                "核心利润率 > 20% (主营业务盈利能力强，具备强竞争力)",
                "核心利润率 10%-20% (主营业务盈利能力良好，处于健康水平)",
                "核心利润率 5%-10% (主营业务盈利能力一般，面临竞争压力)",
                "核心利润率 < 5% (主营业务盈利能力弱，需关注经营风险)",
            ],
        ),
        "7.12" => Interpretation {
            core_interpretation: Some(
                "诊断盈利根基。健康结构以核心利润为稳定高占比支柱。杂项收益占比高则盈利波动大、可持续性存疑。"
                    .to_string(),
            ),
            thresholds: Vec::new(),
            ai_analysis_reference: Some(AnalysisReference {
                analysis_framework: Some("利润结构稳定性分析框架".to_string()),
                typical_patterns: vec![
                    pattern(
                        "healthy",
                        "健康稳健型",
                        &["核心利润占比>70%", "其他收益占比<25%", "杂项收益占比<10%", "结构稳定连续3年以上"],
                    ),
                    pattern(
                        "policy_driven",
                        "政策驱动型",
                        &["其他收益占比>30%", "与政府补贴/税收优惠高度相关", "核心利润占比波动大"],
                    ),
                    pattern(
                        "investment_driven",
                        "投资驱动/波动型",
                        &["杂项收益占比>15%", "与投资收益/公允价值变动相关", "盈利波动性高"],
                    ),
                    pattern(
                        "weak_foundation",
                        "根基薄弱型",
                        &["核心利润占比<50%", "结构频繁变动", "盈利可持续性存疑"],
                    ),
                ],
            }),
        },
        "7.13" => framed(
            "分析资产结构对收益的贡献，识别结构性盈利优势。",
            [
                "结构性收益比率 > 1.5 (资产结构优化，盈利效率高)",
                "结构性收益比率 1.0-1.5 (资产结构合理，盈利效率正常)",
                "结构性收益比率 0.7-1.0 (资产结构有待优化)",
                "结构性收益比率 < 0.7 (资产结构不合理，影响盈利)",
            ],
        ),
        "7.14" => framed(
            "评估经营资产轻重结构，识别资产虚化风险。",
            [
                "轻资产指数 > 0.7 (资产结构轻盈，运营效率高)",
                "轻资产指数 0.5-0.7 (资产结构合理)",
                "轻资产指数 0.3-0.5 (资产偏重，效率待提升)",
                "轻资产指数 < 0.3 (资产过重，运营压力大)",
            ],
        ),
        "7.21" => framed(
            "衡量利润转化为现金的能力，反映盈利质量。",
            [
                "获现率 > 1.2 (利润质量优秀，现金回收能力强)",
                "获现率 0.8-1.2 (利润质量良好，现金回收正常)",
                "获现率 0.5-0.8 (利润质量一般，现金回收偏弱)",
                "获现率 < 0.5 (利润质量差，现金回收困难)",
            ],
        ),
        "7.31" => framed(
            "分析造血与输血结构，评估现金流健康度。",
            [
                "造血占比 > 80% (现金流健康，内生增长强)",
                "造血占比 60%-80% (现金流良好)",
                "造血占比 40%-60% (依赖外部输血)",
                "造血占比 < 40% (现金流紧张，依赖性强)",
            ],
        ),
        "7.41" => framed(
            "评估重构后经营资产运营效率。",
            [
                "周转率 > 2.0 (运营效率优秀)",
                "周转率 1.0-2.0 (运营效率良好)",
                "周转率 0.5-1.0 (运营效率一般)",
                "周转率 < 0.5 (运营效率低下)",
            ],
        ),
        "7.51" => framed(
            "分析结构性净资产收益能力。",
            [
                "结构性ROE > 15% (股东回报优秀)",
                "结构性ROE 10%-15% (股东回报良好)",
                "结构性ROE 5%-10% (股东回报一般)",
                "结构性ROE < 5% (股东回报不足)",
            ],
        ),
        _ => return None,
    };
    Some(interpretation)
}

fn ordered_pairs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<(String, String)>, D::Error> {
    let map = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(map
        .into_iter()
        .map(|(level, text)| {
            let text = match text {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (level, text)
        })
        .collect())
}

fn keyed_patterns<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TypicalPattern>, D::Error> {
    let map = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| {
            let mut pattern = TypicalPattern::deserialize(value).ok()?;
            pattern.key = key;
            Some(pattern)
        })
        .collect())
}

use derive_more::Display;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Quadrant {
    #[display(fmt = "第一象限")]
    First,
    #[display(fmt = "第二象限")]
    Second,
    #[display(fmt = "第三象限")]
    Third,
    #[display(fmt = "第四象限")]
    Fourth,
}

impl Quadrant {
    pub fn index(self) -> usize {
        match self {
            Quadrant::First => 0,
            Quadrant::Second => 1,
            Quadrant::Third => 2,
            Quadrant::Fourth => 3,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Quadrant::First => "#ff6b6b",
            Quadrant::Second => "#4ecdc4",
            Quadrant::Third => "#45b7d1",
            Quadrant::Fourth => "#96ceb4",
        }
    }
}

/// Quadrant of `(x, y)` around `(cx, cy)`. Points on an axis belong to the
/// quadrant on its non-negative side.
pub fn classify(x: f64, y: f64, cx: f64, cy: f64) -> Quadrant {
    match (x >= cx, y >= cy) {
        (true, true) => Quadrant::First,
        (false, true) => Quadrant::Second,
        (false, false) => Quadrant::Third,
        (true, false) => Quadrant::Fourth,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisRange {
    Fixed { min: f64, max: f64 },
    /// Centered on zero, 20% wider than the largest magnitude, at least 1.
    Symmetric,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Center, axes and labels of a quadrant chart for one indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadrantFrame {
    pub center: (f64, f64),
    pub range: AxisRange,
    pub x_axis_name: &'static str,
    pub y_axis_name: &'static str,
    names: Option<[&'static str; 4]>,
}

const CAPITAL_STRUCTURE_NAMES: [&str; 4] = ["金融负债驱动型", "利润积累型", "经营驱动型", "股东输血型"];
const FINANCIAL_STRATEGY_NAMES: [&str; 4] =
    ["利润资金双增型", "资金占有能力强型", "利润资金双输型", "账面利润型"];

impl QuadrantFrame {
    pub fn for_indicator(indicator_code: &str, chart_name: &str) -> Self {
        match indicator_code {
            "7.33" | "7.33.1" => Self {
                center: (50.0, 50.0),
                range: AxisRange::Fixed { min: 0.0, max: 100.0 },
                x_axis_name: "输血占比",
                y_axis_name: "造血占比",
                names: Some(CAPITAL_STRUCTURE_NAMES),
            },
            "7.52" | "7.52.1" => Self {
                center: (0.0, 0.0),
                range: AxisRange::Fixed { min: -100.0, max: 100.0 },
                x_axis_name: "资金状态",
                y_axis_name: "价值创造",
                names: Some(FINANCIAL_STRATEGY_NAMES),
            },
            _ => {
                let strategy = chart_name.contains("财务战略");
                Self {
                    center: (0.0, 0.0),
                    range: AxisRange::Symmetric,
                    x_axis_name: if strategy { "资金状态" } else { "输血结构" },
                    y_axis_name: if strategy { "价值创造" } else { "造血占比" },
                    names: None,
                }
            }
        }
    }

    pub fn classify(&self, x: f64, y: f64) -> Quadrant {
        classify(x, y, self.center.0, self.center.1)
    }

    /// Indicator-specific name, or the generic quadrant label.
    pub fn quadrant_name(&self, quadrant: Quadrant) -> String {
        match self.names {
            Some(names) => names[quadrant.index()].to_string(),
            None => quadrant.to_string(),
        }
    }

    pub fn axis_on_zero(&self) -> bool {
        matches!(self.range, AxisRange::Fixed { min, .. } if min < 0.0)
    }

    pub fn bounds(&self, points: &[(f64, f64)]) -> Bounds {
        match self.range {
            AxisRange::Fixed { min, max } => Bounds { x_min: min, x_max: max, y_min: min, y_max: max },
            AxisRange::Symmetric => {
                let x_abs = points.iter().fold(0.0_f64, |acc, (x, _)| acc.max(x.abs()));
                let y_abs = points.iter().fold(0.0_f64, |acc, (_, y)| acc.max(y.abs()));
                let x_range = (x_abs * 1.2).max(1.0);
                let y_range = (y_abs * 1.2).max(1.0);
                Bounds { x_min: -x_range, x_max: x_range, y_min: -y_range, y_max: y_range }
            }
        }
    }

    /// Anchor for each quadrant's label, in quadrant order.
    pub fn label_positions(&self, bounds: &Bounds) -> [(f64, f64); 4] {
        let (cx, cy) = self.center;
        let half = |from: f64, to: f64| from + (to - from) / 2.0;
        match self.range {
            AxisRange::Fixed { .. } => [
                (half(cx, bounds.x_max), half(cy, bounds.y_max)),
                (half(cx, bounds.x_min), half(cy, bounds.y_max)),
                (half(cx, bounds.x_min), half(cy, bounds.y_min)),
                (half(cx, bounds.x_max), half(cy, bounds.y_min)),
            ],
            AxisRange::Symmetric => [
                (bounds.x_max * 0.7, bounds.y_max * 0.7),
                (bounds.x_min * 0.7, bounds.y_max * 0.7),
                (bounds.x_min * 0.7, bounds.y_min * 0.7),
                (bounds.x_max * 0.7, bounds.y_min * 0.7),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_points_fall_on_non_negative_side() {
        assert_eq!(classify(50.0, 50.0, 50.0, 50.0), Quadrant::First);
        assert_eq!(classify(49.9, 50.0, 50.0, 50.0), Quadrant::Second);
        assert_eq!(classify(50.0, 49.9, 50.0, 50.0), Quadrant::Fourth);
    }

    #[test]
    fn fixed_frames_place_labels_mid_quadrant() {
        let frame = QuadrantFrame::for_indicator("7.33.1", "");
        let bounds = frame.bounds(&[]);
        assert_eq!(frame.label_positions(&bounds)[1], (25.0, 75.0));

        let frame = QuadrantFrame::for_indicator("7.52.1", "");
        let bounds = frame.bounds(&[]);
        assert_eq!(frame.label_positions(&bounds)[2], (-50.0, -50.0));
        assert!(frame.axis_on_zero());
    }

    #[test]
    fn symmetric_range_has_floor_of_one() {
        let frame = QuadrantFrame::for_indicator("7.99", "");
        let bounds = frame.bounds(&[(0.1, -0.2)]);
        assert_eq!(bounds.x_max, 1.0);
        assert_eq!(bounds.y_min, -1.0);
        assert_eq!(frame.quadrant_name(Quadrant::Third), "第三象限");
    }
}

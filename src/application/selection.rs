use crate::domain::{
    directory::{Company, IndicatorSelection},
    events::SelectionEvent,
};
use derive_more::Display;

/// Which half of the (company, indicator) pair is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SelectionPhase {
    Empty,
    PartialCompany,
    PartialIndicator,
    Ready,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    company: Option<Company>,
    indicator: Option<IndicatorSelection>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an event and returns the resulting phase. A new selection in
    /// `Ready` stays `Ready`; clearing drops to the matching partial phase.
    pub fn apply(&mut self, event: &SelectionEvent) -> SelectionPhase {
        match event {
            SelectionEvent::CompanySelected(company) => self.company = Some(company.clone()),
            SelectionEvent::IndicatorSelected(indicator) => self.indicator = Some(indicator.clone()),
            SelectionEvent::CompanyCleared => self.company = None,
            SelectionEvent::IndicatorCleared => self.indicator = None,
        }
        self.phase()
    }

    pub fn phase(&self) -> SelectionPhase {
        match (&self.company, &self.indicator) {
            (None, None) => SelectionPhase::Empty,
            (Some(_), None) => SelectionPhase::PartialCompany,
            (None, Some(_)) => SelectionPhase::PartialIndicator,
            (Some(_), Some(_)) => SelectionPhase::Ready,
        }
    }

    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    pub fn indicator(&self) -> Option<&IndicatorSelection> {
        self.indicator.as_ref()
    }

    pub fn ready_pair(&self) -> Option<(Company, IndicatorSelection)> {
        Some((self.company.clone()?, self.indicator.clone()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::Indicator;

    #[test]
    fn clearing_company_from_ready_keeps_indicator() {
        let mut selection = Selection::new();
        selection.apply(&SelectionEvent::CompanySelected(Company::new("600519.SH", "贵州茅台", None)));
        let phase = selection.apply(&SelectionEvent::IndicatorSelected(IndicatorSelection::Single(
            Indicator::new("7.21", "核心利润获现率"),
        )));
        assert_eq!(phase, SelectionPhase::Ready);
        assert_eq!(selection.apply(&SelectionEvent::CompanyCleared), SelectionPhase::PartialIndicator);
        assert_eq!(selection.apply(&SelectionEvent::IndicatorCleared), SelectionPhase::Empty);
    }
}

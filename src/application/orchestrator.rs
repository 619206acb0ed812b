use crate::application::{
    display::{ContentView, DisplayModel, RawDataView, content_title},
    fetcher::DashboardFetcher,
    selection::{Selection, SelectionPhase},
};
use crate::domain::{
    errors::FetchError,
    events::{DomainEvent, SelectionEvent},
    logging::{LogComponent, LogLevel, get_logger},
};
use futures::future::try_join3;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

/// Result of one `load_and_render` cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    NotReady,
    /// A newer selection arrived while the fetches were in flight.
    Superseded,
    Failed(FetchError),
    Rendered,
}

type Observer = Rc<dyn Fn(&ContentView)>;

/// Owns the selection and turns it into committed content views.
pub struct ContentOrchestrator<F: DashboardFetcher> {
    fetcher: Rc<F>,
    period: String,
    selection: RefCell<Selection>,
    generation: Cell<u64>,
    view: RefCell<ContentView>,
    observers: RefCell<Vec<Observer>>,
}

impl<F: DashboardFetcher> ContentOrchestrator<F> {
    pub fn new(fetcher: Rc<F>, period: &str) -> Self {
        Self {
            fetcher,
            period: period.to_string(),
            selection: RefCell::new(Selection::new()),
            generation: Cell::new(0),
            view: RefCell::new(ContentView::Welcome),
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe<O>(&self, observer: O)
    where
        O: Fn(&ContentView) + 'static,
    {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    pub fn phase(&self) -> SelectionPhase {
        self.selection.borrow().phase()
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn view(&self) -> ContentView {
        self.view.borrow().clone()
    }

    fn advance_generation(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    fn is_current(&self, token: u64) -> bool {
        self.generation.get() == token
    }

    fn commit(&self, view: ContentView) {
        *self.view.borrow_mut() = view.clone();
        let observers: Vec<Observer> = self.observers.borrow().iter().cloned().collect();
        for observer in observers {
            observer(&view);
        }
    }

    /// Applies a selection event and commits the view for the new phase.
    /// Returns `Ready` when the caller should run [`Self::load_and_render`].
    pub fn handle_event(&self, event: &SelectionEvent) -> SelectionPhase {
        self.advance_generation();
        let phase = self.selection.borrow_mut().apply(event);
        get_logger().log_with_metadata(
            LogLevel::Debug,
            LogComponent::Application("Orchestrator"),
            &format!("selection event {} -> {}", event.event_type(), phase),
            &format!("generation={}", self.generation.get()),
        );

        let view = {
            let selection = self.selection.borrow();
            match (selection.company(), selection.indicator()) {
                (None, None) => ContentView::Welcome,
                (Some(company), None) => ContentView::CompanyInfo(company.clone()),
                (None, Some(indicator)) => ContentView::IndicatorInfo(indicator.clone()),
                (Some(company), Some(indicator)) => ContentView::Loading {
                    company: company.clone(),
                    indicator: indicator.clone(),
                },
            }
        };
        self.commit(view);
        phase
    }

    /// Fetches chart data, analysis and interpretation concurrently and
    /// commits the combined view. The generation token is taken when this
    /// is called, not when the future is first polled.
    pub fn load_and_render(&self) -> impl Future<Output = LoadOutcome> + '_ {
        let pair = self.selection.borrow().ready_pair();
        let token = self.advance_generation();

        async move {
            let Some((company, indicator)) = pair else {
                return LoadOutcome::NotReady;
            };
            let logger = get_logger();
            let component = LogComponent::Application("Orchestrator");
            logger.info(
                component.clone(),
                &format!("loading {} / {} (generation {})", company.code, indicator.code(), token),
            );

            let fetcher = Rc::clone(&self.fetcher);
            let joined = try_join3(
                fetcher.fetch_chart_data(&company, &indicator),
                fetcher.fetch_analysis(&company),
                async { Ok::<_, FetchError>(fetcher.fetch_interpretation(&indicator).await) },
            )
            .await;

            if !self.is_current(token) {
                logger.debug(component, &format!("discarding stale generation {}", token));
                return LoadOutcome::Superseded;
            }

            let (chart_data, analysis, interpretation) = match joined {
                Ok(results) => results,
                Err(error) => {
                    logger.error(
                        component,
                        &format!("{} / {} failed: {}", company.code, indicator.code(), error),
                    );
                    self.commit(ContentView::Error {
                        title: content_title(&company, &indicator),
                        message: error.to_string(),
                    });
                    return LoadOutcome::Failed(error);
                }
            };

            let model = DisplayModel::build(
                company.clone(),
                indicator.clone(),
                chart_data,
                &analysis,
                interpretation,
                token,
                &self.period,
            );
            self.commit(ContentView::Loaded(Box::new(model)));

            let raw = fetcher.fetch_raw_rows(&company, &indicator).await;
            if !self.is_current(token) {
                return LoadOutcome::Rendered;
            }
            let raw_view = match raw {
                Ok(rows) => RawDataView::Loaded(rows),
                Err(error) => {
                    logger.warn(component, &format!("raw data unavailable: {}", error));
                    RawDataView::Failed(error.to_string())
                }
            };
            let updated = match self.view() {
                ContentView::Loaded(mut model) => {
                    model.raw_data = raw_view;
                    Some(ContentView::Loaded(model))
                }
                _ => None,
            };
            if let Some(view) = updated {
                self.commit(view);
            }
            LoadOutcome::Rendered
        }
    }
}

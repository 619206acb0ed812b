use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use crate::{
    application::{
        ChartPanel, ContentOrchestrator, ContentView, DirectoryService, DisplayModel, RawDataView,
        SelectionPhase, display::DataStatus,
    },
    config::DashboardConfig,
    domain::{
        analysis::{AnalysisReport, InterpretationFrame},
        chart::RawDataRow,
        directory::{Company, IndicatorGroup, IndicatorSelection},
        events::{SelectionBus, SelectionEvent},
        logging::{LogComponent, get_logger},
    },
    infrastructure::{
        ApiClient,
        rendering::{EChartsRenderer, MountedChart},
    },
};

/// 🧭 Общее состояние UI, передается через Leptos context
#[derive(Clone)]
pub struct AppState {
    pub directory: RwSignal<Option<Rc<DirectoryService>>>,
    pub orchestrator: Rc<ContentOrchestrator<ApiClient>>,
    pub bus: Rc<SelectionBus>,
    pub content: RwSignal<ContentView>,
    pub selected_company: RwSignal<Option<Company>>,
    pub active_indicator: RwSignal<Option<String>>,
}

impl AppState {
    /// Связываем шину выбора с оркестратором, а оркестратор с сигналом контента
    pub fn new(api: Rc<ApiClient>, config: &DashboardConfig) -> Self {
        let bus = Rc::new(SelectionBus::new());
        let orchestrator = Rc::new(ContentOrchestrator::new(api, &config.period));
        let content = create_rw_signal(ContentView::Welcome);
        let selected_company = create_rw_signal(None::<Company>);
        let active_indicator = create_rw_signal(None::<String>);

        orchestrator.subscribe(move |view| content.set(view.clone()));

        let cycle_owner = Rc::clone(&orchestrator);
        bus.subscribe(move |event| {
            if cycle_owner.handle_event(event) == SelectionPhase::Ready {
                let orchestrator = Rc::clone(&cycle_owner);
                spawn_local(async move {
                    let outcome = orchestrator.load_and_render().await;
                    get_logger().debug(
                        LogComponent::Presentation("App"),
                        &format!("🔁 load cycle finished: {:?}", outcome),
                    );
                });
            }
        });

        bus.subscribe(move |event| match event {
            SelectionEvent::CompanySelected(company) => selected_company.set(Some(company.clone())),
            SelectionEvent::CompanyCleared => selected_company.set(None),
            SelectionEvent::IndicatorSelected(indicator) => {
                active_indicator.set(Some(indicator.code().to_string()))
            }
            SelectionEvent::IndicatorCleared => active_indicator.set(None),
        });

        Self {
            directory: create_rw_signal(None),
            orchestrator,
            bus,
            content,
            selected_company,
            active_indicator,
        }
    }

    fn select_company(&self, code: &str) {
        if let Some(service) = self.directory.get_untracked() {
            if let Err(error) = service.select_company(code) {
                get_logger().warn(LogComponent::Presentation("Search"), &error.to_string());
            }
        }
    }

    fn select_indicator(&self, code: &str) {
        if let Some(service) = self.directory.get_untracked() {
            if let Err(error) = service.select_indicator(code) {
                get_logger().warn(LogComponent::Presentation("Directory"), &error.to_string());
            }
        }
    }

    fn clear_company(&self) {
        if let Some(service) = self.directory.get_untracked() {
            service.clear_company();
        }
    }
}

fn missing_state() -> View {
    view! { <div class="panel-error">"⚠️ 应用状态未初始化"</div> }.into_view()
}

/// 🦀 Главный компонент финансового дашборда
#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let api = Rc::new(ApiClient::new(&config));
    let state = AppState::new(Rc::clone(&api), &config);
    provide_context(state.clone());

    let directory = state.directory;
    let bus = Rc::clone(&state.bus);
    let search_limit = config.search_limit;
    spawn_local(async move {
        let service = DirectoryService::load(api.as_ref(), bus, search_limit).await;
        get_logger().info(
            LogComponent::Presentation("App"),
            &format!(
                "📚 directory ready: {} companies, {} indicator groups",
                service.companies().len(),
                service.catalog().groups().len()
            ),
        );
        directory.set(Some(Rc::new(service)));
    });

    view! {
        <style>
            {r#"
            .dashboard-app {
                font-family: -apple-system, BlinkMacSystemFont, 'PingFang SC', 'Microsoft YaHei', sans-serif;
                background: #f4f6fa;
                min-height: 100vh;
                color: #2c3e50;
            }

            .dashboard-header {
                background: linear-gradient(135deg, #1e3c72 0%, #2a5298 100%);
                color: white;
                padding: 16px 24px;
            }

            .dashboard-body {
                display: flex;
                gap: 16px;
                padding: 16px;
            }

            .sidebar {
                width: 300px;
                flex-shrink: 0;
                display: flex;
                flex-direction: column;
                gap: 16px;
            }

            .panel {
                background: white;
                border-radius: 10px;
                border: 1px solid #e1e6ef;
                padding: 14px;
            }

            .search-input {
                width: 100%;
                padding: 8px 10px;
                border: 1px solid #c8d1e0;
                border-radius: 6px;
                box-sizing: border-box;
            }

            .search-result, .indicator-item {
                padding: 6px 8px;
                border-radius: 5px;
                cursor: pointer;
                display: flex;
                gap: 8px;
            }

            .search-result:hover, .indicator-item:hover {
                background: #eef3fb;
            }

            .indicator-item.active {
                background: #2a5298;
                color: white;
            }

            .indicator-item.child {
                padding-left: 24px;
                font-size: 13px;
            }

            .indicator-code, .company-code {
                color: #7f8c9d;
                font-family: 'SF Mono', monospace;
                font-size: 12px;
            }

            .indicator-item.active .indicator-code {
                color: #dbe6ff;
            }

            .category-title {
                font-size: 14px;
                margin: 12px 0 4px;
                color: #1e3c72;
            }

            .selected-company {
                margin-top: 10px;
                padding: 10px;
                background: #eef3fb;
                border-radius: 6px;
                display: flex;
                justify-content: space-between;
                align-items: center;
            }

            .content-area {
                flex: 1;
                min-width: 0;
            }

            .chart-box {
                width: 100%;
                height: 420px;
            }

            .status-bar {
                display: flex;
                gap: 16px;
                font-size: 13px;
                color: #5d6d7e;
            }

            .panel-error, .error-panel {
                color: #c0392b;
            }

            .raw-table {
                width: 100%;
                border-collapse: collapse;
                font-size: 13px;
            }

            .raw-table th, .raw-table td {
                border-bottom: 1px solid #e1e6ef;
                padding: 6px 8px;
                text-align: left;
            }

            .degraded-banner {
                font-size: 12px;
                color: #b9770e;
            }
            "#}
        </style>
        <div class="dashboard-app">
            <header class="dashboard-header">
                <h1>"📊 财务指标分析"</h1>
            </header>
            <div class="dashboard-body">
                <aside class="sidebar">
                    <SearchPanel />
                    <DirectoryPanel />
                </aside>
                <main class="content-area">
                    <ContentArea />
                </main>
            </div>
        </div>
    }
}

/// 🔍 Поиск компаний и карточка выбранной компании
#[component]
fn SearchPanel() -> impl IntoView {
    let Some(state) = use_context::<AppState>() else {
        return missing_state();
    };
    let query = create_rw_signal(String::new());
    let directory = state.directory;
    let selected_company = state.selected_company;

    let results = move || {
        let text = query.get();
        directory.with(|service| service.as_ref().map(|s| s.search(&text)).unwrap_or_default())
    };

    let degraded = move || directory.with(|service| service.as_ref().is_some_and(|s| s.is_degraded()));

    let results_state = state.clone();
    let card_state = state.clone();

    view! {
        <div class="panel search-panel">
            <input
                class="search-input"
                type="text"
                placeholder="🔍 输入公司名称或代码"
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <Show when=degraded>
                <div class="degraded-banner">"⚠️ 公司列表加载失败，使用内置列表"</div>
            </Show>
            <ul class="search-results">
                {move || {
                    let state = results_state.clone();
                    results()
                        .into_iter()
                        .map(|company| {
                            let state = state.clone();
                            let code = company.code.clone();
                            let on_pick = move |_| {
                                state.select_company(&code);
                                query.set(String::new());
                            };
                            view! {
                                <li class="search-result" on:click=on_pick>
                                    <span class="company-name">{company.name.clone()}</span>
                                    <span class="company-code">{company.code.clone()}</span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            {move || {
                let state = card_state.clone();
                selected_company.get().map(|company| {
                    let on_clear = move |_| state.clear_company();
                    view! {
                        <div class="selected-company">
                            <div>
                                <div class="company-name">{company.name.clone()}</div>
                                <div class="company-code">{company.code.clone()}</div>
                            </div>
                            <button class="clear-btn" on:click=on_clear>"✕"</button>
                        </div>
                    }
                })
            }}
        </div>
    }
    .into_view()
}

/// 📚 Каталог индикаторов по категориям, активный код подсвечен
#[component]
fn DirectoryPanel() -> impl IntoView {
    let Some(state) = use_context::<AppState>() else {
        return missing_state();
    };
    let directory = state.directory;

    view! {
        <div class="panel directory-panel">
            <h2>"📁 指标目录"</h2>
            {move || {
                directory.with(|service| match service {
                    None => view! { <div class="directory-loading">"⏳ 正在加载指标目录..."</div> }.into_view(),
                    Some(service) => service
                        .catalog()
                        .by_category()
                        .into_iter()
                        .map(|(category, groups)| {
                            view! {
                                <div class="category">
                                    <h3 class="category-title">{category.to_string()}</h3>
                                    {groups.into_iter().map(|group| group_view(group, &state)).collect_view()}
                                </div>
                            }
                        })
                        .collect_view(),
                })
            }}
        </div>
    }
    .into_view()
}

fn group_view(group: &IndicatorGroup, state: &AppState) -> View {
    let header = indicator_item(&group.code, &group.name, "indicator-item group", state);
    let children = group
        .indicators
        .iter()
        .map(|indicator| indicator_item(&indicator.code, &indicator.name, "indicator-item child", state))
        .collect_view();

    view! {
        <div class="indicator-group">
            {header}
            {children}
        </div>
    }
    .into_view()
}

fn indicator_item(code: &str, name: &str, class: &'static str, state: &AppState) -> View {
    let active = state.active_indicator;
    let highlighted = {
        let code = code.to_string();
        move || active.get().as_deref() == Some(code.as_str())
    };
    let on_pick = {
        let state = state.clone();
        let code = code.to_string();
        move |_| state.select_indicator(&code)
    };

    view! {
        <div class=class class:active=highlighted on:click=on_pick>
            <span class="indicator-code">{code.to_string()}</span>
            <span class="indicator-name">{name.to_string()}</span>
        </div>
    }
    .into_view()
}

/// 🖼️ Отображение текущего состояния оркестратора
#[component]
fn ContentArea() -> impl IntoView {
    let Some(state) = use_context::<AppState>() else {
        return missing_state();
    };
    let content = state.content;

    // Сырые данные приходят после основного коммита, держим их вне memo графиков,
    // иначе графики перемонтируются
    let main_view = create_memo(move |_| {
        let mut view = content.get();
        if let ContentView::Loaded(model) = &mut view {
            model.raw_data = RawDataView::Pending;
        }
        view
    });
    let raw_data = create_memo(move |_| match content.get() {
        ContentView::Loaded(model) => Some(model.raw_data),
        _ => None,
    });

    (move || match main_view.get() {
        ContentView::Welcome => view! {
            <div class="panel welcome">
                <h2>"👋 欢迎使用财务指标分析"</h2>
                <p>"请在左侧搜索公司并选择指标，查看图表、AI分析和指标解读。"</p>
            </div>
        }
        .into_view(),
        ContentView::CompanyInfo(company) => company_info(&company),
        ContentView::IndicatorInfo(indicator) => indicator_info(&indicator),
        ContentView::Loading { company, indicator } => view! {
            <div class="panel loading">
                <p>{format!("⏳ 正在加载 {} - {} ...", company.name, indicator.name())}</p>
            </div>
        }
        .into_view(),
        ContentView::Loaded(model) => view! { <LoadedContent model=*model raw_data=raw_data /> }.into_view(),
        ContentView::Error { title, message } => view! {
            <div class="panel error-panel">
                <h2>{title}</h2>
                <p>{format!("❌ 数据加载失败: {}", message)}</p>
            </div>
        }
        .into_view(),
    })
    .into_view()
}

fn company_info(company: &Company) -> View {
    view! {
        <div class="panel company-info">
            <h2>{format!("🏢 {}", company.name)}</h2>
            <p>{format!("股票代码: {}", company.code)}</p>
            <p>{format!("所属行业: {}", company.industry.as_deref().unwrap_or("未知"))}</p>
            <p class="hint">"请选择一个指标以查看分析。"</p>
        </div>
    }
    .into_view()
}

fn indicator_info(indicator: &IndicatorSelection) -> View {
    let children = match indicator {
        IndicatorSelection::Group(group) => group
            .indicators
            .iter()
            .map(|child| view! { <li>{format!("{} {}", child.code, child.name)}</li> })
            .collect_view(),
        IndicatorSelection::Single(_) => ().into_view(),
    };

    view! {
        <div class="panel indicator-info">
            <h2>{format!("📐 {}", indicator.name())}</h2>
            <p>{format!("指标代码: {}", indicator.code())}</p>
            <p>{format!("分类: {}", indicator.category())}</p>
            <ul class="indicator-children">{children}</ul>
            <p class="hint">"请选择一家公司以加载数据。"</p>
        </div>
    }
    .into_view()
}

#[component]
fn LoadedContent(model: DisplayModel, raw_data: Memo<Option<RawDataView>>) -> impl IntoView {
    let charts = if model.charts.is_empty() || model.status.point_count == 0 {
        view! { <div class="panel">"📭 暂无图表数据"</div> }.into_view()
    } else {
        model
            .charts
            .into_iter()
            .map(|panel| view! { <ChartPanelView panel=panel /> })
            .collect_view()
    };

    view! {
        <div class="loaded-content">
            <div class="panel">
                <h2>{model.title.clone()}</h2>
                {status_bar(&model.status)}
            </div>
            {charts}
            <AnalysisPanel report=model.analysis />
            <InterpretationPanel frame=model.interpretation />
            <RawDataTable raw_data=raw_data />
        </div>
    }
}

fn status_bar(status: &DataStatus) -> View {
    view! {
        <div class="status-bar">
            <span>{if status.success { "✅ 数据获取成功" } else { "⚠️ 数据获取未成功" }}</span>
            <span>{if status.real_data { "真实数据" } else { "示例数据" }}</span>
            <span>{format!("数据点: {}", status.point_count)}</span>
            <span>{format!("期间: {}", status.period)}</span>
        </div>
    }
    .into_view()
}

/// 📈 Контейнер для одного ECharts графика, монтируется после вставки в DOM
#[component]
fn ChartPanelView(panel: ChartPanel) -> impl IntoView {
    let mounted: Rc<RefCell<Option<MountedChart>>> = Rc::new(RefCell::new(None));

    {
        let mounted = Rc::clone(&mounted);
        let container_id = panel.container_id.clone();
        let option = panel.option.clone();
        request_animation_frame(move || match EChartsRenderer::mount(&container_id, &option) {
            Ok(chart) => *mounted.borrow_mut() = Some(chart),
            Err(error) => get_logger().warn(
                LogComponent::Presentation("ChartPanel"),
                &format!("chart {} skipped: {}", container_id, error),
            ),
        });
    }

    on_cleanup(move || {
        mounted.borrow_mut().take();
    });

    view! {
        <div class="panel chart-panel">
            <h3>{panel.title.clone()}</h3>
            <div class="chart-box" id=panel.container_id.clone()></div>
        </div>
    }
}

#[component]
fn AnalysisPanel(report: AnalysisReport) -> impl IntoView {
    if !report.available || !report.has_content() {
        return view! {
            <div class="panel analysis-panel">
                <h3>"🤖 AI分析"</h3>
                <p class="hint">"暂无AI分析数据"</p>
            </div>
        }
        .into_view();
    }

    let assessment = report.assessment.map(|overall| {
        view! {
            <div class="assessment">
                {overall.score.map(|score| view! { <span>{format!("评分: {}", score)}</span> })}
                {overall.level.map(|level| view! { <span>{format!(" 等级: {}", level)}</span> })}
                {overall.trend.map(|trend| view! { <span>{format!(" 趋势: {}", trend)}</span> })}
                {overall.industry_comparison.map(|cmp| view! { <span>{format!(" 行业对比: {}", cmp)}</span> })}
            </div>
        }
    });

    view! {
        <div class="panel analysis-panel">
            <h3>"🤖 AI分析"</h3>
            {assessment}
            {report.narrative.map(|text| view! { <p class="narrative">{text}</p> })}
            {titled_list("💪 优势", report.strengths)}
            {titled_list("⚠️ 风险", report.risks)}
            {report.recommendation.map(|text| view! { <p>{format!("📌 投资建议: {}", text)}</p> })}
            {report.summary.map(|text| view! { <p>{format!("📝 {}", text)}</p> })}
            {titled_list("💡 建议", report.recommendations)}
        </div>
    }
    .into_view()
}

fn titled_list(title: &'static str, items: Vec<String>) -> Option<View> {
    (!items.is_empty()).then(|| {
        view! {
            <div class="titled-list">
                <h4>{title}</h4>
                <ul>{items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}</ul>
            </div>
        }
        .into_view()
    })
}

#[component]
fn InterpretationPanel(frame: InterpretationFrame) -> impl IntoView {
    let interpretation = frame.interpretation;
    let thresholds = interpretation
        .thresholds
        .into_iter()
        .map(|(level, text)| view! { <li><strong>{level}</strong>{format!(": {}", text)}</li> })
        .collect_view();
    let reference = interpretation.ai_analysis_reference.map(|reference| {
        view! {
            <div class="analysis-reference">
                {reference.analysis_framework.map(|text| view! { <p>{format!("🧭 分析框架: {}", text)}</p> })}
                {reference
                    .typical_patterns
                    .into_iter()
                    .map(|pattern| {
                        view! {
                            <div class="pattern">
                                <h5>{pattern.name}</h5>
                                <ul>
                                    {pattern.characteristics.into_iter().map(|c| view! { <li>{c}</li> }).collect_view()}
                                </ul>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
    });

    view! {
        <div class="panel interpretation-panel">
            <h3>{format!("📖 指标解读: {} ({})", frame.name, frame.code)}</h3>
            {interpretation.core_interpretation.map(|text| view! { <p>{text}</p> })}
            <ul class="thresholds">{thresholds}</ul>
            {reference}
        </div>
    }
}

#[component]
fn RawDataTable(raw_data: Memo<Option<RawDataView>>) -> impl IntoView {
    view! {
        <div class="panel raw-data">
            <h3>"🗂️ 原始数据"</h3>
            {move || match raw_data.get() {
                None | Some(RawDataView::Pending) => view! { <p class="hint">"⏳ 正在加载原始数据..."</p> }.into_view(),
                Some(RawDataView::Failed(message)) => {
                    view! { <p class="panel-error">{format!("原始数据加载失败: {}", message)}</p> }.into_view()
                }
                Some(RawDataView::Loaded(rows)) if rows.is_empty() => {
                    view! { <p class="hint">"暂无原始数据"</p> }.into_view()
                }
                Some(RawDataView::Loaded(rows)) => view! {
                    <table class="raw-table">
                        <thead>
                            <tr>
                                {RawDataRow::HEADERS.iter().map(|header| view! { <th>{*header}</th> }).collect_view()}
                            </tr>
                        </thead>
                        <tbody>
                            {rows
                                .iter()
                                .map(|row| {
                                    let cells = row.cells().into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view();
                                    view! { <tr>{cells}</tr> }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_view(),
            }}
        </div>
    }
}

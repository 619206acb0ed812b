mod support;

use finance_dashboard_wasm::application::DirectoryService;
use finance_dashboard_wasm::domain::directory::{Company, IndicatorCatalog};
use finance_dashboard_wasm::domain::errors::SelectionError;
use finance_dashboard_wasm::domain::events::{SelectionBus, SelectionEvent};
use futures::executor::block_on;
use std::cell::RefCell;
use std::rc::Rc;
use support::ScriptedFetcher;

#[test]
fn offline_backend_uses_embedded_directory() {
    let service = block_on(DirectoryService::load(&ScriptedFetcher::offline(), Rc::new(SelectionBus::new()), 10));

    assert!(service.is_degraded());
    assert_eq!(service.companies().len(), 11);
    assert_eq!(service.catalog().groups().len(), 19);
    assert_eq!(service.search("茅台")[0].code, "600519.SH");
}

#[test]
fn short_company_list_is_padded_with_fallback() {
    let fetcher = ScriptedFetcher {
        companies: Ok(vec![
            Company::new("600519.SH", "贵州茅台", Some("白酒")),
            Company::new("601318.SH", "中国平安", Some("保险")),
        ]),
        ..ScriptedFetcher::new()
    };
    let service = block_on(DirectoryService::load(&fetcher, Rc::new(SelectionBus::new()), 10));

    assert!(!service.is_degraded());
    assert_eq!(service.companies().len(), 12);
    assert_eq!(service.companies().companies()[1].name, "中国平安");
}

#[test]
fn empty_catalog_falls_back() {
    let fetcher = ScriptedFetcher { catalog: Ok(IndicatorCatalog::new(Vec::new())), ..ScriptedFetcher::new() };
    let service = block_on(DirectoryService::load(&fetcher, Rc::new(SelectionBus::new()), 10));
    assert!(service.catalog().find("7.52").is_some());
}

#[test]
fn selections_are_published_on_the_bus() {
    let bus = Rc::new(SelectionBus::new());
    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let service = block_on(DirectoryService::load(&ScriptedFetcher::new(), Rc::clone(&bus), 10));
    service.select_company("000858.SZ").unwrap();
    service.select_indicator("7.21").unwrap();
    service.clear_indicator();

    let events = received.borrow();
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[0], SelectionEvent::CompanySelected(c) if c.name == "五粮液"));
    assert!(matches!(&events[1], SelectionEvent::IndicatorSelected(i) if i.code() == "7.21"));
    assert_eq!(events[2], SelectionEvent::IndicatorCleared);
}

#[test]
fn unknown_codes_are_rejected_without_publishing() {
    let bus = Rc::new(SelectionBus::new());
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    bus.subscribe(move |_| *sink.borrow_mut() += 1);

    let service = block_on(DirectoryService::load(&ScriptedFetcher::new(), Rc::clone(&bus), 10));
    assert_eq!(
        service.select_company("999999.SZ"),
        Err(SelectionError::UnknownCompany("999999.SZ".to_string()))
    );
    assert_eq!(
        service.select_indicator("9.99"),
        Err(SelectionError::UnknownIndicator("9.99".to_string()))
    );
    assert_eq!(*count.borrow(), 0);
}

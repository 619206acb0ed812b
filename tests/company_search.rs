use finance_dashboard_wasm::domain::directory::{Company, CompanyDirectory, default_companies};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn large_directory() -> CompanyDirectory {
    let companies = (0..40)
        .map(|i| Company::new(&format!("{:06}.SZ", i), &format!("测试公司{}", i), None))
        .chain(default_companies())
        .collect();
    CompanyDirectory::new(companies)
}

#[quickcheck]
fn results_match_query_case_insensitively(query: String) -> TestResult {
    if query.trim().is_empty() {
        return TestResult::discard();
    }
    let directory = large_directory();
    let lowered = query.to_lowercase();
    let results = directory.search(&query);

    TestResult::from_bool(
        results.len() <= CompanyDirectory::DEFAULT_SEARCH_LIMIT
            && results.iter().all(|company| {
                company.name.to_lowercase().contains(&lowered) || company.code.to_lowercase().contains(&lowered)
            }),
    )
}

#[quickcheck]
fn results_keep_source_order(query: String) -> bool {
    let directory = large_directory();
    let positions: Vec<usize> = directory
        .search(&query)
        .iter()
        .filter_map(|found| directory.companies().iter().position(|c| c.code == found.code))
        .collect();
    positions.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn every_listed_code_finds_itself(index: usize) -> bool {
    let companies = default_companies();
    let company = &companies[index % companies.len()];
    CompanyDirectory::new(companies.clone())
        .search(&company.code.to_lowercase())
        .iter()
        .any(|found| found.code == company.code)
}

#[test]
fn broad_query_is_capped_at_ten() {
    assert_eq!(large_directory().search("SZ").len(), 10);
    assert_eq!(large_directory().with_search_limit(3).search("测试").len(), 3);
}

#[test]
fn name_and_code_both_match() {
    let directory = CompanyDirectory::new(default_companies());
    assert_eq!(directory.search("五粮液")[0].code, "000858.SZ");
    assert_eq!(directory.search("600809")[0].name, "山西汾酒");
    assert!(directory.search(" 600809 ").is_empty());
    assert!(directory.search("不存在的公司").is_empty());
}

#[test]
fn blank_query_lists_companies_in_source_order() {
    let directory = CompanyDirectory::new(default_companies());
    let listed: Vec<String> = directory.search("").into_iter().map(|c| c.code).collect();
    let expected: Vec<String> = default_companies().into_iter().take(10).map(|c| c.code).collect();
    assert_eq!(listed, expected);
    assert_eq!(directory.search("   ").len(), listed.len());
}

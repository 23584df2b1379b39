#![allow(dead_code)]

use tradeview_core::ViewType;
use tradeview_engine::{StaticSite, ViewUrls};

pub const ENTITY: &str = "44402588";

pub fn view_url(view: ViewType) -> String {
    ViewUrls::default().url_for(view, ENTITY)
}

pub fn page_url(view: ViewType, page: usize) -> String {
    format!("{}&page={page}", view_url(view))
}

pub fn raised_url(view: ViewType) -> String {
    format!("{}&per_page=100", view_url(view))
}

/// Builder for one rendered results page.
pub struct ResultsPage {
    view: ViewType,
    declared: Option<String>,
    rows: Vec<Vec<String>>,
    next: Option<String>,
    page_size_option: Option<String>,
    container: bool,
}

impl ResultsPage {
    pub fn new(view: ViewType, declared: &str) -> Self {
        Self {
            view,
            declared: Some(declared.to_string()),
            rows: Vec::new(),
            next: None,
            page_size_option: None,
            container: true,
        }
    }

    pub fn without_count(mut self) -> Self {
        self.declared = None;
        self
    }

    pub fn without_container(mut self) -> Self {
        self.container = false;
        self
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Adds `n` well-formed rows named `"{prefix} {i}"`.
    pub fn generated_rows(mut self, prefix: &str, n: usize) -> Self {
        for i in 0..n {
            let name = format!("{prefix} {i}");
            self.rows.push(vec![
                name,
                "Global HQ".to_string(),
                "Local HQ".to_string(),
                "Parent".to_string(),
            ]);
        }
        self
    }

    pub fn next(mut self, href: &str) -> Self {
        self.next = Some(href.to_string());
        self
    }

    pub fn page_size_option(mut self, href: &str) -> Self {
        self.page_size_option = Some(href.to_string());
        self
    }

    pub fn html(&self) -> String {
        let mut html = String::from("<html><head><title>Results</title></head><body>");
        if let Some(declared) = &self.declared {
            html.push_str(&format!(
                r#"<div class="aggr-stat-container {}"><span class="notranslate t2tt" title="{}">{}</span></div>"#,
                self.view.count_class(),
                declared,
                declared
            ));
        }
        if let Some(href) = &self.page_size_option {
            html.push_str(&format!(
                r#"<div id="per_page_control_chosen"><a class="chosen-single"><span>20</span></a>
                <div class="chosen-drop"><ul>
                <li class="active-result">20</li>
                <li class="active-result">50</li>
                <li class="active-result" href="{href}">100</li>
                </ul></div></div>"#
            ));
        }
        if self.container {
            html.push_str(r#"<div id="export_records_results"><div id="results_set_wrapper"><table><tbody>"#);
            if self.rows.is_empty() {
                html.push_str(r#"<tr class="missing-row"><td>No records</td></tr>"#);
            }
            for row in &self.rows {
                html.push_str(r#"<tr><td class="wrap view-record"><a>View</a></td>"#);
                for cell in row {
                    html.push_str(&format!(r#"<td class="wrap">{cell}</td>"#));
                }
                html.push_str("</tr>");
            }
            html.push_str("</tbody></table></div></div>");
        }
        html.push_str(r#"<div id="paging_div"><div class="results-by-page">"#);
        if let Some(href) = &self.next {
            html.push_str(&format!(
                r#"<a aria-label="Next Page" href="{href}">&gt;</a><a aria-label="Last Page" href="{href}">&raquo;</a>"#
            ));
        }
        html.push_str("</div></div></body></html>");
        html
    }
}

pub fn empty_page() -> String {
    r#"<html><body><div class="no-results"><h3>No results found</h3></div></body></html>"#
        .to_string()
}

/// Inserts a view whose pages hold `rows_per_page[i]` rows each, chained by
/// next-page links. With `raised`, page one offers a page-size control that
/// leads to an identical page one.
pub fn paged_view(
    site: &mut StaticSite,
    view: ViewType,
    declared: &str,
    rows_per_page: &[usize],
    raised: bool,
) {
    for (i, &rows) in rows_per_page.iter().enumerate() {
        let number = i + 1;
        let mut page = ResultsPage::new(view, declared).generated_rows(&format!("p{number}"), rows);
        if number < rows_per_page.len() {
            page = page.next(&page_url(view, number + 1));
        }
        if number == 1 {
            if raised {
                site.insert(&raised_url(view), page.html());
                page = page.page_size_option(&raised_url(view));
            }
            site.insert(&view_url(view), page.html());
        } else {
            site.insert(&page_url(view, number), page.html());
        }
    }
}

pub fn empty_view(site: &mut StaticSite, view: ViewType) {
    site.insert(&view_url(view), empty_page());
}

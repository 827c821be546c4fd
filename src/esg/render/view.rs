use askama::Template;

use crate::esg::data::models::{
  CompositeScore, Dashboard, EsgSection, Headline, NewsSection, ReturnsSection, SentimentResult,
};
use crate::esg::error::DashboardError;
use crate::esg::render::chart::{line_chart, LineChart};

pub const PAGE_TITLE: &str = "ESG & Sentiment Dashboard for Public Companies";

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeView {
  pub level: &'static str,
  pub text: String,
}

impl NoticeView {
  fn warning(text: impl Into<String>) -> Self {
    NoticeView { level: "warning", text: text.into() }
  }

  fn error(text: impl Into<String>) -> Self {
    NoticeView { level: "error", text: text.into() }
  }

  fn info(text: impl Into<String>) -> Self {
    NoticeView { level: "info", text: text.into() }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorRow {
  pub factor: String,
  pub score: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineView {
  pub title: String,
  pub url: Option<String>,
  pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentRow {
  pub headline: String,
  pub label: &'static str,
  pub score: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
  pub title: &'static str,
  pub ticker: String,
  pub company_name: Option<String>,
  pub halted: Option<NoticeView>,
  pub esg_rows: Vec<FactorRow>,
  pub esg_notice: Option<NoticeView>,
  pub headlines: Vec<HeadlineView>,
  pub sentiment_rows: Vec<SentimentRow>,
  pub news_notice: Option<NoticeView>,
  pub composite: Option<String>,
  pub composite_notice: Option<NoticeView>,
  pub chart: Option<LineChart>,
  pub chart_notice: Option<NoticeView>,
}

impl DashboardPage {
  fn empty(ticker: &str) -> Self {
    DashboardPage {
      title: PAGE_TITLE,
      ticker: ticker.to_string(),
      company_name: None,
      halted: None,
      esg_rows: Vec::new(),
      esg_notice: None,
      headlines: Vec::new(),
      sentiment_rows: Vec::new(),
      news_notice: None,
      composite: None,
      composite_notice: None,
      chart: None,
      chart_notice: None,
    }
  }

  /// A halted run shows only the input and the error.
  pub fn halted(ticker: &str, error: &DashboardError) -> Self {
    let mut page = DashboardPage::empty(ticker);
    page.halted = Some(NoticeView::error(format!("{}. Try another ticker.", error)));
    page
  }

  pub fn from_dashboard(dashboard: &Dashboard) -> Self {
    let mut page = DashboardPage::empty(dashboard.ticker.as_str());
    page.company_name = dashboard.profile.name.clone();

    match &dashboard.esg {
      EsgSection::Scores { scores } => {
        page.esg_rows = scores.iter()
          .map(|(factor, score)| FactorRow { factor: factor.to_string(), score: format!("{}", score) })
          .collect();
      }
      EsgSection::NoCoverage { notice } => page.esg_notice = Some(NoticeView::warning(notice.clone())),
    }

    match &dashboard.news {
      NewsSection::Classified { headlines, sentiments, .. } => {
        page.headlines = headline_views(headlines);
        page.sentiment_rows = sentiment_rows(headlines, sentiments);
        if headlines.is_empty() {
          page.news_notice = Some(NoticeView::info("No headlines found for this ticker in the last week."));
        }
      }
      NewsSection::Unclassified { headlines, notice } => {
        page.headlines = headline_views(headlines);
        page.news_notice = Some(NoticeView::error(notice.clone()));
      }
      NewsSection::CredentialMissing { notice } => page.news_notice = Some(NoticeView::warning(notice.clone())),
      NewsSection::FetchFailed { notice } => page.news_notice = Some(NoticeView::error(notice.clone())),
    }

    match &dashboard.composite {
      CompositeScore::Available { value } => page.composite = Some(format!("{:.2}", value)),
      CompositeScore::Unavailable { reason } => {
        page.composite_notice = Some(NoticeView::info(format!("Full score unavailable: missing {}.", reason)));
      }
    }

    match &dashboard.returns {
      ReturnsSection::Series { returns } => match line_chart(returns) {
        Some(chart) => page.chart = Some(chart),
        None => page.chart_notice = Some(NoticeView::info("No trading days in the last year.")),
      },
      ReturnsSection::Unavailable { notice } => page.chart_notice = Some(NoticeView::warning(notice.clone())),
    }

    page
  }

  pub fn from_outcome(ticker: &str, outcome: &Result<Dashboard, DashboardError>) -> Self {
    match outcome {
      Ok(dashboard) => DashboardPage::from_dashboard(dashboard),
      Err(error) => DashboardPage::halted(ticker, error),
    }
  }
}

fn headline_views(headlines: &[Headline]) -> Vec<HeadlineView> {
  headlines.iter()
    .map(|h| HeadlineView { title: h.title.clone(), url: link_target(h.url.as_deref()), source: h.source.clone() })
    .collect()
}

/// Article links come from a third party; only plain web links are rendered
/// as anchors.
fn link_target(url: Option<&str>) -> Option<String> {
  let url: &str = url?.trim();
  let lower: String = url.to_ascii_lowercase();
  if lower.starts_with("https://") || lower.starts_with("http://") {
    Some(url.to_string())
  } else {
    None
  }
}

fn sentiment_rows(headlines: &[Headline], sentiments: &[SentimentResult]) -> Vec<SentimentRow> {
  headlines.iter().zip(sentiments.iter())
    .map(|(h, s)| SentimentRow { headline: h.title.clone(), label: s.label.as_str(), score: format!("{:.4}", s.score) })
    .collect()
}

pub fn render_page(ticker: &str, outcome: &Result<Dashboard, DashboardError>) -> Result<String, askama::Error> {
  DashboardPage::from_outcome(ticker, outcome).render()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use crate::esg::data::models::{CompanyProfile, EsgScores, ReturnPoint, SentimentLabel, Ticker};

  fn dashboard() -> Dashboard {
    let headlines = vec![Headline { title: "Apple <beats> estimates".into(), source: Some("Reuters".into()), url: Some("https://example.com/a".into()) }];
    Dashboard {
      ticker: Ticker::resolve("AAPL"),
      profile: CompanyProfile { name: Some("Apple Inc.".into()), currency: Some("USD".into()) },
      esg: EsgSection::Scores { scores: vec![("environmentScore", 5.0), ("socialScore", 4.0), ("governanceScore", 3.0)].into_iter().collect::<EsgScores>() },
      news: NewsSection::Classified {
        headlines,
        sentiments: vec![SentimentResult::new(SentimentLabel::Positive, 0.95)],
        mean_sentiment: Some(1.0),
      },
      composite: CompositeScore::Available { value: 5.3 },
      returns: ReturnsSection::Series { returns: vec![
        ReturnPoint { date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(), value: 0.0 },
        ReturnPoint { date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), value: 0.01 },
      ] },
    }
  }

  #[test]
  fn sections_render_in_fixed_order() {
    let html = render_page("AAPL", &Ok(dashboard())).unwrap();

    let order = ["ESG Score Breakdown", "News Sentiment", "Composite Score", "Daily Return (1Y)", "Built with"];
    let positions: Vec<usize> = order.iter().map(|s| html.find(s).unwrap_or_else(|| panic!("missing {}", s))).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);

    assert!(html.contains("5.30"));
    assert!(html.contains("environmentScore"));
    assert!(html.contains("<polyline"));
    assert!(html.contains("Apple Inc."));
  }

  #[test]
  fn headlines_are_escaped() {
    let html = render_page("AAPL", &Ok(dashboard())).unwrap();
    assert!(html.contains("Apple &lt;beats&gt; estimates"));
    assert!(!html.contains("Apple <beats> estimates"));
  }

  #[test]
  fn script_links_render_as_plain_titles() {
    let mut dashboard = dashboard();
    dashboard.news = NewsSection::Unclassified {
      headlines: vec![
        Headline { title: "Click me".into(), source: None, url: Some("javascript:alert(document.cookie)".into()) },
        Headline { title: "Shouting".into(), source: None, url: Some(" JavaScript:alert(1)".into()) },
        Headline { title: "Inline".into(), source: None, url: Some("data:text/html,hi".into()) },
      ],
      notice: "Sentiment model failed: offline".into(),
    };
    let html = render_page("AAPL", &Ok(dashboard)).unwrap();

    assert!(html.contains("Click me"));
    assert!(!html.to_ascii_lowercase().contains("javascript:"));
    assert!(!html.contains("data:text"));
    assert!(!html.contains("<a href"));
  }

  #[test]
  fn web_links_are_kept() {
    assert_eq!(link_target(Some("https://example.com/a")), Some("https://example.com/a".to_string()));
    assert_eq!(link_target(Some("HTTP://example.com")), Some("HTTP://example.com".to_string()));
    assert_eq!(link_target(Some("javascript:alert(1)")), None);
    assert_eq!(link_target(Some("//evil.example")), None);
    assert_eq!(link_target(None), None);
  }

  #[test]
  fn halted_page_has_no_sections() {
    let err = DashboardError::data_unavailable("ZZZZ", "Quote not found for symbol: ZZZZ");
    let html = render_page("ZZZZ", &Err(err)).unwrap();

    assert!(html.contains("Unable to fetch ESG data for ZZZZ"));
    assert!(html.contains("Try another ticker."));
    assert!(!html.contains("ESG Score Breakdown"));
    assert!(!html.contains("News Sentiment"));
    assert!(!html.contains("<polyline"));
    assert!(html.contains("Built with"));
  }

  #[test]
  fn unavailable_composite_never_shows_a_number() {
    let mut d = dashboard();
    d.composite = CompositeScore::Unavailable { reason: "news sentiment".into() };
    let page = DashboardPage::from_dashboard(&d);

    assert!(page.composite.is_none());
    assert_eq!(page.composite_notice.unwrap().text, "Full score unavailable: missing news sentiment.");
  }
}

//! Snapshot of the rendered insight statements

use crate::helpers::business_dataset;
use sheetlytics::data::{DatasetView, summarize};

#[test]
fn test_business_insights_snapshot() {
    let ds = business_dataset();
    let insights = summarize(&DatasetView::full(&ds), "Month", "Sales").unwrap();
    let text = insights.iter().collect::<Vec<_>>().join("\n");
    insta::assert_snapshot!("business_insights", text);
}

// GIFT NIFTY quote embedded in the Groww page's Next.js payload
use crate::model::{ParseError, Value};
use scraper::{Html, Selector};
use serde::Deserialize;

pub const GIFT_NIFTY_URL: &str = "https://groww.in/indices/global-indices/sgx-nifty";

#[derive(Debug, Deserialize)]
struct NextData {
    props: Props,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Props {
    page_props: PageProps,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageProps {
    global_indices_data: GlobalIndicesData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GlobalIndicesData {
    price_data: PriceData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceData {
    value: f64,
    day_change_perc: f64,
}

pub fn parse_gift_nifty(html: &str) -> Result<Value, ParseError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script#__NEXT_DATA__")
        .map_err(|e| ParseError::HtmlParseError(e.to_string()))?;

    let script = document
        .select(&selector)
        .next()
        .ok_or_else(|| ParseError::MissingField("__NEXT_DATA__".into()))?;
    let payload: String = script.text().collect();

    let data: NextData = serde_json::from_str(&payload)?;
    let price = data.props.page_props.global_indices_data.price_data;

    if !price.value.is_finite() || !price.day_change_perc.is_finite() {
        return Err(ParseError::Malformed("non-finite price data".into()));
    }

    Ok(Value::Quote {
        price: price.value,
        change_pct: price.day_change_perc,
    })
}

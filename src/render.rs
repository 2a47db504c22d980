//! HTML fragments for the dashboard widgets
//!
//! Each function takes already-normalized records and returns a fragment the
//! HTTP layer inserts into the page as-is. Input order is kept; nothing is
//! re-sorted. Values that come from the API are HTML-escaped.

use crate::{
    constants::{MARKET_CAP_SUMMARY_PRECISION, TABLE_CHANGE_PRECISION, TRENDING_CHANGE_PRECISION},
    format::{format_count, format_currency_usd, format_high_precision_price, format_percent},
    indicator::indicator_for,
    types::{CoinSnapshot, GlobalStats, Indicator, StablecoinSnapshot, TrendingItem},
};
use rust_decimal::Decimal;

/// Escapes text for use in element content and double-quoted attributes
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `▲ 1.25%` style badge text
fn badge_text(indicator: &Indicator) -> String {
    format!(
        "{} {}%",
        indicator.sign.glyph(),
        format_percent(indicator.magnitude, indicator.precision)
    )
}

fn badge_span(change: Decimal, precision: u32) -> String {
    let indicator = indicator_for(change, precision);
    format!(
        r#"<span class="{}">{}</span>"#,
        indicator.color_class.css_class(),
        badge_text(&indicator)
    )
}

fn badge_cell(change: Decimal, precision: u32) -> String {
    let indicator = indicator_for(change, precision);
    format!(
        r#"<td class="{}">{}</td>"#,
        indicator.color_class.css_class(),
        badge_text(&indicator)
    )
}

fn list_row(image_url: &str, name: &str, figure: &str) -> String {
    format!(
        r#"<div class="flex justify-between mt-2 font-medium">
  <div class="flex space-x-2">
    <img src="{}" width="25px" class="rounded-full"/>
    <span>{}</span>
  </div>
  <div>{}</div>
</div>
"#,
        escape_html(image_url),
        escape_html(name),
        figure
    )
}

/// Trending coins with a ten-digit price and a 24h change badge
pub fn render_trending(items: &[TrendingItem]) -> String {
    items
        .iter()
        .map(|item| {
            let figure = format!(
                "${} {}",
                format_high_precision_price(item.price_usd),
                badge_span(item.price_change_pct_24h_usd, TRENDING_CHANGE_PRECISION)
            );
            list_row(&item.image_url, &item.name, &figure)
        })
        .collect()
}

/// Stablecoin prices, no change badge
pub fn render_stablecoins(coins: &[StablecoinSnapshot]) -> String {
    coins
        .iter()
        .map(|coin| {
            let snapshot = &coin.snapshot;
            list_row(
                &snapshot.image_url,
                &snapshot.name,
                &format_currency_usd(snapshot.current_price_usd),
            )
        })
        .collect()
}

/// Total market cap headline with its 24h change badge
pub fn render_market_cap_summary(stats: &GlobalStats) -> String {
    format!(
        r#"<h2 class="text-2xl font-bold">{}</h2>
<p class="text-gray-500 font-semibold">Market Cap {}</p>
"#,
        format_currency_usd(stats.total_market_cap_usd),
        badge_span(stats.market_cap_change_pct_24h, MARKET_CAP_SUMMARY_PRECISION)
    )
}

/// Number of active cryptocurrencies
pub fn render_coin_count(stats: &GlobalStats) -> String {
    format!(
        "<h2 class=\"text-2xl font-bold\">🪙 {}</h2>\n",
        format_count(stats.active_cryptocurrencies)
    )
}

fn market_row(coin: &CoinSnapshot) -> String {
    let rank = coin
        .market_cap_rank
        .map(|rank| rank.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        r#"<tr class="text-gray-600 font-semibold text-[14px] border-b-[1px] border-t-[1px] border-gray-100">
  <td class="text-center">{rank}</td>
  <td class="flex flex-row items-center space-x-4 pl-8 py-4">
    <img src="{image}" alt="symbol-image" class="w-6 h-6"/>
    <div class="flex flex-row items-center space-x-2">
      <h3 class="font-medium text-black">{name}</h3>
      <h4 class="text-gray-400">{symbol}</h4>
    </div>
  </td>
  <td>{price}</td>
  {price_change}
  <td>{market_cap}</td>
  {market_cap_change}
</tr>
"#,
        rank = rank,
        image = escape_html(&coin.image_url),
        name = escape_html(&coin.name),
        symbol = escape_html(&coin.symbol.to_uppercase()),
        price = format_currency_usd(coin.current_price_usd),
        price_change = badge_cell(coin.price_change_pct_24h, TABLE_CHANGE_PRECISION),
        market_cap = format_currency_usd(coin.market_cap_usd),
        market_cap_change = badge_cell(coin.market_cap_change_pct_24h, TABLE_CHANGE_PRECISION),
    )
}

/// Market table body, one row per coin in listing order
pub fn render_market_table(coins: &[CoinSnapshot]) -> String {
    coins.iter().map(market_row).collect()
}
